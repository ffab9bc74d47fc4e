//! Core types for Botica.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod digits;
pub mod email;
pub mod id;

pub use digits::{DigitStringError, IdentificationNumber, PhoneNumber};
pub use email::{Email, EmailError};
pub use id::*;
