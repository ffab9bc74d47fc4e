//! Business services sitting between handlers and repositories.

pub mod accounts;

pub use accounts::{AccountError, AccountService};
