//! Domain types exchanged between handlers and repositories.
//!
//! Row types derive `sqlx::FromRow` and serialize straight into response
//! bodies; write types (`NewUser`, `ProfileUpdate`) are input-only and
//! never serialized.

pub mod category;
pub mod user;

pub use category::{Category, CategorySummary};
pub use user::{
    DeletedUser, NewUser, Profile, UpdatedProfile, UserFilter, UserKey, UserSummary,
};
