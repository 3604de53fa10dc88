//! Users domain module.
//!
//! Identity entities shared by customers and employees; usernames are derived
//! from the email address and must be unique across all users.

pub mod user;

pub use user::{User, UserId};
