//! Plain data types: the [`User`] record and its create/update payloads.

pub mod user;

pub use user::*;
