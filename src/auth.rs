//! Auth-domain identifiers, token secrets, and normalized provider records.

pub mod id;
pub mod token;
pub mod user;

pub use id::*;
pub use token::{secret::*, *};
pub use user::*;
