//! Login client module
//! The LoginClient is used to authenticate a Constellation admin with e-mail and password.
//! A successful login seeds the in-memory token store and the credential cookies, after which
//! the token middleware keeps the session alive on its own.

mod login_client;
mod mutation;

/// Models used by the login module
pub mod models;

pub use login_client::{LoginClient, LoginError};
