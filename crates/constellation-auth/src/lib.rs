#![doc = include_str!("../README.md")]

mod auth_client;
pub mod login;
pub mod token_management;

pub use auth_client::{AuthClient, AuthClientExt, LogoutError, SessionStatus};
