#![doc = include_str!("../README.md")]

pub mod auth;
pub mod client;
mod error;
pub mod graphql;
pub mod http;

pub use client::{Client, ClientSettings};
pub use error::{ApiError, MissingCredentialsError, MissingFieldError};
