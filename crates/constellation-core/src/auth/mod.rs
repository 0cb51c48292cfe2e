//! Credential types and the seam through which an authentication crate plugs its middleware
//! into the [Client](crate::Client). The concrete refresh and replay logic lives in the
//! `constellation-auth` crate.

mod credentials;
mod token_handler;
mod token_store;

pub use credentials::{CredentialPair, RefreshError, RefreshOutcome};
pub use token_handler::{NoopTokenHandler, TokenHandler, TokenHandlerContext};
pub use token_store::TokenStore;
