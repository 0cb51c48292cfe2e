//! Transport-level building blocks shared by the Constellation crates: where requests go, which
//! client sends them, how transport failures are reported and which requests need a token.

mod configuration;
mod error;
mod util;

pub use configuration::Configuration;
pub use error::Error;
pub use util::{AuthRequired, ContentType};
