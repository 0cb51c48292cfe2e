//! Settings that control where and how the [Client](super::Client) talks to the API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Basic client behavior settings. These settings specify the target server and the timeouts of
/// the Constellation Client. They are optional and uneditable once the client is initialized.
///
/// Defaults to
///
/// ```
/// # use constellation_core::ClientSettings;
/// let settings = ClientSettings {
///     base_url: "https://staging.api.constellation.academy".to_string(),
///     user_agent: "Constellation Rust-SDK".to_string(),
///     refresh_timeout_secs: 30,
///     request_timeout_secs: 60,
/// };
/// let default = ClientSettings::default();
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// The base url of the targeted Constellation instance. Both the GraphQL and the refresh
    /// endpoint live below it. Defaults to `https://staging.api.constellation.academy`
    pub base_url: String,
    /// The user_agent to sent to Constellation. Defaults to `Constellation Rust-SDK`
    pub user_agent: String,
    /// Upper bound in seconds for a single token refresh call. Defaults to 30
    pub refresh_timeout_secs: u64,
    /// Upper bound in seconds for any other request. Defaults to 60
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "https://staging.api.constellation.academy".into(),
            user_agent: "Constellation Rust-SDK".into(),
            refresh_timeout_secs: 30,
            request_timeout_secs: 60,
        }
    }
}

impl ClientSettings {
    /// Settings pointing at `base_url` with every other field left at its default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub(crate) fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
