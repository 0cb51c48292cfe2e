//! Files the CLI keeps between invocations.
//!
//! Everything lives in a single directory, by default the platform data directory for `cadmin`:
//!
//! - `cookies.json` holds the refresh token and account identifier, standing in for a browser's
//!   cookie jar.
//! - `settings.json` holds the server URL used at login and the saved node order.
//!
//! The access token is never written to disk. Each invocation starts without one and the first
//! authenticated request obtains it through a refresh.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use constellation_auth::token_management::SessionTokenHandler;
use constellation_core::{
    Client, ClientSettings,
    http::{Cookie, RepositoryCookieStore},
};
use constellation_state::{
    JsonFileRepository, Repository, Setting, SettingItem, SettingsError, register_setting_key,
};
use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

const COOKIES_FILE: &str = "cookies.json";
const SETTINGS_FILE: &str = "settings.json";

register_setting_key!(const SERVER: String = "server");

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Could not determine a state directory, pass --state-dir")]
    StateDirNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// The resolved state directory together with a client reading from it.
pub struct CliState {
    dir: PathBuf,
    server: String,
    client: Client,
    settings: Arc<dyn Repository<SettingItem>>,
}

impl CliState {
    /// Open the state in `dir`, falling back to the platform data directory. The server is taken
    /// from `server`, then from the one saved at login, then from the built-in default.
    pub async fn open(dir: Option<PathBuf>, server: Option<String>) -> Result<Self, StateError> {
        let dir = match dir {
            Some(dir) => dir,
            None => default_state_dir()?,
        };
        ensure_dir(&dir)?;

        let settings: Arc<dyn Repository<SettingItem>> =
            Arc::new(JsonFileRepository::new(dir.join(SETTINGS_FILE)));
        let cookies: Arc<dyn Repository<Cookie>> =
            Arc::new(JsonFileRepository::new(dir.join(COOKIES_FILE)));

        let server = match server {
            Some(server) => server,
            None => match Setting::new(settings.clone(), SERVER).get().await? {
                Some(saved) => saved,
                None => ClientSettings::default().base_url,
            },
        };
        debug!(dir = %dir.display(), %server, "Opened CLI state");

        let client = Client::new_with_token_handler(
            Some(ClientSettings::with_base_url(server.clone())),
            Arc::new(RepositoryCookieStore::new(cookies)),
            Arc::new(SessionTokenHandler::new()),
        );

        Ok(Self {
            dir,
            server,
            client,
            settings,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn settings(&self) -> Arc<dyn Repository<SettingItem>> {
        self.settings.clone()
    }

    /// Remember the current server for later invocations.
    pub async fn save_server(&self) -> Result<(), StateError> {
        Setting::new(self.settings.clone(), SERVER)
            .update(self.server.clone())
            .await?;
        Ok(())
    }
}

fn default_state_dir() -> Result<PathBuf, StateError> {
    ProjectDirs::from("academy", "Constellation", "cadmin")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StateError::StateDirNotFound)
}

/// Create the directory, readable only by the current user
fn ensure_dir(dir: &Path) -> Result<(), StateError> {
    std::fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o700);
        std::fs::set_permissions(dir, perms)?;
    }

    Ok(())
}
