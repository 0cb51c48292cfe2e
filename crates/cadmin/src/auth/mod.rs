use clap::Args;
use color_eyre::eyre::{Result, bail};
use constellation_auth::{AuthClientExt, SessionStatus, login::models::LoginRequest};
use constellation_cli::{password_prompt_when_none, text_prompt_when_none};
use constellation_core::auth::RefreshOutcome;
use serde::Serialize;
use tracing::debug;

use crate::{render::CommandOutput, render::CommandResult, state::CliState};

pub const PASSWORD_ENV: &str = "CADMIN_PASSWORD";

#[derive(Args, Clone)]
pub struct LoginArgs {
    #[arg(short = 'e', long, help = "Email address")]
    pub email: Option<String>,

    #[arg(
        long,
        env = PASSWORD_ENV,
        hide_env_values = true,
        help = "Password. Prompted for when not given."
    )]
    pub password: Option<String>,
}

impl LoginArgs {
    pub async fn run(self, state: &CliState) -> CommandResult {
        let email = text_prompt_when_none("Email", self.email)?;
        let password = password_prompt_when_none("Password", self.password)?;

        let response = state
            .client()
            .auth()
            .login()
            .login(LoginRequest::new(email, password))
            .await?;
        debug!(account_id = %response.account_id, "Login succeeded");

        state.save_server().await?;

        Ok(format!("Logged in as account {}", response.account_id).into())
    }
}

pub(crate) async fn logout(state: &CliState) -> CommandResult {
    state.client().auth().logout().await?;
    Ok("Logged out".into())
}

pub(crate) async fn refresh(state: &CliState) -> CommandResult {
    match state.client().auth().refresh().await? {
        RefreshOutcome::Refreshed(_) => Ok("Session refreshed".into()),
        RefreshOutcome::NoCredentials => bail!("Not logged in"),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusOutput {
    server: String,
    state_dir: String,
    #[serde(flatten)]
    session: SessionStatus,
}

pub(crate) async fn status(state: &CliState) -> CommandResult {
    let session = state.client().auth().status().await?;

    Ok(CommandOutput::Object(Box::new(StatusOutput {
        server: state.server().to_owned(),
        state_dir: state.dir().display().to_string(),
        session,
    })))
}
