use constellation_core::graphql::GraphQlOperation;
use serde::{Deserialize, Serialize};

use super::models::LoginRequest;

pub(crate) struct LoginMutation;

impl GraphQlOperation for LoginMutation {
    type Variables = LoginVariables;
    type Data = LoginData;

    const OPERATION_NAME: &'static str = "Login";
    const QUERY: &'static str = r#"mutation Login($input: LoginJwtInput!) {
  Auth {
    loginJwt(input: $input) {
      jwtTokens {
        accessToken
        refreshToken
      }
      accountId
    }
  }
}"#;
}

#[derive(Serialize)]
pub(crate) struct LoginVariables {
    input: LoginJwtInput,
}

#[derive(Serialize)]
struct LoginJwtInput {
    email: String,
    password: String,
}

impl From<LoginRequest> for LoginVariables {
    fn from(request: LoginRequest) -> Self {
        Self {
            input: LoginJwtInput {
                email: request.email,
                password: request.password,
            },
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct LoginData {
    #[serde(rename = "Auth")]
    pub(crate) auth: AuthMutations,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthMutations {
    pub(crate) login_jwt: Option<LoginJwtPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginJwtPayload {
    pub(crate) jwt_tokens: Option<JwtTokens>,
    pub(crate) account_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JwtTokens {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
}
