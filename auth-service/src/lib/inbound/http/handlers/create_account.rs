use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::RoleName;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::session::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequestBody>,
) -> Result<ApiSuccess<AccountResponseData>, ApiError> {
    state
        .account_service
        .create_account(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for creating an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAccountRequestBody {
    email: String,
    password: String,
    #[serde(default)]
    roles: Vec<String>,
}

impl CreateAccountRequestBody {
    fn try_into_command(self) -> Result<CreateAccountCommand, AccountError> {
        let email = EmailAddress::new(self.email)?;
        let roles = self
            .roles
            .iter()
            .map(|role| RoleName::new(role))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CreateAccountCommand::new(email, self.password, roles))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountResponseData {
    pub email: String,
    pub roles: Vec<String>,
}

impl From<Account> for AccountResponseData {
    fn from(account: Account) -> Self {
        Self {
            email: account.email,
            roles: account.roles,
        }
    }
}
