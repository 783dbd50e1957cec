use boxcraft_types::{AuthResponse, Credentials, RegisterRequest, Role, User};
use reqwest::Method;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::navigate::HOME_PATH;
use crate::session::SessionContext;

const LOGIN_FAILED: &str = "Invalid email or password";
const REGISTER_FAILED: &str = "Registration failed";

/// Login, registration and logout on top of the shared [`SessionContext`].
#[derive(Clone, Debug)]
pub struct SessionStore {
    api: ApiClient,
}

impl SessionStore {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn context(&self) -> &SessionContext {
        self.api.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.context().is_authenticated()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<User, ClientError> {
        let auth: AuthResponse = self
            .api
            .post_json("/auth/login", credentials)
            .await
            .map_err(|e| into_auth_error(e, LOGIN_FAILED))?;

        self.context().establish(&auth)?;
        info!("user {} signed in as {}", auth.user.id, auth.user.role);
        Ok(auth.user)
    }

    /// Registers and then signs in with the same email and password.
    pub async fn register(&self, data: &RegisterRequest) -> Result<User, ClientError> {
        if data.password != data.password_confirmation {
            return Err(ClientError::Auth("Passwords do not match".into()));
        }

        self.api
            .mutate(Method::POST, "/auth/register", data)
            .await
            .map_err(|e| into_auth_error(e, REGISTER_FAILED))?;

        self.login(&data.credentials()).await
    }

    /// Tells the backend (best effort) and always clears the local session.
    pub async fn logout(&self) {
        if let Err(e) = self
            .api
            .mutate(Method::POST, "/auth/logout", &serde_json::json!({}))
            .await
        {
            warn!("logout request failed, clearing session anyway: {e}");
        }
        self.context().teardown();
    }
}

/// Where a freshly signed-in user is sent.
pub fn landing_path(role: Role) -> &'static str {
    if role.is_staff() {
        "/admin"
    } else {
        HOME_PATH
    }
}

fn into_auth_error(error: ClientError, fallback: &str) -> ClientError {
    match error {
        ClientError::Unauthorized(message) | ClientError::Api { message, .. } => {
            if message == crate::error::GENERIC_ERROR {
                ClientError::Auth(fallback.to_string())
            } else {
                ClientError::Auth(message)
            }
        }
        ClientError::Decode(detail) => {
            warn!("unreadable auth response: {detail}");
            ClientError::Auth(fallback.to_string())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_land_in_admin() {
        assert_eq!(landing_path(Role::Admin), "/admin");
        assert_eq!(landing_path(Role::HrUser), "/admin");
        assert_eq!(landing_path(Role::SalesUser), "/admin");
        assert_eq!(landing_path(Role::User), "/");
        assert_eq!(landing_path(Role::CustomerUser), "/");
    }

    #[test]
    fn backend_message_becomes_auth_error() {
        let error = into_auth_error(
            ClientError::Api {
                status: 422,
                message: "The email has already been taken.".into(),
            },
            REGISTER_FAILED,
        );
        assert!(matches!(error, ClientError::Auth(m) if m == "The email has already been taken."));

        let error = into_auth_error(
            ClientError::Unauthorized(crate::error::GENERIC_ERROR.into()),
            LOGIN_FAILED,
        );
        assert!(matches!(error, ClientError::Auth(m) if m == LOGIN_FAILED));
    }
}
