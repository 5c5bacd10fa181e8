//! Signup, login and logout with the navigation that follows each

use std::sync::Arc;
use tracing::{error, info};

use super::Route;
use crate::auth::{AuthApi, LoginRequest, SignupRequest};
use crate::error::Error;
use crate::notice::Notifier;
use crate::session::Session;
use crate::Result;

const SIGNUP_OK: &str = "Signup successful!";
const LOGIN_OK: &str = "Login successful!";
const LOGOUT_OK: &str = "Logged out successfully!";
const GENERIC_FAILURE: &str = "Something went wrong!";

pub struct AuthFlow {
    api: Arc<dyn AuthApi>,
    session: Arc<Session>,
    notifier: Notifier,
}

impl AuthFlow {
    pub fn new(api: Arc<dyn AuthApi>, session: Arc<Session>, notifier: Notifier) -> Self {
        Self {
            api,
            session,
            notifier,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Register, then send the user to the login page
    pub async fn signup(&self, req: SignupRequest) -> Result<Route> {
        match self.api.signup(&req).await {
            Ok(res) => {
                info!("Signed up {}", req.email);
                self.notifier.success(res.message.unwrap_or_else(|| SIGNUP_OK.to_string()));
                Ok(Route::Login)
            }
            Err(e) => {
                error!("Signup failed: {}", e);
                self.notifier.error(failure_message(&e));
                Err(e)
            }
        }
    }

    /// Log in, store the token, then open the task board
    ///
    /// Nothing is stored unless the server issued a token.
    pub async fn login(&self, req: LoginRequest) -> Result<Route> {
        let res = match self.api.login(&req).await {
            Ok(res) => res,
            Err(e) => {
                error!("Login failed: {}", e);
                self.notifier.error(failure_message(&e));
                return Err(e);
            }
        };

        self.session.login(res.token).await?;
        self.notifier.success(LOGIN_OK);
        Ok(Route::TaskBoard)
    }

    pub async fn logout(&self) -> Result<Route> {
        self.session.logout().await?;
        self.notifier.success(LOGOUT_OK);
        Ok(Route::Login)
    }
}

fn failure_message(error: &Error) -> String {
    match error {
        Error::Api { message, .. } => message.clone(),
        Error::InvalidInput(message) => message.clone(),
        _ => GENERIC_FAILURE.to_string(),
    }
}
