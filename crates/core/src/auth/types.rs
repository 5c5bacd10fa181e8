use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::Result;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::required(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        assert!(SignupRequest::new("Sam", "sam@example.com", "hunter2").validate().is_ok());
        assert!(SignupRequest::new("", "sam@example.com", "hunter2").validate().is_err());
        assert!(LoginRequest::new("sam@example.com", " ").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let signup = format!("{:?}", SignupRequest::new("Sam", "sam@example.com", "hunter2"));
        assert!(signup.contains("sam@example.com"));
        assert!(!signup.contains("hunter2"));

        let login = format!("{:?}", LoginRequest::new("sam@example.com", "hunter2"));
        assert!(login.contains("<redacted>"));
        assert!(!login.contains("hunter2"));
    }

    #[test]
    fn test_login_response_message_optional() {
        let res: LoginResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(res.token, "abc");
        assert!(res.message.is_none());
    }
}
