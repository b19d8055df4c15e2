use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// The credentials used for the automatic login after registering.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Successful login response.
///
/// The refresh token is accepted but the client never uses it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_without_refresh() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"t1"}"#).unwrap();
        assert_eq!(token.access_token, "t1");
        assert!(token.refresh_token.is_none());
    }

    #[test]
    fn test_registration_credentials() {
        let registration = Registration {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: "Secret#1".into(),
        };
        let credentials = registration.credentials();
        assert_eq!(credentials.email, "ada@example.com");
        assert_eq!(credentials.password, "Secret#1");
    }
}
