use crate::error::FrostError;
use std::env;
use std::fmt;

pub const API_KEY_VAR: &str = "FROST_API_KEY";
pub const CLIENT_ID_VAR: &str = "FROST_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "FROST_CLIENT_SECRET";

/// How the client authenticates. Both forms are sent as HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A Frost client id used on its own, sent with an empty password.
    ApiKey(String),
    /// A client id with its secret.
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },
}

impl Credentials {
    /// Picks credentials with this precedence: explicit `api_key`, explicit
    /// `client_id` (with `client_secret`), then `FROST_API_KEY`, then
    /// `FROST_CLIENT_ID` / `FROST_CLIENT_SECRET`.
    pub fn resolve(
        api_key: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Result<Self, FrostError> {
        Self::resolve_with(api_key, client_id, client_secret, |name| env::var(name).ok())
    }

    pub(crate) fn resolve_with<F>(
        api_key: Option<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
        lookup: F,
    ) -> Result<Self, FrostError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(api_key) {
            return Ok(Credentials::ApiKey(key));
        }
        if let Some(client_id) = non_empty(client_id) {
            let client_secret = client_secret
                .or_else(|| lookup(CLIENT_SECRET_VAR))
                .unwrap_or_default();
            return Ok(Credentials::ClientCredentials {
                client_id,
                client_secret,
            });
        }
        if let Some(key) = non_empty(lookup(API_KEY_VAR)) {
            return Ok(Credentials::ApiKey(key));
        }
        if let Some(client_id) = non_empty(lookup(CLIENT_ID_VAR)) {
            return Ok(Credentials::ClientCredentials {
                client_id,
                client_secret: lookup(CLIENT_SECRET_VAR).unwrap_or_default(),
            });
        }
        Err(FrostError::MissingCredentials)
    }

    /// Basic auth user name and password.
    pub(crate) fn basic_auth(&self) -> (&str, &str) {
        match self {
            Credentials::ApiKey(key) => (key.as_str(), ""),
            Credentials::ClientCredentials {
                client_id,
                client_secret,
            } => (client_id.as_str(), client_secret.as_str()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::ClientCredentials { client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &"***")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_explicit_key_wins_over_environment() {
        let creds = Credentials::resolve_with(
            Some("explicit".into()),
            None,
            None,
            env_of(&[(API_KEY_VAR, "from-env")]),
        )
        .unwrap();
        assert_eq!(creds, Credentials::ApiKey("explicit".into()));
        assert_eq!(creds.basic_auth(), ("explicit", ""));
    }

    #[test]
    fn test_explicit_client_credentials() {
        let creds = Credentials::resolve_with(
            None,
            Some("id".into()),
            Some("secret".into()),
            env_of(&[(API_KEY_VAR, "from-env")]),
        )
        .unwrap();
        assert_eq!(creds.basic_auth(), ("id", "secret"));
    }

    #[test]
    fn test_environment_fallbacks() {
        let key = Credentials::resolve_with(None, None, None, env_of(&[(API_KEY_VAR, "k")])).unwrap();
        assert_eq!(key, Credentials::ApiKey("k".into()));

        let pair = Credentials::resolve_with(
            None,
            None,
            None,
            env_of(&[(CLIENT_ID_VAR, "id"), (CLIENT_SECRET_VAR, "s")]),
        )
        .unwrap();
        assert_eq!(pair.basic_auth(), ("id", "s"));
    }

    #[test]
    fn test_missing_credentials() {
        let err = Credentials::resolve_with(Some(" ".into()), None, None, env_of(&[])).unwrap_err();
        assert!(matches!(err, FrostError::MissingCredentials));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials::ClientCredentials {
            client_id: "id".into(),
            client_secret: "hunter2".into(),
        };
        assert!(!format!("{creds:?}").contains("hunter2"));
        assert!(!format!("{:?}", Credentials::ApiKey("abc".into())).contains("abc"));
    }
}
