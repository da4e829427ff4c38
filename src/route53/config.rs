use std::fmt;

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Overrides the public Route 53 endpoint, e.g. for a local emulator.
    pub endpoint: Option<url::Url>,
}

impl Config {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            endpoint: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_ref().map(url::Url::as_str))
            .finish()
    }
}
