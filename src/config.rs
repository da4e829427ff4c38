use crate::common::Result;
use crate::manager::DomainRecordManager;

pub use crate::route53::Config;

/// Prefix of the environment variables read by [`Config::from_env`], e.g.
/// `ROUTE53_CNAME_ENDPOINT`.
pub const ENV_PREFIX: &str = "ROUTE53_CNAME";

impl Config {
    /// Reads `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY`, then lets any
    /// `ROUTE53_CNAME_*` variable override them. A credential of the form
    /// `@path` is read from that file.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_vars(None)
    }

    /// Like [`Config::from_env`] but reads from `vars` instead of the process
    /// environment when given.
    #[cfg(feature = "env")]
    pub fn from_vars(vars: Option<std::collections::HashMap<String, String>>) -> Result<Self> {
        use crate::common::{key_file_or_string, ConfigSnafu};

        let into_config_error = |err: config::ConfigError| {
            ConfigSnafu {
                message: err.to_string(),
                prefix: ENV_PREFIX,
            }
            .build()
        };

        let mut config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("AWS").source(vars.clone()))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(vars))
            .build()
            .map_err(into_config_error)?
            .try_deserialize()
            .map_err(into_config_error)?;

        config.access_key_id = key_file_or_string(config.access_key_id, "access_key_id")?;
        config.secret_access_key =
            key_file_or_string(config.secret_access_key, "secret_access_key")?;

        Ok(config)
    }

    pub fn into_manager(self) -> Result<DomainRecordManager> {
        DomainRecordManager::from_config(self)
    }
}

#[cfg(all(test, feature = "env"))]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::common::Error;

    fn vars(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn reads_aws_credentials() {
        let config = Config::from_vars(vars(&[
            ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.access_key_id, "AKIDEXAMPLE");
        assert_eq!(config.secret_access_key, "secret");
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn prefixed_variables_take_precedence() {
        let config = Config::from_vars(vars(&[
            ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("ROUTE53_CNAME_ACCESS_KEY_ID", "AKIDOTHER"),
            ("ROUTE53_CNAME_ENDPOINT", "http://localhost:4566"),
        ]))
        .unwrap();

        assert_eq!(config.access_key_id, "AKIDOTHER");
        assert_eq!(config.secret_access_key, "secret");
        assert_eq!(
            config.endpoint.as_ref().map(url::Url::as_str),
            Some("http://localhost:4566/")
        );
    }

    #[test]
    fn missing_secret_is_a_config_error() {
        let result = Config::from_vars(vars(&[("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE")]));
        assert!(matches!(result, Err(Error::ConfigError { .. })));
    }

    #[test]
    fn secret_is_read_from_key_file() {
        let path = std::env::temp_dir().join(format!("route53-cname-env-{}", std::process::id()));
        std::fs::write(&path, "from-file\n").unwrap();
        let secret = format!("@{}", path.display());

        let result = Config::from_vars(vars(&[
            ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", secret.as_str()),
        ]));
        std::fs::remove_file(&path).unwrap();

        let config = result.unwrap();
        assert_eq!(config.access_key_id, "AKIDEXAMPLE");
        assert_eq!(config.secret_access_key, "from-file");
    }

    #[test]
    fn missing_key_file_is_reported() {
        let result = Config::from_vars(vars(&[
            ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "@/nonexistent/route53-cname"),
        ]));
        assert!(matches!(
            result,
            Err(Error::ConfigError { prefix, .. }) if prefix == "secret_access_key"
        ));
    }

    #[test]
    fn empty_secret_fails_manager_construction() {
        let config = Config::from_vars(vars(&[
            ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "   "),
        ]))
        .unwrap();

        assert!(matches!(
            config.into_manager(),
            Err(Error::ConfigError { .. })
        ));
    }
}
