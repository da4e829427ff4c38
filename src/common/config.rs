use super::{ConfigSnafu, Result};

/// If the value begins with an '@', read the preceding file path,
/// otherwise returns the value.
///
/// prefix is used to provide context in case of an error.
#[cfg(feature = "env")]
pub(crate) fn key_file_or_string(value: String, prefix: &str) -> Result<String> {
    Ok(match value.strip_prefix('@') {
        Some(key_file) => std::fs::read_to_string(key_file)
            .map_err(|err| {
                ConfigSnafu {
                    message: format!("Failed to read key from {key_file}: {err}"),
                    prefix,
                }
                .build()
            })?
            .trim()
            .into(),
        None => value,
    })
}

/// Rejects credentials that are empty or only whitespace.
pub(crate) fn require_credential(value: String, prefix: &str) -> Result<String> {
    if value.trim().is_empty() {
        return ConfigSnafu {
            message: "value is required",
            prefix,
        }
        .fail();
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    #[cfg(feature = "env")]
    #[test]
    fn plain_values_pass_through() {
        assert_eq!(
            key_file_or_string("AKIDEXAMPLE".into(), "access_key_id").unwrap(),
            "AKIDEXAMPLE"
        );
    }

    #[cfg(feature = "env")]
    #[test]
    fn at_prefix_reads_trimmed_file() {
        let path = std::env::temp_dir().join(format!("route53-cname-key-{}", std::process::id()));
        std::fs::write(&path, "s3cr3t\n").unwrap();

        let value = key_file_or_string(format!("@{}", path.display()), "secret_access_key");
        std::fs::remove_file(&path).unwrap();

        assert_eq!(value.unwrap(), "s3cr3t");
    }

    #[cfg(feature = "env")]
    #[test]
    fn missing_key_file_is_a_config_error() {
        let err = key_file_or_string("@/nonexistent/route53-cname".into(), "secret_access_key")
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError { prefix, .. } if prefix == "secret_access_key"));
    }

    #[test]
    fn empty_credentials_are_rejected() {
        assert!(matches!(
            require_credential(String::new(), "access_key_id"),
            Err(Error::ConfigError { .. })
        ));
        assert!(matches!(
            require_credential("  ".into(), "access_key_id"),
            Err(Error::ConfigError { .. })
        ));
    }

    #[test]
    fn at_prefixed_credentials_are_taken_literally() {
        assert_eq!(
            require_credential("@/nonexistent/route53-cname".into(), "secret_access_key")
                .unwrap(),
            "@/nonexistent/route53-cname"
        );
    }
}
