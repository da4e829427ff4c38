use super::{
    Change, ChangeAction, InvalidDomainSnafu, ResourceRecordSet, Result, RECORD_KIND_CNAME,
    RECORD_TTL,
};

/// A domain broken down for zone lookup and record construction.
///
/// `root` is always the last two labels. Multi-label public suffixes such as
/// `co.uk` are not recognised, so `www.example.co.uk` resolves against a
/// `co.uk` zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    pub root: String,
    pub base: String,
    pub sub: String,
}

impl DomainParts {
    pub fn record_name(&self) -> String {
        format!("{}.{}", self.sub, self.base)
    }
}

pub fn split_domain(domain: &str) -> Result<DomainParts> {
    let trimmed = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = trimmed.split('.').collect();

    if labels.len() < 2 {
        return InvalidDomainSnafu {
            domain,
            reason: "at least two labels are required",
        }
        .fail();
    }
    if labels.iter().any(|label| label.is_empty()) {
        return InvalidDomainSnafu {
            domain,
            reason: "labels must not be empty",
        }
        .fail();
    }

    Ok(DomainParts {
        root: labels[labels.len() - 2..].join("."),
        base: labels[1..].join("."),
        sub: labels[0].to_string(),
    })
}

/// Strips the path-like prefix from a hosted zone id, `/hostedzone/Z1` -> `Z1`.
pub fn normalize_zone_id(id: &str) -> &str {
    match id.rsplit_once('/') {
        Some((_, tail)) => tail,
        None => id,
    }
}

pub fn create_change(action: ChangeAction, base: &str, sub: &str) -> Change {
    Change {
        action,
        record_set: ResourceRecordSet {
            name: format!("{sub}.{base}"),
            kind: RECORD_KIND_CNAME.to_string(),
            ttl: RECORD_TTL,
            values: vec![base.to_string()],
        },
    }
}

pub fn change_comment(action: ChangeAction, parts: &DomainParts) -> String {
    let verb = match action {
        ChangeAction::Create => "create",
        ChangeAction::Delete => "delete",
    };
    format!("{verb} domain: {}", parts.record_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    #[test]
    fn split_three_labels() {
        let parts = split_domain("www.example.com").unwrap();
        assert_eq!(parts.root, "example.com");
        assert_eq!(parts.base, "example.com");
        assert_eq!(parts.sub, "www");
        assert_eq!(parts.record_name(), "www.example.com");
    }

    #[test]
    fn split_four_labels_keeps_last_two_as_root() {
        let parts = split_domain("a.b.example.com").unwrap();
        assert_eq!(parts.root, "example.com");
        assert_eq!(parts.base, "b.example.com");
        assert_eq!(parts.sub, "a");
    }

    #[test]
    fn split_two_labels() {
        let parts = split_domain("example.com").unwrap();
        assert_eq!(parts.root, "example.com");
        assert_eq!(parts.base, "com");
        assert_eq!(parts.sub, "example");
    }

    #[test]
    fn split_accepts_absolute_name() {
        assert_eq!(
            split_domain("www.example.com.").unwrap(),
            split_domain("www.example.com").unwrap()
        );
    }

    #[test]
    fn split_is_pure() {
        assert_eq!(
            split_domain("x.y.example.org").unwrap(),
            split_domain("x.y.example.org").unwrap()
        );
    }

    #[test]
    fn split_rejects_single_label() {
        assert!(matches!(
            split_domain("localhost"),
            Err(Error::InvalidDomainError { .. })
        ));
        assert!(matches!(
            split_domain(""),
            Err(Error::InvalidDomainError { .. })
        ));
    }

    #[test]
    fn split_rejects_empty_labels() {
        assert!(matches!(
            split_domain("www..example.com"),
            Err(Error::InvalidDomainError { .. })
        ));
        assert!(matches!(
            split_domain(".example.com"),
            Err(Error::InvalidDomainError { .. })
        ));
    }

    #[test]
    fn zone_id_is_normalized() {
        assert_eq!(normalize_zone_id("/hostedzone/Z12345"), "Z12345");
        assert_eq!(normalize_zone_id("Z12345"), "Z12345");
    }

    #[test]
    fn change_is_a_cname_to_base() {
        let action: ChangeAction = "create".parse().unwrap();
        let change = create_change(action, "example.com", "www");
        assert_eq!(change.action, ChangeAction::Create);
        assert_eq!(change.record_set.name, "www.example.com");
        assert_eq!(change.record_set.kind, "CNAME");
        assert_eq!(change.record_set.ttl, 3600);
        assert_eq!(change.record_set.values, vec!["example.com".to_string()]);
    }

    #[test]
    fn action_parsing_ignores_case() {
        assert_eq!("DELETE".parse::<ChangeAction>().unwrap(), ChangeAction::Delete);
        assert_eq!("Create".parse::<ChangeAction>().unwrap(), ChangeAction::Create);
        assert!(matches!(
            "upsert".parse::<ChangeAction>(),
            Err(Error::InvalidActionError { .. })
        ));
    }

    #[test]
    fn comments_name_the_record() {
        let parts = split_domain("www.example.com").unwrap();
        assert_eq!(
            change_comment(ChangeAction::Create, &parts),
            "create domain: www.example.com"
        );
        assert_eq!(
            change_comment(ChangeAction::Delete, &parts),
            "delete domain: www.example.com"
        );
    }
}
