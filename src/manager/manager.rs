use snafu::OptionExt;

use crate::common::{
    change_comment, create_change, normalize_zone_id, split_domain, ChangeAction,
    ChangeBatchRequest, ChangeInfo, Result, ZoneApi, ZoneNotFoundSnafu,
};
use crate::route53::{self, Route53};

/// Creates and deletes CNAME records that point a subdomain at its parent.
///
/// Every call builds its own request values, so a single manager can serve
/// concurrent callers as long as the underlying [`ZoneApi`] is `Sync`.
pub struct DomainRecordManager<A = Route53> {
    api: A,
}

impl DomainRecordManager<Route53> {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Result<Self> {
        Self::from_config(route53::Config::new(access_key_id, secret_access_key))
    }

    pub fn from_config(config: route53::Config) -> Result<Self> {
        Ok(Self::with_api(Route53::new(config)?))
    }
}

impl<A: ZoneApi> DomainRecordManager<A> {
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    /// Points `sub.base` at `base`, e.g. `www.example.com` -> `example.com`.
    pub fn create(&self, domain: &str) -> Result<ChangeInfo> {
        self.apply(ChangeAction::Create, domain)
    }

    /// Removes the CNAME previously created for `domain`.
    pub fn delete(&self, domain: &str) -> Result<ChangeInfo> {
        self.apply(ChangeAction::Delete, domain)
    }

    pub fn apply(&self, action: ChangeAction, domain: &str) -> Result<ChangeInfo> {
        let parts = split_domain(domain)?;

        let hosted_zone_id = self
            .hosted_zone_id(&parts.root)?
            .context(ZoneNotFoundSnafu {
                root: parts.root.as_str(),
            })?;

        let request = ChangeBatchRequest {
            hosted_zone_id,
            changes: vec![create_change(action, &parts.base, &parts.sub)],
            comment: change_comment(action, &parts),
        };

        tracing::info!(
            action = action.as_str(),
            name = %parts.record_name(),
            zone_id = request.hosted_zone_id.as_str(),
            "Submitting change batch"
        );

        let info = self.api.change_resource_record_sets(&request)?;

        tracing::info!(
            change_id = info.id.as_str(),
            status = info.status.as_str(),
            "Change batch accepted"
        );

        Ok(info)
    }

    /// Looks up the id of the hosted zone named `root`, walking every page of
    /// the listing until the first exact match.
    ///
    /// Returns `Ok(None)` once the listing is exhausted without a match.
    pub fn hosted_zone_id(&self, root: &str) -> Result<Option<String>> {
        let zone_name = format!("{root}.");
        let mut marker: Option<String> = None;

        loop {
            let page = self.api.list_hosted_zones(marker.as_deref())?;

            tracing::debug!(
                root = root,
                zones = page.zones.len(),
                truncated = page.is_truncated,
                "Read hosted zone page"
            );

            if let Some(zone) = page.zones.iter().find(|zone| zone.name == zone_name) {
                return Ok(Some(normalize_zone_id(&zone.id).to_string()));
            }

            match page.continuation() {
                Some(next) => marker = Some(next.to_string()),
                None => return Ok(None),
            }
        }
    }
}
