use std::fmt;
use std::str::FromStr;

use super::{InvalidActionSnafu, Result};

pub const RECORD_KIND_CNAME: &str = "CNAME";
pub const RECORD_TTL: u32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    Create,
    Delete,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Create => "CREATE",
            ChangeAction::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeAction {
    type Err = super::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "CREATE" => Ok(ChangeAction::Create),
            "DELETE" => Ok(ChangeAction::Delete),
            _ => InvalidActionSnafu { action: value }.fail(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedZone {
    pub id: String,
    pub name: String,
}

/// One page of a hosted zone listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostedZonePage {
    pub zones: Vec<HostedZone>,
    pub is_truncated: bool,
    pub next_marker: Option<String>,
}

impl HostedZonePage {
    /// The marker to continue from, if the listing has more pages.
    pub fn continuation(&self) -> Option<&str> {
        match (self.is_truncated, self.next_marker.as_deref()) {
            (true, Some(marker)) if !marker.is_empty() => Some(marker),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecordSet {
    pub name: String,
    pub kind: String,
    pub ttl: u32,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub action: ChangeAction,
    pub record_set: ResourceRecordSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeBatchRequest {
    pub hosted_zone_id: String,
    pub changes: Vec<Change>,
    pub comment: String,
}

/// Status of an accepted change batch, as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChangeInfo {
    pub id: String,
    pub status: String,
    pub submitted_at: String,
    pub comment: Option<String>,
}

pub trait ZoneApi {
    fn list_hosted_zones(&self, marker: Option<&str>) -> Result<HostedZonePage>;
    fn change_resource_record_sets(&self, request: &ChangeBatchRequest) -> Result<ChangeInfo>;
}

impl<T: ZoneApi + ?Sized> ZoneApi for &T {
    fn list_hosted_zones(&self, marker: Option<&str>) -> Result<HostedZonePage> {
        (**self).list_hosted_zones(marker)
    }

    fn change_resource_record_sets(&self, request: &ChangeBatchRequest) -> Result<ChangeInfo> {
        (**self).change_resource_record_sets(request)
    }
}

impl<T: ZoneApi + ?Sized> ZoneApi for Box<T> {
    fn list_hosted_zones(&self, marker: Option<&str>) -> Result<HostedZonePage> {
        (**self).list_hosted_zones(marker)
    }

    fn change_resource_record_sets(&self, request: &ChangeBatchRequest) -> Result<ChangeInfo> {
        (**self).change_resource_record_sets(request)
    }
}
