use snafu::ResultExt;

use crate::common::{self, ApiSnafu, ChangeBatchRequest, Error, ResponseSnafu, Result};

pub(super) const XMLNS: &str = "https://route53.amazonaws.com/doc/2013-04-01/";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ListHostedZonesResponse {
    #[serde(default)]
    pub hosted_zones: HostedZones,
    #[serde(default)]
    pub is_truncated: bool,
    pub next_marker: Option<String>,
}

#[derive(Default, serde::Deserialize)]
pub(super) struct HostedZones {
    #[serde(rename = "HostedZone", default)]
    pub items: Vec<HostedZone>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct HostedZone {
    pub id: String,
    pub name: String,
}

impl From<ListHostedZonesResponse> for common::HostedZonePage {
    fn from(value: ListHostedZonesResponse) -> Self {
        Self {
            zones: value
                .hosted_zones
                .items
                .into_iter()
                .map(|zone| common::HostedZone {
                    id: zone.id,
                    name: zone.name,
                })
                .collect(),
            is_truncated: value.is_truncated,
            next_marker: value.next_marker,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(rename = "ChangeResourceRecordSetsRequest")]
pub(super) struct ChangeResourceRecordSetsRequest<'a> {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "ChangeBatch")]
    pub change_batch: ChangeBatch<'a>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ChangeBatch<'a> {
    pub comment: &'a str,
    pub changes: Changes<'a>,
}

#[derive(serde::Serialize)]
pub(super) struct Changes<'a> {
    #[serde(rename = "Change")]
    pub items: Vec<Change<'a>>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct Change<'a> {
    pub action: &'static str,
    pub resource_record_set: ResourceRecordSet<'a>,
}

// Element order follows the Route 53 schema.
#[derive(serde::Serialize)]
pub(super) struct ResourceRecordSet<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(rename = "Type")]
    pub kind: &'a str,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    #[serde(rename = "ResourceRecords")]
    pub resource_records: ResourceRecords<'a>,
}

#[derive(serde::Serialize)]
pub(super) struct ResourceRecords<'a> {
    #[serde(rename = "ResourceRecord")]
    pub items: Vec<ResourceRecord<'a>>,
}

#[derive(serde::Serialize)]
pub(super) struct ResourceRecord<'a> {
    #[serde(rename = "Value")]
    pub value: &'a str,
}

impl<'a> From<&'a ChangeBatchRequest> for ChangeResourceRecordSetsRequest<'a> {
    fn from(value: &'a ChangeBatchRequest) -> Self {
        Self {
            xmlns: XMLNS,
            change_batch: ChangeBatch {
                comment: &value.comment,
                changes: Changes {
                    items: value
                        .changes
                        .iter()
                        .map(|change| Change {
                            action: change.action.as_str(),
                            resource_record_set: ResourceRecordSet {
                                name: &change.record_set.name,
                                kind: &change.record_set.kind,
                                ttl: change.record_set.ttl,
                                resource_records: ResourceRecords {
                                    items: change
                                        .record_set
                                        .values
                                        .iter()
                                        .map(|value| ResourceRecord { value })
                                        .collect(),
                                },
                            },
                        })
                        .collect(),
                },
            },
        }
    }
}

pub(super) fn encode_change_batch(request: &ChangeBatchRequest) -> Result<String> {
    let body = quick_xml::se::to_string(&ChangeResourceRecordSetsRequest::from(request))
        .boxed()
        .context(ResponseSnafu {
            message: "Failed to serialize change batch",
        })?;
    Ok(format!("{XML_DECLARATION}{body}"))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ChangeResourceRecordSetsResponse {
    pub change_info: ChangeInfo,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ChangeInfo {
    pub id: String,
    pub status: String,
    pub submitted_at: String,
    pub comment: Option<String>,
}

impl From<ChangeResourceRecordSetsResponse> for common::ChangeInfo {
    fn from(value: ChangeResourceRecordSetsResponse) -> Self {
        let info = value.change_info;
        Self {
            id: info.id,
            status: info.status,
            submitted_at: info.submitted_at,
            comment: info.comment,
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ErrorDetail {
    pub code: String,
    pub message: Option<String>,
}

/// Body of a rejected change batch, which does not use the usual envelope.
#[derive(serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct InvalidChangeBatch {
    pub messages: Messages,
}

#[derive(serde::Deserialize)]
pub(super) struct Messages {
    #[serde(rename = "Message", default)]
    pub items: Vec<String>,
}

pub(super) fn decode_error(status: u16, body: &str) -> Error {
    let (code, message) = if let Ok(resp) = quick_xml::de::from_str::<ErrorResponse>(body) {
        (resp.error.code, resp.error.message.unwrap_or_default())
    } else if let Ok(resp) = quick_xml::de::from_str::<InvalidChangeBatch>(body) {
        ("InvalidChangeBatch".to_string(), resp.messages.items.join("; "))
    } else {
        ("Unknown".to_string(), body.trim().to_string())
    };

    ApiSnafu {
        status,
        code,
        message,
    }
    .build()
}
