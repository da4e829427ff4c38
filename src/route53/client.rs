use serde::de::DeserializeOwned;
use snafu::prelude::*;

use crate::common::{
    require_credential, ChangeBatchRequest, ChangeInfo, ConfigSnafu, HostedZonePage,
    RequestSnafu, ResponseSnafu, Result, ZoneApi,
};

use super::models::{
    decode_error, encode_change_batch, ChangeResourceRecordSetsResponse, ListHostedZonesResponse,
};
use super::sign::{canonical_query, Signer};

const DEFAULT_ENDPOINT: &str = "https://route53.amazonaws.com";
const API_VERSION: &str = "2013-04-01";
// Route 53 is a global service signed against us-east-1.
const SIGNING_REGION: &str = "us-east-1";
const SIGNING_SERVICE: &str = "route53";

pub const CLIENT_NAME: &str = "Route53";

enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

pub struct Route53 {
    agent: ureq::Agent,
    signer: Signer,
    origin: String,
    host: String,
}

impl Route53 {
    pub fn new(config: super::Config) -> Result<Self> {
        let access_key_id = require_credential(config.access_key_id, "access_key_id")?;
        let secret_access_key = require_credential(config.secret_access_key, "secret_access_key")?;

        let endpoint = match config.endpoint {
            Some(endpoint) => endpoint,
            None => url::Url::parse(DEFAULT_ENDPOINT).map_err(|err| {
                ConfigSnafu {
                    message: err.to_string(),
                    prefix: "endpoint",
                }
                .build()
            })?,
        };
        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return ConfigSnafu {
                    message: format!("{endpoint} has no host"),
                    prefix: "endpoint",
                }
                .fail()
            }
        };

        Ok(Self {
            agent: ureq::AgentBuilder::new().build(),
            signer: Signer::new(
                access_key_id,
                secret_access_key,
                SIGNING_REGION,
                SIGNING_SERVICE,
            ),
            origin: endpoint.origin().ascii_serialization(),
            host,
        })
    }

    fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<T> {
        let query = canonical_query(query);
        let url = match query.is_empty() {
            true => format!("{}{path}", self.origin),
            false => format!("{}{path}?{query}", self.origin),
        };
        let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let payload = body.as_deref().unwrap_or_default();

        let mut headers = vec![("host", self.host.as_str()), ("x-amz-date", timestamp.as_str())];
        if body.is_some() {
            headers.push(("content-type", "application/xml"));
        }
        let authorization = self.signer.authorization(
            method.as_str(),
            path,
            &query,
            &headers,
            payload.as_bytes(),
            &timestamp,
        );

        tracing::debug!(
            url = %url,
            method = method.as_str(),
            client = CLIENT_NAME,
            "Sending request"
        );

        let mut req = self
            .agent
            .request(method.as_str(), &url)
            .set("X-Amz-Date", &timestamp)
            .set("Authorization", &authorization);

        let resp = match body {
            Some(body) => {
                req = req.set("Content-Type", "application/xml");
                req.send_string(&body)
            }
            None => req.call(),
        };

        let text = match resp {
            Ok(resp) => resp.into_string().boxed().context(ResponseSnafu {
                message: "Failed to read response body",
            })?,
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                return Err(decode_error(status, &body));
            }
            Err(err) => {
                return Err(err).context(RequestSnafu {
                    url: &url,
                    method: method.as_str(),
                })
            }
        };

        quick_xml::de::from_str(&text)
            .boxed()
            .context(ResponseSnafu {
                message: "Failed to deserialize response",
            })
    }
}

impl ZoneApi for Route53 {
    fn list_hosted_zones(&self, marker: Option<&str>) -> Result<HostedZonePage> {
        let path = format!("/{API_VERSION}/hostedzone");
        let query: Vec<(&str, &str)> = marker.into_iter().map(|m| ("marker", m)).collect();

        let resp: ListHostedZonesResponse = self.send(Method::Get, &path, &query, None)?;
        Ok(resp.into())
    }

    fn change_resource_record_sets(&self, request: &ChangeBatchRequest) -> Result<ChangeInfo> {
        let path = format!(
            "/{API_VERSION}/hostedzone/{}/rrset/",
            urlencoding::encode(&request.hosted_zone_id)
        );
        let body = encode_change_batch(request)?;

        let resp: ChangeResourceRecordSetsResponse =
            self.send(Method::Post, &path, &[], Some(body))?;
        Ok(resp.into())
    }
}
