use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid configuration for {prefix}: {message}"))]
    ConfigError { message: String, prefix: String },
    #[snafu(display("Invalid domain {domain:?}: {reason}"))]
    InvalidDomainError { domain: String, reason: String },
    #[snafu(display("Unknown change action {action:?}"))]
    InvalidActionError { action: String },
    #[snafu(display("No hosted zone found for {root}"))]
    ZoneNotFoundError { root: String },
    #[snafu(display("{method} {url} failed: {source}"))]
    RequestError {
        url: String,
        method: String,
        #[snafu(source(from(ureq::Error, Box::new)))]
        source: Box<ureq::Error>,
    },
    #[snafu(display("Route 53 returned {status} {code}: {message}"))]
    ApiError {
        status: u16,
        code: String,
        message: String,
    },
    #[snafu(display("{message}: {source}"))]
    ResponseError {
        message: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
