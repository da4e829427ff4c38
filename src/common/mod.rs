mod config;
mod domain;
mod error;
mod models;

pub(crate) use config::*;
pub use domain::*;
pub use error::*;
pub use models::*;
