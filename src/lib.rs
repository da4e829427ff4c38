pub mod common;
pub mod config;
pub mod manager;
pub mod route53;

pub use common::{ChangeAction, ChangeInfo, Error, Result, ZoneApi};
pub use crate::config::*;
pub use manager::DomainRecordManager;
