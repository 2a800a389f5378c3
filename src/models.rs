//! JSON response bodies for the API routes.
//!
//! Fields are declared in alphabetical order so the serialized key order
//! matches the sorted output existing clients already see.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::clock::isoformat;
use crate::config::{APP_DESCRIPTION, APP_FEATURES, APP_NAME, APP_VERSION, HEALTHY};
use crate::environment::InstanceIdentity;

/// Health check response, built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub instance_id: String,
    pub region: String,
    pub status: &'static str,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn new(now: NaiveDateTime, identity: InstanceIdentity) -> Self {
        Self {
            instance_id: identity.instance_id,
            region: identity.region,
            status: HEALTHY,
            timestamp: isoformat(now),
        }
    }
}

/// Static application metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub app_name: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub version: &'static str,
}

pub const APP_INFO: AppInfo = AppInfo {
    app_name: APP_NAME,
    description: APP_DESCRIPTION,
    features: &APP_FEATURES,
    version: APP_VERSION,
};
