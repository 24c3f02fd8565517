//! Provider-shaped records, as returned by the dofus-portals API.
//!
//! Every identifier in here lives in dofus-portals space. Nothing leaves the engine in
//! this shape: the portal mapper converts it to the wire representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPortal {
    pub server: String,
    pub dimension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ProviderPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_uses: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ProviderUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<ProviderUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPosition {
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_in_canopy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<ProviderTransport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_transport: Option<ProviderTransport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderTransport {
    pub area: String,
    pub sub_area: String,
    #[serde(rename = "type")]
    pub transport_type: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderUser {
    pub name: String,
}
