//! Broker message types exchanged with the rest of the bot.
//!
//! A single [`BrokerMessage`] shape carries every kind of request and answer; the `type`
//! field says which optional body is meaningful.
//!
//! ## Versioning Policy
//!
//! - New message types can be added at the end (forward compatible)
//! - Unknown message types deserialize to `MessageType::Unknown`
//! - Unknown languages are kept verbatim in `Language::Other`

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use warpgate_domain::PortalSource;

// =============================================================================
// Envelope-level enums
// =============================================================================

/// Kind of a broker message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    PortalPositionRequest,
    PortalPositionAnswer,
    /// Any type this service does not handle.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Outcome carried by an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    Success,
    Failed,
}

/// Language the caller wants its answer rendered in. Echoed, never interpreted.
///
/// Codes this service does not know are kept verbatim in `Other` so the answer carries
/// exactly what the request did.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Any,
    Fr,
    En,
    Es,
    De,
    Pt,
    Other(String),
}

impl Language {
    /// Wire code, e.g. `"FR"`.
    pub fn as_str(&self) -> &str {
        match self {
            Language::Any => "ANY",
            Language::Fr => "FR",
            Language::En => "EN",
            Language::Es => "ES",
            Language::De => "DE",
            Language::Pt => "PT",
            Language::Other(code) => code,
        }
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        match code {
            "ANY" => Language::Any,
            "FR" => Language::Fr,
            "EN" => Language::En,
            "ES" => Language::Es,
            "DE" => Language::De,
            "PT" => Language::Pt,
            other => Language::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Language::from(code.as_str()))
    }
}

// =============================================================================
// Message
// =============================================================================

/// A message as it travels through the broker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerMessage {
    #[serde(rename = "type", default)]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    #[serde(default)]
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_position_request: Option<PortalPositionRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_position_answer: Option<PortalPositionAnswer>,
}

impl BrokerMessage {
    /// Build a portal position request. An empty `dimension` asks for every dimension.
    pub fn portal_request(
        server: impl Into<String>,
        dimension: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            kind: MessageType::PortalPositionRequest,
            status: None,
            language,
            portal_position_request: Some(PortalPositionRequest {
                server: server.into(),
                dimension: dimension.into(),
            }),
            portal_position_answer: None,
        }
    }

    /// Successful answer carrying every position found (possibly none).
    pub fn portal_answer(positions: Vec<PortalPositionData>, language: Language) -> Self {
        Self {
            kind: MessageType::PortalPositionAnswer,
            status: Some(MessageStatus::Success),
            language,
            portal_position_request: None,
            portal_position_answer: Some(PortalPositionAnswer { positions }),
        }
    }

    /// Status-only failed answer.
    pub fn portal_answer_failed(language: Language) -> Self {
        Self {
            kind: MessageType::PortalPositionAnswer,
            status: Some(MessageStatus::Failed),
            language,
            portal_position_request: None,
            portal_position_answer: None,
        }
    }
}

// =============================================================================
// Portal request / answer bodies
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalPositionRequest {
    /// Internal server identifier.
    #[serde(default)]
    pub server: String,
    /// Internal dimension identifier; empty means all dimensions.
    #[serde(default)]
    pub dimension: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalPositionAnswer {
    #[serde(default)]
    pub positions: Vec<PortalPositionData>,
}

/// One portal position, every identifier expressed in internal space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalPositionData {
    pub server_id: String,
    pub dimension_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionData>,
    #[serde(default)]
    pub remaining_uses: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub source: PortalSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionData {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub is_in_canopy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_transport: Option<TransportData>,
}

/// Closest transport to a portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportData {
    pub area_id: String,
    pub sub_area_id: String,
    pub type_id: String,
    pub x: i32,
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_from_wire_json() {
        let json = r#"{
            "type": "PORTAL_POSITION_REQUEST",
            "language": "FR",
            "portalPositionRequest": { "server": "djaul", "dimension": "enutrosor" }
        }"#;

        let message: BrokerMessage = serde_json::from_str(json).unwrap();

        assert_eq!(message.kind, MessageType::PortalPositionRequest);
        assert_eq!(message.language, Language::Fr);
        assert_eq!(message.status, None);
        let request = message.portal_position_request.unwrap();
        assert_eq!(request.server, "djaul");
        assert_eq!(request.dimension, "enutrosor");
    }

    #[test]
    fn unknown_type_and_language_do_not_fail_parsing() {
        let json = r#"{ "type": "ABOUT_REQUEST", "language": "KLINGON" }"#;

        let message: BrokerMessage = serde_json::from_str(json).unwrap();

        assert_eq!(message.kind, MessageType::Unknown);
        assert_eq!(message.language, Language::Other("KLINGON".to_string()));
        assert!(message.portal_position_request.is_none());
    }

    #[test]
    fn unknown_language_is_echoed_verbatim() {
        let json = r#"{
            "type": "PORTAL_POSITION_REQUEST",
            "language": "IT",
            "portalPositionRequest": { "server": "djaul" }
        }"#;
        let request: BrokerMessage = serde_json::from_str(json).unwrap();

        let answer = BrokerMessage::portal_answer_failed(request.language);
        let value = serde_json::to_value(&answer).unwrap();

        assert_eq!(value["language"], "IT");
    }

    #[test]
    fn known_languages_keep_their_wire_code() {
        for code in ["ANY", "FR", "EN", "ES", "DE", "PT"] {
            let language = Language::from(code);
            assert!(!matches!(language, Language::Other(_)));
            assert_eq!(serde_json::to_value(&language).unwrap(), code);
        }
    }

    #[test]
    fn missing_dimension_defaults_to_empty() {
        let json = r#"{ "type": "PORTAL_POSITION_REQUEST", "portalPositionRequest": { "server": "s1" } }"#;

        let message: BrokerMessage = serde_json::from_str(json).unwrap();

        assert_eq!(message.language, Language::Any);
        assert_eq!(message.portal_position_request.unwrap().dimension, "");
    }

    #[test]
    fn failed_answer_has_no_positions_on_the_wire() {
        let message = BrokerMessage::portal_answer_failed(Language::En);

        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["type"], "PORTAL_POSITION_ANSWER");
        assert_eq!(value["status"], "FAILED");
        assert_eq!(value["language"], "EN");
        assert!(value.get("portalPositionAnswer").is_none());
        assert!(value.get("portalPositionRequest").is_none());
    }

    #[test]
    fn successful_answer_keeps_empty_position_list() {
        let message = BrokerMessage::portal_answer(Vec::new(), Language::De);

        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["status"], "SUCCESS");
        assert_eq!(value["portalPositionAnswer"]["positions"], serde_json::json!([]));
    }

    #[test]
    fn absent_optional_fields_are_omitted() {
        let data = PortalPositionData {
            server_id: "s1".to_string(),
            dimension_id: "d1".to_string(),
            position: Some(PositionData {
                x: -3,
                y: 12,
                is_in_canopy: false,
                transport: None,
                conditional_transport: None,
            }),
            remaining_uses: 0,
            created_by: None,
            created_at: None,
            updated_by: None,
            updated_at: None,
            source: PortalSource::dofus_portals(),
        };

        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value["remainingUses"], 0);
        assert!(value.get("createdBy").is_none());
        assert!(value.get("updatedAt").is_none());
        assert!(value["position"].get("transport").is_none());
        assert_eq!(value["source"]["name"], "dofus-portals.fr");
    }
}
