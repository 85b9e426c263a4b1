use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One AWS Health notification as delivered by EventBridge.
///
/// The pipeline treats this record as read-only; in particular the
/// category and type codes are never rewritten downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthEvent {
    pub id: String,
    pub source: String,
    #[serde(rename = "detail-type", skip_serializing_if = "Option::is_none")]
    pub detail_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    pub detail: HealthEventDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEventDetail {
    pub event_type_code: String,
    pub event_type_category: String,
    pub service: String,
    #[serde(default)]
    pub event_description: Vec<EventDescription>,
    #[serde(default)]
    pub affected_entities: Vec<AffectedEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescription {
    pub language: String,
    pub latest_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedEntity {
    pub entity_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

/// Plain-language rendition of one health event, produced by the
/// simplification step.
///
/// Every field is guaranteed populated: anything the model omits is
/// substituted with a named default at construction time, so consumers
/// never see a partially filled message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedMessage {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub affected_services: Vec<String>,
    pub impact: String,
    pub timeframe: String,
    pub status: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Inbound invocation payloads the function recognizes.
///
/// Normalization happens once, at the handler boundary; the pipeline only
/// ever sees `HealthEvent` values. Anything that matches no recognized
/// shape is an explicit `Unsupported` no-op rather than an error.
#[derive(Debug)]
pub enum InboundEvent {
    /// A bare health event (direct EventBridge target invocation).
    Single(HealthEvent),
    /// A `Records` envelope whose entries wrap health events.
    Batch(Vec<HealthEvent>),
    /// Anything else; logged and skipped.
    Unsupported,
}
