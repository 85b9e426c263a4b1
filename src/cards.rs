//! Adaptive-card construction for Teams notifications.
//!
//! Pure document building: a `SimplifiedMessage` in, a typed
//! `AdaptiveCard` tree out. Nothing here performs I/O.

use serde::Serialize;

use crate::core::models::SimplifiedMessage;

/// Adaptive card schema version accepted by Teams incoming webhooks.
pub const CARD_VERSION: &str = "1.4";

/// MIME type Teams expects for adaptive-card attachments.
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

const HEALTH_DASHBOARD_URL: &str = "https://phd.aws.amazon.com/phd/home";

#[derive(Debug, Serialize)]
pub struct AdaptiveCard {
    #[serde(rename = "type")]
    pub card_type: String,
    pub version: String,
    pub body: Vec<CardBlock>,
    pub actions: Vec<CardAction>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum CardBlock {
    TextBlock {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        weight: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<&'static str>,
        wrap: bool,
    },
    FactSet {
        facts: Vec<Fact>,
    },
}

#[derive(Debug, Serialize)]
pub struct Fact {
    pub title: &'static str,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct CardAction {
    #[serde(rename = "type")]
    pub action_type: &'static str,
    pub title: &'static str,
    pub url: &'static str,
}

/// Payload shape the Teams webhook accepts: one message with one
/// adaptive-card attachment.
#[derive(Debug, Serialize)]
pub struct TeamsWebhookPayload {
    #[serde(rename = "type")]
    pub message_type: String,
    pub attachments: Vec<CardAttachment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAttachment {
    pub content_type: &'static str,
    pub content: AdaptiveCard,
}

impl TeamsWebhookPayload {
    pub fn new(card: AdaptiveCard) -> Self {
        Self {
            message_type: "message".to_string(),
            attachments: vec![CardAttachment {
                content_type: ADAPTIVE_CARD_CONTENT_TYPE,
                content: card,
            }],
        }
    }
}

fn text_block(
    text: String,
    size: Option<&'static str>,
    weight: Option<&'static str>,
    color: Option<&'static str>,
) -> CardBlock {
    CardBlock::TextBlock {
        text,
        size,
        weight,
        color,
        wrap: true,
    }
}

/// Map a status phrase to a visual emphasis color.
///
/// Case-insensitive substring match, first rule wins. Currently computed
/// for parity with the card layout but not attached to any block.
pub fn status_emphasis(status: &str) -> &'static str {
    let status_lower = status.to_lowercase();
    if status_lower.contains("resolved") || status_lower.contains("completed") {
        "Good"
    } else if status_lower.contains("in progress") || status_lower.contains("ongoing") {
        "Warning"
    } else if status_lower.contains("scheduled") || status_lower.contains("planned") {
        "Default"
    } else {
        "Attention"
    }
}

/// Build the adaptive card for one simplified message.
///
/// Block order is fixed: title, summary, a three-entry fact set
/// (Status, Impact, Timeframe), affected services, recommendations as
/// bullet lines (zero lines when the list is empty), and one action link
/// to the AWS Health dashboard.
pub fn build_card(message: &SimplifiedMessage) -> AdaptiveCard {
    // Derived from the status but not attached to any block today.
    let _emphasis = status_emphasis(&message.status);

    let mut body = vec![
        text_block(
            message.title.clone(),
            Some("Large"),
            Some("Bolder"),
            Some("Accent"),
        ),
        text_block(message.summary.clone(), Some("Medium"), None, None),
        CardBlock::FactSet {
            facts: vec![
                Fact {
                    title: "Status",
                    value: message.status.clone(),
                },
                Fact {
                    title: "Impact",
                    value: message.impact.clone(),
                },
                Fact {
                    title: "Timeframe",
                    value: message.timeframe.clone(),
                },
            ],
        },
        text_block(
            "Affected Services:".to_string(),
            Some("Medium"),
            Some("Bolder"),
            None,
        ),
        text_block(
            if message.affected_services.is_empty() {
                "None specified".to_string()
            } else {
                message.affected_services.join(", ")
            },
            Some("Small"),
            None,
            Some("Default"),
        ),
        text_block(
            "Recommendations:".to_string(),
            Some("Medium"),
            Some("Bolder"),
            None,
        ),
    ];

    body.extend(message.recommendations.iter().map(|rec| {
        text_block(format!("• {rec}"), Some("Small"), None, Some("Default"))
    }));

    AdaptiveCard {
        card_type: "AdaptiveCard".to_string(),
        version: CARD_VERSION.to_string(),
        body,
        actions: vec![CardAction {
            action_type: "Action.OpenUrl",
            title: "View AWS Health Dashboard",
            url: HEALTH_DASHBOARD_URL,
        }],
    }
}
