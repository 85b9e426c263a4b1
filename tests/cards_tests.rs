use health_notifier::cards::{TeamsWebhookPayload, build_card, status_emphasis};
use health_notifier::core::models::SimplifiedMessage;
use serde_json::Value;

fn sample_message(recommendations: Vec<String>) -> SimplifiedMessage {
    SimplifiedMessage {
        title: "RDS maintenance".to_string(),
        summary: "A patch window is scheduled.".to_string(),
        affected_services: vec!["RDS".to_string(), "EC2".to_string()],
        impact: "Brief connection drops".to_string(),
        timeframe: "Saturday 02:00-04:00 UTC".to_string(),
        status: "Scheduled".to_string(),
        recommendations,
    }
}

fn card_json(message: &SimplifiedMessage) -> Value {
    serde_json::to_value(build_card(message)).expect("card serializes")
}

#[test]
fn test_card_always_has_three_facts_in_fixed_order() {
    let card = card_json(&sample_message(vec![]));
    let facts = &card["body"][2]["facts"];

    assert_eq!(card["body"][2]["type"], "FactSet");
    assert_eq!(facts.as_array().unwrap().len(), 3);
    assert_eq!(facts[0]["title"], "Status");
    assert_eq!(facts[0]["value"], "Scheduled");
    assert_eq!(facts[1]["title"], "Impact");
    assert_eq!(facts[1]["value"], "Brief connection drops");
    assert_eq!(facts[2]["title"], "Timeframe");
    assert_eq!(facts[2]["value"], "Saturday 02:00-04:00 UTC");
}

#[test]
fn test_card_block_order() {
    let card = card_json(&sample_message(vec!["Retry connections".to_string()]));
    let body = card["body"].as_array().unwrap();

    assert_eq!(body[0]["text"], "RDS maintenance");
    assert_eq!(body[0]["size"], "Large");
    assert_eq!(body[0]["weight"], "Bolder");
    assert_eq!(body[0]["color"], "Accent");
    assert_eq!(body[1]["text"], "A patch window is scheduled.");
    assert_eq!(body[2]["type"], "FactSet");
    assert_eq!(body[3]["text"], "Affected Services:");
    assert_eq!(body[4]["text"], "RDS, EC2");
    assert_eq!(body[5]["text"], "Recommendations:");
}

#[test]
fn test_card_recommendation_bullets_preserve_order() {
    let recs = vec![
        "First action".to_string(),
        "Second action".to_string(),
        "Third action".to_string(),
    ];
    let card = card_json(&sample_message(recs));
    let body = card["body"].as_array().unwrap();

    // 6 fixed blocks then one bullet per recommendation
    assert_eq!(body.len(), 9);
    assert_eq!(body[6]["text"], "• First action");
    assert_eq!(body[7]["text"], "• Second action");
    assert_eq!(body[8]["text"], "• Third action");
}

#[test]
fn test_card_with_no_recommendations_emits_zero_bullets() {
    let card = card_json(&sample_message(vec![]));
    let body = card["body"].as_array().unwrap();

    // The label block stays, the bullet lines do not
    assert_eq!(body.len(), 6);
    assert_eq!(body[5]["text"], "Recommendations:");
}

#[test]
fn test_card_with_no_affected_services_says_none_specified() {
    let mut message = sample_message(vec![]);
    message.affected_services.clear();

    let card = card_json(&message);
    assert_eq!(card["body"][4]["text"], "None specified");
}

#[test]
fn test_card_carries_dashboard_action() {
    let card = card_json(&sample_message(vec![]));
    let actions = card["actions"].as_array().unwrap();

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0]["type"], "Action.OpenUrl");
    assert_eq!(actions[0]["title"], "View AWS Health Dashboard");
    assert_eq!(actions[0]["url"], "https://phd.aws.amazon.com/phd/home");
}

#[test]
fn test_status_emphasis_mapping() {
    assert_eq!(status_emphasis("Resolved"), "Good");
    assert_eq!(status_emphasis("maintenance completed"), "Good");
    assert_eq!(status_emphasis("In Progress"), "Warning");
    assert_eq!(status_emphasis("ongoing incident"), "Warning");
    assert_eq!(status_emphasis("Scheduled"), "Default");
    assert_eq!(status_emphasis("planned change"), "Default");
    assert_eq!(status_emphasis("something odd"), "Attention");
    // First matching rule wins
    assert_eq!(status_emphasis("scheduled work completed"), "Good");
}

#[test]
fn test_webhook_payload_shape() {
    let payload = TeamsWebhookPayload::new(build_card(&sample_message(vec![])));
    let json = serde_json::to_value(&payload).expect("payload serializes");

    assert_eq!(json["type"], "message");
    let attachments = json["attachments"].as_array().unwrap();
    assert_eq!(attachments.len(), 1);
    assert_eq!(
        attachments[0]["contentType"],
        "application/vnd.microsoft.card.adaptive"
    );
    assert_eq!(attachments[0]["content"]["type"], "AdaptiveCard");
    assert_eq!(attachments[0]["content"]["version"], "1.4");
}
