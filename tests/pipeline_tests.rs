use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use health_notifier::cards::AdaptiveCard;
use health_notifier::core::models::{HealthEvent, SimplifiedMessage};
use health_notifier::errors::HealthNotifierError;
use health_notifier::pipeline::{EventPipeline, MessageSimplifier, NotificationSender};
use serde_json::json;

fn make_event(id: &str, category: &str, type_code: &str) -> HealthEvent {
    serde_json::from_value(json!({
        "id": id,
        "source": "aws.health",
        "detail": {
            "eventTypeCode": type_code,
            "eventTypeCategory": category,
            "service": "EC2",
            "eventDescription": []
        }
    }))
    .expect("valid test event")
}

fn sample_message() -> SimplifiedMessage {
    SimplifiedMessage {
        title: "Maintenance".to_string(),
        summary: "Window scheduled".to_string(),
        affected_services: vec!["EC2".to_string()],
        impact: "Reboots".to_string(),
        timeframe: "Tonight".to_string(),
        status: "Scheduled".to_string(),
        recommendations: vec![],
    }
}

/// Simplifier fake that records which events it saw and fails on demand.
struct FakeSimplifier {
    fail_ids: Vec<String>,
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl MessageSimplifier for FakeSimplifier {
    async fn simplify(
        &self,
        event: &HealthEvent,
    ) -> Result<SimplifiedMessage, HealthNotifierError> {
        self.seen.lock().unwrap().push(event.id.clone());
        if self.fail_ids.contains(&event.id) {
            return Err(HealthNotifierError::Generation(
                "model unavailable".to_string(),
            ));
        }
        Ok(sample_message())
    }
}

/// Sender fake that records delivered card titles.
struct FakeSender {
    delivered: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl NotificationSender for FakeSender {
    async fn send(&self, card: AdaptiveCard) -> Result<(), HealthNotifierError> {
        let json = serde_json::to_value(&card).expect("card serializes");
        self.delivered
            .lock()
            .unwrap()
            .push(json["body"][0]["text"].as_str().unwrap().to_string());
        Ok(())
    }
}

fn pipeline_with_fakes(
    fail_ids: Vec<String>,
) -> (EventPipeline, Arc<Mutex<Vec<String>>>, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let delivered = Arc::new(Mutex::new(Vec::new()));
    let pipeline = EventPipeline::new(
        Box::new(FakeSimplifier {
            fail_ids,
            seen: Arc::clone(&seen),
        }),
        Box::new(FakeSender {
            delivered: Arc::clone(&delivered),
        }),
    );
    (pipeline, seen, delivered)
}

#[tokio::test]
async fn test_process_one_skips_irrelevant_events() {
    let (pipeline, seen, delivered) = pipeline_with_fakes(vec![]);
    let event = make_event("evt-1", "issue", "AWS_EC2_OPERATIONAL_ISSUE");

    pipeline.process_one(&event).await.expect("no-op succeeds");

    assert!(seen.lock().unwrap().is_empty());
    assert!(delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_process_one_delivers_relevant_event() {
    let (pipeline, seen, delivered) = pipeline_with_fakes(vec![]);
    let event = make_event("evt-1", "scheduledChange", "AWS_RDS_MAINTENANCE_SCHEDULED");

    pipeline.process_one(&event).await.expect("should succeed");

    assert_eq!(*seen.lock().unwrap(), vec!["evt-1"]);
    assert_eq!(*delivered.lock().unwrap(), vec!["Maintenance"]);
}

#[tokio::test]
async fn test_process_one_propagates_simplify_failure() {
    let (pipeline, _seen, delivered) = pipeline_with_fakes(vec!["evt-1".to_string()]);
    let event = make_event("evt-1", "scheduledChange", "AWS_RDS_MAINTENANCE_SCHEDULED");

    let result = pipeline.process_one(&event).await;

    assert!(matches!(result, Err(HealthNotifierError::Generation(_))));
    assert!(delivered.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_process_batch_isolates_per_event_failures() {
    // Five events; only 1 and 3 are maintenance-relevant, and 3's
    // simplification fails. The batch must still complete with event 1
    // delivered and no error escaping.
    let (pipeline, seen, delivered) = pipeline_with_fakes(vec!["evt-3".to_string()]);
    let events = vec![
        make_event("evt-1", "scheduledChange", "AWS_RDS_MAINTENANCE_SCHEDULED"),
        make_event("evt-2", "issue", "AWS_EC2_OPERATIONAL_ISSUE"),
        make_event("evt-3", "maintenance", "AWS_EC2_INSTANCE_MAINTENANCE_PENDING"),
        make_event("evt-4", "accountNotification", "AWS_BILLING_NOTIFICATION"),
        make_event("evt-5", "issue", "AWS_S3_INCREASED_ERROR_RATES"),
    ];

    pipeline.process_batch(&events).await;

    // Only the relevant pair reached the simplifier, in order
    assert_eq!(*seen.lock().unwrap(), vec!["evt-1", "evt-3"]);
    // Event 1 delivered; event 3's failure was contained
    assert_eq!(delivered.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_process_batch_with_no_relevant_events_is_a_no_op() {
    let (pipeline, seen, delivered) = pipeline_with_fakes(vec![]);
    let events = vec![
        make_event("evt-1", "issue", "AWS_EC2_OPERATIONAL_ISSUE"),
        make_event("evt-2", "issue", "AWS_S3_INCREASED_ERROR_RATES"),
    ];

    pipeline.process_batch(&events).await;

    assert!(seen.lock().unwrap().is_empty());
    assert!(delivered.lock().unwrap().is_empty());
}
