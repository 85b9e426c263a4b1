//! Maintenance-relevance classification for health events.
//!
//! The AWS Health taxonomy is large and not fully enumerable, so the
//! predicate combines a category allow-list, a known-code allow-list, and
//! case-insensitive substring fallbacks. False positives only cost an
//! extra notification.

use crate::core::models::HealthEvent;

/// Event-type categories that are always maintenance-relevant.
pub const MAINTENANCE_CATEGORIES: [&str; 4] = [
    "scheduledChange",
    "maintenance",
    "plannedChange",
    "investigation",
];

/// Event-type codes known to describe maintenance windows.
pub const MAINTENANCE_EVENT_TYPES: [&str; 7] = [
    "AWS_EC2_INSTANCE_MAINTENANCE_SCHEDULED",
    "AWS_EC2_INSTANCE_MAINTENANCE_PENDING",
    "AWS_EC2_INSTANCE_MAINTENANCE_IN_PROGRESS",
    "AWS_EC2_INSTANCE_MAINTENANCE_COMPLETED",
    "AWS_RDS_MAINTENANCE_SCHEDULED",
    "AWS_RDS_MAINTENANCE_IN_PROGRESS",
    "AWS_RDS_MAINTENANCE_COMPLETED",
];

/// Returns true when the event should be simplified and notified.
///
/// Pure predicate: category allow-list (case-sensitive), known type codes
/// (exact match), or a type code containing "maintenance" or "scheduled"
/// case-insensitively.
pub fn is_maintenance_relevant(event: &HealthEvent) -> bool {
    let detail = &event.detail;
    let type_code_lower = detail.event_type_code.to_lowercase();

    MAINTENANCE_CATEGORIES.contains(&detail.event_type_category.as_str())
        || MAINTENANCE_EVENT_TYPES.contains(&detail.event_type_code.as_str())
        || type_code_lower.contains("maintenance")
        || type_code_lower.contains("scheduled")
}
