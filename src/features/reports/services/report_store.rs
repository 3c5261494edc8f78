use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::notifications::{Notification, NotificationKind, NotificationLog};
use crate::features::reports::dtos::{BulkChange, CreateReportInput, ReportPatch};
use crate::features::reports::models::{
    danger_score, Activity, ActivityKind, InternalNote, Location, Report, Reporter, Status,
};
use crate::modules::storage::BlobStore;
use crate::shared::constants::STORAGE_KEY_REPORTS;

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type SubscriberFn = Box<dyn Fn(&[Report]) + Send>;

/// Single source of truth for the report collection.
///
/// All writes flow through this store: every mutating operation persists the
/// full collection snapshot to the blob store before returning, then invokes
/// every subscriber with the new snapshot. Consumers re-derive their views
/// from the snapshot; there is no diffing.
///
/// The store is single-user and single-threaded by construction: operations
/// take `&mut self`, run synchronously, and are atomic from the caller's
/// perspective. Lookups on absent ids return sentinels (`None`/`false`)
/// rather than errors.
///
/// Owns the notification log: specific transitions (status change,
/// assignment, bulk update) each append exactly one notification.
pub struct ReportStore {
    reports: Vec<Report>,
    notifications: NotificationLog,
    subscribers: Vec<(SubscriptionId, SubscriberFn)>,
    next_subscription: u64,
    blob: Arc<dyn BlobStore>,
}

impl ReportStore {
    /// Load the store from the blob store; a missing or unreadable snapshot
    /// starts the collection empty
    pub fn load(blob: Arc<dyn BlobStore>) -> Self {
        let reports: Vec<Report> = match blob.get(STORAGE_KEY_REPORTS) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::error!("Failed to decode stored reports: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("Failed to read stored reports: {}", e);
                Vec::new()
            }
        };

        tracing::info!("Report store loaded with {} reports", reports.len());

        Self {
            reports,
            notifications: NotificationLog::load(Arc::clone(&blob)),
            subscribers: Vec::new(),
            next_subscription: 0,
            blob,
        }
    }

    // ===== Queries =====

    /// Cloned snapshot of the full collection, newest-created first
    pub fn get_all(&self) -> Vec<Report> {
        self.reports.clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Report> {
        self.reports.iter().find(|r| r.id == id).cloned()
    }

    /// Reports filed by a given citizen
    pub fn get_by_reporter(&self, reporter_id: &str) -> Vec<Report> {
        self.reports
            .iter()
            .filter(|r| r.reporter.id == reporter_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    // ===== Mutations =====

    /// Create a report from a citizen submission.
    ///
    /// Assigns a fresh id, stamps the creation time, derives the danger
    /// score from the classified severity, and seeds the activity log with
    /// a creation entry. New reports are prepended so the collection stays
    /// in reverse-creation order.
    pub fn create(&mut self, input: CreateReportInput) -> Result<Report> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let address = if input.address.trim().is_empty() {
            format!("{}, {}", input.lat, input.lng)
        } else {
            input.address.clone()
        };

        let report = Report {
            id: format!("rpt-{}", Uuid::new_v4()),
            location: Location {
                address,
                lat: input.lat,
                lng: input.lng,
            },
            created_at: Utc::now(),
            reporter: Reporter {
                id: input.reporter_id.clone(),
                name: input.reporter_name.clone(),
            },
            photo_url: input.photo_url,
            description: input.description,
            citizen_notes: input.citizen_notes,
            // The reporter's own upvote
            upvotes: 1,
            danger_score: danger_score(input.severity, input.contains_water),
            danger_level: input.severity,
            contains_water: input.contains_water,
            road_type: input.road_type.unwrap_or_default(),
            status: Status::Submitted,
            worker: None,
            priority: None,
            activity_log: vec![Activity::now(
                ActivityKind::Creation,
                format!("Report created by {}", input.reporter_name),
            )],
            internal_notes: Vec::new(),
        };

        tracing::info!("Created report {} at {}", report.id, report.location.address);

        self.reports.insert(0, report.clone());
        self.persist();
        self.notify_subscribers();

        Ok(report)
    }

    /// Shallow-merge a patch onto an existing report.
    ///
    /// For each of status, worker, and priority that actually changes value,
    /// exactly one activity entry is prepended; unchanged or absent fields
    /// leave the log untouched. Status and assignment changes also append
    /// one notification each. Returns `None` when the id is unknown.
    pub fn update(&mut self, id: &str, patch: ReportPatch) -> Option<Report> {
        let index = self.reports.iter().position(|r| r.id == id)?;

        let mut activities: Vec<Activity> = Vec::new();
        let mut notifications: Vec<(NotificationKind, String)> = Vec::new();

        {
            let report = &mut self.reports[index];

            if let Some(new_status) = patch.status {
                if new_status != report.status {
                    if !report.status.can_transition(new_status) {
                        tracing::warn!(
                            "Report {}: status moved {} -> {} outside the intended lifecycle",
                            report.id,
                            report.status,
                            new_status
                        );
                    }

                    activities.push(Activity::now(
                        ActivityKind::StatusChange,
                        format!(
                            "Status changed from \"{}\" to \"{}\"",
                            report.status, new_status
                        ),
                    ));
                    notifications.push((
                        status_notification_kind(new_status),
                        format!(
                            "Status of \"{}\" updated to {}.",
                            truncate_address(&report.location.address),
                            new_status
                        ),
                    ));
                    report.status = new_status;
                }
            }

            if let Some(new_worker) = patch.worker.clone() {
                if new_worker != report.worker {
                    let target = new_worker.as_deref().unwrap_or("Unassigned");
                    activities.push(Activity::now(
                        ActivityKind::Assignment,
                        format!("Assigned to {}", target),
                    ));
                    notifications.push((
                        NotificationKind::Assignment,
                        format!(
                            "Report at \"{}\" assigned to {}.",
                            truncate_address(&report.location.address),
                            target
                        ),
                    ));
                    report.worker = new_worker;
                }
            }

            if let Some(new_priority) = patch.priority {
                if Some(new_priority) != report.priority {
                    activities.push(Activity::now(
                        ActivityKind::PriorityChange,
                        format!("Priority changed to {}", new_priority),
                    ));
                    report.priority = Some(new_priority);
                }
            }

            if !activities.is_empty() {
                tracing::info!(
                    "Updated report {} ({} change(s))",
                    report.id,
                    activities.len()
                );
                // Prepend the batch, keeping its internal order
                for activity in activities.into_iter().rev() {
                    report.activity_log.insert(0, activity);
                }
            }
        }

        let (report_id, report_address) = {
            let report = &self.reports[index];
            (report.id.clone(), report.location.address.clone())
        };
        for (kind, message) in notifications {
            self.notifications
                .append(kind, message, report_id.clone(), report_address.clone());
        }

        self.persist();
        self.notify_subscribers();

        Some(self.reports[index].clone())
    }

    /// Apply the same single-field change to every matching report.
    ///
    /// The changed count is computed before any mutation and counts only
    /// reports whose value actually differs. Each changed report gains one
    /// activity entry; the whole batch produces a single aggregate
    /// notification anchored on the first affected report, one snapshot
    /// persist, and one subscriber notification.
    pub fn bulk_update(&mut self, ids: &[String], change: &BulkChange) -> usize {
        let differs = |report: &Report| match change {
            BulkChange::Status(status) => report.status != *status,
            BulkChange::Worker(worker) => report.worker != *worker,
        };

        let changed_count = ids
            .iter()
            .filter_map(|id| self.reports.iter().find(|r| r.id == *id))
            .filter(|r| differs(r))
            .count();

        if changed_count == 0 {
            return 0;
        }

        let anchor = ids
            .iter()
            .filter_map(|id| self.reports.iter().find(|r| r.id == *id))
            .find(|r| differs(r))
            .map(|r| (r.id.clone(), r.location.address.clone()));

        for id in ids {
            let Some(report) = self.reports.iter_mut().find(|r| r.id == *id) else {
                continue;
            };

            let message = match change {
                BulkChange::Status(status) if report.status != *status => {
                    report.status = *status;
                    format!("Status changed to \"{}\".", status)
                }
                BulkChange::Worker(worker) if report.worker != *worker => {
                    report.worker = worker.clone();
                    format!("Assigned to {}.", worker.as_deref().unwrap_or("Unassigned"))
                }
                _ => continue,
            };

            report
                .activity_log
                .insert(0, Activity::now(ActivityKind::BulkUpdate, message));
        }

        if let Some((report_id, address)) = anchor {
            self.notifications.append(
                NotificationKind::BulkUpdate,
                format!("Bulk updated {} reports.", changed_count),
                report_id,
                address,
            );
        }

        tracing::info!(
            "Bulk update touched {} of {} targeted reports",
            changed_count,
            ids.len()
        );

        self.persist();
        self.notify_subscribers();

        changed_count
    }

    /// Prepend an internal note and its activity entry atomically.
    /// Returns false when the id is unknown.
    pub fn add_note(
        &mut self,
        id: &str,
        text: impl Into<String>,
        author_id: impl Into<String>,
        author_name: impl Into<String>,
    ) -> bool {
        let Some(report) = self.reports.iter_mut().find(|r| r.id == id) else {
            return false;
        };

        let author_name = author_name.into();
        let note = InternalNote {
            id: format!("note-{}", Uuid::new_v4()),
            text: text.into(),
            author_id: author_id.into(),
            author_name: author_name.clone(),
            timestamp: Utc::now(),
        };

        report.internal_notes.insert(0, note);
        report.activity_log.insert(
            0,
            Activity::now(
                ActivityKind::NoteAdded,
                format!("Internal note added by {}", author_name),
            ),
        );

        self.persist();
        self.notify_subscribers();

        true
    }

    /// Bump a report's upvote counter. Not recorded in the activity log.
    pub fn upvote(&mut self, id: &str) -> Option<Report> {
        let index = self.reports.iter().position(|r| r.id == id)?;
        self.reports[index].upvotes += 1;

        self.persist();
        self.notify_subscribers();

        Some(self.reports[index].clone())
    }

    // ===== Subscriptions =====

    /// Register a callback invoked with the full snapshot after every
    /// successful mutation
    pub fn subscribe(&mut self, callback: impl Fn(&[Report]) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify_subscribers(&self) {
        for (_, callback) in &self.subscribers {
            callback(&self.reports);
        }
    }

    // ===== Notifications =====

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.entries()
    }

    pub fn unread_notification_count(&self) -> usize {
        self.notifications.unread_count()
    }

    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        self.notifications.mark_read(id)
    }

    pub fn mark_all_notifications_read(&mut self) {
        self.notifications.mark_all_read();
    }

    // ===== Persistence =====

    /// Serialize the whole collection to the blob store. Failures are
    /// logged, never surfaced: the blob store is a local cache, not a
    /// system of record.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.reports) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode report snapshot: {}", e);
                return;
            }
        };
        if let Err(e) = self.blob.put(STORAGE_KEY_REPORTS, &json) {
            tracing::error!("Failed to persist report snapshot: {}", e);
        }
    }
}

/// Status changes map to a kind by their target: terminal outcomes get their
/// own notification kinds so the menu can badge them differently
fn status_notification_kind(new_status: Status) -> NotificationKind {
    match new_status {
        Status::Resolved => NotificationKind::TaskFixed,
        Status::Rejected => NotificationKind::TaskRejected,
        _ => NotificationKind::StatusChange,
    }
}

/// Addresses are long; notification messages show a 20-char prefix
fn truncate_address(address: &str) -> String {
    if address.chars().count() <= 20 {
        address.to_string()
    } else {
        let prefix: String = address.chars().take(20).collect();
        format!("{}...", prefix)
    }
}
