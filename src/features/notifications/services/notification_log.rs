use std::sync::Arc;

use crate::features::notifications::models::{Notification, NotificationKind};
use crate::modules::storage::BlobStore;
use crate::shared::constants::{MAX_NOTIFICATIONS, STORAGE_KEY_NOTIFICATIONS};

/// Bounded, newest-first log of user-facing notifications.
///
/// Appended exclusively on report-store transitions; this is not a general
/// event bus. Holds at most `MAX_NOTIFICATIONS` entries, evicting the
/// oldest, and persists to its own blob-store key after every change.
pub struct NotificationLog {
    entries: Vec<Notification>,
    blob: Arc<dyn BlobStore>,
}

impl NotificationLog {
    /// Load the log from storage; a missing or unreadable blob starts empty
    pub fn load(blob: Arc<dyn BlobStore>) -> Self {
        let entries = match blob.get(STORAGE_KEY_NOTIFICATIONS) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::error!("Failed to decode stored notifications: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("Failed to read stored notifications: {}", e);
                Vec::new()
            }
        };

        Self { entries, blob }
    }

    /// Prepend a new unread notification, evicting beyond the cap.
    /// Crate-internal: only report-store transitions emit notifications.
    pub(crate) fn append(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        report_id: impl Into<String>,
        report_address: impl Into<String>,
    ) -> &Notification {
        let notification = Notification::new(kind, message, report_id, report_address);
        self.entries.insert(0, notification);
        self.entries.truncate(MAX_NOTIFICATIONS);
        self.persist();
        &self.entries[0]
    }

    /// Flip a single notification to read; false if the id is unknown
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Flip every notification to read
    pub fn mark_all_read(&mut self) {
        for notification in &mut self.entries {
            notification.read = true;
        }
        self.persist();
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode notifications: {}", e);
                return;
            }
        };
        if let Err(e) = self.blob.put(STORAGE_KEY_NOTIFICATIONS, &json) {
            tracing::error!("Failed to persist notifications: {}", e);
        }
    }
}
