// =============================================================================
// VIEW CONSTANTS
// =============================================================================

/// Default page size for the report table
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: usize = 100;

/// Maximum entries retained in the cross-report activity feed
pub const ACTIVITY_FEED_LIMIT: usize = 20;

/// Maximum notifications retained; oldest are evicted first
pub const MAX_NOTIFICATIONS: usize = 50;

/// Window (in days) for the "recent reports" summary counter
pub const RECENT_WINDOW_DAYS: i64 = 7;

// =============================================================================
// STORAGE KEYS
// =============================================================================

/// Blob-store key for the report collection
pub const STORAGE_KEY_REPORTS: &str = "fixfirst-reports";

/// Blob-store key for the notification log
pub const STORAGE_KEY_NOTIFICATIONS: &str = "fixfirst-notifications";

/// Blob-store key for saved dashboard views
pub const STORAGE_KEY_SAVED_VIEWS: &str = "fixfirst-saved-views";

/// Blob-store key for the current session user
pub const STORAGE_KEY_SESSION_USER: &str = "fixfirst-session-user";

/// Blob-store key for the user roster
pub const STORAGE_KEY_USERS: &str = "fixfirst-users";
