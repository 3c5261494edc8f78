use crate::features::reports::models::{Activity, Report};
use crate::shared::constants::ACTIVITY_FEED_LIMIT;

/// One entry of the cross-report activity feed: an activity copied out of
/// its report and tagged with the origin
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub report_id: String,
    pub report_address: String,
    pub activity: Activity,
}

/// Flatten every report's activity log into a single feed, newest first,
/// truncated to the most recent entries
pub fn activity_feed(reports: &[Report]) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = reports
        .iter()
        .flat_map(|report| {
            report.activity_log.iter().map(|activity| FeedItem {
                report_id: report.id.clone(),
                report_address: report.location.address.clone(),
                activity: activity.clone(),
            })
        })
        .collect();

    items.sort_by(|a, b| b.activity.timestamp.cmp(&a.activity.timestamp));
    items.truncate(ACTIVITY_FEED_LIMIT);
    items
}
