mod activity;
mod report;

pub use activity::{Activity, ActivityKind, InternalNote};
pub use report::{
    danger_score, DangerLevel, Location, Priority, Report, Reporter, RoadType, Status,
};
