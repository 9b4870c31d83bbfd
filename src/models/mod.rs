//! Project domain models.
//!
//! Provides the value types the engine consumes ([`Project`], [`Task`],
//! [`Resource`]) and the findings it produces ([`Risk`], [`ComplianceIssue`],
//! [`Bottleneck`], [`ResourceConflict`], [`Recommendation`]).
//!
//! # Domain Mappings
//!
//! | Engine | Construction | Scheduling theory |
//! |--------|--------------|-------------------|
//! | Project | Build / contract | Project network |
//! | Task | Work package | Activity-on-node |
//! | Resource | Crew, plant, material | Renewable / consumable resource |
//! | Bottleneck | Gate activity | High out-degree node |

mod finding;
mod project;
mod resource;
mod task;

pub use finding::{
    Bottleneck, ComplianceIssue, Recommendation, RecommendationCategory, ResourceConflict, Risk,
    RiskCategory, Severity, Standard,
};
pub use project::{Metadata, Project};
pub use resource::{Resource, ResourceKind};
pub use task::{Task, TaskStatus};
