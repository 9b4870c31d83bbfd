//! Audit score and recommendations.
//!
//! # Score
//!
//! | Finding | Penalty |
//! |---------|---------|
//! | Any risk | 5 |
//! | High risk (extra) | 5 |
//! | Critical risk (extra) | 10 |
//! | Compliance issue | 8 |
//! | Bottleneck | 6 |
//! | Resource conflict | 7 |
//!
//! Starting from 100, clamped to `[0, 100]`.

use super::AuditReport;
use crate::models::{Recommendation, RecommendationCategory, Severity};

const RISK_PENALTY: f64 = 5.0;
const HIGH_RISK_PENALTY: f64 = 5.0;
const CRITICAL_RISK_PENALTY: f64 = 10.0;
const COMPLIANCE_PENALTY: f64 = 8.0;
const BOTTLENECK_PENALTY: f64 = 6.0;
const CONFLICT_PENALTY: f64 = 7.0;

/// Computes the overall score (0..=100) from the findings in `report`.
pub(super) fn overall_score(report: &AuditReport) -> f64 {
    let mut score = 100.0;

    score -= RISK_PENALTY * report.risks.len() as f64;
    for risk in &report.risks {
        match risk.severity {
            Severity::High => score -= HIGH_RISK_PENALTY,
            Severity::Critical => score -= CRITICAL_RISK_PENALTY,
            Severity::Low | Severity::Medium => {}
        }
    }
    score -= COMPLIANCE_PENALTY * report.compliance_issues.len() as f64;
    score -= BOTTLENECK_PENALTY * report.bottlenecks.len() as f64;
    score -= CONFLICT_PENALTY * report.resource_conflicts.len() as f64;

    score.clamp(0.0, 100.0)
}

/// Summarises findings per category, ending with the optimizer suggestion.
pub(super) fn recommendations(report: &AuditReport) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if !report.risks.is_empty() {
        let priority = if report.risks.iter().any(|r| r.severity == Severity::Critical) {
            Severity::Critical
        } else {
            Severity::High
        };
        out.push(Recommendation {
            category: RecommendationCategory::RiskManagement,
            priority,
            title: "Address identified risks".to_string(),
            description: format!(
                "Review and mitigate {} identified risks before work starts",
                report.risks.len()
            ),
        });
    }

    if !report.bottlenecks.is_empty() {
        out.push(Recommendation {
            category: RecommendationCategory::ScheduleOptimization,
            priority: Severity::Medium,
            title: "Relieve schedule bottlenecks".to_string(),
            description: format!(
                "{} tasks gate many others; add resources or split them to protect the schedule",
                report.bottlenecks.len()
            ),
        });
    }

    if !report.compliance_issues.is_empty() {
        out.push(Recommendation {
            category: RecommendationCategory::Compliance,
            priority: Severity::High,
            title: "Close compliance gaps".to_string(),
            description: format!(
                "Resolve {} compliance issues against OSHA and ISO requirements",
                report.compliance_issues.len()
            ),
        });
    }

    if !report.resource_conflicts.is_empty() {
        out.push(Recommendation {
            category: RecommendationCategory::ResourceManagement,
            priority: Severity::Medium,
            title: "Level shared resources".to_string(),
            description: format!(
                "{} resources are shared by too many tasks; stagger their use or add capacity",
                report.resource_conflicts.len()
            ),
        });
    }

    out.push(Recommendation {
        category: RecommendationCategory::Optimization,
        priority: Severity::Low,
        title: "Run the optimizer".to_string(),
        description: "Run the schedule and cost optimizer to find compression and savings opportunities"
            .to_string(),
    });

    out
}
