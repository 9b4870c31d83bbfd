//! Construction project audit and optimization engine.
//!
//! Takes a project described as a graph of tasks, dependencies, and
//! resources, and produces a scored audit, a heuristically optimized copy,
//! and a standards-compliance report. The engine is pure: no I/O, no
//! persistence, and the caller's project is never mutated.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`Project`, `Task`, `Resource`) and findings
//!   (`Risk`, `ComplianceIssue`, `Bottleneck`, `ResourceConflict`)
//! - **`graph`**: Dependency levels, CPM forward pass, date scheduling
//! - **`validation`**: Duplicate ids, dangling dependencies, cycle detection
//! - **`audit`**: Eight-check audit with a 0–100 score
//! - **`optimizer`**: Bottleneck, fast-tracking, and value-engineering heuristics
//! - **`compliance`**: ISO 19650, OSHA, and PMBOK rules
//! - **`config`**: Threshold and factor tables, loadable from TOML
//!
//! # Independence
//!
//! `Auditor`, `Optimizer`, and `ComplianceChecker` each consume a project on
//! their own; none depends on another's output.
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - PMI (2021), "A Guide to the Project Management Body of Knowledge"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22

pub mod audit;
pub mod compliance;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod optimizer;
pub mod validation;

pub use audit::{AuditReport, Auditor};
pub use compliance::{ComplianceChecker, ComplianceResult};
pub use error::{EngineError, EngineResult};
pub use optimizer::{OptimizationResult, Optimizer};
