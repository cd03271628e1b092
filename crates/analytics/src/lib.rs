//! # Economic Indicator Engine
//!
//! This crate derives year-over-year performance metrics for a single entity
//! (typically a country) from a baseline value and its subsequent yearly values.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O and no formatting. It depends only on `core-types`
//!   for its inputs and on `configuration` for its thresholds.
//! - **Compute Once:** An `EntityIndicatorReport` is fully derived when it is built
//!   and never changes afterwards. Entities are independent of each other, so
//!   reports can be built in any order or in parallel.
//! - **No Sentinels:** An undefined statistic is an `AnalyticsError`, never a
//!   substituted zero or infinity.
//!
//! ## Public API
//!
//! - `IndicatorEngine`: builds reports and exposes each calculation on its own.
//! - `RankingScale`: the threshold table that labels a single growth rate.
//! - `EntityIndicatorReport` / `IndicatorSummary`: the computed indicator set.
//! - `AnalyticsError`: the failure modes of the calculations.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod ranking;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::IndicatorEngine;
pub use error::AnalyticsError;
pub use ranking::RankingScale;
pub use report::{EntityIndicatorReport, IndicatorSummary};
