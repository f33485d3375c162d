//! Contribution data normalization and aggregation
//!
//! The remote API returns contribution lists in several shapes (bare array,
//! `{data}` / `{cotisations}` wrappers, nested per-member statistics) with
//! inconsistent field spellings and date encodings. This crate decodes all of
//! them into one flat record type, resolves creation times, and computes the
//! dashboard aggregates the views render.

pub mod dashboard;
pub mod filter;
pub mod format;
pub mod normalize;
pub mod query;
pub mod record;
pub mod timestamp;

pub use dashboard::{
    DashboardPayload, DashboardStats, DistributionSlice, MemberContributions, distribution,
};
pub use filter::{filter_by_range, sort_newest_first};
pub use normalize::{ContributionResponse, flatten_value};
pub use record::{Contribution, Status};
pub use timestamp::TemporalValue;
