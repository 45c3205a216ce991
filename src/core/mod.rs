//! Core report pipeline: demo data, sorting, normalization, orchestration.

pub mod demo;
pub mod normalize;
pub mod report;
pub mod sort;

pub use demo::demo_posts;
pub use report::{ReportRequest, generate_report};
pub use sort::{SortKey, sort_posts};
