//! Declarative chart specifications for the bike-share dashboard.
//!
//! This crate provides:
//! - `spec`: the serializable [`ChartSpec`] model (marks, axes, colors, data)
//! - `palette`: fixed dashboard colors and named color scales
//! - `builders`: one builder per chart, plus [`build_all`]

pub mod builders;
pub mod palette;
pub mod spec;

pub use builders::build_all;
pub use spec::{ChartData, ChartId, ChartSpec, Tab};
