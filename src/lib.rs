//! Wave Function Collapse, overlapping model: extract `K x K` patterns from an input grid,
//! compile their directional compatibility table, then repeatedly pick the lowest-entropy
//! undecided output cell, collapse it, and propagate the consequences until every cell is
//! decided or a contradiction is reached.
//!
//! The [`Solver`] ties the pieces together; most callers only need [`Solver::new`] and
//! [`Solver::run`].

pub mod config;
pub mod context;
pub mod error;
pub mod orientation;
pub mod overlapping;
pub mod pattern;
mod propagate;
pub mod render;
pub mod rng;
pub mod solver;
pub mod stats;
pub mod wave;
pub mod wrap;

pub use config::WfcConfig;
pub use context::Context;
pub use coord_2d::{Coord, Size};
pub use error::ConfigError;
pub use orientation::Orientation;
pub use overlapping::OverlappingPatterns;
pub use pattern::Pattern;
pub use render::RenderError;
pub use rng::Lcg64;
pub use solver::Solver;
pub use stats::GlobalStats;
pub use wave::Wave;
pub use wrap::Wrap;
