//! Block (template) preparation for squared-difference scoring.

mod plan;

pub use plan::SqdiffPlan;
