//! Pure computations of the rollup engine. Nothing in here touches the
//! store or the session.

pub mod aggregator;
pub mod duration;
pub mod ordering;
pub mod pricing;
pub mod progress;
pub mod rollup;
