mod engine;
mod types;

pub use engine::{run_projection, run_term_sweep};
pub use types::{Product, ProjectionInput, ProjectionResult, SAMPLE_PRODUCTS, TermProjection};
