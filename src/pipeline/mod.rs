//! Pipeline variants and result assembly.
//!
//! Both variants are pure functions from query text to a response object,
//! given oracles and catalog loaded once at startup. A request that fails
//! leaves all shared state untouched for subsequent requests.

pub mod dense;
pub mod error;
pub mod rag;
pub mod response;


pub use dense::DensePipeline;
pub use error::PipelineError;
pub use rag::RagPipeline;
pub use response::{DenseResponse, MatchResult, MatchStatus, RagResponse, TechniqueRef};
