//! Market query pipeline for `GrocyWise`.
//!
//! Turns a location, an optional shopping list and optional filters into a
//! schema-constrained request, calls the generation service once, validates
//! the structured reply, extracts citations and re-ranks the shopping-list
//! comparison client-side. Any failure collapses into a single
//! [`ServiceError`].

pub mod error;
pub mod grounding;
pub mod pipeline;
pub mod prompt;
pub mod schema;
pub mod session;
pub mod validate;

pub use error::{ServiceError, ValidationError};
pub use grounding::{extract_grounding, Grounding, FALLBACK_SOURCE_TITLE};
pub use pipeline::{PipelineOptions, QueryPipeline};
pub use prompt::{build_request, MarketRequest, SYSTEM_INSTRUCTION};
pub use schema::{market_report_schema, REQUIRED_FIELDS};
pub use session::{QuerySession, QueryState, SessionError};
pub use validate::{validate_response, MarketReport};
