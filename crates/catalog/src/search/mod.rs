//! Catalog search.
//!
//! Pipeline: params -> compiler -> executor (count, then window) -> DTOs.
//! The store adapters evaluate the compiled predicate; `matcher` holds the
//! in-process semantics.

pub mod compiler;
pub mod executor;
pub mod matcher;
pub mod params;
pub mod service;
pub mod types;

pub use compiler::FilterCompiler;
pub use params::{GlobalSearchParams, LaborSearchParams, LimitParams, MaterialSearchParams};
pub use service::SearchService;
pub use types::{CompiledQuery, PageWindow, Predicate, SearchPage};
