//! lumen_core: Core types shared by every stage of the lumen pipeline.
//!
//! Provides text spans, line maps, and the runtime value type.

pub mod text;
pub mod value;

// Re-export commonly used types
pub use text::{LineAndColumn, LineMap, TextSpan};
pub use value::Value;
