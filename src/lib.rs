pub mod config;
pub mod discover;
pub mod engine;
pub mod error;
pub mod parse;
pub mod report;
pub mod validate;
pub mod wasm;

pub use config::{Policy, PolicyConfig};
pub use engine::{DocumentKind, PolicyEngine, SourceDocument};
pub use error::{Finding, ViolationKind};
pub use report::ValidationReport;
