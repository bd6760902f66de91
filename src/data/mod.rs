//! Data Loading and Lookup
//!
//! Handles the lifecycle JSON document (`stages`, `connections`, `exemplars`):
//! - `model`: serde records
//! - `loader`: file loading with fallback to the built-in dataset
//! - `defaults`: the built-in MaLDReTH dataset
//! - `extract`: grouping and counting helpers
//! - `validate`: reference checks reported at startup

pub mod defaults;
pub mod extract;
pub mod loader;
pub mod model;
pub mod validate;

pub use extract::{LifecycleStatistics, StageSummary, FALLBACK_STAGE_COLOR};
pub use loader::{DataError, DataSource};
pub use model::{Connection, ConnectionType, Exemplar, LifecycleData, Stage};
pub use validate::ValidationIssue;
