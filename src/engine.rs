pub mod coordinator;
pub mod worker;

// Re-export public types
pub use coordinator::{EngineCore, FetchMode, FetchOutcome, FetchPlan, Snapshot};
pub use worker::{SearchHandle, spawn_engine};
