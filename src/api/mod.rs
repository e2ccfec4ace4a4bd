//! Server access
//!
//! The typed response schema, the HTTP backend and the generation-counted
//! allocation loader.

pub mod backend;
pub mod loader;
pub mod schema;

pub use backend::{AllocationBackend, HttpBackend, SubmitReceipt};
pub use loader::{LoadOutcome, RepartitionLoader};
pub use schema::{parse_repartitions, RepartitionDto, RepartitionResponse};
