//! Sequence context abstraction
//!
//! Provides the trait the edit operations query for sequence facts, and an
//! in-memory implementation for tests.

pub mod mock;
pub mod provider;

pub use mock::{MockProvider, SequenceRecord};
pub use provider::{GapMap, SequenceProvider, Topology};
