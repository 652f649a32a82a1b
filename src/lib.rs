//! Memory Match (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` so binaries, integration tests
//! and benches can use `memory_match::{core,store,runtime,input,term,types}`.

pub use memory_match_core as core;
pub use memory_match_input as input;
pub use memory_match_runtime as runtime;
pub use memory_match_store as store;
pub use memory_match_term as term;
pub use memory_match_types as types;
