//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types (validated, render-ready)
//! - `wire.rs` — Raw serde structs matching backend responses
//! - `convert.rs` — `TryFrom`/`From` conversions with validation
//! - `state.rs` — State containers with update methods (for polled data)
//! - `client.rs` — Sub-client with HTTP methods

pub mod position;
pub mod trend;
