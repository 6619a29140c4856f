//! Purpose: Typed access to the JSON endpoint configuration handed to backup plugins.
//! Exports: `api` (endpoint store, accessors, value kinds, errors).
//! Role: Library backing plugin actions and the `endpoint-probe` diagnostic binary.
//! Invariants: Endpoint stores are immutable once parsed; accessors have no side effects.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
mod core;
mod json;
