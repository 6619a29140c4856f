//! Purpose: Internal JSON parsing boundary for endpoint input.
//! Exports: `parse` module with the decode helper and failure categorization.
//! Role: Single seam for parser details so the endpoint store avoids ad hoc decode logic.
//! Invariants: Endpoint JSON decoding goes through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
