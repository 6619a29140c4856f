//! Purpose: Define the stable public Rust API boundary for endpoint access.
//! Exports: Endpoint store, accessor trait, value kinds, and error types.
//! Role: Public, additive-only surface; hides parser and internal modules.
//! Invariants: This module is the only public path to the endpoint store.
//! Invariants: Internal modules remain private and are not directly exposed.

pub use crate::core::endpoint::{Endpoint, EndpointValue};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::kind::ValueKind;
pub use serde_json::{Map, Value};
