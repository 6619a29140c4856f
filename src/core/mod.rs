// Core modules implementing the endpoint store, value kinds, and error modeling.
pub mod endpoint;
pub mod error;
pub mod kind;
