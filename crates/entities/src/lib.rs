//! Core entity definitions for the todo backend.
//!
//! Every storage backend normalizes its native rows into the types defined
//! here, so callers never observe which backend served a request.

mod todo;

pub use todo::*;
