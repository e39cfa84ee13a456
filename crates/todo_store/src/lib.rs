//! Todo storage for the todo backend.
//!
//! This crate provides a storage abstraction for todo records. It supports an
//! embedded SQLite file (the default) and a remote Supabase/PostgREST table,
//! chosen once at startup by [`open_store`].

mod error;
mod normalize;
mod remote;
mod selector;
mod sqlite;
mod traits;

pub use error::*;
pub use remote::*;
pub use selector::*;
pub use sqlite::*;
pub use traits::*;
