//! Core library for `ffs`, a fast fuzzy file selector.
//!
//! Lists the files below a project root, then filters and ranks them against
//! an incrementally typed query. The [`session::Session`] type is the entry
//! point for hosts; [`matcher::evaluate`] is the stateless engine underneath.

pub mod candidate;
pub mod config;
pub mod error;
pub mod lister;
pub mod matcher;
pub mod root;
pub mod session;
