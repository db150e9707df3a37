//! Line command protocol
//!
//! This module provides parsing of the `L`/`Q`/`X` command lines and the
//! JSON replies written back for queries.

pub mod command;
pub mod load;
pub mod query;
pub mod reply;

pub use command::Command;
pub use reply::Reply;
