//! Editor for the extra (sidecar) containers of an isolated build agent job.
//!
//! The list lives in a single text field of a host form. [`editor::core::ListEditor`]
//! loads it from that field, drives the add/edit dialog and writes the field back
//! after every change. The `editor` and `catalog` modules serve it over HTTP.

pub mod catalog;
pub mod containers;
pub mod editor;
pub mod render;
pub mod utils;
