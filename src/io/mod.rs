// src/io/mod.rs
//! Taxonomy file reading and attribute export.

pub mod csv;
pub mod reader;

pub use self::reader::{load_file, load_str, TaxonomyRecord};
