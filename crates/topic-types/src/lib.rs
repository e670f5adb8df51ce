//! # topic-types
//!
//! Shared record types for topic analysis results.
//!
//! This crate defines [`TextRecord`], the container that carries analysis
//! output downstream: a text payload, free-form JSON metadata, and nested
//! child records. Analysis crates produce these; sinks consume them.

pub mod record;

pub use record::TextRecord;
