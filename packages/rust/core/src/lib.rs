//! Descriptor grammar and document generation for depdocs.
//!
//! This crate owns the `resource_info.txt` line grammar (validation, encode,
//! decode) and ties it to document accumulation and writing through the
//! `generate` pipeline.

pub mod decoder;
pub mod documents;
pub mod encoder;
pub mod grammar;
pub mod input;
pub mod pipeline;
pub mod writer;
