//! Prosody Lab CLI library.
//!
//! This crate provides the command implementations behind the `prosody`
//! binary and the caller side of the job contract: writing a request
//! document, running the transformation through a [`job::JobRunner`], and
//! double-checking that the promised output actually exists.

pub mod commands;
pub mod job;
