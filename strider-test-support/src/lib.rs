//! Shared test utilities used across strider crates.
//!
//! [`crate::tracing::RecordingLayer`] captures the spans and events emitted by walk
//! sessions, graph loading and CLI commands; [`crate::ci::property_test_profile`]
//! lets CI scale every property suite from the environment.

pub mod ci;
pub mod tracing;
