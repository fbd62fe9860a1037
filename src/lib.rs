//! Core library for the `cookielens` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, configuration loading, the cookie metrics pipeline
//! (ingress gate, aggregation task, metric store), and plain-text report
//! rendering. The primary user-facing interface is the `cookielens`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod metrics;
