//! Keeps JIRA release versions sorted.
//!
//! Release version records in a JIRA project have a manual list order that
//! drifts as versions are created out of sequence. This crate parses the
//! free-text version names, computes the desired order per release lineage,
//! and repairs the remote list with "move after" calls until it is stable.

pub mod config;
pub mod gateway;
pub mod sorter;
pub mod version;
