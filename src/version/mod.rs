//! Version ordering engine
//!
//! The pure core of the sorter: turn free-text version names into
//! comparable token tuples, group them into per-major lineages, and diff
//! the desired lineage order against the remote list's actual positions.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   tokens    │────▶│   compare   │────▶│   lineage   │
//! │  (parse)    │     │ (total ord) │     │  (group)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │  reconcile  │
//!                                         │ (diff→moves)│
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tokens`]: total parser from names to integer token tuples
//! - [`compare`]: total order over parsed tuples
//! - [`lineage`]: per-major grouping under a parts scheme
//! - [`reconcile`]: desired-vs-actual diff emitting move operations

pub mod compare;
pub mod lineage;
pub mod reconcile;
pub mod tokens;
