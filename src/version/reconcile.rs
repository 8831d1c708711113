//! Order reconciliation
//!
//! Compares the desired intra-lineage order against the positions the
//! remote list actually has and computes the "move after" operations that
//! repair the first violation found. Positions shift remotely after every
//! applied move, so a pass stops at the first violation; the caller
//! re-fetches and reconciles again until a pass emits nothing.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::gateway::types::VersionRecord;
use crate::version::tokens::VersionParser;

/// One atomic instruction to the remote list: insert `to_move` immediately
/// following `place_after`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOperation {
    pub to_move: VersionRecord,
    pub place_after: VersionRecord,
}

/// First builds (`140.0.0`, `450.0`) anchor their lineage and are never
/// moved; they have no well-defined predecessor.
pub fn is_first_build(name: &str) -> bool {
    name.trim().split('.').next_back() == Some("0")
}

/// Diff the desired per-lineage order against the actual list and emit the
/// moves repairing the first violation. An empty result means the list is
/// already stable for every requested lineage.
pub fn reconcile(
    parser: &VersionParser,
    actual: &[VersionRecord],
    desired: &IndexMap<i64, Vec<String>>,
) -> Vec<MoveOperation> {
    // names are trimmed before keying; remote lists sometimes carry typos
    let records: HashMap<&str, &VersionRecord> =
        actual.iter().map(|r| (r.name.trim(), r)).collect();
    let positions: HashMap<&str, usize> = actual
        .iter()
        .map(|r| (r.name.trim(), r.position))
        .collect();

    for (major, order) in desired {
        debug!("Checking version lineage {}", major);
        for pair in order.windows(2) {
            let (prev, curr) = (pair[0].as_str(), pair[1].as_str());
            // partial lineages are tolerated, not repaired
            let (Some(&prev_pos), Some(&curr_pos)) = (positions.get(prev), positions.get(curr))
            else {
                continue;
            };

            let prev_minor = parser.parse(prev).minor();
            let curr_minor = parser.parse(curr).minor();
            let in_order = if prev_minor == curr_minor {
                // same-minor builds must form an unbroken run
                curr_pos == prev_pos + 1
            } else {
                prev_pos < curr_pos
            };
            if in_order {
                continue;
            }
            warn!(
                "Version {} is not before {}, which is incorrect",
                prev, curr
            );

            // repair the minimal slice the mismatch belongs to: the whole
            // major, or just the major+minor run for adjacency violations
            let slice: Vec<&str> = if prev_minor == curr_minor {
                order
                    .iter()
                    .map(String::as_str)
                    .filter(|n| parser.parse(n).minor() == curr_minor)
                    .collect()
            } else {
                order.iter().map(String::as_str).collect()
            };
            return moves_for_slice(&slice, &records, &positions);
        }
    }
    vec![]
}

fn moves_for_slice(
    slice: &[&str],
    records: &HashMap<&str, &VersionRecord>,
    positions: &HashMap<&str, usize>,
) -> Vec<MoveOperation> {
    let mut moves = Vec::new();
    for pair in slice.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if is_first_build(curr) {
            continue;
        }
        let (Some(&prev_rec), Some(&curr_rec)) = (records.get(prev), records.get(curr)) else {
            continue;
        };
        if positions[curr] == positions[prev] + 1 {
            continue;
        }
        moves.push(MoveOperation {
            to_move: curr_rec.clone(),
            place_after: prev_rec.clone(),
        });
    }
    moves
}
