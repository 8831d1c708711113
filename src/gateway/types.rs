//! Records and wire DTOs for the remote version list

use serde::Deserialize;

/// One version object as JIRA's project-versions endpoint returns it.
/// Unknown fields (`archived`, `released`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteVersion {
    pub id: String,
    pub name: String,
    #[serde(rename = "self")]
    pub self_ref: String,
}

/// Immutable snapshot of one remote version, as of a single fetch. The
/// position is 0-based and assigned from the order the remote returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub id: String,
    pub name: String,
    pub self_ref: String,
    pub position: usize,
}

/// Attach list positions to a fetched response body.
pub fn records_from_wire(raw: Vec<RemoteVersion>) -> Vec<VersionRecord> {
    raw.into_iter()
        .enumerate()
        .map(|(position, v)| VersionRecord {
            id: v.id,
            name: v.name,
            self_ref: v.self_ref,
            position,
        })
        .collect()
}
