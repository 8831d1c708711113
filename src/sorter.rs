//! Per-project reconciliation driver
//!
//! Runs fetch → classify → reconcile → apply as one pass and repeats
//! passes until one of them applies nothing. Moves are applied strictly
//! one at a time: each one shifts the remote positions, and the gateway's
//! snapshot cache is invalidated with it, so the next pass sees the list
//! as the remote now has it.

use tracing::{info, warn};

use crate::gateway::VersionGateway;
use crate::gateway::error::GatewayError;
use crate::gateway::types::VersionRecord;
use crate::version::lineage::LineageClassifier;
use crate::version::reconcile::reconcile;

pub struct Sorter<G> {
    gateway: G,
    classifier: LineageClassifier,
}

impl<G: VersionGateway> Sorter<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            classifier: LineageClassifier::new(),
        }
    }

    /// Consume the sorter and hand back its gateway.
    pub fn into_gateway(self) -> G {
        self.gateway
    }

    /// One reconciliation pass. Returns the number of moves applied;
    /// zero means the requested lineages are already in order. An unknown
    /// project key is terminal but not an error: the pass is skipped.
    pub async fn clean_up_project(
        &self,
        project_key: &str,
        majors: &[i64],
        parts_scheme: usize,
    ) -> Result<usize, GatewayError> {
        let records = match self.gateway.fetch_versions(project_key).await {
            Ok(records) => records,
            Err(GatewayError::ProjectNotFound(key)) => {
                warn!("Skipping unknown project {}", key);
                return Ok(0);
            }
            Err(e) => return Err(e),
        };
        warn_probable_typos(&records);

        let names: Vec<String> = records.iter().map(|r| r.name.trim().to_string()).collect();
        let desired = self.classifier.classify(&names, majors, parts_scheme);
        let moves = reconcile(self.classifier.parser(), &records, &desired);
        for op in &moves {
            self.gateway
                .move_version(&op.to_move, &op.place_after)
                .await?;
        }

        if moves.is_empty() {
            info!(
                "Project {}: nothing to move in versions {:?}",
                project_key, majors
            );
        } else {
            info!("Project {}: moved {} versions", project_key, moves.len());
        }
        Ok(moves.len())
    }

    /// Run passes until one applies zero moves. Returns the total number
    /// of moves applied across all passes.
    pub async fn run(
        &self,
        project_key: &str,
        majors: &[i64],
        parts_scheme: usize,
    ) -> Result<usize, GatewayError> {
        let mut total = 0;
        loop {
            let moved = self
                .clean_up_project(project_key, majors, parts_scheme)
                .await?;
            total += moved;
            if moved == 0 {
                info!("No more versions to move.");
                return Ok(total);
            }
        }
    }
}

/// Remote lists sometimes carry typos like `"140.0.3 "` or `"140. 0.3"`;
/// they are worth a warning but never fatal.
fn warn_probable_typos(records: &[VersionRecord]) {
    for record in records {
        if record.name.contains('.') && record.name.contains(' ') {
            warn!("Probable typo in version name {:?}", record.name);
        }
    }
}
