use std::sync::Mutex;

use jira_version_sort::gateway::VersionGateway;
use jira_version_sort::gateway::error::GatewayError;
use jira_version_sort::gateway::types::VersionRecord;
use jira_version_sort::sorter::Sorter;

/// Simulated remote list: applies each move to its own ordering, the way
/// the real tracker shifts positions after every move call.
struct FakeRemote {
    names: Mutex<Vec<String>>,
    moved: Mutex<Vec<String>>,
}

impl FakeRemote {
    fn new(names: &[&str]) -> Self {
        Self {
            names: Mutex::new(names.iter().map(|s| s.to_string()).collect()),
            moved: Mutex::new(Vec::new()),
        }
    }

    fn order(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }

    fn moved_names(&self) -> Vec<String> {
        self.moved.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl VersionGateway for FakeRemote {
    async fn fetch_versions(
        &self,
        _project_key: &str,
    ) -> Result<Vec<VersionRecord>, GatewayError> {
        Ok(self
            .names
            .lock()
            .unwrap()
            .iter()
            .enumerate()
            .map(|(position, name)| VersionRecord {
                id: name.clone(),
                name: name.clone(),
                self_ref: format!("fake://{name}"),
                position,
            })
            .collect())
    }

    async fn move_version(
        &self,
        to_move: &VersionRecord,
        place_after: &VersionRecord,
    ) -> Result<(), GatewayError> {
        let mut names = self.names.lock().unwrap();
        let from = names
            .iter()
            .position(|n| *n == to_move.name)
            .ok_or_else(|| GatewayError::InvalidResponse(to_move.name.clone()))?;
        let name = names.remove(from);
        let after = names
            .iter()
            .position(|n| *n == place_after.name)
            .ok_or_else(|| GatewayError::InvalidResponse(place_after.name.clone()))?;
        names.insert(after + 1, name);
        self.moved.lock().unwrap().push(to_move.name.clone());
        Ok(())
    }
}

#[tokio::test]
async fn run_repairs_a_displaced_patch_and_leaves_other_lineages_alone() {
    let remote = FakeRemote::new(&["141.0.0", "140.0.2", "140.0.0", "140.0.1"]);
    let sorter = Sorter::new(remote);

    let moved = sorter.run("TEST", &[140, 141], 3).await.unwrap();

    assert_eq!(moved, 1);
    let remote = sorter.into_gateway();
    assert_eq!(
        remote.order(),
        vec!["141.0.0", "140.0.0", "140.0.1", "140.0.2"]
    );
}

#[tokio::test]
async fn run_sorts_a_fully_reversed_lineage() {
    let remote = FakeRemote::new(&["140.0.3", "140.0.2", "140.0.1", "140.0.0"]);
    let sorter = Sorter::new(remote);

    let moved = sorter.run("TEST", &[140], 3).await.unwrap();

    assert_eq!(moved, 3);
    let remote = sorter.into_gateway();
    assert_eq!(
        remote.order(),
        vec!["140.0.0", "140.0.1", "140.0.2", "140.0.3"]
    );
}

#[tokio::test]
async fn run_is_idempotent_on_an_ordered_list() {
    let remote = FakeRemote::new(&["140.0.0", "140.0.1", "140.0.2"]);
    let sorter = Sorter::new(remote);

    assert_eq!(sorter.run("TEST", &[140], 3).await.unwrap(), 0);
    assert_eq!(sorter.run("TEST", &[140], 3).await.unwrap(), 0);
    assert!(sorter.into_gateway().moved_names().is_empty());
}

#[tokio::test]
async fn run_never_moves_the_lineage_anchor() {
    // the first build drifted to the end of its run
    let remote = FakeRemote::new(&["140.0.1", "140.0.2", "140.0.0"]);
    let sorter = Sorter::new(remote);

    let moved = sorter.run("TEST", &[140], 3).await.unwrap();

    assert_eq!(moved, 2);
    let remote = sorter.into_gateway();
    assert_eq!(remote.order(), vec!["140.0.0", "140.0.1", "140.0.2"]);
    assert!(!remote.moved_names().contains(&"140.0.0".to_string()));
}

#[tokio::test]
async fn run_orders_branches_within_the_lineage() {
    let remote = FakeRemote::new(&[
        "140.1.1",
        "140.0.3",
        "140.0.0",
        "Release (release/140_0_codename)",
    ]);
    let sorter = Sorter::new(remote);

    let moved = sorter.run("TEST", &[140], 3).await.unwrap();

    assert_eq!(moved, 3);
    let remote = sorter.into_gateway();
    assert_eq!(
        remote.order(),
        vec![
            "140.0.0",
            "140.0.3",
            "Release (release/140_0_codename)",
            "140.1.1",
        ]
    );
}

#[tokio::test]
async fn run_leaves_a_pre_release_sitting_before_its_release() {
    let remote = FakeRemote::new(&["140.0.0-nightly1", "140.0.0", "140.0.1"]);
    let sorter = Sorter::new(remote);

    assert_eq!(sorter.run("TEST", &[140], 3).await.unwrap(), 0);
}
