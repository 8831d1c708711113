//! Lineage classification
//!
//! A lineage is the set of version names sharing a major number that must
//! appear contiguously and monotonically in the remote list. Dotted names
//! join a lineage only when their dotted arity exactly matches the caller's
//! parts scheme (2-part projects like `450.3` never mix with 3-part ones
//! like `140.0.3`); release branch names join by their embedded major.

use indexmap::IndexMap;

use crate::version::compare::compare_names;
use crate::version::tokens::{Scheme, VersionParser};

/// Groups version names into per-major lineages in desired order.
pub struct LineageClassifier {
    parser: VersionParser,
}

impl LineageClassifier {
    pub fn new() -> Self {
        Self {
            parser: VersionParser::new(),
        }
    }

    pub fn parser(&self) -> &VersionParser {
        &self.parser
    }

    /// Partition `names` by major, restricted to the majors the caller is
    /// interested in, and sort each group into its desired order. Majors
    /// with no member names are omitted.
    pub fn classify(
        &self,
        names: &[String],
        majors: &[i64],
        parts_scheme: usize,
    ) -> IndexMap<i64, Vec<String>> {
        let mut lineages = IndexMap::new();
        for &major in majors {
            let mut members: Vec<String> = names
                .iter()
                .filter(|name| self.belongs_to(name, major, parts_scheme))
                .cloned()
                .collect();
            if members.is_empty() {
                continue;
            }
            members.sort_by(|a, b| compare_names(&self.parser, a, b));
            lineages.insert(major, members);
        }
        lineages
    }

    /// Membership test: matching major, and for dotted names a dotted arity
    /// equal to the parts scheme. Names with a different arity are excluded,
    /// not coerced.
    fn belongs_to(&self, name: &str, major: i64, parts_scheme: usize) -> bool {
        let parsed = self.parser.parse(name);
        if parsed.major() != Some(major) {
            return false;
        }
        match parsed.scheme {
            Scheme::Dotted | Scheme::DottedPreRelease => {
                parsed.dotted_arity() == Some(parts_scheme)
            }
            Scheme::ReleaseBranch => true,
            Scheme::Unparseable => false,
        }
    }
}

impl Default for LineageClassifier {
    fn default() -> Self {
        Self::new()
    }
}
