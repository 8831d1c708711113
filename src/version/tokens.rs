//! Version name tokenizer
//!
//! Turns free-text JIRA version names into comparable integer token tuples.
//! Three naming conventions are recognized, tried in order:
//! - pre-release builds: `140.0.0-nightly3` (dotted prefix plus build number)
//! - plain dotted releases: `140.0.3`
//! - release branches: `Sunflower (release/1969_1_sunflower)`
//!
//! Parsing is total: a name that fits none of the conventions, or fails
//! numeric conversion inside one of them, degrades to a sentinel tuple that
//! sorts to a deterministic extreme instead of aborting the batch.

use regex::Regex;

/// Special value which isn't used in practice (all numbers in real version
/// names are non-negative).
pub const NON_NUMBER: i64 = -100;

/// Appended token for pre-release suffixes without digits and for release
/// branches, so those names sort after the plain releases of the same prefix.
pub const SUFFIX_RANK: i64 = 9000;

/// Naming convention a version name was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `140.0.3`
    Dotted,
    /// `140.0.0-nightly3`
    DottedPreRelease,
    /// `Release (release/140_3_codename)`
    ReleaseBranch,
    /// None of the above; carries the sentinel tuple.
    Unparseable,
}

/// A version name reduced to its comparable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVersion {
    pub tokens: Vec<i64>,
    pub scheme: Scheme,
}

impl ParsedVersion {
    /// Sentinel for names that fit no convention: sorts before every real
    /// tuple, compares safely against anything.
    pub fn sentinel() -> Self {
        Self {
            tokens: vec![NON_NUMBER; 4],
            scheme: Scheme::Unparseable,
        }
    }

    pub fn major(&self) -> Option<i64> {
        match self.scheme {
            Scheme::Unparseable => None,
            _ => self.tokens.first().copied(),
        }
    }

    /// Minor component; names with a single component count as minor 0.
    pub fn minor(&self) -> i64 {
        self.tokens.get(1).copied().unwrap_or(0)
    }

    /// Number of dot-separated numeric parts in the original name, used to
    /// match names against a parts scheme. Release branches have no dotted
    /// parts and unparseable names have no arity at all.
    pub fn dotted_arity(&self) -> Option<usize> {
        match self.scheme {
            Scheme::Dotted => Some(self.tokens.len()),
            // last token is the extracted build number, not a dotted part
            Scheme::DottedPreRelease => Some(self.tokens.len() - 1),
            Scheme::ReleaseBranch | Scheme::Unparseable => None,
        }
    }
}

/// Tokenizer for version names.
///
/// Holds the compiled regexes; construct once and reuse across a batch.
pub struct VersionParser {
    /// First run of digits in a pre-release suffix: `nightly3` -> 3
    digit_run_re: Regex,
    /// Major embedded in a branch name: `release/140_...` -> 140
    branch_major_re: Regex,
    /// Minor delimited by underscores: `release/140_3_codename` -> 3
    branch_minor_re: Regex,
}

impl VersionParser {
    pub fn new() -> Self {
        Self {
            digit_run_re: Regex::new(r"\d+").unwrap(),
            branch_major_re: Regex::new(r"release/(\d+)").unwrap(),
            branch_minor_re: Regex::new(r"_(\d+)_").unwrap(),
        }
    }

    /// Parse a version name. Total: always returns a `ParsedVersion`,
    /// falling back to the sentinel for anything unrecognizable.
    pub fn parse(&self, name: &str) -> ParsedVersion {
        self.match_pre_release(name)
            .or_else(|| self.match_dotted(name))
            .or_else(|| self.match_release_branch(name))
            .unwrap_or_else(ParsedVersion::sentinel)
    }

    /// `140.0.0-nightly3` -> (140, 0, 0, 3). A suffix without digits gets
    /// `SUFFIX_RANK` so plain pre-release tags sort after the release.
    fn match_pre_release(&self, name: &str) -> Option<ParsedVersion> {
        let (dotted, suffix) = name.split_once('-')?;
        let Some(mut tokens) = parse_dotted(dotted) else {
            // hyphen rule applies but the prefix is junk; don't fall
            // through to the other rules
            return Some(ParsedVersion::sentinel());
        };
        let build = self
            .digit_run_re
            .find(suffix)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(SUFFIX_RANK);
        tokens.push(build);
        Some(ParsedVersion {
            tokens,
            scheme: Scheme::DottedPreRelease,
        })
    }

    /// `140.0.3` -> (140, 0, 3). Any non-numeric part fails the whole name.
    fn match_dotted(&self, name: &str) -> Option<ParsedVersion> {
        if !name.contains('.') {
            return None;
        }
        Some(match parse_dotted(name) {
            Some(tokens) => ParsedVersion {
                tokens,
                scheme: Scheme::Dotted,
            },
            None => ParsedVersion::sentinel(),
        })
    }

    /// `Release (release/140_3_codename)` -> (140, 3, SUFFIX_RANK). Missing
    /// minor defaults to 0; a `release/` without a major is unparseable.
    fn match_release_branch(&self, name: &str) -> Option<ParsedVersion> {
        if !name.contains("release/") {
            return None;
        }
        let Some(major) = self
            .branch_major_re
            .captures(name)
            .and_then(|c| c[1].parse().ok())
        else {
            tracing::warn!("Failed to parse release branch name {:?}", name);
            return Some(ParsedVersion::sentinel());
        };
        let minor = self
            .branch_minor_re
            .captures(name)
            .and_then(|c| c[1].parse().ok())
            .unwrap_or(0);
        Some(ParsedVersion {
            tokens: vec![major, minor, SUFFIX_RANK],
            scheme: Scheme::ReleaseBranch,
        })
    }
}

impl Default for VersionParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_dotted(s: &str) -> Option<Vec<i64>> {
    s.split('.').map(|part| part.parse().ok()).collect()
}
