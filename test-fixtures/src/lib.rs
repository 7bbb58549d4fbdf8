//! Test fixture loader for advisor golden datasets.
//!
//! Provides typed deserialization of the fixture JSON files and helper
//! functions for loading them in tests across crates.

use advisor_core::models::{Document, SearchFilter};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Typed fixtures
// ---------------------------------------------------------------------------

pub const FINANCE_CORPUS: &str = "golden/retrieval/finance_corpus.json";
pub const RETRIEVAL_QUERIES: &str = "golden/retrieval/queries.json";
pub const COMPLIANCE_SAMPLES: &str = "golden/compliance/samples.json";
pub const CLASSIFICATION_QUERIES: &str = "golden/classification/queries.json";

#[derive(Debug, Deserialize)]
struct Corpus {
    documents: Vec<Document>,
}

/// The educational finance corpus.
pub fn finance_corpus() -> Vec<Document> {
    load_fixture::<Corpus>(FINANCE_CORPUS).documents
}

/// A golden retrieval query.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalCase {
    pub query: String,
    #[serde(default)]
    pub filter: Option<SearchFilter>,
    /// Document that must rank first.
    #[serde(default)]
    pub expected_top: Option<String>,
    /// Every result must come from one of these documents.
    #[serde(default)]
    pub expected_only: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RetrievalCases {
    queries: Vec<RetrievalCase>,
}

pub fn retrieval_cases() -> Vec<RetrievalCase> {
    load_fixture::<RetrievalCases>(RETRIEVAL_QUERIES).queries
}

/// A golden compliance sample. Flags are snake_case flag names.
#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceCase {
    pub name: String,
    pub input: String,
    pub jurisdiction: String,
    pub expect_flags: Vec<String>,
    pub must_not_contain: Vec<String>,
    pub approved: bool,
}

#[derive(Debug, Deserialize)]
struct ComplianceCases {
    cases: Vec<ComplianceCase>,
}

pub fn compliance_cases() -> Vec<ComplianceCase> {
    load_fixture::<ComplianceCases>(COMPLIANCE_SAMPLES).cases
}

/// A labelled query for intent classification.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationCase {
    pub query: String,
    pub intent: String,
    #[serde(default)]
    pub low_confidence: bool,
}

#[derive(Debug, Deserialize)]
struct ClassificationCases {
    queries: Vec<ClassificationCase>,
}

pub fn classification_cases() -> Vec<ClassificationCase> {
    load_fixture::<ClassificationCases>(CLASSIFICATION_QUERIES).queries
}
