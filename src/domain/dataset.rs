use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Identifies one benchmark corpus: a kind plus a (country, language, script) locale key.
///
/// The parts are used verbatim, no validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetKey {
    pub kind: String,
    pub country: String,
    pub language: String,
    pub script: String,
}

/// Which of the two corpora published per dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusVariant {
    Full,
    Sample,
}

impl CorpusVariant {
    /// Download order
    pub const ALL: [CorpusVariant; 2] = [CorpusVariant::Full, CorpusVariant::Sample];

    fn suffix(self) -> &'static str {
        match self {
            CorpusVariant::Full => "",
            CorpusVariant::Sample => "_sample",
        }
    }
}

impl std::fmt::Display for CorpusVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorpusVariant::Full => write!(f, "full"),
            CorpusVariant::Sample => write!(f, "sample"),
        }
    }
}

impl DatasetKey {
    pub fn new(
        kind: impl Into<String>,
        country: impl Into<String>,
        language: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            country: country.into(),
            language: language.into(),
            script: script.into(),
        }
    }

    /// `{country}_{language}_{script}`
    pub fn stem(&self) -> String {
        format!("{}_{}_{}", self.country, self.language, self.script)
    }

    /// Name of the extracted corpus file
    pub fn corpus_name(&self, variant: CorpusVariant) -> String {
        format!("{}{}.txt", self.stem(), variant.suffix())
    }

    /// Name of the compressed object as published remotely
    pub fn archive_name(&self, variant: CorpusVariant) -> String {
        format!("{}.gz", self.corpus_name(variant))
    }

    pub fn remote_key(&self, remote_root: &str, variant: CorpusVariant) -> String {
        format!(
            "{}/{}/{}",
            remote_root.trim_end_matches('/'),
            self.kind,
            self.archive_name(variant)
        )
    }

    pub fn kind_dir(&self, scratch_root: &Path) -> PathBuf {
        scratch_root.join(&self.kind)
    }

    pub fn archive_path(&self, scratch_root: &Path, variant: CorpusVariant) -> PathBuf {
        self.kind_dir(scratch_root).join(self.archive_name(variant))
    }

    pub fn corpus_path(&self, scratch_root: &Path, variant: CorpusVariant) -> PathBuf {
        self.kind_dir(scratch_root).join(self.corpus_name(variant))
    }

    /// Path prefix handed to the benchmark runner, which appends `.txt` / `_sample.txt` itself
    pub fn bench_prefix(&self, scratch_root: &Path) -> PathBuf {
        self.kind_dir(scratch_root).join(self.stem())
    }
}

impl std::fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind, self.stem())
    }
}
