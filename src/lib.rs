//! # lyric-prosody
//!
//! A Rust library that fits translated lyrics to the rhythm of the sung
//! original.
//!
//! ## Features
//!
//! - **Syllable segmentation**: ARPABET pronunciations split into syllables by
//!   positional rules, no syllable-boundary dictionary needed
//! - **Mora matching**: picks the translation candidate whose mora count is
//!   closest to (and not below) the English syllable count
//! - **Shrink to target**: merges adjacent morae until the count matches exactly
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! lyric-prosody = "2026.2"
//! ```
//!
//! ```ignore
//! use std::path::Path;
//! use lyric_prosody::{
//!     pipeline::{LyricPipeline, PipelineParams},
//!     syllables::PronunciationDictionary,
//!     FixedCandidates,
//! };
//!
//! let dictionary = PronunciationDictionary::load(Path::new("cmudict.dict"))?;
//! let pipeline = LyricPipeline::new(&dictionary, PipelineParams::default());
//! let mut generator = FixedCandidates::load(Path::new("candidates.json"))?;
//!
//! let output = pipeline.run("Never gonna give you up", &mut generator)?;
//! output.write_to_dir(Path::new("files"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod output;
pub mod pipeline;
pub mod prosody;
pub mod syllables;

use std::path::Path;

pub use error::ProsodyError;
use prosody::{GeneratedSequence, ReadingToken};
use syllables::Pronunciation;

/// Lookup of a word's pronunciation variants.
///
/// Words arrive lowercased with internal apostrophes kept. `None` means the
/// word is unknown and is skipped.
pub trait PronunciationSource {
    fn pronunciations(&self, word: &str) -> Option<&[Pronunciation]>;
}

/// Conversion of candidate text into phonetic (hiragana) reading tokens.
pub trait ScriptConverter {
    fn convert(&self, text: &str) -> Result<Vec<ReadingToken>, ProsodyError>;
}

/// Splitting of cleaned candidate text into words.
pub trait WordSegmenter {
    fn segment_words(&self, text: &str) -> Result<Vec<String>, ProsodyError>;
}

/// Common interface for translation candidate generators.
///
/// `target_hint` is the desired unit count; generators may use it to steer
/// decoding but are not bound by it.
pub trait CandidateGenerator {
    /// Generate scored candidate translations of `source`.
    fn generate(
        &mut self,
        source: &str,
        target_hint: usize,
    ) -> Result<Vec<GeneratedSequence>, Box<dyn std::error::Error>>;
}

/// Generator that replays a fixed list of pre-decoded candidates.
#[derive(Debug, Clone, Default)]
pub struct FixedCandidates {
    sequences: Vec<GeneratedSequence>,
}

impl FixedCandidates {
    pub fn new(sequences: Vec<GeneratedSequence>) -> Self {
        Self { sequences }
    }

    /// Load candidates from a JSON array of `{ "text", "token_log_probs" }` objects.
    pub fn load(path: &Path) -> Result<Self, ProsodyError> {
        let content = std::fs::read_to_string(path)?;
        let sequences: Vec<GeneratedSequence> = serde_json::from_str(&content)?;
        log::info!(
            "Loaded {} candidates from {}",
            sequences.len(),
            path.display()
        );
        Ok(Self { sequences })
    }
}

impl CandidateGenerator for FixedCandidates {
    fn generate(
        &mut self,
        _source: &str,
        _target_hint: usize,
    ) -> Result<Vec<GeneratedSequence>, Box<dyn std::error::Error>> {
        Ok(self.sequences.clone())
    }
}
