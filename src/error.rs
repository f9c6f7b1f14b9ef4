/// Errors produced while segmenting pronunciations or matching lyric candidates.
#[derive(thiserror::Error, Debug)]
pub enum ProsodyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Pronunciation has no phonemes")]
    EmptyPronunciation,
    #[error("Invalid pronunciation dictionary: {0}")]
    Dictionary(String),
    #[error(
        "No candidate reaches {target_count} units without digits \
         ({candidates} candidates considered)"
    )]
    NoEligibleCandidate {
        target_count: usize,
        candidates: usize,
    },
    #[error("Cannot grow {unit_count} units to {target_count}; adjustment only merges")]
    TargetAboveUnitCount {
        unit_count: usize,
        target_count: usize,
    },
    #[error(
        "Cannot shrink further: {remaining} merges still needed but every unit in {units:?} \
         is already fused"
    )]
    AdjustmentStalled { remaining: usize, units: Vec<String> },
    /// Raised by external [`ScriptConverter`](crate::ScriptConverter) implementations.
    #[error("Script conversion failed: {0}")]
    Conversion(String),
    /// Raised by external [`WordSegmenter`](crate::WordSegmenter) implementations.
    #[error("Word segmentation failed: {0}")]
    Segmentation(String),
    #[error("Candidate generation failed: {0}")]
    Generator(String),
    #[error("Invalid pipeline params: {0}")]
    Config(String),
}
