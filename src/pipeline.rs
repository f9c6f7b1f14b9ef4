use std::path::Path;

use derive_builder::Builder;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::ProsodyError;
use crate::prosody::{
    adjust, select, word_lengths, Candidate, DefaultConverter, GeneratedSequence,
    ScriptRunSegmenter, SelectionResult,
};
use crate::syllables::{
    process_transcript, PronunciationDictionary, PronunciationSelector, SyllablePlan,
};
use crate::{CandidateGenerator, PronunciationSource, ScriptConverter, WordSegmenter};

/// Parameters for a lyric matching run.
///
/// ```rust
/// use lyric_prosody::pipeline::PipelineParamsBuilder;
/// use lyric_prosody::syllables::PronunciationSelector;
///
/// let params = PipelineParamsBuilder::default()
///     .pronunciation_selector(PronunciationSelector::MostCommon)
///     .seed(7)
///     .build()?;
/// assert!(params.topic_marker_substitution);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct PipelineParams {
    /// Which dictionary variant to segment when a word has several.
    pub pronunciation_selector: PronunciationSelector,
    /// Seed for the merge order during adjustment. `None` = OS entropy.
    #[builder(setter(strip_option))]
    pub seed: Option<u64>,
    /// Read a standalone `は` as `わ` when measuring words.
    pub topic_marker_substitution: bool,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            pronunciation_selector: PronunciationSelector::First,
            seed: None,
            topic_marker_substitution: true,
        }
    }
}

impl PipelineParams {
    /// Load params from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ProsodyError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl From<PipelineParamsBuilderError> for ProsodyError {
    fn from(e: PipelineParamsBuilderError) -> Self {
        ProsodyError::Config(e.to_string())
    }
}

/// The adjusted lyric for one target count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricMatch {
    pub target_count: usize,
    pub selection: SelectionResult,
    pub word_lengths: Vec<usize>,
}

/// Everything a run produces: the syllable table and the matched lyric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricOutput {
    pub plan: SyllablePlan,
    pub lyric: LyricMatch,
}

/// Transcript → syllable count → candidate selection → adjusted lyric.
///
/// The pronunciation source is borrowed; it is loaded once and shared.
pub struct LyricPipeline<
    'a,
    S: ?Sized = PronunciationDictionary,
    C = DefaultConverter,
    W = ScriptRunSegmenter,
> {
    source: &'a S,
    converter: C,
    segmenter: W,
    params: PipelineParams,
}

impl<'a, S> LyricPipeline<'a, S>
where
    S: PronunciationSource + ?Sized,
{
    /// Create a pipeline with the default converter (kakasi when the feature is
    /// on, kana-only otherwise) and the script-run segmenter.
    pub fn new(source: &'a S, params: PipelineParams) -> Self {
        Self {
            source,
            converter: DefaultConverter::default(),
            segmenter: ScriptRunSegmenter,
            params,
        }
    }
}

impl<'a, S, C, W> LyricPipeline<'a, S, C, W>
where
    S: PronunciationSource + ?Sized,
    C: ScriptConverter,
    W: WordSegmenter,
{
    /// Swap in a different script converter.
    pub fn with_converter<C2: ScriptConverter>(self, converter: C2) -> LyricPipeline<'a, S, C2, W> {
        LyricPipeline {
            source: self.source,
            converter,
            segmenter: self.segmenter,
            params: self.params,
        }
    }

    /// Swap in a different word segmenter.
    pub fn with_segmenter<W2: WordSegmenter>(self, segmenter: W2) -> LyricPipeline<'a, S, C, W2> {
        LyricPipeline {
            source: self.source,
            converter: self.converter,
            segmenter,
            params: self.params,
        }
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Syllable table and total count for a transcript.
    pub fn syllable_plan(&self, transcript: &str) -> SyllablePlan {
        process_transcript(transcript, self.source, self.params.pronunciation_selector)
    }

    /// Convert generated sequences into unit-split candidates.
    pub fn score_candidates(
        &self,
        sequences: &[GeneratedSequence],
    ) -> Result<Vec<Candidate>, ProsodyError> {
        sequences
            .iter()
            .map(|seq| {
                let candidate = Candidate::from_generated(seq, &self.converter)?;
                log::debug!(
                    "Candidate {:?}: {} units, p={:.4}",
                    candidate.text,
                    candidate.unit_count(),
                    candidate.probability
                );
                Ok(candidate)
            })
            .collect()
    }

    /// Select, adjust and measure the best candidate for `target_count`.
    pub fn match_candidates(
        &self,
        sequences: &[GeneratedSequence],
        target_count: usize,
    ) -> Result<LyricMatch, ProsodyError> {
        let candidates = self.score_candidates(sequences)?;
        let selected = select(&candidates, target_count)?;

        let word_lengths = word_lengths(
            &selected.text,
            &self.converter,
            &self.segmenter,
            self.params.topic_marker_substitution,
        )?;

        let mut rng = self.params.rng();
        let selection = adjust(selected, target_count, &mut rng)?;

        Ok(LyricMatch {
            target_count,
            selection,
            word_lengths,
        })
    }

    /// Run the whole pipeline on a transcript.
    pub fn run<G>(&self, transcript: &str, generator: &mut G) -> Result<LyricOutput, ProsodyError>
    where
        G: CandidateGenerator + ?Sized,
    {
        let plan = self.syllable_plan(transcript);
        let sequences = generator
            .generate(transcript, plan.total_syllables)
            .map_err(|e| ProsodyError::Generator(e.to_string()))?;
        log::info!("Generator returned {} candidates", sequences.len());

        let lyric = self.match_candidates(&sequences, plan.total_syllables)?;
        Ok(LyricOutput { plan, lyric })
    }
}
