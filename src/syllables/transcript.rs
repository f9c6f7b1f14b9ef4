use serde::{Deserialize, Serialize};

use super::dictionary::PronunciationSelector;
use super::segmenter::{segment, Syllable};
use crate::PronunciationSource;

/// One row of the syllable table: a transcript word and its syllables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSyllables {
    pub word: String,
    pub syllables: Vec<Syllable>,
}

/// Per-word syllable breakdown of a transcript plus the total count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllablePlan {
    pub words: Vec<WordSyllables>,
    pub total_syllables: usize,
}

/// Lowercase the transcript, turn ASCII punctuation other than the apostrophe
/// into whitespace, and split into words.
pub fn normalize_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .map(|ch| {
            if ch.is_ascii_punctuation() && ch != '\'' {
                ' '
            } else {
                ch
            }
        })
        .collect();

    cleaned
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Segment every word of `text` that the pronunciation source knows.
///
/// Unknown words and words whose chosen pronunciation fails to segment are
/// skipped; they appear neither in the table nor in the total.
pub fn process_transcript<S>(text: &str, source: &S, selector: PronunciationSelector) -> SyllablePlan
where
    S: PronunciationSource + ?Sized,
{
    let mut plan = SyllablePlan::default();

    for word in normalize_words(text) {
        let Some(pronunciation) = source
            .pronunciations(&word)
            .and_then(|variants| selector.choose(variants))
        else {
            log::debug!("No pronunciation for {word:?}, skipping");
            continue;
        };

        let syllables = match segment(pronunciation) {
            Ok(syllables) => syllables,
            Err(e) => {
                log::warn!("Skipping {word:?}: {e}");
                continue;
            }
        };

        plan.total_syllables += syllables.len();
        plan.words.push(WordSyllables { word, syllables });
    }

    log::info!(
        "Transcript has {} syllables across {} known words",
        plan.total_syllables,
        plan.words.len()
    );
    plan
}
