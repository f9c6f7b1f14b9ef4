use super::convert::reading_text;
use super::units::{clean_text, word_length};
use crate::error::ProsodyError;
use crate::{ScriptConverter, WordSegmenter};

/// Topic particle, pronounced "wa" when it stands as its own word.
const TOPIC_MARKER: &str = "は";
const TOPIC_MARKER_READING: &str = "わ";

/// A word of the selected lyric with its reading and mora length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricWord {
    pub reading: String,
    pub length: usize,
}

/// Split the selected text into words and measure each one in morae.
///
/// The text is cleaned, segmented into words and each word converted to its
/// reading. A word whose whole reading is the topic particle `は` is read as
/// `わ` when `topic_marker_substitution` is set. Modifier kana never count.
pub fn lyric_words<C, W>(
    text: &str,
    converter: &C,
    segmenter: &W,
    topic_marker_substitution: bool,
) -> Result<Vec<LyricWord>, ProsodyError>
where
    C: ScriptConverter + ?Sized,
    W: WordSegmenter + ?Sized,
{
    let cleaned = clean_text(text);
    let mut words = Vec::new();

    for word in segmenter.segment_words(&cleaned)? {
        let mut reading = reading_text(&converter.convert(&word)?);

        if topic_marker_substitution && reading == TOPIC_MARKER {
            reading = TOPIC_MARKER_READING.to_string();
        }

        let length = word_length(&reading);
        words.push(LyricWord { reading, length });
    }

    log::debug!("Lyric words: {words:?}");
    Ok(words)
}

/// Per-word mora lengths of `text`, in word order.
pub fn word_lengths<C, W>(
    text: &str,
    converter: &C,
    segmenter: &W,
    topic_marker_substitution: bool,
) -> Result<Vec<usize>, ProsodyError>
where
    C: ScriptConverter + ?Sized,
    W: WordSegmenter + ?Sized,
{
    Ok(lyric_words(text, converter, segmenter, topic_marker_substitution)?
        .into_iter()
        .map(|w| w.length)
        .collect())
}
