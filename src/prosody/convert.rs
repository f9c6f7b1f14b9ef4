use serde::{Deserialize, Serialize};

use super::units::clean_text;
use crate::error::ProsodyError;
use crate::{ScriptConverter, WordSegmenter};

/// A source fragment and its phonetic (hiragana) reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingToken {
    pub orig: String,
    pub hira: String,
}

/// Join token readings and drop whitespace and punctuation.
pub fn reading_text(tokens: &[ReadingToken]) -> String {
    let joined: String = tokens.iter().map(|t| t.hira.as_str()).collect();
    clean_text(&joined)
}

/// Dictionary-backed converter: kanji, katakana and kana text to hiragana
/// via the `kakasi` readings dictionary.
#[cfg(feature = "kakasi")]
#[derive(Debug, Clone, Copy, Default)]
pub struct KakasiConverter;

#[cfg(feature = "kakasi")]
impl ScriptConverter for KakasiConverter {
    fn convert(&self, text: &str) -> Result<Vec<ReadingToken>, ProsodyError> {
        let converted = kakasi::convert(text);
        Ok(vec![ReadingToken {
            orig: text.to_string(),
            hira: converted.hiragana,
        }])
    }
}

/// Converter used by [`LyricPipeline::new`](crate::pipeline::LyricPipeline::new).
#[cfg(feature = "kakasi")]
pub type DefaultConverter = KakasiConverter;

/// Converter used by [`LyricPipeline::new`](crate::pipeline::LyricPipeline::new).
#[cfg(not(feature = "kakasi"))]
pub type DefaultConverter = KanaConverter;

/// Lightweight fallback converter: folds katakana into hiragana and passes
/// every other character through unchanged, one token per character.
///
/// Kanji come back as-is and count as one unit each, so this is only accurate
/// for kana text. Use [`KakasiConverter`] (feature `kakasi`) for real decoder
/// output.
#[derive(Debug, Clone, Copy, Default)]
pub struct KanaConverter;

const KATAKANA_START: u32 = 0x30A1;
const KATAKANA_END: u32 = 0x30F6;
const KANA_OFFSET: u32 = 0x60;

pub fn katakana_to_hiragana(ch: char) -> char {
    let code = ch as u32;
    if (KATAKANA_START..=KATAKANA_END).contains(&code) {
        char::from_u32(code - KANA_OFFSET).unwrap_or(ch)
    } else {
        ch
    }
}

impl ScriptConverter for KanaConverter {
    fn convert(&self, text: &str) -> Result<Vec<ReadingToken>, ProsodyError> {
        Ok(text
            .chars()
            .map(|ch| ReadingToken {
                orig: ch.to_string(),
                hira: katakana_to_hiragana(ch).to_string(),
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptClass {
    Hiragana,
    Katakana,
    Kanji,
    Other,
}

fn script_class(ch: char) -> ScriptClass {
    match ch as u32 {
        0x3041..=0x309F => ScriptClass::Hiragana,
        0x30A0..=0x30FF | 0x31F0..=0x31FF | 0xFF66..=0xFF9F => ScriptClass::Katakana,
        0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0x3005 => ScriptClass::Kanji,
        _ => ScriptClass::Other,
    }
}

/// Lightweight fallback word segmenter that cuts wherever the script class
/// changes.
///
/// `ー` stays attached to the run before it. Okurigana are cut off their kanji
/// stem (`好きです` → `好`, `きです`); plug a morphological analyzer in through
/// [`WordSegmenter`] when word boundaries matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptRunSegmenter;

impl WordSegmenter for ScriptRunSegmenter {
    fn segment_words(&self, text: &str) -> Result<Vec<String>, ProsodyError> {
        let mut words: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_class: Option<ScriptClass> = None;

        for ch in text.chars() {
            if ch.is_whitespace() {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                current_class = None;
                continue;
            }

            let class = script_class(ch);
            let continues = ch == 'ー' || current_class == Some(class);
            if !continues && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            if !continues || current_class.is_none() {
                current_class = Some(class);
            }
            current.push(ch);
        }

        if !current.is_empty() {
            words.push(current);
        }
        Ok(words)
    }
}
