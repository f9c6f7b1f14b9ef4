//! English side of prosody matching: pronunciations to syllables.
//!
//! Pronunciations come from a CMU-format dictionary (ARPABET symbols, vowels
//! carry a stress digit). Each transcript word is looked up, one variant is
//! chosen, and the variant is split into syllables by positional rules. The
//! total syllable count becomes the target unit count for the lyric matcher.
//!
//! # Examples
//!
//! ```rust
//! use lyric_prosody::syllables::{parse_pronunciation, segment};
//!
//! let syllables = segment(&parse_pronunciation("N EH1 V ER0"))?;
//! let rendered: Vec<String> = syllables.iter().map(|s| s.to_string()).collect();
//! assert_eq!(rendered, ["N EH", "V ER"]);
//! # Ok::<(), lyric_prosody::ProsodyError>(())
//! ```

pub mod dictionary;
pub mod segmenter;
pub mod transcript;

pub use dictionary::{PronunciationDictionary, PronunciationSelector};
pub use segmenter::{parse_pronunciation, segment, Phoneme, Pronunciation, Syllable};
pub use transcript::{normalize_words, process_transcript, SyllablePlan, WordSyllables};
