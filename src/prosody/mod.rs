//! Japanese side of prosody matching: mora units, candidate selection and
//! shrinking to a target length.
//!
//! A candidate's reading is split into mora units; the modifier kana
//! (`っ ゃ ゅ ょ ー`) fuse onto the unit before them. Selection keeps the
//! digit-free candidate with the fewest units not below the target, and
//! adjustment merges adjacent single-character units until the count matches.
//!
//! # Examples
//!
//! ```rust
//! use lyric_prosody::prosody::{adjust, select, Candidate};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let candidates = vec![
//!     Candidate::from_reading("こんにちは", 0.9),
//!     Candidate::from_reading("ありがとうございます", 0.95),
//! ];
//! let selected = select(&candidates, 4)?;
//! let adjusted = adjust(selected, 4, &mut StdRng::seed_from_u64(0))?;
//! assert_eq!(adjusted.units.len(), 4);
//! # Ok::<(), lyric_prosody::ProsodyError>(())
//! ```

pub mod convert;
pub mod matcher;
pub mod units;
pub mod words;

#[cfg(feature = "kakasi")]
pub use convert::KakasiConverter;
pub use convert::{reading_text, DefaultConverter, KanaConverter, ReadingToken, ScriptRunSegmenter};
pub use matcher::{adjust, select, Candidate, GeneratedSequence, SelectionResult};
pub use units::{clean_text, fuse_units, MODIFIERS};
pub use words::{lyric_words, word_lengths, LyricWord};
