use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::segmenter::{parse_pronunciation, segment, Pronunciation};
use crate::error::ProsodyError;
use crate::PronunciationSource;

/// How to choose among a word's pronunciation variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PronunciationSelector {
    /// The first listed variant.
    #[default]
    First,
    /// The first variant whose syllable count is shared by the most variants.
    MostCommon,
    /// The first variant with the fewest syllables.
    Fewest,
}

impl PronunciationSelector {
    /// Pick one pronunciation out of `variants`, or `None` if there are none.
    pub fn choose<'a>(&self, variants: &'a [Pronunciation]) -> Option<&'a Pronunciation> {
        match self {
            Self::First => variants.first(),
            Self::MostCommon => {
                let counts: Vec<usize> = variants.iter().map(syllable_count).collect();
                let mut tally: HashMap<usize, usize> = HashMap::new();
                for &count in &counts {
                    *tally.entry(count).or_default() += 1;
                }
                // max_by_key keeps the last maximum, so scan in reverse to favor earlier variants
                counts
                    .iter()
                    .enumerate()
                    .rev()
                    .max_by_key(|(_, count)| tally[*count])
                    .map(|(idx, _)| &variants[idx])
            }
            Self::Fewest => variants
                .iter()
                .enumerate()
                .min_by_key(|(idx, p)| (syllable_count(p), *idx))
                .map(|(_, p)| p),
        }
    }
}

fn syllable_count(pronunciation: &Pronunciation) -> usize {
    segment(pronunciation).map(|s| s.len()).unwrap_or(0)
}

/// Immutable word → pronunciations table in CMU dictionary format.
///
/// Keys are lowercase; variants keep their file order.
#[derive(Debug, Clone, Default)]
pub struct PronunciationDictionary {
    entries: HashMap<String, Vec<Pronunciation>>,
}

impl PronunciationDictionary {
    /// Load a CMU-format dictionary file.
    pub fn load(path: &Path) -> Result<Self, ProsodyError> {
        let content = std::fs::read_to_string(path)?;
        let dict = Self::parse(&content)?;
        log::info!(
            "Loaded {} words from {}",
            dict.entries.len(),
            path.display()
        );
        Ok(dict)
    }

    /// Parse CMU-format text.
    ///
    /// Lines look like `WORD  P1 P2 ...`; `WORD(2)` marks an alternate variant,
    /// `;;;` starts a comment line and `#` starts a trailing comment.
    pub fn parse(content: &str) -> Result<Self, ProsodyError> {
        let mut entries: HashMap<String, Vec<Pronunciation>> = HashMap::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = strip_comment(line).trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let (head, phones) = line.split_once(char::is_whitespace).ok_or_else(|| {
                ProsodyError::Dictionary(format!("line {}: missing phonemes", line_no + 1))
            })?;

            let pronunciation = parse_pronunciation(phones);
            if pronunciation.is_empty() {
                return Err(ProsodyError::Dictionary(format!(
                    "line {}: missing phonemes for {head:?}",
                    line_no + 1
                )));
            }

            entries
                .entry(strip_variant_marker(head).to_lowercase())
                .or_default()
                .push(pronunciation);
        }

        Ok(Self { entries })
    }

    /// Build from `(word, "P1 P2 ...")` pairs.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut map: HashMap<String, Vec<Pronunciation>> = HashMap::new();
        for (word, phones) in entries {
            let pronunciation = parse_pronunciation(phones);
            if pronunciation.is_empty() {
                continue;
            }
            map.entry(word.to_lowercase()).or_default().push(pronunciation);
        }
        Self { entries: map }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PronunciationSource for PronunciationDictionary {
    fn pronunciations(&self, word: &str) -> Option<&[Pronunciation]> {
        self.entries.get(word).map(Vec::as_slice)
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn strip_variant_marker(head: &str) -> &str {
    match head.find('(') {
        Some(idx) if head.ends_with(')') && idx > 0 => &head[..idx],
        _ => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = ";;; sample entries
NEVER  N EH1 V ER0
EITHER  IY1 DH ER0
EITHER(1)  AY1 DH ER0
DON'T  D OW1 N T
FIRE  F AY1 ER0
FIRE(1)  F AY1 R
FIRE(2)  F AY1 ER0 R
";

    #[test]
    fn parses_words_and_variants() {
        let dict = PronunciationDictionary::parse(SAMPLE).expect("sample should parse");
        assert_eq!(dict.len(), 4);

        let either = dict.pronunciations("either").expect("either should be present");
        assert_eq!(either.len(), 2);
        assert_eq!(either[1][0].symbol, "AY");

        assert!(dict.pronunciations("don't").is_some());
        assert!(dict.pronunciations("NEVER").is_none(), "keys are lowercase");
        assert!(dict.pronunciations("missing").is_none());
    }

    #[test]
    fn ignores_trailing_comments() {
        let dict = PronunciationDictionary::parse(
            "lead L IY1 D\nlead(2) L EH1 D # metal\n# whole-line comment\n",
        )
        .expect("commented entries should parse");
        assert_eq!(dict.len(), 1);

        let lead = dict.pronunciations("lead").expect("lead present");
        assert_eq!(lead.len(), 2);
        let syllables = segment(&lead[1]).expect("should segment");
        let rendered: Vec<String> = syllables.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec!["L EH D"]);
    }

    #[test]
    fn rejects_line_without_phonemes() {
        let err = PronunciationDictionary::parse("NEVER  N EH1 V ER0\nBROKEN\n")
            .expect_err("line without phonemes should fail");
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }

    #[test]
    fn selector_first() {
        let dict = PronunciationDictionary::parse(SAMPLE).expect("sample should parse");
        let fire = dict.pronunciations("fire").expect("fire present");
        let chosen = PronunciationSelector::First.choose(fire).expect("some");
        assert_eq!(chosen, &fire[0]);
    }

    #[test]
    fn selector_fewest_prefers_earliest_minimum() {
        let dict = PronunciationDictionary::parse(SAMPLE).expect("sample should parse");
        let fire = dict.pronunciations("fire").expect("fire present");
        // F AY1 ER0 -> 2 syllables, F AY1 R -> 1, F AY1 ER0 R -> 2
        let chosen = PronunciationSelector::Fewest.choose(fire).expect("some");
        assert_eq!(chosen, &fire[1]);
    }

    #[test]
    fn selector_most_common_prefers_earliest_on_majority() {
        let dict = PronunciationDictionary::parse(SAMPLE).expect("sample should parse");
        let fire = dict.pronunciations("fire").expect("fire present");
        let chosen = PronunciationSelector::MostCommon.choose(fire).expect("some");
        assert_eq!(chosen, &fire[0]);
    }

    #[test]
    fn selector_on_empty_variants() {
        assert!(PronunciationSelector::MostCommon.choose(&[]).is_none());
    }

    #[test]
    fn selector_deserializes_snake_case() {
        let s: PronunciationSelector =
            serde_json::from_str("\"most_common\"").expect("should deserialize");
        assert_eq!(s, PronunciationSelector::MostCommon);
    }
}
