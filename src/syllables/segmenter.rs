use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProsodyError;

/// Palatal glide that triggers onset reattachment after segmentation.
pub const GLIDE_SYMBOL: &str = "Y";

/// One ARPABET-style pronunciation unit.
///
/// A phoneme carrying a stress marker is a vowel nucleus; a bare symbol is a
/// consonant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phoneme {
    pub symbol: String,
    pub stress: Option<u8>,
}

impl Phoneme {
    /// Parse a dictionary token such as `"EH1"` or `"N"`.
    ///
    /// A trailing ASCII digit is taken as the stress marker and stripped from
    /// the symbol.
    pub fn parse(token: &str) -> Self {
        match token.chars().next_back() {
            Some(last) if last.is_ascii_digit() && token.len() > 1 => Self {
                symbol: token[..token.len() - 1].to_string(),
                stress: last.to_digit(10).map(|d| d as u8),
            },
            _ => Self {
                symbol: token.to_string(),
                stress: None,
            },
        }
    }

    pub fn is_vowel(&self) -> bool {
        self.stress.is_some()
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stress {
            Some(stress) => write!(f, "{}{}", self.symbol, stress),
            None => f.write_str(&self.symbol),
        }
    }
}

/// One way to say a word.
pub type Pronunciation = Vec<Phoneme>;

/// Parse a whitespace-separated phoneme string (`"N EH1 V ER0"`).
pub fn parse_pronunciation(text: &str) -> Pronunciation {
    text.split_whitespace().map(Phoneme::parse).collect()
}

/// A group of phonemes around (ideally) one vowel nucleus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllable {
    phonemes: Vec<Phoneme>,
}

impl Syllable {
    /// Bare symbols in order, stress markers stripped.
    pub fn symbols(&self) -> Vec<&str> {
        self.phonemes.iter().map(|p| p.symbol.as_str()).collect()
    }

    pub fn phonemes(&self) -> &[Phoneme] {
        &self.phonemes
    }

    pub fn len(&self) -> usize {
        self.phonemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phonemes.is_empty()
    }

    fn starts_with_glide(&self) -> bool {
        self.phonemes
            .first()
            .is_some_and(|p| p.symbol == GLIDE_SYMBOL)
    }

    fn ends_with_consonant(&self) -> bool {
        self.phonemes.last().is_some_and(|p| !p.is_vowel())
    }
}

/// Renders as space-joined bare symbols, e.g. `"N EH"`.
impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols().join(" "))
    }
}

/// Split a pronunciation into syllables using positional rules.
///
/// Single left-to-right pass with two phonemes of lookahead:
/// - after a vowel, break when the next phoneme is a vowel, or when exactly one
///   consonant separates it from the next vowel (that consonant opens the next
///   syllable);
/// - after a consonant in a syllable that already has a vowel, break when the
///   following consonant is the last one before a vowel.
///
/// Syllables that open with the glide `Y` then take the trailing consonant of a
/// longer (3+ phoneme) previous syllable as their onset.
///
/// Never fails for a non-empty input: a pronunciation with no vowel comes back
/// as a single syllable.
pub fn segment(pronunciation: &[Phoneme]) -> Result<Vec<Syllable>, ProsodyError> {
    if pronunciation.is_empty() {
        return Err(ProsodyError::EmptyPronunciation);
    }

    let is_vowel_at = |idx: usize| pronunciation.get(idx).is_some_and(Phoneme::is_vowel);

    let mut syllables = vec![Syllable::default()];
    let mut vowel_seen = false;

    for (i, phoneme) in pronunciation.iter().enumerate() {
        if let Some(current) = syllables.last_mut() {
            current.phonemes.push(phoneme.clone());
        }

        let is_vowel = phoneme.is_vowel();
        vowel_seen |= is_vowel;

        let next_is_vowel = is_vowel_at(i + 1);
        let next_next_is_vowel = is_vowel_at(i + 2);
        let one_consonant_then_vowel = !next_is_vowel && next_next_is_vowel;

        let boundary = if is_vowel {
            next_is_vowel || one_consonant_then_vowel
        } else {
            vowel_seen && one_consonant_then_vowel
        };

        if boundary {
            syllables.push(Syllable::default());
            vowel_seen = false;
        }
    }

    reattach_glide_onsets(&mut syllables);
    syllables.retain(|s| !s.is_empty());
    Ok(syllables)
}

fn reattach_glide_onsets(syllables: &mut [Syllable]) {
    for idx in 1..syllables.len() {
        let (before, after) = syllables.split_at_mut(idx);
        let previous = &mut before[idx - 1];
        let current = &mut after[0];

        if current.starts_with_glide() && previous.len() > 2 && previous.ends_with_consonant() {
            if let Some(moved) = previous.phonemes.pop() {
                current.phonemes.insert(0, moved);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_pronunciation, segment, Phoneme};
    use crate::error::ProsodyError;

    fn symbols(text: &str) -> Vec<Vec<String>> {
        segment(&parse_pronunciation(text))
            .expect("non-empty pronunciation should segment")
            .iter()
            .map(|s| s.symbols().into_iter().map(String::from).collect())
            .collect()
    }

    fn syl(parts: &[&[&str]]) -> Vec<Vec<String>> {
        parts
            .iter()
            .map(|p| p.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn parses_stress_marker() {
        let p = Phoneme::parse("EH1");
        assert_eq!(p.symbol, "EH");
        assert_eq!(p.stress, Some(1));
        assert!(p.is_vowel());

        let c = Phoneme::parse("N");
        assert_eq!(c.stress, None);
        assert!(!c.is_vowel());
        assert_eq!(c.to_string(), "N");
        assert_eq!(p.to_string(), "EH1");
    }

    #[test]
    fn splits_never() {
        assert_eq!(symbols("N EH1 V ER0"), syl(&[&["N", "EH"], &["V", "ER"]]));
    }

    #[test]
    fn splits_between_adjacent_vowels() {
        assert_eq!(
            symbols("K R IY1 EY2 T"),
            syl(&[&["K", "R", "IY"], &["EY", "T"]])
        );
    }

    #[test]
    fn defers_second_consonant_of_cluster() {
        // "winter": the N stays, the T opens the next syllable
        assert_eq!(
            symbols("W IH1 N T ER0"),
            syl(&[&["W", "IH", "N"], &["T", "ER"]])
        );
    }

    #[test]
    fn moves_consonant_before_glide() {
        // "canyon": N is pulled in front of Y
        assert_eq!(
            symbols("K AE1 N Y AH0 N"),
            syl(&[&["K", "AE"], &["N", "Y", "AH", "N"]])
        );
    }

    #[test]
    fn glide_leaves_short_previous_syllable_alone() {
        // "onion": previous syllable has only two symbols
        assert_eq!(
            symbols("AH1 N Y AH0 N"),
            syl(&[&["AH", "N"], &["Y", "AH", "N"]])
        );
    }

    #[test]
    fn glide_leaves_vowel_final_syllable_alone() {
        assert_eq!(
            symbols("S T R IY1 Y UW1"),
            syl(&[&["S", "T", "R", "IY"], &["Y", "UW"]])
        );
    }

    #[test]
    fn no_vowel_yields_single_syllable() {
        assert_eq!(symbols("HH M"), syl(&[&["HH", "M"]]));
    }

    #[test]
    fn single_vowel_word() {
        assert_eq!(symbols("AY1"), syl(&[&["AY"]]));
    }

    #[test]
    fn empty_pronunciation_is_an_error() {
        assert!(matches!(
            segment(&[]),
            Err(ProsodyError::EmptyPronunciation)
        ));
    }

    #[test]
    fn preserves_every_symbol_in_order() {
        let inputs = [
            "B AH0 N AE1 N AH0",
            "IH2 N T ER0 N AE1 SH AH0 N AH0 L",
            "S T R EH1 NG K TH S",
            "K AE1 N Y AH0 N",
            "AY1 OW1 AH0",
            "HH M",
            "EH1 K S T R AH0",
        ];
        for input in inputs {
            let pron = parse_pronunciation(input);
            let syllables = segment(&pron).expect("should segment");
            assert!(!syllables.is_empty(), "{input}: no syllables");
            assert!(
                syllables.iter().all(|s| !s.is_empty()),
                "{input}: empty syllable in {syllables:?}"
            );
            let flattened: Vec<&str> = syllables.iter().flat_map(|s| s.symbols()).collect();
            let expected: Vec<&str> = pron.iter().map(|p| p.symbol.as_str()).collect();
            assert_eq!(flattened, expected, "{input}: symbols changed");
        }
    }

    #[test]
    fn displays_space_joined_symbols() {
        let syllables = segment(&parse_pronunciation("N EH1 V ER0")).expect("should segment");
        let rendered: Vec<String> = syllables.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec!["N EH", "V ER"]);
    }
}
