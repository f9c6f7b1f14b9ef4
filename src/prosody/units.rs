/// Kana that modify the preceding mora instead of forming one:
/// small tsu, small ya/yu/yo and the long vowel mark.
pub const MODIFIERS: [char; 5] = ['っ', 'ゃ', 'ゅ', 'ょ', 'ー'];

/// Punctuation dropped before fusion and before word segmentation.
pub const PUNCTUATION: [char; 10] = ['?', ',', '.', '!', '、', '。', '？', '！', '「', '」'];

pub fn is_modifier(ch: char) -> bool {
    MODIFIERS.contains(&ch)
}

fn is_noise(ch: char) -> bool {
    ch.is_whitespace() || PUNCTUATION.contains(&ch)
}

/// Drop whitespace and punctuation from candidate text.
pub fn clean_text(text: &str) -> String {
    text.chars().filter(|&ch| !is_noise(ch)).collect()
}

/// Split a reading into mora units, fusing each modifier onto the unit before it.
///
/// A modifier with nothing before it stands as its own unit.
pub fn fuse_units(reading: &str) -> Vec<String> {
    let mut units: Vec<String> = Vec::new();
    for ch in reading.chars() {
        match units.last_mut() {
            Some(last) if is_modifier(ch) => last.push(ch),
            _ => units.push(ch.to_string()),
        }
    }
    units
}

/// True if `text` has an ASCII or full-width decimal digit.
///
/// Other numeric characters (`〇`, `Ⅲ`, `½`) are read as words and allowed.
pub fn contains_digit(text: &str) -> bool {
    text.chars()
        .any(|ch| ch.is_ascii_digit() || ('０'..='９').contains(&ch))
}

/// Mora length of a word, with modifiers never counted.
pub fn word_length(reading: &str) -> usize {
    reading.chars().filter(|&ch| !is_modifier(ch)).count()
}

/// Number of characters in a unit.
pub fn unit_width(unit: &str) -> usize {
    unit.chars().count()
}
