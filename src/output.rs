//! Tabular outputs consumed by the note-alignment stage.
//!
//! Rows are written CRLF-terminated with variable field counts.

use std::fs::File;
use std::path::Path;

use crate::error::ProsodyError;
use crate::pipeline::LyricOutput;
use crate::syllables::SyllablePlan;

pub const SYLLABLE_COUNT_FILE: &str = "syl_count.txt";
pub const SYLLABLES_FILE: &str = "syllables.csv";
pub const LYRIC_UNITS_FILE: &str = "jp_lyrics.csv";
pub const WORD_LENGTHS_FILE: &str = "jp_word_len_list.csv";

fn csv_writer(path: &Path) -> Result<csv::Writer<File>, ProsodyError> {
    Ok(csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_path(path)?)
}

/// Write the total syllable count as a bare integer.
pub fn write_total_count(path: &Path, count: usize) -> Result<(), ProsodyError> {
    std::fs::write(path, count.to_string())?;
    Ok(())
}

/// One row per word: the word, then each syllable as space-joined symbols.
pub fn write_syllable_table(path: &Path, plan: &SyllablePlan) -> Result<(), ProsodyError> {
    let mut writer = csv_writer(path)?;
    for entry in &plan.words {
        let mut record = Vec::with_capacity(entry.syllables.len() + 1);
        record.push(entry.word.clone());
        record.extend(entry.syllables.iter().map(|s| s.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// A single row with one field per unit.
pub fn write_unit_row(path: &Path, units: &[String]) -> Result<(), ProsodyError> {
    let mut writer = csv_writer(path)?;
    writer.write_record(units)?;
    writer.flush()?;
    Ok(())
}

/// A single row of per-word unit lengths.
pub fn write_word_lengths(path: &Path, lengths: &[usize]) -> Result<(), ProsodyError> {
    let mut writer = csv_writer(path)?;
    writer.write_record(lengths.iter().map(|l| l.to_string()))?;
    writer.flush()?;
    Ok(())
}

impl LyricOutput {
    /// Write all four outputs into `dir`, creating it if needed.
    pub fn write_to_dir(&self, dir: &Path) -> Result<(), ProsodyError> {
        std::fs::create_dir_all(dir)?;
        write_total_count(&dir.join(SYLLABLE_COUNT_FILE), self.plan.total_syllables)?;
        write_syllable_table(&dir.join(SYLLABLES_FILE), &self.plan)?;
        write_unit_row(&dir.join(LYRIC_UNITS_FILE), &self.lyric.selection.units)?;
        write_word_lengths(&dir.join(WORD_LENGTHS_FILE), &self.lyric.word_lengths)?;
        log::info!("Wrote lyric outputs to {}", dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::LyricMatch;
    use crate::prosody::SelectionResult;
    use crate::syllables::{process_transcript, PronunciationDictionary, PronunciationSelector};

    fn sample_output() -> LyricOutput {
        let dict = PronunciationDictionary::from_entries([
            ("never", "N EH1 V ER0"),
            ("give", "G IH1 V"),
        ]);
        let plan = process_transcript("Never give", &dict, PronunciationSelector::First);
        LyricOutput {
            plan,
            lyric: LyricMatch {
                target_count: 3,
                selection: SelectionResult {
                    text: "きょう,は".to_string(),
                    probability: 0.5,
                    units: vec!["きょ".to_string(), "うは".to_string(), "ね".to_string()],
                },
                word_lengths: vec![2, 1],
            },
        }
    }

    #[test]
    fn writes_all_outputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out_dir = dir.path().join("files");
        sample_output().write_to_dir(&out_dir).expect("write");

        let read = |name: &str| std::fs::read_to_string(out_dir.join(name)).expect("read");
        assert_eq!(read(SYLLABLE_COUNT_FILE), "3");
        assert_eq!(read(SYLLABLES_FILE), "never,N EH,V ER\r\ngive,G IH V\r\n");
        assert_eq!(read(LYRIC_UNITS_FILE), "きょ,うは,ね\r\n");
        assert_eq!(read(WORD_LENGTHS_FILE), "2,1\r\n");
    }

    #[test]
    fn quotes_fields_with_commas() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("units.csv");
        write_unit_row(&path, &["a,b".to_string(), "c".to_string()]).expect("write");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "\"a,b\",c\r\n"
        );
    }
}
