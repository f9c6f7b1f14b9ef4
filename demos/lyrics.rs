use std::path::PathBuf;
use std::time::Instant;

use lyric_prosody::{
    pipeline::{LyricPipeline, PipelineParams},
    syllables::PronunciationDictionary,
    FixedCandidates,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let dict_path = PathBuf::from(args.next().unwrap_or_else(|| "cmudict.dict".to_string()));
    let transcript_path = PathBuf::from(args.next().unwrap_or_else(|| "lyrics/recording.txt".to_string()));
    let candidates_path = PathBuf::from(args.next().unwrap_or_else(|| "files/candidates.json".to_string()));
    let params_path = args.next().map(PathBuf::from);

    let load_start = Instant::now();
    let dictionary = PronunciationDictionary::load(&dict_path)?;
    println!(
        "Dictionary loaded ({} words) in {:.2?}",
        dictionary.len(),
        load_start.elapsed()
    );

    let params = match params_path {
        Some(path) => PipelineParams::from_json_file(&path)?,
        None => PipelineParams::default(),
    };

    let transcript = std::fs::read_to_string(&transcript_path)?;
    let mut generator = FixedCandidates::load(&candidates_path)?;
    let pipeline = LyricPipeline::new(&dictionary, params);

    println!("Generating syllables...");
    let output = pipeline.run(&transcript, &mut generator)?;

    println!("Syllable count: {}", output.plan.total_syllables);
    println!("Selected: {}", output.lyric.selection.text);
    println!("Units: {:?}", output.lyric.selection.units);
    println!("Word lengths: {:?}", output.lyric.word_lengths);

    output.write_to_dir(&PathBuf::from("files"))?;
    println!("Saved to files/");
    Ok(())
}
