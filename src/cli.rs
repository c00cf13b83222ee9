use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "staffwright", about = "Transcribe a monophonic recording into sheet music")]
pub struct Cli {
    /// Input recording (WAV, FLAC, MP3, OGG)
    pub input: PathBuf,

    /// Output image; later pages get a -2, -3, ... suffix
    #[arg(short, long, default_value = "sheet.png")]
    pub output: PathBuf,

    /// Tempo of the recording in beats per minute (one note per beat)
    #[arg(long, default_value_t = 60.0)]
    pub bpm: f64,

    /// Config file (defaults to ./staffwright.toml, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Staff asset directory containing manifest.json
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Title printed above the first ledger (needs --font)
    #[arg(long)]
    pub title: Option<String>,

    /// TrueType/OpenType font for the title
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Also write the detected note sequence as JSON
    #[arg(long)]
    pub notes_json: Option<PathBuf>,

    /// Fail instead of rendering more than this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
