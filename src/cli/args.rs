use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Tag a batch of MP3 files with shared title/artist/album and a front cover.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "coverstamp", version)]
pub struct Args {
    /// MP3 files or directories containing them
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Title for every file (otherwise kept from the file, or its name)
    #[arg(long)]
    pub title: Option<String>,

    /// Artist for every file
    #[arg(long)]
    pub artist: Option<String>,

    /// Album for every file
    #[arg(long)]
    pub album: Option<String>,

    /// Front cover image (.jpg, .jpeg or .png)
    #[arg(long, value_name = "PATH")]
    pub cover: Option<PathBuf>,

    /// Directory for the tagged copies [default: from config, "tagged"]
    #[arg(short, long = "out", value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Also print one JSON message per file to stdout for a messaging bot
    #[arg(long)]
    pub bot_payload: bool,

    /// Keep going after a file fails and save the rest
    #[arg(long)]
    pub keep_going: bool,

    /// Config file [default: <config dir>/coverstamp/config.json]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Store the effective settings (config file plus --out/--keep-going)
    /// in the config file. Without FILES, nothing else is done.
    #[arg(long)]
    pub save_config: bool,

    /// More output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
