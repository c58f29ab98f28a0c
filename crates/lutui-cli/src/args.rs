use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lutui")]
#[command(about = "Browse and launch installed Lutris games from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Directory for config.toml and lutui.log [default: $LUTUI_PATH or the XDG data dir]"
    )]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[arg(long, global = true, help = "Use this lutris executable instead of searching PATH")]
    pub lutris_path: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Read installed games from a JSON file instead of asking lutris"
    )]
    pub catalog: Option<PathBuf>,

    #[arg(long, global = true, help = "Grid cells per row")]
    pub row_width: Option<usize>,

    #[arg(long, global = true, help = "Grid cells per page")]
    pub page_size: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Open the interactive game grid (default)")]
    Grid,

    #[command(about = "Print installed games")]
    List {
        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },

    #[command(about = "Launch one game and wait for it to exit; Ctrl+C stops it")]
    Launch {
        #[arg(help = "Game id or slug")]
        game: String,
    },
}
