//! wk-yomichan - WaniKani levels as a Yomichan frequency dictionary
//!
//! Converts all WaniKani kanji and vocabulary subjects into a Yomichan
//! metadata dictionary archive.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "wk-yomichan")]
#[command(about = "Converts all WaniKani kanji and vocab subjects into a Yomichan metadata dictionary")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    build: cmd::build::BuildArgs,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./wk-yomichan.toml or the user config dir)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = wk_yomichan_core::ProgressContext::new();
    let multi = if progress.is_tty() {
        Some(progress.multi())
    } else {
        None
    };
    wk_yomichan_core::init_logging(cli.debug, multi);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        None => cmd::build::run(cli.build, &config, &progress),
        Some(Command::Config) => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec!["API base URL", &config.api.base_url]);
            table.add_row(vec!["API revision", &config.api.revision]);
            table.add_row(vec![
                "API key",
                if config.api.api_key.is_some() {
                    "configured"
                } else {
                    "not set"
                },
            ]);
            table.add_row(vec![
                "Output directory",
                &config.output.dir.display().to_string(),
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
