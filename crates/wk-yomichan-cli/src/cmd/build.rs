//! Default command - build the dictionary archive

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use wk_yomichan_core::{ProgressContext, fmt_num};
use wk_yomichan_wanikani::IncludeHidden;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Your WaniKani API key (prompted for if not given or configured)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Include hidden items
    #[arg(long, value_enum, default_value = "no")]
    pub hidden: HiddenArg,

    /// Output directory for the archive
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum HiddenArg {
    /// Drop hidden items
    No,
    /// Keep all hidden items
    Yes,
    /// Keep hidden items you have passed
    Learned,
}

impl From<HiddenArg> for IncludeHidden {
    fn from(h: HiddenArg) -> Self {
        match h {
            HiddenArg::No => IncludeHidden::No,
            HiddenArg::Yes => IncludeHidden::Yes,
            HiddenArg::Learned => IncludeHidden::Learned,
        }
    }
}

/// Pick the API key: flag, then config/env, then an interactive prompt.
///
/// Empty values fall through to the next source. Whatever is picked is
/// trimmed, so surrounding whitespace from any source is dropped, and an
/// empty key at the end is an error.
fn resolve_api_key(
    flag: Option<String>,
    configured: Option<&str>,
    prompt: impl FnOnce() -> io::Result<String>,
) -> Result<String> {
    let key = match flag.filter(|k| !k.is_empty()) {
        Some(key) => key,
        None => match configured.filter(|k| !k.is_empty()) {
            Some(key) => key.to_string(),
            None => prompt().context("Failed to read API key")?,
        },
    };
    let key = key.trim().to_string();
    anyhow::ensure!(!key.is_empty(), "No API key specified, abort");
    Ok(key)
}

fn prompt_api_key() -> io::Result<String> {
    eprintln!("Please enter your WaniKani API key:");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// Print a key-value summary table on stderr
fn print_summary(rows: &[(&str, String)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("WaniKani").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    eprintln!("\n{table}");
}

pub fn run(args: BuildArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let api_key = resolve_api_key(args.api_key, config.api.api_key.as_deref(), prompt_api_key)?;

    let wk_config = wk_yomichan_wanikani::Config {
        api_key,
        base_url: config.api.base_url.clone(),
        api_revision: config.api.revision.clone(),
        include_hidden: args.hidden.into(),
        output_dir: args.output.unwrap_or_else(|| config.output.dir.clone()),
    };

    log::info!("Building WaniKani metadata dictionary");
    log::info!("  Hidden items: {}", wk_config.include_hidden);
    log::info!("  Output: {}", wk_config.output_dir.display());

    let summary = wk_yomichan_wanikani::run(&wk_config, progress)?;

    print_summary(&[
        (
            "Subjects",
            format!(
                "{} fetched ({} hidden skipped)",
                fmt_num(summary.subjects_fetched),
                fmt_num(summary.hidden_skipped)
            ),
        ),
        ("Kanji entries", fmt_num(summary.kanji_entries)),
        ("Vocabulary entries", fmt_num(summary.vocabulary_entries)),
        ("Archive", summary.archive_path.display().to_string()),
        ("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())),
    ]);

    Ok(())
}
