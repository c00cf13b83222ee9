mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use cli::Cli;
use staffwright::audio::decode::decode_audio;
use staffwright::config::{self, Config};
use staffwright::pipeline;
use staffwright::render::{SheetRenderer, TextOverlay};
use staffwright::templates::{find_assets_dir, load_assets};

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    // Explicit --config path, or auto-detect staffwright.toml / user config
    let config_path = cli.config.clone().or_else(|| {
        let local = PathBuf::from("staffwright.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("staffwright").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("staffwright").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });

    let mut cfg = Config::default();
    if let Some(ref path) = config_path {
        if let Some(loaded) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            cfg = loaded;
            // Config values apply only when the CLI is at its default
            if cli.bpm == 60.0 { cli.bpm = cfg.audio.bpm; }
            if cli.max_pages.is_none() { cli.max_pages = cfg.output.max_pages; }
            if cli.font.is_none() { cli.font = cfg.output.font.take(); }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    let geometry = cfg.staff;
    geometry.validate().context("Invalid staff geometry")?;
    config::validate_page_limit(cli.max_pages)?;

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    log::info!("staffwright - recording to sheet music");
    log::info!("Input: {}", cli.input.display());
    log::info!("Output: {}", cli.output.display());
    log::info!("Tempo: {:.1} BPM", cli.bpm);

    let assets_dir = cli.assets.clone().unwrap_or_else(find_assets_dir);
    let assets = load_assets(&assets_dir)?;

    let mut renderer = SheetRenderer::new(&geometry);
    if let Some(title) = cli.title.clone() {
        match cli.font {
            Some(ref font) => {
                let overlay = TextOverlay::from_file(font, cfg.output.title_size)?;
                renderer = renderer.with_title(overlay, title);
            }
            None => log::warn!("--title given without a font; the title is skipped"),
        }
    }

    log::info!("Decoding audio...");
    let waveform = decode_audio(&cli.input)?;

    let conversion = pipeline::convert(
        &waveform,
        cli.bpm,
        &renderer,
        &assets,
        &cli.output,
        cli.max_pages,
    )?;

    log::info!("Notes: {}", pipeline::describe(&conversion.notes));

    if let Some(ref path) = cli.notes_json {
        let json = serde_json::to_string_pretty(&conversion.notes)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write notes: {}", path.display()))?;
        log::info!("Wrote note sequence to {}", path.display());
    }

    for page in &conversion.pages {
        log::info!("Wrote {}", page.display());
    }
    log::info!("Done!");
    Ok(())
}
