//! SAH Countdown - branded countdown widget for the terminal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use ratatui::layout::Rect;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use sah_countdown::branding::{APP_BINARY_NAME, APP_DESCRIPTION, APP_DISPLAY_NAME};
use sah_countdown::config::{RenderVariant, WidgetOptions};
use sah_countdown::constants::DEFAULT_CONTAINER;
use sah_countdown::models::PaletteOverrides;
use sah_countdown::runtime::WidgetRuntime;
use sah_countdown::tui;

/// SAH Countdown - branded countdown widget for the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML options file (defaults to the platform config dir)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Theme name: gray, dark, light, or auto
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Size category: compact, medium, or large
    #[arg(long, value_name = "NAME")]
    size: Option<String>,

    /// Render the animated flip-panel variant
    #[arg(long)]
    animated: bool,

    /// Hide the headline
    #[arg(long)]
    hide_title: bool,

    /// Hide the subtitle
    #[arg(long)]
    hide_subtitle: bool,

    /// Hide the campaign paragraph
    #[arg(long)]
    hide_description: bool,

    /// Hide the hashtag
    #[arg(long)]
    hide_hashtag: bool,

    /// Show the call-to-action link
    #[arg(long)]
    show_cta: bool,

    /// Color overrides as JSON, e.g. '{"title": "#FF0000"}'
    #[arg(long, value_name = "JSON")]
    colors: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Translates the flags into a partial option record.
    fn to_options(&self) -> Result<WidgetOptions> {
        let colors = match &self.colors {
            Some(json) => serde_json::from_str::<PaletteOverrides>(json)
                .context("Invalid --colors value")?,
            None => PaletteOverrides::default(),
        };

        Ok(WidgetOptions {
            container: None,
            theme: self.theme.clone(),
            show_title: self.hide_title.then_some(false),
            show_subtitle: self.hide_subtitle.then_some(false),
            show_description: self.hide_description.then_some(false),
            show_hashtag: self.hide_hashtag.then_some(false),
            show_cta: self.show_cta.then_some(true),
            size: self.size.clone(),
            variant: self.animated.then_some(RenderVariant::Flip),
            colors,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("{} v{}", APP_DISPLAY_NAME, env!("CARGO_PKG_VERSION"));
    println!("{}", APP_DESCRIPTION);

    // Initialize tracing; diagnostics go to stderr and show after restore
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // File options first, CLI flags layered on top
    let file_options = match &cli.options {
        Some(path) => WidgetOptions::load(path)?,
        None => WidgetOptions::load_default()?.unwrap_or_default(),
    };
    let options = cli.to_options()?.overlay(file_options);
    let container = options
        .container
        .clone()
        .unwrap_or_else(|| DEFAULT_CONTAINER.to_string());

    let mut runtime = WidgetRuntime::new();
    let mut terminal = tui::setup_terminal()?;

    let size = terminal.size().context("Failed to query terminal size")?;
    runtime.set_container(container.clone(), Rect::new(0, 0, size.width, size.height));

    let result = match runtime.init(&options, Utc::now().timestamp_millis()) {
        Some(_) => tui::run(&mut runtime, &mut terminal, &container),
        None => Err(anyhow::anyhow!(
            "could not mount the widget; run {APP_BINARY_NAME} --verbose for details"
        )),
    };

    tui::restore_terminal(terminal)?;
    result
}
