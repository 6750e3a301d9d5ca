//! Headless front-end for the theme store and age labels.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::Style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tintage::{
    now_unix, AgeLabel, AgeMarkup, Config, Document, FileStorage, MemoryDocument, Page,
    ThemePreference,
};

#[derive(Parser)]
#[command(name = "tintage")]
#[command(about = "Inspect theme preferences and render age labels")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config overriding storage key and attribute names
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    /// JSON file standing in for browser storage
    #[arg(long, global = true, default_value = "tintage-storage.json")]
    store: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Read or change the stored theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Print the label and bucket for each timestamp
    Age {
        /// Unix timestamps in seconds
        #[arg(required = true, allow_negative_numbers = true)]
        timestamps: Vec<i64>,

        /// Reference time in Unix seconds (defaults to now)
        #[arg(long)]
        now: Option<i64>,
    },

    /// Print the HTML span a page would carry for a timestamp
    Span {
        /// Unix timestamp in seconds
        #[arg(allow_negative_numbers = true)]
        timestamp: i64,

        /// Reference time in Unix seconds (defaults to now)
        #[arg(long)]
        now: Option<i64>,

        /// Show an absolute date for ages above this many seconds
        #[arg(long)]
        max_relative: Option<i64>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the current preference and the mode it resolves to
    Get,
    /// Store a preference: auto, light or dark
    Set { theme: ThemePreference },
    /// Advance to the next preference
    Cycle,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Theme { action } => run_theme(action, &cli.store, config),
        Commands::Age { timestamps, now } => {
            let now = now.unwrap_or_else(now_unix);
            for ts in timestamps {
                let label = AgeLabel::new(now.saturating_sub(ts).max(0) as u64);
                println!(
                    "{ts}\t{}\t{}",
                    bucket_style(label.class()).apply_to(label.to_string()),
                    label.class()
                );
            }
            Ok(())
        }
        Commands::Span {
            timestamp,
            now,
            max_relative,
        } => {
            let markup = AgeMarkup::new()?;
            let html = markup
                .span(timestamp, now.unwrap_or_else(now_unix), max_relative)
                .with_context(|| format!("rendering span for {timestamp}"))?;
            println!("{html}");
            Ok(())
        }
    }
}

fn run_theme(action: ThemeAction, store: &std::path::Path, config: Config) -> anyhow::Result<()> {
    let toggle_id = config.theme.toggle_id.clone();
    let page = Page::new(FileStorage::new(store), MemoryDocument::new(), config);
    let toggle = page.document().add_element_with_id(&toggle_id);
    page.on_script_load();

    match action {
        ThemeAction::Get => page.theme().update_theme_toggle(),
        ThemeAction::Set { theme } => page.theme().set_theme(theme),
        ThemeAction::Cycle => {
            page.theme().cycle_theme();
        }
    }

    let shown = page.document().text(&toggle);
    let mode = page.theme().color_mode();
    let style = if shown == ThemePreference::Auto.as_str() {
        Style::new().dim()
    } else {
        Style::new().bold()
    };
    println!("{} ({})", style.apply_to(shown), mode.as_str());
    Ok(())
}

fn bucket_style(class: &str) -> Style {
    match class {
        "age-mins" => Style::new().green().bold(),
        "age-hours" => Style::new().green(),
        "age-days" => Style::new().yellow(),
        _ => Style::new().dim(),
    }
}

fn init_tracing() {
    // Stay quiet unless RUST_LOG asks for output.
    let Ok(filter) = std::env::var("RUST_LOG") else {
        return;
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt_layer)
        .try_init();
}
