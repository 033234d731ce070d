//! Pliant CLI
//!
//! Lays out a JSON-described box tree and prints the computed geometry.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use pliant_cli::document::Document;
use pliant_cli::report::{NodeReport, RunReport, outline, stats_line};
use pliant_cli::{Viewport, lay_out};
use pliant_style::Direction;

/// Pliant - flexbox layout for JSON box trees
#[derive(Parser, Debug)]
#[command(name = "pliant")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lay out a document at its content size
    pliant demos/toolbar.json

    # Offer a 375pt wide viewport, right to left
    pliant --width 375 --direction rtl demos/toolbar.json

    # Round to a 3x pixel grid and emit JSON
    pliant --scale 3 --json demos/toolbar.json

    # Read the document from stdin
    cat demos/toolbar.json | pliant -
"#)]
struct Cli {
    /// Layout document; stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Width offered to the root (default: content size)
    #[arg(long)]
    width: Option<f32>,

    /// Height offered to the root (default: content size)
    #[arg(long)]
    height: Option<f32>,

    /// Direction the root inherits: ltr or rtl
    #[arg(long, default_value = "ltr")]
    direction: Direction,

    /// Physical pixels per point; 0 disables rounding
    #[arg(long)]
    scale: Option<f32>,

    /// New nodes start from row direction and stretched lines
    #[arg(long)]
    web_defaults: bool,

    /// Use legacy stretch sizing and report whether it changed the layout
    #[arg(long)]
    legacy_stretch: bool,

    /// Print the layout as JSON instead of an outline
    #[arg(long)]
    json: bool,

    /// Log the engine's own tree dump after the pass
    #[arg(long)]
    print_tree: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = read_input(cli.path.as_deref())?;
    let mut document = Document::from_json(&text)?;
    apply_overrides(&cli, &mut document);

    let viewport = Viewport {
        width: cli.width.unwrap_or(f32::NAN),
        height: cli.height.unwrap_or(f32::NAN),
        direction: cli.direction,
    };
    let laid_out = lay_out(&document, viewport)?;
    let root_layout = &laid_out.tree[laid_out.root].layout;

    if cli.json {
        let report = RunReport {
            layout: NodeReport::collect(&laid_out.tree, laid_out.root),
            legacy_stretch_affects_layout: root_layout.does_legacy_stretch_flag_affect_layout,
            stats: laid_out.stats.into(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", outline(&laid_out.tree, laid_out.root));
    println!();
    println!("{}", stats_line(&laid_out.stats));
    if root_layout.does_legacy_stretch_flag_affect_layout {
        println!("legacy stretch changed this layout");
    }
    Ok(())
}

/// Read the document from a file, or stdin for `-` or no path
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            let _ = io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Flags win over the document's `config` section
fn apply_overrides(cli: &Cli, document: &mut Document) {
    let settings = &mut document.config;
    if let Some(scale) = cli.scale {
        settings.point_scale_factor = scale;
    }
    if cli.web_defaults {
        settings.use_web_defaults = true;
    }
    if cli.legacy_stretch {
        settings.use_legacy_stretch_behaviour = true;
        settings.should_diff_layout_without_legacy_stretch_behaviour = true;
    }
    if cli.print_tree {
        settings.print_tree = true;
    }
}
