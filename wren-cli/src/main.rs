//! Wren CLI
//!
//! A headless front end for testing and debugging: loads a page, runs the
//! whole pipeline and prints what each stage produced.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use serde_json::{Value, json};
use wren_browser::font_metrics::FontdueFontMetrics;
use wren_browser::{LoadedDocument, load_document, parse_document};
use wren_css::{
    ApproximateFontMetrics, CachedFontMetrics, DisplayCommand, FontMetrics, LayoutConfig,
    serialize_declarations,
};
use wren_dom::DomTree;
use wren_html::{print_tree, tree_to_string};

/// Wren: markup to styled tree to geometry to paint commands
#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Everything for a local file
    wren ./index.html

    # Only the geometry tree, at a narrow viewport
    wren --layout --width 480 https://example.com

    # Paint commands as JSON
    wren --paint --json --html '<h1 class="title">Hi</h1>'

    # Only the commands visible in the first screenful
    wren --paint --height 720 ./index.html
"#)]
struct Cli {
    /// Path to HTML file or URL to load
    #[arg(value_name = "FILE|URL", required_unless_present = "html")]
    path: Option<String>,

    /// Parse HTML string directly instead of file/URL
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Viewport width in pixels (overrides --config)
    #[arg(long)]
    width: Option<f32>,

    /// JSON file with layout settings (`viewport_width`, `h_step`, `v_step`)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Font file used to measure text (default: a system font if one is found)
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Print the document tree
    #[arg(long)]
    tree: bool,

    /// Print the resolved style of every element
    #[arg(long)]
    styles: bool,

    /// Print the geometry tree
    #[arg(long)]
    layout: bool,

    /// Print the display list
    #[arg(long)]
    paint: bool,

    /// Print paint commands visible in a window this many pixels tall
    #[arg(long, value_name = "PX")]
    height: Option<f32>,

    /// Top of the visible window, used with --height
    #[arg(long, value_name = "PX", default_value_t = 0.0)]
    scroll: f32,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// With no section selected, every section is printed.
    fn sections(&self) -> Sections {
        let any = self.tree || self.styles || self.layout || self.paint;
        Sections {
            tree: self.tree || !any,
            styles: self.styles || !any,
            layout: self.layout || !any,
            paint: self.paint || !any,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Sections {
    tree: bool,
    styles: bool,
    layout: bool,
    paint: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = layout_config(&cli)?;
    let metrics = font_metrics(cli.font.as_deref())?;
    let doc = load_doc(&cli, &config, &metrics)?;

    if cli.json {
        let output = document_json(&doc, &cli);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_document(&doc, &cli);
    }
    Ok(())
}

/// Layout settings from --config, with --width on top.
fn layout_config(cli: &Cli) -> Result<LayoutConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid config '{}'", path.display()))?
        }
        None => LayoutConfig::default(),
    };
    if let Some(width) = cli.width {
        config.viewport_width = width;
    }
    Ok(config)
}

/// The measuring provider: an explicit font, else a system font, else the
/// fixed-ratio approximation.
fn font_metrics(font: Option<&Path>) -> Result<CachedFontMetrics<Box<dyn FontMetrics>>> {
    let provider: Box<dyn FontMetrics> = match font {
        Some(path) => Box::new(FontdueFontMetrics::from_file(path)?),
        None => match FontdueFontMetrics::load_system() {
            Some(system) => Box::new(system),
            None => {
                log::warn!("measuring text with approximate metrics");
                Box::new(ApproximateFontMetrics)
            }
        },
    };
    Ok(CachedFontMetrics::new(provider))
}

/// Load document from CLI arguments
fn load_doc(cli: &Cli, config: &LayoutConfig, metrics: &dyn FontMetrics) -> Result<LoadedDocument> {
    if let Some(html) = &cli.html {
        Ok(parse_document(html, None, config, metrics))
    } else if let Some(path) = &cli.path {
        Ok(load_document(path, config, metrics)?)
    } else {
        anyhow::bail!("a file path, URL, or --html is required")
    }
}

fn heading(title: &str) {
    println!("{}", format!("=== {title} ===").bold().cyan());
}

/// Paint commands to show, honouring --height and --scroll.
fn painted<'a>(doc: &'a LoadedDocument, cli: &Cli) -> Vec<&'a DisplayCommand> {
    match cli.height {
        Some(height) => doc.display_list.visible(cli.scroll, height).collect(),
        None => doc.display_list.iter().collect(),
    }
}

/// Every element with its resolved declarations, in document order.
fn element_styles(tree: &DomTree) -> Vec<(usize, String, String)> {
    tree.descendants(tree.root())
        .filter_map(|id| {
            let tag = tree.tag_name(id)?;
            let style = tree.style(id)?;
            Some((id.0, tag.to_string(), serialize_declarations(style)))
        })
        .collect()
}

/// Print document information to stdout
fn print_document(doc: &LoadedDocument, cli: &Cli) {
    let sections = cli.sections();

    if sections.tree {
        heading("Document Tree");
        print_tree(&doc.tree, doc.tree.root(), 0);
        println!();
    }

    if sections.styles {
        heading("Resolved Styles");
        println!("{} linked rules from {} sheets", doc.rules.len(), doc.stylesheets.len());
        for (id, tag, declarations) in element_styles(&doc.tree) {
            let depth = doc.tree.ancestors(wren_dom::NodeId(id)).count();
            println!("{}<{tag}> {}", "  ".repeat(depth), declarations.dimmed());
        }
        println!();
    }

    if sections.layout {
        heading(&format!("Geometry (viewport width {})", doc.config.viewport_width));
        doc.layout.dump(0);
        println!();
    }

    if sections.paint {
        let commands = painted(doc, cli);
        heading(&format!("Display List ({} of {})", commands.len(), doc.display_list.len()));
        for command in commands {
            println!("{command}");
        }
        println!();
    }

    if !doc.parse_issues.is_empty() {
        heading("Parse Issues");
        for issue in &doc.parse_issues {
            println!("  {} {}", "-".yellow(), issue.message);
        }
    }
}

/// The selected sections as one JSON object
fn document_json(doc: &LoadedDocument, cli: &Cli) -> Value {
    let sections = cli.sections();
    let mut output = json!({
        "url": doc.url,
        "config": doc.config,
        "stylesheets": doc.stylesheets,
        "parse_issues": doc.parse_issues.iter().map(|i| i.message.as_str()).collect::<Vec<_>>(),
    });

    if sections.tree {
        output["tree"] = json!(tree_to_string(&doc.tree, doc.tree.root(), 0));
    }
    if sections.styles {
        output["styles"] = element_styles(&doc.tree)
            .into_iter()
            .map(|(node, tag, declarations)| {
                json!({ "node": node, "tag": tag, "style": declarations })
            })
            .collect();
    }
    if sections.layout {
        output["layout"] = json!(doc.layout);
    }
    if sections.paint {
        output["paint"] = json!(painted(doc, cli));
    }
    output
}
