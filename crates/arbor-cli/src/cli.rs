//! Command-line interface for the arbor utility
//!
//! Builds a B-Tree from a list of integer keys and prints its diagnostic
//! dump, a JSON structure, or summary statistics.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::colorizer::colorize_output;
use arbor::core::logging::init_logging;
use arbor::prelude::*;

/// Arbor - Build and inspect B-Trees
#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "A Rust utility to build and inspect B-Trees")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Where the keys come from and how the tree is shaped
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct KeySource {
    /// Keys separated by commas and/or whitespace, e.g. "10,20 5"
    #[arg(short, long, allow_hyphen_values = true, conflicts_with = "input")]
    pub keys: Option<String>,

    /// Input file with keys (use - for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Minimum degree of the tree
    #[arg(short, long, default_value_t = 3)]
    pub degree: usize,

    /// Keys to remove after insertion, in order
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    pub remove: Vec<i64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a B-Tree and print its structure
    Build {
        #[command(flatten)]
        source: KeySource,

        /// Output file for the dump (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Character set to use for branch glyphs
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// Append the short node id to each line
        #[arg(long)]
        show_ids: bool,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        /// Print the structure as JSON instead of a text dump
        #[arg(long)]
        json: bool,
    },

    /// Build a B-Tree and print summary statistics
    Stats {
        #[command(flatten)]
        source: KeySource,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Supported output character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for CharacterSet {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => CharacterSet::Ascii,
            StyleChoice::Unicode => CharacterSet::Unicode,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// One node of the JSON structure
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NodeView {
    pub id: String,
    pub keys: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeView>,
}

/// JSON structure of a whole tree
#[derive(Debug, Serialize)]
pub struct TreeView {
    pub degree: usize,
    pub len: usize,
    pub root: Option<NodeView>,
}

/// Summary statistics printed by `arbor stats`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Stats {
    pub keys: usize,
    pub nodes: usize,
    pub height: usize,
    pub width: usize,
    pub degree: usize,
}

impl Stats {
    pub fn of(tree: &BTree<i64>) -> Self {
        Self {
            keys: tree.len(),
            nodes: tree.node_count(),
            height: tree.height(),
            width: tree.width(),
            degree: tree.degree(),
        }
    }
}

/// Main CLI application
pub struct ArborApp {
    config: RenderConfig,
}

impl ArborApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new application instance with a render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    fn build_config(&self, style: StyleChoice, show_ids: bool) -> RenderConfig {
        self.config.with_charset(style.into()).with_ids(show_ids)
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over the flags
        let log_level_str = std::env::var("ARBOR_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var("ARBOR_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Arbor v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Build {
                source,
                output,
                style,
                show_ids,
                color,
                json,
            } => self.build_command(source, output, style, show_ids, color, json, cli.verbose),
            Commands::Stats { source, json } => self.stats_command(source, json, cli.verbose),
        }
    }

    /// Handle the build command
    #[allow(clippy::too_many_arguments)]
    fn build_command(
        &self,
        source: KeySource,
        output: Option<PathBuf>,
        style: StyleChoice,
        show_ids: bool,
        color: ColorChoice,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let tree = self.load_tree(&source, verbose)?;

        let content = if json {
            serde_json::to_string_pretty(&tree_view(&tree))?
        } else {
            self.dump(&tree, style, show_ids, should_colorize(&output, color))?
        };

        if verbose {
            eprintln!(
                "Built tree with {} keys in {} nodes",
                tree.len(),
                tree.node_count()
            );
        }

        self.write_output(output, &content)
    }

    /// Handle the stats command
    fn stats_command(&self, source: KeySource, json: bool, verbose: bool) -> Result<()> {
        let tree = self.load_tree(&source, verbose)?;
        println!("{}", format_stats(&Stats::of(&tree), json)?);
        Ok(())
    }

    /// Read the keys, build the tree, apply removals and validate
    fn load_tree(&self, source: &KeySource, verbose: bool) -> Result<BTree<i64>> {
        let keys = match &source.keys {
            Some(list) => parse_keys(list)?,
            None => {
                let content = self.read_input(source.input.clone())?;
                if verbose {
                    eprintln!("Read {} bytes of input", content.len());
                }
                parse_keys(&content)?
            }
        };
        build_tree(&keys, source.degree, &source.remove)
    }

    /// Render the text dump, optionally with colors
    pub fn dump(
        &self,
        tree: &BTree<i64>,
        style: StyleChoice,
        show_ids: bool,
        colorize: bool,
    ) -> Result<String> {
        let renderer = TreeRenderer::with_config(self.build_config(style, show_ids));
        let text = renderer.render(tree)?;
        if !colorize {
            return Ok(text);
        }
        let inner = tree.tree();
        let leaves: Vec<bool> = inner
            .depth_first_traverse()
            .into_iter()
            .map(|node| inner.children(node.id()).is_empty())
            .collect();
        Ok(colorize_output(&text, &leaves))
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for ArborApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Split on commas and whitespace and parse each piece as an integer
pub fn parse_keys(input: &str) -> Result<Vec<i64>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .with_context(|| format!("Invalid key '{}'", token))
        })
        .collect()
}

/// Insert `keys`, then remove `removals` in order
pub fn build_tree(keys: &[i64], degree: usize, removals: &[i64]) -> Result<BTree<i64>> {
    let mut tree = BTree::new(degree)?;
    for &key in keys {
        tree.insert(key);
    }
    debug!(keys = keys.len(), degree, "Inserted keys");

    for key in removals {
        let retired = tree
            .remove(key)
            .map_err(|e| anyhow!("Cannot remove {}: {}", key, e))?;
        debug!(key, retired = retired.len(), "Removed key");
    }

    if let Err(e) = tree.validate() {
        bail!("Tree failed validation: {}", e);
    }
    info!(len = tree.len(), nodes = tree.node_count(), "Built tree");
    Ok(tree)
}

/// JSON view of the whole tree
pub fn tree_view(tree: &BTree<i64>) -> TreeView {
    TreeView {
        degree: tree.degree(),
        len: tree.len(),
        root: tree.root().and_then(|id| node_view(tree.tree(), id)),
    }
}

fn node_view(tree: &Tree<KeyedNode<i64>>, id: NodeId) -> Option<NodeView> {
    let node = tree.node(id)?;
    Some(NodeView {
        id: id.short(),
        keys: node.keys().to_vec(),
        children: tree
            .children(id)
            .iter()
            .filter_map(|&child| node_view(tree, child))
            .collect(),
    })
}

fn format_stats(stats: &Stats, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(stats)?);
    }
    Ok(format!(
        "Keys:   {}\nNodes:  {}\nHeight: {}\nWidth:  {}\nDegree: {}",
        stats.keys, stats.nodes, stats.height, stats.width, stats.degree
    ))
}

/// Determine if we should colorize the output based on color choice and output destination
fn should_colorize(output: &Option<PathBuf>, color: ColorChoice) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            if std::env::var("NO_COLOR").is_ok() {
                return false;
            }
            match output {
                None => crossterm::tty::IsTty::is_tty(&std::io::stdout()),
                Some(p) if p.to_str() == Some("-") => {
                    crossterm::tty::IsTty::is_tty(&std::io::stdout())
                }
                Some(_) => false,
            }
        }
    }
}
