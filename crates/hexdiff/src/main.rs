//! Hexdiff - highlighted hexdumps of byte-level diffs

mod config;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use config::Config;
use hexdiff_core::{
    Algorithm, Diff, DiffEngine, DiffStats, Encoding, Highlight, Model, RenderConfig, Renderer,
};
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Highlighted hexdumps of byte-level diffs.
#[derive(Parser, Debug)]
#[command(name = "hexdiff", version, about, arg_required_else_help = true)]
struct Cli {
    /// Files to dump; each one is diffed against the one before it.
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    files: Vec<PathBuf>,

    /// Output encoding.
    #[arg(short, long, value_enum)]
    encoding: Option<EncodingArg>,

    /// How changes are highlighted.
    #[arg(short, long, value_enum)]
    style: Option<StyleArg>,

    /// Wrap lines at this many columns, or `auto` for the terminal width.
    #[arg(short, long, value_parser = parse_width)]
    width: Option<Width>,

    /// Show only the rows that changed.
    #[arg(short, long)]
    diff: bool,

    /// Print the edit operations as JSON instead of rendering them.
    #[arg(long, conflicts_with = "diff")]
    ops: bool,

    /// Sequence matching algorithm.
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Config file (default: <config dir>/hexdiff/config.toml).
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Verbose logging (use multiple times for more detail).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EncodingArg {
    Hexdump,
    Hex,
    Text,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Hexdump => Encoding::Hexdump,
            EncodingArg::Hex => Encoding::Hex,
            EncodingArg::Text => Encoding::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    Ansi,
    Html,
}

impl From<StyleArg> for Highlight {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Ansi => Highlight::Ansi,
            StyleArg::Html => Highlight::Html,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Myers,
    Patience,
    Lcs,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Myers => Algorithm::Myers,
            AlgorithmArg::Patience => Algorithm::Patience,
            AlgorithmArg::Lcs => Algorithm::Lcs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Width {
    Auto,
    Columns(NonZeroUsize),
}

impl Width {
    fn columns(self) -> Option<NonZeroUsize> {
        match self {
            Width::Columns(columns) => Some(columns),
            Width::Auto => crossterm::terminal::size()
                .ok()
                .and_then(|(columns, _)| NonZeroUsize::new(columns as usize)),
        }
    }
}

fn parse_width(s: &str) -> Result<Width, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("auto") {
        return Ok(Width::Auto);
    }
    s.parse::<NonZeroUsize>()
        .map(Width::Columns)
        .map_err(|e| format!("invalid width '{s}': {e}"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Merge command line overrides into the file config
fn resolve_config(cli: &Cli, config: &Config) -> RenderConfig {
    let mut render = config.render_config();
    if let Some(encoding) = cli.encoding {
        render.encoding = encoding.into();
    }
    if let Some(style) = cli.style {
        render.style = style.into();
    }
    if let Some(width) = cli.width {
        render.width = width.columns();
    }
    render
}

fn load_model(files: &[PathBuf], engine: DiffEngine) -> Result<Model> {
    let mut model = Model::default().with_engine(engine);
    for path in files {
        let data =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        log::info!("loaded {} ({} bytes)", path.display(), data.len());
        model.push(data);
    }
    for diff in &model.diffs {
        let stats = DiffStats::from_ops(&diff.opcodes);
        if !stats.has_changes() {
            log::info!(
                "{} and {} are identical",
                files[diff.target - 1].display(),
                files[diff.target].display()
            );
            continue;
        }
        log::info!(
            "{} -> {}: +{} -{} ~{} bytes",
            files[diff.target - 1].display(),
            files[diff.target].display(),
            stats.insertions,
            stats.deletions,
            stats.replacements
        );
    }
    Ok(model)
}

fn run(cli: &Cli) -> Result<String> {
    let config = Config::load(cli.config.as_deref())?;
    let algorithm = cli.algorithm.map(Algorithm::from).unwrap_or(config.algorithm);
    let model = load_model(&cli.files, DiffEngine::new().with_algorithm(algorithm))?;

    if cli.ops {
        return Ok(serde_json::to_string_pretty(&model.diffs)? + "\n");
    }

    let renderer = Renderer::new(resolve_config(cli, &config));
    if model.diffs.is_empty() {
        let len = model.object(0)?.len();
        return Ok(renderer.render(&model, &Diff::identity(0, len))? + "\n");
    }

    if !cli.diff {
        return Ok(renderer.dumps(&model)?);
    }

    let mut output = String::new();
    for diff in &model.diffs {
        output.push_str(&format!(
            "--- {}\n+++ {}\n",
            cli.files[diff.target - 1].display(),
            cli.files[diff.target].display()
        ));
        if !diff.has_changes() {
            continue;
        }
        let rendered = renderer.diff_render(&model, diff)?;
        if !rendered.is_empty() {
            output.push_str(&rendered);
            output.push('\n');
        }
    }
    Ok(output)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = run(&cli)?;
    let mut stdout = io::stdout().lock();
    match stdout.write_all(output.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => Ok(result?),
    }
}
