//! Command-line interface for syntax-zaz.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::buffer::{Document, TextBuffer};
use crate::report;
use crate::scan::{self, Annotation, LineRecord, Runner, SkipReason};
use crate::select::{self, Catalog, ChancePercent, Selector};
use crate::session::{Host, Session};
use crate::settings::{self, Settings};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

const SETTINGS_TEMPLATE: &str = include_str!("templates/settings.yaml");

/// Deterministic joke tooltips for lines of source code.
///
/// Every line is hashed; a configurable share of eligible lines gets one of
/// a fixed set of messages. The same line always gets the same message.
#[derive(Parser)]
#[command(name = "syntax-zaz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate files or directories
    Scan(ScanArgs),
    /// Show how a single line is decided
    Explain(ExplainArgs),
    /// List the message catalog
    Messages,
    /// Watch a file and re-annotate it after each change
    Watch(WatchArgs),
    /// Write a starter settings file
    Init(InitArgs),
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Files or directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Chance percentage, 1-100 (default: from settings, else 5)
    #[arg(short, long)]
    pub chance: Option<ChancePercent>,

    /// Output format: pretty, json, or sarif
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Path to settings YAML file (default: auto-discover)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Exit with status 1 if any line was annotated
    #[arg(long)]
    pub fail_on_annotations: bool,
}

/// Arguments for the explain command.
#[derive(Parser)]
pub struct ExplainArgs {
    /// The line, exactly as it appears in the file
    pub line: String,

    /// Chance percentage, 1-100
    #[arg(short, long, default_value = "5")]
    pub chance: ChancePercent,
}

/// Arguments for the watch command.
#[derive(Parser)]
pub struct WatchArgs {
    /// File to watch
    pub file: PathBuf,

    /// Chance percentage, 1-100 (default: from settings, else 5)
    #[arg(short, long)]
    pub chance: Option<ChancePercent>,

    /// Quiet period before rescanning, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// How often to check the file for changes, in milliseconds
    #[arg(long, default_value = "200")]
    pub poll_ms: u64,

    /// Path to settings YAML file (default: auto-discover)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "syntax-zaz.yaml")]
    pub output: PathBuf,
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" && args.format != "sarif" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'sarif'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let mut settings = match Settings::load(args.settings.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(chance) = args.chance {
        settings.chance_percent = chance;
    }

    for path in &args.paths {
        if !path.exists() {
            eprintln!("Error: cannot access path {:?}", path);
            return Ok(EXIT_ERROR);
        }
    }

    let files = scan::collect_files(&args.paths, &settings)?;
    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }
    debug!(files = files.len(), chance = settings.chance_percent.get(), "scanning");

    let result = Runner::new(settings.scan_config()).run(&files);

    match args.format.as_str() {
        "json" => report::write_json(&result, settings.chance_percent)?,
        "sarif" => {
            let base = sarif_base(&args.paths);
            report::write_sarif(&base, &result)?;
        }
        _ => {
            let shown: Vec<String> = args
                .paths
                .iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect();
            report::write_pretty(&shown.join(", "), &result, settings.chance_percent);
        }
    }

    if args.fail_on_annotations && !result.is_empty() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Paths in SARIF are made relative to the single directory scanned, or
/// to the working directory otherwise.
fn sarif_base(paths: &[PathBuf]) -> PathBuf {
    match paths {
        [only] if only.is_dir() => only.clone(),
        _ => PathBuf::from("."),
    }
}

/// Run the explain command.
pub fn run_explain(args: &ExplainArgs) -> anyhow::Result<i32> {
    let record = LineRecord::from_raw(0, &args.line);
    let selector = Selector::default();
    let verdict = select::evaluate(record.trimmed, args.chance);

    println!("  {}   {:?}", "Trimmed:".dimmed(), record.trimmed);
    println!(
        "  {}      {}..{}",
        "Span:".dimmed(),
        record.start_column,
        record.end_column
    );
    println!(
        "  {}      {} ({} % 100 = {})",
        "Gate:".dimmed(),
        verdict.gate,
        verdict.gate,
        verdict.gate % 100
    );
    println!(
        "  {}      {} ({} % {} = {})",
        "Pick:".dimmed(),
        verdict.pick,
        verdict.pick,
        selector.catalog().len(),
        verdict.index
    );
    println!("  {}    {}", "Chance:".dimmed(), args.chance);
    println!();

    match scan::classify(&selector, &record, args.chance) {
        Ok(message) => println!("  {}  {}", "ZAZ".green().bold(), message),
        Err(SkipReason::NotChosen) => println!(
            "  {}  gate {} is not below {}",
            "SKIP".yellow(),
            verdict.gate % 100,
            args.chance.get()
        ),
        Err(reason) => println!("  {}  {}", "SKIP".yellow(), reason),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the messages command.
pub fn run_messages() -> anyhow::Result<i32> {
    let catalog = Catalog::builtin();
    println!("Messages ({}):", catalog.len());
    println!();
    for (i, message) in catalog.iter().enumerate() {
        println!("  {:>2}  {}", i, message);
    }
    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, SETTINGS_TEMPLATE) {
        eprintln!("Error: failed to write settings: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to taste", args.output.display());
    println!("  2. Run: syntax-zaz scan . --settings {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

// =============================================================================
// Watch mode
// =============================================================================

/// A terminal stand-in for an editor: one buffer, printed on every render.
struct TerminalHost {
    name: String,
    document: Option<Document>,
}

impl Host for TerminalHost {
    fn active_buffer(&self) -> Option<&dyn TextBuffer> {
        self.document.as_ref().map(|d| d as &dyn TextBuffer)
    }

    fn render(&mut self, annotations: Vec<Annotation>) {
        println!();
        if annotations.is_empty() {
            println!("  {} {}", self.name.blue().bold(), "(no annotations)".dimmed());
        } else {
            report::write_annotations(&self.name, &annotations);
        }
    }

    fn inform(&mut self, message: &str) {
        println!("  {} {}", "»".cyan(), message);
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn load_document(path: &Path) -> Option<Document> {
    match std::fs::read(path) {
        Ok(bytes) => Some(Document::from_text(&String::from_utf8_lossy(&bytes))),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "cannot read watched file");
            None
        }
    }
}

/// Run the watch command.
pub fn run_watch(args: &WatchArgs) -> anyhow::Result<i32> {
    let mut settings = match Settings::load(args.settings.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(chance) = args.chance {
        settings.chance_percent = chance;
    }
    if let Some(ms) = args.debounce_ms {
        settings.debounce_ms = ms;
    }
    if let Err(e) = settings::validate(&settings) {
        eprintln!("Error: {}", e);
        return Ok(EXIT_ERROR);
    }
    if !args.file.is_file() {
        eprintln!("Error: not a file: {}", args.file.display());
        return Ok(EXIT_ERROR);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(watch_loop(args, &settings))?;
    Ok(EXIT_SUCCESS)
}

async fn watch_loop(args: &WatchArgs, settings: &Settings) -> anyhow::Result<()> {
    let host = TerminalHost {
        name: args.file.to_string_lossy().to_string(),
        document: load_document(&args.file),
    };
    let session = Session::new(host, settings.scan_config(), settings.debounce());

    println!(
        "Watching {} (commands: toggle, chance <1-100>, refresh, quit)",
        args.file.display()
    );
    session.activate();

    let mut last_modified = modified(&args.file);
    let mut ticker = tokio::time::interval(Duration::from_millis(args.poll_ms.max(10)));
    let mut commands = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let current = modified(&args.file);
                if current != last_modified {
                    last_modified = current;
                    let document = load_document(&args.file);
                    session.with_host(|host| host.document = document);
                    session.content_changed();
                }
            }
            line = commands.next_line(), if stdin_open => {
                match line? {
                    Some(line) => {
                        if !handle_command(&session, line.trim()) {
                            break;
                        }
                    }
                    None => stdin_open = false,
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    session.deactivate();
    Ok(())
}

/// Apply one stdin command. Returns false to stop watching.
fn handle_command(session: &Session<TerminalHost>, command: &str) -> bool {
    let mut parts = command.splitn(2, char::is_whitespace);
    match parts.next().unwrap_or("") {
        "" => {}
        "toggle" => {
            session.toggle();
        }
        "chance" => {
            let input = parts.next().unwrap_or("");
            if let Err(e) = session.set_chance(input) {
                eprintln!("  {} {}", "✗".red(), e);
            }
        }
        "refresh" => session.refresh(),
        "quit" | "exit" => return false,
        other => eprintln!("  {} unknown command {:?}", "✗".red(), other),
    }
    true
}
