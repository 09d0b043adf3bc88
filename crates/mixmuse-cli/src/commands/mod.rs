use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mixmuse_core::config::{CONFIG_FILE_NAME, KEY_PATHS};
use mixmuse_core::{
    ChangeKind, Complexity, ConfigManager, ConfigValue, EditChange, MuseEngine, MuseReport, MusicStyle,
    RealtimeRequest, SuggestRequest,
};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "mixmuse")]
#[command(version, about = "MixMuse.rs - musical analysis of source code")]
pub struct Cli {
    /// Configuration file (auto-discovered when omitted)
    #[arg(long, global = true, env = "MIXMUSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Read code from a file instead of stdin
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Metrics, musical pattern, advice and rename proposals for a snippet
    Suggest {
        #[command(flatten)]
        source: SourceArgs,

        /// Music style (defaults to the configured style)
        #[arg(short, long)]
        style: Option<MusicStyle>,

        /// Rendering complexity (defaults to the configured complexity)
        #[arg(short, long)]
        complexity: Option<Complexity>,

        /// Tempo in BPM; non-positive values fall back to the style's tempo
        #[arg(short, long, allow_negative_numbers = true)]
        tempo: Option<i32>,

        /// Identifier to consider for renaming (repeatable)
        #[arg(long = "symbol")]
        symbols: Vec<String>,
    },

    /// Report for a file as it is opened, using the configured defaults
    Analyze {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Report for an edit in progress
    Realtime {
        #[command(flatten)]
        source: SourceArgs,

        /// Kind of an editor change, e.g. insert or delete (repeatable)
        #[arg(long = "change")]
        changes: Vec<String>,

        /// Identifier to consider for renaming (repeatable)
        #[arg(long = "symbol")]
        symbols: Vec<String>,
    },

    /// Music-themed rename proposals
    Names {
        #[command(flatten)]
        source: SourceArgs,

        /// Identifier to consider (defaults to the snippet's function names)
        #[arg(long = "symbol")]
        symbols: Vec<String>,
    },

    /// Naming convention statistics
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List music styles
    Styles,

    /// List complexity levels
    Complexities,

    /// Inspect or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print one value by dotted key path
    Get { key: String },

    /// Set one value by dotted key path and persist it
    Set { key: String, value: String },
}

#[derive(Serialize)]
struct CatalogEntry {
    value: &'static str,
    label: &'static str,
    description: &'static str,
}

/// Dispatch a parsed command
pub async fn run(command: Commands, format: OutputFormat, manager: &ConfigManager) -> Result<()> {
    let config = manager.get_config().await;
    let engine = MuseEngine::with_config(config.clone())?;

    match command {
        Commands::Suggest {
            source,
            style,
            complexity,
            tempo,
            symbols,
        } => {
            let request = SuggestRequest {
                code: read_source(&source).await?,
                symbols,
                music_style: style.unwrap_or(config.defaults.style),
                tempo: tempo.or_else(|| i32::try_from(config.defaults.tempo).ok()),
                complexity: complexity.unwrap_or(config.defaults.complexity),
            };
            print_report(&engine.suggest(&request), format)?;
        }
        Commands::Analyze { source } => {
            let code = read_source(&source).await?;
            print_report(&engine.analyze_file(&code), format)?;
        }
        Commands::Realtime {
            source,
            changes,
            symbols,
        } => {
            let request = RealtimeRequest {
                code: read_source(&source).await?,
                changes: changes.iter().map(|kind| EditChange::new(parse_change_kind(kind))).collect(),
                symbols,
            };
            print_report(&engine.analyze_realtime(&request), format)?;
        }
        Commands::Names { source, symbols } => {
            let code = read_source(&source).await?;
            let names = engine.suggest_names(&code, &symbols);
            match format {
                OutputFormat::Text if names.is_empty() => {}
                OutputFormat::Text => println!("{}", names.suggestions),
                OutputFormat::Json => print_json(&mixmuse_core::parse_suggestions(&names.suggestions))?,
            }
        }
        Commands::Stats { source } => {
            let code = read_source(&source).await?;
            let stats = engine.analyze_naming_patterns(&code);
            match format {
                OutputFormat::Text => {
                    println!("total functions: {}", stats.total_functions);
                    println!("named functions: {}", stats.named_functions);
                    println!("snake_case: {}", stats.snake_case_functions);
                    println!("camelCase: {}", stats.camel_case_functions);
                    println!("PascalCase: {}", stats.pascal_case_functions);
                    println!("other: {}", stats.other_case_functions);
                    println!("already musical: {}", stats.themed_functions);
                    println!("themeable: {}", stats.themeable_functions);
                    if let Some(convention) = stats.dominant_convention {
                        println!("dominant convention: {convention:?}");
                    }
                }
                OutputFormat::Json => print_json(&stats)?,
            }
        }
        Commands::Styles => {
            let entries: Vec<CatalogEntry> = MusicStyle::ALL
                .into_iter()
                .map(|s| CatalogEntry {
                    value: s.as_str(),
                    label: s.label(),
                    description: s.description(),
                })
                .collect();
            print_catalog(&entries, format)?;
        }
        Commands::Complexities => {
            let entries: Vec<CatalogEntry> = Complexity::ALL
                .into_iter()
                .map(|c| CatalogEntry {
                    value: c.as_str(),
                    label: c.label(),
                    description: c.description(),
                })
                .collect();
            print_catalog(&entries, format)?;
        }
        Commands::Config(cmd) => handle_config_command(cmd, format, manager).await?,
    }

    Ok(())
}

async fn handle_config_command(cmd: ConfigCommands, format: OutputFormat, manager: &ConfigManager) -> Result<()> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Json => print_json(&manager.get_config().await)?,
            OutputFormat::Text => {
                for key in KEY_PATHS {
                    if let Some(value) = manager.get_value(key).await {
                        println!("{key} = {value}");
                    }
                }
            }
        },
        ConfigCommands::Get { key } => {
            let value = manager
                .get_value(&key)
                .await
                .with_context(|| format!("Unknown configuration key: {key}"))?;
            println!("{value}");
        }
        ConfigCommands::Set { key, value } => {
            manager.set_value(&key, ConfigValue::parse_loose(&value)).await?;

            if manager.config_path().is_none() {
                manager.save_to_file(CONFIG_FILE_NAME).await?;
                info!("Created {}", CONFIG_FILE_NAME);
            }
        }
    }

    Ok(())
}

/// Code from `--file`, or everything on stdin
async fn read_source(source: &SourceArgs) -> Result<String> {
    match &source.file {
        Some(path) => {
            debug!("Reading code from {}", path.display());
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("Failed to read code from stdin")?;
            Ok(code)
        }
    }
}

fn parse_change_kind(raw: &str) -> ChangeKind {
    match raw.trim().to_ascii_lowercase().as_str() {
        "insert" => ChangeKind::Insert,
        "delete" => ChangeKind::Delete,
        _ => ChangeKind::Other,
    }
}

fn print_report(report: &MuseReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_report(report)),
        OutputFormat::Json => print_json(report)?,
    }
    Ok(())
}

fn print_catalog(entries: &[CatalogEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for entry in entries {
                println!("{:<12} {:<12} {}", entry.value, entry.label, entry.description);
            }
        }
        OutputFormat::Json => print_json(&entries)?,
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_report(report: &MuseReport) -> String {
    let analysis = &report.analysis;
    let mut out = format!(
        "lines: {}\nfunctions: {}\nloops: {}\ncomplexity: {:.2}\n",
        analysis.lines, analysis.functions, analysis.loops, analysis.complexity_score
    );

    if let Some(pattern) = &report.musical_pattern {
        out.push_str("\n♪ musical pattern\n");
        for (label, value) in [
            ("rhythm", pattern.rhythm.as_str()),
            ("harmony", pattern.harmony.as_str()),
            ("melody", pattern.melody.as_str()),
            ("structure", pattern.structure.as_str()),
            ("key", pattern.key.as_str()),
            ("time signature", pattern.time_signature.as_str()),
        ] {
            out.push_str(&format!("  {label}: {value}\n"));
        }
        out.push_str(&format!("  tempo: {} BPM\n", pattern.tempo));
    }

    if !report.suggestions.is_empty() {
        out.push_str("\nadvice\n");
        for hint in &report.suggestions {
            out.push_str(&format!("  - {hint}\n"));
        }
    }

    if let Some(names) = report.naming_suggestions.as_ref().filter(|n| !n.is_empty()) {
        out.push_str("\nnames\n");
        for proposal in names {
            out.push_str(&format!("  {} -> {}\n", proposal.original, proposal.suggested));
        }
    }

    out
}
