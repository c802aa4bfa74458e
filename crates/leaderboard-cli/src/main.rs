//! CAR-bench Leaderboard CLI
//!
//! The `leaderboard` command loads a directory of scored submissions and
//! prints ranked leaderboard tables.
//!
//! ## Commands
//!
//! - `best`: every submission numbered per agent, ordered by overall Pass^3
//! - `mean`: one row per agent, metrics averaged across submissions
//! - `overall`: best pass rate per agent with task totals
//! - `by-split`: mean Pass^1 per agent and split
//! - `tasks`: per-task success rates
//! - `all`: every view above

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use tracing::{info, Level};

use leaderboard_core::{
    build_all, build_view, load_results_dir, render_markdown, write_leaderboard_json,
    LeaderboardArtifact, LeaderboardConfig, LeaderboardTable, PipelineSpan, ScoreFormat, ViewKind,
};

#[derive(Parser)]
#[command(name = "leaderboard")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CAR-bench leaderboard aggregation", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: ./leaderboard.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Results directory (overrides config and LEADERBOARD_RESULTS_DIR)
    #[arg(short, long, global = true)]
    results: Option<PathBuf>,

    /// How tables are printed to stdout
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Also write the leaderboard.json artifact to this path
    #[arg(long, global = true)]
    write: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Markdown,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Best-submission leaderboard (submissions numbered per agent)
    Best {
        /// Keep only each agent's top submission
        #[arg(long)]
        best_only: bool,

        /// Score format: ratio | percent
        #[arg(long)]
        format: Option<ScoreFormat>,
    },

    /// Mean-across-submissions leaderboard
    Mean {
        /// Score format: ratio | percent
        #[arg(long)]
        format: Option<ScoreFormat>,
    },

    /// Best pass rate per agent with total tasks
    Overall,

    /// Mean Pass^1 per agent and split
    BySplit,

    /// Per-task success rates
    Tasks {
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Every view
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    leaderboard_core::init_tracing(cli.json, level);

    let mut config =
        LeaderboardConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(results) = cli.results {
        config.results_dir = results;
    }

    let views = match cli.command {
        Commands::Best { best_only, format } => {
            config.best_only |= best_only;
            if let Some(format) = format {
                config.best_format = format;
            }
            Some(ViewKind::Best)
        }
        Commands::Mean { format } => {
            if let Some(format) = format {
                config.mean_format = format;
            }
            Some(ViewKind::Mean)
        }
        Commands::Overall => Some(ViewKind::Overall),
        Commands::BySplit => Some(ViewKind::BySplit),
        Commands::Tasks { limit } => {
            if let Some(limit) = limit {
                config.task_limit = limit;
            }
            Some(ViewKind::Tasks)
        }
        Commands::All => None,
    };

    let result_set = load_results_dir(&config.results_dir).with_context(|| {
        format!(
            "Failed to load results from {}",
            config.results_dir.display()
        )
    })?;
    let _span = PipelineSpan::enter(&result_set.input_digest);

    let tables = match views {
        Some(kind) => vec![build_view(kind, &result_set.submissions, &config)],
        None => build_all(&result_set.submissions, &config),
    };

    print_tables(&tables, cli.output)?;

    if let Some(path) = cli.write {
        let artifact = LeaderboardArtifact::generated_now(result_set.input_digest, tables);
        write_leaderboard_json(&path, &artifact)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote leaderboard artifact to {}", path.display());
    }

    Ok(())
}

fn print_tables(tables: &[LeaderboardTable], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(tables).context("Failed to serialize tables")?
            );
        }
        OutputFormat::Markdown => {
            let rendered: Vec<String> = tables.iter().map(render_markdown).collect();
            print!("{}", rendered.join("\n"));
        }
        OutputFormat::Table => {
            for table in tables {
                println!("{}", table.title);
                if table.is_empty() {
                    println!("No results found.");
                } else {
                    println!("{}", terminal_table(table));
                    let n = table.rows.len();
                    println!("({} row{})", n, if n == 1 { "" } else { "s" });
                }
                println!();
            }
        }
    }
    Ok(())
}

fn terminal_table(table: &LeaderboardTable) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL_CONDENSED);
    out.set_content_arrangement(ContentArrangement::Dynamic);
    out.set_header(
        table
            .columns
            .iter()
            .map(|c| Cell::new(c).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    for row in &table.rows {
        out.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }
    out
}
