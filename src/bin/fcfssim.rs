//! fcfssim: run an FCFS scheduling simulation from a text workload.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use fcfs_sim::{load_workload, parse_workload, Scenario, SimFormat, Simulator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Fixed-width text table.
    Table,
    /// JSON array of result rows.
    Json,
}

/// Run an FCFS scheduling simulation with I/O blocking and kill events.
#[derive(Parser)]
#[command(name = "fcfssim")]
struct Cli {
    /// Path to a workload file. Reads standard input when omitted or "-".
    ///
    /// Format: process count, then `name pid burst ioStart ioDuration`
    /// per process (`-` for no I/O), then kill count, then `pid time`
    /// per kill event.
    workload: Option<PathBuf>,

    /// Output format for the results.
    #[arg(long, value_enum, env = "FCFSSIM_FORMAT", default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Print aggregate statistics after the results.
    #[arg(long)]
    summary: bool,

    /// Print trace events to stderr.
    #[arg(long)]
    dump_trace: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn read_scenario(path: Option<&PathBuf>) -> Result<Scenario> {
    match path {
        Some(path) if path.as_os_str() != "-" => load_workload(path)
            .with_context(|| format!("failed to load {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read standard input")?;
            parse_workload(&text).context("failed to parse workload from standard input")
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let scenario = read_scenario(cli.workload.as_ref())?;
    let result = Simulator::new()
        .run(scenario)
        .context("simulation aborted")?;

    if cli.dump_trace {
        result.trace().dump();
    }

    match cli.format {
        OutputFormat::Table => {
            println!();
            print!("{}", result.report());
        }
        OutputFormat::Json => {
            let json = result
                .report()
                .to_json()
                .context("failed to serialize results")?;
            println!("{json}");
        }
    }

    if cli.summary {
        let stats = result.stats();
        match cli.format {
            OutputFormat::Table => print!("\n{stats}"),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&stats).context("failed to serialize summary")?
            ),
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .event_format(SimFormat)
        .try_init();
}
