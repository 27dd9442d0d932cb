//! okta command-line driver.
//!
//! Assembles a source file (or stdin), runs it on the simulator, prints the
//! final amplitude distribution and the shot histogram, and optionally
//! writes the histogram as CSV.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use okta_asm::Program;
use okta_sim::{Outcome, Simulator};

/// okta - assemble and simulate 8-qubit quantum assembly programs
#[derive(Parser)]
#[command(name = "okta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source file to assemble (stdin when omitted)
    source: Option<PathBuf>,

    /// Number of measurement shots to sample
    #[arg(short = 'n', long, default_value = "1024")]
    shots: u32,

    /// Seed for the sampling PRNG (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the shot histogram as CSV to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    if let Err(e) = execute(&cli) {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let source = read_source(cli.source.as_deref())?;

    let program = Program::assemble(&source);
    if let Some(error) = program.build_error() {
        bail!("{error}");
    }
    println!(
        "{} {} operations over {} active qubits",
        style("Assembled:").green().bold(),
        program.operations().len(),
        program.active_qubits().len()
    );

    let mut simulator = match cli.seed {
        Some(seed) => Simulator::with_seed(seed),
        None => Simulator::new(),
    };
    simulator.bind_program(&program);
    simulator.run(cli.shots);

    print_amplitudes(&simulator);
    print_results(simulator.results(), cli.shots);

    if let Some(path) = &cli.output {
        write_results_csv(path, simulator.results())
            .with_context(|| format!("failed to save {}", path.display()))?;
        println!("{} {}", style("Saved:").green().bold(), path.display());
    }

    Ok(())
}

fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}

/// Render a basis state as a ket label, qubit 0 first.
fn state_label(state: u8) -> String {
    format!("|{state:08b}>")
}

fn print_amplitudes(simulator: &Simulator<'_>) {
    println!("\n{}", style("Amplitudes").cyan().bold());
    for amplitude in simulator.amplitudes() {
        println!(
            "  {}  {:+.6} {:+.6}i  (p = {:.6})",
            state_label(amplitude.state),
            amplitude.amplitude.re,
            amplitude.amplitude.im,
            amplitude.amplitude.norm_sqr()
        );
    }
}

fn print_results(results: &[Outcome], shots: u32) {
    println!("\n{}", style("Results").cyan().bold());
    for outcome in results {
        let percent = if shots > 0 {
            f64::from(outcome.count) * 100.0 / f64::from(shots)
        } else {
            0.0
        };
        println!(
            "  {}  {:>8}  ({percent:.1}%)",
            state_label(outcome.state),
            outcome.count
        );
    }
}

fn write_results_csv(path: &Path, results: &[Outcome]) -> Result<()> {
    let mut contents = String::from("state,occurrences\n");
    for outcome in results {
        contents.push_str(&format!(
            "{},{}\n",
            state_label(outcome.state),
            outcome.count
        ));
    }
    fs::write(path, contents)?;
    Ok(())
}
