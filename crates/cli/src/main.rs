//! Multi-core pipeline simulator CLI.
//!
//! This binary wires the simulation core to the outside world. It performs:
//! 1. **Program loading:** Reads the shared instruction text from a file.
//! 2. **Configuration:** Built-in defaults, an optional JSON config file, and
//!    flag overrides (core count, memory size, forwarding, latencies).
//! 3. **Reporting:** Final per-core registers, optional sorted memory
//!    partitions, and the run statistics.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mcsim_core::config::Config;
use mcsim_core::sim::loader;
use mcsim_core::{Simulator, common};

#[derive(Parser, Debug)]
#[command(
    name = "mcsim",
    version,
    about = "Multi-core five-stage pipeline simulator",
    long_about = "Runs a shared instruction-text program on N independent pipelined cores,\n\
                  modeling data hazards, operand forwarding, and per-opcode execute latencies.\n\n\
                  Examples:\n  mcsim program.txt\n  mcsim program.txt --cores 2 --no-forwarding\n  mcsim program.txt --latency ADD=3 --latency JAL=2"
)]
struct Cli {
    /// Program file: one instruction per line, `OPCODE ARG1 [ARG2 [ARG3]]`.
    program: PathBuf,

    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulated cores.
    #[arg(long)]
    cores: Option<usize>,

    /// Shared memory size in words.
    #[arg(long)]
    memory_words: Option<usize>,

    /// Disable the forwarding network (dependent instructions stall instead).
    #[arg(long)]
    no_forwarding: bool,

    /// Execute-latency override, `MNEMONIC=CYCLES`. Repeatable.
    #[arg(long, value_name = "OP=N", value_parser = parse_latency)]
    latency: Vec<(String, u64)>,

    /// Emit the per-cycle pipeline diagram (set RUST_LOG=trace to see it).
    #[arg(long)]
    trace: bool,

    /// Sort each core's memory partition before printing its head.
    #[arg(long)]
    sort_partitions: bool,
}

fn parse_latency(raw: &str) -> Result<(String, u64), String> {
    let (op, cycles) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected MNEMONIC=CYCLES, got '{raw}'"))?;
    let cycles: u64 = cycles
        .parse()
        .map_err(|e| format!("bad cycle count in '{raw}': {e}"))?;
    if cycles == 0 {
        return Err(format!("latency must be positive in '{raw}'"));
    }
    Ok((op.to_string(), cycles))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli);

    let program = loader::load_program(&cli.program).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    });

    println!(
        "Configuration: {} cores, {} memory words, forwarding {}",
        config.system.num_cores,
        config.system.memory_words,
        if config.pipeline.forwarding { "on" } else { "off" },
    );
    println!(
        "[*] Program: {} ({} instructions)",
        cli.program.display(),
        program.len()
    );

    let mut sim = Simulator::new(&config, program);
    let _ = sim.run();

    for core in 0..sim.num_cores() {
        dump_core(&sim, core);
    }

    if cli.sort_partitions {
        for core in 0..sim.num_cores() {
            sim.memory_mut().sort_partition(core);
        }
        dump_partitions(&sim);
    }

    sim.stats().print();
}

/// Builds the effective configuration: defaults, then the JSON file, then flags.
fn build_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: could not read config '{}': {e}", path.display());
                process::exit(1);
            });
            serde_json::from_str(&text).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: bad config '{}': {e}", path.display());
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    if let Some(cores) = cli.cores {
        config.system.num_cores = cores;
    }
    if let Some(words) = cli.memory_words {
        config.system.memory_words = words;
    }
    if cli.no_forwarding {
        config.pipeline.forwarding = false;
    }
    if cli.trace {
        config.general.trace_pipeline = true;
    }
    if !cli.latency.is_empty() {
        let overrides: HashMap<String, u64> = cli.latency.iter().cloned().collect();
        config.pipeline.latencies.extend(overrides);
    }
    config
}

fn dump_core(sim: &Simulator, core: usize) {
    let regs = sim.registers(core);
    println!("\nCore {core}  PC = {:#010x}", sim.pc(core));
    for i in (0..common::NUM_REGS).step_by(2) {
        println!(
            "x{:<2} = {:<12} x{:<2} = {:<12}",
            i,
            regs[i],
            i + 1,
            regs[i + 1]
        );
    }
}

fn dump_partitions(sim: &Simulator) {
    const PREVIEW: usize = 8;
    println!("\nMemory partitions (first {PREVIEW} words each, sorted):");
    for core in 0..sim.num_cores() {
        let part = sim.memory().partition(core);
        let head: Vec<String> = part.iter().take(PREVIEW).map(ToString::to_string).collect();
        println!("  core {core}: [{}]", head.join(", "));
    }
}
