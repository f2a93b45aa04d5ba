//! Whole-machine scheduler tests.
//!
//! These run complete programs through the cycle loop and check the
//! observable contract: cycle counts, recorded stalls, retired-instruction
//! counts, and final architectural state, with and without forwarding.

use pretty_assertions::assert_eq;

use mcsim_core::{Config, Simulator};

fn config(cores: usize, forwarding: bool) -> Config {
    let mut config = Config::default();
    config.system.num_cores = cores;
    config.system.memory_words = 64;
    config.pipeline.forwarding = forwarding;
    config
}

fn program(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn empty_program_runs_zero_cycles() {
    let mut sim = Simulator::new(&config(1, true), Vec::new());
    let stats = sim.run();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.instructions_retired, 0);
}

/// A hazard-free program of L instructions drains in L + 5 cycles: the last
/// instruction is fetched on cycle L and needs five more to retire.
#[test]
fn independent_program_takes_length_plus_five_cycles() {
    let mut sim = Simulator::new(&config(1, true), program(&["ADD x4 x1 x2"]));
    assert_eq!(sim.run().cycles, 6);

    let mut sim = Simulator::new(
        &config(1, true),
        program(&["ADD x4 x1 x2", "ADD x6 x1 x2"]),
    );
    let stats = sim.run();
    assert_eq!(stats.cycles, 7);
    assert_eq!(stats.stalls_data, 0);
    assert_eq!(stats.instructions_retired, 2);
}

/// Back-to-back dependent instructions with forwarding disabled cost exactly
/// one recorded stall: the consumer waits one cycle for the producer to
/// clear Execute, and by then the register file is current.
#[test]
fn dependent_pair_stalls_once_without_forwarding() {
    let mut sim = Simulator::new(
        &config(1, false),
        program(&["ADD x4 x1 x2", "SUB x5 x4 x3"]),
    );
    let stats = sim.run();
    assert_eq!(stats.stalls_data, 1);
    assert_eq!(stats.cycles, 7);
}

/// The same dependent pair with forwarding enabled never stalls; the
/// producer's result is bypassed from the Memory slot.
#[test]
fn forwarding_eliminates_the_stall() {
    let mut sim = Simulator::new(
        &config(1, true),
        program(&["ADD x4 x1 x2", "SUB x5 x4 x3"]),
    );
    let stats = sim.run();
    assert_eq!(stats.stalls_data, 0);
    assert_eq!(sim.registers(0)[5], 0);
}

/// A latency-N producer holds a dependent consumer in Decode for N recorded
/// stalls when forwarding is off.
#[test]
fn multi_cycle_producer_stalls_for_its_latency() {
    let mut config = config(1, false);
    config.pipeline.latencies.insert("ADD".to_owned(), 3);
    let mut sim = Simulator::new(&config, program(&["ADD x4 x1 x2", "SUB x5 x4 x3"]));
    let stats = sim.run();
    assert_eq!(stats.stalls_data, 3);
    assert_eq!(stats.cycles, 9);
}

/// Register x3 is seeded with the core id, so the same program text yields
/// per-core results: x4 = x1 + x2 = 0 and x5 = x4 - x3 = -id.
#[test]
fn cores_compute_independent_results() {
    let mut sim = Simulator::new(
        &config(4, true),
        program(&["ADD x4 x1 x2", "SUB x5 x4 x3"]),
    );
    sim.run();
    for core in 0..4 {
        let regs = sim.registers(core);
        let id = i32::try_from(core).unwrap();
        assert_eq!(regs[3], id);
        assert_eq!(regs[4], 0);
        assert_eq!(regs[5], -id);
    }
}

/// A SWAP between a producer and its consumer rewrites the produced
/// register; the consumer must receive the post-swap value from the bypass
/// network, not the older producer's stale result from Writeback.
#[test]
fn forwarding_sees_swap_rewrite_of_produced_register() {
    let mut sim = Simulator::new(
        &config(2, true),
        program(&["ADD x4 x3 x3", "SWAP x4 x6", "ADD x7 x4 x3"]),
    );
    let stats = sim.run();
    assert_eq!(stats.stalls_data, 0);
    for core in 0..2 {
        let regs = sim.registers(core);
        let id = i32::try_from(core).unwrap();
        assert_eq!(regs[4], 0, "x4 took x6's pre-swap zero");
        assert_eq!(regs[6], 2 * id, "x6 took the ADD result");
        assert_eq!(regs[7], id, "x7 = post-swap x4 + x3");
    }
}

/// All cores share one clock; N identical cores finish in the same cycle
/// count as one.
#[test]
fn multi_core_run_shares_the_clock() {
    let mut one = Simulator::new(&config(1, true), program(&["ADD x4 x1 x2"]));
    let mut four = Simulator::new(&config(4, true), program(&["ADD x4 x1 x2"]));
    assert_eq!(one.run().cycles, four.run().cycles);
    assert_eq!(four.stats().instructions_retired, 4);
}

/// JAL writes the post-jump PC to the link register even through the full
/// pipeline, where the fetch stage has already advanced the PC eagerly.
#[test]
fn jal_through_the_pipeline_links_post_jump_pc() {
    // Fetch bumps the PC 0 -> 4, then JAL adds 12 and links 16.
    let mut sim = Simulator::new(&config(1, true), program(&["JAL x2 12"]));
    sim.run();
    assert_eq!(sim.registers(0)[2], 16);
    assert_eq!(sim.pc(0), 16);
}

/// An unrecognized mnemonic flows through all five stages as a no-op and
/// still counts as retired.
#[test]
fn unknown_instruction_is_a_pipeline_noop() {
    let mut sim = Simulator::new(&config(1, true), program(&["FOO x1 x2"]));
    let stats = sim.run();
    assert_eq!(stats.cycles, 6);
    assert_eq!(stats.instructions_retired, 1);
    assert_eq!(stats.stalls_data, 0);
}

#[test]
fn swap_program_exchanges_registers() {
    // x3 holds the core id; swap it with x7 (zero).
    let mut sim = Simulator::new(&config(2, true), program(&["SWAP x3 x7"]));
    sim.run();
    let regs = sim.registers(1);
    assert_eq!(regs[3], 0);
    assert_eq!(regs[7], 1);
}

/// Zero configured cores is clamped to one rather than producing a machine
/// that can never drain.
#[test]
fn zero_cores_clamps_to_one() {
    let sim = Simulator::new(&config(0, true), Vec::new());
    assert_eq!(sim.num_cores(), 1);
}

#[test]
fn memory_prepopulation_survives_a_run() {
    let mut sim = Simulator::new(&config(2, true), program(&["ADD x4 x1 x2"]));
    sim.memory_mut().partition_mut(1).fill(7);
    sim.run();
    assert!(sim.memory().partition(1).iter().all(|&w| w == 7));
    assert!(sim.memory().partition(0).iter().all(|&w| w == 0));
}
