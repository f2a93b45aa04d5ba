//! Pipeline scheduler: the global cycle loop.
//!
//! One logical clock is shared by every core. Each cycle, each core's five
//! slots advance in strict reverse stage order (Writeback, Memory, Execute,
//! Decode, Fetch) so an instruction can never cross more than one stage
//! boundary per cycle; the payload is moved explicitly and the source slot
//! cleared. Cores are independent: they share only the read-only program
//! text and the process-wide counters, so any deterministic per-cycle core
//! order is acceptable and a plain index loop is used.

use tracing::{debug, trace};

use crate::common::{NUM_REGS, WORD_BYTES, Word};
use crate::config::Config;
use crate::core::pipeline::{CommitEntry, DecodeEntry, ExecuteEntry, PipelineRegs, hazards};
use crate::core::{Core, execute};
use crate::isa::{LatencyTable, decode};
use crate::memory::SharedMemory;
use crate::stats::SimStats;

/// Top-level simulator: all cores, their pipelines, the shared program and
/// memory, and the run-wide statistics.
#[derive(Debug)]
pub struct Simulator {
    cores: Vec<Core>,
    pipes: Vec<PipelineRegs>,
    program: Vec<String>,
    memory: SharedMemory,
    latencies: LatencyTable,
    forwarding: bool,
    trace_pipeline: bool,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator with every core at PC 0 and an empty pipeline.
    ///
    /// Every core executes its own copy of `program` against its own
    /// registers and memory partition.
    pub fn new(config: &Config, program: Vec<String>) -> Self {
        let num_cores = config.system.num_cores.max(1);
        Self {
            cores: (0..num_cores).map(Core::new).collect(),
            pipes: (0..num_cores).map(|_| PipelineRegs::default()).collect(),
            program,
            memory: SharedMemory::new(config.system.memory_words, num_cores),
            latencies: config.pipeline.latency_table(),
            forwarding: config.pipeline.forwarding,
            trace_pipeline: config.general.trace_pipeline,
            stats: SimStats::default(),
        }
    }

    /// Runs until no core is active, then returns the accumulated stats.
    ///
    /// A core is active while it has unread program text or any occupied
    /// pipeline slot. An empty program therefore runs for zero cycles.
    pub fn run(&mut self) -> &SimStats {
        while self.any_core_active() {
            self.step();
        }
        &self.stats
    }

    /// Advances the whole machine by one clock cycle.
    pub fn step(&mut self) {
        self.stats.cycles += 1;
        for idx in 0..self.cores.len() {
            self.advance_core(idx);
        }
        if self.trace_pipeline {
            self.emit_pipeline_diagram();
        }
    }

    fn any_core_active(&self) -> bool {
        self.cores
            .iter()
            .zip(&self.pipes)
            .any(|(core, pipe)| core.next_line < self.program.len() || pipe.occupied())
    }

    /// Advances one core's five stages, last stage first.
    fn advance_core(&mut self, idx: usize) {
        let core = &mut self.cores[idx];
        let pipe = &mut self.pipes[idx];
        core.stalled = false;

        // Writeback: retire.
        if let Some(done) = pipe.writeback.take() {
            self.stats.instructions_retired += 1;
            trace!(core = core.id, inst = %done.inst, "retire");
        }

        // Memory: pass through, no side effects in this model.
        pipe.writeback = pipe.memory.take();

        // Execute: count down, or apply the effect and promote.
        if let Some(mut exec) = pipe.execute.take() {
            if exec.remaining > 1 {
                exec.remaining -= 1;
                pipe.execute = Some(exec);
            } else {
                let writes = execute::apply(core, &exec.entry);
                pipe.memory = Some(CommitEntry {
                    inst: exec.entry.inst,
                    writes,
                });
            }
        }

        // Decode: forward or stall, then promote if Execute is free. A stall
        // gates fetching only; promotion out of Decode is gated by the
        // Execute slot being busy (which is what holds a consumer back while
        // a multi-cycle producer occupies it).
        if let Some(entry) = pipe.decode.as_mut() {
            if self.forwarding {
                hazards::resolve_forwards(
                    entry,
                    pipe.execute.as_ref(),
                    pipe.memory.as_ref(),
                    pipe.writeback.as_ref(),
                );
            } else if hazards::raw_hazard(
                entry,
                pipe.execute.as_ref(),
                pipe.memory.as_ref(),
                pipe.writeback.as_ref(),
            ) {
                core.stalled = true;
                self.stats.stalls_data += 1;
                debug!(core = core.id, inst = %entry.inst, "data hazard stall");
            }
        }
        if pipe.execute.is_none() {
            if let Some(entry) = pipe.decode.take() {
                let remaining = self.latencies.get(entry.inst.op);
                pipe.execute = Some(ExecuteEntry { entry, remaining });
            }
        }

        // Fetch: promote into Decode unless stalled.
        if !core.stalled && pipe.decode.is_none() {
            pipe.decode = pipe.fetch.take().map(DecodeEntry::new);
        }

        // Fetch a new instruction and advance the PC eagerly; branches may
        // overwrite the PC again from Execute.
        if !core.stalled && pipe.fetch.is_none() && core.next_line < self.program.len() {
            let line = &self.program[core.next_line];
            let inst = decode::decode_line(line, core.id, core.pc);
            trace!(core = core.id, inst = %inst, pc = core.pc, "fetch");
            core.pc = core.pc.wrapping_add(WORD_BYTES);
            core.next_line += 1;
            pipe.fetch = Some(inst);
        }
    }

    fn emit_pipeline_diagram(&self) {
        for (core, pipe) in self.cores.iter().zip(&self.pipes) {
            let slot = |pc: Option<Word>| {
                pc.map_or_else(|| format!("[{:^10}]", "-"), |pc| format!("[{pc:#010x}]"))
            };
            trace!(
                core = core.id,
                cycle = self.stats.cycles,
                "{} -> {} -> {} -> {} -> {}",
                slot(pipe.fetch.as_ref().map(|i| i.fetch_pc)),
                slot(pipe.decode.as_ref().map(|e| e.inst.fetch_pc)),
                slot(pipe.execute.as_ref().map(|e| e.entry.inst.fetch_pc)),
                slot(pipe.memory.as_ref().map(|c| c.inst.fetch_pc)),
                slot(pipe.writeback.as_ref().map(|c| c.inst.fetch_pc)),
            );
        }
    }

    /// Final register values of one core.
    pub fn registers(&self, core: usize) -> [Word; NUM_REGS] {
        self.cores[core].regs.dump()
    }

    /// Current PC of one core.
    pub fn pc(&self, core: usize) -> Word {
        self.cores[core].pc
    }

    /// Number of simulated cores.
    pub fn num_cores(&self) -> usize {
        self.cores.len()
    }

    /// The shared memory, for driver pre-population.
    pub fn memory_mut(&mut self) -> &mut SharedMemory {
        &mut self.memory
    }

    /// The shared memory, for inspection.
    pub fn memory(&self) -> &SharedMemory {
        &self.memory
    }

    /// The accumulated run statistics.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }
}
