//! Simulation statistics collection and reporting.
//!
//! Tracks the process-wide counters accumulated by the scheduler:
//! 1. **Cycles:** Global lockstep cycles with at least one active core.
//! 2. **Stalls:** Data-hazard stalls recorded across all cores.
//! 3. **Retired instructions:** Instructions that left Writeback.

use std::time::Instant;

/// Process-wide simulation counters.
#[derive(Debug, Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Stall cycles recorded by the hazard detection unit (RAW dependencies).
    pub stalls_data: u64,
    /// Number of instructions retired at Writeback, summed over all cores.
    pub instructions_retired: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            stalls_data: 0,
            instructions_retired: 0,
        }
    }
}

impl SimStats {
    /// Prints the statistics report to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1);
        let ipc = self.instructions_retired as f64 / cyc as f64;
        println!("\n==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {ipc:.4}");
        println!(
            "stalls.data              {} ({:.2}%)",
            self.stalls_data,
            (self.stalls_data as f64 / cyc as f64) * 100.0
        );
        println!("==========================================================");
    }
}
