//! Run statistics and optional CSV traces.
//!
//! Reception outcomes are counted once per (packet, receiver) pair. A failed
//! initial attempt that a blind retransmission repairs is moved from its
//! failure bucket to the successes.

use log::warn;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::NodeId;
use crate::scheduler::{ReselectionTrigger, SchedulerStats};
use crate::scheduler::types::ReservationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceptionOutcome {
    Success,
    /// The receiver transmitted in the same slot.
    HalfDuplex,
    /// Decoding failed without interference.
    Propagation,
    /// Decoding failed with interference from overlapping transmissions.
    Collision,
}

impl ReceptionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ReceptionOutcome::Success => "success",
            ReceptionOutcome::HalfDuplex => "half-duplex",
            ReceptionOutcome::Propagation => "propagation",
            ReceptionOutcome::Collision => "collision",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrrBin {
    pub attempts: u64,
    pub successes: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    pub generated: u64,
    pub expired: u64,
    pub transmissions: u64,
    pub retransmissions: u64,
    pub successes: u64,
    pub half_duplex_failures: u64,
    pub propagation_failures: u64,
    pub collision_failures: u64,
    /// SCIs lost to the control channel error model.
    pub sci_failures: u64,
    pub departed_nodes: u64,
    /// Scheduler counters of nodes that already left.
    pub departed_scheduler: SchedulerStats,
    prr_bin_m: f64,
    prr_bins: Vec<PrrBin>,
}

impl SimulationStats {
    pub fn new(prr_bin_m: f64) -> Self {
        Self {
            prr_bin_m,
            ..Self::default()
        }
    }

    fn bin_mut(&mut self, distance_m: f64) -> Option<&mut PrrBin> {
        if !(self.prr_bin_m > 0.0) || !distance_m.is_finite() || distance_m < 0.0 {
            return None;
        }
        let index = (distance_m / self.prr_bin_m) as usize;
        if self.prr_bins.len() <= index {
            self.prr_bins.resize(index + 1, PrrBin::default());
        }
        self.prr_bins.get_mut(index)
    }

    fn counter_mut(&mut self, outcome: ReceptionOutcome) -> &mut u64 {
        match outcome {
            ReceptionOutcome::Success => &mut self.successes,
            ReceptionOutcome::HalfDuplex => &mut self.half_duplex_failures,
            ReceptionOutcome::Propagation => &mut self.propagation_failures,
            ReceptionOutcome::Collision => &mut self.collision_failures,
        }
    }

    pub fn record_reception(&mut self, distance_m: f64, outcome: ReceptionOutcome) {
        *self.counter_mut(outcome) += 1;
        if let Some(bin) = self.bin_mut(distance_m) {
            bin.attempts += 1;
            if outcome == ReceptionOutcome::Success {
                bin.successes += 1;
            }
        }
    }

    /// A retransmission decoded a packet whose first attempt failed.
    pub fn record_recovery(&mut self, distance_m: f64, earlier: ReceptionOutcome) {
        if earlier == ReceptionOutcome::Success {
            return;
        }
        let counter = self.counter_mut(earlier);
        *counter = counter.saturating_sub(1);
        self.successes += 1;
        if let Some(bin) = self.bin_mut(distance_m) {
            bin.successes += 1;
        }
    }

    pub fn failures(&self) -> u64 {
        self.half_duplex_failures + self.propagation_failures + self.collision_failures
    }

    /// Packet reception ratio per distance bin, as (bin start in m, ratio).
    pub fn prr(&self) -> Vec<(f64, f64)> {
        self.prr_bins
            .iter()
            .enumerate()
            .filter(|(_, bin)| bin.attempts > 0)
            .map(|(i, bin)| (i as f64 * self.prr_bin_m, bin.successes as f64 / bin.attempts as f64))
            .collect()
    }

    pub fn overall_prr(&self) -> Option<f64> {
        let attempts = self.successes + self.failures();
        (attempts > 0).then(|| self.successes as f64 / attempts as f64)
    }
}

const SELECTIONS_HEADER: &str = "time_us,node,frame,subframe,subchannel_start,subchannel_count,retx_frame,retx_subframe,counter,rri_ms,trigger";
const RECEPTIONS_HEADER: &str = "time_us,tx_node,rx_node,packet_id,retransmission,distance_m,sinr_db,outcome";

fn open_trace(dir: &Path, name: &str, header: &str) -> Option<BufWriter<File>> {
    let path = dir.join(name);
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Cannot create trace file {}: {} (trace disabled)", path.display(), e);
            return None;
        }
    };
    let mut writer = BufWriter::new(file);
    match writeln!(writer, "{}", header) {
        Ok(()) => Some(writer),
        Err(e) => {
            warn!("Cannot write trace file {}: {} (trace disabled)", path.display(), e);
            None
        }
    }
}

fn write_line(slot: &mut Option<BufWriter<File>>, name: &str, line: std::fmt::Arguments<'_>) {
    let failed = match slot.as_mut() {
        Some(writer) => writer.write_fmt(format_args!("{}\n", line)).err(),
        None => None,
    };
    if let Some(e) = failed {
        warn!("Writing {} failed: {} (trace disabled)", name, e);
        *slot = None;
    }
}

/// CSV trace files of one run. Files that cannot be written are disabled
/// with a warning; the run goes on.
#[derive(Debug, Default)]
pub struct TraceWriter {
    dir: Option<PathBuf>,
    selections: Option<BufWriter<File>>,
    receptions: Option<BufWriter<File>>,
}

impl TraceWriter {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Create the trace directory and its files.
    ///
    /// # Arguments
    /// * `dir` - Output directory, created when missing
    /// * `description` - Run description written into README.txt
    pub fn open(dir: &Path, description: &str) -> Self {
        if let Err(e) = fs::create_dir_all(dir) {
            warn!("Cannot create trace directory {}: {} (traces disabled)", dir.display(), e);
            return Self::disabled();
        }
        let readme = format!(
            "Sidelink SPS simulation traces\nstarted: {}\n{}\n\nselections.csv: {}\nreceptions.csv: {}\n",
            chrono::Local::now().to_rfc3339(),
            description,
            SELECTIONS_HEADER,
            RECEPTIONS_HEADER
        );
        if let Err(e) = fs::write(dir.join("README.txt"), readme) {
            warn!("Cannot write {}: {}", dir.join("README.txt").display(), e);
        }
        Self {
            dir: Some(dir.to_path_buf()),
            selections: open_trace(dir, "selections.csv", SELECTIONS_HEADER),
            receptions: open_trace(dir, "receptions.csv", RECEPTIONS_HEADER),
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.selections.is_some() || self.receptions.is_some()
    }

    pub fn selection(&mut self, time_us: u64, node: NodeId, reservation: &ReservationState, trigger: Option<ReselectionTrigger>) {
        let r = &reservation.resource;
        let (retx_frame, retx_subframe) = reservation
            .retransmission
            .map_or((String::new(), String::new()), |x| (x.subframe.frame().to_string(), x.subframe.subframe().to_string()));
        write_line(
            &mut self.selections,
            "selections.csv",
            format_args!(
                "{},{},{},{},{},{},{},{},{},{},{}",
                time_us,
                node,
                r.subframe.frame(),
                r.subframe.subframe(),
                r.subchannel_start,
                r.subchannel_count,
                retx_frame,
                retx_subframe,
                reservation.reselection_counter,
                reservation.rri_ms,
                trigger.map_or_else(|| "initial".to_string(), |t| t.to_string())
            ),
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reception(
        &mut self,
        time_us: u64,
        tx: NodeId,
        rx: NodeId,
        packet_id: u64,
        retransmission: bool,
        distance_m: f64,
        sinr_db: f64,
        outcome: ReceptionOutcome,
    ) {
        write_line(
            &mut self.receptions,
            "receptions.csv",
            format_args!(
                "{},{},{},{},{},{:.1},{:.2},{}",
                time_us,
                tx,
                rx,
                packet_id,
                u8::from(retransmission),
                distance_m,
                sinr_db,
                outcome.label()
            ),
        );
    }

    pub fn flush(&mut self) {
        for (slot, name) in [(&mut self.selections, "selections.csv"), (&mut self.receptions, "receptions.csv")] {
            if let Some(e) = slot.as_mut().and_then(|w| w.flush().err()) {
                warn!("Flushing {} failed: {}", name, e);
                *slot = None;
            }
        }
    }
}
