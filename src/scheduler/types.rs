//! Values shared by the sensing, candidate, selection and reservation steps.

use std::fmt;
use thiserror::Error;

use crate::NodeId;
use crate::amc::{Allocation, Amc, AmcError};
use crate::numerology::Numerology;
use crate::subframe::SubframeInfo;

/// Resource reservation intervals a UE may advertise, in ms.
pub const ALLOWED_RRIS_MS: [u32; 13] = [0, 20, 50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 1000];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("selection window [n+{t1}, n+{t2}] at {now} contains no PSSCH resource")]
    EmptyWindow { now: SubframeInfo, t1: u32, t2: u32 },
    #[error("candidate set is empty")]
    NoCandidate,
    #[error("reservation needs {needed} sub-channels but the pool only has {available}")]
    NotEnoughSubchannels { needed: u16, available: u16 },
    #[error("resource reservation interval {0} ms is not allowed")]
    InvalidRri(u32),
    #[error(transparent)]
    Amc(#[from] AmcError),
}

/// One transmittable opportunity: `subchannel_count` contiguous sub-channels
/// starting at `subchannel_start` in slot `subframe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateResource {
    pub subframe: SubframeInfo,
    pub subchannel_start: u16,
    pub subchannel_count: u16,
}

impl CandidateResource {
    pub fn covers(&self, subchannel: u16) -> bool {
        subchannel >= self.subchannel_start && subchannel < self.subchannel_start + self.subchannel_count
    }

    pub fn subchannels(&self) -> std::ops::Range<u16> {
        self.subchannel_start..self.subchannel_start + self.subchannel_count
    }

    pub fn rb_start(&self, subchannel_size: u16) -> u16 {
        self.subchannel_start * subchannel_size
    }

    pub fn rb_len(&self, subchannel_size: u16) -> u16 {
        self.subchannel_count * subchannel_size
    }

    /// The same frequency allocation `slots` later.
    pub fn shifted(&self, slots: u32) -> Self {
        Self {
            subframe: self.subframe + slots,
            ..*self
        }
    }
}

impl fmt::Display for CandidateResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SF({}) sub-channels {}..{}", self.subframe, self.subchannel_start, self.subchannel_start + self.subchannel_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficType {
    Periodic,
    Aperiodic,
}

/// How an aperiodic packet interacts with an existing reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AperiodicStrategy {
    /// Reselect immediately for every aperiodic packet.
    Aggressive,
    /// Reuse the reservation when its next occasion meets the delay budget
    /// and its size fits, reselect otherwise.
    StandardSsps,
    /// Wait for the next reserved occasion; drop when it misses the budget.
    #[default]
    Submissive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReselectionTrigger {
    Counter,
    Latency,
    Size,
    LatencyAndSize,
}

impl ReselectionTrigger {
    pub fn classify(latency_miss: bool, size_miss: bool) -> Option<Self> {
        match (latency_miss, size_miss) {
            (true, true) => Some(ReselectionTrigger::LatencyAndSize),
            (true, false) => Some(ReselectionTrigger::Latency),
            (false, true) => Some(ReselectionTrigger::Size),
            (false, false) => None,
        }
    }
}

impl fmt::Display for ReselectionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReselectionTrigger::Counter => write!(f, "counter"),
            ReselectionTrigger::Latency => write!(f, "latency"),
            ReselectionTrigger::Size => write!(f, "size"),
            ReselectionTrigger::LatencyAndSize => write!(f, "latency+size"),
        }
    }
}

/// Lifecycle of one sidelink flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Sensing,
    Selecting,
    Reserved,
}

/// Ranking applied to the candidate set before the final random draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMetric {
    #[default]
    Random,
    /// Keep the fifth of candidates with the lowest sensed power.
    LowestInterference,
}

/// Active semi-persistent reservation of a flow.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationState {
    /// Next reserved occasion.
    pub resource: CandidateResource,
    /// Blind retransmission paired with the next occasion.
    pub retransmission: Option<CandidateResource>,
    pub reselection_counter: u32,
    pub rri_ms: u32,
    pub packet_size: u32,
    /// Bytes the reserved allocation carries.
    pub reservation_size: u32,
    pub traffic_type: TrafficType,
    pub allocation: Allocation,
}

/// Tunables of the autonomous scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerParams {
    pub numerology: Numerology,
    pub subchannel_size: u16,
    pub mcs: u8,
    pub amc: Amc,
    /// Selection window start, slots after the trigger.
    pub t1: u32,
    pub rsrp_threshold_dbm: f64,
    pub threshold_step_db: f64,
    /// Fraction of the window that must survive exclusion.
    pub size_threshold: f64,
    pub sensing_window_ms: u32,
    /// Check every future occasion of a candidate, not only the first.
    pub use_tx_cresel: bool,
    /// Project sensed reservations over their advertised counter.
    pub use_rx_cresel: bool,
    /// Skip sensing and pick uniformly in the window.
    pub random_selection: bool,
    pub metric: SelectionMetric,
    pub blind_retransmission: bool,
    pub dynamic_scheduling: bool,
    pub keep_probability: f64,
    pub allowed_rris_ms: Vec<u32>,
    pub aperiodic_strategy: AperiodicStrategy,
    /// Bytes reserved at least, independent of the first packet.
    pub reservation_size: Option<u32>,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            numerology: Numerology::default(),
            subchannel_size: 10,
            mcs: 14,
            amc: Amc::default(),
            t1: 2,
            rsrp_threshold_dbm: -128.0,
            threshold_step_db: 3.0,
            size_threshold: 0.2,
            sensing_window_ms: 1000,
            use_tx_cresel: false,
            use_rx_cresel: false,
            random_selection: false,
            metric: SelectionMetric::Random,
            blind_retransmission: false,
            dynamic_scheduling: false,
            keep_probability: 0.0,
            allowed_rris_ms: vec![100],
            aperiodic_strategy: AperiodicStrategy::Submissive,
            reservation_size: None,
        }
    }
}

impl SchedulerParams {
    pub fn slots_in_ms(&self, ms: u32) -> u32 {
        self.numerology.slots_in_ms(ms)
    }

    /// Selection window end for a packet delay budget.
    pub fn t2(&self, pdb_ms: u32) -> u32 {
        self.slots_in_ms(pdb_ms).saturating_sub(1)
    }
}

/// A packet handed to the MAC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacketRequest {
    pub packet_id: u64,
    pub size: u32,
    pub traffic_type: TrafficType,
    pub pdb_ms: u32,
    /// Interval advertised for a periodic reservation.
    pub rri_ms: u32,
    pub generated_us: u64,
}

/// PSCCH report of another node's transmission, as used for sensing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensingReport {
    pub node_id: NodeId,
    pub sensed_at: SubframeInfo,
    pub received_us: u64,
    pub rb_start: u16,
    pub rb_len: u16,
    pub rsrp_dbm: f64,
    pub rri_ms: u32,
    pub reselection_counter: u32,
    pub is_retransmission: bool,
}

/// A transmission the MAC puts on the air in the current slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transmission {
    pub packet_id: u64,
    pub subframe: SubframeInfo,
    pub resource: CandidateResource,
    pub rb_start: u16,
    pub rb_len: u16,
    pub size: u32,
    pub mcs: u8,
    pub is_retransmission: bool,
    /// Reservation interval advertised in the SCI; 0 for one-shot.
    pub rri_ms: u32,
    /// Remaining reselection counter advertised in the SCI.
    pub reselection_counter: u32,
    pub generated_us: u64,
}

/// What happened to a packet handed to the MAC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PacketDecision {
    Scheduled {
        first: SubframeInfo,
        reselection: Option<ReselectionTrigger>,
    },
    Dropped,
}

/// Counters kept per flow.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SchedulerStats {
    pub selections: u64,
    pub counter_reselections: u64,
    pub latency_reselections: u64,
    pub size_reselections: u64,
    pub latency_and_size_reselections: u64,
    pub relaxed_selections: u64,
    pub fallback_selections: u64,
    pub half_duplex_skips: u64,
    pub used_reservations: u64,
    pub unutilized_reservations: u64,
    pub kept_reservations: u64,
    pub dropped_packets: u64,
    pub transmissions: u64,
}

impl SchedulerStats {
    pub fn record_trigger(&mut self, trigger: ReselectionTrigger) {
        match trigger {
            ReselectionTrigger::Counter => self.counter_reselections += 1,
            ReselectionTrigger::Latency => self.latency_reselections += 1,
            ReselectionTrigger::Size => self.size_reselections += 1,
            ReselectionTrigger::LatencyAndSize => self.latency_and_size_reselections += 1,
        }
    }

    pub fn merge(&mut self, other: &SchedulerStats) {
        self.selections += other.selections;
        self.counter_reselections += other.counter_reselections;
        self.latency_reselections += other.latency_reselections;
        self.size_reselections += other.size_reselections;
        self.latency_and_size_reselections += other.latency_and_size_reselections;
        self.relaxed_selections += other.relaxed_selections;
        self.fallback_selections += other.fallback_selections;
        self.half_duplex_skips += other.half_duplex_skips;
        self.used_reservations += other.used_reservations;
        self.unutilized_reservations += other.unutilized_reservations;
        self.kept_reservations += other.kept_reservations;
        self.dropped_packets += other.dropped_packets;
        self.transmissions += other.transmissions;
    }
}
