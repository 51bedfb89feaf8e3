//! Sensing-based autonomous resource selection (sidelink mode 4/2).
//!
//! - `types`: resources, reservations, parameters and errors
//! - `sensing`: per-UE history of decoded SCIs and own transmissions
//! - `candidate`: selection window and exclusion with threshold relaxation
//! - `selection`: final draw, reselection counter and retransmission choice
//! - `autonomous`: per-flow reservation state machine

pub mod autonomous;
pub mod candidate;
pub mod selection;
pub mod sensing;
pub mod types;

pub use autonomous::AutonomousScheduler;
pub use candidate::{CandidateSet, SelectionRequest, build_candidate_set};
pub use types::{
    AperiodicStrategy, CandidateResource, FlowState, PacketDecision, PacketRequest, ReselectionTrigger, SchedulerError,
    SchedulerParams, SchedulerStats, SelectionMetric, SensingReport, TrafficType, Transmission,
};
