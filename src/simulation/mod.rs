//! Discrete-event simulation core.
//!
//! This module drives the schedulers of every vehicle through simulated time.
//! It integrates:
//! - A time-ordered event queue with cancellable timers
//! - Per-node packet generators (periodic, aperiodic, ETSI CAM)
//! - Slot-by-slot reception with SINR, block error and half-duplex checks
//! - Statistics and optional trace files
//!
//! ## Module Organization
//!
//! - `event_queue`: Event ordering and timer cancellation
//! - `context`: World state shared by the event handlers
//! - `traffic`: Packet generation models
//! - `stats`: Counters, PRR by distance and trace writers
//! - `network`: Event handlers and the main loop
//!
//! ## Public API
//!
//! Build a `SimulationContext` from a validated configuration and scene, then
//! call `run`.

pub mod context;
pub mod event_queue;
pub mod network;
pub mod stats;
pub mod traffic;

pub use context::{SimulationContext, SimulationError};
pub use network::run;
pub use stats::{SimulationStats, TraceWriter};
