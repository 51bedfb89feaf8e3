//! World state of one simulation run.
//!
//! Everything the event handlers mutate lives here: the event queue, the
//! per-node state keyed by node id, the packet id counter, the channel model,
//! the region filter, the random source and the statistics.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

use super::event_queue::{EventQueue, Phase, SimTime, TimerHandle};
use super::stats::{ReceptionOutcome, SimulationStats, TraceWriter};
use super::traffic::{NodeTraffic, assign_traffic};
use crate::NodeId;
use crate::config::{Config, ConfigError};
use crate::error_model::{ErrorModelError, HarqProcessInfo};
use crate::geometry::{GeometryError, Point, PosEnabler};
use crate::numerology::Numerology;
use crate::pool::{PoolError, ResourcePool};
use crate::propagation::ChannelModel;
use crate::scene::Scene;
use crate::scheduler::{AutonomousScheduler, PacketRequest, SchedulerError, SchedulerStats, Transmission};
use crate::subframe::SubframeError;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error(transparent)]
    ErrorModel(#[from] ErrorModelError),
    #[error(transparent)]
    Subframe(#[from] SubframeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Evaluate the transmissions of the previous slot.
    Reception,
    Mobility,
    /// A node's traffic timer fired.
    Traffic(NodeId),
    /// Hand queued packets to the MACs and collect this slot's transmissions.
    Mac,
    Report,
}

/// Soft-combining state of one packet at one receiver.
#[derive(Debug, Clone)]
pub struct HarqEntry {
    pub harq: HarqProcessInfo,
    pub outcome: ReceptionOutcome,
    pub first_us: SimTime,
}

#[derive(Debug)]
pub struct NodeState {
    pub position: Point,
    pub velocity: Point,
    pub tx_power_dbm: f64,
    pub scheduler: AutonomousScheduler,
    pub traffic: NodeTraffic,
    /// Packets generated but not yet handed to the MAC.
    pub arrivals: VecDeque<PacketRequest>,
    pub traffic_timer: Option<TimerHandle>,
    /// Keyed by (transmitter, packet id).
    pub harq: HashMap<(NodeId, u64), HarqEntry>,
}

/// A transmission on the air during the current slot.
#[derive(Debug, Clone, Copy)]
pub struct OnAir {
    pub node_id: NodeId,
    pub position: Point,
    pub tx_power_dbm: f64,
    pub tx: Transmission,
}

#[derive(Debug)]
pub struct SimulationContext {
    pub queue: EventQueue<Event>,
    pub nodes: HashMap<NodeId, NodeState>,
    pub(super) next_packet_id: u64,
    pub channel: ChannelModel,
    pub enabler: PosEnabler,
    pub pool: ResourcePool,
    pub rng: StdRng,
    pub stats: SimulationStats,
    pub traces: TraceWriter,
    pub config: Config,
    pub scene: Scene,
    pub numerology: Numerology,
    pub on_air: Vec<OnAir>,
}

impl SimulationContext {
    /// Build the world of a validated configuration and scene.
    ///
    /// # Parameters
    ///
    /// * `config` - Run configuration
    /// * `scene` - Nodes, resource pool, propagation and regions
    /// * `traces` - Trace output, possibly disabled
    ///
    /// # Returns
    ///
    /// The context with every node's traffic timer and the first slot,
    /// mobility and report events queued.
    pub fn new(config: Config, scene: Scene, traces: TraceWriter) -> Result<Self, SimulationError> {
        config.validate()?;
        let params = config.scheduler_params()?;
        let numerology = config.numerology()?;
        let pool = scene.resource_pool()?;
        let enabler = scene.pos_enabler()?;
        let mut rng = StdRng::seed_from_u64(config.simulation.seed ^ config.simulation.run);

        let ids: Vec<NodeId> = scene.nodes.iter().map(|n| n.node_id).collect();
        let mut traffic = assign_traffic(config.traffic_model()?, &config.traffic, &ids, &mut rng)?;
        let mut queue = EventQueue::new();
        let mut nodes = HashMap::with_capacity(scene.nodes.len());
        for spec in &scene.nodes {
            let Some(index) = traffic.iter().position(|(id, _)| *id == spec.node_id) else {
                continue;
            };
            let (_, node_traffic) = traffic.swap_remove(index);
            let timer = queue.schedule_at(node_traffic.first_delay_us(&mut rng), Phase::Traffic, Event::Traffic(spec.node_id));
            nodes.insert(
                spec.node_id,
                NodeState {
                    position: spec.position,
                    velocity: spec.velocity,
                    tx_power_dbm: spec.tx_power_dbm,
                    scheduler: AutonomousScheduler::new(spec.node_id, params.clone()),
                    traffic: node_traffic,
                    arrivals: VecDeque::new(),
                    traffic_timer: Some(timer),
                    harq: HashMap::new(),
                },
            );
        }

        queue.schedule_at(0, Phase::Reception, Event::Reception);
        queue.schedule_at(0, Phase::Mac, Event::Mac);
        queue.schedule_at(config.simulation.mobility_interval_ms * 1000, Phase::Mobility, Event::Mobility);
        queue.schedule_at(config.simulation.report_interval_ms * 1000, Phase::Report, Event::Report);

        info!(
            "Simulation initialized: {} nodes, pool period {} subframes, {} sub-channels, seed {} run {}",
            nodes.len(),
            pool.period(),
            pool.subchannel_count(params.subchannel_size),
            config.simulation.seed,
            config.simulation.run
        );

        Ok(Self {
            queue,
            nodes,
            next_packet_id: 0,
            channel: ChannelModel::new(scene.propagation.clone()),
            enabler,
            pool,
            rng,
            stats: SimulationStats::new(config.simulation.prr_bin_m),
            traces,
            config,
            scene,
            numerology,
            on_air: Vec::new(),
        })
    }

    pub fn now_us(&self) -> SimTime {
        self.queue.now()
    }

    /// Node ids in ascending order, for deterministic iteration.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn positions(&self) -> HashMap<NodeId, Point> {
        self.nodes.iter().map(|(id, n)| (*id, n.position)).collect()
    }

    /// Tear a node down: cancel its timers, drop its flow and forget its links.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(mut node) = self.nodes.remove(&id) else {
            return false;
        };
        if let Some(timer) = node.traffic_timer.take() {
            self.queue.cancel(timer);
        }
        node.scheduler.teardown();
        self.stats.departed_scheduler.merge(node.scheduler.stats());
        self.stats.expired += node.arrivals.len() as u64;
        self.channel.forget_node(id);
        self.on_air.retain(|a| a.node_id != id);
        self.stats.departed_nodes += 1;
        debug!("node {} left the simulation", id);
        true
    }

    /// Scheduler counters of every node, present or departed.
    pub fn scheduler_stats(&self) -> SchedulerStats {
        let mut total = self.stats.departed_scheduler;
        for node in self.nodes.values() {
            total.merge(node.scheduler.stats());
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::parse_scene;
    use crate::scene::tests::scene_json;

    fn context(nodes: &str) -> SimulationContext {
        let scene = parse_scene(&scene_json(nodes)).unwrap();
        SimulationContext::new(Config::default(), scene, TraceWriter::disabled()).unwrap()
    }

    #[test]
    fn every_node_gets_a_traffic_timer() {
        let ctx = context(
            r#"{ "node_id": 7, "position": { "x": 10.0, "y": 5.0 } },
               { "node_id": 3, "position": { "x": 60.0, "y": 5.0 } }"#,
        );
        assert_eq!(ctx.node_ids(), vec![3, 7]);
        for node in ctx.nodes.values() {
            assert!(node.traffic_timer.is_some_and(|t| ctx.queue.is_pending(t)));
        }
        // two traffic timers, first slot reception and MAC, mobility, report
        assert_eq!(ctx.queue.len(), 6);
    }

    #[test]
    fn removing_a_node_cancels_its_timer() {
        let mut ctx = context(
            r#"{ "node_id": 1, "position": { "x": 10.0, "y": 5.0 } },
               { "node_id": 2, "position": { "x": 60.0, "y": 5.0 } }"#,
        );
        let timer = ctx.nodes[&1].traffic_timer.unwrap();
        assert!(ctx.remove_node(1));
        assert!(!ctx.queue.is_pending(timer));
        assert!(!ctx.remove_node(1));
        assert_eq!(ctx.node_ids(), vec![2]);
        assert_eq!(ctx.stats.departed_nodes, 1);
        assert_eq!(ctx.queue.len(), 5);
    }

    #[test]
    fn contradicting_configuration_is_fatal() {
        let scene = parse_scene(&scene_json(r#"{ "node_id": 1, "position": { "x": 10.0, "y": 5.0 } }"#)).unwrap();
        let mut config = Config::default();
        config.traffic.aperiodic = true;
        let err = SimulationContext::new(config, scene, TraceWriter::disabled()).unwrap_err();
        assert!(matches!(err, SimulationError::Config(ConfigError::TrafficModels(_))));
    }
}
