//! Packet generation models.
//!
//! Each node owns one generator. The engine calls `on_timer` whenever the
//! node's traffic timer fires and re-arms the timer with `next_delay_us`.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, Exp};

use crate::NodeId;
use crate::config::{ConfigError, TrafficModel, TrafficSection};
use crate::geometry::Point;
use crate::scheduler::TrafficType;

/// ETSI CAM generation conditions are checked at this period.
const CAM_CHECK_US: u64 = 100_000;
const CAM_MAX_INTERVAL_US: u64 = 1_000_000;
const CAM_HEADING_DEG: f64 = 4.0;
const CAM_POSITION_M: f64 = 4.0;
const CAM_SPEED_MPS: f64 = 0.5;

/// Kinematic state at the last generated CAM.
#[derive(Debug, Clone)]
pub struct CamGenerator {
    last: Option<(u64, Point, Point)>,
    count: u32,
    size: u32,
    large_size: u32,
    large_every: u32,
}

fn heading_deg(velocity: &Point) -> f64 {
    velocity.y.atan2(velocity.x).to_degrees()
}

fn speed(velocity: &Point) -> f64 {
    velocity.x.hypot(velocity.y)
}

impl CamGenerator {
    pub fn new(size: u32, large_size: u32, large_every: u32) -> Self {
        Self {
            last: None,
            count: 0,
            size,
            large_size,
            large_every: large_every.max(1),
        }
    }

    /// Size of the CAM due now, if any trigger condition holds.
    pub fn check(&mut self, now_us: u64, position: Point, velocity: Point) -> Option<u32> {
        let due = match self.last {
            None => true,
            Some((at, last_position, last_velocity)) => {
                let heading_change = (heading_deg(&velocity) - heading_deg(&last_velocity)).rem_euclid(360.0);
                let heading_change = heading_change.min(360.0 - heading_change);
                now_us.saturating_sub(at) >= CAM_MAX_INTERVAL_US
                    || (speed(&velocity) > 0.0 && heading_change > CAM_HEADING_DEG)
                    || position.distance(&last_position) > CAM_POSITION_M
                    || (speed(&velocity) - speed(&last_velocity)).abs() > CAM_SPEED_MPS
            }
        };
        if !due {
            return None;
        }
        self.last = Some((now_us, position, velocity));
        self.count += 1;
        Some(if self.count % self.large_every == 1 || self.large_every == 1 {
            self.large_size
        } else {
            self.size
        })
    }
}

#[derive(Debug, Clone)]
pub enum NodeTraffic {
    Periodic { interval_us: u64, size: u32 },
    Aperiodic { min_interval_us: u64, gap_ms: Exp<f64>, sizes: Vec<u32> },
    Cam(CamGenerator),
}

impl NodeTraffic {
    pub fn periodic(section: &TrafficSection) -> Self {
        NodeTraffic::Periodic {
            interval_us: u64::from(section.rri_ms) * 1000,
            size: section.packet_size,
        }
    }

    pub fn aperiodic(section: &TrafficSection) -> Result<Self, ConfigError> {
        let not_positive = ConfigError::NotPositive { name: "aperiodic-mean-ms" };
        if !(section.aperiodic_mean_ms > 0.0) {
            return Err(not_positive);
        }
        let gap_ms = Exp::new(1.0 / section.aperiodic_mean_ms).map_err(|_| not_positive)?;
        if section.aperiodic_sizes.is_empty() {
            return Err(ConfigError::NoAperiodicSizes);
        }
        Ok(NodeTraffic::Aperiodic {
            min_interval_us: section.aperiodic_min_interval_ms * 1000,
            gap_ms,
            sizes: section.aperiodic_sizes.clone(),
        })
    }

    pub fn cam(section: &TrafficSection) -> Self {
        NodeTraffic::Cam(CamGenerator::new(section.cam_size, section.cam_large_size, section.cam_large_every))
    }

    pub fn traffic_type(&self) -> TrafficType {
        match self {
            NodeTraffic::Periodic { .. } => TrafficType::Periodic,
            NodeTraffic::Aperiodic { .. } | NodeTraffic::Cam(_) => TrafficType::Aperiodic,
        }
    }

    /// Random phase of the first timer so nodes do not start in lockstep.
    pub fn first_delay_us<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let span = match self {
            NodeTraffic::Periodic { interval_us, .. } => *interval_us,
            NodeTraffic::Aperiodic { min_interval_us, .. } => *min_interval_us,
            NodeTraffic::Cam(_) => CAM_CHECK_US,
        };
        if span == 0 { 0 } else { rng.gen_range(0..span) }
    }

    /// Delay until the timer fires again, at least one microsecond.
    pub fn next_delay_us<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let delay = match self {
            NodeTraffic::Periodic { interval_us, .. } => *interval_us,
            NodeTraffic::Aperiodic { min_interval_us, gap_ms, .. } => {
                min_interval_us + (gap_ms.sample(rng) * 1000.0).round() as u64
            }
            NodeTraffic::Cam(_) => CAM_CHECK_US,
        };
        delay.max(1)
    }

    /// Size of the packet generated when the timer fires, if any.
    pub fn on_timer<R: Rng + ?Sized>(&mut self, now_us: u64, position: Point, velocity: Point, rng: &mut R) -> Option<u32> {
        match self {
            NodeTraffic::Periodic { size, .. } => Some(*size),
            NodeTraffic::Aperiodic { sizes, .. } => sizes.choose(rng).copied(),
            NodeTraffic::Cam(cam) => cam.check(now_us, position, velocity),
        }
    }
}

/// Give every node its generator. Under the mixed model the configured share
/// of nodes, picked at random, is periodic.
pub fn assign_traffic<R: Rng + ?Sized>(
    model: TrafficModel,
    section: &TrafficSection,
    node_ids: &[NodeId],
    rng: &mut R,
) -> Result<Vec<(NodeId, NodeTraffic)>, ConfigError> {
    let mut ids = node_ids.to_vec();
    ids.sort_unstable();
    match model {
        TrafficModel::Periodic => Ok(ids.into_iter().map(|id| (id, NodeTraffic::periodic(section))).collect()),
        TrafficModel::Etsi => Ok(ids.into_iter().map(|id| (id, NodeTraffic::cam(section))).collect()),
        TrafficModel::Aperiodic => ids
            .into_iter()
            .map(|id| NodeTraffic::aperiodic(section).map(|t| (id, t)))
            .collect(),
        TrafficModel::Mixed { periodic_percentage } => {
            ids.shuffle(rng);
            let periodic = (ids.len() * usize::from(periodic_percentage) + 50) / 100;
            let mut assigned = Vec::with_capacity(ids.len());
            for (i, id) in ids.into_iter().enumerate() {
                let traffic = if i < periodic {
                    NodeTraffic::periodic(section)
                } else {
                    NodeTraffic::aperiodic(section)?
                };
                assigned.push((id, traffic));
            }
            assigned.sort_unstable_by_key(|(id, _)| *id);
            Ok(assigned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn periodic_nodes_repeat_at_the_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut t = NodeTraffic::periodic(&TrafficSection::default());
        assert!(t.first_delay_us(&mut rng) < 100_000);
        assert_eq!(t.next_delay_us(&mut rng), 100_000);
        assert_eq!(t.on_timer(0, Point::default(), Point::default(), &mut rng), Some(190));
        assert_eq!(t.traffic_type(), TrafficType::Periodic);
    }

    #[test]
    fn aperiodic_gaps_respect_the_minimum() {
        let mut rng = StdRng::seed_from_u64(2);
        let section = TrafficSection::default();
        let mut t = NodeTraffic::aperiodic(&section).unwrap();
        let gaps: Vec<u64> = (0..5000).map(|_| t.next_delay_us(&mut rng)).collect();
        assert!(gaps.iter().all(|&g| g >= 100_000));
        let mean_extra = gaps.iter().map(|g| (g - 100_000) as f64).sum::<f64>() / gaps.len() as f64;
        assert!((mean_extra - 50_000.0).abs() < 5_000.0, "mean {mean_extra}");
        for _ in 0..100 {
            let size = t.on_timer(0, Point::default(), Point::default(), &mut rng).unwrap();
            assert!(section.aperiodic_sizes.contains(&size));
        }
    }

    #[test]
    fn cam_triggers() {
        let mut cam = CamGenerator::new(190, 300, 5);
        let v = Point::new(10.0, 0.0);
        assert_eq!(cam.check(0, Point::new(0.0, 0.0), v), Some(300));
        // 1 m later, same speed and heading
        assert_eq!(cam.check(100_000, Point::new(1.0, 0.0), v), None);
        // moved more than 4 m
        assert_eq!(cam.check(200_000, Point::new(5.0, 0.0), v), Some(190));
        // heading change of 10 degrees
        let turned = Point::new(10.0 * 10f64.to_radians().cos(), 10.0 * 10f64.to_radians().sin());
        assert_eq!(cam.check(300_000, Point::new(5.5, 0.0), turned), Some(190));
        // speed change
        assert_eq!(cam.check(400_000, Point::new(6.0, 0.0), Point::new(0.0, 0.0)), Some(190));
        // standing still until the one second limit
        let still = Point::new(0.0, 0.0);
        assert_eq!(cam.check(900_000, Point::new(6.0, 0.0), still), None);
        assert_eq!(cam.check(1_400_000, Point::new(6.0, 0.0), still), Some(190));
        // every fifth CAM carries the low frequency container
        assert_eq!(cam.check(2_400_000, Point::new(6.0, 0.0), still), Some(300));
    }

    #[test]
    fn mixed_split_follows_the_percentage() {
        let mut rng = StdRng::seed_from_u64(3);
        let ids: Vec<NodeId> = (0..20).collect();
        let assigned = assign_traffic(
            TrafficModel::Mixed { periodic_percentage: 10 },
            &TrafficSection::default(),
            &ids,
            &mut rng,
        )
        .unwrap();
        assert_eq!(assigned.len(), 20);
        let periodic = assigned.iter().filter(|(_, t)| t.traffic_type() == TrafficType::Periodic).count();
        assert_eq!(periodic, 2);
        assert!(assigned.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn timer_always_moves_forward() {
        let mut rng = StdRng::seed_from_u64(4);
        let section = TrafficSection { rri_ms: 0, ..TrafficSection::default() };
        assert_eq!(NodeTraffic::periodic(&section).next_delay_us(&mut rng), 1);
        let section = TrafficSection { aperiodic_min_interval_ms: 0, aperiodic_mean_ms: 1e-9, ..TrafficSection::default() };
        let t = NodeTraffic::aperiodic(&section).unwrap();
        assert!((0..100).all(|_| t.next_delay_us(&mut rng) >= 1));
    }

    #[test]
    fn bad_aperiodic_mean_is_rejected() {
        let section = TrafficSection { aperiodic_mean_ms: 0.0, ..TrafficSection::default() };
        assert!(NodeTraffic::aperiodic(&section).is_err());
    }
}
