//! Sidelink channel: path loss, correlated shadowing and power conversions.
//!
//! Contains helpers for:
//! - TR 37.885 highway and urban grid path loss (LOS/NLOS branches)
//! - Spatially correlated log-normal shadowing per unordered node pair
//! - Optional vehicle blockage (NLOSv) on highways
//! - dBm/mW conversion and thermal noise
//!
//! Units:
//! - Power: dBm, mW (conversion provided)
//! - Distance: meters
//! - Frequency: GHz

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Deserialize;
use std::collections::HashMap;

use crate::NodeId;
use crate::geometry::Point;

/// Links shorter than this are evaluated at this distance.
pub const MIN_DISTANCE_M: f64 = 3.0;

/// Thermal noise power spectral density in dBm/Hz.
const THERMAL_NOISE_DBM_HZ: f64 = -174.0;

/// Deployment scenario of TR 37.885.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Highway,
    Urban,
}

fn default_frequency_ghz() -> f64 {
    5.9
}

fn default_street_width_m() -> f64 {
    20.0
}

fn default_sigma_nlosv_db() -> f64 {
    4.0
}

fn default_noise_figure_db() -> f64 {
    9.0
}

fn default_true() -> bool {
    true
}

/// Parameters defining the radio channel propagation model.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PropagationParameters {
    pub scenario: Scenario,

    /// Carrier frequency in GHz.
    #[serde(default = "default_frequency_ghz")]
    pub frequency_ghz: f64,

    /// Enables log-normal shadowing.
    #[serde(default = "default_true")]
    pub shadowing: bool,

    /// Overrides the scenario's LOS shadowing standard deviation.
    #[serde(default)]
    pub sigma_los_db: Option<f64>,

    /// Overrides the scenario's NLOS shadowing standard deviation.
    #[serde(default)]
    pub sigma_nlos_db: Option<f64>,

    /// Overrides the scenario's shadowing decorrelation distance.
    #[serde(default)]
    pub decorrelation_m: Option<f64>,

    /// Urban grid: nodes closer than this along x or y see each other in LOS.
    #[serde(default = "default_street_width_m")]
    pub street_width_m: f64,

    /// Highway: blockage by other vehicles (NLOSv) with distance-dependent
    /// LOS probability and extra attenuation.
    #[serde(default)]
    pub vehicle_blockage: bool,

    #[serde(default = "default_sigma_nlosv_db")]
    pub sigma_nlosv_db: f64,

    /// Receiver noise figure in dB.
    #[serde(default = "default_noise_figure_db")]
    pub noise_figure_db: f64,
}

impl PropagationParameters {
    pub fn highway() -> Self {
        Self {
            scenario: Scenario::Highway,
            frequency_ghz: default_frequency_ghz(),
            shadowing: true,
            sigma_los_db: None,
            sigma_nlos_db: None,
            decorrelation_m: None,
            street_width_m: default_street_width_m(),
            vehicle_blockage: false,
            sigma_nlosv_db: default_sigma_nlosv_db(),
            noise_figure_db: default_noise_figure_db(),
        }
    }

    pub fn sigma_db(&self, los: bool) -> f64 {
        if !self.shadowing {
            return 0.0;
        }
        match (self.scenario, los) {
            (_, true) => self.sigma_los_db.unwrap_or(3.0),
            (Scenario::Highway, false) => self.sigma_nlos_db.unwrap_or(3.0),
            (Scenario::Urban, false) => self.sigma_nlos_db.unwrap_or(4.0),
        }
    }

    pub fn decorrelation_distance_m(&self) -> f64 {
        self.decorrelation_m.unwrap_or(match self.scenario {
            Scenario::Highway => 25.0,
            Scenario::Urban => 10.0,
        })
    }
}

/// Deterministic part of the path loss in dB.
///
/// # Formula
///
/// ```text
/// Highway, LOS:  PL = 32.4  + 20   log10(d) + 20   log10(fc)
/// Urban, LOS:    PL = 38.77 + 16.7 log10(d) + 18.2 log10(fc)
/// Urban, NLOS:   PL = 36.85 + 30   log10(d) + 18.9 log10(fc)
/// ```
///
/// # Parameters
///
/// - `scenario`: Deployment scenario
/// - `distance_m`: Link distance, clamped to at least [`MIN_DISTANCE_M`]
/// - `frequency_ghz`: Carrier frequency
/// - `los`: Line-of-sight state (highway NLOSv uses the LOS formula plus blockage)
pub fn path_loss_db(scenario: Scenario, distance_m: f64, frequency_ghz: f64, los: bool) -> f64 {
    let d = distance_m.max(MIN_DISTANCE_M);
    match (scenario, los) {
        (Scenario::Highway, _) => 32.4 + 20.0 * d.log10() + 20.0 * frequency_ghz.log10(),
        (Scenario::Urban, true) => 38.77 + 16.7 * d.log10() + 18.2 * frequency_ghz.log10(),
        (Scenario::Urban, false) => 36.85 + 30.0 * d.log10() + 18.9 * frequency_ghz.log10(),
    }
}

/// Highway LOS probability in presence of other vehicles.
pub fn highway_los_probability(distance_m: f64) -> f64 {
    (2.1013e-6 * distance_m * distance_m - 0.002 * distance_m + 1.0193).min(1.0)
}

/// Convert power from dBm to milliwatts.
///
/// # Formula
///
/// ```text
/// P(mW) = 10^(P(dBm) / 10)
/// ```
///
/// # Examples
///
/// ```text
/// 0 dBm   → 1 mW
/// 20 dBm  → 100 mW
/// -10 dBm → 0.1 mW
/// ```
pub fn dbm_to_mw(dbm: f64) -> f64 {
    10f64.powf(dbm / 10.0)
}

/// Convert power from milliwatts to dBm.
///
/// # Formula
///
/// ```text
/// P(dBm) = 10 × log₁₀(P(mW))
/// ```
///
/// # Notes
///
/// - Inverse of `dbm_to_mw()`
/// - For `mw <= 0` the result is -∞ or NaN
pub fn mw_to_dbm(mw: f64) -> f64 {
    10.0 * mw.log10()
}

/// Thermal noise power in dBm over `bandwidth_hz`, including the noise figure.
pub fn thermal_noise_dbm(bandwidth_hz: f64, noise_figure_db: f64) -> f64 {
    THERMAL_NOISE_DBM_HZ + 10.0 * bandwidth_hz.log10() + noise_figure_db
}

/// Unordered node pair; `(a, b)` and `(b, a)` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePair(NodeId, NodeId);

impl NodePair {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b { NodePair(a, b) } else { NodePair(b, a) }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.0 == id || self.1 == id
    }
}

/// Large-scale state of one link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkState {
    pub distance_m: f64,
    pub los: bool,
    pub path_loss_db: f64,
    pub shadowing_db: f64,
    pub blockage_db: f64,
}

impl LinkState {
    pub fn loss_db(&self) -> f64 {
        self.path_loss_db + self.shadowing_db + self.blockage_db
    }
}

/// Reciprocal channel between every pair of nodes.
#[derive(Debug, Clone)]
pub struct ChannelModel {
    params: PropagationParameters,
    links: HashMap<NodePair, LinkState>,
}

impl ChannelModel {
    pub fn new(params: PropagationParameters) -> Self {
        Self {
            params,
            links: HashMap::new(),
        }
    }

    pub fn params(&self) -> &PropagationParameters {
        &self.params
    }

    fn is_los<R: Rng + ?Sized>(&self, a: &Point, b: &Point, distance_m: f64, rng: &mut R) -> bool {
        match self.params.scenario {
            Scenario::Urban => (a.x - b.x).abs() < self.params.street_width_m || (a.y - b.y).abs() < self.params.street_width_m,
            Scenario::Highway if self.params.vehicle_blockage => rng.r#gen::<f64>() <= highway_los_probability(distance_m),
            Scenario::Highway => true,
        }
    }

    fn draw_shadowing<R: Rng + ?Sized>(sigma: f64, rng: &mut R) -> f64 {
        match Normal::new(0.0, sigma) {
            Ok(normal) if sigma > 0.0 => normal.sample(rng),
            _ => 0.0,
        }
    }

    /// Refresh the large-scale state of the link between `a` and `b`.
    ///
    /// Shadowing follows the Gudmundson model: with `r = exp(-|Δd|/d_corr)`
    /// the new value is `r*S + sqrt(1-r²)*N(0, σ)`. A first evaluation or a
    /// LOS state change draws a fresh value.
    ///
    /// # Returns
    ///
    /// The total loss in dB.
    pub fn update_link<R: Rng + ?Sized>(&mut self, a: NodeId, pos_a: &Point, b: NodeId, pos_b: &Point, rng: &mut R) -> f64 {
        let key = NodePair::new(a, b);
        // canonical endpoint order keeps the geometry reciprocal
        let (p, q) = if a <= b { (pos_a, pos_b) } else { (pos_b, pos_a) };
        let distance_m = p.distance(q);
        let los = self.is_los(p, q, distance_m, rng);
        let sigma = self.params.sigma_db(los);
        let fresh = Self::draw_shadowing(sigma, rng);

        let shadowing_db = match self.links.get(&key) {
            Some(previous) if previous.los == los => {
                let r = (-(distance_m - previous.distance_m).abs() / self.params.decorrelation_distance_m()).exp();
                r * previous.shadowing_db + (1.0 - r * r).sqrt() * fresh
            }
            _ => fresh,
        };

        let blockage_db = if self.params.scenario == Scenario::Highway && !los {
            let mean = 5.0 + (15.0 * distance_m.max(MIN_DISTANCE_M).log10() - 41.0).max(0.0);
            match Normal::new(mean, self.params.sigma_nlosv_db) {
                Ok(normal) => normal.sample(rng).max(0.0),
                Err(_) => mean,
            }
        } else {
            0.0
        };

        let state = LinkState {
            distance_m,
            los,
            path_loss_db: path_loss_db(self.params.scenario, distance_m, self.params.frequency_ghz, los),
            shadowing_db,
            blockage_db,
        };
        self.links.insert(key, state);
        state.loss_db()
    }

    /// Total loss between `a` and `b`, evaluating the link on first use.
    pub fn loss_db<R: Rng + ?Sized>(&mut self, a: NodeId, pos_a: &Point, b: NodeId, pos_b: &Point, rng: &mut R) -> f64 {
        match self.links.get(&NodePair::new(a, b)) {
            Some(state) => state.loss_db(),
            None => self.update_link(a, pos_a, b, pos_b, rng),
        }
    }

    pub fn link(&self, a: NodeId, b: NodeId) -> Option<&LinkState> {
        self.links.get(&NodePair::new(a, b))
    }

    /// Re-evaluate every cached link after the nodes moved. Links with an
    /// endpoint missing from `positions` are left as they are.
    pub fn refresh_links<R: Rng + ?Sized>(&mut self, positions: &HashMap<NodeId, Point>, rng: &mut R) {
        let mut pairs: Vec<NodePair> = self.links.keys().copied().collect();
        pairs.sort_unstable_by_key(|pair| (pair.0, pair.1));
        for pair in pairs {
            if let (Some(pa), Some(pb)) = (positions.get(&pair.0), positions.get(&pair.1)) {
                self.update_link(pair.0, pa, pair.1, pb, rng);
            }
        }
    }

    /// Drop every link touching `id`.
    pub fn forget_node(&mut self, id: NodeId) {
        self.links.retain(|pair, _| !pair.contains(id));
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn no_shadowing(scenario: Scenario) -> PropagationParameters {
        PropagationParameters {
            scenario,
            shadowing: false,
            ..PropagationParameters::highway()
        }
    }

    #[test]
    fn highway_free_space_formula() {
        let pl = path_loss_db(Scenario::Highway, 100.0, 5.9, true);
        assert!((pl - (32.4 + 40.0 + 20.0 * 5.9f64.log10())).abs() < 1e-9);
        // below the minimum distance the loss is flat
        assert_eq!(path_loss_db(Scenario::Highway, 0.5, 5.9, true), path_loss_db(Scenario::Highway, 3.0, 5.9, true));
    }

    #[test]
    fn urban_nlos_is_lossier_than_los() {
        for d in [20.0, 100.0, 500.0] {
            assert!(path_loss_db(Scenario::Urban, d, 5.9, false) > path_loss_db(Scenario::Urban, d, 5.9, true));
        }
    }

    #[test]
    fn urban_los_follows_street_grid() {
        let mut channel = ChannelModel::new(no_shadowing(Scenario::Urban));
        let mut rng = StdRng::seed_from_u64(1);
        channel.update_link(1, &Point::new(0.0, 0.0), 2, &Point::new(300.0, 5.0), &mut rng);
        assert!(channel.link(1, 2).unwrap().los);
        channel.update_link(1, &Point::new(0.0, 0.0), 3, &Point::new(100.0, 100.0), &mut rng);
        assert!(!channel.link(3, 1).unwrap().los);
    }

    #[test]
    fn pair_key_is_canonical() {
        assert_eq!(NodePair::new(7, 3), NodePair::new(3, 7));
        let mut channel = ChannelModel::new(PropagationParameters::highway());
        let mut rng = StdRng::seed_from_u64(2);
        let a = Point::new(0.0, 0.0);
        let b = Point::new(150.0, 0.0);
        let first = channel.loss_db(4, &a, 9, &b, &mut rng);
        let reverse = channel.loss_db(9, &b, 4, &a, &mut rng);
        assert_eq!(first, reverse);
        assert_eq!(channel.link_count(), 1);
    }

    #[test]
    fn shadowing_is_correlated_over_short_moves() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut diffs_short = 0.0;
        let mut diffs_long = 0.0;
        for i in 0..500 {
            let mut channel = ChannelModel::new(PropagationParameters::highway());
            let a = Point::new(0.0, 0.0);
            channel.update_link(0, &a, 1, &Point::new(200.0, 0.0), &mut rng);
            let s0 = channel.link(0, 1).unwrap().shadowing_db;
            channel.update_link(0, &a, 1, &Point::new(201.0, 0.0), &mut rng);
            diffs_short += (channel.link(0, 1).unwrap().shadowing_db - s0).abs();

            let mut far = ChannelModel::new(PropagationParameters::highway());
            far.update_link(0, &a, 1, &Point::new(200.0, 0.0), &mut rng);
            let f0 = far.link(0, 1).unwrap().shadowing_db;
            far.update_link(0, &a, 1, &Point::new(400.0 + i as f64, 0.0), &mut rng);
            diffs_long += (far.link(0, 1).unwrap().shadowing_db - f0).abs();
        }
        assert!(diffs_short < diffs_long / 2.0);
    }

    #[test]
    fn vehicle_blockage_only_adds_loss() {
        let mut params = PropagationParameters::highway();
        params.shadowing = false;
        params.vehicle_blockage = true;
        let mut channel = ChannelModel::new(params);
        let mut rng = StdRng::seed_from_u64(4);
        for d in [10.0, 200.0, 800.0] {
            for _ in 0..50 {
                let loss = channel.update_link(0, &Point::new(0.0, 0.0), 1, &Point::new(d, 0.0), &mut rng);
                assert!(loss >= path_loss_db(Scenario::Highway, d, 5.9, true) - 1e-9);
            }
        }
        assert_eq!(highway_los_probability(0.0), 1.0);
        assert!(highway_los_probability(300.0) < 1.0);
    }

    #[test]
    fn forgetting_a_node_drops_its_links() {
        let mut channel = ChannelModel::new(PropagationParameters::highway());
        let mut rng = StdRng::seed_from_u64(5);
        let p = Point::default();
        channel.update_link(1, &p, 2, &Point::new(10.0, 0.0), &mut rng);
        channel.update_link(1, &p, 3, &Point::new(20.0, 0.0), &mut rng);
        channel.update_link(2, &p, 3, &Point::new(30.0, 0.0), &mut rng);
        channel.forget_node(1);
        assert_eq!(channel.link_count(), 1);
        assert!(channel.link(2, 3).is_some());
    }

    #[test]
    fn refresh_follows_new_positions() {
        let mut channel = ChannelModel::new(no_shadowing(Scenario::Highway));
        let mut rng = StdRng::seed_from_u64(6);
        channel.update_link(1, &Point::default(), 2, &Point::new(10.0, 0.0), &mut rng);
        let positions = HashMap::from([(1, Point::default()), (2, Point::new(500.0, 0.0))]);
        channel.refresh_links(&positions, &mut rng);
        let link = channel.link(1, 2).unwrap();
        assert_eq!(link.distance_m, 500.0);
        assert!((link.loss_db() - path_loss_db(Scenario::Highway, 500.0, 5.9, true)).abs() < 1e-9);
    }

    #[test]
    fn noise_and_power_conversions() {
        assert!((thermal_noise_dbm(10e6, 9.0) - (-174.0 + 70.0 + 9.0)).abs() < 1e-9);
        for v in [-100.0, -50.0, 0.0, 23.0] {
            assert!((mw_to_dbm(dbm_to_mw(v)) - v).abs() < 1e-9);
        }
    }
}
