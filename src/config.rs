//! Simulation run configuration loaded from TOML.
//!
//! Every field has a default, so an empty file describes a periodic highway
//! run. `validate` rejects contradictory or unsupported settings before the
//! simulation starts; there is no degraded mode for a bad configuration.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::amc::{Amc, DmrsPattern};
use crate::error_model::Channel;
use crate::numerology::{Numerology, NumerologyError, rbs_from_bandwidth};
use crate::scheduler::types::ALLOWED_RRIS_MS;
use crate::scheduler::{AperiodicStrategy, SchedulerParams, SelectionMetric};

/// Longest packet delay budget accepted, in ms.
const MAX_PDB_MS: u32 = 110;
/// Periodic shares accepted by the mixed traffic model.
const MIXED_PERCENTAGES: [u8; 3] = [10, 50, 90];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(String),
    #[error("failed to parse config file: {0}")]
    Parse(String),
    #[error("exactly one traffic model must be enabled, got {0}")]
    TrafficModels(String),
    #[error("mixed traffic needs a periodic percentage of 10, 50 or 90, got {0}")]
    MixedPercentage(u8),
    #[error("at most one aperiodic strategy may be enabled, got {0}")]
    AperiodicStrategies(String),
    #[error("use-rx-cresel requires use-tx-cresel")]
    RxCreselWithoutTx,
    #[error(transparent)]
    Numerology(#[from] NumerologyError),
    #[error("sub-channel size {subchannel_size} must be between 1 and the {bandwidth_rbs} RBs of the carrier")]
    SubchannelSize { subchannel_size: u16, bandwidth_rbs: u16 },
    #[error("MCS {0} outside the tables of the selected link curves")]
    Mcs(u8),
    #[error("packet delay budget {pdb_ms} ms must be below 110 ms and not above the {rri_ms} ms reservation interval")]
    DelayBudget { pdb_ms: u32, rri_ms: u32 },
    #[error("keep probability {0} outside [0, 1)")]
    KeepProbability(f64),
    #[error("size threshold {0} outside (0, 1]")]
    SizeThreshold(f64),
    #[error("resource reservation interval {0} ms is not allowed")]
    Rri(u32),
    #[error("aperiodic traffic needs at least one packet size")]
    NoAperiodicSizes,
    #[error("{name} must be positive")]
    NotPositive { name: &'static str },
}

/// Link curves used for PSSCH reception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkCurves {
    #[default]
    Nr,
    Lte,
    Cdl,
}

impl LinkCurves {
    /// PSSCH channel evaluated for a link with the given LOS state and PRB count.
    pub fn pssch_channel(&self, los: bool, nprb: u16) -> Channel {
        match self {
            LinkCurves::Nr => Channel::Pssch,
            LinkCurves::Lte => Channel::LtePssch,
            LinkCurves::Cdl => Channel::CdlPssch { los, nprb },
        }
    }

    pub fn pscch_channel(&self, los: bool) -> Channel {
        match self {
            LinkCurves::Nr => Channel::Pscch,
            LinkCurves::Lte => Channel::LtePscch,
            LinkCurves::Cdl => Channel::CdlPscch { los },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SimulationSection {
    pub duration_ms: u64,
    pub seed: u64,
    pub run: u64,
    pub numerology: u8,
    pub bandwidth_mhz: u32,
    pub verbose: bool,
    /// Directory for CSV traces; no traces when unset.
    pub trace_dir: Option<PathBuf>,
    pub mobility_interval_ms: u64,
    /// Nodes leaving the world re-enter on the opposite side.
    pub wrap: bool,
    pub report_interval_ms: u64,
    /// Width of the distance bins of the reception ratio.
    pub prr_bin_m: f64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            duration_ms: 10_000,
            seed: 1,
            run: 1,
            numerology: 0,
            bandwidth_mhz: 20,
            verbose: false,
            trace_dir: None,
            mobility_interval_ms: 100,
            wrap: true,
            report_interval_ms: 1000,
            prr_bin_m: 50.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TrafficSection {
    pub periodic: bool,
    pub aperiodic: bool,
    pub mixed: bool,
    pub etsi: bool,
    /// Share of periodic nodes under the mixed model.
    pub periodic_percentage: u8,
    pub packet_size: u32,
    pub aperiodic_sizes: Vec<u32>,
    pub aperiodic_min_interval_ms: u64,
    pub aperiodic_mean_ms: f64,
    pub rri_ms: u32,
    pub pdb_ms: u32,
    pub aggressive: bool,
    pub standard_ssps: bool,
    pub submissive: bool,
    pub cam_size: u32,
    /// CAMs carrying the low-frequency container.
    pub cam_large_size: u32,
    pub cam_large_every: u32,
}

impl Default for TrafficSection {
    fn default() -> Self {
        Self {
            periodic: true,
            aperiodic: false,
            mixed: false,
            etsi: false,
            periodic_percentage: 50,
            packet_size: 190,
            aperiodic_sizes: vec![200, 300, 400],
            aperiodic_min_interval_ms: 100,
            aperiodic_mean_ms: 50.0,
            rri_ms: 100,
            pdb_ms: 100,
            aggressive: false,
            standard_ssps: false,
            submissive: false,
            cam_size: 190,
            cam_large_size: 300,
            cam_large_every: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SchedulerSection {
    pub subchannel_size: u16,
    pub t1: u32,
    pub rsrp_threshold_dbm: f64,
    pub threshold_step_db: f64,
    pub size_threshold: f64,
    pub sensing_window_ms: u32,
    pub use_tx_cresel: bool,
    pub use_rx_cresel: bool,
    pub random_selection: bool,
    pub lowest_interference: bool,
    pub blind_retransmission: bool,
    pub dynamic_scheduling: bool,
    pub keep_probability: f64,
    pub allowed_rris_ms: Vec<u32>,
    pub reservation_size: Option<u32>,
}

impl Default for SchedulerSection {
    fn default() -> Self {
        let params = SchedulerParams::default();
        Self {
            subchannel_size: params.subchannel_size,
            t1: params.t1,
            rsrp_threshold_dbm: params.rsrp_threshold_dbm,
            threshold_step_db: params.threshold_step_db,
            size_threshold: params.size_threshold,
            sensing_window_ms: params.sensing_window_ms,
            use_tx_cresel: false,
            use_rx_cresel: false,
            random_selection: false,
            lowest_interference: false,
            blind_retransmission: false,
            dynamic_scheduling: false,
            keep_probability: 0.0,
            allowed_rris_ms: params.allowed_rris_ms,
            reservation_size: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PhySection {
    pub mcs: u8,
    /// Draw PSCCH decoding errors before using a control message.
    pub control_error_model: bool,
    pub link_curves: LinkCurves,
    pub dmrs: DmrsPattern,
    pub psfch_symbols: u32,
}

impl Default for PhySection {
    fn default() -> Self {
        Self {
            mcs: 14,
            control_error_model: true,
            link_curves: LinkCurves::Nr,
            dmrs: DmrsPattern::default(),
            psfch_symbols: 0,
        }
    }
}

/// Whole run configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub simulation: SimulationSection,
    pub traffic: TrafficSection,
    pub scheduler: SchedulerSection,
    pub phy: PhySection,
}

/// The single traffic model a validated configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficModel {
    Periodic,
    Aperiodic,
    Mixed { periodic_percentage: u8 },
    Etsi,
}

impl Config {
    /// Load and validate a configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the config.toml file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was read, parsed and validated
    /// * `Err(ConfigError)` naming the failing step or violated rule
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("{}", config_path.display()))
            .map_err(|e| ConfigError::FileRead(format!("{:#}", e)))?;
        let config = Self::from_toml(&content)?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every cross-field rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.traffic_model()?;
        self.aperiodic_strategy()?;

        let s = &self.scheduler;
        if s.use_rx_cresel && !s.use_tx_cresel {
            return Err(ConfigError::RxCreselWithoutTx);
        }

        let numerology = self.numerology()?;
        let bandwidth_rbs = rbs_from_bandwidth(numerology.scs_khz(), self.simulation.bandwidth_mhz)?;
        if s.subchannel_size == 0 || s.subchannel_size > bandwidth_rbs {
            return Err(ConfigError::SubchannelSize { subchannel_size: s.subchannel_size, bandwidth_rbs });
        }
        let curve_max = self.phy.link_curves.pssch_channel(true, s.subchannel_size).max_mcs();
        if self.phy.mcs > crate::amc::MAX_MCS.min(curve_max) {
            return Err(ConfigError::Mcs(self.phy.mcs));
        }

        let t = &self.traffic;
        if !ALLOWED_RRIS_MS.contains(&t.rri_ms) {
            return Err(ConfigError::Rri(t.rri_ms));
        }
        // periodic generators repeat at the RRI
        if t.rri_ms == 0 && (t.periodic || t.mixed) {
            return Err(ConfigError::Rri(t.rri_ms));
        }
        if let Some(&bad) = s.allowed_rris_ms.iter().find(|r| !ALLOWED_RRIS_MS.contains(r)) {
            return Err(ConfigError::Rri(bad));
        }
        if t.pdb_ms == 0 || t.pdb_ms >= MAX_PDB_MS || (t.rri_ms > 0 && t.pdb_ms > t.rri_ms) {
            return Err(ConfigError::DelayBudget { pdb_ms: t.pdb_ms, rri_ms: t.rri_ms });
        }
        if !(0.0..1.0).contains(&s.keep_probability) {
            return Err(ConfigError::KeepProbability(s.keep_probability));
        }
        if !(s.size_threshold > 0.0 && s.size_threshold <= 1.0) {
            return Err(ConfigError::SizeThreshold(s.size_threshold));
        }
        if (t.aperiodic || t.mixed) && t.aperiodic_sizes.is_empty() {
            return Err(ConfigError::NoAperiodicSizes);
        }
        if (t.aperiodic || t.mixed) && !(t.aperiodic_mean_ms > 0.0) {
            return Err(ConfigError::NotPositive { name: "aperiodic-mean-ms" });
        }
        if !(s.threshold_step_db > 0.0) {
            return Err(ConfigError::NotPositive { name: "threshold-step-db" });
        }
        if self.simulation.duration_ms == 0 {
            return Err(ConfigError::NotPositive { name: "duration-ms" });
        }
        if self.simulation.mobility_interval_ms == 0 {
            return Err(ConfigError::NotPositive { name: "mobility-interval-ms" });
        }
        if self.simulation.report_interval_ms == 0 {
            return Err(ConfigError::NotPositive { name: "report-interval-ms" });
        }
        if !(self.simulation.prr_bin_m > 0.0) {
            return Err(ConfigError::NotPositive { name: "prr-bin-m" });
        }
        if t.etsi && t.cam_large_every == 0 {
            return Err(ConfigError::NotPositive { name: "cam-large-every" });
        }
        Ok(())
    }

    pub fn traffic_model(&self) -> Result<TrafficModel, ConfigError> {
        let t = &self.traffic;
        let enabled: Vec<&str> = [
            (t.periodic, "periodic"),
            (t.aperiodic, "aperiodic"),
            (t.mixed, "mixed"),
            (t.etsi, "etsi"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect();
        match enabled.as_slice() {
            ["periodic"] => Ok(TrafficModel::Periodic),
            ["aperiodic"] => Ok(TrafficModel::Aperiodic),
            ["etsi"] => Ok(TrafficModel::Etsi),
            ["mixed"] if MIXED_PERCENTAGES.contains(&t.periodic_percentage) => {
                Ok(TrafficModel::Mixed { periodic_percentage: t.periodic_percentage })
            }
            ["mixed"] => Err(ConfigError::MixedPercentage(t.periodic_percentage)),
            [] => Err(ConfigError::TrafficModels("none".to_string())),
            many => Err(ConfigError::TrafficModels(many.join(", "))),
        }
    }

    pub fn aperiodic_strategy(&self) -> Result<AperiodicStrategy, ConfigError> {
        let t = &self.traffic;
        let enabled: Vec<(&str, AperiodicStrategy)> = [
            (t.aggressive, "aggressive", AperiodicStrategy::Aggressive),
            (t.standard_ssps, "standard-ssps", AperiodicStrategy::StandardSsps),
            (t.submissive, "submissive", AperiodicStrategy::Submissive),
        ]
        .iter()
        .filter(|(on, _, _)| *on)
        .map(|(_, name, strategy)| (*name, *strategy))
        .collect();
        match enabled.as_slice() {
            [] => Ok(AperiodicStrategy::default()),
            [(_, strategy)] => Ok(*strategy),
            many => Err(ConfigError::AperiodicStrategies(
                many.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", "),
            )),
        }
    }

    pub fn numerology(&self) -> Result<Numerology, ConfigError> {
        Ok(Numerology::new(self.simulation.numerology)?)
    }

    pub fn bandwidth_rbs(&self) -> Result<u16, ConfigError> {
        let numerology = self.numerology()?;
        Ok(rbs_from_bandwidth(numerology.scs_khz(), self.simulation.bandwidth_mhz)?)
    }

    /// Scheduler tunables implied by this configuration.
    pub fn scheduler_params(&self) -> Result<SchedulerParams, ConfigError> {
        let s = &self.scheduler;
        let mut allowed_rris_ms = s.allowed_rris_ms.clone();
        if !allowed_rris_ms.contains(&self.traffic.rri_ms) && self.traffic.rri_ms > 0 {
            allowed_rris_ms.push(self.traffic.rri_ms);
        }
        Ok(SchedulerParams {
            numerology: self.numerology()?,
            subchannel_size: s.subchannel_size,
            mcs: self.phy.mcs,
            amc: Amc {
                dmrs: self.phy.dmrs,
                psfch_symbols: self.phy.psfch_symbols,
                ..Amc::default()
            },
            t1: s.t1,
            rsrp_threshold_dbm: s.rsrp_threshold_dbm,
            threshold_step_db: s.threshold_step_db,
            size_threshold: s.size_threshold,
            sensing_window_ms: s.sensing_window_ms,
            use_tx_cresel: s.use_tx_cresel,
            use_rx_cresel: s.use_rx_cresel,
            random_selection: s.random_selection,
            metric: if s.lowest_interference {
                SelectionMetric::LowestInterference
            } else {
                SelectionMetric::Random
            },
            blind_retransmission: s.blind_retransmission,
            dynamic_scheduling: s.dynamic_scheduling,
            keep_probability: s.keep_probability,
            allowed_rris_ms,
            aperiodic_strategy: self.aperiodic_strategy()?,
            reservation_size: s.reservation_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_a_periodic_run() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.traffic_model().unwrap(), TrafficModel::Periodic);
        assert_eq!(config.aperiodic_strategy().unwrap(), AperiodicStrategy::Submissive);
        assert_eq!(config.bandwidth_rbs().unwrap(), 106);
        let params = config.scheduler_params().unwrap();
        assert_eq!(params.rsrp_threshold_dbm, -128.0);
        assert_eq!(params.t2(config.traffic.pdb_ms), 99);
    }

    #[test]
    fn periodic_and_aperiodic_together_fail() {
        let err = Config::from_toml("[traffic]\nperiodic = true\naperiodic = true\n").unwrap_err();
        assert_eq!(err, ConfigError::TrafficModels("periodic, aperiodic".to_string()));
    }

    #[test]
    fn no_traffic_model_fails() {
        let err = Config::from_toml("[traffic]\nperiodic = false\n").unwrap_err();
        assert!(matches!(err, ConfigError::TrafficModels(_)));
    }

    #[test]
    fn mixed_needs_a_known_percentage() {
        let ok = Config::from_toml("[traffic]\nperiodic = false\nmixed = true\nperiodic-percentage = 90\n").unwrap();
        assert_eq!(ok.traffic_model().unwrap(), TrafficModel::Mixed { periodic_percentage: 90 });
        let err = Config::from_toml("[traffic]\nperiodic = false\nmixed = true\nperiodic-percentage = 30\n").unwrap_err();
        assert_eq!(err, ConfigError::MixedPercentage(30));
    }

    #[test]
    fn aperiodic_strategies_are_exclusive() {
        let one = Config::from_toml("[traffic]\naggressive = true\n").unwrap();
        assert_eq!(one.aperiodic_strategy().unwrap(), AperiodicStrategy::Aggressive);
        let err = Config::from_toml("[traffic]\naggressive = true\nsubmissive = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::AperiodicStrategies(_)));
    }

    #[test]
    fn rx_cresel_requires_tx_cresel() {
        let err = Config::from_toml("[scheduler]\nuse-rx-cresel = true\n").unwrap_err();
        assert_eq!(err, ConfigError::RxCreselWithoutTx);
        assert!(Config::from_toml("[scheduler]\nuse-rx-cresel = true\nuse-tx-cresel = true\n").is_ok());
    }

    #[test]
    fn carrier_and_link_limits() {
        assert!(matches!(
            Config::from_toml("[simulation]\nnumerology = 3\n").unwrap_err(),
            ConfigError::Numerology(_)
        ));
        assert!(matches!(
            Config::from_toml("[scheduler]\nsubchannel-size = 0\n").unwrap_err(),
            ConfigError::SubchannelSize { .. }
        ));
        assert_eq!(Config::from_toml("[phy]\nmcs = 28\n").unwrap_err(), ConfigError::Mcs(28));
        assert_eq!(
            Config::from_toml("[phy]\nmcs = 24\nlink-curves = \"lte\"\n").unwrap_err(),
            ConfigError::Mcs(24)
        );
        assert!(Config::from_toml("[phy]\nmcs = 24\n").is_ok());
    }

    #[test]
    fn delay_budget_and_probabilities() {
        assert!(matches!(
            Config::from_toml("[traffic]\npdb-ms = 120\nrri-ms = 200\n").unwrap_err(),
            ConfigError::DelayBudget { .. }
        ));
        assert!(matches!(
            Config::from_toml("[traffic]\npdb-ms = 60\nrri-ms = 50\n").unwrap_err(),
            ConfigError::DelayBudget { .. }
        ));
        assert_eq!(Config::from_toml("[traffic]\nrri-ms = 130\n").unwrap_err(), ConfigError::Rri(130));
        assert_eq!(
            Config::from_toml("[scheduler]\nkeep-probability = 1.0\n").unwrap_err(),
            ConfigError::KeepProbability(1.0)
        );
        assert_eq!(
            Config::from_toml("[scheduler]\nsize-threshold = 0.0\n").unwrap_err(),
            ConfigError::SizeThreshold(0.0)
        );
    }

    #[test]
    fn periodic_traffic_needs_a_reservation_interval() {
        assert_eq!(Config::from_toml("[traffic]\nrri-ms = 0\n").unwrap_err(), ConfigError::Rri(0));
        assert_eq!(
            Config::from_toml("[traffic]\nperiodic = false\nmixed = true\nrri-ms = 0\n").unwrap_err(),
            ConfigError::Rri(0)
        );
        let config = Config::from_toml("[traffic]\nperiodic = false\naperiodic = true\nrri-ms = 0\n").unwrap();
        assert_eq!(config.traffic_model().unwrap(), TrafficModel::Aperiodic);
    }

    #[test]
    fn unknown_keys_and_bad_types_fail_to_parse() {
        assert!(matches!(Config::from_toml("[phy]\nmcs = \"high\"\n").unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_)));
    }
}
