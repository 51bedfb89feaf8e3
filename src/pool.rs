//! Sidelink resource pool model.
//!
//! A pool describes, for every sidelink control (SC) period, which subframes
//! and PRBs carry the control channel (PSCCH) and which carry data (PSSCH).
//! The configuration record arrives either from network signalling or from a
//! local preconfiguration and is turned into a `ResourcePool` by `set_pool`.
//! Everything after that is a pure query.
//!
//! Bitmaps are 40 characters of '0'/'1'. Character `i` is bit `i` and refers
//! to subframe offset `i` inside the period, offset 0 being the first
//! subframe of the period.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::subframe::{CYCLE_LENGTH, SubframeInfo};

/// Length of every subframe bitmap.
pub const BITMAP_LENGTH: usize = 40;
/// Length of a time repetition pattern block.
const TRP_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("unsupported sidelink period '{0}'")]
    UnsupportedPeriod(String),
    #[error("unsupported cyclic prefix length '{0}'")]
    UnsupportedCpLength(String),
    #[error("unsupported power control alpha '{0}'")]
    UnsupportedAlpha(String),
    #[error("inconsistent bitmap size: expected {BITMAP_LENGTH} bits, got {0}")]
    InconsistentBitmapSize(usize),
    #[error("invalid bitmap character '{0}', only '0' and '1' are allowed")]
    InvalidBitmapCharacter(char),
    #[error("invalid T-RPT subset '{0}', expected 3 bits")]
    InvalidTrptSubset(String),
    #[error("invalid PRB range: start {start}, end {end}, count {num}")]
    InvalidPrbRange { start: u16, end: u16, num: u16 },
    #[error("control pool has no subframe or fewer than 2 PRBs")]
    EmptyControlPool,
    #[error("data pool has no subframe or PRB")]
    EmptyDataPool,
    #[error("number of hopping sub-bands must be 1, 2 or 4, got {0}")]
    InvalidSubbands(u8),
    #[error("nominal power p0 {0} dBm outside -126..=31")]
    P0OutOfRange(i16),
    #[error("PSCCH resource {n} outside pool of {available} resources")]
    PscchResourceOutOfRange { n: u32, available: u32 },
    #[error("RB range start {start} length {len} exceeds the {available} PRBs of the data pool")]
    RbRangeOutOfPool { start: u16, len: u16, available: usize },
}

/// Sidelink control period length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum SlPeriod {
    Sf40,
    Sf60,
    Sf70,
    Sf80,
    Sf120,
    Sf140,
    Sf160,
    Sf240,
    Sf280,
    Sf320,
}

impl SlPeriod {
    pub fn subframes(&self) -> u32 {
        match self {
            SlPeriod::Sf40 => 40,
            SlPeriod::Sf60 => 60,
            SlPeriod::Sf70 => 70,
            SlPeriod::Sf80 => 80,
            SlPeriod::Sf120 => 120,
            SlPeriod::Sf140 => 140,
            SlPeriod::Sf160 => 160,
            SlPeriod::Sf240 => 240,
            SlPeriod::Sf280 => 280,
            SlPeriod::Sf320 => 320,
        }
    }
}

impl FromStr for SlPeriod {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sf40" => Ok(SlPeriod::Sf40),
            "sf60" => Ok(SlPeriod::Sf60),
            "sf70" => Ok(SlPeriod::Sf70),
            "sf80" => Ok(SlPeriod::Sf80),
            "sf120" => Ok(SlPeriod::Sf120),
            "sf140" => Ok(SlPeriod::Sf140),
            "sf160" => Ok(SlPeriod::Sf160),
            "sf240" => Ok(SlPeriod::Sf240),
            "sf280" => Ok(SlPeriod::Sf280),
            "sf320" => Ok(SlPeriod::Sf320),
            other => Err(PoolError::UnsupportedPeriod(other.to_string())),
        }
    }
}

impl TryFrom<String> for SlPeriod {
    type Error = PoolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CpLength {
    Normal,
    Extended,
}

impl TryFrom<String> for CpLength {
    type Error = PoolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "normal" => Ok(CpLength::Normal),
            "extended" => Ok(CpLength::Extended),
            _ => Err(PoolError::UnsupportedCpLength(value)),
        }
    }
}

/// Fractional path loss compensation factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Alpha {
    Al0,
    Al04,
    Al05,
    Al06,
    Al07,
    Al08,
    Al09,
    Al1,
}

impl Alpha {
    pub fn value(&self) -> f64 {
        match self {
            Alpha::Al0 => 0.0,
            Alpha::Al04 => 0.4,
            Alpha::Al05 => 0.5,
            Alpha::Al06 => 0.6,
            Alpha::Al07 => 0.7,
            Alpha::Al08 => 0.8,
            Alpha::Al09 => 0.9,
            Alpha::Al1 => 1.0,
        }
    }
}

impl TryFrom<String> for Alpha {
    type Error = PoolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "al0" => Ok(Alpha::Al0),
            "al04" => Ok(Alpha::Al04),
            "al05" => Ok(Alpha::Al05),
            "al06" => Ok(Alpha::Al06),
            "al07" => Ok(Alpha::Al07),
            "al08" => Ok(Alpha::Al08),
            "al09" => Ok(Alpha::Al09),
            "al1" => Ok(Alpha::Al1),
            _ => Err(PoolError::UnsupportedAlpha(value)),
        }
    }
}

/// 40-bit subframe bitmap, bit `i` = subframe offset `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct SubframeBitmap([bool; BITMAP_LENGTH]);

impl SubframeBitmap {
    pub fn is_set(&self, bit: usize) -> bool {
        self.0[bit % BITMAP_LENGTH]
    }

    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }
}

impl FromStr for SubframeBitmap {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != BITMAP_LENGTH {
            return Err(PoolError::InconsistentBitmapSize(chars.len()));
        }
        let mut bits = [false; BITMAP_LENGTH];
        for (bit, c) in bits.iter_mut().zip(chars) {
            *bit = match c {
                '0' => false,
                '1' => true,
                other => return Err(PoolError::InvalidBitmapCharacter(other)),
            };
        }
        Ok(SubframeBitmap(bits))
    }
}

impl TryFrom<String> for SubframeBitmap {
    type Error = PoolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SubframeBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0 {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Allowed T-RPT weights, three bits (k = 1, 2, 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct TrptSubset(u8);

impl TrptSubset {
    pub fn allows_weight(&self, weight: u32) -> bool {
        match weight {
            1 => self.0 & 0b100 != 0,
            2 => self.0 & 0b010 != 0,
            4 => self.0 & 0b001 != 0,
            _ => false,
        }
    }
}

impl Default for TrptSubset {
    fn default() -> Self {
        TrptSubset(0b111)
    }
}

impl TryFrom<String> for TrptSubset {
    type Error = PoolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.len() != 3 || !value.chars().all(|c| c == '0' || c == '1') {
            return Err(PoolError::InvalidTrptSubset(value));
        }
        u8::from_str_radix(&value, 2).map(TrptSubset).map_err(|_| PoolError::InvalidTrptSubset(value))
    }
}

/// Time/frequency resource configuration of one channel.
#[derive(Debug, Clone, Deserialize)]
pub struct TfResourceConfig {
    pub prb_num: u16,
    pub prb_start: u16,
    pub prb_end: u16,
    /// Subframe offset of the first period relative to frame 0, subframe 1.
    #[serde(default)]
    pub offset: u32,
    pub subframe_bitmap: SubframeBitmap,
}

impl TfResourceConfig {
    /// PRBs of the two clusters `[start, start+num)` and `(end-num, end]`.
    fn prbs(&self) -> Result<Vec<u16>, PoolError> {
        let invalid = PoolError::InvalidPrbRange {
            start: self.prb_start,
            end: self.prb_end,
            num: self.prb_num,
        };
        if self.prb_num == 0 || self.prb_start > self.prb_end || self.prb_end - self.prb_start + 1 < self.prb_num {
            return Err(invalid);
        }
        let mut rbs: Vec<u16> = (self.prb_start..self.prb_start + self.prb_num)
            .chain(self.prb_end + 1 - self.prb_num..=self.prb_end)
            .collect();
        rbs.sort_unstable();
        rbs.dedup();
        Ok(rbs)
    }
}

fn default_subbands() -> u8 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct HoppingConfig {
    #[serde(default)]
    pub hopping_parameter: u16,
    #[serde(default = "default_subbands")]
    pub num_subbands: u8,
    #[serde(default)]
    pub rb_offset: u16,
}

impl Default for HoppingConfig {
    fn default() -> Self {
        Self {
            hopping_parameter: 0,
            num_subbands: 1,
            rb_offset: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxParameters {
    pub alpha: Alpha,
    pub p0: i16,
}

/// Fields shared by both pool kinds.
#[derive(Debug, Clone, Deserialize)]
pub struct CommonPoolConfig {
    pub sc_cp_len: CpLength,
    pub sc_period: SlPeriod,
    pub sc_tf_resource_config: TfResourceConfig,
    pub data_cp_len: CpLength,
    #[serde(default)]
    pub data_hopping_config: HoppingConfig,
}

/// Pool configuration record.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum PoolConfig {
    /// The network assigns the exact resource; every subframe after the
    /// control subframes of a period carries data.
    #[serde(rename = "scheduled")]
    Scheduled {
        #[serde(flatten)]
        common: CommonPoolConfig,
        /// Uplink bandwidth available to the data channel.
        bandwidth_rbs: u16,
        #[serde(default)]
        mcs: Option<u8>,
    },
    /// The UE runs the autonomous scheduler over the data pool.
    #[serde(rename = "ue_selected")]
    UeSelected {
        #[serde(flatten)]
        common: CommonPoolConfig,
        data_tf_resource_config: TfResourceConfig,
        #[serde(default)]
        trpt_subset: TrptSubset,
        sc_tx_parameters: TxParameters,
        data_tx_parameters: TxParameters,
    },
}

impl PoolConfig {
    pub fn common(&self) -> &CommonPoolConfig {
        match self {
            PoolConfig::Scheduled { common, .. } => common,
            PoolConfig::UeSelected { common, .. } => common,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingType {
    Scheduled,
    UeSelected,
}

/// Location of a transmission on the sidelink grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidelinkTransmissionInfo {
    pub subframe: SubframeInfo,
    pub rb_start: u16,
    pub nb_rb: u16,
}

/// Location of a V2X transmission, control and data in the same subframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V2xTransmissionInfo {
    pub subframe: SubframeInfo,
    pub rb_start_pssch: u16,
    pub nb_rb_pssch: u16,
    pub rb_start_pscch: u16,
    pub nb_rb_pscch: u16,
    pub is_retransmission: bool,
}

/// A configured pool together with the subframe and PRB sets it implies.
#[derive(Debug, Clone)]
pub struct ResourcePool {
    config: PoolConfig,
    period: u32,
    offset: u32,
    /// Period offsets of the PSCCH subframes.
    pscch_subframes: Vec<u32>,
    pscch_rbs: Vec<u16>,
    /// Period offsets of the PSSCH subframes.
    pssch_subframes: Vec<u32>,
    pssch_rbs: Vec<u16>,
    n_pscch: u32,
}

impl ResourcePool {
    /// Parse a configuration record into a pool.
    ///
    /// # Parameters
    ///
    /// * `config` - Scheduled or UE-selected configuration record
    ///
    /// # Returns
    ///
    /// The pool, or the first configuration rule the record violates.
    pub fn set_pool(config: PoolConfig) -> Result<Self, PoolError> {
        let common = config.common();
        let period = common.sc_period.subframes();
        let sc = &common.sc_tf_resource_config;

        if ![1, 2, 4].contains(&common.data_hopping_config.num_subbands) {
            return Err(PoolError::InvalidSubbands(common.data_hopping_config.num_subbands));
        }

        let pscch_subframes: Vec<u32> = (0..BITMAP_LENGTH as u32).filter(|o| sc.subframe_bitmap.is_set(*o as usize)).collect();
        let pscch_rbs = sc.prbs()?;
        if pscch_subframes.is_empty() || pscch_rbs.len() < 2 {
            return Err(PoolError::EmptyControlPool);
        }

        let (pssch_subframes, pssch_rbs) = match &config {
            PoolConfig::Scheduled { bandwidth_rbs, .. } => {
                let last_pscch = pscch_subframes.last().copied().unwrap_or(0);
                ((last_pscch + 1..period).collect::<Vec<u32>>(), (0..*bandwidth_rbs).collect::<Vec<u16>>())
            }
            PoolConfig::UeSelected {
                data_tf_resource_config,
                sc_tx_parameters,
                data_tx_parameters,
                ..
            } => {
                for p0 in [sc_tx_parameters.p0, data_tx_parameters.p0] {
                    if !(-126..=31).contains(&p0) {
                        return Err(PoolError::P0OutOfRange(p0));
                    }
                }
                let bitmap = &data_tf_resource_config.subframe_bitmap;
                let subframes = (0..period)
                    .filter(|o| bitmap.is_set(*o as usize) && !pscch_subframes.contains(o))
                    .collect::<Vec<u32>>();
                (subframes, data_tf_resource_config.prbs()?)
            }
        };
        if pssch_subframes.is_empty() || pssch_rbs.is_empty() {
            return Err(PoolError::EmptyDataPool);
        }

        let n_pscch = (pscch_rbs.len() as u32 / 2) * pscch_subframes.len() as u32;
        log::debug!(
            "Pool configured: period {} subframes, {} PSCCH subframes, {} PSSCH subframes, {} PSSCH PRBs",
            period,
            pscch_subframes.len(),
            pssch_subframes.len(),
            pssch_rbs.len()
        );

        Ok(Self {
            offset: sc.offset % CYCLE_LENGTH,
            config,
            period,
            pscch_subframes,
            pscch_rbs,
            pssch_subframes,
            pssch_rbs,
            n_pscch,
        })
    }

    /// Replace the whole configuration; on error the pool is left untouched.
    pub fn reconfigure(&mut self, config: PoolConfig) -> Result<(), PoolError> {
        *self = Self::set_pool(config)?;
        Ok(())
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn scheduling_type(&self) -> SchedulingType {
        match self.config {
            PoolConfig::Scheduled { .. } => SchedulingType::Scheduled,
            PoolConfig::UeSelected { .. } => SchedulingType::UeSelected,
        }
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Number of PSCCH resources in one period.
    pub fn n_pscch(&self) -> u32 {
        self.n_pscch
    }

    pub fn pssch_rb_count(&self) -> usize {
        self.pssch_rbs.len()
    }

    /// Sub-channels of `subchannel_size` PRBs fitting in the data pool.
    pub fn subchannel_count(&self, subchannel_size: u16) -> u16 {
        if subchannel_size == 0 {
            return 0;
        }
        (self.pssch_rbs.len() / subchannel_size as usize) as u16
    }

    /// Offset of `sf` inside its period.
    pub fn period_offset(&self, sf: SubframeInfo) -> u32 {
        (sf.index() + CYCLE_LENGTH - self.offset) % CYCLE_LENGTH % self.period
    }

    pub fn current_sc_period(&self, sf: SubframeInfo) -> SubframeInfo {
        SubframeInfo::from_index((sf.index() + CYCLE_LENGTH - self.period_offset(sf)) as u64)
    }

    pub fn next_sc_period(&self, sf: SubframeInfo) -> SubframeInfo {
        self.current_sc_period(sf) + self.period
    }

    pub fn is_pscch_subframe(&self, sf: SubframeInfo) -> bool {
        self.pscch_subframes.contains(&self.period_offset(sf))
    }

    pub fn is_pssch_subframe(&self, sf: SubframeInfo) -> bool {
        self.pssch_subframes.binary_search(&self.period_offset(sf)).is_ok()
    }

    /// RBs offering PSCCH opportunities in `sf`; empty outside the control pool.
    pub fn pscch_opportunities(&self, sf: SubframeInfo) -> Vec<u16> {
        if self.is_pscch_subframe(sf) {
            self.pscch_rbs.clone()
        } else {
            Vec::new()
        }
    }

    /// The two PSCCH transmissions of resource `n` in the period starting at
    /// `period_start` (TS 36.213 14.2.1.1).
    pub fn pscch_transmissions(&self, period_start: SubframeInfo, n: u32) -> Result<Vec<SidelinkTransmissionInfo>, PoolError> {
        if n >= self.n_pscch {
            return Err(PoolError::PscchResourceOutOfRange { n, available: self.n_pscch });
        }
        let l = self.pscch_subframes.len() as u32;
        let half = self.pscch_rbs.len() as u32 / 2;
        let a1 = n / l;
        let a2 = a1 + half;
        let b1 = n % l;
        let b2 = if l > 1 { (n + 1 + (n / l) % (l - 1)) % l } else { b1 };

        Ok(vec![
            SidelinkTransmissionInfo {
                subframe: period_start + self.pscch_subframes[b1 as usize],
                rb_start: self.pscch_rbs[a1 as usize],
                nb_rb: 1,
            },
            SidelinkTransmissionInfo {
                subframe: period_start + self.pscch_subframes[b2 as usize],
                rb_start: self.pscch_rbs[a2 as usize],
                nb_rb: 1,
            },
        ])
    }

    /// RBs used by PSCCH resource `n` in `sf`.
    pub fn pscch_rbs(&self, sf: SubframeInfo, n: u32) -> Result<Vec<u16>, PoolError> {
        let period_start = self.current_sc_period(sf);
        Ok(self
            .pscch_transmissions(period_start, n)?
            .into_iter()
            .filter(|tx| tx.subframe == sf)
            .map(|tx| tx.rb_start)
            .collect())
    }

    /// PSSCH transmissions of one period for a time repetition pattern.
    ///
    /// Bit `k` (LSB first) of `trp_bitmap` selects the `k`-th PSSCH subframe
    /// of each block of eight.
    pub fn pssch_transmissions(
        &self,
        period_start: SubframeInfo,
        trp_bitmap: u8,
        rb_start: u16,
        rb_len: u16,
    ) -> Result<Vec<SidelinkTransmissionInfo>, PoolError> {
        let available = self.pssch_rbs.len();
        if rb_len == 0 || rb_start as usize + rb_len as usize > available {
            return Err(PoolError::RbRangeOutOfPool {
                start: rb_start,
                len: rb_len,
                available,
            });
        }
        Ok(self
            .pssch_subframes
            .iter()
            .enumerate()
            .filter(|(j, _)| trp_bitmap & (1 << (j % TRP_LENGTH)) != 0)
            .map(|(_, offset)| SidelinkTransmissionInfo {
                subframe: period_start + *offset,
                rb_start: self.pssch_rbs[rb_start as usize],
                nb_rb: rb_len,
            })
            .collect())
    }

    /// Initial V2X transmission and, when `sf_gap > 0`, its retransmission.
    pub fn v2x_transmissions(
        &self,
        first: SubframeInfo,
        rb_start_pscch: u16,
        rb_start_pssch: u16,
        nb_rb_pssch: u16,
        nb_rb_pscch: u16,
        sf_gap: u8,
    ) -> Vec<V2xTransmissionInfo> {
        let initial = V2xTransmissionInfo {
            subframe: first,
            rb_start_pssch,
            nb_rb_pssch,
            rb_start_pscch,
            nb_rb_pscch,
            is_retransmission: false,
        };
        let mut transmissions = vec![initial];
        if sf_gap > 0 {
            transmissions.push(V2xTransmissionInfo {
                subframe: first + sf_gap as u32,
                is_retransmission: true,
                ..initial
            });
        }
        transmissions
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn bitmap(ones: std::ops::Range<usize>) -> SubframeBitmap {
        let s: String = (0..BITMAP_LENGTH).map(|i| if ones.contains(&i) { '1' } else { '0' }).collect();
        s.parse().unwrap()
    }

    /// Period 40, PSCCH in subframes 1-8, PSSCH in subframes 9-40.
    pub(crate) fn ue_selected_pool(prb_num: u16) -> ResourcePool {
        let config = PoolConfig::UeSelected {
            common: CommonPoolConfig {
                sc_cp_len: CpLength::Normal,
                sc_period: SlPeriod::Sf40,
                sc_tf_resource_config: TfResourceConfig {
                    prb_num: 1,
                    prb_start: 0,
                    prb_end: 1,
                    offset: 0,
                    subframe_bitmap: bitmap(0..8),
                },
                data_cp_len: CpLength::Normal,
                data_hopping_config: HoppingConfig::default(),
            },
            data_tf_resource_config: TfResourceConfig {
                prb_num,
                prb_start: 0,
                prb_end: 2 * prb_num - 1,
                offset: 0,
                subframe_bitmap: bitmap(8..40),
            },
            trpt_subset: TrptSubset::default(),
            sc_tx_parameters: TxParameters { alpha: Alpha::Al1, p0: -40 },
            data_tx_parameters: TxParameters { alpha: Alpha::Al1, p0: -40 },
        };
        ResourcePool::set_pool(config).unwrap()
    }

    fn sf(frame: u32, subframe: u32) -> SubframeInfo {
        SubframeInfo::new(frame, subframe).unwrap()
    }

    #[test]
    fn bitmap_parsing_checks_size_and_characters() {
        assert_eq!("1".repeat(39).parse::<SubframeBitmap>(), Err(PoolError::InconsistentBitmapSize(39)));
        let bad = format!("{}2", "0".repeat(39));
        assert_eq!(bad.parse::<SubframeBitmap>(), Err(PoolError::InvalidBitmapCharacter('2')));
        let b = bitmap(3..5);
        assert!(b.is_set(3) && b.is_set(4) && !b.is_set(5));
        assert_eq!(b.to_string().find('1'), Some(3));
    }

    #[test]
    fn unsupported_enum_strings_are_errors() {
        assert_eq!("sf50".parse::<SlPeriod>(), Err(PoolError::UnsupportedPeriod("sf50".into())));
        assert!(CpLength::try_from("long".to_string()).is_err());
        assert!(Alpha::try_from("al03".to_string()).is_err());
        assert_eq!(Alpha::try_from("al07".to_string()).unwrap().value(), 0.7);
        assert!(TrptSubset::try_from("1101".to_string()).is_err());
        assert!(TrptSubset::try_from("101".to_string()).unwrap().allows_weight(4));
    }

    #[test]
    fn pool_subframe_sets_follow_bitmaps() {
        let pool = ue_selected_pool(10);
        assert_eq!(pool.scheduling_type(), SchedulingType::UeSelected);
        assert_eq!(pool.period(), 40);
        for subframe in 1..=8 {
            assert!(pool.is_pscch_subframe(sf(0, subframe)));
            assert!(!pool.is_pssch_subframe(sf(0, subframe)));
        }
        assert!(pool.is_pssch_subframe(sf(0, 9)));
        assert!(pool.is_pssch_subframe(sf(3, 10)));
        // second period starts at frame 4
        assert!(pool.is_pscch_subframe(sf(4, 1)));
        assert_eq!(pool.current_sc_period(sf(5, 3)), sf(4, 1));
        assert_eq!(pool.next_sc_period(sf(5, 3)), sf(8, 1));
        assert_eq!(pool.subchannel_count(5), 4);
        assert_eq!(pool.n_pscch(), 8);
    }

    #[test]
    fn pscch_resource_mapping_uses_two_subframes_and_clusters() {
        let pool = ue_selected_pool(10);
        let start = sf(0, 1);
        let txs = pool.pscch_transmissions(start, 3).unwrap();
        // a1 = 0, a2 = 1, b1 = 3, b2 = (3 + 1 + 0) % 8 = 4
        assert_eq!(txs[0], SidelinkTransmissionInfo { subframe: sf(0, 4), rb_start: 0, nb_rb: 1 });
        assert_eq!(txs[1], SidelinkTransmissionInfo { subframe: sf(0, 5), rb_start: 1, nb_rb: 1 });
        assert_eq!(pool.pscch_rbs(sf(0, 5), 3).unwrap(), vec![1]);
        assert!(pool.pscch_transmissions(start, 8).is_err());
        assert_eq!(pool.pscch_opportunities(sf(0, 2)), vec![0, 1]);
        assert!(pool.pscch_opportunities(sf(0, 9)).is_empty());
    }

    #[test]
    fn pssch_transmissions_follow_trp_bits() {
        let pool = ue_selected_pool(10);
        let txs = pool.pssch_transmissions(sf(0, 1), 0b0000_0001, 2, 4).unwrap();
        // first of every 8 data subframes: offsets 8, 16, 24, 32
        let offsets: Vec<u32> = txs.iter().map(|t| t.subframe - sf(0, 1)).collect();
        assert_eq!(offsets, vec![8, 16, 24, 32]);
        assert!(txs.iter().all(|t| t.rb_start == 2 && t.nb_rb == 4));
        assert!(pool.pssch_transmissions(sf(0, 1), 0xff, 18, 4).is_err());
    }

    #[test]
    fn v2x_retransmission_is_gap_subframes_later() {
        let pool = ue_selected_pool(10);
        let txs = pool.v2x_transmissions(sf(1023, 9), 0, 2, 10, 2, 3);
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[1].subframe, sf(0, 2));
        assert!(txs[1].is_retransmission && !txs[0].is_retransmission);
        assert_eq!(pool.v2x_transmissions(sf(3, 3), 0, 2, 10, 2, 0).len(), 1);
    }

    #[test]
    fn scheduled_pool_uses_all_subframes_after_control() {
        let config: PoolConfig = serde_json::from_str(
            r#"{
                "type": "scheduled",
                "sc_cp_len": "normal",
                "sc_period": "sf80",
                "sc_tf_resource_config": {
                    "prb_num": 2, "prb_start": 0, "prb_end": 49, "offset": 0,
                    "subframe_bitmap": "1111000000000000000000000000000000000000"
                },
                "data_cp_len": "normal",
                "bandwidth_rbs": 50
            }"#,
        )
        .unwrap();
        let pool = ResourcePool::set_pool(config).unwrap();
        assert_eq!(pool.scheduling_type(), SchedulingType::Scheduled);
        assert!(!pool.is_pssch_subframe(sf(0, 4)));
        assert!(pool.is_pssch_subframe(sf(0, 5)));
        assert!(pool.is_pssch_subframe(sf(7, 10)));
        assert_eq!(pool.pssch_rb_count(), 50);
        assert_eq!(pool.n_pscch(), 8);
    }

    #[test]
    fn malformed_records_fail_to_parse() {
        let wrong_period = r#"{
            "type": "scheduled", "sc_cp_len": "normal", "sc_period": "sf50",
            "sc_tf_resource_config": {"prb_num": 2, "prb_start": 0, "prb_end": 49,
                "subframe_bitmap": "1111000000000000000000000000000000000000"},
            "data_cp_len": "normal", "bandwidth_rbs": 50
        }"#;
        let err = serde_json::from_str::<PoolConfig>(wrong_period).err().unwrap();
        assert!(err.to_string().contains("sf50"));

        let short_bitmap = wrong_period.replace("sf50", "sf40").replace("1111000000000000000000000000000000000000", "1111");
        let err = serde_json::from_str::<PoolConfig>(&short_bitmap).err().unwrap();
        assert!(err.to_string().contains("inconsistent bitmap size"));
    }

    #[test]
    fn reconfigure_replaces_pool() {
        let mut pool = ue_selected_pool(10);
        let replacement = ue_selected_pool(20).config().clone();
        pool.reconfigure(replacement).unwrap();
        assert_eq!(pool.pssch_rb_count(), 40);
    }
}
