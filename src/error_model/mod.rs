//! Table-driven PHY error model.
//!
//! Maps `(channel, MCS, SINR, HARQ history)` to a transport block error rate.
//!
//! Two kinds of curves are used:
//! - AWGN curves sampled on a uniform dB grid. Rows are selected by
//!   `4 * mcs + harq_index` and interpolation happens in linear SINR.
//! - Explicit breakpoint curves (CDL fading, NR sidelink). Interpolation
//!   happens in dB.
//!
//! Retransmissions of a transport block are soft-combined: when the SINR of
//! the new attempt differs from the previous one, the two BLERs are averaged
//! with the SINR ratio (larger over smaller) as weight, and the effective SINR
//! is recovered by reverse lookup on the same curve.
//!
//! Tables are built once on first use and shared for the whole process.

mod tables;

use rand::Rng;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

use tables::*;

/// Number of tabulated HARQ rows per MCS in the AWGN tables.
const HARQ_ROWS: usize = 4;

/// Physical channel (and channel model) whose curve is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// NR sidelink shared channel.
    Pssch,
    /// NR sidelink control channel (first-stage SCI).
    Pscch,
    /// LTE sidelink shared channel, AWGN.
    LtePssch,
    /// LTE uplink shared channel, AWGN.
    Pusch,
    /// Sidelink discovery channel, AWGN.
    Psdch,
    /// LTE sidelink control channel, AWGN.
    LtePscch,
    /// Sidelink broadcast channel, AWGN.
    Psbch,
    /// Shared channel over a CDL fading channel.
    CdlPssch { los: bool, nprb: u16 },
    /// Control channel over a CDL fading channel.
    CdlPscch { los: bool },
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Pssch => write!(f, "PSSCH"),
            Channel::Pscch => write!(f, "PSCCH"),
            Channel::LtePssch => write!(f, "LTE PSSCH"),
            Channel::Pusch => write!(f, "PUSCH"),
            Channel::Psdch => write!(f, "PSDCH"),
            Channel::LtePscch => write!(f, "LTE PSCCH"),
            Channel::Psbch => write!(f, "PSBCH"),
            Channel::CdlPssch { los, nprb } => write!(f, "CDL PSSCH ({}, {} PRBs)", if *los { "LOS" } else { "NLOSv" }, nprb),
            Channel::CdlPscch { los } => write!(f, "CDL PSCCH ({})", if *los { "LOS" } else { "NLOSv" }),
        }
    }
}

impl Channel {
    /// Highest MCS index the channel's curves are defined for.
    pub fn max_mcs(&self) -> u8 {
        match self {
            Channel::Pssch | Channel::Pscch => 27,
            Channel::Pusch => 28,
            Channel::LtePssch | Channel::CdlPssch { .. } | Channel::CdlPscch { .. } => 20,
            // single-curve channels ignore the MCS
            Channel::Psdch | Channel::LtePscch | Channel::Psbch => u8::MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorModelError {
    #[error("MCS {mcs} exceeds the maximum {max} of the {channel} error model")]
    McsOutOfRange { channel: Channel, mcs: u8, max: u8 },
    #[error("no CDL curve for an allocation of {0} PRBs")]
    UnsupportedPrbCount(u16),
}

/// Outcome of one error model evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TbErrorStats {
    /// Transport block error rate in [0, 1].
    pub bler: f64,
    /// Effective (post-combining) SINR, linear.
    pub sinr: f64,
}

impl TbErrorStats {
    /// Draw the decoding outcome; `true` means the block is corrupted.
    pub fn is_error<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.r#gen::<f64>() < self.bler
    }
}

/// SINR of every earlier attempt of the same transport block, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HarqProcessInfo {
    sinrs: Vec<f64>,
}

impl HarqProcessInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sinr: f64) {
        self.sinrs.push(sinr);
    }

    pub fn len(&self) -> usize {
        self.sinrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinrs.is_empty()
    }

    pub fn last_sinr(&self) -> Option<f64> {
        self.sinrs.last().copied()
    }
}

/// SINR grid of a curve.
#[derive(Debug, Clone)]
enum SinrAxis {
    /// `min_db + i * step_db`, interpolated in linear SINR.
    Uniform { min_db: f64, max_db: f64, step_db: f64 },
    /// Explicit breakpoints in dB, interpolated in dB.
    Points(Vec<f64>),
}

/// One BLER curve; the samples are non-increasing in SINR.
#[derive(Debug, Clone)]
struct BlerCurve {
    axis: SinrAxis,
    bler: Vec<f64>,
}

fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

/// Clamp samples into [0, 1] and flatten Monte-Carlo noise so that BLER
/// never rises with SINR.
fn monotone_envelope(samples: &[f64]) -> Vec<f64> {
    let mut floor = 1.0f64;
    samples
        .iter()
        .map(|&b| {
            floor = floor.min(b.clamp(0.0, 1.0));
            floor
        })
        .collect()
}

impl BlerCurve {
    fn from_awgn_row(row: [f64; 3], samples: &[f64]) -> Self {
        let [min_db, max_db, step_db] = row;
        let n = (((max_db - min_db) / step_db).round() as usize + 1).min(samples.len());
        Self {
            axis: SinrAxis::Uniform { min_db, max_db, step_db },
            bler: monotone_envelope(&samples[..n]),
        }
    }

    fn from_points(x: &[f64], y: &[f64]) -> Self {
        Self {
            axis: SinrAxis::Points(x.to_vec()),
            bler: monotone_envelope(y),
        }
    }

    /// BLER at a linear SINR.
    fn bler(&self, sinr: f64) -> f64 {
        if sinr.is_nan() || sinr <= 0.0 {
            return 1.0;
        }
        let sinr_db = 10.0 * sinr.log10();
        let last = self.bler.len() - 1;
        match &self.axis {
            SinrAxis::Uniform { min_db, max_db, step_db } => {
                if sinr_db < *min_db {
                    return 1.0;
                }
                if sinr_db > *max_db {
                    return 0.0;
                }
                let position = (sinr_db - min_db) / step_db;
                let i1 = (position.floor() as usize).min(last);
                let i2 = (position.ceil() as usize).min(last);
                if i1 == i2 {
                    return self.bler[i1];
                }
                let sinr1 = db_to_linear(min_db + i1 as f64 * step_db);
                let sinr2 = db_to_linear(min_db + i2 as f64 * step_db);
                let (b1, b2) = (self.bler[i1], self.bler[i2]);
                b1 + (b2 - b1) * (sinr - sinr1) / (sinr2 - sinr1)
            }
            SinrAxis::Points(x) => {
                if sinr_db >= x[last] {
                    return if sinr_db == x[last] { self.bler[last] } else { 0.0 };
                }
                if sinr_db < x[0] {
                    return 1.0;
                }
                let i = x.windows(2).position(|w| sinr_db >= w[0] && sinr_db < w[1]).unwrap_or(last - 1);
                let (x1, x2) = (x[i], x[i + 1]);
                let (b1, b2) = (self.bler[i], self.bler[i + 1]);
                b1 + (b2 - b1) * (sinr_db - x1) / (x2 - x1)
            }
        }
    }

    fn sinr_at(&self, index: usize) -> f64 {
        match &self.axis {
            SinrAxis::Uniform { min_db, step_db, .. } => db_to_linear(min_db + index as f64 * step_db),
            SinrAxis::Points(x) => db_to_linear(x[index]),
        }
    }

    /// Linear SINR at which the curve reaches `target`.
    ///
    /// Searches the first sample not above the target and interpolates with
    /// its predecessor; targets below every sample map to the last point.
    fn sinr_for_bler(&self, target: f64) -> f64 {
        let last = self.bler.len() - 1;
        let index = self.bler.iter().position(|&b| b <= target).unwrap_or(last);
        if index == 0 || self.bler[index] >= target {
            return self.sinr_at(index);
        }
        let (b1, b2) = (self.bler[index - 1], self.bler[index]);
        match &self.axis {
            SinrAxis::Uniform { .. } => {
                let (s1, s2) = (self.sinr_at(index - 1), self.sinr_at(index));
                s1 + (target - b1) * (s2 - s1) / (b2 - b1)
            }
            SinrAxis::Points(x) => {
                let (d1, d2) = (x[index - 1], x[index]);
                db_to_linear(d1 + (target - b1) * (d2 - d1) / (b2 - b1))
            }
        }
    }
}

struct ErrorTables {
    pusch: Vec<BlerCurve>,
    psdch: Vec<BlerCurve>,
    lte_pscch: BlerCurve,
    psbch: BlerCurve,
    /// Indexed by [los as usize][prb class].
    cdl_pssch: [Vec<BlerCurve>; 2],
    cdl_pscch: [BlerCurve; 2],
    nr_pssch: BlerCurve,
    nr_pscch: BlerCurve,
}

static TABLES: OnceLock<ErrorTables> = OnceLock::new();

fn awgn_rows(x: &[[f64; 3]], y: &[f64], stride: usize) -> Vec<BlerCurve> {
    x.iter()
        .enumerate()
        .map(|(row, limits)| BlerCurve::from_awgn_row(*limits, &y[row * stride..(row + 1) * stride]))
        .collect()
}

fn tables() -> &'static ErrorTables {
    TABLES.get_or_init(|| {
        let cdl_nlos = [
            &CDL_PSSCH_8RB_NLOSV,
            &CDL_PSSCH_18RB_NLOSV,
            &CDL_PSSCH_28RB_NLOSV,
            &CDL_PSSCH_38RB_NLOSV,
            &CDL_PSSCH_48RB_NLOSV,
        ];
        let cdl_los = [
            &CDL_PSSCH_8RB_LOS,
            &CDL_PSSCH_18RB_LOS,
            &CDL_PSSCH_28RB_LOS,
            &CDL_PSSCH_38RB_LOS,
            &CDL_PSSCH_48RB_LOS,
        ];
        ErrorTables {
            pusch: awgn_rows(&PUSCH_AWGN_X, &PUSCH_AWGN_Y, PUSCH_AWGN_STRIDE),
            psdch: awgn_rows(&PSDCH_AWGN_X, &PSDCH_AWGN_Y, PSDCH_AWGN_STRIDE),
            lte_pscch: BlerCurve::from_awgn_row(PSCCH_AWGN_X[0], &PSCCH_AWGN_Y),
            psbch: BlerCurve::from_awgn_row(PSBCH_AWGN_X[0], &PSBCH_AWGN_Y),
            cdl_pssch: [
                cdl_nlos.iter().map(|y| BlerCurve::from_points(&CDL_PSSCH_X, *y)).collect(),
                cdl_los.iter().map(|y| BlerCurve::from_points(&CDL_PSSCH_X, *y)).collect(),
            ],
            cdl_pscch: [
                BlerCurve::from_points(&CDL_PSCCH_X, &CDL_PSCCH_NLOSV),
                BlerCurve::from_points(&CDL_PSCCH_X, &CDL_PSCCH_LOS),
            ],
            nr_pssch: BlerCurve::from_points(&NR_PSSCH_X, &NR_PSSCH_Y),
            nr_pscch: BlerCurve::from_points(&NR_PSCCH_X, &NR_PSCCH_Y),
        }
    })
}

/// CDL curves exist for 8, 18, 28, 38 and 48 PRBs; nearby allocations map
/// to the closest simulated one.
fn cdl_prb_class(nprb: u16) -> Result<usize, ErrorModelError> {
    match nprb {
        8 | 10 | 12 => Ok(0),
        18 | 20 | 24 => Ok(1),
        28 | 30 | 36 => Ok(2),
        38 | 40 | 48 => Ok(3),
        50 => Ok(4),
        other => Err(ErrorModelError::UnsupportedPrbCount(other)),
    }
}

fn curve(channel: Channel, mcs: u8, harq_index: usize) -> Result<&'static BlerCurve, ErrorModelError> {
    let max = channel.max_mcs();
    if mcs > max {
        return Err(ErrorModelError::McsOutOfRange { channel, mcs, max });
    }
    let t = tables();
    let harq_row = harq_index.min(HARQ_ROWS - 1);
    Ok(match channel {
        Channel::Pssch => &t.nr_pssch,
        Channel::Pscch => &t.nr_pscch,
        Channel::LtePssch | Channel::Pusch => &t.pusch[HARQ_ROWS * mcs as usize + harq_row],
        Channel::Psdch => &t.psdch[harq_row],
        Channel::LtePscch => &t.lte_pscch,
        Channel::Psbch => &t.psbch,
        Channel::CdlPssch { los, nprb } => &t.cdl_pssch[los as usize][cdl_prb_class(nprb)?],
        Channel::CdlPscch { los } => &t.cdl_pscch[los as usize],
    })
}

fn sanitize(bler: f64) -> f64 {
    if bler.is_nan() { 1.0 } else { bler.clamp(0.0, 1.0) }
}

/// Evaluate the error rate of a transport block attempt.
///
/// # Parameters
///
/// * `channel` - Channel (and model) the block is sent on
/// * `mcs` - Modulation and coding scheme index
/// * `sinr` - Linear SINR of this attempt
/// * `harq` - SINRs of the earlier attempts of the same block
///
/// # Returns
///
/// The BLER in [0, 1] and the effective SINR, or an error when the MCS is
/// outside the channel's tables or no curve matches the allocation.
pub fn bler(channel: Channel, mcs: u8, sinr: f64, harq: &HarqProcessInfo) -> Result<TbErrorStats, ErrorModelError> {
    let curve = curve(channel, mcs, harq.len())?;

    let stats = match harq.last_sinr() {
        Some(prev_sinr) if prev_sinr != sinr => {
            let prev_bler = curve.bler(prev_sinr);
            let new_bler = curve.bler(sinr);
            if prev_bler == 1.0 && new_bler == 1.0 {
                TbErrorStats {
                    bler: 1.0,
                    sinr: prev_sinr.max(sinr),
                }
            } else {
                let ratio = if sinr > prev_sinr { sinr / prev_sinr } else { prev_sinr / sinr };
                let combined = if ratio.is_finite() && ratio > 0.0 {
                    sanitize((prev_bler + new_bler * ratio) / (1.0 + ratio))
                } else {
                    sanitize(new_bler)
                };
                TbErrorStats {
                    bler: combined,
                    sinr: curve.sinr_for_bler(combined),
                }
            }
        }
        _ => TbErrorStats {
            bler: sanitize(curve.bler(sinr)),
            sinr,
        },
    };

    log::trace!("{} mcs {} harq {}: bler {:.5} sinr {:.3}", channel, mcs, harq.len(), stats.bler, stats.sinr);
    Ok(stats)
}

/// Linear SINR at which `channel` reaches `target_bler` on its first attempt.
pub fn sinr_for_bler(channel: Channel, mcs: u8, target_bler: f64) -> Result<f64, ErrorModelError> {
    Ok(curve(channel, mcs, 0)?.sinr_for_bler(sanitize(target_bler)))
}
