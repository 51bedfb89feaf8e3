//! Adaptive modulation and coding: transport block sizing for the PSSCH.
//!
//! Given a PDU size and an MCS, find how many sub-channels (and, at single
//! RB granularity, how many RBs) are needed so that the quantized transport
//! block can carry the PDU. TBS quantization follows TS 38.214 5.1.3.2.

use serde::Deserialize;
use thiserror::Error;

/// Highest MCS index of MCS table 1.
pub const MAX_MCS: u8 = 27;

const SUBCARRIERS_PER_RB: u32 = 12;

/// Modulation order per MCS index (TS 38.214 table 5.1.3.1-1).
const MODULATION_ORDER: [u32; 28] = [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 4, 4, 4, 4, 4, 4, 4, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6];

/// Target code rate x 1024 per MCS index (TS 38.214 table 5.1.3.1-1).
const CODE_RATE_X1024: [f64; 28] = [
    120.0, 157.0, 193.0, 251.0, 308.0, 379.0, 449.0, 526.0, 602.0, 679.0, 340.0, 378.0, 434.0, 490.0, 553.0, 616.0, 658.0, 438.0, 466.0, 517.0,
    567.0, 616.0, 666.0, 719.0, 772.0, 822.0, 873.0, 910.0,
];

/// Allowed TBS values for `N_info <= 3824` (TS 38.214 table 5.1.3.2-1).
const TBS_TABLE: [u32; 93] = [
    24, 32, 40, 48, 56, 64, 72, 80, 88, 96, 104, 112, 120, 128, 136, 144, 152, 160, 168, 176, 184, 192, 208, 224, 240, 256, 272, 288, 304, 320, 336,
    352, 368, 384, 408, 432, 456, 480, 504, 528, 552, 576, 608, 640, 672, 704, 736, 768, 808, 848, 888, 928, 984, 1032, 1064, 1128, 1160, 1192,
    1224, 1256, 1288, 1320, 1352, 1416, 1480, 1544, 1608, 1672, 1736, 1800, 1864, 1928, 2024, 2088, 2152, 2216, 2280, 2408, 2472, 2536, 2600,
    2664, 2728, 2792, 2856, 2976, 3104, 3240, 3368, 3496, 3624, 3752, 3824,
];

/// Second-stage SCI (format 2-B) payload and CRC bits.
const SCI2_BITS: f64 = 48.0 + 24.0;
const SCI2_BETA_OFFSET: f64 = 3.5;
/// Second-stage SCI is always QPSK.
const SCI2_MODULATION_ORDER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmcError {
    #[error("MCS {0} exceeds the maximum index 27")]
    McsOutOfRange(u8),
    #[error("sub-channel size {subchannel_size} RBs does not fit a {bandwidth_rbs} RB carrier")]
    InvalidSubchannelSize { subchannel_size: u16, bandwidth_rbs: u16 },
    #[error("PDU of {pdu_bytes} bytes does not fit {bandwidth_rbs} RBs at MCS {mcs}")]
    PduTooLarge { pdu_bytes: u32, mcs: u8, bandwidth_rbs: u16 },
}

/// PSSCH DMRS time pattern (TS 38.211 table 8.4.1.1.2-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DmrsPattern {
    Two,
    Three,
    Four,
    TwoThree,
    #[default]
    TwoFour,
    ThreeFour,
    TwoThreeFour,
}

impl DmrsPattern {
    /// DMRS resource elements per RB.
    pub fn resource_elements(&self) -> u32 {
        match self {
            DmrsPattern::Two => 12,
            DmrsPattern::Three => 18,
            DmrsPattern::Four => 24,
            DmrsPattern::TwoThree => 15,
            DmrsPattern::TwoFour => 18,
            DmrsPattern::ThreeFour => 21,
            DmrsPattern::TwoThreeFour => 18,
        }
    }
}

/// Result of [`Amc::compute_allocation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// Smallest number of sub-channels carrying the PDU.
    pub subchannels: u16,
    /// `subchannels * subchannel_size`.
    pub subchannel_rbs: u16,
    /// Smallest number of RBs carrying the PDU at single RB granularity.
    pub rbs: u16,
    /// Transport block size of the sub-channel allocation, in bits.
    pub tbs_bits: u32,
}

impl Allocation {
    pub fn tbs_bytes(&self) -> u32 {
        self.tbs_bits / 8
    }
}

/// Slot structure parameters entering the resource element budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amc {
    pub sidelink_symbols: u32,
    pub first_stage_sci_symbols: u32,
    pub psfch_symbols: u32,
    pub overhead_res: u32,
    pub dmrs: DmrsPattern,
}

impl Default for Amc {
    fn default() -> Self {
        Self {
            sidelink_symbols: 14,
            first_stage_sci_symbols: 2,
            psfch_symbols: 0,
            overhead_res: 0,
            dmrs: DmrsPattern::default(),
        }
    }
}

/// Modulation order and real code rate of an MCS index.
pub fn mcs_parameters(mcs: u8) -> Result<(u32, f64), AmcError> {
    if mcs > MAX_MCS {
        return Err(AmcError::McsOutOfRange(mcs));
    }
    let i = mcs as usize;
    Ok((MODULATION_ORDER[i], CODE_RATE_X1024[i] / 1024.0))
}

/// Quantize the number of information bits to a legal transport block size.
///
/// # Parameters
///
/// * `n_info` - Unquantized information bits (`N_RE * R * Qm`)
/// * `code_rate` - Real target code rate `R`
///
/// # Returns
///
/// TBS in bits; zero when there are no information bits at all.
pub fn quantize_tbs(n_info: f64, code_rate: f64) -> u32 {
    if !(n_info > 0.0) {
        return 0;
    }
    if n_info <= 3824.0 {
        let n = (n_info.log2().floor() as i32 - 6).max(3);
        let step = 2f64.powi(n);
        let n_info_prime = (step * (n_info / step).floor()).max(24.0);
        return TBS_TABLE.iter().copied().find(|&tbs| tbs as f64 >= n_info_prime).unwrap_or(TBS_TABLE[TBS_TABLE.len() - 1]);
    }

    let n = (n_info - 24.0).log2().floor() as i32 - 5;
    let step = 2f64.powi(n);
    let n_info_prime = (step * ((n_info - 24.0) / step).round()).max(3840.0);
    let segmented = |max_cb: f64| {
        let c = ((n_info_prime + 24.0) / max_cb).ceil();
        (8.0 * c * ((n_info_prime + 24.0) / (8.0 * c)).ceil() - 24.0) as u32
    };
    if code_rate <= 0.25 {
        segmented(3816.0)
    } else if n_info_prime > 8424.0 {
        segmented(8424.0)
    } else {
        (8.0 * ((n_info_prime + 24.0) / 8.0).ceil() - 24.0) as u32
    }
}

impl Amc {
    /// PSSCH resource elements available in one RB of a slot.
    pub fn pssch_res_per_rb(&self) -> u32 {
        // first symbol is AGC, last is the guard
        let symbols = self.sidelink_symbols.saturating_sub(2).saturating_sub(self.psfch_symbols);
        (SUBCARRIERS_PER_RB * symbols).saturating_sub(self.overhead_res + self.dmrs.resource_elements())
    }

    /// Resource elements taken by the second-stage SCI at code rate `r`.
    pub fn second_stage_sci_res(code_rate: f64) -> u32 {
        (SCI2_BITS * SCI2_BETA_OFFSET / (code_rate * SCI2_MODULATION_ORDER)).ceil() as u32
    }

    /// TBS in bits of an allocation of `rbs` RBs.
    fn tbs_for_rbs(&self, rbs: u32, subchannel_size: u16, modulation_order: u32, code_rate: f64) -> u32 {
        let pscch_res = self.first_stage_sci_symbols * SUBCARRIERS_PER_RB * u32::from(subchannel_size);
        let n_re = f64::from(self.pssch_res_per_rb() * rbs) - f64::from(pscch_res) - f64::from(Self::second_stage_sci_res(code_rate));
        quantize_tbs(n_re * code_rate * f64::from(modulation_order), code_rate)
    }

    /// Find the smallest allocation carrying `pdu_bytes` at `mcs`.
    ///
    /// Sub-channel counts grow from 1 up to the number of whole sub-channels
    /// in the carrier; RB counts grow from one sub-channel upward one RB at a
    /// time. The PSCCH always occupies one sub-channel of the allocation.
    ///
    /// # Parameters
    ///
    /// * `pdu_bytes` - Size of the MAC PDU
    /// * `mcs` - MCS index of table 1
    /// * `subchannel_size` - Sub-channel size in RBs
    /// * `bandwidth_rbs` - Carrier bandwidth in RBs
    ///
    /// # Returns
    ///
    /// The minimal allocation, or `PduTooLarge` when even the whole carrier
    /// is too small.
    pub fn compute_allocation(&self, pdu_bytes: u32, mcs: u8, subchannel_size: u16, bandwidth_rbs: u16) -> Result<Allocation, AmcError> {
        let (qm, r) = mcs_parameters(mcs)?;
        if subchannel_size == 0 || subchannel_size > bandwidth_rbs {
            return Err(AmcError::InvalidSubchannelSize { subchannel_size, bandwidth_rbs });
        }
        let pdu_bits = pdu_bytes.saturating_mul(8);
        let too_large = AmcError::PduTooLarge { pdu_bytes, mcs, bandwidth_rbs };
        let max_subchannels = bandwidth_rbs / subchannel_size;

        let (subchannels, tbs_bits) = (1..=max_subchannels)
            .map(|j| (j, self.tbs_for_rbs(u32::from(j * subchannel_size), subchannel_size, qm, r)))
            .find(|&(_, tbs)| tbs >= pdu_bits)
            .ok_or(too_large.clone())?;

        let rbs = (subchannel_size..=bandwidth_rbs)
            .find(|&j| self.tbs_for_rbs(u32::from(j), subchannel_size, qm, r) >= pdu_bits)
            .ok_or(too_large)?;

        log::debug!(
            "PDU {} B at MCS {}: {} sub-channel(s) of {} RBs (TBS {} B), {} RBs",
            pdu_bytes,
            mcs,
            subchannels,
            subchannel_size,
            tbs_bits / 8,
            rbs
        );

        Ok(Allocation {
            subchannels,
            subchannel_rbs: subchannels * subchannel_size,
            rbs,
            tbs_bits,
        })
    }
}
