//! Carrier helpers derived from the NR numerology and channel bandwidth.
//!
//! Values come from 3GPP TS 38.101-1 (maximum transmission bandwidth and
//! reference sensitivity) and TS 38.214 (processing times).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumerologyError {
    #[error("numerology index {0} is not supported in FR1 (allowed 0, 1, 2)")]
    UnsupportedNumerology(u8),
    #[error("channel bandwidth {bandwidth_mhz} MHz is not defined for {scs_khz} kHz subcarrier spacing")]
    UnsupportedBandwidth { scs_khz: u16, bandwidth_mhz: u32 },
    #[error("sub-channel size must be positive and not exceed {bandwidth_rbs} RBs, got {subchannel_size}")]
    InvalidSubchannelSize { subchannel_size: u16, bandwidth_rbs: u16 },
}

const T_PROC_0: [u16; 4] = [1, 1, 2, 4];
const T_PROC_1: [u16; 4] = [3, 5, 9, 17];

/// NR numerology `mu`; the subcarrier spacing is `15 * 2^mu` kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Numerology {
    index: u8,
}

impl Numerology {
    pub fn new(index: u8) -> Result<Self, NumerologyError> {
        if index > 2 {
            return Err(NumerologyError::UnsupportedNumerology(index));
        }
        Ok(Self { index })
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn scs_khz(&self) -> u16 {
        15 << self.index
    }

    /// Slot length in milliseconds (1, 0.5 or 0.25).
    pub fn slot_duration_ms(&self) -> f64 {
        1.0 / f64::from(1u32 << self.index)
    }

    pub fn slot_duration_us(&self) -> u64 {
        1000 >> self.index
    }

    /// Number of slots covering `ms` milliseconds.
    pub fn slots_in_ms(&self, ms: u32) -> u32 {
        ms << self.index
    }

    /// Sensing processing time in slots.
    pub fn t_proc0(&self) -> u16 {
        T_PROC_0[self.index as usize]
    }

    /// Resource selection processing time in slots.
    pub fn t_proc1(&self) -> u16 {
        T_PROC_1[self.index as usize]
    }
}

/// Maximum transmission bandwidth in RBs (TS 38.101-1 table 5.3.2-1).
pub fn rbs_from_bandwidth(scs_khz: u16, bandwidth_mhz: u32) -> Result<u16, NumerologyError> {
    let column = match scs_khz {
        15 => 0,
        30 => 1,
        60 => 2,
        _ => return Err(NumerologyError::UnsupportedBandwidth { scs_khz, bandwidth_mhz }),
    };
    let row: [u16; 3] = match bandwidth_mhz {
        5 => [25, 11, 0],
        10 => [52, 24, 11],
        15 => [79, 38, 18],
        20 => [106, 51, 24],
        25 => [133, 65, 31],
        30 => [160, 78, 38],
        40 => [216, 106, 51],
        50 => [270, 133, 65],
        60 => [0, 162, 79],
        70 => [0, 189, 93],
        80 => [0, 217, 107],
        90 => [0, 245, 121],
        100 => [0, 273, 135],
        _ => [0, 0, 0],
    };
    match row[column] {
        0 => Err(NumerologyError::UnsupportedBandwidth { scs_khz, bandwidth_mhz }),
        rbs => Ok(rbs),
    }
}

/// Reference sensitivity in dBm for the V2X band.
///
/// 50 MHz reuses the 40 MHz values so frequency-reuse layouts can be run.
pub fn reference_sensitivity(scs_khz: u16, bandwidth_mhz: u32) -> Result<f64, NumerologyError> {
    let row: [f64; 3] = match bandwidth_mhz {
        10 => [-92.5, -92.1, -92.9],
        20 => [-89.2, -89.4, -89.1],
        30 => [-87.4, -87.7, -87.9],
        40 | 50 => [-86.1, -86.2, -86.4],
        _ => return Err(NumerologyError::UnsupportedBandwidth { scs_khz, bandwidth_mhz }),
    };
    match scs_khz {
        15 => Ok(row[0]),
        30 => Ok(row[1]),
        60 => Ok(row[2]),
        _ => Err(NumerologyError::UnsupportedBandwidth { scs_khz, bandwidth_mhz }),
    }
}

/// Smallest configurable RSSI threshold (`-112 + 2i` dBm) above the sensitivity.
pub fn rssi_threshold(sensitivity_dbm: f64) -> Option<f64> {
    (0..45).map(|i| -112.0 + 2.0 * i as f64).find(|&threshold| threshold > sensitivity_dbm)
}

/// Geographical cell size for zone based reuse.
///
/// # Returns
///
/// `(cell_size_m, cells_per_cluster)`.
pub fn geo_cell_size(subchannel_size: u16, bandwidth_rbs: u16, reuse_distance_m: f64) -> Result<(f64, u32), NumerologyError> {
    if subchannel_size == 0 || subchannel_size > bandwidth_rbs {
        return Err(NumerologyError::InvalidSubchannelSize { subchannel_size, bandwidth_rbs });
    }
    let cells = u32::from(bandwidth_rbs / subchannel_size);
    Ok((reuse_distance_m / cells as f64, cells))
}
