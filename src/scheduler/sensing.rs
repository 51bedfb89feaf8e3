//! Sensing history of one UE: reservations decoded from other nodes' SCI and
//! the UE's own past transmissions.

use std::collections::HashMap;

use super::types::{CandidateResource, SensingReport};
use crate::NodeId;
use crate::propagation::{dbm_to_mw, mw_to_dbm};
use crate::subframe::{CYCLE_LENGTH, SubframeInfo};

/// Occasions of a sensed reservation are looked up this far back for the
/// interference ranking.
const RSSI_LOOKBACK_STEPS: u32 = 10;
const RSSI_LOOKBACK_MS: u32 = 100;

/// One decoded reservation, stored per sub-channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensedReservation {
    pub node_id: NodeId,
    pub sensed_at: SubframeInfo,
    pub received_us: u64,
    pub subchannel: u16,
    pub rsrp_dbm: f64,
    pub rri_ms: u32,
    pub reselection_counter: u32,
    pub is_retransmission: bool,
}

/// Projected power on one (slot, sub-channel) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Occupancy {
    power_mw: f64,
    node_id: NodeId,
    /// More than one node projects onto this pair.
    merged: bool,
}

/// Future occupancy built from the sensing history for one selection.
#[derive(Debug, Default)]
pub struct OccupancyMap {
    cells: HashMap<(u32, u16), Occupancy>,
}

impl OccupancyMap {
    fn add(&mut self, slot: SubframeInfo, subchannel: u16, rsrp_dbm: f64, node_id: NodeId) {
        let power_mw = dbm_to_mw(rsrp_dbm);
        self.cells
            .entry((slot.index(), subchannel))
            .and_modify(|cell| {
                if cell.node_id == node_id && !cell.merged {
                    cell.power_mw = cell.power_mw.max(power_mw);
                } else {
                    cell.power_mw += power_mw;
                    cell.merged = true;
                }
            })
            .or_insert(Occupancy { power_mw, node_id, merged: false });
    }

    /// Projected power in dBm, if anything was projected onto the pair.
    pub fn power_dbm(&self, slot: SubframeInfo, subchannel: u16) -> Option<f64> {
        self.cells.get(&(slot.index(), subchannel)).map(|c| mw_to_dbm(c.power_mw))
    }

    /// Whether the pair carries at least `threshold_dbm`.
    pub fn is_marked(&self, slot: SubframeInfo, subchannel: u16, threshold_dbm: f64) -> bool {
        self.power_dbm(slot, subchannel).is_some_and(|p| p >= threshold_dbm)
    }

    /// Strongest projected power, used to stop relaxing the threshold.
    pub fn max_power_dbm(&self) -> Option<f64> {
        self.cells.values().map(|c| mw_to_dbm(c.power_mw)).reduce(f64::max)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Parameters of an occupancy projection.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub now: SubframeInfo,
    pub now_us: u64,
    /// Last slot of the selection window, relative to `now`.
    pub t2: u32,
    /// Reports younger than this many slots are not processed yet.
    pub t_proc0: u32,
    pub sensing_window_us: u64,
    pub slots_per_ms: u32,
    pub use_rx_cresel: bool,
}

#[derive(Debug, Default)]
pub struct SensingHistory {
    reservations: Vec<SensedReservation>,
    own_transmissions: Vec<(SubframeInfo, u64)>,
}

impl SensingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a decoded SCI, split over the sub-channels it occupies.
    pub fn record(&mut self, report: &SensingReport, subchannel_size: u16) {
        if subchannel_size == 0 || report.rb_len == 0 {
            return;
        }
        let first = report.rb_start / subchannel_size;
        let count = report.rb_len.div_ceil(subchannel_size).max(1);
        for subchannel in first..first + count {
            self.reservations.push(SensedReservation {
                node_id: report.node_id,
                sensed_at: report.sensed_at,
                received_us: report.received_us,
                subchannel,
                rsrp_dbm: report.rsrp_dbm,
                rri_ms: report.rri_ms,
                reselection_counter: report.reselection_counter,
                is_retransmission: report.is_retransmission,
            });
        }
    }

    pub fn record_own_transmission(&mut self, slot: SubframeInfo, now_us: u64) {
        self.own_transmissions.push((slot, now_us));
    }

    /// Forget everything older than the sensing window.
    pub fn prune(&mut self, now_us: u64, window_us: u64) {
        let horizon = now_us.saturating_sub(window_us);
        self.reservations.retain(|r| r.received_us >= horizon);
        self.own_transmissions.retain(|&(_, t)| t >= horizon);
    }

    pub fn clear(&mut self) {
        self.reservations.clear();
        self.own_transmissions.clear();
    }

    pub fn reservations(&self) -> &[SensedReservation] {
        &self.reservations
    }

    pub fn own_transmissions(&self) -> impl Iterator<Item = SubframeInfo> + '_ {
        self.own_transmissions.iter().map(|&(slot, _)| slot)
    }

    /// Project every processable reservation onto future slots.
    ///
    /// A reservation sensed at `s` with interval `P` occupies `s + q * P`
    /// for `q = 1..=Q`. `Q` is 1, unless the interval is shorter than the
    /// selection window and the reservation is recent and not a
    /// retransmission, in which case enough occasions to cover the window
    /// are projected. With `use_rx_cresel` the advertised counter extends
    /// `Q` further. One-shot reservations (`P = 0`) are not projected.
    pub fn project(&self, projection: &Projection) -> OccupancyMap {
        let mut map = OccupancyMap::default();
        let horizon = projection.now_us.saturating_sub(projection.sensing_window_us);
        for r in &self.reservations {
            if r.received_us < horizon || r.rri_ms == 0 {
                continue;
            }
            let age = projection.now - r.sensed_at;
            if age < projection.t_proc0 {
                continue;
            }
            let rri_slots = r.rri_ms * projection.slots_per_ms;
            let mut occurrences = 1;
            if rri_slots < projection.t2 && age <= rri_slots && !r.is_retransmission {
                occurrences = projection.t2.div_ceil(rri_slots);
            }
            if projection.use_rx_cresel {
                occurrences = occurrences.max(r.reselection_counter);
            }
            for q in 1..=occurrences {
                // occasions already in the past do not constrain the window
                if q * rri_slots < age {
                    continue;
                }
                map.add(r.sensed_at + q * rri_slots, r.subchannel, r.rsrp_dbm, r.node_id);
            }
        }
        map
    }

    /// Average sensed power over the candidate's sub-channels at the ten
    /// slots `100 ms * k` before it, in mW.
    pub fn average_interference_mw(&self, candidate: &CandidateResource, slots_per_ms: u32) -> f64 {
        let step = RSSI_LOOKBACK_MS * slots_per_ms;
        let mut total = 0.0;
        for subchannel in candidate.subchannels() {
            for k in 1..=RSSI_LOOKBACK_STEPS {
                let past = candidate.subframe + (CYCLE_LENGTH - (k * step) % CYCLE_LENGTH);
                total += self
                    .reservations
                    .iter()
                    .filter(|r| r.sensed_at == past && r.subchannel == subchannel)
                    .map(|r| dbm_to_mw(r.rsrp_dbm))
                    .sum::<f64>();
            }
        }
        total / f64::from(RSSI_LOOKBACK_STEPS) / f64::from(candidate.subchannel_count.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(node_id: NodeId, sensed_at: u64, rb_start: u16, rb_len: u16, rsrp_dbm: f64, rri_ms: u32) -> SensingReport {
        SensingReport {
            node_id,
            sensed_at: SubframeInfo::from_index(sensed_at),
            received_us: sensed_at * 1000,
            rb_start,
            rb_len,
            rsrp_dbm,
            rri_ms,
            reselection_counter: 5,
            is_retransmission: false,
        }
    }

    fn projection(now: u64) -> Projection {
        Projection {
            now: SubframeInfo::from_index(now),
            now_us: now * 1000,
            t2: 99,
            t_proc0: 1,
            sensing_window_us: 1_000_000,
            slots_per_ms: 1,
            use_rx_cresel: false,
        }
    }

    #[test]
    fn report_spans_its_subchannels() {
        let mut history = SensingHistory::new();
        history.record(&report(1, 10, 10, 20, -90.0, 100), 10);
        let subchannels: Vec<u16> = history.reservations().iter().map(|r| r.subchannel).collect();
        assert_eq!(subchannels, vec![1, 2]);
    }

    #[test]
    fn prune_drops_old_entries() {
        let mut history = SensingHistory::new();
        history.record(&report(1, 10, 0, 10, -90.0, 100), 10);
        history.record(&report(2, 1500, 0, 10, -90.0, 100), 10);
        history.record_own_transmission(SubframeInfo::from_index(20), 20_000);
        history.prune(1_600_000, 1_000_000);
        assert_eq!(history.reservations().len(), 1);
        assert_eq!(history.reservations()[0].node_id, 2);
        assert_eq!(history.own_transmissions().count(), 0);
    }

    #[test]
    fn reservation_projects_one_interval_ahead() {
        let mut history = SensingHistory::new();
        history.record(&report(1, 50, 0, 10, -90.0, 100), 10);
        let map = history.project(&projection(100));
        assert!(map.is_marked(SubframeInfo::from_index(150), 0, -100.0));
        assert!(!map.is_marked(SubframeInfo::from_index(150), 0, -80.0));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn short_interval_projects_over_window() {
        let mut history = SensingHistory::new();
        history.record(&report(1, 90, 0, 10, -90.0, 20), 10);
        let map = history.project(&projection(100));
        for slot in [110, 130, 150, 170, 190] {
            assert!(map.power_dbm(SubframeInfo::from_index(slot), 0).is_some(), "slot {slot}");
        }
    }

    #[test]
    fn too_recent_and_one_shot_reports_are_ignored() {
        let mut history = SensingHistory::new();
        history.record(&report(1, 100, 0, 10, -90.0, 100), 10);
        history.record(&report(2, 60, 0, 10, -90.0, 0), 10);
        assert!(history.project(&projection(100)).is_empty());
    }

    #[test]
    fn colliding_nodes_add_up() {
        let mut history = SensingHistory::new();
        history.record(&report(1, 50, 0, 10, -90.0, 100), 10);
        history.record(&report(2, 50, 0, 10, -90.0, 100), 10);
        let map = history.project(&projection(100));
        let p = map.power_dbm(SubframeInfo::from_index(150), 0).unwrap();
        assert!((p - (-90.0 + 10.0 * 2f64.log10())).abs() < 1e-9);
    }

    #[test]
    fn interference_looks_back_in_100ms_steps() {
        let mut history = SensingHistory::new();
        history.record(&report(1, 300, 0, 10, -80.0, 100), 10);
        let candidate = CandidateResource {
            subframe: SubframeInfo::from_index(500),
            subchannel_start: 0,
            subchannel_count: 1,
        };
        let avg = history.average_interference_mw(&candidate, 1);
        assert!((avg - dbm_to_mw(-80.0) / 10.0).abs() < 1e-18);
        let other = CandidateResource { subchannel_start: 1, ..candidate };
        assert_eq!(history.average_interference_mw(&other, 1), 0.0);
    }
}
