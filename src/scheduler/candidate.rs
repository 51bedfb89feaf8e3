//! Candidate single-slot resource set construction.
//!
//! The window `[n + T1, n + T2]` is enumerated over PSSCH slots of the pool
//! and every start sub-channel that fits `L` contiguous sub-channels. Two
//! exclusion passes then run over it:
//!
//! 1. half-duplex: slots that line up with one of our own past transmissions
//!    at any allowed reservation interval, since we could not sense them;
//! 2. sensing: candidates whose occasions hit a projected reservation at or
//!    above the RSRP threshold.
//!
//! The threshold is raised in steps until at least `size_threshold` of the
//! window survives. When nothing survives even without exclusion the whole
//! window is returned and flagged as a fallback.

use log::{debug, warn};

use super::sensing::{OccupancyMap, Projection, SensingHistory};
use super::types::{CandidateResource, SchedulerError, SchedulerParams};
use crate::pool::ResourcePool;
use crate::subframe::SubframeInfo;

/// Safety cap on threshold relaxation rounds.
const MAX_RELAXATION_ROUNDS: u32 = 64;

/// Candidate set produced for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    pub resources: Vec<CandidateResource>,
    /// Size of the window before any exclusion.
    pub total: usize,
    pub threshold_dbm: f64,
    /// Threshold increases applied.
    pub relaxations: u32,
    /// The window was returned unfiltered.
    pub fallback: bool,
    /// The half-duplex pass would have emptied the window and was skipped.
    pub half_duplex_skipped: bool,
}

impl CandidateSet {
    pub fn is_relaxed(&self) -> bool {
        self.relaxations > 0
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// What the selection is made for.
#[derive(Debug, Clone, Copy)]
pub struct SelectionRequest {
    pub now: SubframeInfo,
    pub now_us: u64,
    pub pdb_ms: u32,
    pub subchannels_needed: u16,
    /// Interval of the reservation being made, 0 for one-shot.
    pub rri_ms: u32,
    /// Occasions the new reservation will occupy.
    pub reselection_counter: u32,
}

/// Every `(slot, start sub-channel)` pair of the selection window.
pub fn selection_window(
    pool: &ResourcePool,
    params: &SchedulerParams,
    request: &SelectionRequest,
) -> Result<Vec<CandidateResource>, SchedulerError> {
    let available = pool.subchannel_count(params.subchannel_size);
    let needed = request.subchannels_needed.max(1);
    if needed > available {
        return Err(SchedulerError::NotEnoughSubchannels { needed, available });
    }
    let t2 = params.t2(request.pdb_ms);
    let mut window = Vec::new();
    for offset in params.t1..=t2 {
        let slot = request.now + offset;
        if !pool.is_pssch_subframe(slot) {
            continue;
        }
        for start in 0..=available - needed {
            window.push(CandidateResource {
                subframe: slot,
                subchannel_start: start,
                subchannel_count: needed,
            });
        }
    }
    if window.is_empty() {
        return Err(SchedulerError::EmptyWindow { now: request.now, t1: params.t1, t2 });
    }
    Ok(window)
}

/// Future slots a candidate would occupy when chosen.
fn occasions(candidate: &CandidateResource, params: &SchedulerParams, request: &SelectionRequest) -> Vec<SubframeInfo> {
    let rri_slots = params.slots_in_ms(request.rri_ms);
    let count = if params.use_tx_cresel && rri_slots > 0 {
        request.reselection_counter.max(1)
    } else {
        1
    };
    (0..count).map(|j| candidate.subframe + j * rri_slots).collect()
}

fn is_half_duplex_blocked(
    candidate: &CandidateResource,
    own: &[SubframeInfo],
    params: &SchedulerParams,
    request: &SelectionRequest,
) -> bool {
    let horizon = params.slots_in_ms(params.sensing_window_ms) + params.t2(request.pdb_ms);
    occasions(candidate, params, request).iter().any(|&slot| {
        own.iter().any(|&tx| {
            let distance = slot - tx;
            params.allowed_rris_ms.iter().filter(|&&rri| rri > 0).any(|&rri| {
                let rri_slots = params.slots_in_ms(rri);
                distance > 0 && distance <= horizon && distance % rri_slots == 0
            })
        })
    })
}

fn projection(params: &SchedulerParams, request: &SelectionRequest) -> Projection {
    Projection {
        now: request.now,
        now_us: request.now_us,
        t2: params.t2(request.pdb_ms),
        t_proc0: u32::from(params.numerology.t_proc0()),
        sensing_window_us: u64::from(params.sensing_window_ms) * 1000,
        slots_per_ms: params.slots_in_ms(1),
        use_rx_cresel: params.use_rx_cresel,
    }
}

fn is_sensing_blocked(
    candidate: &CandidateResource,
    occupancy: &OccupancyMap,
    threshold_dbm: f64,
    params: &SchedulerParams,
    request: &SelectionRequest,
) -> bool {
    occasions(candidate, params, request)
        .iter()
        .any(|&slot| candidate.subchannels().any(|sc| occupancy.is_marked(slot, sc, threshold_dbm)))
}

/// Build the candidate set for one selection.
///
/// # Parameters
///
/// * `pool` - Resource pool giving the PSSCH slots and sub-channel count
/// * `history` - Sensing history of the selecting UE
/// * `params` - Scheduler tunables
/// * `request` - Trigger time, delay budget and reservation being made
///
/// # Returns
///
/// The surviving candidates with relaxation and fallback flags, or
/// [`SchedulerError::EmptyWindow`] when the window holds no PSSCH slot.
pub fn build_candidate_set(
    pool: &ResourcePool,
    history: &SensingHistory,
    params: &SchedulerParams,
    request: &SelectionRequest,
) -> Result<CandidateSet, SchedulerError> {
    let window = selection_window(pool, params, request)?;
    let total = window.len();
    let mut set = CandidateSet {
        resources: Vec::new(),
        total,
        threshold_dbm: params.rsrp_threshold_dbm,
        relaxations: 0,
        fallback: false,
        half_duplex_skipped: false,
    };
    if params.random_selection {
        set.resources = window;
        return Ok(set);
    }

    let own: Vec<SubframeInfo> = history.own_transmissions().collect();
    let mut base: Vec<CandidateResource> = window
        .iter()
        .filter(|c| !is_half_duplex_blocked(c, &own, params, request))
        .copied()
        .collect();
    if base.is_empty() {
        debug!("half-duplex exclusion empties the window at {}, skipping it", request.now);
        set.half_duplex_skipped = true;
        base = window.clone();
    }

    let occupancy = history.project(&projection(params, request));
    let target = (params.size_threshold * total as f64).ceil() as usize;
    let strongest = occupancy.max_power_dbm();
    let mut threshold = params.rsrp_threshold_dbm;
    loop {
        let survivors: Vec<CandidateResource> = base
            .iter()
            .filter(|c| !is_sensing_blocked(c, &occupancy, threshold, params, request))
            .copied()
            .collect();
        let exhausted = strongest.is_none_or(|p| threshold > p) || set.relaxations >= MAX_RELAXATION_ROUNDS;
        if survivors.len() >= target.max(1) || (exhausted && !survivors.is_empty()) {
            set.resources = survivors;
            set.threshold_dbm = threshold;
            break;
        }
        if exhausted {
            warn!(
                "no candidate left at {} after {} relaxations, falling back to the full window",
                request.now, set.relaxations
            );
            set.resources = window;
            set.threshold_dbm = threshold;
            set.fallback = true;
            break;
        }
        threshold += params.threshold_step_db;
        set.relaxations += 1;
    }
    debug!(
        "candidate set at {}: {}/{} resources, threshold {:.1} dBm, {} relaxations",
        request.now,
        set.resources.len(),
        total,
        set.threshold_dbm,
        set.relaxations
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::tests::ue_selected_pool;
    use crate::scheduler::types::SensingReport;

    fn request(now: u64, pdb_ms: u32) -> SelectionRequest {
        SelectionRequest {
            now: SubframeInfo::from_index(now),
            now_us: now * 1000,
            pdb_ms,
            subchannels_needed: 1,
            rri_ms: 100,
            reselection_counter: 10,
        }
    }

    fn sense(history: &mut SensingHistory, node_id: u32, slot: u64, subchannel: u16, rsrp_dbm: f64) {
        history.record(
            &SensingReport {
                node_id,
                sensed_at: SubframeInfo::from_index(slot),
                received_us: slot * 1000,
                rb_start: subchannel * 10,
                rb_len: 10,
                rsrp_dbm,
                rri_ms: 100,
                reselection_counter: 5,
                is_retransmission: false,
            },
            10,
        );
    }

    #[test]
    fn window_only_holds_pssch_slots() {
        // 20 data RBs give two sub-channels of 10
        let pool = ue_selected_pool(10);
        let params = SchedulerParams::default();
        let window = selection_window(&pool, &params, &request(400, 100)).unwrap();
        assert!(window.iter().all(|c| pool.is_pssch_subframe(c.subframe)));
        // offsets 8..=39, 48..=79 and 88..=99 of slot 400 are PSSCH
        assert_eq!(window.len(), 76 * 2);
    }

    #[test]
    fn empty_window_is_an_error() {
        let pool = ue_selected_pool(10);
        let params = SchedulerParams::default();
        // slot 398 + 2..=7 lands in PSCCH-only offsets 0..=5 of the next period
        let err = selection_window(&pool, &params, &request(398, 8)).unwrap_err();
        assert!(matches!(err, SchedulerError::EmptyWindow { .. }));
    }

    #[test]
    fn oversized_allocation_is_rejected() {
        let pool = ue_selected_pool(10);
        let params = SchedulerParams::default();
        let mut req = request(400, 100);
        req.subchannels_needed = 3;
        assert_eq!(
            selection_window(&pool, &params, &req).unwrap_err(),
            SchedulerError::NotEnoughSubchannels { needed: 3, available: 2 }
        );
    }

    #[test]
    fn empty_sensing_keeps_the_full_window() {
        let pool = ue_selected_pool(10);
        let params = SchedulerParams::default();
        let set = build_candidate_set(&pool, &SensingHistory::new(), &params, &request(400, 100)).unwrap();
        assert_eq!(set.len(), set.total);
        assert!(!set.is_relaxed() && !set.fallback);
    }

    #[test]
    fn sensed_reservations_are_excluded() {
        let pool = ue_selected_pool(10);
        let params = SchedulerParams::default();
        let mut history = SensingHistory::new();
        // reserved again at 410 and 450, sub-channel 0
        sense(&mut history, 7, 310, 0, -90.0);
        sense(&mut history, 8, 350, 0, -90.0);
        let set = build_candidate_set(&pool, &history, &params, &request(400, 100)).unwrap();
        assert_eq!(set.len(), set.total - 2);
        for c in &set.resources {
            let blocked = (c.subframe == SubframeInfo::from_index(410) || c.subframe == SubframeInfo::from_index(450))
                && c.covers(0);
            assert!(!blocked, "{c} should be excluded");
        }
        assert!(!set.is_relaxed());
    }

    #[test]
    fn weak_reservations_stay_below_threshold() {
        let pool = ue_selected_pool(10);
        let params = SchedulerParams::default();
        let mut history = SensingHistory::new();
        sense(&mut history, 7, 310, 0, -135.0);
        let set = build_candidate_set(&pool, &history, &params, &request(400, 100)).unwrap();
        assert_eq!(set.len(), set.total);
    }

    #[test]
    fn crowded_window_relaxes_the_threshold() {
        let pool = ue_selected_pool(10);
        let params = SchedulerParams::default();
        let mut history = SensingHistory::new();
        // every PSSCH slot of the next window is reserved on both sub-channels;
        // half of them strongly, so relaxing must restore the weak half
        let mut node = 1;
        for offset in 2..=99u64 {
            let slot = 300 + offset;
            let rsrp = if offset % 2 == 0 { -80.0 } else { -120.0 };
            for sc in 0..2 {
                sense(&mut history, node, slot, sc, rsrp);
                node += 1;
            }
        }
        let set = build_candidate_set(&pool, &history, &params, &request(400, 100)).unwrap();
        assert!(set.is_relaxed());
        assert!(!set.fallback);
        assert!(set.threshold_dbm > -120.0);
        assert!(set.len() as f64 >= 0.2 * set.total as f64);
        for c in &set.resources {
            assert!((c.subframe - SubframeInfo::from_index(400)) % 2 == 1, "{c} should stay excluded");
        }
    }

    #[test]
    fn own_transmissions_block_their_projections() {
        let pool = ue_selected_pool(10);
        let params = SchedulerParams::default();
        let mut history = SensingHistory::new();
        history.record_own_transmission(SubframeInfo::from_index(320), 320_000);
        let set = build_candidate_set(&pool, &history, &params, &request(400, 100)).unwrap();
        assert_eq!(set.len(), set.total - 2);
        assert!(set.resources.iter().all(|c| c.subframe != SubframeInfo::from_index(420)));
    }

    #[test]
    fn random_selection_skips_exclusion() {
        let pool = ue_selected_pool(10);
        let params = SchedulerParams { random_selection: true, ..SchedulerParams::default() };
        let mut history = SensingHistory::new();
        sense(&mut history, 7, 310, 0, -60.0);
        let set = build_candidate_set(&pool, &history, &params, &request(400, 100)).unwrap();
        assert_eq!(set.len(), set.total);
    }

    #[test]
    fn excluded_resources_only_return_when_flagged() {
        use rand::{Rng, SeedableRng, rngs::StdRng};
        let pool = ue_selected_pool(10);
        let params = SchedulerParams::default();
        let req = request(400, 100);
        let mut rng = StdRng::seed_from_u64(11);
        let mut relaxed = 0;
        for _ in 0..50 {
            let mut history = SensingHistory::new();
            for node in 0..rng.gen_range(0..1000u32) {
                let slot = rng.gen_range(302..400u64);
                let sc = rng.gen_range(0..2u16);
                sense(&mut history, node, slot, sc, rng.gen_range(-130.0..-70.0));
            }
            let set = build_candidate_set(&pool, &history, &params, &req).unwrap();
            if set.fallback {
                continue;
            }
            if set.is_relaxed() {
                relaxed += 1;
                assert!(set.threshold_dbm > params.rsrp_threshold_dbm);
            }
            // summed projected power against the threshold the set was built with
            let occupancy = history.project(&projection(&params, &req));
            for c in &set.resources {
                for sc in c.subchannels() {
                    let power = occupancy.power_dbm(c.subframe, sc);
                    assert!(!occupancy.is_marked(c.subframe, sc, set.threshold_dbm), "{c} kept at {power:?} dBm");
                }
                assert!(!is_sensing_blocked(c, &occupancy, set.threshold_dbm, &params, &req));
            }
        }
        assert!(relaxed > 0);
    }
}
