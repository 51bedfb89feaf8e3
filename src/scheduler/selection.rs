//! Final draw from the candidate set and reselection counter handling.

use rand::Rng;
use rand::seq::SliceRandom;

use super::candidate::CandidateSet;
use super::sensing::SensingHistory;
use super::types::{CandidateResource, SchedulerError, SelectionMetric};
use crate::subframe::SubframeInfo;

/// Share of the ranked candidates kept by [`SelectionMetric::LowestInterference`].
const BEST_SHARE: f64 = 0.2;
/// Blind retransmissions are preferred within this many slots of the
/// initial transmission.
const RETX_MAX_GAP_SLOTS: u32 = 32;

/// Draw a reselection counter for a reservation interval.
///
/// Intervals of 100 ms and above draw uniformly from `[5, 15]`. Shorter
/// intervals scale the range by `100 / max(20, rri)` so the reservation
/// lasts about as long in time.
pub fn reselection_counter<R: Rng + ?Sized>(rri_ms: u32, rng: &mut R) -> u32 {
    if rri_ms >= 100 || rri_ms == 0 {
        return rng.gen_range(5..=15);
    }
    let scale = 100 / rri_ms.max(20);
    rng.gen_range(5 * scale..=15 * scale)
}

/// Whether an expired reservation is kept for another round.
pub fn keep_reservation<R: Rng + ?Sized>(keep_probability: f64, rng: &mut R) -> bool {
    keep_probability > 0.0 && rng.r#gen::<f64>() < keep_probability
}

/// Pick one candidate from the set.
///
/// # Parameters
///
/// * `set` - Candidate set after exclusion
/// * `metric` - Ranking applied before the draw
/// * `history` - Sensing history, used by the interference ranking
/// * `slots_per_ms` - Slot rate of the numerology
/// * `rng` - Random source of the selecting node
///
/// # Returns
///
/// The chosen resource. Every survivor is equally likely under
/// [`SelectionMetric::Random`]; under
/// [`SelectionMetric::LowestInterference`] the draw is uniform over the
/// least interfered fifth, ties at the cut included.
pub fn select_resource<R: Rng + ?Sized>(
    set: &CandidateSet,
    metric: SelectionMetric,
    history: &SensingHistory,
    slots_per_ms: u32,
    rng: &mut R,
) -> Result<CandidateResource, SchedulerError> {
    let empty = || SchedulerError::NoCandidate;
    match metric {
        SelectionMetric::Random => set.resources.choose(rng).copied().ok_or_else(empty),
        SelectionMetric::LowestInterference => {
            let mut ranked: Vec<(f64, CandidateResource)> = set
                .resources
                .iter()
                .map(|c| (history.average_interference_mw(c, slots_per_ms), *c))
                .collect();
            ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
            let keep = ((ranked.len() as f64 * BEST_SHARE).ceil() as usize).max(1);
            let Some(&(cut, _)) = ranked.get(keep - 1) else {
                return Err(empty());
            };
            let best: Vec<CandidateResource> = ranked.iter().take_while(|(p, _)| *p <= cut).map(|(_, c)| *c).collect();
            best.choose(rng).copied().ok_or_else(empty)
        }
    }
}

/// Pick a blind retransmission resource in a different slot than `initial`.
///
/// Candidates within 32 slots of the initial transmission are preferred;
/// any other slot of the set is used when none is that close.
pub fn select_retransmission<R: Rng + ?Sized>(
    set: &CandidateSet,
    initial: &CandidateResource,
    rng: &mut R,
) -> Option<CandidateResource> {
    let gap = |c: &CandidateResource| SubframeInfo::slots_difference(c.subframe, initial.subframe, 512);
    let near: Vec<&CandidateResource> = set
        .resources
        .iter()
        .filter(|c| c.subframe != initial.subframe && gap(c) <= RETX_MAX_GAP_SLOTS)
        .collect();
    if let Some(c) = near.choose(rng) {
        return Some(**c);
    }
    let other: Vec<&CandidateResource> = set.resources.iter().filter(|c| c.subframe != initial.subframe).collect();
    other.choose(rng).map(|c| **c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::tests::ue_selected_pool;
    use crate::scheduler::candidate::{SelectionRequest, build_candidate_set};
    use crate::scheduler::types::{SchedulerParams, SensingReport};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn set_of(slots: &[u64]) -> CandidateSet {
        CandidateSet {
            resources: slots
                .iter()
                .map(|&s| CandidateResource { subframe: SubframeInfo::from_index(s), subchannel_start: 0, subchannel_count: 1 })
                .collect(),
            total: slots.len(),
            threshold_dbm: -128.0,
            relaxations: 0,
            fallback: false,
            half_duplex_skipped: false,
        }
    }

    #[test]
    fn counter_covers_five_to_fifteen() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [0u32; 16];
        for _ in 0..10_000 {
            let c = reselection_counter(100, &mut rng);
            assert!((5..=15).contains(&c));
            seen[c as usize] += 1;
        }
        assert!(seen[5..=15].iter().all(|&n| n > 0));
    }

    #[test]
    fn short_intervals_scale_the_counter() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            assert!((10..=30).contains(&reselection_counter(50, &mut rng)));
            assert!((25..=75).contains(&reselection_counter(20, &mut rng)));
        }
    }

    #[test]
    fn keep_probability_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!((0..100).all(|_| !keep_reservation(0.0, &mut rng)));
        let kept = (0..10_000).filter(|_| keep_reservation(0.8, &mut rng)).count();
        assert!((7_500..8_500).contains(&kept));
    }

    #[test]
    fn empty_sensing_selection_is_uniform() {
        // PSSCH slots 32..=39 of a period-40 pool, two sub-channels
        let pool = ue_selected_pool(10);
        let params = SchedulerParams::default();
        let request = SelectionRequest {
            now: SubframeInfo::from_index(430),
            now_us: 430_000,
            pdb_ms: 10,
            subchannels_needed: 1,
            rri_ms: 100,
            reselection_counter: 10,
        };
        let set = build_candidate_set(&pool, &SensingHistory::new(), &params, &request).unwrap();
        assert_eq!(set.total, 16);
        assert_eq!(set.len(), 16);

        let mut rng = StdRng::seed_from_u64(4);
        let history = SensingHistory::new();
        let trials = 100_000;
        let mut hits: HashMap<CandidateResource, u32> = HashMap::new();
        for _ in 0..trials {
            let c = select_resource(&set, SelectionMetric::Random, &history, 1, &mut rng).unwrap();
            *hits.entry(c).or_default() += 1;
        }
        assert_eq!(hits.len(), 16);
        let expected = trials as f64 / 16.0;
        for (c, n) in hits {
            assert!((n as f64 - expected).abs() <= 0.1 * expected, "{c} drawn {n} times");
        }
    }

    #[test]
    fn lowest_interference_avoids_busy_slots() {
        let mut history = SensingHistory::new();
        // 100 ms before slots 500..=507 are busy, 508 and 509 are quiet
        for s in 400..408u64 {
            history.record(
                &SensingReport {
                    node_id: 1,
                    sensed_at: SubframeInfo::from_index(s),
                    received_us: s * 1000,
                    rb_start: 0,
                    rb_len: 10,
                    rsrp_dbm: -90.0,
                    rri_ms: 100,
                    reselection_counter: 5,
                    is_retransmission: false,
                },
                10,
            );
        }
        let set = set_of(&(500..510).collect::<Vec<_>>());
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let c = select_resource(&set, SelectionMetric::LowestInterference, &history, 1, &mut rng).unwrap();
            assert!(c.subframe.index() >= 508);
        }
    }

    #[test]
    fn empty_set_is_an_error() {
        let mut rng = StdRng::seed_from_u64(6);
        let set = set_of(&[]);
        assert!(select_resource(&set, SelectionMetric::Random, &SensingHistory::new(), 1, &mut rng).is_err());
    }

    #[test]
    fn retransmission_prefers_close_slots() {
        let mut rng = StdRng::seed_from_u64(7);
        let set = set_of(&[100, 110, 200]);
        let initial = set.resources[0];
        for _ in 0..100 {
            let retx = select_retransmission(&set, &initial, &mut rng).unwrap();
            assert_eq!(retx.subframe, SubframeInfo::from_index(110));
        }
        let far = set_of(&[100, 200]);
        assert_eq!(select_retransmission(&far, &far.resources[0], &mut rng).unwrap().subframe, SubframeInfo::from_index(200));
        let single = set_of(&[100]);
        assert!(select_retransmission(&single, &single.resources[0], &mut rng).is_none());
    }
}
