//! Per-flow semi-persistent scheduler.
//!
//! A flow starts `Idle`, starts `Sensing` on the first decoded SCI or packet
//! and becomes `Reserved` once a selection succeeds. Every reserved occasion
//! decrements the reselection counter whether a packet used it or not. When
//! the counter reaches zero the reservation is kept with `keep_probability`
//! or released, in which case the next packet reselects with a counter
//! trigger.

use log::{debug, info};
use rand::Rng;

use super::candidate::{SelectionRequest, build_candidate_set};
use super::selection::{keep_reservation, reselection_counter, select_resource, select_retransmission};
use super::sensing::SensingHistory;
use super::types::{
    ALLOWED_RRIS_MS, AperiodicStrategy, CandidateResource, FlowState, PacketDecision, PacketRequest, ReselectionTrigger,
    ReservationState, SchedulerError, SchedulerParams, SchedulerStats, SensingReport, TrafficType, Transmission,
};
use crate::NodeId;
use crate::pool::ResourcePool;
use crate::subframe::SubframeInfo;

/// Packet waiting for its transmission slots.
#[derive(Debug, Clone, Copy)]
struct PendingPacket {
    packet: PacketRequest,
    initial: CandidateResource,
    retransmission: Option<CandidateResource>,
    initial_sent: bool,
}

/// What the scheduler does with a packet given the current reservation.
enum Plan {
    Reuse,
    Reselect(Option<ReselectionTrigger>),
    Drop,
}

#[derive(Debug)]
pub struct AutonomousScheduler {
    node_id: NodeId,
    params: SchedulerParams,
    history: SensingHistory,
    state: FlowState,
    reservation: Option<ReservationState>,
    pending: Option<PendingPacket>,
    /// Packet displaced by a newer one after its initial transmission,
    /// still owed its blind retransmission.
    owed: Option<PendingPacket>,
    counter_expired: bool,
    stats: SchedulerStats,
}

impl AutonomousScheduler {
    pub fn new(node_id: NodeId, params: SchedulerParams) -> Self {
        Self {
            node_id,
            params,
            history: SensingHistory::new(),
            state: FlowState::Idle,
            reservation: None,
            pending: None,
            owed: None,
            counter_expired: false,
            stats: SchedulerStats::default(),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn reservation(&self) -> Option<&ReservationState> {
        self.reservation.as_ref()
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    pub fn history(&self) -> &SensingHistory {
        &self.history
    }

    pub fn params(&self) -> &SchedulerParams {
        &self.params
    }

    /// Slot of the next transmission still owed to a queued packet.
    pub fn pending_slot(&self) -> Option<SubframeInfo> {
        self.pending
            .map(|p| {
                if p.initial_sent {
                    p.retransmission.map_or(p.initial.subframe, |r| r.subframe)
                } else {
                    p.initial.subframe
                }
            })
            .or_else(|| self.owed.and_then(|p| p.retransmission.map(|r| r.subframe)))
    }

    /// Store a decoded SCI of another node.
    pub fn sense(&mut self, report: &SensingReport) {
        if self.state == FlowState::Idle {
            self.state = FlowState::Sensing;
        }
        self.history.record(report, self.params.subchannel_size);
    }

    /// Hand a new packet to the MAC.
    ///
    /// # Parameters
    ///
    /// * `now` - Slot the packet arrives in
    /// * `now_us` - Arrival time in microseconds
    /// * `packet` - Size, delay budget and traffic class of the packet
    /// * `pool` - Resource pool to select from
    /// * `rng` - Random source of this node
    ///
    /// # Returns
    ///
    /// The slot of the first transmission and the reselection it caused, or
    /// `Dropped` when the reservation cannot serve the packet in time.
    pub fn enqueue<R: Rng + ?Sized>(
        &mut self,
        now: SubframeInfo,
        now_us: u64,
        packet: PacketRequest,
        pool: &ResourcePool,
        rng: &mut R,
    ) -> Result<PacketDecision, SchedulerError> {
        if self.state == FlowState::Idle {
            self.state = FlowState::Sensing;
        }
        self.history.prune(now_us, u64::from(self.params.sensing_window_ms) * 1000);

        // a dropped newcomer leaves the queued packet in place
        let plan = self.plan(now, &packet);
        match plan {
            Plan::Drop => {
                debug!("node {}: packet {} misses its {} ms budget, dropped", self.node_id, packet.packet_id, packet.pdb_ms);
                self.stats.dropped_packets += 1;
                Ok(PacketDecision::Dropped)
            }
            Plan::Reuse => {
                let Some(reservation) = self.reservation.as_mut() else {
                    return self.reselect(now, now_us, packet, None, pool, rng);
                };
                reservation.packet_size = packet.size;
                let first = reservation.resource;
                let retransmission = reservation.retransmission;
                self.queue(PendingPacket { packet, initial: first, retransmission, initial_sent: false });
                Ok(PacketDecision::Scheduled { first: first.subframe, reselection: None })
            }
            Plan::Reselect(trigger) => self.reselect(now, now_us, packet, trigger, pool, rng),
        }
    }

    /// Make `next` the queued packet. A packet still waiting for its initial
    /// transmission is dropped; one waiting only for its retransmission is
    /// kept until that slot.
    fn queue(&mut self, next: PendingPacket) {
        let Some(old) = self.pending.replace(next) else {
            return;
        };
        if !old.initial_sent {
            debug!("node {}: packet {} replaced before transmission", self.node_id, old.packet.packet_id);
            self.stats.dropped_packets += 1;
        } else if old.retransmission.is_some() {
            self.owed = Some(old);
        }
    }

    fn plan(&mut self, now: SubframeInfo, packet: &PacketRequest) -> Plan {
        let Some(reservation) = &self.reservation else {
            let trigger = std::mem::take(&mut self.counter_expired).then_some(ReselectionTrigger::Counter);
            return Plan::Reselect(trigger);
        };
        let delay = reservation.resource.subframe - now;
        let latency_miss = delay < self.params.t1 || delay >= self.params.slots_in_ms(packet.pdb_ms);
        let size_miss = packet.size > reservation.reservation_size;
        let trigger = ReselectionTrigger::classify(latency_miss, size_miss);
        match (packet.traffic_type, self.params.aperiodic_strategy) {
            (TrafficType::Periodic, _) | (TrafficType::Aperiodic, AperiodicStrategy::StandardSsps) => {
                trigger.map_or(Plan::Reuse, |t| Plan::Reselect(Some(t)))
            }
            (TrafficType::Aperiodic, AperiodicStrategy::Aggressive) => {
                Plan::Reselect(Some(trigger.unwrap_or(ReselectionTrigger::Latency)))
            }
            (TrafficType::Aperiodic, AperiodicStrategy::Submissive) => {
                if latency_miss {
                    Plan::Drop
                } else if size_miss {
                    Plan::Reselect(Some(ReselectionTrigger::Size))
                } else {
                    Plan::Reuse
                }
            }
        }
    }

    fn reselect<R: Rng + ?Sized>(
        &mut self,
        now: SubframeInfo,
        now_us: u64,
        packet: PacketRequest,
        trigger: Option<ReselectionTrigger>,
        pool: &ResourcePool,
        rng: &mut R,
    ) -> Result<PacketDecision, SchedulerError> {
        self.state = FlowState::Selecting;
        let decision = self.select_reservation(now, now_us, packet, trigger, pool, rng);
        self.state = if self.reservation.is_some() { FlowState::Reserved } else { FlowState::Sensing };
        decision
    }

    fn select_reservation<R: Rng + ?Sized>(
        &mut self,
        now: SubframeInfo,
        now_us: u64,
        packet: PacketRequest,
        trigger: Option<ReselectionTrigger>,
        pool: &ResourcePool,
        rng: &mut R,
    ) -> Result<PacketDecision, SchedulerError> {
        if !ALLOWED_RRIS_MS.contains(&packet.rri_ms) {
            return Err(SchedulerError::InvalidRri(packet.rri_ms));
        }
        let reserved_bytes = packet.size.max(self.params.reservation_size.unwrap_or(0));
        let bandwidth_rbs = u16::try_from(pool.pssch_rb_count()).unwrap_or(u16::MAX);
        let allocation =
            self.params
                .amc
                .compute_allocation(reserved_bytes, self.params.mcs, self.params.subchannel_size, bandwidth_rbs)?;
        let counter = if self.params.dynamic_scheduling || packet.rri_ms == 0 {
            1
        } else {
            reselection_counter(packet.rri_ms, rng)
        };
        let request = SelectionRequest {
            now,
            now_us,
            pdb_ms: packet.pdb_ms,
            subchannels_needed: allocation.subchannels,
            rri_ms: packet.rri_ms,
            reselection_counter: counter,
        };
        let set = build_candidate_set(pool, &self.history, &self.params, &request)?;
        let slots_per_ms = self.params.slots_in_ms(1);
        let chosen = select_resource(&set, self.params.metric, &self.history, slots_per_ms, rng)?;
        let retransmission = if self.params.blind_retransmission {
            select_retransmission(&set, &chosen, rng)
        } else {
            None
        };
        // the earlier of the pair goes first
        let (initial, retransmission) = match retransmission {
            Some(other) if other.subframe - now < chosen.subframe - now => (other, Some(chosen)),
            other => (chosen, other),
        };

        self.stats.selections += 1;
        if set.is_relaxed() {
            self.stats.relaxed_selections += 1;
        }
        if set.fallback {
            self.stats.fallback_selections += 1;
        }
        if set.half_duplex_skipped {
            self.stats.half_duplex_skips += 1;
        }
        if let Some(t) = trigger {
            self.stats.record_trigger(t);
            match t {
                ReselectionTrigger::Counter => debug!("node {}: {} reselection at {}", self.node_id, t, now),
                _ => info!("node {}: {} reselection at {} for packet {}", self.node_id, t, now, packet.packet_id),
            }
        }
        debug!(
            "node {}: reserved {} every {} ms for {} occasions ({} of {} candidates)",
            self.node_id,
            initial,
            packet.rri_ms,
            counter,
            set.len(),
            set.total
        );

        self.reservation = Some(ReservationState {
            resource: initial,
            retransmission,
            reselection_counter: counter,
            rri_ms: packet.rri_ms,
            packet_size: packet.size,
            reservation_size: allocation.tbs_bytes(),
            traffic_type: packet.traffic_type,
            allocation,
        });
        self.queue(PendingPacket { packet, initial, retransmission, initial_sent: false });
        Ok(PacketDecision::Scheduled { first: initial.subframe, reselection: trigger })
    }

    fn transmission(&self, pending: &PendingPacket, resource: CandidateResource, is_retransmission: bool) -> Transmission {
        let (rri_ms, reselection_counter) = match &self.reservation {
            Some(r) if !self.params.dynamic_scheduling => (r.rri_ms, r.reselection_counter),
            _ => (0, 0),
        };
        let subchannel_size = self.params.subchannel_size;
        Transmission {
            packet_id: pending.packet.packet_id,
            subframe: resource.subframe,
            resource,
            rb_start: resource.rb_start(subchannel_size),
            rb_len: resource.rb_len(subchannel_size),
            size: pending.packet.size,
            mcs: self.params.mcs,
            is_retransmission,
            rri_ms,
            reselection_counter,
            generated_us: pending.packet.generated_us,
        }
    }

    /// Advance the flow to slot `now`.
    ///
    /// Returns the transmission due in this slot, if any, and performs the
    /// reservation bookkeeping when `now` is a reserved occasion.
    pub fn on_slot<R: Rng + ?Sized>(&mut self, now: SubframeInfo, now_us: u64, rng: &mut R) -> Option<Transmission> {
        let mut tx = None;
        if let Some(mut pending) = self.pending.take() {
            if !pending.initial_sent && pending.initial.subframe == now {
                tx = Some(self.transmission(&pending, pending.initial, false));
                pending.initial_sent = true;
            } else if pending.initial_sent && pending.retransmission.is_some_and(|r| r.subframe == now) {
                tx = pending.retransmission.map(|r| self.transmission(&pending, r, true));
                pending.retransmission = None;
            }
            if !(pending.initial_sent && pending.retransmission.is_none()) {
                self.pending = Some(pending);
            }
        }
        if let Some(owed) = self.owed.take() {
            match owed.retransmission {
                Some(r) if r.subframe == now && tx.is_none() => {
                    tx = Some(self.transmission(&owed, r, true));
                }
                Some(r) if r.subframe == now => {
                    debug!("node {}: retransmission of packet {} overlaps a new packet", self.node_id, owed.packet.packet_id);
                }
                Some(_) => self.owed = Some(owed),
                None => {}
            }
        }

        let used = tx.is_some_and(|t| !t.is_retransmission);
        if self.reservation.as_ref().is_some_and(|r| r.resource.subframe == now) {
            self.close_occasion(used, rng);
        }

        if let Some(t) = &tx {
            self.history.record_own_transmission(now, now_us);
            self.stats.transmissions += 1;
            debug!(
                "node {}: {} packet {} on {}",
                self.node_id,
                if t.is_retransmission { "retransmitting" } else { "transmitting" },
                t.packet_id,
                t.resource
            );
        }
        tx
    }

    fn close_occasion<R: Rng + ?Sized>(&mut self, used: bool, rng: &mut R) {
        let dynamic = self.params.dynamic_scheduling;
        let keep_probability = self.params.keep_probability;
        let Some(reservation) = self.reservation.as_mut() else {
            return;
        };
        if used {
            self.stats.used_reservations += 1;
        } else {
            self.stats.unutilized_reservations += 1;
        }
        reservation.reselection_counter = reservation.reselection_counter.saturating_sub(1);
        let rri_slots = self.params.numerology.slots_in_ms(reservation.rri_ms);
        if rri_slots > 0 {
            reservation.resource = reservation.resource.shifted(rri_slots);
            reservation.retransmission = reservation.retransmission.map(|r| r.shifted(rri_slots));
        }
        if reservation.reselection_counter > 0 {
            return;
        }
        if !dynamic && rri_slots > 0 && keep_reservation(keep_probability, rng) {
            reservation.reselection_counter = reselection_counter(reservation.rri_ms, rng);
            self.stats.kept_reservations += 1;
            debug!("node {}: keeping reservation for {} more occasions", self.node_id, reservation.reselection_counter);
            return;
        }
        debug!("node {}: reservation expired", self.node_id);
        self.reservation = None;
        self.counter_expired = true;
        self.state = FlowState::Sensing;
    }

    /// Drop every reservation and queued packet when the node leaves.
    pub fn teardown(&mut self) {
        if self.pending.take().is_some_and(|p| !p.initial_sent) {
            self.stats.dropped_packets += 1;
        }
        self.owed = None;
        self.reservation = None;
        self.counter_expired = false;
        self.history.clear();
        self.state = FlowState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::tests::ue_selected_pool;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn params() -> SchedulerParams {
        SchedulerParams { mcs: 20, ..SchedulerParams::default() }
    }

    fn packet(id: u64, size: u32, traffic_type: TrafficType, pdb_ms: u32) -> PacketRequest {
        PacketRequest { packet_id: id, size, traffic_type, pdb_ms, rri_ms: 100, generated_us: 0 }
    }

    fn slot(index: u32) -> SubframeInfo {
        SubframeInfo::from_index(u64::from(index))
    }

    fn run(s: &mut AutonomousScheduler, from: u32, to: u32, rng: &mut StdRng) -> Vec<Transmission> {
        (from..to).filter_map(|i| s.on_slot(slot(i), u64::from(i) * 1000, rng)).collect()
    }

    /// Scheduler holding a fresh reservation made at slot 400, advanced past
    /// its first occasion. Returns the slot after that occasion.
    fn reserved(p: SchedulerParams, rng: &mut StdRng) -> (AutonomousScheduler, u32) {
        let pool = ue_selected_pool(10);
        let mut s = AutonomousScheduler::new(1, p);
        s.enqueue(slot(400), 400_000, packet(1, 300, TrafficType::Periodic, 100), &pool, rng).unwrap();
        let first = s.reservation().unwrap().resource.subframe.index();
        let sent = run(&mut s, 400, first + 1, rng);
        assert_eq!(sent.len(), 1);
        (s, first + 1)
    }

    #[test]
    fn first_packet_creates_a_reservation() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = AutonomousScheduler::new(1, params());
        assert_eq!(s.state(), FlowState::Idle);
        let decision = s.enqueue(slot(400), 400_000, packet(1, 300, TrafficType::Periodic, 100), &pool, &mut rng).unwrap();
        let PacketDecision::Scheduled { first, reselection } = decision else {
            panic!("packet dropped");
        };
        assert_eq!(reselection, None);
        assert!((2..=99).contains(&(first - slot(400))));
        assert!(pool.is_pssch_subframe(first));
        assert_eq!(s.state(), FlowState::Reserved);
        let r = s.reservation().unwrap();
        assert!((5..=15).contains(&r.reselection_counter));
        assert_eq!(r.resource.subchannel_count, 1);
        assert_eq!(s.stats().selections, 1);
    }

    #[test]
    fn periodic_flow_reselects_when_the_counter_expires() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(2);
        let mut s = AutonomousScheduler::new(1, params());
        let mut sent = Vec::new();
        for k in 0..40 {
            let now = 400 + 100 * k;
            let decision = s.enqueue(slot(now), u64::from(now) * 1000, packet(u64::from(k), 300, TrafficType::Periodic, 100), &pool, &mut rng);
            assert!(matches!(decision, Ok(PacketDecision::Scheduled { .. })));
            sent.extend(run(&mut s, now, now + 100, &mut rng));
        }
        assert_eq!(sent.len(), 40);
        let stats = s.stats();
        assert!(stats.counter_reselections >= 2);
        assert_eq!(stats.selections, 1 + stats.counter_reselections);
        assert_eq!(stats.unutilized_reservations, 0);
        assert_eq!(stats.dropped_packets, 0);
    }

    #[test]
    fn unused_occasions_still_count_down() {
        let mut rng = StdRng::seed_from_u64(3);
        let (mut s, next) = reserved(params(), &mut rng);
        let counter = s.reservation().unwrap().reselection_counter;
        assert!(run(&mut s, next, next + 200, &mut rng).is_empty());
        assert_eq!(s.stats().used_reservations, 1);
        assert_eq!(s.stats().unutilized_reservations, 2);
        assert_eq!(s.reservation().unwrap().reselection_counter, counter - 2);
    }

    #[test]
    fn dynamic_scheduling_uses_each_reservation_once() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(4);
        let mut s = AutonomousScheduler::new(1, SchedulerParams { dynamic_scheduling: true, ..params() });
        s.enqueue(slot(400), 400_000, packet(1, 300, TrafficType::Periodic, 100), &pool, &mut rng).unwrap();
        assert_eq!(s.reservation().unwrap().reselection_counter, 1);
        let sent = run(&mut s, 400, 500, &mut rng);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].rri_ms, 0);
        assert!(s.reservation().is_none());
        assert_eq!(s.state(), FlowState::Sensing);
    }

    #[test]
    fn keep_probability_one_never_reselects() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(5);
        let mut s = AutonomousScheduler::new(1, SchedulerParams { keep_probability: 1.0, ..params() });
        for k in 0..40 {
            let now = 400 + 100 * k;
            s.enqueue(slot(now), u64::from(now) * 1000, packet(u64::from(k), 300, TrafficType::Periodic, 100), &pool, &mut rng)
                .unwrap();
            run(&mut s, now, now + 100, &mut rng);
        }
        assert_eq!(s.stats().selections, 1);
        assert_eq!(s.stats().counter_reselections, 0);
        assert!(s.stats().kept_reservations >= 2);
    }

    #[test]
    fn submissive_drops_late_aperiodic_packets() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(6);
        let (mut s, next) = reserved(params(), &mut rng);
        let decision = s.enqueue(slot(next), u64::from(next) * 1000, packet(2, 300, TrafficType::Aperiodic, 20), &pool, &mut rng);
        assert_eq!(decision, Ok(PacketDecision::Dropped));
        assert_eq!(s.stats().dropped_packets, 1);
        assert_eq!(s.stats().selections, 1);
    }

    #[test]
    fn submissive_drop_keeps_the_queued_packet() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(13);
        let (mut s, next) = reserved(params(), &mut rng);
        let occasion = s.reservation().unwrap().resource.subframe;
        let decision = s
            .enqueue(slot(next), u64::from(next) * 1000, packet(2, 300, TrafficType::Aperiodic, 100), &pool, &mut rng)
            .unwrap();
        assert_eq!(decision, PacketDecision::Scheduled { first: occasion, reselection: None });
        let decision = s.enqueue(slot(next), u64::from(next) * 1000, packet(3, 300, TrafficType::Aperiodic, 20), &pool, &mut rng);
        assert_eq!(decision, Ok(PacketDecision::Dropped));
        assert_eq!(s.pending_slot(), Some(occasion));

        let sent = run(&mut s, next, next + 200, &mut rng);
        assert_eq!(sent.len(), 1);
        assert_eq!((sent[0].packet_id, sent[0].subframe), (2, occasion));
        assert_eq!(s.stats().dropped_packets, 1);
    }

    #[test]
    fn displaced_packet_keeps_its_retransmission() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(14);
        let mut s = AutonomousScheduler::new(1, SchedulerParams { blind_retransmission: true, ..params() });
        s.enqueue(slot(400), 400_000, packet(1, 300, TrafficType::Periodic, 100), &pool, &mut rng).unwrap();
        let initial = s.reservation().unwrap().resource.subframe.index();
        let retx = s.reservation().unwrap().retransmission.unwrap().subframe;
        let sent = run(&mut s, 400, initial + 1, &mut rng);
        assert_eq!(sent.len(), 1);

        let decision = s
            .enqueue(slot(initial + 1), u64::from(initial + 1) * 1000, packet(2, 300, TrafficType::Periodic, 100), &pool, &mut rng)
            .unwrap();
        assert!(matches!(decision, PacketDecision::Scheduled { reselection: None, .. }));
        assert_eq!(s.stats().dropped_packets, 0);

        let sent = run(&mut s, initial + 1, initial + 100, &mut rng);
        assert_eq!(sent.len(), 1);
        assert!(sent[0].is_retransmission);
        assert_eq!((sent[0].packet_id, sent[0].subframe), (1, retx));
        // the new packet still owns the next occasion
        assert_eq!(s.pending_slot(), Some(slot(initial + 100)));
    }

    #[test]
    fn submissive_reselects_for_size() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(7);
        let (mut s, next) = reserved(params(), &mut rng);
        let decision = s
            .enqueue(slot(next), u64::from(next) * 1000, packet(2, 400, TrafficType::Aperiodic, 100), &pool, &mut rng)
            .unwrap();
        assert!(matches!(decision, PacketDecision::Scheduled { reselection: Some(ReselectionTrigger::Size), .. }));
        assert_eq!(s.reservation().unwrap().resource.subchannel_count, 2);
        assert_eq!(s.stats().size_reselections, 1);
    }

    #[test]
    fn standard_ssps_reuses_or_reselects_for_latency() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(8);
        let p = SchedulerParams { aperiodic_strategy: AperiodicStrategy::StandardSsps, ..params() };
        let (mut s, next) = reserved(p, &mut rng);
        let occasion = s.reservation().unwrap().resource.subframe;
        let decision = s
            .enqueue(slot(next), u64::from(next) * 1000, packet(2, 300, TrafficType::Aperiodic, 100), &pool, &mut rng)
            .unwrap();
        assert_eq!(decision, PacketDecision::Scheduled { first: occasion, reselection: None });

        let (mut s, next) = reserved(SchedulerParams { aperiodic_strategy: AperiodicStrategy::StandardSsps, ..params() }, &mut rng);
        let decision = s
            .enqueue(slot(next), u64::from(next) * 1000, packet(2, 300, TrafficType::Aperiodic, 20), &pool, &mut rng)
            .unwrap();
        let PacketDecision::Scheduled { first, reselection } = decision else {
            panic!("packet dropped");
        };
        assert_eq!(reselection, Some(ReselectionTrigger::Latency));
        assert!(first - slot(next) < 20);
    }

    #[test]
    fn aggressive_always_reselects() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(9);
        let p = SchedulerParams { aperiodic_strategy: AperiodicStrategy::Aggressive, ..params() };
        let (mut s, next) = reserved(p, &mut rng);
        let decision = s
            .enqueue(slot(next), u64::from(next) * 1000, packet(2, 300, TrafficType::Aperiodic, 100), &pool, &mut rng)
            .unwrap();
        assert!(matches!(decision, PacketDecision::Scheduled { reselection: Some(ReselectionTrigger::Latency), .. }));
        assert_eq!(s.stats().selections, 2);
    }

    #[test]
    fn blind_retransmission_uses_another_slot() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(10);
        let mut s = AutonomousScheduler::new(1, SchedulerParams { blind_retransmission: true, ..params() });
        s.enqueue(slot(400), 400_000, packet(1, 300, TrafficType::Periodic, 100), &pool, &mut rng).unwrap();
        let sent = run(&mut s, 400, 500, &mut rng);
        assert_eq!(sent.len(), 2);
        assert!(!sent[0].is_retransmission && sent[1].is_retransmission);
        assert_eq!(sent[0].packet_id, sent[1].packet_id);
        assert_ne!(sent[0].subframe, sent[1].subframe);
        assert!(s.pending_slot().is_none());
    }

    #[test]
    fn invalid_interval_is_rejected() {
        let pool = ue_selected_pool(10);
        let mut rng = StdRng::seed_from_u64(11);
        let mut s = AutonomousScheduler::new(1, params());
        let bad = PacketRequest { rri_ms: 130, ..packet(1, 300, TrafficType::Periodic, 100) };
        assert_eq!(s.enqueue(slot(400), 400_000, bad, &pool, &mut rng), Err(SchedulerError::InvalidRri(130)));
    }

    #[test]
    fn teardown_returns_to_idle() {
        let mut rng = StdRng::seed_from_u64(12);
        let (mut s, _) = reserved(params(), &mut rng);
        s.sense(&SensingReport {
            node_id: 2,
            sensed_at: slot(500),
            received_us: 500_000,
            rb_start: 0,
            rb_len: 10,
            rsrp_dbm: -90.0,
            rri_ms: 100,
            reselection_counter: 5,
            is_retransmission: false,
        });
        s.teardown();
        assert_eq!(s.state(), FlowState::Idle);
        assert!(s.reservation().is_none());
        assert!(s.history().reservations().is_empty());
    }
}
