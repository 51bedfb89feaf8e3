//! Event handlers driving the simulation timeline.
//!
//! High-level flow of every slot:
//! 1) `Reception`: evaluate the transmissions of the previous slot at every
//!    other node (half-duplex check, SCI decoding and sensing, PSSCH SINR
//!    with overlap-weighted interference, HARQ combining, statistics).
//! 2) `Mobility` and `Traffic` events due at this time move nodes and
//!    generate packets.
//! 3) `Mac`: hand queued packets to each node's scheduler, collect the
//!    transmissions of this slot and schedule the next slot.

use log::{debug, info, warn};
use std::ops::Range;

use super::context::{Event, HarqEntry, OnAir, SimulationContext, SimulationError};
use super::event_queue::{Phase, SimTime};
use super::stats::ReceptionOutcome;
use crate::NodeId;
use crate::error_model::{HarqProcessInfo, bler};
use crate::geometry::PolygonKind;
use crate::propagation::{dbm_to_mw, mw_to_dbm, thermal_noise_dbm};
use crate::scheduler::{PacketDecision, PacketRequest, SensingReport};
use crate::subframe::SubframeInfo;

/// Packets waiting for the MAC per node before the oldest is dropped.
const ARRIVAL_QUEUE_CAPACITY: usize = 16;
/// Subcarriers per resource block.
const SUBCARRIERS_PER_RB: u16 = 12;
/// HARQ state of a packet is kept this long after its first attempt.
const HARQ_LIFETIME_US: SimTime = 1_000_000;

fn rb_range(start: u16, len: u16) -> Range<u16> {
    start..start.saturating_add(len)
}

fn overlap(a: &Range<u16>, b: &Range<u16>) -> u16 {
    a.end.min(b.end).saturating_sub(a.start.max(b.start))
}

/// Power of every other transmission falling into `band`, each spread evenly
/// over its own RBs.
fn interference_mw(on_air: &[OnAir], powers: &[Option<f64>], skip: usize, band: &Range<u16>) -> f64 {
    on_air
        .iter()
        .zip(powers)
        .enumerate()
        .filter(|(j, _)| *j != skip)
        .filter_map(|(_, (other, power))| {
            let power = (*power)?;
            let other_band = rb_range(other.tx.rb_start, other.tx.rb_len);
            let shared = overlap(band, &other_band);
            (shared > 0 && other.tx.rb_len > 0).then(|| power * f64::from(shared) / f64::from(other.tx.rb_len))
        })
        .sum()
}

fn current_slot(ctx: &SimulationContext) -> Result<SubframeInfo, SimulationError> {
    Ok(SubframeInfo::from_time(ctx.now_us(), ctx.numerology.slot_duration_ms())?)
}

/// Evaluate every transmission of the previous slot at every other node.
fn handle_reception(ctx: &mut SimulationContext) -> Result<(), SimulationError> {
    let on_air = std::mem::take(&mut ctx.on_air);
    if on_air.is_empty() {
        return Ok(());
    }
    let now_us = ctx.now_us();
    let subchannel_size = ctx.config.scheduler.subchannel_size;
    let rb_hz = f64::from(SUBCARRIERS_PER_RB) * f64::from(ctx.numerology.scs_khz()) * 1000.0;
    let noise_figure_db = ctx.channel.params().noise_figure_db;
    let link_curves = ctx.config.phy.link_curves;
    let control_error_model = ctx.config.phy.control_error_model;

    for rx_id in ctx.node_ids() {
        let Some(rx_position) = ctx.nodes.get(&rx_id).map(|n| n.position) else {
            continue;
        };
        let powers: Vec<Option<f64>> = on_air
            .iter()
            .map(|a| {
                (a.node_id != rx_id).then(|| {
                    let loss = ctx.channel.loss_db(a.node_id, &a.position, rx_id, &rx_position, &mut ctx.rng);
                    dbm_to_mw(a.tx_power_dbm - loss)
                })
            })
            .collect();
        let transmitting = on_air.iter().any(|a| a.node_id == rx_id);
        let counted_rx = ctx.enabler.is_inside(PolygonKind::Rx, &rx_position);

        for (i, a) in on_air.iter().enumerate() {
            let Some(signal_mw) = powers[i] else {
                continue;
            };
            let Some(node) = ctx.nodes.get_mut(&rx_id) else {
                continue;
            };
            let counted = counted_rx && ctx.enabler.is_inside(PolygonKind::Tx, &a.position);
            let distance = a.position.distance(&rx_position);
            let key = (a.node_id, a.tx.packet_id);
            let earlier = node.harq.get(&key).map(|e| e.outcome);
            if earlier == Some(ReceptionOutcome::Success) {
                continue;
            }

            let los = ctx.channel.link(a.node_id, rx_id).is_none_or(|l| l.los);
            let rb_len = a.tx.rb_len.max(1);
            let (outcome, sinr) = if transmitting {
                (ReceptionOutcome::HalfDuplex, 0.0)
            } else {
                // first-stage SCI in the first sub-channel of the allocation
                let sci_rbs = subchannel_size.min(rb_len);
                let sci_band = rb_range(a.tx.rb_start, sci_rbs);
                let sci_interference = interference_mw(&on_air, &powers, i, &sci_band);
                let sci_noise = dbm_to_mw(thermal_noise_dbm(rb_hz * f64::from(sci_rbs), noise_figure_db));
                let sci_signal = signal_mw * f64::from(sci_rbs) / f64::from(rb_len);
                let sci_sinr = sci_signal / (sci_noise + sci_interference);
                let sci_lost = control_error_model
                    && bler(link_curves.pscch_channel(los), 0, sci_sinr, &HarqProcessInfo::new())?.is_error(&mut ctx.rng);

                let band = rb_range(a.tx.rb_start, rb_len);
                let interference = interference_mw(&on_air, &powers, i, &band);
                let failure = if interference > 0.0 {
                    ReceptionOutcome::Collision
                } else {
                    ReceptionOutcome::Propagation
                };
                if sci_lost {
                    ctx.stats.sci_failures += 1;
                    (failure, sci_sinr)
                } else {
                    node.scheduler.sense(&SensingReport {
                        node_id: a.node_id,
                        sensed_at: a.tx.subframe,
                        received_us: now_us,
                        rb_start: a.tx.rb_start,
                        rb_len,
                        rsrp_dbm: mw_to_dbm(signal_mw / f64::from(rb_len * SUBCARRIERS_PER_RB)),
                        rri_ms: a.tx.rri_ms,
                        reselection_counter: a.tx.reselection_counter,
                        is_retransmission: a.tx.is_retransmission,
                    });

                    let noise = dbm_to_mw(thermal_noise_dbm(rb_hz * f64::from(rb_len), noise_figure_db));
                    let sinr = signal_mw / (noise + interference);
                    let entry = node.harq.entry(key).or_insert_with(|| HarqEntry {
                        harq: HarqProcessInfo::new(),
                        outcome: failure,
                        first_us: now_us,
                    });
                    let tb = bler(link_curves.pssch_channel(los, rb_len), a.tx.mcs, sinr, &entry.harq)?;
                    entry.harq.record(sinr);
                    if tb.is_error(&mut ctx.rng) { (failure, sinr) } else { (ReceptionOutcome::Success, sinr) }
                }
            };

            match earlier {
                None => {
                    node.harq
                        .entry(key)
                        .or_insert_with(|| HarqEntry {
                            harq: HarqProcessInfo::new(),
                            outcome,
                            first_us: now_us,
                        })
                        .outcome = outcome;
                    if counted {
                        ctx.stats.record_reception(distance, outcome);
                    }
                }
                Some(previous) if outcome == ReceptionOutcome::Success => {
                    if let Some(entry) = node.harq.get_mut(&key) {
                        entry.outcome = outcome;
                    }
                    if counted {
                        ctx.stats.record_recovery(distance, previous);
                    }
                }
                Some(_) => {}
            }

            if counted {
                let sinr_db = if sinr > 0.0 { 10.0 * sinr.log10() } else { f64::NEG_INFINITY };
                ctx.traces
                    .reception(now_us, a.node_id, rx_id, a.tx.packet_id, a.tx.is_retransmission, distance, sinr_db, outcome);
            }
        }

        if let Some(node) = ctx.nodes.get_mut(&rx_id) {
            node.harq.retain(|_, e| e.first_us + HARQ_LIFETIME_US > now_us);
        }
    }
    Ok(())
}

/// Move every node by its velocity; nodes leaving the world wrap around or
/// are torn down.
fn handle_mobility(ctx: &mut SimulationContext) {
    let interval_ms = ctx.config.simulation.mobility_interval_ms;
    let dt = interval_ms as f64 / 1000.0;
    let mut departed: Vec<NodeId> = Vec::new();
    for id in ctx.node_ids() {
        let Some(node) = ctx.nodes.get_mut(&id) else {
            continue;
        };
        let mut next = node.position;
        next.x += node.velocity.x * dt;
        next.y += node.velocity.y * dt;
        if ctx.scene.contains(&next) {
            node.position = next;
        } else if ctx.config.simulation.wrap {
            node.position = ctx.scene.wrap(next);
        } else {
            departed.push(id);
        }
    }
    for id in departed {
        ctx.remove_node(id);
    }
    let positions = ctx.positions();
    ctx.channel.refresh_links(&positions, &mut ctx.rng);
    ctx.queue.schedule_in(interval_ms * 1000, Phase::Mobility, Event::Mobility);
}

/// Run a node's traffic generator and re-arm its timer.
fn handle_traffic(ctx: &mut SimulationContext, id: NodeId) {
    let now_us = ctx.now_us();
    let Some(node) = ctx.nodes.get_mut(&id) else {
        return;
    };
    if ctx.enabler.is_enabled(&node.position) {
        if let Some(size) = node.traffic.on_timer(now_us, node.position, node.velocity, &mut ctx.rng) {
            let packet = PacketRequest {
                packet_id: ctx.next_packet_id,
                size,
                traffic_type: node.traffic.traffic_type(),
                pdb_ms: ctx.config.traffic.pdb_ms,
                rri_ms: ctx.config.traffic.rri_ms,
                generated_us: now_us,
            };
            ctx.next_packet_id += 1;
            if node.arrivals.len() >= ARRIVAL_QUEUE_CAPACITY {
                warn!("node {}: arrival queue full, dropping oldest packet", id);
                node.arrivals.pop_front();
                ctx.stats.expired += 1;
            }
            node.arrivals.push_back(packet);
            ctx.stats.generated += 1;
        }
    }
    let delay = node.traffic.next_delay_us(&mut ctx.rng);
    node.traffic_timer = Some(ctx.queue.schedule_in(delay, Phase::Traffic, Event::Traffic(id)));
}

/// Hand queued packets to the schedulers and collect this slot's transmissions.
fn handle_mac(ctx: &mut SimulationContext) -> Result<(), SimulationError> {
    let now_us = ctx.now_us();
    let now = current_slot(ctx)?;
    for id in ctx.node_ids() {
        let Some(node) = ctx.nodes.get_mut(&id) else {
            continue;
        };
        while let Some(packet) = node.arrivals.pop_front() {
            if now_us > packet.generated_us + u64::from(packet.pdb_ms) * 1000 {
                debug!("node {}: packet {} expired before reaching the MAC", id, packet.packet_id);
                ctx.stats.expired += 1;
                continue;
            }
            let selections = node.scheduler.stats().selections;
            let decision = node.scheduler.enqueue(now, now_us, packet, &ctx.pool, &mut ctx.rng)?;
            if let PacketDecision::Scheduled { reselection, .. } = decision {
                if node.scheduler.stats().selections > selections {
                    if let Some(reservation) = node.scheduler.reservation() {
                        ctx.traces.selection(now_us, id, reservation, reselection);
                    }
                }
            }
        }
        if let Some(tx) = node.scheduler.on_slot(now, now_us, &mut ctx.rng) {
            if tx.is_retransmission {
                ctx.stats.retransmissions += 1;
            } else {
                ctx.stats.transmissions += 1;
            }
            ctx.on_air.push(OnAir {
                node_id: id,
                position: node.position,
                tx_power_dbm: node.tx_power_dbm,
                tx,
            });
        }
    }
    let slot_us = ctx.numerology.slot_duration_us();
    ctx.queue.schedule_in(slot_us, Phase::Reception, Event::Reception);
    ctx.queue.schedule_in(slot_us, Phase::Mac, Event::Mac);
    Ok(())
}

fn handle_report(ctx: &mut SimulationContext) {
    let s = &ctx.stats;
    info!(
        "t = {} ms: {} nodes, {} packets generated, {} transmitted, PRR {}",
        ctx.now_us() / 1000,
        ctx.nodes.len(),
        s.generated,
        s.transmissions,
        s.overall_prr().map_or_else(|| "-".to_string(), |p| format!("{:.4}", p))
    );
    ctx.queue
        .schedule_in(ctx.config.simulation.report_interval_ms * 1000, Phase::Report, Event::Report);
}

/// Run the simulation until the configured duration elapses.
pub fn run(ctx: &mut SimulationContext) -> Result<(), SimulationError> {
    let end_us = ctx.config.simulation.duration_ms * 1000;
    while let Some(time) = ctx.queue.peek_time() {
        if time >= end_us {
            break;
        }
        let Some((_, _, event)) = ctx.queue.pop() else {
            break;
        };
        match event {
            Event::Reception => handle_reception(ctx)?,
            Event::Mobility => handle_mobility(ctx),
            Event::Traffic(id) => handle_traffic(ctx, id),
            Event::Mac => handle_mac(ctx)?,
            Event::Report => handle_report(ctx),
        }
    }
    ctx.traces.flush();
    info!("Simulation finished at {} ms", ctx.now_us() / 1000);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::scene::parse_scene;
    use crate::scene::tests::scene_json;
    use crate::simulation::stats::TraceWriter;

    fn context(nodes: &str, config: Config) -> SimulationContext {
        let scene = parse_scene(&scene_json(nodes)).unwrap();
        SimulationContext::new(config, scene, TraceWriter::disabled()).unwrap()
    }

    fn short_run(duration_ms: u64) -> Config {
        let mut config = Config::default();
        config.simulation.duration_ms = duration_ms;
        config
    }

    #[test]
    fn overlap_counts_shared_rbs() {
        assert_eq!(overlap(&rb_range(0, 10), &rb_range(5, 10)), 5);
        assert_eq!(overlap(&rb_range(0, 10), &rb_range(10, 10)), 0);
        assert_eq!(overlap(&rb_range(10, 20), &rb_range(12, 2)), 2);
    }

    #[test]
    fn two_close_vehicles_hear_each_other() {
        let mut ctx = context(
            r#"{ "node_id": 1, "position": { "x": 100.0, "y": 5.0 } },
               { "node_id": 2, "position": { "x": 200.0, "y": 5.0 } }"#,
            short_run(2000),
        );
        run(&mut ctx).unwrap();
        let s = &ctx.stats;
        assert!((36..=40).contains(&s.generated), "generated {}", s.generated);
        assert!(s.transmissions + 4 >= s.generated);
        assert_eq!(s.retransmissions, 0);
        // no third transmitter, so nothing can collide; 100 m is far above sensitivity
        assert_eq!(s.collision_failures, 0);
        assert_eq!(s.propagation_failures, 0);
        let received = s.successes + s.half_duplex_failures;
        assert!(s.transmissions - received <= 2);
        assert!(s.successes > 0);
        let scheduler = ctx.scheduler_stats();
        assert!(scheduler.selections >= 2);
        assert_eq!(scheduler.transmissions, s.transmissions);
    }

    #[test]
    fn sensing_fills_while_receiving() {
        let mut ctx = context(
            r#"{ "node_id": 1, "position": { "x": 100.0, "y": 5.0 } },
               { "node_id": 2, "position": { "x": 150.0, "y": 5.0 } }"#,
            short_run(500),
        );
        run(&mut ctx).unwrap();
        let heard = ctx.nodes.values().filter(|n| !n.scheduler.history().reservations().is_empty()).count();
        assert!(heard >= 1);
    }

    #[test]
    fn leaving_vehicle_is_torn_down() {
        let mut config = short_run(1000);
        config.simulation.wrap = false;
        let mut ctx = context(
            r#"{ "node_id": 1, "position": { "x": 995.0, "y": 5.0 }, "velocity": { "x": 30.0, "y": 0.0 } },
               { "node_id": 2, "position": { "x": 500.0, "y": 5.0 } }"#,
            config,
        );
        let timer = ctx.nodes[&1].traffic_timer.unwrap();
        run(&mut ctx).unwrap();
        assert_eq!(ctx.node_ids(), vec![2]);
        assert_eq!(ctx.stats.departed_nodes, 1);
        assert!(!ctx.queue.is_pending(timer));
        assert!(ctx.channel.link(1, 2).is_none());
    }

    #[test]
    fn wrapping_vehicle_stays() {
        let mut ctx = context(
            r#"{ "node_id": 1, "position": { "x": 995.0, "y": 5.0 }, "velocity": { "x": 30.0, "y": 0.0 } }"#,
            short_run(1000),
        );
        run(&mut ctx).unwrap();
        let node = &ctx.nodes[&1];
        assert!(node.position.x < 100.0, "x = {}", node.position.x);
        assert_eq!(ctx.stats.departed_nodes, 0);
    }

    #[test]
    fn same_seed_same_run() {
        let nodes = r#"{ "node_id": 1, "position": { "x": 100.0, "y": 5.0 } },
                       { "node_id": 2, "position": { "x": 300.0, "y": 5.0 } },
                       { "node_id": 3, "position": { "x": 500.0, "y": 15.0 } }"#;
        let mut a = context(nodes, short_run(1500));
        let mut b = context(nodes, short_run(1500));
        run(&mut a).unwrap();
        run(&mut b).unwrap();
        assert_eq!(a.stats.successes, b.stats.successes);
        assert_eq!(a.stats.transmissions, b.stats.transmissions);
        assert_eq!(a.scheduler_stats(), b.scheduler_stats());
    }
}
