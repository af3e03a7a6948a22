//! Spin Wheel Demo
//!
//! Runs a handful of spins against an in-memory roster, first on a virtual
//! clock and then through the real-time service.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use spin_wheel::{
    core::rng::derive_spin_seed,
    roster::{InMemoryRoster, ParticipantStore, WinnerRecorder},
    service::WheelService,
    wheel::WheelEventData,
    DeterministicRng, VirtualScheduler, WheelConfig, WheelEngine, VERSION,
};

const DEMO_NAMES: [&str; 5] = ["Ada", "Grace", "Linus", "Barbara", "Ken"];
const DEMO_SPINS: u64 = 8;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => WheelConfig::load(&path).with_context(|| format!("loading config from {path}"))?,
        None => WheelConfig::default(),
    };

    info!("Spin Wheel v{}", VERSION);
    info!(
        "Spin: {} ms, {}..={} turns, cue after {} ms",
        config.engine.spin_duration_ms,
        config.engine.min_extra_turns,
        config.engine.max_extra_turns,
        config.engine.winner_cue_delay_ms
    );

    let roster = demo_virtual_spins(&config)?;
    demo_service_spin(&config, roster).await?;
    Ok(())
}

/// Spin on a virtual clock, feeding roster weights back into each spin.
fn demo_virtual_spins(config: &WheelConfig) -> anyhow::Result<InMemoryRoster> {
    info!("=== Virtual Spins ===");

    let mut roster = InMemoryRoster::with_names(config.weights.clone(), DEMO_NAMES);
    let entries = roster.names();
    let session = [7u8; 16];

    let scheduler = VirtualScheduler::new(config.service.frame_interval_ms());
    let mut engine = WheelEngine::new(config.engine.clone(), scheduler, DeterministicRng::default());
    let max_frames = (config.engine.spin_duration_ms + config.engine.winner_cue_delay_ms) as usize * 2;

    for nonce in 0..DEMO_SPINS {
        let seed = derive_spin_seed(&session, &entries, nonce);
        *engine.rng_mut() = DeterministicRng::new(seed);

        let weights = roster.weight_map(&entries);
        let ticket = engine.request_spin(entries.clone(), Some(&weights))?;
        info!(
            "Spin {} (seed {}): aiming at {} with {} extra turns",
            ticket.spin_id,
            hex::encode(seed.to_be_bytes()),
            ticket.expected_winner,
            ticket.extra_turns
        );

        for event in engine.run_until_settled(max_frames) {
            if let WheelEventData::Settled { winner, final_angle, .. } = &event.data {
                let receipt = roster.record_winner(winner, &entries)?;
                info!(
                    "Winner: {} at {:.1} deg (odds were {:.1}%)",
                    winner,
                    final_angle,
                    receipt.probability * 100.0
                );
            }
        }
    }

    info!("=== Standings ===");
    for participant in roster.list() {
        info!(
            "{:<8} wins: {}  weight: {:.2}",
            participant.name, participant.times_selected, participant.probability_weight
        );
    }
    info!("Selections this week: {}", roster.recent_history(7).len());

    Ok(roster)
}

/// One spin through the real-time service.
async fn demo_service_spin(config: &WheelConfig, roster: InMemoryRoster) -> anyhow::Result<()> {
    info!("=== Real-time Spin ===");

    let entries = roster.names();
    let roster = Arc::new(RwLock::new(roster));
    let (handle, task) = WheelService::new(config.clone())?.with_roster(roster.clone()).spawn();
    let mut events = handle.subscribe();

    let ticket = handle.spin(entries, None).await?;
    info!("Spin {} accepted, aiming at {}", ticket.spin_id, ticket.expected_winner);

    loop {
        let event = events.recv().await.context("wheel event stream closed")?;
        if let WheelEventData::WinnerCue { winner } = &event.data {
            info!("Winner cue: {}", winner);
            break;
        }
    }

    if let Some(winner) = roster.read().await.find(&handle.snapshot().winner.unwrap_or_default()) {
        info!("{} now has {} wins", winner.name, winner.times_selected);
    } else {
        warn!("Settled winner missing from roster");
    }

    handle.shutdown().await?;
    task.await?;
    Ok(())
}
