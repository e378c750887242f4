use embassy_time::Duration;

use strip_animator::{AnimationEngine, CommandMailbox, EngineConfig, EngineStats};

use crate::config::{LED_COUNT, LIGHT};
use crate::infrastructure::drivers::EspStripTransmitter;

fn engine_config() -> EngineConfig {
    EngineConfig::default()
        .with_intervals(
            Duration::from_millis(LIGHT.idle_interval_ms),
            Duration::from_millis(LIGHT.chase_interval_ms),
            Duration::from_millis(LIGHT.pulse_interval_ms),
        )
        .with_transmit_timeout(Duration::from_millis(LIGHT.transmit_timeout_ms))
        .with_fault_report_threshold(LIGHT.fault_report_threshold)
}

/// Task driving the strip
///
/// Owns the transmitter and renders whatever command was last delivered
/// to the mailbox.
#[embassy_executor::task]
pub async fn animation_task(
    transmitter: EspStripTransmitter,
    mailbox: &'static CommandMailbox,
    stats: &'static EngineStats,
) {
    log::info!("animation: driving {} pixels", LED_COUNT);
    let mut engine: AnimationEngine<'static, EspStripTransmitter, LED_COUNT> =
        AnimationEngine::new(transmitter, mailbox, engine_config()).with_stats(stats);
    engine.run().await
}
