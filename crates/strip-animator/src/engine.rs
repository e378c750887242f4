//! Animation Engine - render loop state machine
//!
//! The AnimationEngine is the single consumer of the command mailbox:
//! - Polls the mailbox once per tick without blocking
//! - Resets per-mode counters when a new command is adopted
//! - Renders complete frames for the active mode
//! - Submits frames with a bounded wait for the transmitter
//! - Optionally publishes counters to EngineStats for external observation

use embassy_time::{Duration, Timer, with_timeout};
use log::{error, info, warn};

use crate::color::{BLACK, Rgb};
use crate::command::Command;
use crate::driver::StripTransmitter;
use crate::effect::{CHASE_SUB_PHASES, ChaseState, PulseState, scale_color};
use crate::error::TransmitFault;
use crate::mailbox::CommandMailbox;
use crate::stats::EngineStats;

/// Engine timing and envelope settings
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Delay between redraws of a static color
    pub idle_interval: Duration,
    /// Delay after each of the six chase submissions
    pub chase_interval: Duration,
    /// Delay between pulse frames
    pub pulse_interval: Duration,
    /// Longest wait for a frame to be flushed
    pub transmit_timeout: Duration,
    /// Number of doubling steps in the pulse rise
    pub pulse_rise_ceiling: u8,
    /// Optional cut-off for the pulse decay, `None` lets it run to zero
    pub pulse_fall_ceiling: Option<u8>,
    /// Hue rotation per chase cycle, in degrees
    pub chase_hue_step: u16,
    /// Consecutive transmit faults before an error is reported
    pub fault_report_threshold: u32,
    /// Command rendered before anything arrives
    pub initial_command: Command,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            idle_interval: Duration::from_millis(100),
            chase_interval: Duration::from_millis(10),
            pulse_interval: Duration::from_millis(30),
            transmit_timeout: Duration::from_millis(100),
            pulse_rise_ceiling: 7,
            pulse_fall_ceiling: None,
            chase_hue_step: 60,
            fault_report_threshold: 10,
            initial_command: Command::default(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_intervals(mut self, idle: Duration, chase: Duration, pulse: Duration) -> Self {
        self.idle_interval = idle;
        self.chase_interval = chase;
        self.pulse_interval = pulse;
        self
    }

    #[must_use]
    pub fn with_transmit_timeout(mut self, timeout: Duration) -> Self {
        self.transmit_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_pulse_ceilings(mut self, rise: u8, fall: Option<u8>) -> Self {
        self.pulse_rise_ceiling = rise;
        self.pulse_fall_ceiling = fall;
        self
    }

    #[must_use]
    pub fn with_fault_report_threshold(mut self, threshold: u32) -> Self {
        self.fault_report_threshold = threshold.max(1);
        self
    }

    #[must_use]
    pub fn with_initial_command(mut self, command: Command) -> Self {
        self.initial_command = command;
        self
    }
}

/// Animation Engine - owns the pixel buffer and per-mode state
///
/// Generic over `T: StripTransmitter` to support different hardware backends.
pub struct AnimationEngine<'a, T: StripTransmitter<N>, const N: usize> {
    /// Hardware frame sink
    transmitter: T,
    /// Latest-wins command slot
    mailbox: &'a CommandMailbox,
    config: EngineConfig,
    /// Frame buffer, always fully written before submission
    pixels: [Rgb; N],
    /// Command being rendered
    current: Command,
    chase: ChaseState,
    pulse: PulseState,
    /// Transmit faults since the last clean frame
    fault_streak: u32,
    /// Optional counters for external observation
    stats: Option<&'a EngineStats>,
}

impl<'a, T: StripTransmitter<N>, const N: usize> AnimationEngine<'a, T, N> {
    pub fn new(transmitter: T, mailbox: &'a CommandMailbox, mut config: EngineConfig) -> Self {
        config.fault_report_threshold = config.fault_report_threshold.max(1);
        Self {
            transmitter,
            mailbox,
            pixels: [BLACK; N],
            current: config.initial_command,
            chase: ChaseState::new(config.chase_hue_step),
            pulse: PulseState::new(config.pulse_rise_ceiling, config.pulse_fall_ceiling),
            fault_streak: 0,
            stats: None,
            config,
        }
    }

    /// Attach counters for external observation
    #[must_use]
    pub fn with_stats(mut self, stats: &'a EngineStats) -> Self {
        stats.record_mode(self.current.mode());
        self.stats = Some(stats);
        self
    }

    /// Effective configuration after clamping
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_command(&self) -> Command {
        self.current
    }

    /// Last frame written to the buffer
    pub fn pixels(&self) -> &[Rgb; N] {
        &self.pixels
    }

    pub fn rotation_offset(&self) -> u16 {
        self.chase.rotation_offset()
    }

    pub fn pulse(&self) -> &PulseState {
        &self.pulse
    }

    /// Process one tick
    ///
    /// Adopts at most one new command, then renders and submits the frames
    /// of the active mode. A command that arrives during the tick waits for
    /// the next one.
    pub async fn tick(&mut self) {
        if let Some(command) = self.mailbox.try_take() {
            self.adopt(command);
        }

        match self.current {
            Command::Color(color) => {
                self.pixels.fill(color);
                self.submit().await;
                Timer::after(self.config.idle_interval).await;
            }
            Command::RainbowChase => self.render_chase().await,
            Command::PulseWave(color) => {
                let intensity = self.pulse.next_intensity();
                self.pixels.fill(scale_color(color, intensity));
                self.submit().await;
                Timer::after(self.config.pulse_interval).await;
            }
        }
    }

    /// Run the engine loop indefinitely
    pub async fn run(&mut self) -> ! {
        info!("engine: rendering {} pixels, starting with {}", N, self.current);
        loop {
            self.tick().await;
        }
    }

    fn adopt(&mut self, command: Command) {
        info!("engine: switching to {}", command);
        if let Command::PulseWave(_) = command {
            self.pulse.reset();
        }
        self.current = command;
        if let Some(stats) = self.stats {
            stats.record_adopted(command.mode());
        }
    }

    /// One full chase cycle: lit and blank frame for each sub-phase
    async fn render_chase(&mut self) {
        for sub_phase in 0..CHASE_SUB_PHASES {
            self.chase.light_sub_phase(&mut self.pixels, sub_phase);
            self.submit().await;
            Timer::after(self.config.chase_interval).await;

            self.pixels.fill(BLACK);
            self.submit().await;
            Timer::after(self.config.chase_interval).await;
        }
        self.chase.advance();
    }

    /// Submit the buffer and wait for the flush, at most `transmit_timeout`
    async fn submit(&mut self) {
        let result = with_timeout(
            self.config.transmit_timeout,
            self.transmitter.transmit(&self.pixels),
        )
        .await;
        if let Some(stats) = self.stats {
            stats.record_submitted();
        }

        match result {
            Ok(Ok(())) => self.on_clean(),
            Ok(Err(e)) => {
                warn!("engine: transmit failed: {:?}", e);
                self.on_fault(TransmitFault::Failed);
            }
            Err(_) => {
                warn!(
                    "engine: transmit timed out after {} ms",
                    self.config.transmit_timeout.as_millis()
                );
                self.on_fault(TransmitFault::TimedOut);
            }
        }
    }

    fn on_clean(&mut self) {
        if self.fault_streak >= self.config.fault_report_threshold {
            info!(
                "engine: transmitter recovered after {} faults",
                self.fault_streak
            );
        }
        self.fault_streak = 0;
        if let Some(stats) = self.stats {
            stats.record_clean();
        }
    }

    fn on_fault(&mut self, fault: TransmitFault) {
        self.fault_streak = self.fault_streak.saturating_add(1);
        if self.fault_streak == self.config.fault_report_threshold {
            error!(
                "engine: {} consecutive transmit faults, strip output is stale",
                self.fault_streak
            );
        }
        if let Some(stats) = self.stats {
            stats.record_fault(fault, self.fault_streak);
        }
    }
}
