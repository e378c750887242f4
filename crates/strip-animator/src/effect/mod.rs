//! Per-mode transient animation state
//!
//! Each animated mode keeps a small state machine that the engine steps
//! once per frame. Static color needs no state.

mod chase;
mod pulse;

pub use chase::{CHASE_SUB_PHASES, ChaseState};
pub use pulse::{MAX_RISE_CEILING, PulseState, scale_channel, scale_color};
