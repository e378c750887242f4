#![no_std]

//! Strip Animator - latest-wins animation engine for addressable LED strips
//!
//! Architecture layers:
//! - `color` - HSV to RGB conversion
//! - `command` - Remote command model and payload parser
//! - `mailbox` - Capacity-1, overwrite-on-write command handoff
//! - `source` - Narrow producer boundary for transport callbacks
//! - `driver` - Hardware abstraction (`[StripTransmitter]` trait)
//! - `effect` - Per-mode transient state (chase, pulse)
//! - `engine` - Render loop state machine
//! - `stats` - Counters for external observation
//!
//! The engine is generic over `StripTransmitter`, allowing different hardware backends.

pub mod color;
pub mod command;
pub mod driver;
pub mod effect;
pub mod engine;
pub mod error;
pub mod mailbox;
pub mod source;
pub mod stats;

pub use color::{Rgb, hsv_to_rgb};
pub use command::{Command, ModeId, parse_rgb24};
pub use driver::StripTransmitter;
pub use effect::{ChaseState, PulseState};
pub use engine::{AnimationEngine, EngineConfig};
pub use error::{InitError, ParseError, TransmitFault};
pub use mailbox::{CommandMailbox, init_mailbox};
pub use source::CommandSource;
pub use stats::EngineStats;
