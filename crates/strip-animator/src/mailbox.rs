//! Latest-wins command handoff
//!
//! A capacity-1 slot between the transport task (producer) and the render
//! loop (consumer). Writes overwrite any unread command, reads never block.

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use static_cell::StaticCell;

use crate::command::Command;
use crate::error::InitError;

static MAILBOX: StaticCell<CommandMailbox> = StaticCell::new();

/// Single-slot overwrite mailbox for [`Command`]s
///
/// `set` and `try_take` each hold a critical section only for the copy of
/// one command, so neither side can block the other.
pub struct CommandMailbox {
    slot: Signal<CriticalSectionRawMutex, Command>,
}

impl CommandMailbox {
    pub const fn new() -> Self {
        Self {
            slot: Signal::new(),
        }
    }

    /// Store a command, replacing any unread one
    pub fn set(&self, command: Command) {
        self.slot.signal(command);
    }

    /// Take the pending command, leaving the slot empty
    pub fn try_take(&self) -> Option<Command> {
        self.slot.try_take()
    }

    /// Check whether a command is waiting to be taken
    pub fn has_pending(&self) -> bool {
        self.slot.signaled()
    }
}

impl Default for CommandMailbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Claim the process-wide mailbox
///
/// Succeeds exactly once. Any later call returns
/// [`InitError::MailboxUnavailable`] so a second render loop can never be
/// started against an already shared slot.
pub fn init_mailbox() -> Result<&'static CommandMailbox, InitError> {
    MAILBOX
        .try_init(CommandMailbox::new())
        .map(|mailbox| &*mailbox)
        .ok_or(InitError::MailboxUnavailable)
}
