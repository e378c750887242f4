//! Command producer boundary
//!
//! Transport callbacks hand raw payloads to [`CommandSource`]. All animation
//! logic stays on the render side of the mailbox.

use log::{info, warn};

use crate::command::Command;
use crate::error::ParseError;
use crate::mailbox::CommandMailbox;

#[derive(Clone, Copy)]
pub struct CommandSource<'a> {
    mailbox: &'a CommandMailbox,
}

impl<'a> CommandSource<'a> {
    pub const fn new(mailbox: &'a CommandMailbox) -> Self {
        Self { mailbox }
    }

    /// Publish a command to the render loop
    pub fn submit(&self, command: Command) {
        self.mailbox.set(command);
    }

    /// Parse a transport payload and submit it
    ///
    /// Malformed payloads are logged and dropped; the mailbox is left
    /// untouched.
    pub fn handle_payload(&self, payload: &[u8]) -> Result<Command, ParseError> {
        match Command::parse(payload) {
            Ok(command) => {
                info!("command: accepted {}", command);
                self.submit(command);
                Ok(command)
            }
            Err(e) => {
                warn!(
                    "command: rejected {:?} ({} bytes): {}",
                    core::str::from_utf8(payload).unwrap_or("<binary>"),
                    payload.len(),
                    e
                );
                Err(e)
            }
        }
    }
}
