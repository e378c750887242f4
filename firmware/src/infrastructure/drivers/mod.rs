mod led;
mod network;

pub use led::{ColorOrder, EspStripTransmitter};
pub use network::{init_network_stack, wait_for_connection};
pub(crate) use network::resolve_host;
