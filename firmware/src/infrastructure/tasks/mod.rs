mod animation;
mod mqtt;
mod network;

pub use animation::animation_task;
pub use mqtt::mqtt_runtime_task;
pub use network::{network_runner_task, wifi_connection_task};
