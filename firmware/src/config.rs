#![allow(clippy::unreadable_literal)]

use crate::infrastructure::drivers::ColorOrder;

/// Number of pixels on the strip
pub const LED_COUNT: usize = 12;

pub(crate) struct WifiConfig {
    pub ssid: &'static str,
    pub password: &'static str,
}

pub(crate) struct MqttConfig {
    pub host: &'static str,
    pub port: u16,
    pub username: Option<&'static str>,
    pub password: Option<&'static str>,
    pub client_id: &'static str,
    pub command_topic: &'static str,
    pub keep_alive_secs: u16,
}

pub(crate) struct DeviceConfig {
    pub hostname: &'static str,
}

pub(crate) struct LightConfig {
    pub color_order: ColorOrder,
    pub idle_interval_ms: u64,
    pub chase_interval_ms: u64,
    pub pulse_interval_ms: u64,
    pub transmit_timeout_ms: u64,
    pub fault_report_threshold: u32,
}

pub(crate) const WIFI: WifiConfig = WifiConfig {
    ssid: env!("WIFI_SSID"),
    password: env!("WIFI_PASSWORD"),
};

pub(crate) const MQTT: MqttConfig = MqttConfig {
    host: env!("MQTT_HOST"),
    port: 1883,
    username: option_env!("MQTT_USERNAME"),
    password: option_env!("MQTT_PASSWORD"),
    client_id: "strip-light-esp001",
    command_topic: "esp001/state",
    keep_alive_secs: 30,
};

pub(crate) const DEVICE: DeviceConfig = DeviceConfig {
    hostname: "strip-light-esp001",
};

pub(crate) const LIGHT: LightConfig = LightConfig {
    color_order: ColorOrder::Rgb,
    idle_interval_ms: 100,
    chase_interval_ms: 10,
    pulse_interval_ms: 30,
    transmit_timeout_ms: 100,
    fault_report_threshold: 10,
};

/// Channel order of the installed strip
pub const LIGHT_COLOR_ORDER: ColorOrder = LIGHT.color_order;

/// Interval between stats reports from the main task
pub const STATS_REPORT_SECS: u64 = 30;

#[macro_export]
macro_rules! led_gpio {
    ($p:expr) => {
        $p.GPIO13
    };
}
