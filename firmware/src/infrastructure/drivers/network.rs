use core::str::FromStr;

use heapless::String;

use embassy_net::{
    DhcpConfig, IpAddress, Ipv4Address, Runner, Stack, StackResources, StaticConfigV4,
    dns::DnsQueryType,
};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_hal::rng::Rng;
use esp_radio::wifi::{Config as WifiConfig, WifiController, WifiDevice};

use static_cell::make_static;

use crate::config::DEVICE;

const MAX_CONNECTIONS: usize = 4;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Bring up the radio and build the DHCP-configured network stack
pub fn init_network_stack(
    wifi_device: WIFI<'static>,
) -> (
    Stack<'static>,
    Runner<'static, WifiDevice<'static>>,
    WifiController<'static>,
) {
    let radio = &*make_static!(esp_radio::init().expect("radio must initialize"));
    let (controller, interfaces) =
        esp_radio::wifi::new(radio, wifi_device, WifiConfig::default())
            .expect("wifi interface must initialize");

    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname = String::from_str(DEVICE.hostname).ok();
    if dhcp_config.hostname.is_none() {
        log::warn!("network: hostname {} too long, sending none", DEVICE.hostname);
    }

    let net_config = embassy_net::Config::dhcpv4(dhcp_config);
    let resources = make_static!(StackResources::<MAX_CONNECTIONS>::new());
    let (stack, runner) = embassy_net::new(interfaces.sta, net_config, resources, random_seed());

    (stack, runner, controller)
}

fn random_seed() -> u64 {
    let rng = Rng::new();
    (u64::from(rng.random()) << 32) | u64::from(rng.random())
}

/// Wait for full network connectivity (link + IP address)
pub async fn wait_for_connection(stack: Stack<'_>) -> StaticConfigV4 {
    while !stack.is_link_up() {
        Timer::after(POLL_INTERVAL).await;
    }
    loop {
        if let Some(config) = stack.config_v4() {
            log::info!("network: got address {}", config.address);
            return config;
        }
        Timer::after(POLL_INTERVAL).await;
    }
}

/// Resolves a hostname to an IP address
pub(crate) async fn resolve_host(stack: Stack<'static>, host: &str) -> Option<IpAddress> {
    if let Ok(ip) = host.parse::<Ipv4Address>() {
        return Some(IpAddress::Ipv4(ip));
    }

    let addresses = stack.dns_query(host, DnsQueryType::A).await.ok()?;
    addresses.first().copied()
}
