use embassy_net::Runner;
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{
    AuthMethod, ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent, WifiStaState,
};

use crate::config::WIFI;

const RECONNECT_DELAY: Duration = Duration::from_millis(2000);
const RETRY_DELAY: Duration = Duration::from_millis(5000);

/// Background task for connecting to the `WiFi` network
///
/// Keeps the station associated and reconnects whenever the link drops.
#[embassy_executor::task]
pub async fn wifi_connection_task(mut controller: WifiController<'static>) {
    loop {
        if esp_radio::wifi::sta_state() == WifiStaState::Connected {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            log::warn!("network: disconnected");
            Timer::after(RECONNECT_DELAY).await;
        }

        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = if WIFI.password.is_empty() {
                ClientConfig::default()
                    .with_ssid(WIFI.ssid.into())
                    .with_auth_method(AuthMethod::None)
            } else {
                ClientConfig::default()
                    .with_ssid(WIFI.ssid.into())
                    .with_password(WIFI.password.into())
            };
            if let Err(e) = controller.set_config(&ModeConfig::Client(client_config)) {
                log::error!("network: invalid wifi config: {e:?}");
                Timer::after(RETRY_DELAY).await;
                continue;
            }
            if let Err(e) = controller.start_async().await {
                log::error!("network: failed to start wifi: {e:?}");
                Timer::after(RETRY_DELAY).await;
                continue;
            }
        }

        log::info!("network: connecting to {}", WIFI.ssid);
        match controller.connect_async().await {
            Ok(()) => log::info!("network: connected"),
            Err(e) => {
                log::warn!("network: error connecting: {e:?}");
                Timer::after(RETRY_DELAY).await;
            }
        }
    }
}

/// Background task for running the network stack
#[embassy_executor::task]
pub async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}
