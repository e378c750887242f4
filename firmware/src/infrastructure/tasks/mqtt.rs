//! MQTT command intake
//!
//! Subscribes to the command topic and feeds every payload to the
//! [`CommandSource`]. The connection is rebuilt from scratch on any error.

use core::fmt;

use embassy_futures::select::{Either, select};
use embassy_net::Stack;
use embassy_net::tcp::TcpSocket;
use embassy_time::{Duration, Ticker, Timer};
use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::packet::v5::reason_codes::ReasonCode;
use rust_mqtt::utils::rng_generator::CountingRng;

use strip_animator::CommandSource;

use crate::config::MQTT;
use crate::infrastructure::drivers::resolve_host;

const MQTT_BUF_SIZE: usize = 256;
const MQTT_MAX_PROPERTIES: usize = 5;
const SOCKET_BUF_SIZE: usize = 1024;
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug)]
enum MqttError {
    Resolve,
    Connect(embassy_net::tcp::ConnectError),
    Protocol(ReasonCode),
}

impl fmt::Display for MqttError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve => write!(f, "cannot resolve {}", MQTT.host),
            Self::Connect(e) => write!(f, "tcp connect failed: {e:?}"),
            Self::Protocol(code) => write!(f, "broker error: {code:?}"),
        }
    }
}

impl From<ReasonCode> for MqttError {
    fn from(code: ReasonCode) -> Self {
        Self::Protocol(code)
    }
}

/// Task keeping the broker session alive and forwarding commands
#[embassy_executor::task]
pub async fn mqtt_runtime_task(stack: Stack<'static>, source: CommandSource<'static>) {
    log::info!("mqtt: starting runtime task");
    loop {
        if let Err(e) = run_session(stack, source).await {
            log::warn!("mqtt: {e}, reconnecting in 2s");
        }
        Timer::after(RECONNECT_DELAY).await;
    }
}

async fn run_session(stack: Stack<'static>, source: CommandSource<'_>) -> Result<(), MqttError> {
    let mut rx_buffer = [0u8; SOCKET_BUF_SIZE];
    let mut tx_buffer = [0u8; SOCKET_BUF_SIZE];
    let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(60)));

    let broker = resolve_host(stack, MQTT.host)
        .await
        .ok_or(MqttError::Resolve)?;
    log::info!("mqtt: connecting to {:?}:{}", broker, MQTT.port);
    if let Err(e) = socket.connect((broker, MQTT.port)).await {
        socket.abort();
        return Err(MqttError::Connect(e));
    }

    let mut config: ClientConfig<'_, MQTT_MAX_PROPERTIES, CountingRng> =
        ClientConfig::new(MqttVersion::MQTTv5, CountingRng(20_000));
    config.add_max_subscribe_qos(QualityOfService::QoS0);
    config.add_client_id(MQTT.client_id);
    if let Some(username) = MQTT.username {
        config.add_username(username);
    }
    if let Some(password) = MQTT.password {
        config.add_password(password);
    }
    config.max_packet_size = u32::try_from(MQTT_BUF_SIZE).unwrap_or(u32::MAX);
    config.keep_alive = MQTT.keep_alive_secs;

    let mut write_buffer = [0u8; MQTT_BUF_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUF_SIZE];
    let mut client = MqttClient::<_, MQTT_MAX_PROPERTIES, _>::new(
        socket,
        &mut write_buffer,
        MQTT_BUF_SIZE,
        &mut recv_buffer,
        MQTT_BUF_SIZE,
        config,
    );

    client.connect_to_broker().await?;
    client.subscribe_to_topic(MQTT.command_topic).await?;
    log::info!("mqtt: subscribed to {}", MQTT.command_topic);

    // Ping schedule is independent of inbound traffic. A receive cut short
    // by a due ping fails on the next pass and the session is rebuilt.
    let ping_interval = Duration::from_secs(u64::from(MQTT.keep_alive_secs / 2).max(1));
    let mut ping = Ticker::every(ping_interval);
    loop {
        let event = select(client.receive_message(), ping.next()).await;
        match event {
            Either::First(message) => {
                let (_topic, payload) = message?;
                // Rejections are logged by the source and never end the session
                let _ = source.handle_payload(payload);
            }
            Either::Second(()) => client.send_ping().await?,
        }
    }
}
