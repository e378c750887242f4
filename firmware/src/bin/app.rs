#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};

use strip_animator::{CommandSource, EngineStats, init_mailbox};
use strip_light_firmware::config::{LIGHT_COLOR_ORDER, STATS_REPORT_SECS};
use strip_light_firmware::infrastructure::drivers::{
    EspStripTransmitter, init_network_stack, wait_for_connection,
};
use strip_light_firmware::infrastructure::tasks::{
    animation_task, mqtt_runtime_task, network_runner_task, wifi_connection_task,
};

esp_bootloader_esp_idf::esp_app_desc!();

static ENGINE_STATS: EngineStats = EngineStats::new();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Allocate heap memory for the radio (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let mailbox = match init_mailbox() {
        Ok(mailbox) => mailbox,
        Err(e) => panic!("startup failed: {e}"),
    };

    // Start the animation before networking so the strip is driven from boot
    let transmitter = EspStripTransmitter::new(
        peripherals.RMT,
        strip_light_firmware::led_gpio!(peripherals),
        LIGHT_COLOR_ORDER,
    );
    spawner
        .spawn(animation_task(transmitter, mailbox, &ENGINE_STATS))
        .ok();

    // Initialize network stack and spawn network tasks
    let (stack, runner, controller) = init_network_stack(peripherals.WIFI);
    spawner.spawn(wifi_connection_task(controller)).ok();
    spawner.spawn(network_runner_task(runner)).ok();

    // Wait for network connection before starting network-dependent tasks
    wait_for_connection(stack).await;

    spawner
        .spawn(mqtt_runtime_task(stack, CommandSource::new(mailbox)))
        .ok();

    loop {
        Timer::after(Duration::from_secs(STATS_REPORT_SECS)).await;
        log::info!(
            "stats: mode={} frames={} failures={} timeouts={} streak={} commands={}",
            ENGINE_STATS.mode().as_str(),
            ENGINE_STATS.frames_submitted(),
            ENGINE_STATS.transmit_failures(),
            ENGINE_STATS.transmit_timeouts(),
            ENGINE_STATS.consecutive_faults(),
            ENGINE_STATS.commands_adopted(),
        );
    }
}
