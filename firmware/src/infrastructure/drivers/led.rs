use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::peripherals::RMT;
use esp_hal::rmt::{PulseCode, Rmt};
use esp_hal::time::Rate;
use esp_hal_smartled::{LedAdapterError, SmartLedsAdapterAsync, buffer_size_async};
use smart_leds::SmartLedsWriteAsync;
use static_cell::make_static;

use strip_animator::{Rgb, StripTransmitter};

use crate::config::LED_COUNT;

/// Channel order applied before the frame reaches the adapter
///
/// The adapter already emits WS2812 GRB wire order. `Gbr` additionally
/// swaps channels for strips wired like the legacy green/blue/red buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOrder {
    Rgb,
    Gbr,
}

impl ColorOrder {
    fn apply(self, color: Rgb) -> Rgb {
        match self {
            Self::Rgb => color,
            // Adapter writes (g, r, b); legacy wiring expects (g, b, r)
            Self::Gbr => Rgb {
                r: color.b,
                g: color.g,
                b: color.r,
            },
        }
    }
}

/// ESP-specific strip transmitter using the RMT peripheral
///
/// This driver uses the ESP32's RMT (Remote Control) peripheral
/// to generate the precise timing signals required by WS2812B LEDs.
/// The channel runs in async mode, so the task suspends while the frame
/// is flushed and the engine's transmit timeout stays effective.
pub struct EspStripTransmitter {
    adapter: SmartLedsAdapterAsync<'static, { buffer_size_async(LED_COUNT) }>,
    color_order: ColorOrder,
}

impl EspStripTransmitter {
    /// Create a new transmitter
    ///
    /// # Arguments
    /// * `rmt` - RMT peripheral
    /// * `pin` - GPIO pin connected to the LED data line
    /// * `color_order` - Channel order expected by the strip wiring
    pub fn new<O>(rmt: RMT<'static>, pin: O, color_order: ColorOrder) -> Self
    where
        O: PeripheralOutput<'static>,
    {
        let rmt = Rmt::new(rmt, Rate::from_mhz(80))
            .expect("RMT peripheral must initialize")
            .into_async();

        // The RMT buffer lives for the entire program
        let rmt_buffer = make_static!([PulseCode::default(); buffer_size_async(LED_COUNT)]);
        let adapter = SmartLedsAdapterAsync::new(rmt.channel0, pin, rmt_buffer);

        Self {
            adapter,
            color_order,
        }
    }
}

impl StripTransmitter<LED_COUNT> for EspStripTransmitter {
    type Error = LedAdapterError;

    async fn transmit(&mut self, frame: &[Rgb; LED_COUNT]) -> Result<(), Self::Error> {
        let order = self.color_order;
        let colors = frame.iter().map(|color| order.apply(*color));
        self.adapter.write(colors).await
    }
}
