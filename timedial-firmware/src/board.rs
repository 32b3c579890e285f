//! Board wiring
//!
//! | Signal        | GPIO | Notes                        |
//! |---------------|------|------------------------------|
//! | Encoder A     | 2    | pull-up, both edges          |
//! | Encoder B     | 3    | pull-up, both edges          |
//! | Button        | 4    | pull-up, active low          |
//! | UART0 TX      | 0    | host link, 115200 8N1        |
//! | UART0 RX      | 1    |                              |
//! | I2C0 SDA      | 20   | SSD1306 at 0x3C              |
//! | I2C0 SCL      | 21   |                              |

use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, Async, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartRx, BufferedUartTx, Config as UartConfig, Uart};
use embassy_rp::Peripherals;
use static_cell::StaticCell;

use timedial_display::Ssd1306;
use timedial_hal::{EmbeddedHalBus, I2cConfig};

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

/// Host link baud rate
pub const HOST_BAUDRATE: u32 = 115_200;

/// UART ring buffer size, each direction
const UART_BUF_SIZE: usize = 128;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();

/// Interrupt-driven I2C master driving the panel
pub type DisplayBus = EmbeddedHalBus<I2c<'static, I2C0, Async>>;

/// The status panel
pub type Display = Ssd1306<DisplayBus>;

/// Everything the firmware needs from the chip
pub struct Board {
    pub encoder_a: Input<'static>,
    pub encoder_b: Input<'static>,
    pub button: Input<'static>,
    pub display: Display,
    pub host_tx: BufferedUartTx,
    pub host_rx: BufferedUartRx,
}

impl Board {
    /// Claim and configure the peripherals
    ///
    /// Must be called once; the UART buffers are static.
    pub fn init(p: Peripherals) -> Self {
        let encoder_a = Input::new(p.PIN_2, Pull::Up);
        let encoder_b = Input::new(p.PIN_3, Pull::Up);
        let button = Input::new(p.PIN_4, Pull::Up);

        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = I2cConfig::FAST.frequency;
        let i2c = I2c::new_async(p.I2C0, p.PIN_21, p.PIN_20, Irqs, i2c_config);
        let display = Ssd1306::new(EmbeddedHalBus::new(i2c));

        let mut uart_config = UartConfig::default();
        uart_config.baudrate = HOST_BAUDRATE;
        let tx_buf = TX_BUF.init([0u8; UART_BUF_SIZE]);
        let rx_buf = RX_BUF.init([0u8; UART_BUF_SIZE]);
        let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
        let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
        let (host_tx, host_rx) = uart.split();

        Self {
            encoder_a,
            encoder_b,
            button,
            display,
            host_tx,
            host_rx,
        }
    }
}
