#![no_std]
#![no_main]

use defmt::{error, info, warn};
use defmt_rtt as _;
use desk_bridge::{
    BridgeEvent, DeskBridge, GpioButtonLines, IoLink, Tick, DEFAULT_CONFIG,
};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use embassy_time::Delay;
use static_cell::StaticCell;

#[cfg(feature = "host-usb")]
use desk_bridge::{configure_cdc_acm, usb_host, HostPipe, PipeLink};
#[cfg(feature = "host-usb")]
use embassy_rp::peripherals::USB;
#[cfg(feature = "host-usb")]
use embassy_rp::usb::Driver;
#[cfg(feature = "host-usb")]
use embassy_sync::pipe::Pipe;
#[cfg(feature = "host-usb")]
use embassy_usb::class::cdc_acm::{Receiver, Sender, State};
#[cfg(feature = "host-usb")]
use embassy_usb::{Builder, Config as UsbConfig};

#[cfg(feature = "host-uart")]
use embassy_rp::peripherals::UART0;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

#[cfg(feature = "host-usb")]
bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

#[cfg(feature = "host-uart")]
bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

#[cfg(feature = "host-usb")]
type HostLink = PipeLink<'static>;
#[cfg(feature = "host-uart")]
type HostLink = IoLink<BufferedUart>;

type Bridge = DeskBridge<HostLink, IoLink<BufferedUart>, GpioButtonLines<Output<'static>>>;

/// Desk UART buffers.
static DESK_TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static DESK_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Host-to-bridge and bridge-to-host byte pipes.
#[cfg(feature = "host-usb")]
static HOST_RX: HostPipe = Pipe::new();
#[cfg(feature = "host-usb")]
static HOST_TX: HostPipe = Pipe::new();

/// USB device configuration buffers.
#[cfg(feature = "host-usb")]
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
#[cfg(feature = "host-usb")]
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
#[cfg(feature = "host-usb")]
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
#[cfg(feature = "host-usb")]
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// CDC-ACM state.
#[cfg(feature = "host-usb")]
static CDC_STATE: StaticCell<State> = StaticCell::new();

/// Host UART buffers.
#[cfg(feature = "host-uart")]
static HOST_TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
#[cfg(feature = "host-uart")]
static HOST_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Desk bridge starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());
    let config = DEFAULT_CONFIG;

    // --- Button lines (idle high, so nothing is pressed during boot) ---
    let lines = GpioButtonLines::new(
        Output::new(p.PIN_10, Level::High), // D5
        Output::new(p.PIN_11, Level::High), // D6
        Output::new(p.PIN_12, Level::High), // D7
        Output::new(p.PIN_13, Level::High), // M
    );

    // --- Desk UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.baud_rate;

    let desk_uart = BufferedUart::new(
        p.UART1,
        p.PIN_4, // TX
        p.PIN_5, // RX
        Irqs,
        DESK_TX_BUF.init([0; 64]),
        DESK_RX_BUF.init([0; 64]),
        uart_config,
    );
    let desk_link = IoLink::new(desk_uart);

    // --- Host Link Setup ---
    #[cfg(feature = "host-usb")]
    let host_link = {
        let usb_driver = Driver::new(p.USB, Irqs);

        let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
        usb_config.manufacturer = Some("Desk Bridge");
        usb_config.product = Some("Desk Serial Bridge");
        usb_config.serial_number = Some("001");
        usb_config.max_power = 100;
        usb_config.max_packet_size_0 = 64;

        let mut builder = Builder::new(
            usb_driver,
            usb_config,
            CONFIG_DESCRIPTOR.init([0; 256]),
            BOS_DESCRIPTOR.init([0; 256]),
            MSOS_DESCRIPTOR.init([0; 256]),
            CONTROL_BUF.init([0; 64]),
        );

        let cdc_state = CDC_STATE.init(State::new());
        let class = configure_cdc_acm(&mut builder, cdc_state);
        let (sender, receiver) = class.split();
        let usb_device = builder.build();

        spawner.spawn(usb_task(usb_device).unwrap());
        spawner.spawn(host_rx_task(receiver).unwrap());
        spawner.spawn(host_tx_task(sender).unwrap());

        PipeLink::new(&HOST_RX, &HOST_TX)
    };

    #[cfg(feature = "host-uart")]
    let host_link = {
        let mut host_config = UartConfig::default();
        host_config.baudrate = config.baud_rate;

        IoLink::new(BufferedUart::new(
            p.UART0,
            p.PIN_0, // TX
            p.PIN_1, // RX
            Irqs,
            HOST_TX_BUF.init([0; 64]),
            HOST_RX_BUF.init([0; 64]),
            host_config,
        ))
    };

    // On-board LED flags dropped packets
    let led = Output::new(p.PIN_25, Level::Low);

    let bridge = DeskBridge::with_config(host_link, desk_link, lines, config);
    spawner.spawn(bridge_task(bridge, led).unwrap());

    info!("Desk bridge initialized, forwarding...");
}

/// USB device task - runs the USB stack.
#[cfg(feature = "host-usb")]
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Host receive task - moves CDC packets from the host into the bridge's pipe.
#[cfg(feature = "host-usb")]
#[embassy_executor::task]
async fn host_rx_task(receiver: Receiver<'static, Driver<'static, USB>>) {
    usb_host::pump_from_host(receiver, &HOST_RX).await
}

/// Host transmit task - sends bridge output to the host.
#[cfg(feature = "host-usb")]
#[embassy_executor::task]
async fn host_tx_task(sender: Sender<'static, Driver<'static, USB>>) {
    usb_host::pump_to_host(sender, &HOST_TX).await
}

/// Bridge task - releases all lines, then ticks forever.
#[embassy_executor::task]
async fn bridge_task(mut bridge: Bridge, mut led: Output<'static>) {
    if let Err(e) = bridge.reset() {
        error!("Failed to release button lines: {:?}", e);
    }

    let mut delay = Delay;
    loop {
        match bridge.tick(&mut delay).await {
            Ok(Tick {
                event: Some(BridgeEvent::Rejected { .. } | BridgeEvent::PacketTimedOut),
                ..
            }) => {
                // Toggle LED to indicate a dropped packet
                led.toggle();
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Bridge error: {:?}", e);
            }
        }
    }
}
