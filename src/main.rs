//! BoardConsole - Main entry point
//!
//! On the device:
//! 1. Take peripherals (console UART0, log UART1, I2C0, test pins)
//! 2. Start the log drain thread
//! 3. Serve the console on the main task forever
//!
//! On a host the same console runs over stdin/stdout with simulated
//! pins and bus, which is handy for trying command syntax.

#[cfg(target_os = "espidf")]
fn main() {
    if let Err(err) = device::run() {
        // The console port may not exist yet, so this goes to the IDF console.
        println!("console bring-up failed: {err}");
        unsafe {
            esp_idf_svc::sys::esp_restart();
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    host::run()
}

#[cfg(target_os = "espidf")]
mod device {
    use esp_idf_svc::hal::delay::{FreeRtos, NON_BLOCK};
    use esp_idf_svc::hal::gpio::{AnyIOPin, IOPin, InputOutput, PinDriver};
    use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::uart::{self, UartDriver, UartTxDriver};
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::sys::EspError;

    use board_console::hal::{DigitalPins, I2cBus, PinId, Transport};
    use board_console::{log_drain, log_error, log_warn, BoardConfig, Console, ConsoleConfig, CONSOLE_LOG};

    /// Pins reachable through the `gpio` command
    const CONSOLE_PINS: usize = 4;

    type Pin = PinDriver<'static, AnyIOPin, InputOutput>;

    /// Operator UART as a console transport
    struct UartPort(UartDriver<'static>);

    impl Transport for UartPort {
        type Error = EspError;

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
            self.0.read(buf, NON_BLOCK)
        }

        fn write_all(&mut self, mut data: &[u8]) -> Result<(), EspError> {
            while !data.is_empty() {
                let written = self.0.write(data)?;
                data = &data[written..];
            }
            Ok(())
        }
    }

    fn uptime_us() -> i64 {
        // SAFETY: esp_timer_get_time is always safe to call
        unsafe { esp_idf_svc::sys::esp_timer_get_time() }
    }

    fn attach(bank: &mut DigitalPins<Pin, CONSOLE_PINS>, number: u32, pin: AnyIOPin) -> Result<(), EspError> {
        let driver = PinDriver::input_output(pin)?;
        let attached = PinId::new(number).map(|id| bank.attach(id, driver).is_ok());
        if attached != Some(true) {
            log_warn!(CONSOLE_LOG, uptime_us(), "GPIO{} not attached", number);
        }
        Ok(())
    }

    pub fn run() -> Result<(), EspError> {
        esp_idf_svc::sys::link_patches();

        let board = BoardConfig::default();
        let p = Peripherals::take()?;

        let console_uart = UartDriver::new(
            p.uart0,
            p.pins.gpio43,
            p.pins.gpio44,
            Option::<AnyIOPin>::None, // CTS
            Option::<AnyIOPin>::None, // RTS
            &uart::config::Config::default().baudrate(Hertz(board.console_baud)),
        )?;

        // GPIO6 - log TX (Quad flash boards only, conflicts with Octal PSRAM)
        let mut log_uart = UartTxDriver::new(
            p.uart1,
            p.pins.gpio6,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &uart::config::Config::default().baudrate(Hertz(board.log_baud)),
        )?;

        let i2c = I2cDriver::new(
            p.i2c0,
            p.pins.gpio8,
            p.pins.gpio9,
            &I2cConfig::new().baudrate(Hertz(board.i2c_hz)),
        )?;

        let mut pins: DigitalPins<Pin, CONSOLE_PINS> = DigitalPins::new();
        attach(&mut pins, 4, p.pins.gpio4.downgrade())?;
        attach(&mut pins, 5, p.pins.gpio5.downgrade())?;
        attach(&mut pins, 15, p.pins.gpio15.downgrade())?;
        attach(&mut pins, 16, p.pins.gpio16.downgrade())?;

        let drain = std::thread::Builder::new()
            .name("log-drain".into())
            .stack_size(4096)
            .spawn(move || loop {
                log_drain::drain_into(&CONSOLE_LOG, |bytes| {
                    let _ = log_uart.write(bytes);
                });
                log_drain::report_dropped(&CONSOLE_LOG, |bytes| {
                    let _ = log_uart.write(bytes);
                });
                FreeRtos::delay_ms(10);
            });
        if let Err(err) = drain {
            log_error!(CONSOLE_LOG, uptime_us(), "log drain not started: {}", err);
        }

        let config = ConsoleConfig {
            clock: uptime_us,
            ..ConsoleConfig::default()
        };
        let console = Console::new(pins, I2cBus::new(i2c), config);
        let mut port = UartPort(console_uart);

        // One tick lets the idle task feed the watchdog.
        console.run(&mut port, || FreeRtos::delay_ms(1))
    }
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::io::{self, Read, Write};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc::{self, Receiver, TryRecvError};
    use std::sync::{Arc, OnceLock};
    use std::thread;
    use std::time::{Duration, Instant};

    use board_console::hal::{SimBus, SimPins, Transport};
    use board_console::{log_drain, Console, ConsoleConfig, CONSOLE_LOG};

    /// stdin/stdout as a console transport.
    ///
    /// A reader thread feeds bytes through a channel so reads never block.
    /// Terminals send LF on enter, the console expects CR.
    struct StdioPort {
        rx: Receiver<u8>,
        closed: Arc<AtomicBool>,
        out: io::Stdout,
    }

    impl StdioPort {
        fn open() -> Self {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                for byte in io::stdin().lock().bytes() {
                    let Ok(byte) = byte else { break };
                    let byte = if byte == b'\n' { b'\r' } else { byte };
                    if tx.send(byte).is_err() {
                        break;
                    }
                }
            });

            Self {
                rx,
                closed: Arc::new(AtomicBool::new(false)),
                out: io::stdout(),
            }
        }
    }

    impl Transport for StdioPort {
        type Error = io::Error;

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
            let Some(first) = buf.first_mut() else {
                return Ok(0);
            };
            match self.rx.try_recv() {
                Ok(byte) => {
                    *first = byte;
                    Ok(1)
                }
                Err(TryRecvError::Empty) => Ok(0),
                Err(TryRecvError::Disconnected) => {
                    // Only reported once every queued byte was read.
                    self.closed.store(true, Ordering::Release);
                    Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
                }
            }
        }

        fn write_all(&mut self, data: &[u8]) -> Result<(), io::Error> {
            self.out.write_all(data)?;
            self.out.flush()
        }
    }

    fn uptime_us() -> i64 {
        static START: OnceLock<Instant> = OnceLock::new();
        let elapsed = START.get_or_init(Instant::now).elapsed();
        i64::try_from(elapsed.as_micros()).unwrap_or(i64::MAX)
    }

    fn flush_log() {
        let mut err = io::stderr();
        log_drain::drain_into(&CONSOLE_LOG, |bytes| {
            let _ = err.write_all(bytes);
        });
        log_drain::report_dropped(&CONSOLE_LOG, |bytes| {
            let _ = err.write_all(bytes);
        });
    }

    pub fn run() {
        let mut port = StdioPort::open();
        let closed = Arc::clone(&port.closed);

        // The terminal already echoes in cooked mode.
        let config = ConsoleConfig {
            echo: false,
            clock: uptime_us,
            ..ConsoleConfig::default()
        };
        let console = Console::new(SimPins::new(), SimBus::new(), config);

        console.run(&mut port, move || {
            flush_log();
            if closed.load(Ordering::Acquire) {
                std::process::exit(0);
            }
            thread::sleep(Duration::from_millis(1));
        })
    }
}
