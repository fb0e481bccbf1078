//! Non-blocking logging for the console worker.
//!
//! ```text
//! Console worker        LogStream            Log drain task
//! ──────────────        ─────────            ──────────────
//!
//! log_warn!() ────────▶ [R0][R1][R2] ──────▶ log UART / stderr
//! never blocks          bounded ring         blocking ok
//! ```
//!
//! Records are dropped (and counted) when the ring is full. Producers
//! never wait on the drain.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 120;

/// Log ring size (number of records).
pub const LOG_BUFFER_SIZE: usize = 64;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single log record.
#[derive(Clone, Copy)]
pub struct LogRecord {
    /// Timestamp in microseconds, as reported by the console clock.
    pub timestamp_us: i64,
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogRecord {
    const EMPTY: LogRecord = LogRecord {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text, lossy on invalid UTF-8.
    pub fn message(&self) -> &str {
        let bytes = &self.msg[..self.len as usize];
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            // Truncation may split a multi-byte character.
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
        }
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self::EMPTY
    }
}

struct Slot {
    /// Position this slot is ready for: `pos` when free for the producer
    /// claiming `pos`, `pos + 1` once the record at `pos` is published.
    stamp: AtomicU32,
    record: UnsafeCell<LogRecord>,
}

/// Bounded multi-producer, single-consumer log ring.
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    slots: [Slot; N],
    head: AtomicU32,
    tail: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: a slot's record is only touched by the producer that claimed it
// through `head`, or by the single consumer after the stamp published it.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    #[allow(clippy::declare_interior_mutable_const)]
    const FREE_SLOT: Slot = Slot {
        stamp: AtomicU32::new(0),
        record: UnsafeCell::new(LogRecord::EMPTY),
    };

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        let mut slots = [Self::FREE_SLOT; N];
        let mut i = 0;
        while i < N {
            slots[i].stamp = AtomicU32::new(i as u32);
            i += 1;
        }

        Self {
            slots,
            head: AtomicU32::new(0),
            tail: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a record. Never blocks.
    ///
    /// Returns `true` if queued, `false` if dropped because the ring is full.
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let mut pos = self.head.load(Ordering::Relaxed);

        loop {
            let slot = &self.slots[pos as usize & Self::MASK];
            let stamp = slot.stamp.load(Ordering::Acquire);
            let lag = stamp.wrapping_sub(pos) as i32;

            if lag == 0 {
                match self.head.compare_exchange_weak(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => {
                        let len = msg.len().min(MAX_MSG_LEN);
                        // SAFETY: winning the exchange gives this producer the
                        // slot until the stamp below publishes it.
                        unsafe {
                            let record = &mut *slot.record.get();
                            record.timestamp_us = timestamp_us;
                            record.level = level;
                            record.len = len as u8;
                            record.msg[..len].copy_from_slice(&msg[..len]);
                        }
                        slot.stamp.store(pos.wrapping_add(1), Ordering::Release);
                        return true;
                    }
                    Err(current) => pos = current,
                }
            } else if lag < 0 {
                // Slot still holds an undrained record from the previous lap.
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            } else {
                pos = self.head.load(Ordering::Relaxed);
            }
        }
    }

    /// Take the oldest published record.
    ///
    /// Single consumer only.
    pub fn drain(&self) -> Option<LogRecord> {
        let pos = self.tail.load(Ordering::Relaxed);
        let slot = &self.slots[pos as usize & Self::MASK];

        if slot.stamp.load(Ordering::Acquire) != pos.wrapping_add(1) {
            return None;
        }

        // SAFETY: the stamp says the producer finished with this slot and
        // no producer can reclaim it before the store below.
        let record = unsafe { *slot.record.get() };

        slot.stamp.store(pos.wrapping_add(N as u32), Ordering::Release);
        self.tail.store(pos.wrapping_add(1), Ordering::Relaxed);
        Some(record)
    }

    /// Get count of dropped messages.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Read and reset the dropped counter.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }

    /// Records claimed but not yet drained.
    pub fn pending(&self) -> u32 {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        head.wrapping_sub(tail)
    }

    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer, truncating at the end of it.
///
/// Returns the number of bytes written.
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Truncating `fmt::Write` over a byte slice
struct BufWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl core::fmt::Write for BufWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Log to a stream.
///
/// ```ignore
/// log_at!(LogLevel::Info, CONSOLE_LOG, timestamp, "pin {} set", pin);
/// ```
#[macro_export]
macro_rules! log_at {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($timestamp, $level, &buf[..len]);
    }};
}

#[macro_export]
macro_rules! log_error {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::LogLevel::Error, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::LogLevel::Debug, $stream, $timestamp, $($arg)*)
    };
}
