//! Log drain: turns queued records into text lines.
//!
//! The device runs this from a low-priority thread writing to a TX-only
//! UART, the host build writes to stderr. The sink decides where bytes go.

use crate::logging::{format_to_buffer, LogRecord, LogStream};

/// Largest formatted line: prefix + level + message + CRLF.
pub const LINE_BUF_LEN: usize = 160;

/// Format a record.
///
/// Format: `[timestamp_us] LEVEL: message\r\n`
pub fn format_record(record: &LogRecord, buf: &mut [u8]) -> usize {
    format_to_buffer(
        buf,
        format_args!(
            "[{:10}] {}: {}\r\n",
            record.timestamp_us,
            record.level.as_str(),
            record.message()
        ),
    )
}

/// Drain every published record into `sink`, one formatted line per call.
///
/// Returns the number of records written.
pub fn drain_into<const N: usize>(stream: &LogStream<N>, mut sink: impl FnMut(&[u8])) -> usize {
    let mut buf = [0u8; LINE_BUF_LEN];
    let mut count = 0;

    while let Some(record) = stream.drain() {
        let len = format_record(&record, &mut buf);
        sink(&buf[..len]);
        count += 1;
    }

    count
}

/// Emit one warning line if records were dropped since the last report.
///
/// Returns the number of dropped records reported.
pub fn report_dropped<const N: usize>(stream: &LogStream<N>, mut sink: impl FnMut(&[u8])) -> u32 {
    let dropped = stream.take_dropped();
    if dropped > 0 {
        let mut buf = [0u8; 64];
        let len = format_to_buffer(&mut buf, format_args!("[WARN] Dropped: {}\r\n", dropped));
        sink(&buf[..len]);
    }
    dropped
}
