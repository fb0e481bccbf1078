//! End-to-end console sessions over an in-memory transport

mod common;

use board_console::config::{INPUT_CAPACITY, VERSION};
use board_console::console::line_buffer::ERASED;
use board_console::hal::{PinId, Status};
use board_console::logging::LogLevel;
use board_console::{ConsoleError, Poll};

use common::{drain_log, echo_console, quiet_console, reply_lines, type_line, TestPort};

fn pin(number: u32) -> PinId {
    PinId::new(number).unwrap()
}

#[test]
fn test_banner_is_one_line() {
    let (mut console, log) = quiet_console();
    let mut port = TestPort::new();

    console.start(&mut port);

    let output = port.output();
    assert!(VERSION.starts_with("BoardConsole v"));
    assert_eq!(output, format!("{} console, type 'help'\r\n", VERSION));
    assert_eq!(output.matches("\r\n").count(), 1);
    assert!(drain_log(log).iter().any(|r| r.message() == "console started"));
}

#[test]
fn test_gpio_session() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    let polls = type_line(&mut console, &mut port, "gpio 4 on\r");
    assert_eq!(polls.last(), Some(&Poll::Line(Ok(()))));
    assert_eq!(port.take_output(), "\r\n\r\nack gpio on\r\n");
    assert!(console.interpreter().pins().level(pin(4)));

    type_line(&mut console, &mut port, "gpio 4 get\r");
    assert_eq!(reply_lines(&port.take_output()), ["ack gpio value=0x1"]);

    type_line(&mut console, &mut port, "gpio 4 off\r");
    assert_eq!(reply_lines(&port.take_output()), ["ack gpio off"]);
    assert!(!console.interpreter().pins().level(pin(4)));
}

#[test]
fn test_bad_gpio_line_reports_error_only() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    let polls = type_line(&mut console, &mut port, "gpio abc xyz\r");

    assert_eq!(polls.last(), Some(&Poll::Line(Err(ConsoleError::InvalidValue))));
    assert_eq!(reply_lines(&port.output()), ["#Error during gpio"]);
    assert_eq!(console.interpreter().pins().calls(), 0);
}

#[test]
fn test_i2c_session() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    type_line(&mut console, &mut port, "2write 50 0010 ff\r");
    assert_eq!(reply_lines(&port.take_output()), ["ack 2write 50 10 ff"]);

    type_line(&mut console, &mut port, "2read 50 0010\r");
    assert_eq!(reply_lines(&port.take_output()), ["ack 2read 0x50 0x10 value=0xff"]);

    console.interpreter_mut().bus_mut().fail_with(Some(Status::NO_ACKNOWLEDGE));
    type_line(&mut console, &mut port, "2write 50 0010 ff\r");
    assert_eq!(
        reply_lines(&port.take_output()),
        ["#Error during 2write 50 10 ff result: 3"]
    );
}

#[test]
fn test_help_session_lists_every_command() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    type_line(&mut console, &mut port, "help\r");

    let output = port.output();
    let lines = reply_lines(&output);
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("help:"));
    assert!(lines[1].starts_with("gpio "));
    assert!(lines[2].starts_with("2write "));
    assert!(lines[3].starts_with("2read "));
}

#[test]
fn test_echo() {
    let (mut console, _) = echo_console();
    let mut port = TestPort::new();

    type_line(&mut console, &mut port, "gpio 1 on\r");

    assert_eq!(port.output(), "gpio 1 on\r\r\n\r\nack gpio on\r\n");
}

#[test]
fn test_backspace_edits_line() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    type_line(&mut console, &mut port, "gpio 1 onx\x08");
    assert_eq!(console.line().as_str(), "gpio 1 on");
    assert_eq!(console.line().slot(9), Some(ERASED));

    type_line(&mut console, &mut port, "\r");
    assert_eq!(reply_lines(&port.output()), ["ack gpio on"]);
}

#[test]
fn test_delete_acts_as_backspace() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    type_line(&mut console, &mut port, "helpp\x7f\r");
    assert_eq!(reply_lines(&port.output()).len(), 4);
}

#[test]
fn test_backspace_on_empty_line() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    type_line(&mut console, &mut port, "\x08\x08");
    assert!(console.line().is_empty());

    type_line(&mut console, &mut port, "gpio 1 on\r");
    assert_eq!(reply_lines(&port.output()), ["ack gpio on"]);
}

#[test]
fn test_overlong_line_is_truncated() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    let mut line = String::from("gpio 3 on");
    while line.len() < INPUT_CAPACITY {
        line.push(' ');
    }
    line.push_str("xxxxx");

    type_line(&mut console, &mut port, &line);
    assert_eq!(console.line().len(), INPUT_CAPACITY);

    type_line(&mut console, &mut port, "\r");
    assert_eq!(reply_lines(&port.output()), ["ack gpio on"]);
    assert!(console.line().is_empty());
}

#[test]
fn test_overflow_then_unknown_command() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    let line = "a".repeat(INPUT_CAPACITY + 5) + "\r";
    let polls = type_line(&mut console, &mut port, &line);

    assert_eq!(polls.last(), Some(&Poll::Line(Err(ConsoleError::UnknownCommand))));
    assert!(console.line().is_empty());
}

#[test]
fn test_crlf_terminated_line() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    let polls = type_line(&mut console, &mut port, "gpio 2 on\r\n");

    assert_eq!(polls.iter().filter(|p| matches!(p, Poll::Line(_))).count(), 1);
    assert_eq!(reply_lines(&port.output()), ["ack gpio on"]);
    assert!(console.line().is_empty());
}

#[test]
fn test_empty_line_writes_line_break_only() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    assert_eq!(console.process_byte(b'\r', &mut port), None);
    assert_eq!(console.process_byte(b' ', &mut port), None);
    assert_eq!(console.process_byte(b'\r', &mut port), None);

    assert_eq!(port.output(), "\r\n\r\n");
}

#[test]
fn test_line_wiped_after_dispatch() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    type_line(&mut console, &mut port, "2read 50 0010\r");

    assert!(console.line().is_empty());
    assert!((0..INPUT_CAPACITY).all(|i| console.line().slot(i) == Some(0)));
}

#[test]
fn test_poll_idle_without_input() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    assert_eq!(console.poll(&mut port), Poll::Idle);

    port.feed(b"h");
    assert_eq!(console.poll(&mut port), Poll::Byte);
    assert_eq!(console.poll(&mut port), Poll::Idle);
}

#[test]
fn test_failed_command_is_logged() {
    let (mut console, log) = quiet_console();
    let mut port = TestPort::new();

    type_line(&mut console, &mut port, "gpio 1 on\r");
    type_line(&mut console, &mut port, "2read zz 0010\r");

    let records = drain_log(log);
    assert!(records
        .iter()
        .any(|r| r.level == LogLevel::Debug && r.message() == "'gpio 1 on' ok"));
    assert!(records
        .iter()
        .any(|r| r.level == LogLevel::Warn && r.message() == "'2read zz 0010' E03: invalid value"));
}

#[test]
fn test_write_failures_are_logged_not_fatal() {
    let (mut console, log) = quiet_console();
    let mut port = TestPort::new();

    port.fail_writes(true);
    let polls = type_line(&mut console, &mut port, "gpio 6 on\r");

    assert_eq!(polls.last(), Some(&Poll::Line(Ok(()))));
    assert!(console.interpreter().pins().level(pin(6)));
    assert!(drain_log(log)
        .iter()
        .any(|r| r.level == LogLevel::Error && r.message().starts_with("transport write failed")));

    port.fail_writes(false);
    type_line(&mut console, &mut port, "gpio 6 get\r");
    assert_eq!(reply_lines(&port.output()), ["ack gpio value=0x1"]);
}

#[test]
fn test_same_line_twice_same_reply() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    type_line(&mut console, &mut port, "2write 1a 0001 02\r");
    let first = port.take_output();
    type_line(&mut console, &mut port, "2write 1a 0001 02\r");
    let second = port.take_output();

    assert_eq!(first, second);
}

#[test]
fn test_stray_byte_after_parameters() {
    let (mut console, _) = quiet_console();
    let mut port = TestPort::new();

    port.feed(b"2write 50 0010 ff \xff\r");
    while console.poll(&mut port) != Poll::Idle {}

    assert_eq!(reply_lines(&port.output()), ["ack 2write 50 10 ff"]);
    assert_eq!(console.interpreter().bus().register(0x50, 0x0010), Some(0xFF));
}
