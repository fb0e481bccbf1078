//! Command line parser
//!
//! Splits the keyword off the raw line. Handlers walk the remainder with
//! [`ParsedCommand::arg`] and decode numeric tokens with the helpers below.

/// Stands in for a token that is not valid UTF-8. It never parses as a
/// number or keyword.
pub const NOT_TEXT: &str = "\u{FFFD}";

/// Parsed command line
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// The command keyword (first token)
    pub command: &'a str,
    /// Raw bytes after the keyword, leading whitespace removed
    pub rest: &'a [u8],
}

impl<'a> ParsedCommand<'a> {
    /// Create empty command
    pub const fn empty() -> Self {
        Self { command: "", rest: &[] }
    }

    /// Parameters after the keyword, split on whitespace
    pub fn params(&self) -> impl Iterator<Item = &'a str> {
        tokens(self.rest).map(token_text)
    }

    /// Get parameter by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.params().nth(idx)
    }

    /// Number of parameters on the line
    pub fn count(&self) -> usize {
        tokens(self.rest).count()
    }
}

fn tokens(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    bytes.split(u8::is_ascii_whitespace).filter(|t| !t.is_empty())
}

fn token_text(token: &[u8]) -> &str {
    core::str::from_utf8(token).unwrap_or(NOT_TEXT)
}

/// Parse a command line into keyword and raw remainder.
///
/// Bytes that are not UTF-8 only spoil the token they appear in.
pub fn parse_line(line: &[u8]) -> ParsedCommand<'_> {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let line = &line[start..];

    let keyword_len = line
        .iter()
        .position(u8::is_ascii_whitespace)
        .unwrap_or(line.len());
    let (keyword, rest) = line.split_at(keyword_len);

    let rest_start = rest
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(rest.len());

    ParsedCommand {
        command: if keyword.is_empty() { "" } else { token_text(keyword) },
        rest: &rest[rest_start..],
    }
}

/// Decimal number, digits only
pub fn parse_decimal(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Hex digits with optional `0x` prefix, any width up to 32 bits
fn parse_hex(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Hex byte; values above `ff` are rejected
pub fn parse_hex_u8(token: &str) -> Option<u8> {
    parse_hex(token).and_then(|v| u8::try_from(v).ok())
}

/// Hex 16-bit word; values above `ffff` are rejected
pub fn parse_hex_u16(token: &str) -> Option<u16> {
    parse_hex(token).and_then(|v| u16::try_from(v).ok())
}
