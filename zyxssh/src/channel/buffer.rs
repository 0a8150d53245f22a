//! Accumulation buffer for shell output.

use bytes::{BufMut, BytesMut};
use vte::{Parser, Perform};

/// Buffer that accumulates shell text with terminal escapes removed.
///
/// Bytes go through one [`vte::Parser`] for the whole command, so an escape
/// sequence or UTF-8 character split across two reads is still recognised.
/// Printable text plus tab, carriage return and line feed are kept; every
/// other control byte and all escape sequences are dropped.
///
/// The executor's completion heuristic is length-based, so [`len`](Self::len)
/// counts the cleaned bytes rather than what came over the wire.
pub struct OutputBuffer {
    buffer: BytesMut,
    parser: Parser,
}

/// Collects the visible text emitted by the parser.
struct TextSink<'a>(&'a mut BytesMut);

impl Perform for TextSink<'_> {
    fn print(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.0.put_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\t' | b'\r' | b'\n') {
            self.0.put_u8(byte);
        }
    }
}

impl OutputBuffer {
    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            parser: Parser::new(),
        }
    }

    /// Feed newly read bytes, stripping ANSI escape codes.
    pub fn extend(&mut self, data: &[u8]) {
        self.parser.advance(&mut TextSink(&mut self.buffer), data);
    }

    /// Get the buffer contents as a string (lossy UTF-8 conversion).
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    /// Consume the buffer, returning its contents as a string.
    pub fn into_string_lossy(self) -> String {
        self.as_str_lossy().into_owned()
    }

    /// Get the current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::with_capacity(8192)
    }
}

impl std::fmt::Debug for OutputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputBuffer")
            .field("len", &self.buffer.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_interfaces, parse_uptime};

    #[test]
    fn test_basic_extend() {
        let mut buffer = OutputBuffer::default();
        buffer.extend(b"model : NWA50AX\n");
        buffer.extend(b"Router> ");
        assert_eq!(buffer.as_str_lossy(), "model : NWA50AX\nRouter> ");
        assert_eq!(buffer.len(), 24);
    }

    #[test]
    fn test_ansi_stripping() {
        let mut buffer = OutputBuffer::default();
        buffer.extend(b"\x1b[32mGreen text\x1b[0m");
        assert_eq!(buffer.into_string_lossy(), "Green text");
    }

    #[test]
    fn test_escape_split_across_reads() {
        let mut buffer = OutputBuffer::default();
        buffer.extend(b"model : NWA\x1b[3");
        buffer.extend(b"2m50AX\n");
        assert_eq!(buffer.as_str_lossy(), "model : NWA50AX\n");
    }

    #[test]
    fn test_utf8_split_across_reads() {
        let mut buffer = OutputBuffer::default();
        let text = "SSID: Caf\u{e9}\n".as_bytes();
        let split = text.len() - 2;
        buffer.extend(&text[..split]);
        buffer.extend(&text[split..]);
        assert_eq!(buffer.as_str_lossy(), "SSID: Caf\u{e9}\n");
    }

    #[test]
    fn test_tabs_and_line_endings_survive() {
        let mut buffer = OutputBuffer::default();
        buffer.extend(b"1\tlan\tUp\t192.168.1.2\t255.255.255.0\r\n");
        assert_eq!(buffer.as_str_lossy(), "1\tlan\tUp\t192.168.1.2\t255.255.255.0\r\n");

        let network = parse_interfaces(&buffer.into_string_lossy());
        assert_eq!(network.ip_address, "192.168.1.2");
    }

    #[test]
    fn test_tab_separated_uptime() {
        let mut buffer = OutputBuffer::default();
        buffer.extend(b"system uptime:\t3\tdays\t04:05:06\r\n");
        assert_eq!(
            parse_uptime(&buffer.into_string_lossy()),
            3 * 86_400 + 4 * 3_600 + 5 * 60 + 6
        );
    }

    #[test]
    fn test_other_controls_dropped() {
        let mut buffer = OutputBuffer::default();
        buffer.extend(b"ok\x07\x08!");
        assert_eq!(buffer.as_str_lossy(), "ok!");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut buffer = OutputBuffer::default();
        buffer.extend(&[b'o', b'k', 0xff]);
        assert!(buffer.as_str_lossy().starts_with("ok"));
        assert!(!buffer.is_empty());
    }
}
