//! Output buffer for PTY sessions.
//!
//! Raw channel bytes go through a `vte` parser so colour codes, cursor
//! movement and other control sequences never reach the prompt regex or the
//! command output. Prompt detection only looks at the last `search_depth`
//! bytes, so long outputs such as `show interfaces` on a large box stay cheap.

use bytes::BytesMut;
use regex::bytes::Regex;
use vte::{Parser, Perform};

/// Collects printable text emitted by the terminal parser.
struct Printable {
    out: BytesMut,
}

impl Perform for Printable {
    fn print(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\n' | b'\r' | b'\t') {
            self.out.extend_from_slice(&[byte]);
        }
    }
}

/// Accumulates cleaned session output and searches its tail for prompts.
pub struct PromptBuffer {
    parser: Parser,
    text: Printable,
    search_depth: usize,
}

impl PromptBuffer {
    /// Create a buffer that searches the last `search_depth` bytes for prompts.
    pub fn new(search_depth: usize) -> Self {
        Self {
            parser: Parser::new(),
            text: Printable {
                out: BytesMut::with_capacity(4096),
            },
            search_depth,
        }
    }

    /// Feed raw channel bytes. Escape sequences split across calls are
    /// handled because the parser keeps its state.
    pub fn extend(&mut self, data: &[u8]) {
        self.parser.advance(&mut self.text, data);
    }

    /// Find `pattern` in the tail of the buffer.
    ///
    /// Returns `(start, end)` offsets into the full buffer.
    pub fn find_in_tail(&self, pattern: &Regex) -> Option<(usize, usize)> {
        let offset = self.text.out.len().saturating_sub(self.search_depth);
        pattern
            .find(&self.text.out[offset..])
            .map(|m| (offset + m.start(), offset + m.end()))
    }

    /// Take everything accumulated so far, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<u8> {
        self.text.out.split().to_vec()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.text.out
    }

    pub fn len(&self) -> usize {
        self.text.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.out.is_empty()
    }
}

impl Default for PromptBuffer {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let mut buffer = PromptBuffer::new(100);
        buffer.extend(b"eth0  192.0.2.1/24\r\n");
        assert_eq!(buffer.as_slice(), b"eth0  192.0.2.1/24\r\n");
    }

    #[test]
    fn test_colour_codes_removed() {
        let mut buffer = PromptBuffer::new(100);
        buffer.extend(b"\x1b[32mu/u\x1b[0m");
        assert_eq!(buffer.as_slice(), b"u/u");
    }

    #[test]
    fn test_escape_split_across_chunks() {
        let mut buffer = PromptBuffer::new(100);
        buffer.extend(b"up\x1b[");
        buffer.extend(b"0mdown");
        assert_eq!(buffer.as_slice(), b"updown");
    }

    #[test]
    fn test_prompt_found_in_tail() {
        let mut buffer = PromptBuffer::new(20);
        buffer.extend(&[b'x'; 200]);
        buffer.extend(b"\nvyos@vyos:~$ ");

        let pattern = Regex::new(r"vyos@vyos:~\$\s*$").unwrap();
        let (start, end) = buffer.find_in_tail(&pattern).unwrap();
        assert_eq!(&buffer.as_slice()[start..end], b"vyos@vyos:~$ ");
    }

    #[test]
    fn test_prompt_outside_tail_ignored() {
        let mut buffer = PromptBuffer::new(10);
        buffer.extend(b"vyos@vyos:~$ ");
        buffer.extend(&[b'x'; 100]);

        let pattern = Regex::new(r"vyos@vyos").unwrap();
        assert!(buffer.find_in_tail(&pattern).is_none());
    }

    #[test]
    fn test_take_empties_buffer() {
        let mut buffer = PromptBuffer::default();
        buffer.extend(b"show interfaces");
        assert_eq!(buffer.take(), b"show interfaces");
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }
}
