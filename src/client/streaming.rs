//! Incremental UTF-8 decoding for streamed response bodies
//!
//! HTTP chunk boundaries do not respect code point boundaries, so a reply
//! containing multi-byte characters can arrive split across two chunks.
//! [`Utf8ChunkDecoder`] carries the incomplete tail over to the next push.

const REPLACEMENT: char = '\u{FFFD}';

/// Stateful decoder fed with raw body chunks
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    pending: Vec<u8>,
}

impl Utf8ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode as much of `bytes` (plus any carried-over tail) as possible.
    ///
    /// Invalid sequences become U+FFFD. A trailing incomplete sequence is
    /// held back until the next call or [`finish`](Self::finish).
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);

        let mut out = String::with_capacity(self.pending.len());
        let mut start = 0;
        while start < self.pending.len() {
            let rest = &self.pending[start..];
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    start = self.pending.len();
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&rest[..valid]));
                    match err.error_len() {
                        Some(bad) => {
                            out.push(REPLACEMENT);
                            start += valid + bad;
                        }
                        None => {
                            start += valid;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..start);
        out
    }

    /// Flush at end of stream. An unfinished sequence decodes to one U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            REPLACEMENT.to_string()
        }
    }

    /// Number of bytes waiting for the rest of their code point
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
