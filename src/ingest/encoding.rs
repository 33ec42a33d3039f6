use encoding_rs::{DecoderResult, Encoding, UTF_8};

/// Guesses the text encoding of a file from a prefix of its bytes.
///
/// Implementations never fail: when nothing can be decided they return their
/// fallback encoding.
pub trait EncodingDetector: Send + Sync {
    fn detect(&self, prefix: &[u8]) -> &'static Encoding;
}

/// Detector used when no sniffing is wanted; always answers with the fallback.
pub struct NoopDetector {
    fallback: &'static Encoding,
}

impl NoopDetector {
    pub fn new(fallback: &'static Encoding) -> Self {
        Self { fallback }
    }
}

impl EncodingDetector for NoopDetector {
    fn detect(&self, _prefix: &[u8]) -> &'static Encoding {
        self.fallback
    }
}

/// BOM, then UTF-8 validity, then the first candidate that decodes cleanly.
pub struct SniffingDetector {
    candidates: Vec<&'static Encoding>,
    fallback: &'static Encoding,
}

impl SniffingDetector {
    pub fn new(candidates: Vec<&'static Encoding>, fallback: &'static Encoding) -> Self {
        Self {
            candidates,
            fallback,
        }
    }
}

impl Default for SniffingDetector {
    fn default() -> Self {
        Self::new(vec![encoding_rs::BIG5, encoding_rs::GBK], UTF_8)
    }
}

impl EncodingDetector for SniffingDetector {
    fn detect(&self, prefix: &[u8]) -> &'static Encoding {
        if let Some((encoding, _)) = Encoding::for_bom(prefix) {
            return encoding;
        }
        if is_utf8_prefix(prefix) {
            return UTF_8;
        }
        self.candidates
            .iter()
            .copied()
            .find(|encoding| decodes_cleanly(encoding, prefix))
            .unwrap_or(self.fallback)
    }
}

/// Valid UTF-8, allowing a multi-byte sequence cut off at the end of the prefix.
fn is_utf8_prefix(prefix: &[u8]) -> bool {
    match std::str::from_utf8(prefix) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

fn decodes_cleanly(encoding: &'static Encoding, prefix: &[u8]) -> bool {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(prefix.len())
        .unwrap_or(prefix.len() * 3 + 16);
    let mut out = String::with_capacity(capacity);
    // last=false: a lead byte at the very end is pending input, not an error
    let (result, _read) = decoder.decode_to_string_without_replacement(prefix, &mut out, false);
    matches!(result, DecoderResult::InputEmpty)
}

/// Decodes a whole file with the detected encoding, stripping any BOM.
///
/// Returns the text, the encoding actually used, and whether replacement
/// characters had to be substituted.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> (String, &'static Encoding, bool) {
    let (text, used, had_errors) = encoding.decode(bytes);
    (text.into_owned(), used, had_errors)
}
