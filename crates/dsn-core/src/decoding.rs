//! Byte-encoding detection for declaration files.
//!
//! Declarations arrive either as UTF-8 or as a legacy single-byte Western
//! encoding. The leading sample is sniffed once, then the whole file is
//! decoded lossily: invalid sequences become U+FFFD and never abort a file.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tracing::debug;

/// Bytes inspected when guessing the encoding.
pub const SNIFF_LEN: usize = 10_000;

/// Best-guess encoding from the leading bytes, UTF-8 when inconclusive.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let sample = &bytes[..bytes.len().min(SNIFF_LEN)];

    if let Some((encoding, _)) = Encoding::for_bom(sample) {
        return encoding;
    }
    if sample.is_ascii() {
        return UTF_8;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => UTF_8,
        // Sample cut in the middle of a multi-byte sequence
        Err(e) if e.error_len().is_none() => UTF_8,
        Err(_) => WINDOWS_1252,
    }
}

/// Decode a whole file with the detected encoding.
///
/// Returns the text and the encoding actually used (a BOM wins over the guess).
pub fn decode(bytes: &[u8]) -> (String, &'static Encoding) {
    let guess = detect_encoding(bytes);
    let (text, used, had_errors) = guess.decode(bytes);
    if had_errors {
        debug!(encoding = used.name(), "malformed byte sequences replaced while decoding");
    }
    (text.into_owned(), used)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_utf8() {
        assert_eq!(detect_encoding(b"S21.G00.30.002,DUPONT\n"), UTF_8);
    }

    #[test]
    fn test_empty_is_utf8() {
        assert_eq!(detect_encoding(b""), UTF_8);
    }

    #[test]
    fn test_valid_utf8() {
        assert_eq!(detect_encoding("S21.G00.11.001,Société Générale".as_bytes()), UTF_8);
    }

    #[test]
    fn test_latin1_bytes() {
        // "Société" in ISO-8859-1
        let bytes = b"S21.G00.11.001,Soci\xe9t\xe9\n";
        assert_eq!(detect_encoding(bytes), WINDOWS_1252);
        let (text, used) = decode(bytes);
        assert_eq!(used, WINDOWS_1252);
        assert!(text.contains("Société"));
    }

    #[test]
    fn test_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"S21.G00.30.002,DUPONT");
        let (text, used) = decode(&bytes);
        assert_eq!(used, UTF_8);
        assert!(text.starts_with("S21"));
    }

    #[test]
    fn test_truncated_sample_still_utf8() {
        let mut bytes = vec![b'a'; SNIFF_LEN - 1];
        bytes.extend_from_slice("é".as_bytes());
        assert_eq!(detect_encoding(&bytes), UTF_8);
    }

    #[test]
    fn test_lossy_decoding_never_fails() {
        let mut bytes = "S21.G00.30.002,é".as_bytes().to_vec();
        bytes.extend(std::iter::repeat(b'a').take(SNIFF_LEN));
        bytes.push(0xFF);
        let (text, used) = decode(&bytes);
        assert_eq!(used, UTF_8);
        assert!(text.ends_with('\u{FFFD}'));
    }
}
