//! Byte-level text scanners.
//!
//! Each scanner looks for one encoding pattern in a raw payload and returns
//! the first candidate that survives [`accept`]. `None` means nothing usable
//! was found; a found string is never empty.
//!
//! # Performance
//!
//! - Every scanner is linear in the payload length, except the UTF-8 scan,
//!   which validates one suffix per character boundary
//! - Payloads are cut to [`RecoveryConfig::max_scan_len`] before scanning

use super::config::RecoveryConfig;
use super::document::TextSource;
use super::validate::accept;
use encoding_rs::UTF_16LE;
use memchr::memmem;

#[inline]
fn is_printable(byte: u8) -> bool {
    matches!(byte, 32..=126 | b'\n' | b'\r' | b'\t')
}

/// Run every scanner over `data` in precedence order.
///
/// Payloads shorter than [`RecoveryConfig::min_payload_len`] are skipped.
pub fn scan_payload(data: &[u8], config: &RecoveryConfig) -> Option<(String, TextSource)> {
    if data.len() < config.min_payload_len {
        return None;
    }
    let data = &data[..data.len().min(config.max_scan_len)];

    if let Some(text) = scan_utf16le(data, config) {
        return Some((text, TextSource::Utf16));
    }
    if let Some(text) = scan_utf8(data, config) {
        return Some((text, TextSource::Utf8));
    }
    if let Some(text) = scan_nul_terminated(data, config) {
        return Some((text, TextSource::NulTerminated));
    }
    scan_markers(data, config).map(|text| (text, TextSource::Marker))
}

/// Find a UTF-16LE run.
///
/// A run starts at a non-zero byte whose next three odd neighbours
/// (`+1`, `+3`, `+5`) are zero, and ends at a `00 00` code unit or the end of
/// the buffer. Runs that fail validation are skipped as a whole.
///
/// # Examples
///
/// ```
/// use aepkit::text::{RecoveryConfig, heuristics::scan_utf16le};
/// let data = b"\x01\x02H\0e\0y\0\0\0";
/// assert_eq!(scan_utf16le(data, &RecoveryConfig::default()), Some("Hey".to_string()));
/// ```
pub fn scan_utf16le(data: &[u8], config: &RecoveryConfig) -> Option<String> {
    let mut i = 0;
    while i + 5 < data.len() {
        if data[i] == 0 || data[i + 1] != 0 || data[i + 3] != 0 || data[i + 5] != 0 {
            i += 1;
            continue;
        }

        let mut end = i;
        while end + 1 < data.len() && !(data[end] == 0 && data[end + 1] == 0) {
            end += 2;
        }
        let run = &data[i..end];
        if run.len() / 2 >= config.min_utf16_units {
            if let Some(text) = decode_utf16le(run).and_then(|text| accept(&text, config)) {
                return Some(text);
            }
        }
        i = end.max(i + 1);
    }
    None
}

fn decode_utf16le(run: &[u8]) -> Option<String> {
    let text = UTF_16LE.decode_without_bom_handling_and_without_replacement(run)?;
    if text.chars().any(|c| ('\u{FFFD}'..='\u{FFFF}').contains(&c)) {
        return None;
    }
    Some(text.into_owned())
}

/// Find the longest acceptable UTF-8 run reaching the end of the buffer.
///
/// Every character boundary of the longest valid UTF-8 suffix is a candidate
/// start, tried from the front.
///
/// # Examples
///
/// ```
/// use aepkit::text::{RecoveryConfig, heuristics::scan_utf8};
/// let data = b"\xff\x00\x01Breaking News";
/// assert_eq!(scan_utf8(data, &RecoveryConfig::default()), Some("Breaking News".to_string()));
/// ```
pub fn scan_utf8(data: &[u8], config: &RecoveryConfig) -> Option<String> {
    let start = valid_utf8_tail(data)?;
    let tail = std::str::from_utf8(&data[start..]).ok()?;

    tail.char_indices()
        .find_map(|(pos, _)| accept(&tail[pos..], config))
}

/// Offset of the longest valid UTF-8 suffix, if it is not empty.
fn valid_utf8_tail(data: &[u8]) -> Option<usize> {
    let mut start = 0;
    loop {
        match std::str::from_utf8(&data[start..]) {
            Ok(rest) if rest.is_empty() => return None,
            Ok(_) => return Some(start),
            Err(err) => {
                let bad = err.error_len().unwrap_or(data.len() - start - err.valid_up_to());
                start += err.valid_up_to() + bad;
            },
        }
    }
}

/// Find printable ASCII terminated by a NUL byte.
pub fn scan_nul_terminated(data: &[u8], config: &RecoveryConfig) -> Option<String> {
    let mut i = 0;
    while i < data.len() {
        let run_len = data[i..].iter().take_while(|&&b| (32..=126).contains(&b)).count();
        if run_len == 0 {
            i += 1;
            continue;
        }
        let end = i + run_len;
        if run_len >= config.min_nul_terminated_len && data.get(end) == Some(&0) {
            // The run is ASCII, so this never falls back
            let text = String::from_utf8_lossy(&data[i..end]);
            if let Some(text) = accept(&text, config) {
                return Some(text);
            }
        }
        i = end;
    }
    None
}

/// Find text following one of the configured markers.
///
/// Only the first occurrence of each marker is considered, markers in
/// configuration order.
pub fn scan_markers(data: &[u8], config: &RecoveryConfig) -> Option<String> {
    config.markers.iter().find_map(|marker| {
        let marker = marker.as_bytes();
        let idx = memmem::find(data, marker)?;
        let mut start = idx + marker.len();
        if start + 4 >= data.len() {
            return None;
        }
        while start < data.len() && data[start] < 32 {
            start += 1;
        }
        if start + 4 >= data.len() {
            return None;
        }
        extract_printable(&data[start..], config)
    })
}

/// General-purpose extractor.
///
/// Accepts the whole buffer when it is valid UTF-8, otherwise the first
/// acceptable run of printable bytes longer than
/// [`RecoveryConfig::min_printable_run`].
///
/// # Examples
///
/// ```
/// use aepkit::text::{RecoveryConfig, heuristics::extract_printable};
/// let config = RecoveryConfig::default();
/// assert_eq!(extract_printable(b"\xff\xfeabc\x80Lower Third\x81", &config), Some("Lower Third".to_string()));
/// ```
pub fn extract_printable(data: &[u8], config: &RecoveryConfig) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    if let Ok(text) = std::str::from_utf8(data) {
        if let Some(text) = accept(text, config) {
            return Some(text);
        }
    }

    data.split(|&b| !is_printable(b))
        .filter(|run| run.len() > config.min_printable_run)
        .find_map(|run| accept(&String::from_utf8_lossy(run), config))
}
