//! Big-endian field readers shared by the chunk reader and the builders.
//!
//! RIFX stores every integer in network byte order. These helpers bounds-check
//! each read and report the shortfall instead of panicking, so a short or
//! hostile payload can always be turned into an opaque node by the caller.

use zerocopy::{BE, F32, F64, FromBytes, U16, U32};

/// Binary parsing error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BinaryError {
    /// Not enough data to read the requested type
    #[error("Insufficient data: expected {expected}, got {available}")]
    InsufficientData { expected: usize, available: usize },
    /// Failed to parse the data
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type for binary operations
pub type BinaryResult<T> = Result<T, BinaryError>;

#[inline]
fn field(data: &[u8], offset: usize, width: usize) -> BinaryResult<&[u8]> {
    let end = offset.checked_add(width).ok_or(BinaryError::InsufficientData {
        expected: usize::MAX,
        available: data.len(),
    })?;
    data.get(offset..end).ok_or(BinaryError::InsufficientData {
        expected: end,
        available: data.len(),
    })
}

/// Read a big-endian u16 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use aepkit::common::binary::read_u16_be;
/// let data = [0x12, 0x34, 0x56, 0x78];
/// assert_eq!(read_u16_be(&data, 0).unwrap(), 0x1234);
/// assert_eq!(read_u16_be(&data, 2).unwrap(), 0x5678);
/// ```
#[inline]
pub fn read_u16_be(data: &[u8], offset: usize) -> BinaryResult<u16> {
    U16::<BE>::read_from_bytes(field(data, offset, 2)?)
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read u16".to_string()))
}

/// Read a big-endian u32 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use aepkit::common::binary::read_u32_be;
/// let data = [0x12, 0x34, 0x56, 0x78];
/// assert_eq!(read_u32_be(&data, 0).unwrap(), 0x12345678);
/// ```
#[inline]
pub fn read_u32_be(data: &[u8], offset: usize) -> BinaryResult<u32> {
    U32::<BE>::read_from_bytes(field(data, offset, 4)?)
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read u32".to_string()))
}

/// Read a 24-bit big-endian unsigned integer (three bytes) into a u32.
#[inline]
pub fn read_u24_be(data: &[u8], offset: usize) -> BinaryResult<u32> {
    let bytes = field(data, offset, 3)?;
    Ok(u32::from(bytes[0]) << 16 | u32::from(bytes[1]) << 8 | u32::from(bytes[2]))
}

/// Read a big-endian f32 from a byte slice at the given offset.
#[inline]
pub fn read_f32_be(data: &[u8], offset: usize) -> BinaryResult<f32> {
    F32::<BE>::read_from_bytes(field(data, offset, 4)?)
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read f32".to_string()))
}

/// Read a big-endian f64 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use aepkit::common::binary::read_f64_be;
/// let data = [0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
/// assert!((read_f64_be(&data, 0).unwrap() - 1.0).abs() < f64::EPSILON);
/// ```
#[inline]
pub fn read_f64_be(data: &[u8], offset: usize) -> BinaryResult<f64> {
    F64::<BE>::read_from_bytes(field(data, offset, 8)?)
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read f64".to_string()))
}

/// Read every complete big-endian f64 in `data`, ignoring a trailing partial value.
pub fn read_f64_seq_be(data: &[u8]) -> Vec<f64> {
    data.chunks_exact(8)
        .filter_map(|chunk| F64::<BE>::read_from_bytes(chunk).ok())
        .map(|v| v.get())
        .collect()
}

/// Decode a fixed-width or NUL-padded string field.
///
/// Leading and trailing NUL bytes are stripped; invalid UTF-8 sequences are
/// replaced rather than rejected, since names are informational only.
///
/// # Examples
///
/// ```
/// use aepkit::common::binary::parse_nul_padded_string;
/// assert_eq!(parse_nul_padded_string(b"ADBE Text Document\0\0\0"), "ADBE Text Document");
/// ```
pub fn parse_nul_padded_string(data: &[u8]) -> String {
    let start = data.iter().position(|&b| b != 0).unwrap_or(data.len());
    let end = data.iter().rposition(|&b| b != 0).map_or(start, |p| p + 1);
    String::from_utf8_lossy(&data[start..end]).into_owned()
}

/// Ratio of `dividend / divisor`, or zero when the divisor is zero.
#[inline]
pub fn ratio(dividend: u32, divisor: u32) -> f64 {
    if divisor == 0 {
        0.0
    } else {
        f64::from(dividend) / f64::from(divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u16_be() {
        let data = [0x12, 0x34, 0x56, 0x78];
        assert!(read_u16_be(&data, 0).is_ok_and(|v| v == 0x1234));
        assert!(read_u16_be(&data, 2).is_ok_and(|v| v == 0x5678));
        assert!(read_u16_be(&data, 3).is_err());
    }

    #[test]
    fn test_read_u32_be() {
        let data = [0x12, 0x34, 0x56, 0x78];
        assert!(read_u32_be(&data, 0).is_ok_and(|v| v == 0x12345678));
        assert!(read_u32_be(&data, 1).is_err());
        assert!(read_u32_be(&data, usize::MAX).is_err());
    }

    #[test]
    fn test_read_u24_be() {
        let data = [0x00, 0x02, 0x8A, 0x04];
        assert_eq!(read_u24_be(&data, 1).unwrap(), 0x028A04);
        assert!(read_u24_be(&data, 2).is_err());
    }

    #[test]
    fn test_read_floats() {
        let mut data = 0.5f32.to_be_bytes().to_vec();
        data.extend_from_slice(&24.0f64.to_be_bytes());
        assert_eq!(read_f32_be(&data, 0).unwrap(), 0.5);
        assert_eq!(read_f64_be(&data, 4).unwrap(), 24.0);
        assert_eq!(read_f64_seq_be(&data[4..]), vec![24.0]);
    }

    #[test]
    fn test_parse_nul_padded() {
        assert_eq!(parse_nul_padded_string(b"\0\0abc\0"), "abc");
        assert_eq!(parse_nul_padded_string(b"\0\0\0"), "");
        assert_eq!(parse_nul_padded_string(b""), "");
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(30, 1), 30.0);
        assert_eq!(ratio(30, 0), 0.0);
    }
}
