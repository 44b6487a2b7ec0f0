//! File header validation.

use super::reader::ChunkReader;
use super::tags::{ChunkTag, FourCC, ListKind};
use crate::common::{DecodeError, Result};

/// Size of the file header: `RIFX`, length, form type.
pub const FILE_HEADER_LEN: usize = 12;

/// A validated RIFX file: the form type and a reader over its body.
#[derive(Debug, Clone)]
pub struct RifxFile<'data> {
    /// Form type (`Egg!` for projects)
    pub form_type: FourCC,
    /// Declared length of form type plus body
    pub declared_len: u32,
    body_start: usize,
    body_end: usize,
    data: &'data [u8],
}

impl<'data> RifxFile<'data> {
    /// Validate the file header of `data`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Corrupt`] when the buffer is shorter than the header
    ///   or does not start with `RIFX`
    /// - [`DecodeError::Truncated`] when the declared length runs past the
    ///   end of the buffer
    pub fn parse(data: &'data [u8]) -> Result<Self> {
        let Some(header) = data.first_chunk::<FILE_HEADER_LEN>() else {
            return Err(DecodeError::corrupt(format!(
                "buffer of {} bytes is shorter than the {}-byte RIFX header",
                data.len(),
                FILE_HEADER_LEN
            )));
        };

        let magic = [header[0], header[1], header[2], header[3]];
        if ChunkTag::from(magic) != ChunkTag::Rifx {
            return Err(DecodeError::corrupt(format!(
                "expected RIFX magic, found '{}'",
                FourCC(magic)
            )));
        }

        let declared_len = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
        let body_end = 8usize.saturating_add(declared_len as usize);
        if body_end > data.len() {
            return Err(DecodeError::Truncated {
                tag: FourCC(magic).to_string(),
                offset: 0,
                declared: declared_len,
                available: data.len() - 8,
            });
        }
        if body_end < FILE_HEADER_LEN {
            return Err(DecodeError::corrupt(format!(
                "RIFX length {} cannot hold a form type",
                declared_len
            )));
        }

        Ok(Self {
            form_type: FourCC([header[8], header[9], header[10], header[11]]),
            declared_len,
            body_start: FILE_HEADER_LEN,
            body_end,
            data,
        })
    }

    /// The form type interpreted as a list kind.
    #[inline]
    pub fn kind(&self) -> ListKind {
        ListKind::from(self.form_type.0)
    }

    /// Reader over the body chunks.
    #[inline]
    pub fn chunks(&self) -> ChunkReader<'data> {
        ChunkReader::with_range(self.data, self.body_start, self.body_end)
    }

    /// Bytes after the declared body, which the decoder ignores.
    #[inline]
    pub fn trailing_len(&self) -> usize {
        self.data.len() - self.body_end
    }
}
