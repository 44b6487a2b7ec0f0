//! Format sniffing.
//!
//! Checks only the 12-byte file header, so it is cheap enough to run on
//! every candidate file before handing it to [`decode`](crate::decode).

use crate::rifx::{FILE_HEADER_LEN, FourCC, ListKind};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Form type of a RIFX buffer, if the buffer starts with a RIFX header.
///
/// # Examples
///
/// ```
/// use aepkit::common::detect::form_type;
/// assert_eq!(form_type(b"RIFX\0\0\0\x04Egg!").map(|f| f.to_string()), Some("Egg!".to_string()));
/// assert_eq!(form_type(b"RIFF\0\0\0\x04WAVE"), None);
/// ```
pub fn form_type(bytes: &[u8]) -> Option<FourCC> {
    let header = bytes.first_chunk::<FILE_HEADER_LEN>()?;
    if &header[..4] != b"RIFX" {
        return None;
    }
    Some(FourCC([header[8], header[9], header[10], header[11]]))
}

/// Whether `bytes` starts like a project file (`RIFX` with form type `Egg!`).
///
/// A positive answer does not guarantee that decoding succeeds.
pub fn is_project(bytes: &[u8]) -> bool {
    form_type(bytes).is_some_and(|form| ListKind::from(form.0) == ListKind::Project)
}

/// Whether the file at `path` starts like a project file.
///
/// Reads only the header. Unreadable files are reported as `false`.
///
/// # Examples
///
/// ```rust,no_run
/// use aepkit::common::detect::is_project_file;
///
/// if is_project_file("scene.aep") {
///     println!("looks like a project");
/// }
/// ```
pub fn is_project_file<P: AsRef<Path>>(path: P) -> bool {
    let mut header = [0u8; FILE_HEADER_LEN];
    File::open(path)
        .and_then(|mut file| file.read_exact(&mut header))
        .is_ok()
        && is_project(&header)
}
