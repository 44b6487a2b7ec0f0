//! Test-only RIFX assembler.
//!
//! Builds chunk trees bottom-up as plain byte vectors, so each test can say
//! exactly which bytes it feeds the decoder.

use crate::project::LayerFlags;

/// A chunk with its pad byte.
pub(crate) fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    out.extend_from_slice(tag);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
    out
}

/// A `LIST` chunk of the given type.
pub(crate) fn list(kind: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = kind.to_vec();
    for child in children {
        payload.extend_from_slice(child);
    }
    chunk(b"LIST", &payload)
}

/// A complete file.
pub(crate) fn rifx(form: &[u8; 4], body: &[Vec<u8>]) -> Vec<u8> {
    let mut out = list(form, body);
    out[..4].copy_from_slice(b"RIFX");
    out
}

/// `idta` payload.
pub(crate) fn item_header(item_type: u16, id: u32) -> Vec<u8> {
    let mut out = vec![0u8; 20];
    out[..2].copy_from_slice(&item_type.to_be_bytes());
    out[16..20].copy_from_slice(&id.to_be_bytes());
    out
}

/// `cdta` payload.
pub(crate) fn comp_data(fps: u32, seconds: u32, rgb: [u8; 3], width: u16, height: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(24);
    for value in [fps, 1, seconds * fps, fps] {
        out.extend_from_slice(&value.to_be_bytes());
    }
    out.extend_from_slice(&rgb);
    out.push(0);
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out
}

/// `ldta` payload.
pub(crate) fn layer_data(quality: u16, flags: LayerFlags, source: u32) -> Vec<u8> {
    let mut out = vec![0u8; 44];
    out[4..6].copy_from_slice(&quality.to_be_bytes());
    out[37..40].copy_from_slice(&flags.bits().to_be_bytes()[1..]);
    out[40..44].copy_from_slice(&source.to_be_bytes());
    out
}

/// Text encoded as UTF-16LE followed by a `00 00` terminator.
pub(crate) fn utf16z(text: &str) -> Vec<u8> {
    let mut out: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    out.extend_from_slice(&[0, 0]);
    out
}

/// A text layer whose text document block is `payload`.
pub(crate) fn text_layer(name: &str, payload: &[u8]) -> Vec<u8> {
    list(
        b"Layr",
        &[
            chunk(b"ldta", &layer_data(2, LayerFlags::EFFECTS, 0)),
            chunk(b"Utf8", name.as_bytes()),
            list(
                b"tdgp",
                &[
                    chunk(b"tdmn", b"ADBE Text Properties\0"),
                    list(
                        b"tdgp",
                        &[
                            chunk(b"tdsn", b"-_0_/-\0"),
                            chunk(b"tdmn", b"ADBE Text Document\0"),
                            chunk(b"tdbs", payload),
                            chunk(b"tdmn", b"ADBE Group End\0"),
                        ],
                    ),
                    chunk(b"tdmn", b"ADBE Transform Group\0"),
                    list(b"tdgp", &[chunk(b"tdmn", b"ADBE Opacity\0")]),
                ],
            ),
        ],
    )
}

/// A layer without text.
pub(crate) fn plain_layer(name: &str, source: u32) -> Vec<u8> {
    list(
        b"Layr",
        &[
            chunk(b"ldta", &layer_data(2, LayerFlags::empty(), source)),
            chunk(b"Utf8", name.as_bytes()),
        ],
    )
}

/// Assembles a project file item by item.
#[derive(Debug, Default)]
pub(crate) struct ProjectFixture {
    body: Vec<Vec<u8>>,
    items: Vec<Vec<u8>>,
}

impl ProjectFixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a chunk directly to the body, before the root folder.
    pub(crate) fn body_chunk(mut self, bytes: Vec<u8>) -> Self {
        self.body.push(bytes);
        self
    }

    /// Add a raw item list to the root folder.
    pub(crate) fn item(mut self, bytes: Vec<u8>) -> Self {
        self.items.push(bytes);
        self
    }

    pub(crate) fn folder(self, id: u32, name: &str, children: &[Vec<u8>]) -> Self {
        self.item(folder_item(id, name, children))
    }

    pub(crate) fn composition(self, id: u32, name: &str, layers: &[Vec<u8>]) -> Self {
        self.item(comp_item(id, name, layers))
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let mut nhed = vec![0u8; 16];
        nhed[15] = 1;
        let mut body = vec![
            chunk(b"head", &[0, 0, 0, 0x5D]),
            chunk(b"nhed", &nhed),
            list(b"ExEn", &[chunk(b"Utf8", b"javascript-1.0")]),
        ];
        body.extend(self.body);
        body.push(list(b"Fold", &self.items));
        rifx(b"Egg!", &body)
    }
}

pub(crate) fn folder_item(id: u32, name: &str, children: &[Vec<u8>]) -> Vec<u8> {
    list(
        b"Item",
        &[
            chunk(b"idta", &item_header(1, id)),
            chunk(b"Utf8", name.as_bytes()),
            chunk(b"fdta", &[0, 0]),
            list(b"Sfdr", children),
        ],
    )
}

pub(crate) fn comp_item(id: u32, name: &str, layers: &[Vec<u8>]) -> Vec<u8> {
    let mut children = vec![
        chunk(b"idta", &item_header(4, id)),
        chunk(b"Utf8", name.as_bytes()),
        chunk(b"cdta", &comp_data(24, 5, [0, 0, 0], 1280, 720)),
    ];
    children.extend_from_slice(layers);
    list(b"Item", &children)
}
