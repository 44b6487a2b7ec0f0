/// Character style read from the text property subtree.
use super::document::{Justification, TextDocument};
use crate::project::Property;
use phf::phf_map;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StyleField {
    Font,
    FontSize,
    FillColor,
    StrokeColor,
    StrokeWidth,
    Justification,
    Tracking,
    LineSpacing,
    BaselineShift,
}

static STYLE_FIELDS: phf::Map<&'static str, StyleField> = phf_map! {
    "ADBE Text Font" => StyleField::Font,
    "ADBE Text Font Size" => StyleField::FontSize,
    "ADBE Text Fill Color" => StyleField::FillColor,
    "ADBE Text Stroke Color" => StyleField::StrokeColor,
    "ADBE Text Stroke Width" => StyleField::StrokeWidth,
    "ADBE Text Justification" => StyleField::Justification,
    "ADBE Text Tracking Amount" => StyleField::Tracking,
    "ADBE Text Line Spacing" => StyleField::LineSpacing,
    "ADBE Text Baseline Shift" => StyleField::BaselineShift,
};

/// Colors stored as 0-255 are scaled to 0.0-1.0; alpha defaults to opaque.
fn color(values: &[f64]) -> Option<[f32; 4]> {
    let [r, g, b] = *values.first_chunk::<3>()?;
    let alpha = values.get(3).copied();
    let scale = if [r, g, b].into_iter().chain(alpha).any(|c| c > 1.0) {
        255.0
    } else {
        1.0
    };
    let a = alpha.map_or(1.0, |a| a / scale);
    Some([r / scale, g / scale, b / scale, a].map(|c| c as f32))
}

/// Fill style fields of `doc` from descendants of `text`. Fields whose
/// property is absent keep their defaults.
pub(crate) fn apply_style(doc: &mut TextDocument, text: &Property) {
    for prop in text.iter() {
        let Some(&field) = STYLE_FIELDS.get(prop.match_name.as_str()) else {
            continue;
        };
        let first = prop.values.first().copied();

        match field {
            StyleField::Font => {
                let name = prop
                    .user_label()
                    .map(str::to_string)
                    .or_else(|| prop.options.first().cloned())
                    .filter(|name| !name.trim().is_empty());
                if let Some(name) = name {
                    doc.font_name = name;
                }
            },
            StyleField::FontSize => {
                if let Some(size) = first.filter(|&size| size > 0.0) {
                    doc.font_size = size;
                }
            },
            StyleField::FillColor => {
                if let Some(fill) = color(&prop.values) {
                    doc.fill_color = fill;
                }
            },
            StyleField::StrokeColor => {
                if let Some(stroke) = color(&prop.values) {
                    doc.stroke_color = stroke;
                }
            },
            StyleField::StrokeWidth => doc.stroke_width = first.unwrap_or(doc.stroke_width),
            StyleField::Justification => {
                // Dropdown values are 1-based
                let justification = prop
                    .options
                    .first()
                    .and_then(|label| Justification::from_label(label))
                    .or_else(|| {
                        first
                            .filter(|&v| v >= 1.0)
                            .and_then(|v| Justification::from_index(v as usize - 1))
                    });
                if let Some(justification) = justification {
                    doc.justification = justification;
                }
            },
            StyleField::Tracking => doc.tracking = first.unwrap_or(doc.tracking),
            StyleField::LineSpacing => doc.line_height = first.unwrap_or(doc.line_height),
            StyleField::BaselineShift => doc.baseline_shift = first.unwrap_or(doc.baseline_shift),
        }
    }
}
