//! Text-object walker over decoded page content streams.
//!
//! Collects the strings shown inside each `BT … ET` object together with
//! the text-matrix origin and effective font size. Glyph widths are not
//! computed and the `cm` operator is not applied, so positions are the
//! text-space origins of each showing operator.

use lopdf::content::Operation;
use lopdf::Object;
use unicode_normalization::UnicodeNormalization;

use crate::source::SourceBoundingBox;

/// Kerning adjustment (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Baseline difference under which two spans are on the same line.
const SAME_LINE_TOLERANCE: f32 = 0.5;

const DEFAULT_FONT_SIZE: f32 = 12.0;

/// A string shown at one text position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The decoded text
    pub text: String,
    /// X position of the origin
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Effective font size in points
    pub font_size: f32,
}

impl TextSpan {
    /// Approximate top edge (ascender).
    pub fn top(&self) -> f32 {
        self.y + self.font_size * 0.8
    }

    /// Approximate bottom edge (descender).
    pub fn bottom(&self) -> f32 {
        self.y - self.font_size * 0.2
    }
}

/// The spans of one `BT … ET` object, in stream order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextObject {
    pub spans: Vec<TextSpan>,
}

impl TextObject {
    /// Whether the object shows any non-blank text.
    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(|s| s.text.trim().is_empty())
    }

    /// Text of the object: spans on one baseline are concatenated, a new
    /// baseline starts a new word. Whitespace is collapsed and the result
    /// is NFC-normalized.
    pub fn text(&self) -> String {
        let mut raw = String::new();
        let mut last_y: Option<f32> = None;

        for span in &self.spans {
            if let Some(y) = last_y {
                if (span.y - y).abs() > SAME_LINE_TOLERANCE {
                    raw.push(' ');
                }
            }
            raw.push_str(&span.text);
            last_y = Some(span.y);
        }

        raw.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .nfc()
            .collect()
    }

    /// Bounding box of the object. The right edge is unknown because
    /// glyph widths are not computed.
    pub fn bbox(&self) -> Option<SourceBoundingBox> {
        let first = self.spans.first()?;
        let (mut l, mut t, mut b) = (first.x, first.top(), first.bottom());

        for span in &self.spans[1..] {
            l = l.min(span.x);
            t = t.max(span.top());
            b = b.min(span.bottom());
        }

        Some(SourceBoundingBox {
            l: Some(f64::from(l)),
            t: Some(f64::from(t)),
            r: None,
            b: Some(f64::from(b)),
        })
    }
}

/// Walk content-stream operations and collect text objects.
///
/// `decode` turns a shown byte string into text, given the resource name
/// of the current font.
pub fn collect_text_objects<F>(operations: &[Operation], mut decode: F) -> Vec<TextObject>
where
    F: FnMut(&[u8], &[u8]) -> String,
{
    let mut objects = Vec::new();
    let mut current: Option<TextObject> = None;
    let mut state = TextState::default();

    for op in operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                state.matrix = TextMatrix::default();
                current = Some(TextObject::default());
            }
            "ET" => {
                if let Some(object) = current.take() {
                    if !object.is_blank() {
                        objects.push(object);
                    }
                }
            }
            "Tf" => {
                if let Some(Object::Name(name)) = operands.first() {
                    state.font = name.clone();
                }
                state.font_size = operands
                    .get(1)
                    .and_then(get_number)
                    .unwrap_or(DEFAULT_FONT_SIZE);
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(get_number) {
                    state.leading = leading;
                }
            }
            "Td" | "TD" => {
                let tx = operands.first().and_then(get_number).unwrap_or(0.0);
                let ty = operands.get(1).and_then(get_number).unwrap_or(0.0);
                if op.operator == "TD" {
                    state.leading = -ty;
                }
                state.matrix.translate(tx, ty);
            }
            "Tm" => {
                if operands.len() >= 6 {
                    let n: Vec<f32> = operands.iter().map(|o| get_number(o).unwrap_or(0.0)).collect();
                    state.matrix.set(n[0], n[1], n[2], n[3], n[4], n[5]);
                }
            }
            "T*" => state.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = decode(&state.font, bytes);
                    state.show(current.as_mut(), text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = decode_tj_array(items, |bytes| decode(&state.font, bytes));
                    state.show(current.as_mut(), text);
                }
            }
            "'" | "\"" => {
                state.next_line();
                let idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = operands.get(idx) {
                    let text = decode(&state.font, bytes);
                    state.show(current.as_mut(), text);
                }
            }
            _ => {}
        }
    }

    // Unterminated text object at end of stream
    if let Some(object) = current {
        if !object.is_blank() {
            objects.push(object);
        }
    }

    objects
}

/// Concatenate the strings of a `TJ` array, inserting a space where the
/// kerning adjustment is wide enough to be a word gap.
fn decode_tj_array<F>(items: &[Object], mut decode: F) -> String
where
    F: FnMut(&[u8]) -> String,
{
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(bytes)),
            other => {
                if let Some(adjustment) = get_number(other) {
                    if -adjustment > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(char::is_whitespace)
                    {
                        combined.push(' ');
                    }
                }
            }
        }
    }
    combined
}

#[derive(Debug)]
struct TextState {
    font: Vec<u8>,
    font_size: f32,
    leading: f32,
    matrix: TextMatrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            leading: 0.0,
            matrix: TextMatrix::default(),
        }
    }
}

impl TextState {
    fn next_line(&mut self) {
        let leading = if self.leading == 0.0 {
            self.font_size
        } else {
            self.leading
        };
        self.matrix.translate(0.0, -leading);
    }

    fn show(&self, object: Option<&mut TextObject>, text: String) {
        // Showing text outside BT/ET is invalid; ignore it.
        let Some(object) = object else { return };
        if text.is_empty() {
            return;
        }
        let (x, y) = self.matrix.position();
        object.spans.push(TextSpan {
            text,
            x,
            y,
            font_size: self.font_size * self.matrix.vertical_scale(),
        });
    }
}

/// Text line matrix. Advances from shown glyphs are not tracked.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self { a, b, c, d, e, f };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decode a shown string when the font has no usable encoding:
/// UTF-16BE with BOM, then UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
