//! PDF layout source backed by lopdf.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::Page;

use super::backend::LayoutSource;
use super::layout::{build_page, PositionedSpan};
use super::options::{ErrorMode, ParseOptions};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Font size assumed before any `Tf` operator.
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Glyph width (thousandths of an em) used when a font lists none.
const DEFAULT_GLYPH_WIDTH: f32 = 500.0;

/// Advance widths of a simple font, indexed by character code.
#[derive(Debug, Clone)]
struct FontWidths {
    first_char: i64,
    widths: Vec<f32>,
}

impl FontWidths {
    fn glyph_width(&self, code: u8) -> f32 {
        usize::try_from(i64::from(code) - self.first_char)
            .ok()
            .and_then(|i| self.widths.get(i).copied())
            .unwrap_or(DEFAULT_GLYPH_WIDTH)
    }
}

/// Check the `%PDF-x.y` header and return the version.
pub fn pdf_version(data: &[u8]) -> Result<String> {
    let version = data
        .strip_prefix(PDF_MAGIC)
        .and_then(|rest| rest.get(..VERSION_LEN))
        .ok_or(Error::UnknownFormat)?;

    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(String::from_utf8_lossy(version).into_owned())
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).into_owned(),
        )),
    }
}

/// Lays out PDF pages from their content streams.
pub struct PdfLayoutSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    options: ParseOptions,
}

impl PdfLayoutSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Load a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let version = pdf_version(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        log::debug!("Loaded PDF {} with {} pages", version, doc.get_pages().len());

        let pages = doc.get_pages();
        Ok(Self {
            doc,
            pages,
            options,
        })
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Extract positioned spans from one page.
    pub fn page_spans(&self, number: u32) -> Result<Vec<PositionedSpan>> {
        let page_id = *self
            .pages
            .get(&number)
            .ok_or(Error::PageOutOfRange(number, self.page_count()))?;

        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let metrics: BTreeMap<Vec<u8>, FontWidths> = fonts
            .iter()
            .filter_map(|(name, dict)| Some((name.clone(), self.font_widths(dict)?)))
            .collect();

        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", number, e)))?;
        let content = lopdf::content::Content::decode(&content)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", number, e)))?;

        let mut state = TextState::default();
        let mut spans = Vec::new();

        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "BT" => {
                    state.in_text = true;
                    state.matrix = TextMatrix::default();
                    state.line_start = TextMatrix::default();
                }
                "ET" => state.in_text = false,
                "Tf" => {
                    if let [Object::Name(name), size, ..] = operands.as_slice() {
                        state.font = name.clone();
                        state.font_size = number_of(size).unwrap_or(DEFAULT_FONT_SIZE);
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(number_of) {
                        state.leading = Some(leading);
                    }
                }
                "Tc" => state.char_spacing = operands.first().and_then(number_of).unwrap_or(0.0),
                "Tw" => state.word_spacing = operands.first().and_then(number_of).unwrap_or(0.0),
                "Td" | "TD" => {
                    if let [tx, ty, ..] = operands.as_slice() {
                        let tx = number_of(tx).unwrap_or(0.0);
                        let ty = number_of(ty).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.leading = Some(-ty);
                        }
                        state.move_line(tx, ty);
                    }
                }
                "Tm" => {
                    if operands.len() >= 6 {
                        let v: Vec<f32> = operands[..6]
                            .iter()
                            .map(|o| number_of(o).unwrap_or(0.0))
                            .collect();
                        state.matrix = TextMatrix {
                            a: v[0],
                            b: v[1],
                            c: v[2],
                            d: v[3],
                            e: v[4],
                            f: v[5],
                        };
                        state.line_start = state.matrix;
                    }
                }
                "T*" => state.next_line(),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        let text = self.decode(&fonts, &state.font, bytes);
                        let advance = state.advance(metrics.get(&state.font), bytes, &text);
                        state.show(text, advance, &mut spans);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = operands.first() {
                        let (text, advance) =
                            self.decode_array(&fonts, metrics.get(&state.font), &state, items);
                        state.show(text, advance, &mut spans);
                    }
                }
                "'" | "\"" => {
                    state.next_line();
                    let index = if op.operator == "\"" { 2 } else { 0 };
                    if op.operator == "\"" {
                        if let [aw, ac, ..] = operands.as_slice() {
                            state.word_spacing = number_of(aw).unwrap_or(0.0);
                            state.char_spacing = number_of(ac).unwrap_or(0.0);
                        }
                    }
                    if let Some(Object::String(bytes, _)) = operands.get(index) {
                        let text = self.decode(&fonts, &state.font, bytes);
                        let advance = state.advance(metrics.get(&state.font), bytes, &text);
                        state.show(text, advance, &mut spans);
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Glyph widths of a simple font, from its `FirstChar` and `Widths`
    /// entries. Composite fonts and fonts without widths yield `None`.
    fn font_widths(&self, font: &Dictionary) -> Option<FontWidths> {
        let is_composite = matches!(
            font.get(b"Subtype"),
            Ok(Object::Name(subtype)) if subtype.as_slice() == b"Type0"
        );
        if is_composite {
            return None;
        }

        let first_char = font.get(b"FirstChar").ok().and_then(|o| o.as_i64().ok())?;
        let (_, widths) = self.doc.dereference(font.get(b"Widths").ok()?).ok()?;
        let widths = widths
            .as_array()
            .ok()?
            .iter()
            .map(|w| number_of(w).unwrap_or(DEFAULT_GLYPH_WIDTH))
            .collect();

        Some(FontWidths { first_char, widths })
    }

    /// Decode a string with the font's encoding, falling back to
    /// [`decode_text_simple`].
    fn decode(&self, fonts: &BTreeMap<Vec<u8>, &Dictionary>, font: &[u8], bytes: &[u8]) -> String {
        fonts
            .get(font)
            .and_then(|dict| dict.get_font_encoding(&self.doc).ok())
            .and_then(|enc| LopdfDocument::decode_text(&enc, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }

    /// Decode a `TJ` array into its text and total advance; large negative
    /// adjustments become word spaces.
    fn decode_array(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        widths: Option<&FontWidths>,
        state: &TextState,
        items: &[Object],
    ) -> (String, f32) {
        // Adjustments are in thousandths of a text-space unit.
        const SPACE_ADJUSTMENT: f32 = 200.0;

        let mut text = String::new();
        let mut advance = 0.0;
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    let part = self.decode(fonts, &state.font, bytes);
                    advance += state.advance(widths, bytes, &part);
                    text.push_str(&part);
                }
                other => {
                    let shift = number_of(other).map_or(0.0, |n| -n);
                    advance += shift / 1000.0 * state.font_size;
                    if shift > SPACE_ADJUSTMENT && !text.is_empty() && !text.ends_with(' ') {
                        text.push(' ');
                    }
                }
            }
        }
        (text, advance)
    }
}

impl LayoutSource for PdfLayoutSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, number: u32) -> Result<Page> {
        match self.page_spans(number) {
            Ok(spans) => Ok(build_page(number, spans)),
            Err(e @ Error::PageOutOfRange(..)) => Err(e),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Failed to extract text from page {}: {}", number, e);
                Ok(Page::new(number))
            }
            Err(e) => Err(e),
        }
    }
}

/// Text state carried across content stream operators.
#[derive(Debug, Clone)]
struct TextState {
    in_text: bool,
    font: Vec<u8>,
    font_size: f32,
    leading: Option<f32>,
    char_spacing: f32,
    word_spacing: f32,
    matrix: TextMatrix,
    /// Start of the current line; `Td`, `TD` and `T*` move from here
    line_start: TextMatrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            font: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            leading: None,
            char_spacing: 0.0,
            word_spacing: 0.0,
            matrix: TextMatrix::default(),
            line_start: TextMatrix::default(),
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_start.translate(tx, ty);
        self.matrix = self.line_start;
    }

    fn next_line(&mut self) {
        let leading = self.leading.unwrap_or(self.font_size);
        self.move_line(0.0, -leading);
    }

    /// Horizontal advance (text space) of a shown string.
    fn advance(&self, widths: Option<&FontWidths>, bytes: &[u8], text: &str) -> f32 {
        let glyphs: f32 = match widths {
            Some(widths) => bytes.iter().map(|&b| widths.glyph_width(b)).sum(),
            None => text.chars().count() as f32 * DEFAULT_GLYPH_WIDTH,
        };
        let spaces = bytes.iter().filter(|&&b| b == b' ').count() as f32;
        glyphs / 1000.0 * self.font_size
            + self.char_spacing * bytes.len() as f32
            + self.word_spacing * spaces
    }

    /// Record shown text as a span at the current position, then move past it.
    fn show(&mut self, text: String, advance: f32, spans: &mut Vec<PositionedSpan>) {
        let (x, y) = (self.matrix.e, self.matrix.f);
        self.matrix.translate(advance, 0.0);

        if !self.in_text || text.trim().is_empty() {
            return;
        }
        let size = self.font_size * self.matrix.scale();
        let width = (self.matrix.e - x).abs();
        spans.push(
            PositionedSpan::new(text, x, y, (size * 100.0).round() / 100.0).with_width(width),
        );
    }
}

/// Text matrix `[a b c d e f]`.
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
    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    /// Vertical scale applied to the font size.
    fn scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

fn number_of(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decode text without font encoding: UTF-16BE with BOM, UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
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
