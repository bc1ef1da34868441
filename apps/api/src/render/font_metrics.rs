//! Glyph metrics for the embedded DejaVu Sans faces, used to word-wrap PDF text.
//!
//! Widths are in em units, read from each face's horizontal metrics. The same
//! bytes are embedded in the PDF, so measured and printed widths agree.

use ttf_parser::{Face as FontFace, FaceParsingError, GlyphId};

pub static REGULAR_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
pub static BOLD_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

impl Face {
    pub fn ttf_bytes(self) -> &'static [u8] {
        match self {
            Face::Regular => REGULAR_TTF,
            Face::Bold => BOLD_TTF,
        }
    }
}

pub struct FontMetrics {
    regular: FontFace<'static>,
    bold: FontFace<'static>,
}

impl FontMetrics {
    pub fn load() -> Result<Self, FaceParsingError> {
        Ok(Self {
            regular: FontFace::parse(REGULAR_TTF, 0)?,
            bold: FontFace::parse(BOLD_TTF, 0)?,
        })
    }

    fn face(&self, face: Face) -> &FontFace<'static> {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
        }
    }

    /// Missing glyphs measure as `.notdef`.
    fn char_width(&self, c: char, face: Face) -> f32 {
        let font = self.face(face);
        let glyph = font.glyph_index(c).unwrap_or(GlyphId(0));
        let advance = font.glyph_hor_advance(glyph).unwrap_or(0);
        f32::from(advance) / f32::from(font.units_per_em())
    }

    /// First visible character in `s` the face has no glyph for.
    pub fn unsupported_char(&self, s: &str, face: Face) -> Option<char> {
        let font = self.face(face);
        s.chars()
            .filter(|c| !c.is_whitespace() && !c.is_control())
            .find(|c| font.glyph_index(*c).is_none())
    }

    /// Rendered width of `s` in em units.
    pub fn measure_str(&self, s: &str, face: Face) -> f32 {
        s.chars().map(|c| self.char_width(c, face)).sum()
    }

    /// Greedy word-wrap of `s` into lines no wider than `max_em`.
    ///
    /// Runs of whitespace collapse to one space. A word wider than a whole line
    /// is broken between characters. Blank input yields no lines.
    pub fn wrap(&self, s: &str, max_em: f32, face: Face) -> Vec<String> {
        let space = self.char_width(' ', face);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            let word_width = self.measure_str(word, face);

            if word_width > max_em {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                for c in word.chars() {
                    let w = self.char_width(c, face);
                    if current_width + w > max_em && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    current.push(c);
                    current_width += w;
                }
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width > max_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}
