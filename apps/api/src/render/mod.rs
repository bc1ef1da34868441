// Resume rendering: HTML preview and paginated PDF export.
// PDF layout is CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod html;
pub mod pdf;
pub mod preview;

use std::str::FromStr;

use serde::Serialize;

use crate::models::resume::Profile;

pub use html::render_html;
pub use pdf::render_pdf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in millimetres, portrait.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            other => Err(format!("unknown page size '{other}' (expected a4 or letter)")),
        }
    }
}

/// Inner padding of the preview card, applied inside the configured margin.
pub const PADDING_MM: f32 = 15.0;

/// PDF export settings.
///
/// `margin_mm` is added around the preview's own padding, so the default of
/// zero still leaves white space at the page edge. `scale` multiplies every
/// type size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PdfConfig {
    pub page_size: PageSize,
    pub margin_mm: f32,
    pub scale: f32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin_mm: 0.0,
            scale: 1.0,
        }
    }
}

impl PdfConfig {
    /// Width left for text once margin and padding are taken from both sides.
    pub fn column_width_mm(&self) -> f32 {
        let (page_w, _) = self.page_size.dimensions_mm();
        page_w - 2.0 * (self.margin_mm + PADDING_MM)
    }
}

fn file_stem(profile: &Profile) -> &str {
    let stem = profile.full_name.trim();
    if stem.is_empty() {
        "resume"
    } else {
        stem
    }
}

/// `<full name>.pdf`, or `resume.pdf` when the name is blank. Characters that
/// cannot appear in a quoted header parameter are replaced with `_`.
pub fn pdf_filename(profile: &Profile) -> String {
    let safe: String = file_stem(profile)
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}.pdf")
}

/// `Content-Disposition` value carrying the ASCII fallback name and the
/// UTF-8 name as an RFC 5987 `filename*` parameter.
pub fn content_disposition(profile: &Profile) -> String {
    let utf8_name = format!("{}.pdf", file_stem(profile));
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        pdf_filename(profile),
        urlencoding::encode(&utf8_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_defaults_to_resume() {
        assert_eq!(pdf_filename(&Profile::default()), "resume.pdf");
    }

    #[test]
    fn test_filename_uses_full_name() {
        let profile = Profile {
            full_name: "Ada \"The\" Lovelace".into(),
            ..Default::default()
        };
        assert_eq!(pdf_filename(&profile), "Ada _The_ Lovelace.pdf");
    }

    #[test]
    fn test_content_disposition_keeps_unicode_name() {
        let profile = Profile {
            full_name: "Рухшод Алиев".into(),
            ..Default::default()
        };
        assert_eq!(
            content_disposition(&profile),
            "attachment; filename=\"______ _____.pdf\"; \
             filename*=UTF-8''%D0%A0%D1%83%D1%85%D1%88%D0%BE%D0%B4%20%D0%90%D0%BB%D0%B8%D0%B5%D0%B2.pdf"
        );
        assert_eq!(
            content_disposition(&Profile::default()),
            "attachment; filename=\"resume.pdf\"; filename*=UTF-8''resume.pdf"
        );
    }

    #[test]
    fn test_column_width_accounts_for_margin() {
        let config = PdfConfig {
            margin_mm: 20.0,
            ..Default::default()
        };
        assert!((config.column_width_mm() - 140.0).abs() < 1e-4);
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!("Letter".parse::<PageSize>().unwrap(), PageSize::Letter);
        assert!("a5".parse::<PageSize>().is_err());
    }
}
