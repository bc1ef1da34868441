use anyhow::{bail, Context, Result};

use crate::render::{PageSize, PdfConfig};

/// Narrowest text column the PDF layout accepts.
const MIN_COLUMN_MM: f32 = 60.0;
const MAX_PDF_SCALE: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    /// Required when `store_backend` is `Postgres`.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    pub name_max_chars: usize,
    /// Origin of the web client; share links point at `<base>/resume/<id>`.
    pub public_base_url: String,
    pub pdf: PdfConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_backend: StoreBackend::Memory,
            database_url: None,
            database_max_connections: 10,
            port: 8080,
            rust_log: "info".to_string(),
            name_max_chars: 8,
            public_base_url: "http://localhost:3000".to_string(),
            pdf: PdfConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let store_backend = match optional_env("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("STORE_BACKEND must be 'postgres' or 'memory', got '{other}'"),
        };
        let database_url = match store_backend {
            StoreBackend::Postgres => Some(require_env("DATABASE_URL")?),
            StoreBackend::Memory => optional_env("DATABASE_URL"),
        };

        let pdf = PdfConfig {
            page_size: match optional_env("PDF_PAGE_SIZE") {
                Some(v) => v
                    .parse::<PageSize>()
                    .map_err(anyhow::Error::msg)
                    .context("PDF_PAGE_SIZE is invalid")?,
                None => PageSize::A4,
            },
            margin_mm: parse_env("PDF_MARGIN_MM", 0.0)?,
            scale: parse_env("PDF_SCALE", 1.0)?,
        };
        check_pdf(&pdf)?;

        let public_base_url = optional_env("PUBLIC_BASE_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Config {
            store_backend,
            database_url,
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            name_max_chars: parse_env("RESUME_NAME_MAX_CHARS", 8)?,
            public_base_url,
            pdf,
        })
    }
}

fn check_pdf(pdf: &PdfConfig) -> Result<()> {
    if !pdf.margin_mm.is_finite() || pdf.margin_mm < 0.0 {
        bail!("PDF_MARGIN_MM must be zero or positive, got {}", pdf.margin_mm);
    }
    if pdf.column_width_mm() < MIN_COLUMN_MM {
        bail!(
            "PDF_MARGIN_MM={} leaves less than {MIN_COLUMN_MM} mm of text on a {:?} page",
            pdf.margin_mm,
            pdf.page_size
        );
    }
    if !pdf.scale.is_finite() || pdf.scale <= 0.0 || pdf.scale > MAX_PDF_SCALE {
        bail!(
            "PDF_SCALE must be greater than 0 and at most {MAX_PDF_SCALE}, got {}",
            pdf.scale
        );
    }
    Ok(())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(margin_mm: f32, scale: f32) -> PdfConfig {
        PdfConfig {
            margin_mm,
            scale,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_pdf_settings_pass() {
        assert!(check_pdf(&PdfConfig::default()).is_ok());
        assert!(check_pdf(&pdf(20.0, 1.5)).is_ok());
    }

    #[test]
    fn test_oversized_margin_is_rejected() {
        let err = check_pdf(&pdf(90.0, 1.0)).unwrap_err();
        assert!(err.to_string().contains("PDF_MARGIN_MM"));
        assert!(check_pdf(&pdf(-1.0, 1.0)).is_err());
    }

    #[test]
    fn test_bad_scale_is_rejected() {
        for scale in [0.0, -1.0, f32::NAN, 10.0] {
            let err = check_pdf(&pdf(0.0, scale)).unwrap_err();
            assert!(err.to_string().contains("PDF_SCALE"));
        }
    }
}
