//! First-page PDF preview thumbnails.
//!
//! For every article, renders the first page of `<pdfs_dir>/<id>.pdf` and
//! writes `<previews_dir>/<id>-preview.jpg`, resized to the configured
//! width. Rasterization is an external collaborator behind the
//! [`Rasterizer`] trait — one shot, fallible, no retries. The shipped
//! implementation shells out to Poppler's `pdftoppm`; the `image` crate
//! does the resize (Lanczos3) and the JPEG encode.
//!
//! ## Batch semantics
//!
//! Each article yields a [`PreviewOutcome`]; a failed conversion (missing
//! PDF, rasterizer error, encode error) is recorded and reported but never
//! aborts the batch. The CLI prints the per-item report plus summary counts
//! and exits nonzero if anything failed.
//!
//! ## Filename convention
//!
//! The canonical preview name is `<id>-preview.jpg`. Stale previews are
//! removed before the batch so renamed or deleted articles don't leave
//! orphaned thumbnails behind.

use crate::config::SiteConfig;
use crate::store::Store;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("rasterizer failed: {0}")]
    Command(String),
    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One-shot first-page rasterization of a PDF. External collaborator:
/// fallible, no retry semantics.
pub trait Rasterizer {
    fn rasterize_first_page(&self, pdf: &Path) -> Result<DynamicImage, RasterizeError>;
}

/// Poppler-backed rasterizer. Requires `pdftoppm` on `PATH`.
pub struct PdftoppmRasterizer {
    /// Render density in DPI.
    pub density: u32,
}

impl Rasterizer for PdftoppmRasterizer {
    fn rasterize_first_page(&self, pdf: &Path) -> Result<DynamicImage, RasterizeError> {
        let stem = pdf
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "page".to_string());
        // -singlefile keeps pdftoppm from appending a page counter to the
        // output name.
        let prefix = std::env::temp_dir().join(format!("{}-{}", stem, std::process::id()));

        let output = Command::new("pdftoppm")
            .arg("-png")
            .args(["-f", "1", "-l", "1", "-singlefile"])
            .arg("-r")
            .arg(self.density.to_string())
            .arg(pdf)
            .arg(&prefix)
            .output()?;
        if !output.status.success() {
            return Err(RasterizeError::Command(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let page_png = prefix.with_extension("png");
        let page = image::open(&page_png)?;
        let _ = fs::remove_file(&page_png);
        Ok(page)
    }
}

/// Result of one preview generation attempt.
#[derive(Debug)]
pub enum PreviewOutcome {
    Generated { id: String, path: PathBuf },
    Failed { id: String, reason: String },
}

impl PreviewOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, PreviewOutcome::Generated { .. })
    }

    pub fn id(&self) -> &str {
        match self {
            PreviewOutcome::Generated { id, .. } | PreviewOutcome::Failed { id, .. } => id,
        }
    }
}

/// Per-batch report: one outcome per article, in store order.
#[derive(Debug, Default)]
pub struct PreviewReport {
    pub outcomes: Vec<PreviewOutcome>,
}

impl PreviewReport {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_generated()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }
}

/// Canonical preview filename for an article id.
pub fn preview_filename(id: &str) -> String {
    format!("{id}-preview.jpg")
}

/// Generate previews for every article in the store.
///
/// `Err` only for failures preceding the batch (creating the output
/// directory); conversion failures land in the report.
pub fn generate_previews(
    store: &Store,
    config: &SiteConfig,
    pdfs_dir: &Path,
    previews_dir: &Path,
    rasterizer: &dyn Rasterizer,
) -> Result<PreviewReport, PreviewError> {
    fs::create_dir_all(previews_dir)?;
    clean_previews(previews_dir)?;

    let mut report = PreviewReport::default();
    for article in store.iter() {
        let pdf = pdfs_dir.join(format!("{}.pdf", article.id));
        let out = previews_dir.join(preview_filename(&article.id));

        let outcome = if !pdf.exists() {
            PreviewOutcome::Failed {
                id: article.id.clone(),
                reason: format!("PDF file not found: {}", pdf.display()),
            }
        } else {
            match convert_one(&pdf, &out, config, rasterizer) {
                Ok(()) => PreviewOutcome::Generated {
                    id: article.id.clone(),
                    path: out,
                },
                Err(err) => PreviewOutcome::Failed {
                    id: article.id.clone(),
                    reason: err.to_string(),
                },
            }
        };
        report.outcomes.push(outcome);
    }
    Ok(report)
}

fn convert_one(
    pdf: &Path,
    out: &Path,
    config: &SiteConfig,
    rasterizer: &dyn Rasterizer,
) -> Result<(), RasterizeError> {
    let page = rasterizer.rasterize_first_page(pdf)?;
    let resized = page
        .resize(config.previews.width, u32::MAX, FilterType::Lanczos3)
        .to_rgb8();
    let file = fs::File::create(out)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, config.previews.quality);
    resized.write_with_encoder(encoder)?;
    Ok(())
}

/// Remove existing `*-preview.jpg` files from the previews directory.
fn clean_previews(previews_dir: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(previews_dir)? {
        let path = entry?.path();
        let is_preview = path
            .file_name()
            .map(|n| n.to_string_lossy().ends_with("-preview.jpg"))
            .unwrap_or(false);
        if path.is_file() && is_preview {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}
