//! Text Extractor: turns an uploaded PDF or plain-text file into a single string.

use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::analysis::models::{MediaType, UploadedFile};

/// Extracted text shorter than this (after trimming) is rejected.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Only PDF and TXT files supported")]
    UnsupportedMediaType,

    #[error("Extracted text too short ({chars} characters)")]
    TooShort { chars: usize },

    #[error("Failed to stage PDF for extraction: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),
}

/// Extracts text from uploads. PDFs are staged under `temp_dir` for the
/// duration of the parse only.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    temp_dir: PathBuf,
}

impl TextExtractor {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
        }
    }

    pub async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractError> {
        let text = match file.media_type {
            MediaType::PlainText => String::from_utf8_lossy(&file.bytes).into_owned(),
            MediaType::Pdf => self.extract_pdf(file.bytes.clone()).await?,
            MediaType::Other => return Err(ExtractError::UnsupportedMediaType),
        };

        ensure_min_length(text)
    }

    async fn extract_pdf(&self, bytes: Bytes) -> Result<String, ExtractError> {
        let temp_dir = self.temp_dir.clone();
        // pdf-extract is synchronous and may panic on malformed input;
        // a panic surfaces here as a JoinError.
        tokio::task::spawn_blocking(move || extract_pdf_blocking(&temp_dir, &bytes))
            .await
            .map_err(|e| ExtractError::Pdf(format!("extraction task aborted: {e}")))?
    }
}

fn extract_pdf_blocking(temp_dir: &Path, bytes: &[u8]) -> Result<String, ExtractError> {
    std::fs::create_dir_all(temp_dir)?;

    // Removed when `staged` drops, on every exit path.
    let mut staged = tempfile::Builder::new()
        .prefix(&format!("resume-{}-", Utc::now().timestamp_millis()))
        .suffix(".pdf")
        .tempfile_in(temp_dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;

    debug!("Staged PDF at {}", staged.path().display());

    let pages = pdf_extract::extract_text_by_pages(staged.path())
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    Ok(join_pages(&pages))
}

/// Fragments within a page are joined by single spaces, pages by newlines.
fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn ensure_min_length(text: String) -> Result<String, ExtractError> {
    let chars = text.trim().chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(ExtractError::TooShort { chars });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME_TXT: &str = "Jane Doe\nSenior Rust Engineer\n\
        Built distributed caching layer cutting p99 latency by 40% across 3 services.";

    fn upload(bytes: &[u8], media_type: MediaType) -> UploadedFile {
        UploadedFile {
            bytes: Bytes::copy_from_slice(bytes),
            media_type,
            original_name: "resume".to_string(),
        }
    }

    fn dir_is_empty(dir: &Path) -> bool {
        match std::fs::read_dir(dir) {
            Ok(mut entries) => entries.next().is_none(),
            Err(_) => true,
        }
    }

    /// Builds a small but well-formed PDF with one Helvetica text line per page.
    fn minimal_pdf(pages: &[&str]) -> Vec<u8> {
        let page_count = pages.len();
        let font_id = 3 + 2 * page_count;
        let mut objects: Vec<String> = Vec::new();

        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
        let kids: Vec<String> = (0..page_count)
            .map(|i| format!("{} 0 R", 3 + 2 * i))
            .collect();
        objects.push(format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ));
        for (i, line) in pages.iter().enumerate() {
            let content_id = 4 + 2 * i;
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {content_id} 0 R >>"
            ));
            let stream = format!("BT /F1 12 Tf 72 720 Td ({line}) Tj ET");
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ));
        }
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
        }
        let xref_at = out.len();
        out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
        out.push_str("0000000000 65535 f \n");
        for offset in offsets {
            out.push_str(&format!("{offset:010} 00000 n \n"));
        }
        out.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_at
        ));
        out.into_bytes()
    }

    #[tokio::test]
    async fn test_plain_text_is_returned_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = TextExtractor::new(dir.path());
        let text = extractor
            .extract(&upload(RESUME_TXT.as_bytes(), MediaType::PlainText))
            .await
            .unwrap();
        assert_eq!(text, RESUME_TXT);
    }

    #[tokio::test]
    async fn test_plain_text_keeps_surrounding_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = TextExtractor::new(dir.path());
        let padded = format!("\n\n  {RESUME_TXT}  \n");
        let text = extractor
            .extract(&upload(padded.as_bytes(), MediaType::PlainText))
            .await
            .unwrap();
        assert_eq!(text, padded);
    }

    #[tokio::test]
    async fn test_short_text_is_rejected_after_trim() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = TextExtractor::new(dir.path());
        // 49 visible characters padded with whitespace.
        let short = format!("   {}   \n", "a".repeat(49));
        let err = extractor
            .extract(&upload(short.as_bytes(), MediaType::PlainText))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::TooShort { chars: 49 }));
    }

    #[tokio::test]
    async fn test_exactly_fifty_chars_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = TextExtractor::new(dir.path());
        let text = "b".repeat(50);
        assert!(extractor
            .extract(&upload(text.as_bytes(), MediaType::PlainText))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_other_media_type_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = TextExtractor::new(dir.path());
        let err = extractor
            .extract(&upload(RESUME_TXT.as_bytes(), MediaType::Other))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedMediaType));
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_fails_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("temp");
        let extractor = TextExtractor::new(&staging);
        let result = extractor
            .extract(&upload(b"this is not a pdf at all", MediaType::Pdf))
            .await;
        assert!(result.is_err());
        assert!(staging.exists(), "staging directory is created on demand");
        assert!(dir_is_empty(&staging));
    }

    #[tokio::test]
    async fn test_pdf_pages_are_joined_and_staging_file_removed() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = TextExtractor::new(dir.path());
        let pdf = minimal_pdf(&[
            "Jane Doe Senior Rust Engineer with ten years of systems work",
            "Built distributed caching layer cutting latency by forty percent",
        ]);
        let text = extractor
            .extract(&upload(&pdf, MediaType::Pdf))
            .await
            .unwrap();
        assert!(text.contains("Rust"), "got: {text}");
        assert!(text.contains("caching"), "got: {text}");
        assert!(dir_is_empty(dir.path()));
    }

    #[test]
    fn test_join_pages_normalizes_fragments() {
        let pages = vec![
            "  Jane   Doe\nEngineer ".to_string(),
            String::new(),
            "Skills:\tRust".to_string(),
        ];
        assert_eq!(join_pages(&pages), "Jane Doe Engineer\n\nSkills: Rust");
    }
}
