use bytes::Bytes;
use serde::Serialize;

/// Declared content type of an upload; selects the extraction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    PlainText,
    Other,
}

impl MediaType {
    /// Classifies a `Content-Type` header value. Parameters such as
    /// `charset` are ignored and the comparison is case-insensitive.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match essence.as_deref() {
            Some("application/pdf") => MediaType::Pdf,
            Some("text/plain") => MediaType::PlainText,
            _ => MediaType::Other,
        }
    }
}

/// A file received on `/analyze`. Lives only for the duration of one request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Bytes,
    pub media_type: MediaType,
    pub original_name: String,
}

impl UploadedFile {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Canned result returned when the model's reply cannot be decoded.
///
/// Carries the legacy `score`/`summary` keys alongside `overallScore`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackAnalysis {
    pub score: u32,
    pub overall_score: u32,
    pub strengths: [&'static str; 3],
    pub improvements: [&'static str; 3],
    pub summary: &'static str,
}

pub const FALLBACK_SCORE: u32 = 75;

pub const FALLBACK_ANALYSIS: FallbackAnalysis = FallbackAnalysis {
    score: FALLBACK_SCORE,
    overall_score: FALLBACK_SCORE,
    strengths: [
        "Resume uploaded successfully",
        "Content extracted from document",
        "Ready for detailed analysis",
    ],
    improvements: [
        "Add more quantifiable achievements",
        "Include relevant keywords for ATS",
        "Improve formatting for better readability",
    ],
    summary: "Resume analyzed. Consider the suggestions above for improvements.",
};
