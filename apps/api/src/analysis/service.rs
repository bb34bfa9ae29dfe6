//! Analysis Service: extract → prompt → model → sanitize → decode.
//!
//! Steps run strictly in order for each request. A reply that does not decode
//! as a JSON object is replaced by `FALLBACK_ANALYSIS`; the model is never
//! called twice.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::analysis::extractor::TextExtractor;
use crate::analysis::models::{UploadedFile, FALLBACK_ANALYSIS};
use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::sanitizer::sanitize_json_response;
use crate::errors::AppError;
use crate::llm_client::CompletionProvider;

const LOG_PREVIEW_CHARS: usize = 200;

/// Terminal state of a successful analysis request.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The model's reply, decoded as-is. Its shape is not validated.
    Decoded(Map<String, Value>),
    /// The reply could not be decoded; the canned result stands in.
    Fallback,
}

impl AnalysisOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback)
    }

    pub fn into_json(self) -> Value {
        match self {
            AnalysisOutcome::Decoded(map) => Value::Object(map),
            AnalysisOutcome::Fallback => {
                serde_json::to_value(FALLBACK_ANALYSIS).unwrap_or(Value::Null)
            }
        }
    }
}

#[derive(Clone)]
pub struct AnalysisService {
    extractor: TextExtractor,
    llm: Arc<dyn CompletionProvider>,
}

impl AnalysisService {
    pub fn new(extractor: TextExtractor, llm: Arc<dyn CompletionProvider>) -> Self {
        Self { extractor, llm }
    }

    pub async fn analyze(&self, file: &UploadedFile) -> Result<AnalysisOutcome, AppError> {
        let text = self.extractor.extract(file).await?;
        info!("Text extracted ({} chars)", text.chars().count());

        let prompt = build_analysis_prompt(&text);

        info!("Sending resume to {}", self.llm.model());
        let raw = self.llm.complete(&prompt).await?;
        info!("Model response received");
        debug!("Raw response: {}", preview(&raw));

        let cleaned = sanitize_json_response(&raw);
        debug!("Cleaned response: {}", preview(&cleaned));

        Ok(decode_analysis(&cleaned))
    }
}

/// Decodes sanitized model output. Anything but a JSON object falls back.
pub fn decode_analysis(text: &str) -> AnalysisOutcome {
    match serde_json::from_str::<Map<String, Value>>(text) {
        Ok(analysis) => {
            let score = analysis.get("overallScore").cloned().unwrap_or(Value::Null);
            info!("Analysis complete - score: {score}");
            AnalysisOutcome::Decoded(analysis)
        }
        Err(e) => {
            warn!("Model response is not a JSON object ({e}); returning fallback analysis");
            debug!("Text that failed to decode: {text}");
            AnalysisOutcome::Fallback
        }
    }
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
