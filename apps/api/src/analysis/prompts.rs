// Prompt Builder for resume analysis.

/// Resume text beyond this many characters is dropped before prompting.
pub const MAX_RESUME_CHARS: usize = 4500;

/// Analysis prompt template. Replace `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) resume analyzer. Read the resume below carefully and assess it.

RESUME CONTENT:
{resume_text}

Base every score on the ACTUAL content above. Never return placeholder numbers.

Score each category from 0 to 100:
- ATS Compatibility: standard section headings, clean formatting, no tables or images
- Work Experience: quality of role descriptions, achievements, relevance
- Content: overall clarity, completeness and quality of information
- Formatting: professional appearance, readability, consistency
- Skills: number and relevance of technical and professional skills
- Keywords: presence of industry-relevant keywords

The overall score is the average of the six category scores.

Return a JSON object with this EXACT shape (replace every value with your assessment):
{
  "overallScore": <0-100, average of the category scores>,
  "categoryScores": {
    "atsCompatibility": <0-100>,
    "workExperience": <0-100>,
    "content": <0-100>,
    "formatting": <0-100>,
    "skills": <0-100>,
    "keywords": <0-100>
  },
  "strengths": [
    "<strength found in this resume>",
    "<strength found in this resume>",
    "<strength found in this resume>"
  ],
  "improvements": [
    "<gap or weakness found in this resume>",
    "<gap or weakness found in this resume>",
    "<gap or weakness found in this resume>"
  ],
  "suggestions": [
    "<specific actionable suggestion>",
    "<specific actionable suggestion>",
    "<specific actionable suggestion>"
  ],
  "feedback": "<3-4 sentences about THIS resume>"
}

Respond with the JSON object only."#;

/// Builds the analysis prompt for `resume_text`, keeping at most
/// `MAX_RESUME_CHARS` characters of it.
pub fn build_analysis_prompt(resume_text: &str) -> String {
    let resume_text = truncate_chars(resume_text, MAX_RESUME_CHARS);
    ANALYSIS_PROMPT_TEMPLATE.replacen("{resume_text}", resume_text, 1)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
