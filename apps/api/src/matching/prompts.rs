// Prompt constants for resume-to-job scoring.

/// System prompt for match scoring. Enforces JSON-only output.
pub const MATCH_SYSTEM: &str = "You are an expert recruiter judging how well \
    a resume fits a job posting. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies outside the JSON.";

/// Match scoring prompt template.
/// Replace `{resume}`, `{job_title}`, `{job_description}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Score how well the resume below matches the job posting, from 0 (no overlap) to 100 (ideal candidate).

Weigh, in order: required skills coverage, relevant experience, keyword overlap.
An empty resume means the candidate is unknown — score low, do not refuse.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 72,
  "explanation": "One short paragraph naming the matched skills, the experience fit, and the biggest gaps."
}

JOB TITLE:
{job_title}

JOB POSTING:
{job_description}

RESUME:
{resume}"#;
