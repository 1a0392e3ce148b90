// Prompt constants for the Growth Engine.

/// Gap analysis prompt template. Replace `{job_description}` before sending.
/// The coached profile is fixed; only the target JD varies per request.
pub const GAP_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Act as a Career Coach. Compare my profile (ECE Student) against: "{job_description}"
OUTPUT FORMAT: Match Score: %, Missing Skills: List, Study Plan: One sentence."#;

pub fn gap_analysis_prompt(job_description: &str) -> String {
    GAP_ANALYSIS_PROMPT_TEMPLATE.replace("{job_description}", job_description)
}
