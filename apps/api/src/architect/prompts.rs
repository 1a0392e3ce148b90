// Prompt constants for the Resume Architect.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System framing for resume rewrites — enforces LaTeX-only output.
pub const OPTIMIZE_SYSTEM: &str = r"Role: You are an expert LaTeX Engineer and Career Coach.
Task: Modify the LaTeX code to fulfill the request.

Strict Constraints:
1. Output ONLY the valid LaTeX code. No conversational text.
2. Ensure code is compilable (do not break \begin{itemize}).
3. If a JD is provided, subtly integrate keywords.
4. Use \documentclass{article} if starting from scratch.";

/// Rewrite prompt template. Replace `{current_latex}` and `{description}`
/// before sending.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r"{system}

INPUT DATA:
Current LaTeX: {current_latex}
User Request / Job Description: {description}";

/// Builds the full rewrite prompt from the caller's request.
pub fn optimize_prompt(description: &str, current_latex: &str) -> String {
    OPTIMIZE_PROMPT_TEMPLATE
        .replace("{system}", OPTIMIZE_SYSTEM)
        .replace("{current_latex}", current_latex)
        .replace("{description}", description)
}
