//! Prompt templates, grounded verbatim on the rubric contract in spec §4.3
//! and on `original_source/project_context/agents/scoring_agent.py`'s
//! `STRICT_RUBRIC` constant and prompt bodies.

pub const STRICT_RUBRIC: &str = "\
Scoring rubric. Use INTEGER 1-10. Avoid default 10s.

Anchors:
- 10: Exceptional and proven in-deck with clear metrics, full architecture or demo.
- 8: Strong with one notable gap.
- 6: Adequate with multiple gaps; little hard evidence.
- 4: Minimal coverage; mostly claims.
- 2: Not addressed.

Rules:
- Treat diagram evidence equal to text evidence. If text and diagram conflict, prefer the diagram.
- Missing or vague -> 2-4; partial 5-7; low evidence cap 8.
- At most one criterion may be 10; bias downward if uncertain.

Checklist to consider:
problem framing, assumptions, baselines, datasets, metrics/KPIs & eval plan,
architecture & scalability, latency/cost estimates, risks & mitigations,
privacy/compliance, security, deployment plan, adoption path.";

const TIE_BREAK_NOTE: &str = "\
Tie-break order if totals match:
Innovation & Uniqueness > Technical Feasibility > Potential Impact
> Problem Understanding > Implementation Approach > Team Readiness.";

const RUBRIC_KEYS_LINE: &str = "\
Problem Understanding, Innovation & Uniqueness, Technical Feasibility,
Implementation Approach, Team Readiness, Potential Impact";

pub fn scoring_prompt(deck_text: &str, workflow_report_text: &str) -> String {
    format!(
        "You are a strict hackathon judge. Use BOTH sources of evidence with equal weight:\n\
         (A) Deck text\n\
         (B) Diagram summary extracted from images (only images classified as diagrams and important)\n\n\
         {STRICT_RUBRIC}\n\n\
         Diagram Summary (evidence):\n{workflow_report_text}\n\n\
         Evaluation:\n\n\
         1) Scoring & Summary:\n\
         \u{20}  - Score each EXACT key (INTEGER 1-10):\n\
         \u{20}    {RUBRIC_KEYS_LINE}.\n\
         \u{20}  - Provide a concise project summary grounded in diagram + text evidence.\n\n\
         2) Workflow Analysis:\n\
         \u{20}  - If diagrams exist, describe them step-by-step and combine into an overall workflow.\n\
         \u{20}  - Else, set workflow_analysis to null.\n\n\
         {TIE_BREAK_NOTE}\n\n\
         Output a SINGLE JSON object with keys: team_name, scores (object keyed by the six \
         rubric names above), summary, workflow_analysis (object with key \"overall\" or null).\n\n\
         Deck Text:\n{deck_text}"
    )
}

pub fn combined_prompt(deck_text: &str, workflow_report_text: &str) -> String {
    format!(
        "You are a strict hackathon judge and mentor. Use deck text + diagram summary with equal weight.\n\
         Consider only images that are diagrams and marked critical/supporting as core evidence.\n\n\
         {STRICT_RUBRIC}\n\n\
         Diagram Summary (evidence):\n{workflow_report_text}\n\n\
         1) Scoring & Summary:\n\
         \u{20}  - Score the six criteria ({RUBRIC_KEYS_LINE}) and provide an evidence-backed summary.\n\n\
         2) Workflow Analysis:\n\
         \u{20}  - Describe diagrams and overall workflow if present. Else null.\n\n\
         3) Feedback:\n\
         \u{20}  - Fields: positive, criticism, technical, suggestions.\n\
         \u{20}  - Make each field detailed, numbered, and reference slides/diagrams when possible.\n\n\
         {TIE_BREAK_NOTE}\n\n\
         Output a SINGLE JSON object with keys: team_name, scores, summary, workflow_analysis, feedback \
         (object with keys positive, criticism, technical, suggestions).\n\n\
         Deck Text:\n{deck_text}"
    )
}

pub fn feedback_prompt(deck_text: &str, workflow_report_text: &str, scoring_summary: &str, scores_debug: &str) -> String {
    format!(
        "You are a hackathon mentor. Use BOTH the scoring summary and the diagram summary as evidence.\n\
         Return detailed, research-oriented guidance. Use numbered lists and reference slides/diagrams when possible.\n\n\
         Diagram Summary (evidence):\n{workflow_report_text}\n\n\
         Inputs:\n\
         Summary: {scoring_summary}\n\
         Scores: {scores_debug}\n\n\
         Output a SINGLE JSON object with keys:\n\
         - positive: 4-7 strengths with slide/diagram refs and impact.\n\
         - criticism: 4-7 gaps, risks, assumption checks.\n\
         - technical: architecture, data, eval plan, scalability, privacy/security, cost/latency, trade-offs.\n\
         - suggestions: prioritized next steps with milestones, acceptance criteria, fallbacks, risk mitigations.\n\n\
         Deck Text:\n{deck_text}"
    )
}
