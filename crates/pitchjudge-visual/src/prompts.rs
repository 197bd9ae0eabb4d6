//! Vision prompt, grounded on
//! `original_source/project_context/image.py`'s `WorkflowAnalysisAgent`
//! prompt text.

pub fn analysis_prompt(image_count: usize) -> String {
    format!(
        "You are analyzing {image_count} images extracted from a hackathon pitch deck \
         (rendered slides/pages and embedded pictures, in that order). For EACH image, in order \
         starting at index 0, classify:\n\
         - description: one sentence describing what the image shows.\n\
         - type: one of Flowchart, Architecture, Screenshot, Chart, Table, Logo, Photo, Unknown.\n\
         - is_diagram: true only for flowcharts, architecture diagrams, charts, or tables that \
         convey structural or technical information.\n\
         - importance: one of critical, supporting, decorative, irrelevant. Use critical for \
         diagrams central to the technical approach, supporting for diagrams that add evidence, \
         decorative for logos/photos/backgrounds, irrelevant otherwise.\n\
         - confidence: 0.0-1.0.\n\n\
         Also produce an \"overall\" paragraph describing the workflow/architecture shown across \
         all diagram images combined, or an empty string if none are diagrams.\n\n\
         Output a SINGLE JSON object: {{\"overall\": string, \"images\": \
         [{{\"index\": int, \"description\": string, \"type\": string, \"is_diagram\": bool, \
         \"importance\": string, \"confidence\": number}}, ...]}}."
    )
}
