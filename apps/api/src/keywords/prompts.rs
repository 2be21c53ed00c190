/// Prompt for LLM-backed keyword extraction. `{jd_text}` is replaced with the
/// cleaned job description.
pub const KEYWORD_EXTRACTION_PROMPT_TEMPLATE: &str = r#"You are an expert technical recruiter analysing a job description.

Extract only concrete technical skills: programming languages, frameworks, libraries, tools, platforms, cloud services, databases, methodologies with a technical meaning, and certifications.

Do NOT include soft skills, company or team names, job titles, or generic business terms such as "communication", "leadership", "teamwork", "stakeholder", "collaboration", "innovation", "process improvement" or "compliance".

Classify every keyword as:
- "required": must-have, essential, mandatory, or listed without qualification
- "preferred": nice-to-have, bonus, optional, or explicitly marked as preferred

Rules:
- Each keyword is a single word or a short phrase, never a sentence.
- No duplicates or synonyms within a list.
- At most 20 keywords per list, most important first.
- When unsure, classify as "required" unless the text clearly marks it as preferred.

Return a JSON object of this exact shape:
{"required": ["Python", "SQL", "CI/CD"], "preferred": ["Kubernetes", "data modeling"]}

Job description:
"""
{jd_text}
"""
"#;
