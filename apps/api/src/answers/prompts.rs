// Templates for the answer drafter. Placeholders are `{question}` and
// `{job_title}`; rendering is single-pass, so values containing braces are
// inserted verbatim.

/// STAR-method outline. The job title appears in the opening and closing lines.
pub const STAR_ANSWER_TEMPLATE: &str = "**Question:** {question}\n\n\
**Draft:** For the {job_title} role, I’d use a concise STAR structure:\n\
- **Situation/Task:** Briefly set context relevant to the question.\n\
- **Action:** 2–3 concrete actions I took (tools, frameworks, teamwork).\n\
- **Result:** Quantify impact if possible (time saved, defects reduced, revenue gained).\n\
- **Tie-back:** Close by aligning with the {job_title} responsibilities.";

/// Substituted when the job has no usable title.
pub const FALLBACK_JOB_TITLE: &str = "target";
