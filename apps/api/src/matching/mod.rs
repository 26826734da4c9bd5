// Resume ↔ job matching: extraction, keyword sets, overlap scoring.
// Everything below `handlers` is synchronous and free of shared mutable state.

pub mod extract;
pub mod handlers;
pub mod keywords;
pub mod scoring;

use crate::matching::keywords::KeywordExtractor;
use crate::matching::scoring::{FitScorer, ScoreReport};

/// Scores a resume text against a job text.
///
/// Both texts must already be checked non-blank by the caller.
pub fn score_texts(
    extractor: &KeywordExtractor,
    scorer: &dyn FitScorer,
    resume_text: &str,
    job_text: &str,
) -> ScoreReport {
    let resume_keywords = extractor.keywords(resume_text);
    let job_keywords = extractor.keywords(job_text);
    scorer.score(&job_keywords, &resume_keywords)
}
