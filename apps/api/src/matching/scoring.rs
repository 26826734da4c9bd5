//! Compatibility scoring: how much of a job's vocabulary a resume covers.
//!
//! Default backend: `KeywordOverlapScorer` (pure set overlap, deterministic).
//! `AppState` holds an `Arc<dyn FitScorer>` so another backend can be swapped
//! in at startup without touching handlers.

use serde::{Deserialize, Serialize};

use crate::matching::keywords::KeywordSet;

/// Reason emitted when the job text has no qualifying keywords.
pub const NO_JOB_KEYWORDS_REASON: &str = "No meaningful keywords detected in the job description.";

/// Keywords quoted inside each human-readable reason.
pub const REASON_EXAMPLE_LIMIT: usize = 10;

/// Cap on `matched_keywords` / `missing_keywords` to bound payload size.
pub const KEYWORD_LIST_LIMIT: usize = 50;

/// Scorer output, returned to clients as-is. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u32, // 0 – 100
    pub reasons: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

impl ScoreReport {
    fn no_job_keywords() -> Self {
        Self {
            score: 0,
            reasons: vec![NO_JOB_KEYWORDS_REASON.to_string()],
            matched_keywords: vec![],
            missing_keywords: vec![],
        }
    }
}

/// The fit scorer trait. Implement this to swap backends without touching
/// the endpoint or caller code.
pub trait FitScorer: Send + Sync {
    fn score(&self, job_keywords: &KeywordSet, resume_keywords: &KeywordSet) -> ScoreReport;

    /// Label exposed in logs so it is clear which backend produced a score.
    fn backend(&self) -> &'static str;
}

/// Overlap scorer: `score = round(|J ∩ R| / |J| * 100)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordOverlapScorer;

impl FitScorer for KeywordOverlapScorer {
    fn score(&self, job_keywords: &KeywordSet, resume_keywords: &KeywordSet) -> ScoreReport {
        compute_overlap(job_keywords, resume_keywords)
    }

    fn backend(&self) -> &'static str {
        "keyword_overlap"
    }
}

fn compute_overlap(job_keywords: &KeywordSet, resume_keywords: &KeywordSet) -> ScoreReport {
    if job_keywords.is_empty() {
        return ScoreReport::no_job_keywords();
    }

    // BTreeSet iteration is ordered, so both lists come out sorted.
    let overlap: Vec<&String> = job_keywords.intersection(resume_keywords).collect();
    let missing: Vec<&String> = job_keywords.difference(resume_keywords).collect();

    let score = percent_half_even(overlap.len(), job_keywords.len());

    let mut reasons = vec![format!(
        "Matched {} of {} job keywords.",
        overlap.len(),
        job_keywords.len()
    )];
    if !overlap.is_empty() {
        reasons.push(format!(
            "Examples of matched keywords: {}",
            join_first(&overlap, REASON_EXAMPLE_LIMIT)
        ));
    }
    if !missing.is_empty() {
        reasons.push(format!(
            "Missing keywords to consider: {}",
            join_first(&missing, REASON_EXAMPLE_LIMIT)
        ));
    }

    ScoreReport {
        score,
        reasons,
        matched_keywords: first_owned(&overlap, KEYWORD_LIST_LIMIT),
        missing_keywords: first_owned(&missing, KEYWORD_LIST_LIMIT),
    }
}

/// `part / whole * 100` rounded to the nearest integer, ties to even.
/// Exact integer arithmetic: 1/8 gives 12, 3/8 gives 38. Ties are decided on
/// the exact rational, so 23/40 (57.5) gives 58 where `23.0 / 40.0 * 100.0`
/// lands just under the tie and would round to 57.
pub fn percent_half_even(part: usize, whole: usize) -> u32 {
    let whole = whole.max(1) as u64;
    let scaled = part as u64 * 100;
    let quotient = scaled / whole;
    let twice_remainder = (scaled % whole) * 2;

    let rounded = if twice_remainder > whole || (twice_remainder == whole && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded.min(100) as u32
}

fn join_first(words: &[&String], limit: usize) -> String {
    words
        .iter()
        .take(limit)
        .map(|w| w.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn first_owned(words: &[&String], limit: usize) -> Vec<String> {
    words.iter().take(limit).map(|w| (*w).clone()).collect()
}
