//! Answer drafter: fills the STAR template for each interview question.
//! No randomness and no external calls: the same inputs always render the
//! same draft.

use serde::{Deserialize, Serialize};

use crate::answers::prompts::{FALLBACK_JOB_TITLE, STAR_ANSWER_TEMPLATE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerDraft {
    pub question: String,
    pub draft: String,
}

/// Renders the STAR outline for one question.
pub fn draft_answer(question: &str, job_title: &str) -> String {
    let job_title = if job_title.trim().is_empty() {
        FALLBACK_JOB_TITLE
    } else {
        job_title
    };
    render(
        STAR_ANSWER_TEMPLATE,
        &[("question", question), ("job_title", job_title)],
    )
}

/// One draft per non-blank question, in input order. Blank questions are
/// dropped; an empty result is for the caller to reject.
pub fn draft_answers<S: AsRef<str>>(questions: &[S], job_title: &str) -> Vec<AnswerDraft> {
    questions
        .iter()
        .map(|q| q.as_ref())
        .filter(|q| !q.trim().is_empty())
        .map(|q| AnswerDraft {
            question: q.to_string(),
            draft: draft_answer(q, job_title),
        })
        .collect()
}

/// Single-pass `{name}` substitution. Unknown placeholders are left as-is.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
