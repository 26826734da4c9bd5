// Interview answer drafts: deterministic STAR outlines per question.

pub mod drafter;
pub mod handlers;
pub mod prompts;
