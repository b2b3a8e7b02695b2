//! Re-ranking prompt.

use std::fmt::Write;

use crate::profile::Role;

/// System instruction sent with every re-ranking request.
pub const SYSTEM_INSTRUCTION: &str = "You are a precise matchmaking assistant. \
Respond with only a JSON array and no other text.";

pub const SCORING_RUBRIC: &str = "\
Scoring rubric:
- 1.0: perfect match
- 0.7-0.9: strong match
- 0.4-0.6: partial match
- 0.1-0.3: weak match
- 0.0: no match

Evaluate each candidate on: topic similarity, expertise, experience, audience fit, \
format fit, language/region, and any explicit constraints in the request.";

const OUTPUT_FORMAT: &str = "\
Return a JSON array with exactly one object per candidate, in any order:
[{\"id\": \"<candidate id>\", \"score\": <number between 0.0 and 1.0>, \"explanation\": \"<one short sentence>\"}]";

const EMPTY_DESCRIPTION: &str = "(no profile details)";

/// Builds the single user prompt: rubric, the ask, then one block per candidate.
pub fn build_rerank_prompt(target_role: Role, ask: &str, candidates: &[(&str, String)]) -> String {
    let mut prompt = String::with_capacity(1024 + candidates.len() * 256);

    let _ = writeln!(
        prompt,
        "Score how well each {} candidate matches the request below.\n",
        target_role
    );
    let _ = writeln!(prompt, "{SCORING_RUBRIC}\n");
    let _ = writeln!(prompt, "Request:\n{}\n", single_line(ask));
    let _ = writeln!(prompt, "Candidates:");

    for (id, description) in candidates {
        let description = single_line(description);
        let description = if description.is_empty() {
            EMPTY_DESCRIPTION.to_string()
        } else {
            description
        };
        let _ = writeln!(prompt, "- id: {id}\n  description: {description}");
    }

    let _ = write!(prompt, "\n{OUTPUT_FORMAT}");
    prompt
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
