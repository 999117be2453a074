// Prompt template for party affiliation prediction

use crate::util::normalize_whitespace;

/// Instruction block appended after the context. Identical for every call,
/// including single-candidate lists.
pub const INSTRUCTIONS: &str = r#"Task: choose exactly ONE value from the candidate parties listed above that this person was most likely affiliated with around the given year.

Return strict JSON with exactly these four fields:
{
  "pol_party": "<one value copied verbatim from the candidate parties>",
  "pol_party_relaxed": "<your best guess, even if uncertain; prefer a value from the candidate parties>",
  "justification": "<one or two sentences explaining the choice>",
  "confidence": <a number between 0 and 1>
}

Do NOT use Markdown formatting or code fences. Do NOT add any commentary before or after the JSON object."#;

/// Render the context block for one person.
pub fn context_block(person_name: &str, country: &str, year: i32, candidates: &[String]) -> String {
    let candidates = candidates
        .iter()
        .map(|c| normalize_whitespace(c))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Person: {}\nCountry: {}\nApproximate year: {}\nCandidate parties: {}",
        normalize_whitespace(person_name),
        country,
        year,
        candidates
    )
}

/// Build the full prompt: context block, blank line, fixed instructions.
pub fn build_prompt(person_name: &str, country: &str, year: i32, candidates: &[String]) -> String {
    format!(
        "{}\n\n{}",
        context_block(person_name, country, year, candidates),
        INSTRUCTIONS
    )
}
