//! Plain-text prompt rendering

use crate::types::{Locale, Token, TokenKind, TokenSequence};

/// Suffix marking a sentence that names at least one noun
pub const NOUN_ANNOTATION: &str = " (NOUN)";

/// Render a token sequence as prompt text
///
/// Fixed vocabulary resolves to its surface form in `locale`, free text is
/// emitted as entered, and tokens with an empty surface (English subject and
/// object markers, blank fields) are dropped. Each chain becomes one line.
pub fn render(sequence: &TokenSequence, locale: Locale) -> String {
    sequence
        .chains()
        .into_iter()
        .map(|chain| sentence(chain, locale))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate the annotated prompt the editor sends to a model
///
/// Each chain is one sentence on its own newline-terminated line. Sentences
/// containing a noun carry the [`NOUN_ANNOTATION`] suffix.
pub fn generate_prompt(sequence: &TokenSequence, locale: Locale) -> String {
    let mut output = String::new();

    for chain in sequence.chains() {
        let line = sentence(chain, locale);
        if line.is_empty() {
            continue;
        }
        output.push_str(&line);
        if chain.iter().any(|t| t.kind() == TokenKind::Noun) {
            output.push_str(NOUN_ANNOTATION);
        }
        output.push('\n');
    }

    output
}

fn sentence(chain: &[Token], locale: Locale) -> String {
    chain
        .iter()
        .map(|token| token.surface(locale).trim())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
