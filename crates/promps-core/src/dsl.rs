//! Space-delimited DSL text
//!
//! The editor's text form: one token per word, nouns prefixed with `_N:`,
//! verbs with `_V:`, everything else as its surface form. Each line, and
//! each run separated by a double space, is one chain. Free text cannot
//! contain spaces in this form.

use crate::types::{
    Article, BlockType, Locale, Particle, Punctuation, Token, TokenSequence, Verb,
};

/// Marker for noun tokens
pub const NOUN_MARKER: &str = "_N:";
/// Marker for verb tokens
pub const VERB_MARKER: &str = "_V:";

/// Serialize a sequence to DSL text, one line per chain
///
/// Tokens with an empty surface in `locale` are omitted, so English output
/// does not carry the subject and object markers.
pub fn to_dsl(sequence: &TokenSequence, locale: Locale) -> String {
    sequence
        .chains()
        .into_iter()
        .map(|chain| {
            chain
                .iter()
                .filter_map(|token| {
                    let surface = token.surface(locale);
                    match token.block_type {
                        BlockType::Noun => Some(format!("{NOUN_MARKER}{surface}")),
                        BlockType::Verb(_) | BlockType::CustomVerb => {
                            Some(format!("{VERB_MARKER}{surface}"))
                        }
                        _ if surface.is_empty() => None,
                        _ => Some(surface.to_string()),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse DSL text back into a token sequence
pub fn parse_dsl(text: &str) -> TokenSequence {
    let mut sequence = TokenSequence::new();
    let mut chain = 0;

    for line in text.lines() {
        for sentence in line.split("  ") {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }
            for word in words {
                sequence.push_in_chain(classify(word), chain);
            }
            chain += 1;
        }
    }

    sequence
}

/// Classify one DSL word
fn classify(word: &str) -> Token {
    if let Some(text) = word.strip_prefix(NOUN_MARKER) {
        return Token::noun(text);
    }
    if let Some(text) = word.strip_prefix(VERB_MARKER) {
        return match Verb::from_surface(text) {
            Some(verb) => Token::verb(verb),
            None => Token::custom_verb(text),
        };
    }
    if let Some(particle) = Particle::from_surface(word) {
        return Token::particle(particle);
    }
    if let Some(article) = Article::from_surface(word) {
        return Token::article(article);
    }
    if let Some(mark) = Punctuation::from_surface(word) {
        return Token::punctuation(mark);
    }
    if let Some(verb) = Verb::from_surface(word) {
        return Token::verb(verb);
    }
    if word.ends_with("して") || word.ends_with("する") {
        return Token::custom_verb(word);
    }
    Token::other(word)
}
