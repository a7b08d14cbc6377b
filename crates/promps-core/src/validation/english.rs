//! English (SVO) rule profile

use super::messages::wording;
use super::{
    next_in_chain, prev_in_chain, AutoFixAction, AutoFixActionType, Severity, ValidationError,
    ValidationErrorCode,
};
use crate::types::{Article, BlockType, Locale, Token, TokenKind, TokenSequence};

pub(super) fn check(sequence: &TokenSequence, display: Locale, findings: &mut Vec<ValidationError>) {
    let tokens = sequence.tokens();

    check_articles(tokens, display, findings);
    check_prepositions(tokens, display, findings);
    check_please(tokens, display, findings);
    check_terminal_punctuation(tokens, display, findings);
    check_has_verb(tokens, display, findings);
}

/// Whether a token can head the noun phrase after a determiner or preposition
fn opens_noun_phrase(token: Option<&Token>) -> bool {
    match token {
        Some(t) => matches!(t.kind(), TokenKind::Noun | TokenKind::Other) || t.is_determiner(),
        None => false,
    }
}

fn insert_noun_after(position: usize, label: String) -> AutoFixAction {
    AutoFixAction::new(AutoFixActionType::InsertAfter, BlockType::Noun, position, label)
}

fn check_articles(tokens: &[Token], display: Locale, findings: &mut Vec<ValidationError>) {
    for (i, token) in tokens.iter().enumerate() {
        if !token.is_determiner() {
            continue;
        }

        if prev_in_chain(tokens, i).is_some_and(Token::is_determiner) {
            let text = wording(ValidationErrorCode::ConsecutiveArticles, display, token.surface(Locale::En));
            findings.push(ValidationError::new(
                ValidationErrorCode::ConsecutiveArticles,
                text.message,
                i,
                Severity::Error,
                text.suggestion,
            ));
        }

        if !opens_noun_phrase(next_in_chain(tokens, i)) {
            let text = wording(ValidationErrorCode::ArticleNotBeforeNoun, display, token.surface(Locale::En));
            findings.push(
                ValidationError::new(
                    ValidationErrorCode::ArticleNotBeforeNoun,
                    text.message,
                    i,
                    Severity::Error,
                    text.suggestion,
                )
                .with_autofix(insert_noun_after(i, text.label)),
            );
        }
    }
}

fn check_prepositions(tokens: &[Token], display: Locale, findings: &mut Vec<ValidationError>) {
    for (i, token) in tokens.iter().enumerate() {
        let BlockType::Particle(particle) = token.block_type else {
            continue;
        };
        // The subject and object markers are silent in English
        if !particle.is_preposition() {
            continue;
        }

        if !opens_noun_phrase(next_in_chain(tokens, i)) {
            let text = wording(
                ValidationErrorCode::PrepositionWithoutObject,
                display,
                particle.surface(Locale::En),
            );
            findings.push(
                ValidationError::new(
                    ValidationErrorCode::PrepositionWithoutObject,
                    text.message,
                    i,
                    Severity::Error,
                    text.suggestion,
                )
                .with_autofix(insert_noun_after(i, text.label)),
            );
        }
    }
}

fn check_please(tokens: &[Token], display: Locale, findings: &mut Vec<ValidationError>) {
    for (i, token) in tokens.iter().enumerate() {
        if token.block_type != BlockType::Article(Article::Please) {
            continue;
        }

        let chain_initial = prev_in_chain(tokens, i).is_none();
        let before_verb = next_in_chain(tokens, i).map(Token::kind) == Some(TokenKind::Verb);
        if !chain_initial && !before_verb {
            let text = wording(ValidationErrorCode::PleasePosition, display, "please");
            findings.push(ValidationError::new(
                ValidationErrorCode::PleasePosition,
                text.message,
                i,
                Severity::Warning,
                text.suggestion,
            ));
        }
    }
}

fn check_terminal_punctuation(tokens: &[Token], display: Locale, findings: &mut Vec<ValidationError>) {
    for (i, token) in tokens.iter().enumerate() {
        let BlockType::Punctuation(mark) = token.block_type else {
            continue;
        };
        if !mark.is_terminal() {
            continue;
        }

        let words_after = tokens[i + 1..]
            .iter()
            .take_while(|t| t.chain == token.chain)
            .any(|t| t.kind() != TokenKind::Punctuation);

        if words_after {
            let text = wording(ValidationErrorCode::PeriodNotAtEnd, display, mark.surface(Locale::En));
            findings.push(ValidationError::new(
                ValidationErrorCode::PeriodNotAtEnd,
                text.message,
                i,
                Severity::Warning,
                text.suggestion,
            ));
        }
    }
}

fn check_has_verb(tokens: &[Token], display: Locale, findings: &mut Vec<ValidationError>) {
    if tokens.iter().any(|t| t.kind() == TokenKind::Verb) {
        return;
    }
    let text = wording(ValidationErrorCode::MissingVerb, display, "");
    findings.push(ValidationError::new(
        ValidationErrorCode::MissingVerb,
        text.message,
        0,
        Severity::Warning,
        text.suggestion,
    ));
}

#[cfg(test)]
mod tests {
    use crate::types::{Article, Particle, Punctuation, Token, TokenSequence, Verb};
    use crate::validation::{validate, AutoFixActionType, Severity, ValidationErrorCode};
    use crate::Locale;

    fn codes(tokens: Vec<Token>) -> Vec<(ValidationErrorCode, usize)> {
        let seq: TokenSequence = tokens.into();
        validate(&seq, Locale::En)
            .errors
            .iter()
            .map(|e| (e.code, e.position))
            .collect()
    }

    #[test]
    fn test_missing_verb_has_no_autofix() {
        let seq: TokenSequence = vec![Token::article(Article::The), Token::noun("Report")].into();
        let result = validate(&seq, Locale::En);

        assert_eq!(result.errors.len(), 1);
        let warning = &result.errors[0];
        assert_eq!(warning.code, ValidationErrorCode::MissingVerb);
        assert_eq!(warning.severity, Severity::Warning);
        assert_eq!(warning.message, "Sentence has no verb (action)");
        assert!(warning.autofix.is_none());
        assert!(result.is_valid);
    }

    #[test]
    fn test_valid_imperative() {
        let found = codes(vec![
            Token::article(Article::Please),
            Token::verb(Verb::Summarize),
            Token::article(Article::The),
            Token::noun("Report"),
            Token::particle(Particle::Kara),
            Token::noun("Sales"),
            Token::punctuation(Punctuation::Period),
        ]);
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn test_article_without_noun() {
        let seq: TokenSequence = vec![Token::verb(Verb::Explain), Token::article(Article::The)].into();
        let result = validate(&seq, Locale::En);
        assert_eq!(result.errors.len(), 1);
        let error = &result.errors[0];
        assert_eq!(error.code, ValidationErrorCode::ArticleNotBeforeNoun);
        assert_eq!(error.position, 1);

        let fix = error.autofix.as_ref().unwrap();
        assert_eq!(fix.action_type, AutoFixActionType::InsertAfter);
        assert_eq!(fix.block_type, "promps_noun");
        assert_eq!(fix.target_position, 1);
    }

    #[test]
    fn test_consecutive_articles() {
        let found = codes(vec![
            Token::verb(Verb::Update),
            Token::article(Article::The),
            Token::article(Article::A),
            Token::noun("Record"),
        ]);
        assert_eq!(found, vec![(ValidationErrorCode::ConsecutiveArticles, 2)]);
    }

    #[test]
    fn test_preposition_without_object() {
        let found = codes(vec![
            Token::verb(Verb::Translate),
            Token::noun("Text"),
            Token::particle(Particle::Ni),
            Token::verb(Verb::Explain),
        ]);
        assert_eq!(found, vec![(ValidationErrorCode::PrepositionWithoutObject, 2)]);
    }

    #[test]
    fn test_silent_particles_are_ignored() {
        let found = codes(vec![
            Token::noun("User"),
            Token::particle(Particle::Ga),
            Token::verb(Verb::Create),
            Token::noun("Doc"),
            Token::particle(Particle::Wo),
        ]);
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn test_please_position() {
        let found = codes(vec![
            Token::verb(Verb::Explain),
            Token::noun("It"),
            Token::article(Article::Please),
        ]);
        assert_eq!(found, vec![(ValidationErrorCode::PleasePosition, 2)]);

        let found = codes(vec![
            Token::noun("Kindly"),
            Token::article(Article::Please),
            Token::verb(Verb::Explain),
        ]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_period_not_at_end() {
        let found = codes(vec![
            Token::verb(Verb::Explain),
            Token::punctuation(Punctuation::Period),
            Token::noun("Now"),
        ]);
        assert_eq!(found, vec![(ValidationErrorCode::PeriodNotAtEnd, 1)]);

        // A new chain is a new sentence
        let found = codes(vec![
            Token::verb(Verb::Explain),
            Token::punctuation(Punctuation::Question),
            Token::verb(Verb::Teach).in_chain(1),
        ]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_japanese_display_of_english_rules() {
        let seq: TokenSequence = vec![Token::noun("Report")].into();
        let result = crate::validation::validate_localized(&seq, Locale::En, Locale::Ja);
        assert_eq!(result.errors[0].message, "文に動詞がありません");
    }
}
