//! Japanese (SOV) rule profile

use super::messages::wording;
use super::{
    prev_in_chain, AutoFixAction, AutoFixActionType, Severity, ValidationError,
    ValidationErrorCode,
};
use crate::types::{BlockType, Locale, Particle, Token, TokenKind, TokenSequence};

/// Run every Japanese rule over the sequence
pub(super) fn check(sequence: &TokenSequence, display: Locale, findings: &mut Vec<ValidationError>) {
    let tokens = sequence.tokens();

    check_particles(tokens, display, findings);
    check_verb_position(tokens, display, findings);
    check_consecutive_nouns(tokens, display, findings);
    check_subject_and_object(tokens, display, findings);
}

fn finding(
    code: ValidationErrorCode,
    severity: Severity,
    position: usize,
    display: Locale,
    subject: &str,
    fix: Option<(BlockType, usize)>,
) -> ValidationError {
    let text = wording(code, display, subject);
    let error = ValidationError::new(code, text.message, position, severity, text.suggestion);
    match fix {
        Some((block, target)) => error.with_autofix(AutoFixAction::new(
            AutoFixActionType::InsertBefore,
            block,
            target,
            text.label,
        )),
        None => error,
    }
}

/// Rules 1 and 2: a particle attaches to the noun (or verb phrase) before it
fn check_particles(tokens: &[Token], display: Locale, findings: &mut Vec<ValidationError>) {
    for (i, token) in tokens.iter().enumerate() {
        if token.kind() != TokenKind::Particle {
            continue;
        }

        let code = match prev_in_chain(tokens, i).map(Token::kind) {
            None | Some(TokenKind::Article) | Some(TokenKind::Punctuation) => {
                ValidationErrorCode::ParticleWithoutNoun
            }
            Some(TokenKind::Particle) => ValidationErrorCode::ConsecutiveParticles,
            Some(TokenKind::Noun) | Some(TokenKind::Verb) | Some(TokenKind::Other) => continue,
        };

        findings.push(finding(
            code,
            Severity::Error,
            i,
            display,
            token.surface(Locale::Ja),
            Some((BlockType::Noun, i)),
        ));
    }
}

/// Rule 3: a verb should close its chain
fn check_verb_position(tokens: &[Token], display: Locale, findings: &mut Vec<ValidationError>) {
    for (i, token) in tokens.iter().enumerate() {
        if token.kind() != TokenKind::Verb {
            continue;
        }

        let content_after = tokens[i + 1..]
            .iter()
            .take_while(|t| t.chain == token.chain)
            .any(|t| matches!(t.kind(), TokenKind::Noun | TokenKind::Verb));

        if content_after {
            findings.push(finding(
                ValidationErrorCode::VerbNotAtEnd,
                Severity::Warning,
                i,
                display,
                "",
                None,
            ));
        }
    }
}

/// Rule 4: nouns are joined by particles
fn check_consecutive_nouns(tokens: &[Token], display: Locale, findings: &mut Vec<ValidationError>) {
    for (i, token) in tokens.iter().enumerate() {
        if token.kind() != TokenKind::Noun {
            continue;
        }
        if prev_in_chain(tokens, i).map(Token::kind) == Some(TokenKind::Noun) {
            findings.push(finding(
                ValidationErrorCode::ConsecutiveNouns,
                Severity::Warning,
                i,
                display,
                "",
                Some((BlockType::Particle(Particle::To), i)),
            ));
        }
    }
}

/// Rules 5 and 6: a sentence with a verb names its subject and object
fn check_subject_and_object(tokens: &[Token], display: Locale, findings: &mut Vec<ValidationError>) {
    let Some(verb_pos) = tokens.iter().position(|t| t.kind() == TokenKind::Verb) else {
        return;
    };

    if !tokens.iter().any(|t| t.is_particle(Particle::Ga)) {
        findings.push(finding(
            ValidationErrorCode::MissingSubject,
            Severity::Warning,
            verb_pos,
            display,
            "",
            Some((BlockType::Particle(Particle::Ga), 0)),
        ));
    }

    if !tokens[..verb_pos].iter().any(|t| t.is_particle(Particle::Wo)) {
        findings.push(finding(
            ValidationErrorCode::MissingObject,
            Severity::Warning,
            verb_pos,
            display,
            "",
            Some((BlockType::Particle(Particle::Wo), verb_pos)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{Article, Particle, Punctuation, Token, TokenSequence, Verb};
    use crate::validation::{validate, AutoFixActionType, Severity, ValidationErrorCode};
    use crate::{BlockType, Locale};

    fn seq(tokens: Vec<Token>) -> TokenSequence {
        tokens.into()
    }

    fn codes(tokens: Vec<Token>) -> Vec<(ValidationErrorCode, usize)> {
        validate(&seq(tokens), Locale::Ja)
            .errors
            .iter()
            .map(|e| (e.code, e.position))
            .collect()
    }

    #[test]
    fn test_valid_sov_sentence() {
        let result = validate(
            &seq(vec![
                Token::noun("User"),
                Token::particle(Particle::Ga),
                Token::noun("Order"),
                Token::particle(Particle::Wo),
                Token::verb(Verb::Analyze),
            ]),
            Locale::Ja,
        );
        assert!(result.is_valid);
        assert_eq!(result.error_count, 0);
        assert_eq!(result.warning_count, 0);
    }

    #[test]
    fn test_particle_at_start() {
        let result = validate(
            &seq(vec![Token::particle(Particle::Ga), Token::noun("User")]),
            Locale::Ja,
        );
        assert_eq!(result.errors.len(), 1);
        let error = &result.errors[0];
        assert_eq!(error.code, ValidationErrorCode::ParticleWithoutNoun);
        assert_eq!(error.position, 0);
        assert_eq!(error.severity, Severity::Error);
        assert_eq!(error.message, "助詞「が」の前に名詞がありません");

        let fix = error.autofix.as_ref().unwrap();
        assert_eq!(fix.action_type, AutoFixActionType::InsertBefore);
        assert_eq!(fix.block(), Some(BlockType::Noun));
        assert_eq!(fix.target_position, 0);
    }

    #[test]
    fn test_consecutive_nouns() {
        let result = validate(&seq(vec![Token::noun("A"), Token::noun("B")]), Locale::Ja);
        assert_eq!(result.errors.len(), 1);
        let warning = &result.errors[0];
        assert_eq!(warning.code, ValidationErrorCode::ConsecutiveNouns);
        assert_eq!(warning.position, 1);
        assert_eq!(warning.severity, Severity::Warning);
        assert!(result.is_valid);

        let fix = warning.autofix.as_ref().unwrap();
        assert_eq!(fix.block_type, "promps_particle_to");
        assert_eq!(fix.target_position, 1);
    }

    #[test]
    fn test_consecutive_particles() {
        let found = codes(vec![
            Token::noun("A"),
            Token::particle(Particle::Ga),
            Token::particle(Particle::Wo),
            Token::verb(Verb::Create),
        ]);
        assert_eq!(found, vec![(ValidationErrorCode::ConsecutiveParticles, 2)]);
    }

    #[test]
    fn test_particle_after_article_or_punctuation() {
        let found = codes(vec![
            Token::noun("A"),
            Token::punctuation(Punctuation::Touten),
            Token::particle(Particle::Ni),
        ]);
        assert_eq!(found, vec![(ValidationErrorCode::ParticleWithoutNoun, 2)]);

        let found = codes(vec![Token::article(Article::The), Token::particle(Particle::De)]);
        assert_eq!(found, vec![(ValidationErrorCode::ParticleWithoutNoun, 1)]);
    }

    #[test]
    fn test_particle_after_verb_is_allowed() {
        let found = codes(vec![
            Token::noun("A"),
            Token::particle(Particle::Wo),
            Token::verb(Verb::Translate),
            Token::particle(Particle::Kara),
        ]);
        assert!(!found
            .iter()
            .any(|(code, _)| *code == ValidationErrorCode::ParticleWithoutNoun));
    }

    #[test]
    fn test_particle_at_start_of_second_chain() {
        let found = codes(vec![
            Token::noun("A"),
            Token::particle(Particle::Ga).in_chain(1),
        ]);
        assert_eq!(found, vec![(ValidationErrorCode::ParticleWithoutNoun, 1)]);
    }

    #[test]
    fn test_verb_not_at_end() {
        let found = codes(vec![
            Token::noun("A"),
            Token::particle(Particle::Ga),
            Token::verb(Verb::Analyze),
            Token::noun("B"),
            Token::particle(Particle::Wo),
        ]);
        assert!(found.contains(&(ValidationErrorCode::VerbNotAtEnd, 2)));
    }

    #[test]
    fn test_trailing_particle_after_verb_is_not_flagged() {
        let found = codes(vec![
            Token::noun("A"),
            Token::particle(Particle::Ga),
            Token::noun("B"),
            Token::particle(Particle::Wo),
            Token::verb(Verb::Analyze),
            Token::particle(Particle::Ni),
        ]);
        assert!(!found.iter().any(|(code, _)| *code == ValidationErrorCode::VerbNotAtEnd));
    }

    #[test]
    fn test_verb_followed_by_punctuation_is_at_end() {
        let found = codes(vec![
            Token::noun("A"),
            Token::particle(Particle::Ga),
            Token::noun("B"),
            Token::particle(Particle::Wo),
            Token::verb(Verb::Analyze),
            Token::punctuation(Punctuation::Kuten),
        ]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_missing_subject_and_object() {
        let result = validate(
            &seq(vec![Token::noun("Doc"), Token::custom_verb("保存して")]),
            Locale::Ja,
        );
        let found: Vec<(ValidationErrorCode, usize)> =
            result.errors.iter().map(|e| (e.code, e.position)).collect();
        assert_eq!(
            found,
            vec![
                (ValidationErrorCode::MissingSubject, 1),
                (ValidationErrorCode::MissingObject, 1),
            ]
        );

        let subject_fix = result.errors[0].autofix.as_ref().unwrap();
        assert_eq!(subject_fix.block_type, "promps_particle_ga");
        assert_eq!(subject_fix.target_position, 0);

        let object_fix = result.errors[1].autofix.as_ref().unwrap();
        assert_eq!(object_fix.block_type, "promps_particle_wo");
        assert_eq!(object_fix.target_position, 1);
    }

    #[test]
    fn test_missing_subject_points_at_verb() {
        let result = validate(
            &seq(vec![
                Token::noun("A"),
                Token::particle(Particle::Wo),
                Token::verb(Verb::Analyze),
            ]),
            Locale::Ja,
        );

        assert_eq!(result.errors.len(), 1);
        let error = &result.errors[0];
        assert_eq!(error.code, ValidationErrorCode::MissingSubject);
        assert_eq!(error.position, 2);
        assert_eq!(error.autofix.as_ref().unwrap().target_position, 0);
    }

    #[test]
    fn test_object_after_verb_does_not_count() {
        let found = codes(vec![
            Token::noun("A"),
            Token::particle(Particle::Ga),
            Token::verb(Verb::Analyze),
            Token::particle(Particle::Wo),
        ]);
        assert!(found.contains(&(ValidationErrorCode::MissingObject, 2)));
    }

    #[test]
    fn test_no_verb_no_subject_check() {
        let found = codes(vec![Token::noun("A"), Token::particle(Particle::Wo)]);
        assert!(found.is_empty());
    }
}
