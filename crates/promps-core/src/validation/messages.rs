//! Display text for validation findings

use super::ValidationErrorCode;
use crate::types::Locale;

/// Message, suggestion and fix-button label for one finding
pub(crate) struct Wording {
    pub message: String,
    pub suggestion: Option<String>,
    pub label: String,
}

impl Wording {
    fn new(message: impl Into<String>, suggestion: &str, label: &str) -> Self {
        Self {
            message: message.into(),
            suggestion: (!suggestion.is_empty()).then(|| suggestion.to_string()),
            label: label.to_string(),
        }
    }
}

/// Render a finding in the display locale
///
/// `subject` is the surface form of the offending token, used by the
/// particle messages.
pub(crate) fn wording(code: ValidationErrorCode, display: Locale, subject: &str) -> Wording {
    use ValidationErrorCode::*;

    match display {
        Locale::Ja => match code {
            ParticleWithoutNoun => Wording::new(
                format!("助詞「{subject}」の前に名詞がありません"),
                "名詞ブロックを追加してください",
                "名詞を追加",
            ),
            ConsecutiveParticles => Wording::new(
                format!("助詞「{subject}」が連続しています"),
                "間に名詞や動詞を追加してください",
                "名詞を追加",
            ),
            VerbNotAtEnd => Wording::new(
                "動詞が末尾にありません",
                "動詞を文末に移動してください",
                "",
            ),
            ConsecutiveNouns => Wording::new(
                "名詞が連続しています",
                "間に助詞を追加することを検討してください",
                "「と」を追加",
            ),
            MissingSubject => Wording::new(
                "主語がありません（「が」がありません）",
                "「名詞 が」を追加してください",
                "「が」を追加",
            ),
            MissingObject => Wording::new(
                "目的語がありません（「を」がありません）",
                "「名詞 を」を追加してください",
                "「を」を追加",
            ),
            ArticleNotBeforeNoun => Wording::new(
                "冠詞の後に名詞がありません",
                "冠詞の後に名詞ブロックを追加してください",
                "名詞を追加",
            ),
            ConsecutiveArticles => Wording::new(
                "冠詞が連続しています",
                "どちらかの冠詞を削除してください",
                "",
            ),
            PrepositionWithoutObject => Wording::new(
                format!("前置詞「{subject}」の後に名詞がありません"),
                "前置詞の後に名詞ブロックを追加してください",
                "名詞を追加",
            ),
            PleasePosition => Wording::new(
                "「please」は文頭または動詞の前に置いてください",
                "「please」を移動してください",
                "",
            ),
            PeriodNotAtEnd => Wording::new(
                "ピリオドは文末に置いてください",
                "句読点を文末に移動してください",
                "",
            ),
            MissingVerb => Wording::new(
                "文に動詞がありません",
                "動詞ブロックを追加してください",
                "",
            ),
        },
        Locale::En => match code {
            ParticleWithoutNoun => Wording::new(
                format!("Particle \"{subject}\" has no noun before it"),
                "Add a noun block before the particle",
                "Add noun",
            ),
            ConsecutiveParticles => Wording::new(
                format!("Particle \"{subject}\" follows another particle"),
                "Add a noun or verb between the particles",
                "Add noun",
            ),
            VerbNotAtEnd => Wording::new(
                "Verb is not at the end",
                "Move the verb to the end of the sentence",
                "",
            ),
            ConsecutiveNouns => Wording::new(
                "Consecutive nouns",
                "Consider adding a particle between the nouns",
                "Add \"と\"",
            ),
            MissingSubject => Wording::new(
                "No subject (missing \"が\")",
                "Add \"noun が\"",
                "Add \"が\"",
            ),
            MissingObject => Wording::new(
                "No object (missing \"を\")",
                "Add \"noun を\"",
                "Add \"を\"",
            ),
            ArticleNotBeforeNoun => Wording::new(
                "Article must be followed by a noun",
                "Add a noun after the article",
                "Add noun",
            ),
            ConsecutiveArticles => Wording::new(
                "Consecutive articles not allowed",
                "Remove one of the articles",
                "",
            ),
            PrepositionWithoutObject => Wording::new(
                format!("Preposition \"{subject}\" must be followed by a noun"),
                "Add a noun after the preposition",
                "Add noun",
            ),
            PleasePosition => Wording::new(
                "\"please\" should be at start or before verb",
                "Move \"please\" to the start or before the verb",
                "",
            ),
            PeriodNotAtEnd => Wording::new(
                "Period should be at end of sentence",
                "Move the punctuation to the end",
                "",
            ),
            MissingVerb => Wording::new(
                "Sentence has no verb (action)",
                "Add a verb block",
                "",
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_messages_name_the_particle() {
        let ja = wording(ValidationErrorCode::ParticleWithoutNoun, Locale::Ja, "が");
        assert_eq!(ja.message, "助詞「が」の前に名詞がありません");
        assert_eq!(ja.label, "名詞を追加");

        let en = wording(ValidationErrorCode::ConsecutiveParticles, Locale::En, "を");
        assert!(en.message.contains("\"を\""));
    }

    #[test]
    fn test_every_code_has_text() {
        let codes = [
            ValidationErrorCode::ParticleWithoutNoun,
            ValidationErrorCode::ConsecutiveParticles,
            ValidationErrorCode::VerbNotAtEnd,
            ValidationErrorCode::ConsecutiveNouns,
            ValidationErrorCode::MissingSubject,
            ValidationErrorCode::MissingObject,
            ValidationErrorCode::ArticleNotBeforeNoun,
            ValidationErrorCode::ConsecutiveArticles,
            ValidationErrorCode::PrepositionWithoutObject,
            ValidationErrorCode::PleasePosition,
            ValidationErrorCode::PeriodNotAtEnd,
            ValidationErrorCode::MissingVerb,
        ];
        for locale in [Locale::Ja, Locale::En] {
            for code in codes {
                let text = wording(code, locale, "x");
                assert!(!text.message.is_empty());
                assert!(text.suggestion.is_some());
            }
        }
    }
}
