//! Scoring token sequences against pattern templates

use serde::{Deserialize, Serialize};

use super::{PatternCatalog, PatternTemplate};
use crate::types::{Token, TokenSequence};

/// How well a sequence matches one template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatchResult {
    pub pattern_id: String,
    pub pattern_name: String,
    /// Match quality in `[0, 1]`
    pub match_score: f64,
    /// Labels of the template slots not covered by the sequence
    pub missing_elements: Vec<String>,
    /// True only when the sequence is exactly the template
    pub is_complete: bool,
}

/// Left-most offset at which `tokens` fill a contiguous window of the template
///
/// Returns `None` for an empty sequence or one longer than the template.
pub fn find_window(tokens: &[Token], template: &PatternTemplate) -> Option<usize> {
    let n = tokens.len();
    let m = template.len();
    if n == 0 || n > m {
        return None;
    }

    (0..=m - n).find(|&start| {
        template.blocks[start..start + n]
            .iter()
            .zip(tokens)
            .all(|(block, token)| block.accepts(token))
    })
}

/// Order-insensitive assignment of tokens to template slots
///
/// Each slot takes the first unused token it accepts. Returns, per slot,
/// whether it was filled.
pub(crate) fn fill_slots(tokens: &[Token], template: &PatternTemplate) -> Vec<bool> {
    let mut used = vec![false; tokens.len()];
    template
        .blocks
        .iter()
        .map(|block| {
            let found = tokens
                .iter()
                .enumerate()
                .find(|(i, token)| !used[*i] && block.accepts(token))
                .map(|(i, _)| i);
            match found {
                Some(i) => {
                    used[i] = true;
                    true
                }
                None => false,
            }
        })
        .collect()
}

/// Score a sequence against one template
///
/// A contiguous window match scores `len(sequence) / len(template)`. Without
/// one, the score falls back to half the fraction of slots that some token
/// could fill, so partial matches in the wrong order always rank below a
/// full window match.
pub fn match_pattern(sequence: &TokenSequence, template: &PatternTemplate) -> PatternMatchResult {
    let tokens = sequence.tokens();
    let n = tokens.len();
    let m = template.len();

    let all_missing = || template.blocks.iter().map(|b| b.label.clone()).collect::<Vec<_>>();

    let (match_score, missing_elements, is_complete) = if n == 0 || m == 0 {
        (0.0, all_missing(), false)
    } else if let Some(start) = find_window(tokens, template) {
        let missing = template
            .blocks
            .iter()
            .enumerate()
            .filter(|(i, _)| *i < start || *i >= start + n)
            .map(|(_, b)| b.label.clone())
            .collect();
        (n as f64 / m as f64, missing, n == m)
    } else {
        let filled = fill_slots(tokens, template);
        let matched = filled.iter().filter(|f| **f).count();
        let missing = template
            .blocks
            .iter()
            .zip(&filled)
            .filter(|(_, f)| !**f)
            .map(|(b, _)| b.label.clone())
            .collect();
        (0.5 * matched as f64 / m as f64, missing, false)
    };

    PatternMatchResult {
        pattern_id: template.id.clone(),
        pattern_name: template.name.clone(),
        match_score,
        missing_elements,
        is_complete,
    }
}

/// Score the sequence against every template, best first
///
/// The sort is stable, so equal scores keep catalog order.
pub fn analyze_patterns(sequence: &TokenSequence, catalog: &PatternCatalog) -> Vec<PatternMatchResult> {
    let mut results: Vec<PatternMatchResult> = catalog
        .templates()
        .iter()
        .map(|template| match_pattern(sequence, template))
        .collect();

    results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    results
}

/// The actionable suggestions: positive scores only, at most `limit`
pub fn suggest_patterns(
    sequence: &TokenSequence,
    catalog: &PatternCatalog,
    limit: usize,
) -> Vec<PatternMatchResult> {
    analyze_patterns(sequence, catalog)
        .into_iter()
        .filter(|result| result.match_score > 0.0)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Article, Locale, Particle, Verb};

    fn catalog() -> &'static PatternCatalog {
        PatternCatalog::builtin(Locale::Ja)
    }

    fn result_for<'a>(results: &'a [PatternMatchResult], id: &str) -> &'a PatternMatchResult {
        results.iter().find(|r| r.pattern_id == id).unwrap()
    }

    #[test]
    fn test_exact_template_is_complete() {
        let seq: TokenSequence = vec![
            Token::noun("Doc"),
            Token::particle(Particle::Wo),
            Token::verb(Verb::Analyze),
        ]
        .into();
        let results = analyze_patterns(&seq, catalog());
        let ov = result_for(&results, "ov_simple");

        assert_eq!(ov.match_score, 1.0);
        assert!(ov.is_complete);
        assert!(ov.missing_elements.is_empty());
        assert_eq!(results[0].pattern_id, "ov_simple");
    }

    #[test]
    fn test_window_in_middle_of_template() {
        let seq: TokenSequence = vec![Token::particle(Particle::Ga), Token::noun("Doc")].into();
        let template = catalog().get("sov_basic").unwrap();

        assert_eq!(find_window(seq.tokens(), template), Some(1));
        let result = match_pattern(&seq, template);
        assert!((result.match_score - 0.4).abs() < 1e-9);
        assert_eq!(result.missing_elements, vec!["主語", "を", "動詞"]);
        assert!(!result.is_complete);
    }

    #[test]
    fn test_leftmost_window_wins() {
        // A lone noun fits slot 0 and slot 2 of sov_basic
        let seq: TokenSequence = vec![Token::noun("User")].into();
        let template = catalog().get("sov_basic").unwrap();
        assert_eq!(find_window(seq.tokens(), template), Some(0));
    }

    #[test]
    fn test_fallback_for_out_of_order_input() {
        let seq: TokenSequence = vec![Token::verb(Verb::Analyze), Token::noun("Doc")].into();
        let template = catalog().get("ov_simple").unwrap();
        assert_eq!(find_window(seq.tokens(), template), None);

        let result = match_pattern(&seq, template);
        assert!((result.match_score - 0.5 * 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.missing_elements, vec!["を"]);
        assert!(!result.is_complete);
    }

    #[test]
    fn test_longer_than_template_uses_fallback() {
        let seq: TokenSequence = vec![
            Token::noun("Doc"),
            Token::particle(Particle::Wo),
            Token::verb(Verb::Analyze),
            Token::noun("Extra"),
        ]
        .into();
        let result = match_pattern(&seq, catalog().get("ov_simple").unwrap());
        assert!((result.match_score - 0.5).abs() < 1e-9);
        assert!(!result.is_complete);
        assert!(result.missing_elements.is_empty());
    }

    #[test]
    fn test_empty_sequence_scores_zero() {
        let results = analyze_patterns(&TokenSequence::new(), catalog());
        assert_eq!(results.len(), catalog().len());
        assert!(results.iter().all(|r| r.match_score == 0.0 && !r.is_complete));
        assert!(suggest_patterns(&TokenSequence::new(), catalog(), 3).is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        // A single noun window-matches every template that starts with a noun
        let seq: TokenSequence = vec![Token::noun("X")].into();
        let results = analyze_patterns(&seq, catalog());
        let leading: Vec<&str> = results.iter().take(2).map(|r| r.pattern_id.as_str()).collect();
        assert_eq!(leading, vec!["ov_simple", "topic_about"]);

        let suggestions = suggest_patterns(&seq, catalog(), 3);
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[2].pattern_id, "imperative_object");
    }

    #[test]
    fn test_english_templates() {
        let seq: TokenSequence = vec![
            Token::article(Article::Please),
            Token::verb(Verb::Explain),
        ]
        .into();
        let results = suggest_patterns(&seq, PatternCatalog::builtin(Locale::En), 1);
        assert_eq!(results[0].pattern_id, "please_request");
        assert_eq!(results[0].missing_elements, vec!["the", "Object"]);
    }

    #[test]
    fn test_fixed_other_text_must_match() {
        let template = catalog().get("topic_about").unwrap();
        let about: TokenSequence = vec![Token::noun("Data"), Token::other("について")].into();
        let other: TokenSequence = vec![Token::noun("Data"), Token::other("として")].into();

        assert_eq!(find_window(about.tokens(), template), Some(0));
        assert_eq!(find_window(other.tokens(), template), None);
    }
}
