//! Grammar validation for token sequences
//!
//! Validation is a pure function of a token sequence and a grammar locale.
//! Each locale has its own rule profile; every rule pushes its findings into
//! a shared list which is then ordered and counted into a
//! [`ValidationResult`].

mod english;
mod japanese;
mod messages;

use serde::{Deserialize, Serialize};

use crate::types::{BlockType, Locale, Token, TokenSequence};

/// Severity level for validation findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - marks the sequence invalid
    Error,
    /// Warning - should be reviewed
    Warning,
}

impl Severity {
    fn rank(&self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warning => 1,
        }
    }
}

/// Validation finding codes
///
/// Declaration order is the tie-break order for findings that share a
/// position and severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidationErrorCode {
    /// Particle without a preceding noun
    ParticleWithoutNoun,
    /// Two particles in a row
    ConsecutiveParticles,
    /// Verb followed by more content in its chain
    VerbNotAtEnd,
    /// Two nouns in a row without a particle
    ConsecutiveNouns,
    /// Verb present but no が anywhere
    MissingSubject,
    /// Verb present but no を before it
    MissingObject,
    /// Article not followed by a noun
    ArticleNotBeforeNoun,
    /// Two articles in a row
    ConsecutiveArticles,
    /// Preposition not followed by a noun
    PrepositionWithoutObject,
    /// `please` neither chain-initial nor before a verb
    PleasePosition,
    /// Terminal punctuation followed by more words
    PeriodNotAtEnd,
    /// Sentence without a verb
    MissingVerb,
}

/// Kind of edit an auto-fix performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoFixActionType {
    /// Insert a block before the target position
    InsertBefore,
    /// Insert a block after the target position
    InsertAfter,
}

/// Single-insertion edit that resolves one finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoFixAction {
    /// Type of action to perform
    pub action_type: AutoFixActionType,
    /// Block type to insert (e.g. `promps_noun`, `promps_particle_ga`)
    pub block_type: String,
    /// Token position the action is anchored to
    pub target_position: usize,
    /// Label for the fix button
    pub label: String,
}

impl AutoFixAction {
    pub fn new(
        action_type: AutoFixActionType,
        block_type: BlockType,
        target_position: usize,
        label: impl Into<String>,
    ) -> Self {
        Self {
            action_type,
            block_type: block_type.id(),
            target_position,
            label: label.into(),
        }
    }

    /// Parsed block type, if it is part of the vocabulary
    pub fn block(&self) -> Option<BlockType> {
        self.block_type.parse().ok()
    }

    fn same_remedy(&self, other: &AutoFixAction) -> bool {
        self.action_type == other.action_type
            && self.block_type == other.block_type
            && self.target_position == other.target_position
    }
}

/// A single validation error or warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Code for programmatic handling
    pub code: ValidationErrorCode,
    /// Message in the display locale
    pub message: String,
    /// Offending token, or the insertion point for missing elements
    pub position: usize,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autofix: Option<AutoFixAction>,
}

impl ValidationError {
    pub fn new(
        code: ValidationErrorCode,
        message: impl Into<String>,
        position: usize,
        severity: Severity,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            position,
            severity,
            suggestion,
            autofix: None,
        }
    }

    /// Attach an auto-fix action
    pub fn with_autofix(mut self, autofix: AutoFixAction) -> Self {
        self.autofix = Some(autofix);
        self
    }

    fn sort_key(&self) -> (usize, u8, ValidationErrorCode) {
        (self.position, self.severity.rank(), self.code)
    }

    /// Whether `other` is a lower-priority restatement of this finding
    fn subsumes(&self, other: &ValidationError) -> bool {
        if self.position != other.position {
            return false;
        }
        match (&self.autofix, &other.autofix) {
            (Some(a), Some(b)) => a.same_remedy(b),
            _ => self.code == other.code,
        }
    }
}

/// Result of validating a token sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when there are no errors (warnings allowed)
    pub is_valid: bool,
    /// Errors and warnings in position order
    pub errors: Vec<ValidationError>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl ValidationResult {
    /// Create an empty (valid) result
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Add a finding and update the counts
    pub fn add_error(&mut self, error: ValidationError) {
        match error.severity {
            Severity::Error => {
                self.is_valid = false;
                self.error_count += 1;
            }
            Severity::Warning => {
                self.warning_count += 1;
            }
        }
        self.errors.push(error);
    }

    /// Build a result from unordered findings
    ///
    /// Findings are sorted by position, then severity (errors first), then
    /// code declaration order. A finding that repeats the remedy of a
    /// higher-priority finding at the same position is dropped.
    pub fn from_findings(mut findings: Vec<ValidationError>) -> Self {
        findings.sort_by_key(ValidationError::sort_key);

        let mut result = Self::new();
        for finding in findings {
            let duplicate = result
                .errors
                .iter()
                .rev()
                .take_while(|kept| kept.position == finding.position)
                .any(|kept| kept.subsumes(&finding));
            if duplicate {
                log::trace!(
                    "Suppressing {:?} at {} behind a higher-priority finding",
                    finding.code,
                    finding.position
                );
                continue;
            }
            result.add_error(finding);
        }
        result
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a token sequence, with messages in the grammar locale
pub fn validate(sequence: &TokenSequence, locale: Locale) -> ValidationResult {
    validate_localized(sequence, locale, locale)
}

/// Validate with the `grammar` rule profile, rendering messages in `display`
pub fn validate_localized(
    sequence: &TokenSequence,
    grammar: Locale,
    display: Locale,
) -> ValidationResult {
    if sequence.is_empty() {
        return ValidationResult::new();
    }

    let mut findings = Vec::new();
    match grammar {
        Locale::Ja => japanese::check(sequence, display, &mut findings),
        Locale::En => english::check(sequence, display, &mut findings),
    }
    ValidationResult::from_findings(findings)
}

/// Token before `index` within the same chain
pub(crate) fn prev_in_chain(tokens: &[Token], index: usize) -> Option<&Token> {
    let current = tokens.get(index)?;
    index
        .checked_sub(1)
        .and_then(|i| tokens.get(i))
        .filter(|prev| prev.chain == current.chain)
}

/// Token after `index` within the same chain
pub(crate) fn next_in_chain(tokens: &[Token], index: usize) -> Option<&Token> {
    let current = tokens.get(index)?;
    tokens.get(index + 1).filter(|next| next.chain == current.chain)
}
