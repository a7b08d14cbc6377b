//! Sentence pattern templates and matching
//!
//! A pattern is a canonical ordered skeleton of block slots. Placeholder
//! slots are meant to be filled by the user; fixed slots (particles,
//! articles, set phrases) are part of the skeleton's identity.

mod catalog;
mod matcher;

pub use catalog::PatternCatalog;
pub(crate) use matcher::fill_slots;
pub use matcher::{analyze_patterns, find_window, match_pattern, suggest_patterns, PatternMatchResult};

use serde::{Deserialize, Serialize};

use crate::types::{BlockType, Token, TokenKind, TokenSequence};

/// One slot of a pattern template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternBlock {
    /// Block type to create for this slot
    pub block_type: BlockType,
    /// Display label for the slot
    pub label: String,
    /// Whether the user is expected to fill this slot
    pub is_placeholder: bool,
    /// Default text for free-text blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl PatternBlock {
    /// Create a slot the user should fill
    pub fn placeholder(block_type: BlockType, label: impl Into<String>) -> Self {
        Self {
            block_type,
            label: label.into(),
            is_placeholder: true,
            default_value: None,
        }
    }

    /// Create a fixed connective slot
    pub fn fixed(block_type: BlockType, label: impl Into<String>) -> Self {
        Self {
            block_type,
            label: label.into(),
            is_placeholder: false,
            default_value: None,
        }
    }

    /// Create a fixed free-text slot with preset text
    pub fn with_value(
        block_type: BlockType,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            block_type,
            label: label.into(),
            is_placeholder: false,
            default_value: Some(value.into()),
        }
    }

    /// Token created when this slot is instantiated
    pub fn to_token(&self) -> Token {
        let text = self.default_value.clone().unwrap_or_default();
        Token::new(self.block_type, Some(text))
    }

    /// Whether a user token fills this slot
    ///
    /// Nouns and verbs match by kind (any verb, fixed or custom, fills a
    /// verb slot). Particles, articles and punctuation must be the exact
    /// block. A fixed free-text slot must carry its preset text.
    pub fn accepts(&self, token: &Token) -> bool {
        match self.block_type {
            BlockType::Noun => token.kind() == TokenKind::Noun,
            BlockType::Verb(_) | BlockType::CustomVerb => token.kind() == TokenKind::Verb,
            BlockType::Other => {
                token.kind() == TokenKind::Other
                    && (self.is_placeholder
                        || self.default_value.is_none()
                        || token.text == self.default_value)
            }
            BlockType::Particle(_) | BlockType::Article(_) | BlockType::Punctuation(_) => {
                token.block_type == self.block_type
            }
        }
    }
}

/// A canonical sentence skeleton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternTemplate {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// When to use this pattern
    pub description: String,
    /// Human-readable skeleton, e.g. "名詞 が 名詞 を 動詞"
    pub structure: String,
    /// Example sentence
    pub example: String,
    /// Slots in order
    pub blocks: Vec<PatternBlock>,
}

impl PatternTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        structure: impl Into<String>,
        example: impl Into<String>,
        blocks: Vec<PatternBlock>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            structure: structure.into(),
            example: example.into(),
            blocks,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Literal instantiation of every slot in order, as one chain
    pub fn instantiate(&self) -> TokenSequence {
        self.blocks.iter().map(PatternBlock::to_token).collect()
    }
}
