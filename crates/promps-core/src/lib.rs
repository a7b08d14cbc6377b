//! Promps Core - Token sequences, grammar validation and sentence patterns
//!
//! This crate holds the analysis side of the Promps block editor. The editor
//! hands over its block chains; everything here is a pure, synchronous
//! function of that input:
//!
//! - Linearization of block chains into positioned token sequences
//! - Grammar validation with Japanese and English rule profiles
//! - Pattern template matching and suggestions
//! - Edit plans for auto-fixes and pattern application
//! - DSL text encoding and prompt rendering
//!
//! # Example
//!
//! ```ignore
//! use promps_core::{linearize, validate, ChainBuilder, Locale, Particle, Verb};
//!
//! let heads = ChainBuilder::new()
//!     .noun("User")
//!     .particle(Particle::Ga)
//!     .noun("Order")
//!     .particle(Particle::Wo)
//!     .verb(Verb::Analyze)
//!     .build();
//!
//! let tokens = linearize(&heads, Default::default());
//! assert!(validate(&tokens, Locale::Ja).is_valid);
//! ```

pub mod chain;
pub mod dsl;
pub mod error;
pub mod patterns;
pub mod plan;
pub mod render;
pub mod types;
pub mod validation;

pub use chain::{linearize, to_chains, BlockNode, ChainBuilder, LinearizePolicy};
pub use dsl::{parse_dsl, to_dsl};
pub use error::{CoreError, Result};
pub use patterns::{
    analyze_patterns, match_pattern, suggest_patterns, PatternBlock, PatternCatalog,
    PatternMatchResult, PatternTemplate,
};
pub use plan::{
    plan_apply_pattern, plan_autofix, plan_complete_pattern, plan_fix, EditOperation, EditPlan,
    EditStep, PlanRequest,
};
pub use render::{generate_prompt, render};
pub use types::{
    Article, BlockType, Locale, Particle, Punctuation, Token, TokenKind, TokenSequence, Verb,
};
pub use validation::{
    validate, validate_localized, AutoFixAction, AutoFixActionType, Severity, ValidationError,
    ValidationErrorCode, ValidationResult,
};
