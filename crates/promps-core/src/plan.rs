//! Edit plans for auto-fixes and pattern application
//!
//! A plan is an ordered list of insertion or replacement steps for the
//! editor to realize as blocks. Steps are sequential: each anchor refers to
//! the sequence as it stands after the previous steps.

use serde::{Deserialize, Serialize};

use crate::patterns::{fill_slots, find_window, PatternCatalog, PatternTemplate};
use crate::types::{BlockType, Token, TokenSequence};
use crate::validation::{AutoFixAction, AutoFixActionType};

/// Kind of edit step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOperation {
    /// Insert a block before the anchor
    InsertBefore,
    /// Insert a block after the anchor
    InsertAfter,
    /// Discard the sequence and start over with this block
    ReplaceAll,
}

/// One block-creation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditStep {
    pub operation: EditOperation,
    pub block_type: BlockType,
    pub anchor_position: usize,
    /// Initial text for free-text blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl EditStep {
    pub fn new(operation: EditOperation, block_type: BlockType, anchor_position: usize) -> Self {
        Self {
            operation,
            block_type,
            anchor_position,
            text: None,
        }
    }

    pub fn with_text(mut self, text: Option<String>) -> Self {
        self.text = text;
        self
    }

    fn token(&self) -> Token {
        Token::new(self.block_type, Some(self.text.clone().unwrap_or_default()))
    }
}

/// Ordered steps for the editor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPlan {
    pub steps: Vec<EditStep>,
}

impl EditPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: EditStep) {
        self.steps.push(step);
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Realize the plan against a sequence, as the editor would
    pub fn apply(&self, sequence: &TokenSequence) -> TokenSequence {
        let mut result = sequence.clone();
        for step in &self.steps {
            match step.operation {
                EditOperation::ReplaceAll => {
                    result = TokenSequence::new();
                    result.push_in_chain(step.token(), 0);
                }
                EditOperation::InsertBefore => result.insert(step.anchor_position, step.token()),
                EditOperation::InsertAfter => result.insert_after(step.anchor_position, step.token()),
            }
        }
        result
    }
}

/// What the user asked to fix or apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlanRequest {
    /// Apply one validator auto-fix
    AutoFix { autofix: AutoFixAction },
    /// Replace the sequence with a full template
    #[serde(rename_all = "camelCase")]
    ApplyPattern { pattern_id: String },
    /// Add the template slots around the matched window
    #[serde(rename_all = "camelCase")]
    CompletePattern { pattern_id: String },
}

/// Compute the edit plan for a request
///
/// Never fails: an unknown pattern or block type yields an empty plan.
pub fn plan_fix(sequence: &TokenSequence, request: &PlanRequest, catalog: &PatternCatalog) -> EditPlan {
    match request {
        PlanRequest::AutoFix { autofix } => plan_autofix(sequence, autofix),
        PlanRequest::ApplyPattern { pattern_id } => match catalog.get(pattern_id) {
            Some(template) => plan_apply_pattern(template),
            None => unknown_pattern(pattern_id),
        },
        PlanRequest::CompletePattern { pattern_id } => match catalog.get(pattern_id) {
            Some(template) => plan_complete_pattern(sequence, template),
            None => unknown_pattern(pattern_id),
        },
    }
}

fn unknown_pattern(pattern_id: &str) -> EditPlan {
    log::warn!("Unknown pattern '{}', nothing to plan", pattern_id);
    EditPlan::new()
}

/// Single-step plan for a validator auto-fix
///
/// A target past the end of the sequence is treated as stale and the block
/// is appended instead.
pub fn plan_autofix(sequence: &TokenSequence, autofix: &AutoFixAction) -> EditPlan {
    let Some(block_type) = autofix.block() else {
        log::warn!("Auto-fix names unknown block type '{}'", autofix.block_type);
        return EditPlan::new();
    };

    let len = sequence.len();
    let target = autofix.target_position;
    let in_range = target < len || (len == 0 && target == 0);

    let step = if !in_range {
        log::warn!(
            "Auto-fix target {} is past the end of a {}-token sequence, appending",
            target,
            len
        );
        append_step(block_type, len, 0)
    } else {
        let operation = match autofix.action_type {
            AutoFixActionType::InsertBefore => EditOperation::InsertBefore,
            AutoFixActionType::InsertAfter => EditOperation::InsertAfter,
        };
        EditStep::new(operation, block_type, target)
    };

    EditPlan { steps: vec![step] }
}

/// Replace-all plan instantiating every template slot in order
pub fn plan_apply_pattern(template: &PatternTemplate) -> EditPlan {
    let steps = template
        .blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let step = match i {
                0 => EditStep::new(EditOperation::ReplaceAll, block.block_type, 0),
                _ => EditStep::new(EditOperation::InsertAfter, block.block_type, i - 1),
            };
            step.with_text(block.default_value.clone())
        })
        .collect();
    EditPlan { steps }
}

/// Additive plan completing the sequence to the full template
///
/// With a window match, slots before the window are inserted in front of
/// the user's tokens and slots after it behind them. Without one, every slot
/// no user token fills is appended after the last token.
pub fn plan_complete_pattern(sequence: &TokenSequence, template: &PatternTemplate) -> EditPlan {
    let tokens = sequence.tokens();
    let mut plan = EditPlan::new();

    if let Some(start) = find_window(tokens, template) {
        let end = start + tokens.len();
        for (i, block) in template.blocks.iter().enumerate() {
            let step = if i < start {
                EditStep::new(EditOperation::InsertBefore, block.block_type, i)
            } else if i >= end {
                EditStep::new(EditOperation::InsertAfter, block.block_type, i - 1)
            } else {
                continue;
            };
            plan.push(step.with_text(block.default_value.clone()));
        }
        return plan;
    }

    log::debug!(
        "No window of '{}' matches the sequence, appending missing slots",
        template.id
    );
    let filled = fill_slots(tokens, template);
    let missing = template
        .blocks
        .iter()
        .zip(filled)
        .filter(|(_, filled)| !filled)
        .map(|(block, _)| block);
    for (offset, block) in missing.enumerate() {
        let step = append_step(block.block_type, tokens.len(), offset);
        plan.push(step.with_text(block.default_value.clone()));
    }
    plan
}

/// Step appending the `offset`-th new block after `len` existing tokens
fn append_step(block_type: BlockType, len: usize, offset: usize) -> EditStep {
    match len + offset {
        0 => EditStep::new(EditOperation::InsertBefore, block_type, 0),
        n => EditStep::new(EditOperation::InsertAfter, block_type, n - 1),
    }
}
