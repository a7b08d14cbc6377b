//! Host commands
//!
//! Each command takes the shared [`HostState`] and a typed argument struct
//! deserialized from the request. Commands that need a token sequence accept
//! it in one of three shapes (see [`SequenceArgs`]).

use promps_core::{
    BlockNode, EditPlan, LinearizePolicy, Locale, PatternMatchResult, PatternTemplate,
    PlanRequest, TokenSequence, ValidationResult,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CommandError, Result};
use crate::macros::MacroRegistry;
use crate::state::HostState;

/// Token sequence input
///
/// Exactly one source is used, in this order: `tokens` (an already
/// linearized sequence), `chains` (editor chain heads, macro-expanded and
/// linearized with `policy` or the configured default), `dsl` (DSL text).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceArgs {
    #[serde(default)]
    pub tokens: Option<TokenSequence>,
    #[serde(default)]
    pub chains: Option<Value>,
    #[serde(default)]
    pub dsl: Option<String>,
    #[serde(default)]
    pub policy: Option<LinearizePolicy>,
}

impl SequenceArgs {
    pub fn from_tokens(tokens: TokenSequence) -> Self {
        Self {
            tokens: Some(tokens),
            ..Self::default()
        }
    }

    pub fn from_dsl(dsl: impl Into<String>) -> Self {
        Self {
            dsl: Some(dsl.into()),
            ..Self::default()
        }
    }

    pub fn from_chains(chains: Value) -> Self {
        Self {
            chains: Some(chains),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateArgs {
    #[serde(flatten)]
    pub sequence: SequenceArgs,
    /// Grammar rule profile
    #[serde(default)]
    pub locale: Option<Locale>,
    /// Language of messages and labels; defaults to `locale`
    #[serde(default)]
    pub display_locale: Option<Locale>,
}

/// Arguments for commands that only need a sequence and a locale
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedArgs {
    #[serde(flatten)]
    pub sequence: SequenceArgs,
    #[serde(default)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestArgs {
    #[serde(flatten)]
    pub sequence: SequenceArgs,
    #[serde(default)]
    pub locale: Option<Locale>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPatternsArgs {
    #[serde(default)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFixArgs {
    #[serde(flatten)]
    pub sequence: SequenceArgs,
    #[serde(default)]
    pub locale: Option<Locale>,
    pub request: PlanRequest,
}

/// Edit plan together with the sequence it produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanFixResult {
    pub plan: EditPlan,
    pub tokens: TokenSequence,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseDslArgs {
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GreetArgs {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterMacroArgs {
    pub id: String,
    /// A single chain head, or an array whose first element is used
    pub chain: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MacroIdArgs {
    pub id: String,
}

/// Saved macro as listed to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroInfo {
    pub id: String,
    /// Block type to place in the editor
    pub block_type: String,
    pub block_count: usize,
}

// ============================================================================
// Sequence resolution
// ============================================================================

/// Resolve the token sequence a request refers to
pub fn resolve_sequence(state: &HostState, args: &SequenceArgs) -> Result<TokenSequence> {
    if let Some(tokens) = &args.tokens {
        // Renumber positions in case the host sent stale ones
        return Ok(TokenSequence::from(tokens.clone().into_tokens()));
    }

    if let Some(chains) = &args.chains {
        let heads = BlockNode::heads_from_value(chains);
        let expanded = state.macros.expand_chains(&heads);
        let policy = args.policy.unwrap_or(state.config.linearize_policy);
        return Ok(promps_core::linearize(&expanded, policy));
    }

    if let Some(dsl) = &args.dsl {
        return Ok(promps_core::parse_dsl(dsl));
    }

    Err(CommandError::invalid_arguments(
        "expected one of `tokens`, `chains` or `dsl`",
    ))
}

// ============================================================================
// Commands
// ============================================================================

/// Linearize the given input into a token sequence
pub fn linearize(state: &HostState, args: SequenceArgs) -> Result<TokenSequence> {
    resolve_sequence(state, &args)
}

/// Validate a token sequence against the grammar of a locale
pub fn validate(state: &HostState, args: ValidateArgs) -> Result<ValidationResult> {
    let sequence = resolve_sequence(state, &args.sequence)?;
    let grammar = state.locale(args.locale);
    let display = args.display_locale.unwrap_or(grammar);

    let result = promps_core::validate_localized(&sequence, grammar, display);
    log::debug!(
        "Validated {} tokens ({}): {} errors, {} warnings",
        sequence.len(),
        grammar,
        result.error_count,
        result.warning_count
    );
    Ok(result)
}

/// Score every catalog pattern against the sequence
pub fn analyze_patterns(state: &HostState, args: LocalizedArgs) -> Result<Vec<PatternMatchResult>> {
    let catalog = state.catalog(state.locale(args.locale))?;
    let sequence = resolve_sequence(state, &args.sequence)?;
    Ok(promps_core::analyze_patterns(&sequence, catalog))
}

/// Best matching patterns, excluding ones that do not match at all
pub fn suggest_patterns(state: &HostState, args: SuggestArgs) -> Result<Vec<PatternMatchResult>> {
    let catalog = state.catalog(state.locale(args.locale))?;
    let sequence = resolve_sequence(state, &args.sequence)?;
    let limit = args.limit.unwrap_or(state.config.max_suggestions);
    Ok(promps_core::suggest_patterns(&sequence, catalog, limit))
}

/// List the templates of the active catalog
pub fn get_patterns(state: &HostState, args: GetPatternsArgs) -> Result<Vec<PatternTemplate>> {
    let catalog = state.catalog(state.locale(args.locale))?;
    Ok(catalog.templates().to_vec())
}

/// Plan an auto-fix or pattern application and apply it
///
/// Auto-fixes do not need the pattern catalog and keep working when it is
/// unavailable.
pub fn plan_fix(state: &HostState, args: PlanFixArgs) -> Result<PlanFixResult> {
    let sequence = resolve_sequence(state, &args.sequence)?;

    let plan = match &args.request {
        PlanRequest::AutoFix { autofix } => promps_core::plan_autofix(&sequence, autofix),
        request => {
            let catalog = state.catalog(state.locale(args.locale))?;
            promps_core::plan_fix(&sequence, request, catalog)
        }
    };

    let tokens = plan.apply(&sequence);
    Ok(PlanFixResult { plan, tokens })
}

/// Render the sequence as prompt text
pub fn render_prompt(state: &HostState, args: LocalizedArgs) -> Result<String> {
    let sequence = resolve_sequence(state, &args.sequence)?;
    Ok(promps_core::render(&sequence, state.locale(args.locale)))
}

/// Render the sequence as a prompt with noun-bearing sentences annotated
pub fn generate_prompt(state: &HostState, args: LocalizedArgs) -> Result<String> {
    let sequence = resolve_sequence(state, &args.sequence)?;
    Ok(promps_core::generate_prompt(&sequence, state.locale(args.locale)))
}

/// Encode the sequence as DSL text
pub fn to_dsl(state: &HostState, args: LocalizedArgs) -> Result<String> {
    let sequence = resolve_sequence(state, &args.sequence)?;
    Ok(promps_core::to_dsl(&sequence, state.locale(args.locale)))
}

/// Decode DSL text into a token sequence
pub fn parse_dsl(_state: &HostState, args: ParseDslArgs) -> Result<TokenSequence> {
    Ok(promps_core::parse_dsl(&args.text))
}

/// Health check
pub fn greet(_state: &HostState, args: GreetArgs) -> Result<String> {
    let name = if args.name.trim().is_empty() {
        "there"
    } else {
        args.name.trim()
    };
    Ok(format!(
        "Hello, {}! {}",
        name,
        crate::constants::rpc::GREETING
    ))
}

/// Save a chain as a named macro
pub fn register_macro(state: &mut HostState, args: RegisterMacroArgs) -> Result<MacroInfo> {
    let chain = BlockNode::heads_from_value(&args.chain)
        .into_iter()
        .next()
        .ok_or_else(|| CommandError::invalid_arguments("macro chain is empty"))?;

    let info = MacroInfo {
        block_type: MacroRegistry::block_type_for(&args.id),
        block_count: chain.len(),
        id: args.id.clone(),
    };
    state.macros.register(args.id, chain)?;
    Ok(info)
}

/// Delete a named macro; returns whether it existed
pub fn remove_macro(state: &mut HostState, args: MacroIdArgs) -> Result<bool> {
    Ok(state.macros.remove(&args.id))
}

/// List saved macros
pub fn list_macros(state: &HostState) -> Result<Vec<MacroInfo>> {
    Ok(state
        .macros
        .ids()
        .into_iter()
        .filter_map(|id| {
            state.macros.get(id).map(|chain| MacroInfo {
                id: id.to_string(),
                block_type: MacroRegistry::block_type_for(id),
                block_count: chain.len(),
            })
        })
        .collect())
}
