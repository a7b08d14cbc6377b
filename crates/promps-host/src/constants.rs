//! Host-wide constants
//!
//! Single source of truth for defaults and limits used across the host.

/// Default values for configuration
pub mod defaults {
    /// Number of actionable pattern suggestions
    pub const MAX_SUGGESTIONS: usize = 3;
}

/// User macro (saved template) settings
pub mod macros {
    /// Block type prefix marking a saved template reference
    pub const TEMPLATE_PREFIX: &str = "promps_template_";
    /// Nesting limit for templates that reference other templates
    pub const MAX_EXPANSION_DEPTH: usize = 8;
    /// Total blocks macros may contribute to one expansion
    pub const MAX_EXPANDED_BLOCKS: usize = 10_000;
}

/// Request loop settings
pub mod rpc {
    /// Reply sent by the health check command
    pub const GREETING: &str = "Welcome to Promps.";
}
