//! Named macros (saved block templates)
//!
//! Users can save a block chain under a name and drop it into the workspace
//! as a single `promps_template_<id>` block. Macros are expanded inline
//! before linearization, so the core never sees them.

use std::collections::HashMap;

use promps_core::BlockNode;

use crate::constants::macros::{MAX_EXPANDED_BLOCKS, MAX_EXPANSION_DEPTH, TEMPLATE_PREFIX};
use crate::error::{CommandError, Result};

/// Saved chains keyed by macro id
#[derive(Debug, Clone, Default)]
pub struct MacroRegistry {
    macros: HashMap<String, BlockNode>,
}

impl MacroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a chain under `id`, replacing any previous macro with that id
    pub fn register(&mut self, id: impl Into<String>, chain: BlockNode) -> Result<()> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CommandError::invalid_arguments("macro id must not be empty"));
        }

        log::debug!("Registering macro '{}' ({} blocks)", id, chain.len());
        self.macros.insert(id, chain);
        Ok(())
    }

    /// Remove a macro, returning whether it existed
    pub fn remove(&mut self, id: &str) -> bool {
        self.macros.remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&BlockNode> {
        self.macros.get(id)
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.macros.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Block type that references the macro `id`
    pub fn block_type_for(id: &str) -> String {
        format!("{}{}", TEMPLATE_PREFIX, id)
    }

    /// Replace every macro block in `heads` with its saved chain
    ///
    /// References to unregistered macros are kept as-is; the linearizer
    /// skips them like any other unknown block. A reference to a macro that
    /// is already being expanded, or nested deeper than
    /// [`MAX_EXPANSION_DEPTH`], is dropped. At most [`MAX_EXPANDED_BLOCKS`]
    /// saved blocks are read across all heads; expansion stops there.
    pub fn expand_chains(&self, heads: &[BlockNode]) -> Vec<BlockNode> {
        if self.macros.is_empty() {
            return heads.to_vec();
        }

        let mut expansion = Expansion::default();
        heads
            .iter()
            .map(|head| {
                let mut blocks = Vec::new();
                self.expand_into(head, &mut expansion, &mut blocks);
                // A head that expands to nothing keeps its slot so chain
                // indices stay aligned with the editor's heads
                BlockNode::chain(blocks).unwrap_or_else(|| BlockNode::new(String::new(), None))
            })
            .collect()
    }

    fn expand_into<'a>(
        &'a self,
        chain: &BlockNode,
        expansion: &mut Expansion<'a>,
        out: &mut Vec<(String, Option<String>)>,
    ) {
        let inside_macro = !expansion.active.is_empty();

        for node in chain.iter() {
            if inside_macro {
                if expansion.truncated {
                    return;
                }
                if expansion.visited >= MAX_EXPANDED_BLOCKS {
                    log::warn!(
                        "Macro expansion reached {} blocks, truncating",
                        MAX_EXPANDED_BLOCKS
                    );
                    expansion.truncated = true;
                    return;
                }
                expansion.visited += 1;
            }

            let saved = node
                .block_type
                .strip_prefix(TEMPLATE_PREFIX)
                .and_then(|id| self.macros.get_key_value(id));

            let Some((id, saved)) = saved else {
                out.push((node.block_type.clone(), node.text.clone()));
                continue;
            };

            if expansion.active.contains(&id.as_str()) {
                log::warn!("Macro '{}' refers to itself, dropping the reference", id);
                continue;
            }
            if expansion.active.len() >= MAX_EXPANSION_DEPTH {
                log::warn!(
                    "Macro '{}' exceeds expansion depth {}, dropping it",
                    id,
                    MAX_EXPANSION_DEPTH
                );
                continue;
            }

            expansion.active.push(id.as_str());
            self.expand_into(saved, expansion, out);
            expansion.active.pop();
        }
    }
}

/// Bookkeeping for one `expand_chains` call
#[derive(Default)]
struct Expansion<'a> {
    /// Macros currently being expanded, outermost first
    active: Vec<&'a str>,
    /// Blocks read from saved macros so far, references included
    visited: usize,
    truncated: bool,
}
