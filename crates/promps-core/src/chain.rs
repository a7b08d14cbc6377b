//! Block chains and their linearization into token sequences
//!
//! The visual editor describes its workspace as an ordered list of chain
//! heads, each block optionally followed by a `next` block. Linearization
//! flattens that into a [`TokenSequence`], chain by chain.

use serde::{Deserialize, Serialize};

use crate::types::{Article, BlockType, Particle, Punctuation, Token, TokenSequence, Verb};

/// One block in an editor chain, as serialized by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    /// Editor block type identifier, possibly outside the known vocabulary
    #[serde(rename = "type")]
    pub block_type: String,
    /// Field value for free-text blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Following block in the chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<BlockNode>>,
}

impl BlockNode {
    pub fn new(block_type: impl Into<String>, text: Option<String>) -> Self {
        Self {
            block_type: block_type.into(),
            text,
            next: None,
        }
    }

    /// Build a linked chain from `(type, text)` pairs; `None` when empty
    pub fn chain<I, S>(blocks: I) -> Option<Self>
    where
        I: IntoIterator<Item = (S, Option<String>)>,
        S: Into<String>,
    {
        let blocks: Vec<(String, Option<String>)> = blocks
            .into_iter()
            .map(|(block_type, text)| (block_type.into(), text))
            .collect();

        let mut head: Option<Box<BlockNode>> = None;
        for (block_type, text) in blocks.into_iter().rev() {
            head = Some(Box::new(BlockNode {
                block_type,
                text,
                next: head,
            }));
        }
        head.map(|node| *node)
    }

    /// Read chain heads from loosely-shaped JSON
    ///
    /// Accepts an array of heads or a single head object. Entries that are
    /// not objects are skipped; a block without a string `type` is kept with
    /// an empty type so its successors still reach the linearizer.
    pub fn heads_from_value(value: &serde_json::Value) -> Vec<BlockNode> {
        match value {
            serde_json::Value::Array(items) => items.iter().filter_map(Self::from_value).collect(),
            serde_json::Value::Object(_) => Self::from_value(value).into_iter().collect(),
            _ => Vec::new(),
        }
    }

    fn from_value(value: &serde_json::Value) -> Option<BlockNode> {
        let mut blocks = Vec::new();
        let mut cursor = value.as_object();
        while let Some(object) = cursor {
            let block_type = object
                .get("type")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let text = object
                .get("text")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            blocks.push((block_type, text));
            cursor = object.get("next").and_then(|v| v.as_object());
        }
        Self::chain(blocks)
    }

    /// Iterate over this block and every block after it
    pub fn iter(&self) -> BlockIter<'_> {
        BlockIter {
            current: Some(self),
        }
    }

    /// Number of blocks in the chain starting here
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether this block has a successor
    pub fn is_connected(&self) -> bool {
        self.next.is_some()
    }
}

impl Drop for BlockNode {
    // Long chains would otherwise overflow the stack through recursive drops
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

/// Iterator over a chain of blocks
pub struct BlockIter<'a> {
    current: Option<&'a BlockNode>,
}

impl<'a> Iterator for BlockIter<'a> {
    type Item = &'a BlockNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.next.as_deref();
        Some(node)
    }
}

/// Which chain heads contribute tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinearizePolicy {
    /// Every top-level block, including isolated ones
    #[default]
    AllTopBlocks,
    /// Only heads that have at least one successor
    ConnectedOnly,
}

/// Flatten chain heads into a positioned token sequence
///
/// Heads are visited in argument order and each chain in `next` order.
/// Blocks whose type is outside the vocabulary are skipped without
/// interrupting the rest of their chain. The chain index of every token is
/// the index of its head.
pub fn linearize(heads: &[BlockNode], policy: LinearizePolicy) -> TokenSequence {
    let mut sequence = TokenSequence::new();

    for (chain, head) in heads.iter().enumerate() {
        if policy == LinearizePolicy::ConnectedOnly && !head.is_connected() {
            log::debug!("Skipping unconnected block '{}'", head.block_type);
            continue;
        }

        for node in head.iter() {
            match node.block_type.parse::<BlockType>() {
                Ok(block_type) => {
                    sequence.push_in_chain(Token::new(block_type, node.text.clone()), chain);
                }
                Err(_) => {
                    log::debug!(
                        "Skipping block with unknown type '{}' in chain {}",
                        node.block_type,
                        chain
                    );
                }
            }
        }
    }

    sequence
}

/// Rebuild editor chains from a token sequence, one head per chain run
pub fn to_chains(sequence: &TokenSequence) -> Vec<BlockNode> {
    sequence
        .chains()
        .into_iter()
        .filter_map(|run| {
            BlockNode::chain(
                run.iter()
                    .map(|token| (token.block_type.id(), token.text.clone())),
            )
        })
        .collect()
}

/// Fluent builder for editor chains
///
/// # Example
///
/// ```ignore
/// let heads = ChainBuilder::new()
///     .noun("User")
///     .particle(Particle::Ga)
///     .noun("Order")
///     .particle(Particle::Wo)
///     .verb(Verb::Analyze)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ChainBuilder {
    chains: Vec<Vec<(String, Option<String>)>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self {
            chains: vec![Vec::new()],
        }
    }

    /// Append a raw block, which may be outside the vocabulary
    pub fn block(mut self, block_type: impl Into<String>, text: Option<&str>) -> Self {
        if self.chains.is_empty() {
            self.chains.push(Vec::new());
        }
        if let Some(chain) = self.chains.last_mut() {
            chain.push((block_type.into(), text.map(str::to_string)));
        }
        self
    }

    pub fn noun(self, text: &str) -> Self {
        self.block(BlockType::Noun.id(), Some(text))
    }

    pub fn other(self, text: &str) -> Self {
        self.block(BlockType::Other.id(), Some(text))
    }

    pub fn custom_verb(self, text: &str) -> Self {
        self.block(BlockType::CustomVerb.id(), Some(text))
    }

    pub fn particle(self, particle: Particle) -> Self {
        self.block(BlockType::Particle(particle).id(), None)
    }

    pub fn article(self, article: Article) -> Self {
        self.block(BlockType::Article(article).id(), None)
    }

    pub fn verb(self, verb: Verb) -> Self {
        self.block(BlockType::Verb(verb).id(), None)
    }

    pub fn punctuation(self, mark: Punctuation) -> Self {
        self.block(BlockType::Punctuation(mark).id(), None)
    }

    /// Start a new top-level chain
    pub fn new_chain(mut self) -> Self {
        self.chains.push(Vec::new());
        self
    }

    /// Build the chain heads, dropping empty chains
    pub fn build(self) -> Vec<BlockNode> {
        self.chains.into_iter().filter_map(BlockNode::chain).collect()
    }

    /// Build and linearize with the default policy
    pub fn linearize(self) -> TokenSequence {
        linearize(&self.build(), LinearizePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenKind;

    #[test]
    fn test_linearize_single_chain() {
        let seq = ChainBuilder::new()
            .noun("User")
            .particle(Particle::Ga)
            .noun("Order")
            .particle(Particle::Wo)
            .verb(Verb::Analyze)
            .linearize();

        assert_eq!(seq.len(), 5);
        let kinds: Vec<TokenKind> = seq.iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Noun,
                TokenKind::Particle,
                TokenKind::Noun,
                TokenKind::Particle,
                TokenKind::Verb
            ]
        );
        assert_eq!(seq.get(0).unwrap().text.as_deref(), Some("User"));
        assert_eq!(seq.get(4).unwrap().subkind(), Some("analyze"));
    }

    #[test]
    fn test_isolated_blocks_are_kept_by_default() {
        let heads = ChainBuilder::new()
            .noun("A")
            .particle(Particle::Wo)
            .new_chain()
            .noun("Lonely")
            .build();

        let all = linearize(&heads, LinearizePolicy::AllTopBlocks);
        assert_eq!(all.len(), 3);
        assert_eq!(all.get(2).unwrap().chain, 1);

        let connected = linearize(&heads, LinearizePolicy::ConnectedOnly);
        assert_eq!(connected.len(), 2);
    }

    #[test]
    fn test_unknown_blocks_are_skipped() {
        let seq = ChainBuilder::new()
            .noun("A")
            .block("promps_mystery", None)
            .particle(Particle::Wo)
            .verb(Verb::Create)
            .linearize();

        assert_eq!(seq.len(), 3);
        let positions: Vec<usize> = seq.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_input() {
        assert!(linearize(&[], LinearizePolicy::AllTopBlocks).is_empty());
        assert!(ChainBuilder::new().build().is_empty());
    }

    #[test]
    fn test_heads_from_loose_json() {
        let value = serde_json::json!([
            {"type": "promps_noun", "text": "Doc", "next": {
                "type": 42,
                "next": {"type": "promps_particle_wo", "next": {"type": "promps_verb_summarize"}}
            }},
            "garbage",
            {"type": "promps_noun", "text": "Alone"}
        ]);

        let heads = BlockNode::heads_from_value(&value);
        assert_eq!(heads.len(), 2);
        assert_eq!(heads[0].len(), 4);

        let seq = linearize(&heads, LinearizePolicy::AllTopBlocks);
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.get(3).unwrap().text.as_deref(), Some("Alone"));

        assert!(BlockNode::heads_from_value(&serde_json::json!("nope")).is_empty());
    }

    #[test]
    fn test_block_node_json_shape() {
        let json = r#"{"type":"promps_noun","text":"User","next":{"type":"promps_particle_ga"}}"#;
        let node: BlockNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.len(), 2);
        assert_eq!(serde_json::to_string(&node).unwrap(), json);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let blocks = (0..100_000).map(|i| ("promps_noun", Some(format!("n{i}"))));
        let head = BlockNode::chain(blocks).unwrap();
        let seq = linearize(std::slice::from_ref(&head), LinearizePolicy::AllTopBlocks);
        assert_eq!(seq.len(), 100_000);
        assert_eq!(seq.get(99_999).unwrap().position, 99_999);
    }

    #[test]
    fn test_to_chains_restores_chain_runs() {
        let seq = ChainBuilder::new()
            .noun("A")
            .particle(Particle::Ga)
            .new_chain()
            .verb(Verb::Teach)
            .linearize();

        let heads = to_chains(&seq);
        assert_eq!(heads.len(), 2);
        assert_eq!(linearize(&heads, LinearizePolicy::AllTopBlocks), seq);
    }
}
