//! Core types for prompt token sequences
//!
//! These types define the closed block vocabulary produced by the visual
//! editor, the tagged tokens derived from it, and the ordered sequence that
//! validation and pattern matching consume.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Prefix shared by every block type identifier
pub const BLOCK_PREFIX: &str = "promps_";

/// Language of the grammar profile and of rendered text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Japanese (SOV with case particles)
    #[default]
    Ja,
    /// English (SVO with articles and prepositions)
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    /// Accepts bare language codes and region-qualified tags (`ja-JP`, `en_US`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .split(|c: char| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "ja" => Ok(Self::Ja),
            "en" => Ok(Self::En),
            _ => Err(CoreError::UnknownLocale(s.to_string())),
        }
    }
}

/// Coarse category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Free-text noun (名詞)
    Noun,
    /// Case particle or its English connector (助詞)
    Particle,
    /// English article, demonstrative or `please`
    Article,
    /// Fixed or custom verb (動詞)
    Verb,
    /// Punctuation mark
    Punctuation,
    /// Free text that fits no other kind
    Other,
}

/// Japanese case particles and their English connector renderings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Particle {
    Ga,
    Wo,
    Ni,
    De,
    To,
    He,
    Kara,
    Made,
    Yori,
}

impl Particle {
    pub const ALL: [Particle; 9] = [
        Self::Ga,
        Self::Wo,
        Self::Ni,
        Self::De,
        Self::To,
        Self::He,
        Self::Kara,
        Self::Made,
        Self::Yori,
    ];

    /// Subkind identifier used in block type ids
    pub fn id(&self) -> &'static str {
        match self {
            Self::Ga => "ga",
            Self::Wo => "wo",
            Self::Ni => "ni",
            Self::De => "de",
            Self::To => "to",
            Self::He => "he",
            Self::Kara => "kara",
            Self::Made => "made",
            Self::Yori => "yori",
        }
    }

    /// Rendered form; `ga` and `wo` have no English rendering
    pub fn surface(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ja => match self {
                Self::Ga => "が",
                Self::Wo => "を",
                Self::Ni => "に",
                Self::De => "で",
                Self::To => "と",
                Self::He => "へ",
                Self::Kara => "から",
                Self::Made => "まで",
                Self::Yori => "より",
            },
            Locale::En => match self {
                Self::Ga | Self::Wo => "",
                Self::Ni => "to",
                Self::De => "with",
                Self::To => "and",
                Self::He => "toward",
                Self::Kara => "from",
                Self::Made => "until",
                Self::Yori => "than",
            },
        }
    }

    /// Whether this particle acts as an English preposition or conjunction
    ///
    /// The subject and object markers are silent in English.
    pub fn is_preposition(&self) -> bool {
        !matches!(self, Self::Ga | Self::Wo)
    }

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Parse a surface form in either locale
    pub fn from_surface(surface: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| {
            p.surface(Locale::Ja) == surface
                || (p.is_preposition() && p.surface(Locale::En) == surface)
        })
    }
}

/// English articles, demonstratives and the politeness marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Article {
    A,
    An,
    The,
    This,
    That,
    Please,
}

impl Article {
    pub const ALL: [Article; 6] = [
        Self::A,
        Self::An,
        Self::The,
        Self::This,
        Self::That,
        Self::Please,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::An => "an",
            Self::The => "the",
            Self::This => "this",
            Self::That => "that",
            Self::Please => "please",
        }
    }

    /// Articles render identically in both locales
    pub fn surface(&self) -> &'static str {
        self.id()
    }

    /// Whether this article introduces a noun phrase (everything but `please`)
    pub fn is_determiner(&self) -> bool {
        !matches!(self, Self::Please)
    }

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    pub fn from_surface(surface: &str) -> Option<Self> {
        Self::from_id(surface)
    }
}

/// Fixed-vocabulary verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Analyze,
    Summarize,
    Translate,
    Create,
    Generate,
    Convert,
    Delete,
    Update,
    Extract,
    Explain,
    Describe,
    Teach,
}

impl Verb {
    pub const ALL: [Verb; 12] = [
        Self::Analyze,
        Self::Summarize,
        Self::Translate,
        Self::Create,
        Self::Generate,
        Self::Convert,
        Self::Delete,
        Self::Update,
        Self::Extract,
        Self::Explain,
        Self::Describe,
        Self::Teach,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Summarize => "summarize",
            Self::Translate => "translate",
            Self::Create => "create",
            Self::Generate => "generate",
            Self::Convert => "convert",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Extract => "extract",
            Self::Explain => "explain",
            Self::Describe => "describe",
            Self::Teach => "teach",
        }
    }

    pub fn surface(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.id(),
            Locale::Ja => match self {
                Self::Analyze => "分析して",
                Self::Summarize => "要約して",
                Self::Translate => "翻訳して",
                Self::Create => "作成して",
                Self::Generate => "生成して",
                Self::Convert => "変換して",
                Self::Delete => "削除して",
                Self::Update => "更新して",
                Self::Extract => "抽出して",
                Self::Explain => "説明して",
                Self::Describe => "解説して",
                Self::Teach => "教えて",
            },
        }
    }

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.id() == id)
    }

    /// Parse a surface form in either locale
    pub fn from_surface(surface: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.surface(Locale::Ja) == surface || v.id() == surface)
    }
}

/// Punctuation marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuation {
    Touten,
    Kuten,
    Exclaim,
    Question,
    DoubleQuote,
    SingleQuote,
    Comma,
    Slash,
    Ampersand,
    Period,
}

impl Punctuation {
    pub const ALL: [Punctuation; 10] = [
        Self::Touten,
        Self::Kuten,
        Self::Exclaim,
        Self::Question,
        Self::DoubleQuote,
        Self::SingleQuote,
        Self::Comma,
        Self::Slash,
        Self::Ampersand,
        Self::Period,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Touten => "touten",
            Self::Kuten => "kuten",
            Self::Exclaim => "exclaim",
            Self::Question => "question",
            Self::DoubleQuote => "dquote",
            Self::SingleQuote => "squote",
            Self::Comma => "comma",
            Self::Slash => "slash",
            Self::Ampersand => "amp",
            Self::Period => "period",
        }
    }

    /// Full-width marks switch to their ASCII forms in English
    pub fn surface(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Touten, Locale::Ja) => "、",
            (Self::Touten, Locale::En) => ",",
            (Self::Kuten, Locale::Ja) => "。",
            (Self::Kuten, Locale::En) => ".",
            (Self::Exclaim, Locale::Ja) => "！",
            (Self::Exclaim, Locale::En) => "!",
            (Self::Question, Locale::Ja) => "？",
            (Self::Question, Locale::En) => "?",
            (Self::DoubleQuote, _) => "\"",
            (Self::SingleQuote, _) => "'",
            (Self::Comma, _) => ",",
            (Self::Slash, _) => "/",
            (Self::Ampersand, _) => "&",
            (Self::Period, _) => ".",
        }
    }

    /// Whether this mark ends a sentence
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Kuten | Self::Exclaim | Self::Question | Self::Period
        )
    }

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Parse a mark in either width; ASCII `,` and `.` map to comma and period
    pub fn from_surface(surface: &str) -> Option<Self> {
        match surface {
            "、" => Some(Self::Touten),
            "。" => Some(Self::Kuten),
            "！" | "!" => Some(Self::Exclaim),
            "？" | "?" => Some(Self::Question),
            "\"" => Some(Self::DoubleQuote),
            "'" => Some(Self::SingleQuote),
            "," => Some(Self::Comma),
            "/" => Some(Self::Slash),
            "&" => Some(Self::Ampersand),
            "." => Some(Self::Period),
            _ => None,
        }
    }
}

/// The closed vocabulary of editor blocks
///
/// Serialized as the editor's string identifier (`promps_particle_ga`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BlockType {
    /// `promps_noun`
    Noun,
    /// `promps_other`
    Other,
    /// `promps_particle_*`
    Particle(Particle),
    /// `promps_article_*`
    Article(Article),
    /// `promps_verb_*` for the fixed verbs
    Verb(Verb),
    /// `promps_verb_custom`
    CustomVerb,
    /// `promps_punct_*`
    Punctuation(Punctuation),
}

impl BlockType {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Noun => TokenKind::Noun,
            Self::Other => TokenKind::Other,
            Self::Particle(_) => TokenKind::Particle,
            Self::Article(_) => TokenKind::Article,
            Self::Verb(_) | Self::CustomVerb => TokenKind::Verb,
            Self::Punctuation(_) => TokenKind::Punctuation,
        }
    }

    /// Fine-grained tag for fixed-vocabulary blocks; `None` for free text
    pub fn subkind(&self) -> Option<&'static str> {
        match self {
            Self::Noun | Self::Other | Self::CustomVerb => None,
            Self::Particle(p) => Some(p.id()),
            Self::Article(a) => Some(a.id()),
            Self::Verb(v) => Some(v.id()),
            Self::Punctuation(p) => Some(p.id()),
        }
    }

    /// Whether tokens of this type carry a user-entered text payload
    pub fn is_free_text(&self) -> bool {
        matches!(self, Self::Noun | Self::Other | Self::CustomVerb)
    }

    /// Locale surface form for fixed vocabulary; `None` for free text
    pub fn surface(&self, locale: Locale) -> Option<&'static str> {
        match self {
            Self::Noun | Self::Other | Self::CustomVerb => None,
            Self::Particle(p) => Some(p.surface(locale)),
            Self::Article(a) => Some(a.surface()),
            Self::Verb(v) => Some(v.surface(locale)),
            Self::Punctuation(p) => Some(p.surface(locale)),
        }
    }

    /// Editor identifier, e.g. `promps_verb_analyze`
    pub fn id(&self) -> String {
        match self {
            Self::Noun => format!("{BLOCK_PREFIX}noun"),
            Self::Other => format!("{BLOCK_PREFIX}other"),
            Self::Particle(p) => format!("{BLOCK_PREFIX}particle_{}", p.id()),
            Self::Article(a) => format!("{BLOCK_PREFIX}article_{}", a.id()),
            Self::Verb(v) => format!("{BLOCK_PREFIX}verb_{}", v.id()),
            Self::CustomVerb => format!("{BLOCK_PREFIX}verb_custom"),
            Self::Punctuation(p) => format!("{BLOCK_PREFIX}punct_{}", p.id()),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for BlockType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(BLOCK_PREFIX)
            .ok_or_else(|| CoreError::unknown_block(s))?;

        let parsed = match rest {
            "noun" => Some(Self::Noun),
            "other" => Some(Self::Other),
            "verb_custom" => Some(Self::CustomVerb),
            _ => {
                if let Some(id) = rest.strip_prefix("particle_") {
                    Particle::from_id(id).map(Self::Particle)
                } else if let Some(id) = rest.strip_prefix("article_") {
                    Article::from_id(id).map(Self::Article)
                } else if let Some(id) = rest.strip_prefix("verb_") {
                    Verb::from_id(id).map(Self::Verb)
                } else if let Some(id) = rest.strip_prefix("punct_") {
                    Punctuation::from_id(id).map(Self::Punctuation)
                } else {
                    None
                }
            }
        };

        parsed.ok_or_else(|| CoreError::unknown_block(s))
    }
}

impl TryFrom<String> for BlockType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BlockType> for String {
    fn from(value: BlockType) -> Self {
        value.id()
    }
}

/// One tagged unit of the linear prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Block the token was produced from
    pub block_type: BlockType,
    /// Text payload for free-text kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Zero-based slot in the sequence; recomputed by [`TokenSequence`]
    #[serde(default)]
    pub position: usize,
    /// Index of the editor chain the token came from
    #[serde(default)]
    pub chain: usize,
}

impl Token {
    /// Create a token; text is dropped for fixed-vocabulary blocks
    pub fn new(block_type: BlockType, text: Option<String>) -> Self {
        let text = if block_type.is_free_text() { text } else { None };
        Self {
            block_type,
            text,
            position: 0,
            chain: 0,
        }
    }

    pub fn noun(text: impl Into<String>) -> Self {
        Self::new(BlockType::Noun, Some(text.into()))
    }

    pub fn other(text: impl Into<String>) -> Self {
        Self::new(BlockType::Other, Some(text.into()))
    }

    pub fn custom_verb(text: impl Into<String>) -> Self {
        Self::new(BlockType::CustomVerb, Some(text.into()))
    }

    pub fn particle(particle: Particle) -> Self {
        Self::new(BlockType::Particle(particle), None)
    }

    pub fn article(article: Article) -> Self {
        Self::new(BlockType::Article(article), None)
    }

    pub fn verb(verb: Verb) -> Self {
        Self::new(BlockType::Verb(verb), None)
    }

    pub fn punctuation(mark: Punctuation) -> Self {
        Self::new(BlockType::Punctuation(mark), None)
    }

    /// Place the token in a given chain
    pub fn in_chain(mut self, chain: usize) -> Self {
        self.chain = chain;
        self
    }

    pub fn kind(&self) -> TokenKind {
        self.block_type.kind()
    }

    pub fn subkind(&self) -> Option<&'static str> {
        self.block_type.subkind()
    }

    pub fn is_particle(&self, particle: Particle) -> bool {
        self.block_type == BlockType::Particle(particle)
    }

    /// Whether this token is an article other than `please`
    pub fn is_determiner(&self) -> bool {
        matches!(self.block_type, BlockType::Article(a) if a.is_determiner())
    }

    /// Rendered text in the given locale
    pub fn surface(&self, locale: Locale) -> &str {
        match self.block_type.surface(locale) {
            Some(fixed) => fixed,
            None => self.text.as_deref().unwrap_or_default(),
        }
    }
}

/// An ordered, positioned list of tokens
///
/// Positions are always `0..len` in order; every constructor and mutation
/// renumbers. Serialized as a plain array so hosts never supply positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Token>", into = "Vec<Token>")]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Append a token to the last chain
    pub fn push(&mut self, token: Token) {
        let chain = self.tokens.last().map(|t| t.chain).unwrap_or(0);
        self.push_in_chain(token, chain);
    }

    /// Append a token to an explicit chain
    pub fn push_in_chain(&mut self, mut token: Token, chain: usize) {
        token.chain = chain;
        token.position = self.tokens.len();
        self.tokens.push(token);
    }

    /// Insert a token before `index`, clamped to the end of the sequence
    ///
    /// The token joins the chain of the token it lands in front of, or the
    /// last chain when appended.
    pub fn insert(&mut self, index: usize, mut token: Token) {
        let index = index.min(self.tokens.len());
        token.chain = self
            .tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .map(|t| t.chain)
            .unwrap_or(0);
        self.tokens.insert(index, token);
        self.renumber();
    }

    /// Insert a token after `index`, joining the chain of the anchor token
    ///
    /// Past the end, or on an empty sequence, the token is appended.
    pub fn insert_after(&mut self, index: usize, mut token: Token) {
        match self.tokens.get(index) {
            Some(anchor) => {
                token.chain = anchor.chain;
                self.tokens.insert(index + 1, token);
                self.renumber();
            }
            None => self.push(token),
        }
    }

    /// Split the sequence into runs of tokens from the same chain
    pub fn chains(&self) -> Vec<&[Token]> {
        let mut runs = Vec::new();
        let mut start = 0;
        for i in 1..=self.tokens.len() {
            if i == self.tokens.len() || self.tokens[i].chain != self.tokens[start].chain {
                runs.push(&self.tokens[start..i]);
                start = i;
            }
        }
        runs
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    fn renumber(&mut self) {
        for (i, token) in self.tokens.iter_mut().enumerate() {
            token.position = i;
        }
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        let mut sequence = Self { tokens };
        sequence.renumber();
        sequence
    }
}

impl From<TokenSequence> for Vec<Token> {
    fn from(sequence: TokenSequence) -> Self {
        sequence.tokens
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_ids_parse_back() {
        let samples = [
            BlockType::Noun,
            BlockType::Other,
            BlockType::CustomVerb,
            BlockType::Particle(Particle::Kara),
            BlockType::Article(Article::Please),
            BlockType::Verb(Verb::Teach),
            BlockType::Punctuation(Punctuation::Ampersand),
        ];
        for block in samples {
            assert_eq!(block.id().parse::<BlockType>().unwrap(), block);
        }
        assert_eq!(BlockType::Particle(Particle::Ga).id(), "promps_particle_ga");
        assert_eq!(BlockType::Punctuation(Punctuation::DoubleQuote).id(), "promps_punct_dquote");
    }

    #[test]
    fn test_unknown_block_type() {
        assert!("promps_particle_no".parse::<BlockType>().is_err());
        assert!("promps_template_abc".parse::<BlockType>().is_err());
        assert!("noun".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_kind_and_subkind() {
        assert_eq!(BlockType::Verb(Verb::Analyze).kind(), TokenKind::Verb);
        assert_eq!(BlockType::CustomVerb.kind(), TokenKind::Verb);
        assert_eq!(BlockType::CustomVerb.subkind(), None);
        assert_eq!(BlockType::Particle(Particle::Wo).subkind(), Some("wo"));
        assert_eq!(BlockType::Noun.subkind(), None);
    }

    #[test]
    fn test_fixed_tokens_drop_text() {
        let token = Token::new(BlockType::Particle(Particle::Ga), Some("ignored".into()));
        assert_eq!(token.text, None);
        let noun = Token::new(BlockType::Noun, Some("User".into()));
        assert_eq!(noun.text.as_deref(), Some("User"));
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("ja".parse::<Locale>().unwrap(), Locale::Ja);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_surface_forms() {
        assert_eq!(Particle::Ga.surface(Locale::Ja), "が");
        assert_eq!(Particle::Ga.surface(Locale::En), "");
        assert_eq!(Particle::Kara.surface(Locale::En), "from");
        assert_eq!(Verb::Teach.surface(Locale::Ja), "教えて");
        assert_eq!(Punctuation::Kuten.surface(Locale::En), ".");
        assert_eq!(Token::noun("User").surface(Locale::En), "User");
    }

    #[test]
    fn test_sequence_positions_after_insert() {
        let mut seq: TokenSequence = vec![
            Token::noun("A"),
            Token::noun("B").in_chain(1),
        ]
        .into();
        seq.insert(1, Token::particle(Particle::To));
        seq.insert(99, Token::verb(Verb::Create));

        let positions: Vec<usize> = seq.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
        assert_eq!(seq.get(1).unwrap().chain, 1);
        assert_eq!(seq.get(3).unwrap().chain, 1);
        assert_eq!(seq.chains().len(), 2);
    }

    #[test]
    fn test_insert_after_keeps_anchor_chain() {
        let mut seq: TokenSequence = vec![
            Token::article(Article::The),
            Token::verb(Verb::Explain).in_chain(1),
        ]
        .into();
        seq.insert_after(0, Token::noun("Report"));
        assert_eq!(seq.get(1).unwrap().chain, 0);
        assert_eq!(seq.get(2).unwrap().position, 2);

        let mut empty = TokenSequence::new();
        empty.insert_after(5, Token::noun("X"));
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn test_sequence_serializes_as_array() {
        let seq: TokenSequence = vec![Token::noun("User"), Token::particle(Particle::Ga)].into();
        let json = serde_json::to_string(&seq).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"blockType\":\"promps_noun\""));
        assert!(json.contains("\"blockType\":\"promps_particle_ga\""));

        // Positions supplied by a host are ignored and recomputed
        let raw = r#"[{"blockType":"promps_noun","text":"A","position":7},
                      {"blockType":"promps_verb_analyze","position":7}]"#;
        let parsed: TokenSequence = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.get(0).unwrap().position, 0);
        assert_eq!(parsed.get(1).unwrap().position, 1);
    }

    #[test]
    fn test_chains_split() {
        let seq: TokenSequence = vec![
            Token::noun("A"),
            Token::noun("B"),
            Token::noun("C").in_chain(2),
        ]
        .into();
        let chains = seq.chains();
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].len(), 2);
        assert_eq!(chains[1][0].position, 2);
        assert!(TokenSequence::new().chains().is_empty());
    }
}
