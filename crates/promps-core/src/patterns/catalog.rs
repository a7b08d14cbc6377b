//! Pattern catalogs: the built-in set and external JSON files

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::{PatternBlock, PatternTemplate};
use crate::error::{CoreError, Result};
use crate::types::{Article, BlockType, Locale, Particle, Verb};

static BUILTIN_JA: Lazy<PatternCatalog> = Lazy::new(|| PatternCatalog {
    templates: builtin_templates(Locale::Ja),
});

static BUILTIN_EN: Lazy<PatternCatalog> = Lazy::new(|| PatternCatalog {
    templates: builtin_templates(Locale::En),
});

/// Read-only, ordered set of pattern templates
///
/// Declaration order is the tie-break order for equal match scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PatternCatalog {
    templates: Vec<PatternTemplate>,
}

impl PatternCatalog {
    /// Create a catalog, rejecting empty catalogs, empty templates and
    /// duplicate ids
    pub fn new(templates: Vec<PatternTemplate>) -> Result<Self> {
        if templates.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for template in &templates {
            if template.is_empty() {
                return Err(CoreError::EmptyPattern(template.id.clone()));
            }
            if !seen.insert(template.id.as_str()) {
                return Err(CoreError::DuplicatePattern(template.id.clone()));
            }
        }

        Ok(Self { templates })
    }

    /// Built-in catalog with display text in the given locale
    ///
    /// Structural fields are identical across locales.
    pub fn builtin(locale: Locale) -> &'static PatternCatalog {
        match locale {
            Locale::Ja => &*BUILTIN_JA,
            Locale::En => &*BUILTIN_EN,
        }
    }

    /// Parse a catalog from a JSON array of templates
    pub fn from_json(json: &str) -> Result<Self> {
        let templates: Vec<PatternTemplate> = serde_json::from_str(json)?;
        Self::new(templates)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        log::info!(
            "Loaded {} pattern templates from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn templates(&self) -> &[PatternTemplate] {
        &self.templates
    }

    /// Look up a template by id
    pub fn get(&self, id: &str) -> Option<&PatternTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn builtin_templates(locale: Locale) -> Vec<PatternTemplate> {
    let t = |ja: &str, en: &str| -> String {
        match locale {
            Locale::Ja => ja.to_string(),
            Locale::En => en.to_string(),
        }
    };

    let noun = |ja: &str, en: &str| PatternBlock::placeholder(BlockType::Noun, t(ja, en));
    let verb = |v: Verb| PatternBlock::placeholder(BlockType::Verb(v), t("動詞", "Verb"));
    let particle = |p: Particle| PatternBlock::fixed(BlockType::Particle(p), p.surface(Locale::Ja));
    let article = |a: Article| PatternBlock::fixed(BlockType::Article(a), a.surface());

    vec![
        PatternTemplate::new(
            "sov_basic",
            t("基本文型（主語-目的語-動詞）", "Basic sentence (subject-object-verb)"),
            t("「誰が何をどうする」の基本形", "Who does what: the basic form"),
            t("名詞 が 名詞 を 動詞", "Noun が Noun を Verb"),
            t("ユーザー が ドキュメント を 分析して", "User が Document を analyze"),
            vec![
                noun("主語", "Subject"),
                particle(Particle::Ga),
                noun("目的語", "Object"),
                particle(Particle::Wo),
                verb(Verb::Analyze),
            ],
        ),
        PatternTemplate::new(
            "ov_simple",
            t("目的語-動詞文型", "Object-verb sentence"),
            t("「何をどうする」のシンプル形", "What to do: the short form"),
            t("名詞 を 動詞", "Noun を Verb"),
            t("ドキュメント を 要約して", "Document を summarize"),
            vec![
                noun("目的語", "Object"),
                particle(Particle::Wo),
                verb(Verb::Summarize),
            ],
        ),
        PatternTemplate::new(
            "topic_about",
            t("トピック文型（について）", "Topic sentence (について)"),
            t("「〇〇について」でトピックを指定", "Name a topic with について"),
            t("名詞 について 動詞", "Noun について Verb"),
            t("データ について 分析して", "Data について analyze"),
            vec![
                noun("トピック", "Topic"),
                PatternBlock::with_value(BlockType::Other, "について", "について"),
                verb(Verb::Analyze),
            ],
        ),
        PatternTemplate::new(
            "means_de",
            t("手段・場所文型（で）", "Means or place (で)"),
            t("「〇〇で」で手段や場所を指定", "Name a means or place with で"),
            t("名詞 で 名詞 を 動詞", "Noun で Noun を Verb"),
            t("日本語 で メール を 翻訳して", "Japanese で Email を translate"),
            vec![
                noun("手段/場所", "Means/Place"),
                particle(Particle::De),
                noun("目的語", "Object"),
                particle(Particle::Wo),
                verb(Verb::Translate),
            ],
        ),
        PatternTemplate::new(
            "parallel_to",
            t("並列文型（と）", "Parallel objects (と)"),
            t("「AとBを」で複数の対象を指定", "Name several targets with AとBを"),
            t("名詞 と 名詞 を 動詞", "Noun と Noun を Verb"),
            t("データ と 結果 を 保存して", "Data と Results を save"),
            vec![
                noun("対象1", "Target 1"),
                particle(Particle::To),
                noun("対象2", "Target 2"),
                particle(Particle::Wo),
                PatternBlock::with_value(
                    BlockType::CustomVerb,
                    t("動詞", "Verb"),
                    t("保存して", "save"),
                ),
            ],
        ),
        PatternTemplate::new(
            "source_dest",
            t("起点-終点文型（から...に）", "Source to destination (から...に)"),
            t("「どこからどこへ」の移動・変換", "Move or convert from one place to another"),
            t("名詞 から 名詞 に 動詞", "Noun から Noun に Verb"),
            t("英語 から 日本語 に 翻訳して", "English から Japanese に translate"),
            vec![
                noun("起点", "Source"),
                particle(Particle::Kara),
                noun("終点", "Destination"),
                particle(Particle::Ni),
                verb(Verb::Translate),
            ],
        ),
        PatternTemplate::new(
            "osv_emphasis",
            t("目的語先行文型（を...が）", "Object first (を...が)"),
            t("目的語を先に述べて強調する形", "Put the object first for emphasis"),
            t("名詞 を 名詞 が 動詞", "Noun を Noun が Verb"),
            t("ドキュメント を ユーザー が 分析して", "Document を User が analyze"),
            vec![
                noun("目的語", "Object"),
                particle(Particle::Wo),
                noun("主語", "Subject"),
                particle(Particle::Ga),
                verb(Verb::Analyze),
            ],
        ),
        PatternTemplate::new(
            "please_request",
            t("丁寧な依頼（please）", "Polite request (please)"),
            t("「please + 動詞 + the + 名詞」の依頼形", "Ask politely for an action on an object"),
            t("please 動詞 the 名詞", "please Verb the Noun"),
            t("please explain the code", "please explain the code"),
            vec![
                article(Article::Please),
                verb(Verb::Explain),
                article(Article::The),
                noun("目的語", "Object"),
            ],
        ),
        PatternTemplate::new(
            "imperative_object",
            t("命令文（動詞-目的語）", "Imperative (verb-object)"),
            t("動詞で始まる英語の命令形", "An English command starting with the verb"),
            t("動詞 the 名詞", "Verb the Noun"),
            t("summarize the report", "summarize the report"),
            vec![
                verb(Verb::Summarize),
                article(Article::The),
                noun("目的語", "Object"),
            ],
        ),
    ]
}
