//! Flavor vocabulary built from past notes, for suggesting words while writing.
//!
//! Terms come from the free-text aroma or flavor field, counted across notes and
//! sorted into categories by substring patterns.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::notes::NoteRecord;

/// Id of the catch-all category for terms no pattern matches.
pub const OTHER_CATEGORY: &str = "other";

/// Terms shorter than this (in characters) are dropped.
const MIN_TERM_CHARS: usize = 2;

const SEPARATORS: &[char] = &['、', '。', ',', '，', '/', '・'];

/// Which note field to build a vocabulary from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyField {
    Aroma,
    Flavor,
}

impl VocabularyField {
    fn text<'a>(&self, note: &'a NoteRecord) -> Option<&'a str> {
        match self {
            Self::Aroma => note.aroma.as_deref(),
            Self::Flavor => note.flavor.as_deref(),
        }
    }
}

impl FromStr for VocabularyField {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aroma" => Ok(Self::Aroma),
            "flavor" => Ok(Self::Flavor),
            other => Err(VocabularyError::UnknownField(other.to_string())),
        }
    }
}

/// How to recognize a category: any `match` pattern contained in the term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub id: String,
    pub label: String,
    #[serde(default, rename = "match")]
    pub patterns: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryFile {
    categories: Vec<CategoryRule>,
}

/// A term and how often it appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub term: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub term: String,
    pub count: usize,
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    /// Most frequent first.
    pub keywords: Vec<KeywordCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyMetadata {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    /// Distinct terms.
    pub total_terms: usize,
    pub total_occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub metadata: VocabularyMetadata,
    pub categories: Vec<Category>,
    /// Every term, most frequent first.
    pub vocabulary: Vec<Keyword>,
}

impl Vocabulary {
    /// Up to `count` distinct keywords picked at random.
    pub fn random_keywords<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<&Keyword> {
        let mut pool: Vec<&Keyword> = self.vocabulary.iter().collect();
        let (picked, _) = pool.partial_shuffle(rng, count);
        picked.to_vec()
    }

    /// The first `max` keywords of a category. Empty for unknown ids.
    pub fn category_keywords(&self, id: &str, max: usize) -> &[KeywordCount] {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| &c.keywords[..c.keywords.len().min(max)])
            .unwrap_or(&[])
    }

    /// Categories that have at least one keyword.
    pub fn available_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| !c.keywords.is_empty())
    }
}

/// Splits free text into terms on Japanese and ASCII punctuation and whitespace.
/// Text is NFKC-normalized first, so half-width and full-width forms count as one term.
pub fn tokenize(text: &str) -> Vec<String> {
    let text: String = text.nfkc().collect();
    let terms = text
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|t| t.chars().count() >= MIN_TERM_CHARS)
        .map(str::to_string)
        .collect();
    terms
}

/// Counts terms of `field` across `notes`. Most frequent first; ties keep first-seen order.
pub fn count_terms(notes: &[NoteRecord], field: VocabularyField) -> Vec<KeywordCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();
    for text in notes.iter().filter_map(|n| field.text(n)) {
        for term in tokenize(text) {
            match index.get(&term) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(term.clone(), counts.len());
                    counts.push(KeywordCount { term, count: 1 });
                }
            }
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Sorts counted terms into categories. Each term goes to the first rule (in order) with a
/// matching pattern, otherwise to [`OTHER_CATEGORY`].
pub fn build_vocabulary(counts: &[KeywordCount], rules: &[CategoryRule], source: &str) -> Vocabulary {
    let mut categories: Vec<Category> = rules
        .iter()
        .map(|r| Category {
            id: r.id.clone(),
            label: r.label.clone(),
            keywords: Vec::new(),
        })
        .collect();
    if !categories.iter().any(|c| c.id == OTHER_CATEGORY) {
        categories.push(Category {
            id: OTHER_CATEGORY.to_string(),
            label: "その他".to_string(),
            keywords: Vec::new(),
        });
    }

    let mut vocabulary = Vec::with_capacity(counts.len());
    for kc in counts {
        let category_id = assign_category(&kc.term, rules);
        if let Some(category) = categories.iter_mut().find(|c| c.id == category_id) {
            category.keywords.push(kc.clone());
        }
        vocabulary.push(Keyword {
            term: kc.term.clone(),
            count: kc.count,
            category_id: category_id.to_string(),
        });
    }
    for category in &mut categories {
        category.keywords.sort_by(|a, b| b.count.cmp(&a.count));
    }
    categories.retain(|c| !c.keywords.is_empty() || c.id == OTHER_CATEGORY);

    debug!(terms = counts.len(), categories = categories.len(), "built vocabulary");
    Vocabulary {
        metadata: VocabularyMetadata {
            source: source.to_string(),
            generated_at: Utc::now(),
            total_terms: counts.len(),
            total_occurrences: counts.iter().map(|k| k.count).sum(),
        },
        categories,
        vocabulary,
    }
}

fn assign_category<'a>(term: &str, rules: &'a [CategoryRule]) -> &'a str {
    rules
        .iter()
        .filter(|r| r.id != OTHER_CATEGORY && !r.patterns.is_empty())
        .find(|r| r.patterns.iter().any(|p| term.contains(p.as_str())))
        .map(|r| r.id.as_str())
        .unwrap_or(OTHER_CATEGORY)
}

/// Reads category rules from a TOML file with a `[[categories]]` table per rule.
pub fn load_categories(path: &Path) -> Result<Vec<CategoryRule>, VocabularyError> {
    let raw = std::fs::read_to_string(path).map_err(|e| VocabularyError::Read(path.to_path_buf(), e))?;
    let file: CategoryFile =
        toml::from_str(&raw).map_err(|e| VocabularyError::Categories(path.to_path_buf(), e))?;
    Ok(file.categories)
}

/// Writes `vocabulary` as pretty JSON.
pub fn save_vocabulary(vocabulary: &Vocabulary, path: &Path) -> Result<(), VocabularyError> {
    let s = serde_json::to_string_pretty(vocabulary).map_err(VocabularyError::Serialize)?;
    std::fs::write(path, s).map_err(|e| VocabularyError::Write(path.to_path_buf(), e))
}

/// Built-in category rules for whisky tasting terms.
pub fn default_categories() -> Vec<CategoryRule> {
    let rule = |id: &str, label: &str, patterns: &[&str]| CategoryRule {
        id: id.to_string(),
        label: label.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    };
    vec![
        rule("fruity", "フルーティー", &["果", "ベリー", "オレンジ", "レモン", "りんご", "リンゴ", "洋梨", "桃", "ぶどう", "レーズン", "fruit", "apple", "pear", "citrus", "orange", "berry"]),
        rule("floral", "フローラル", &["花", "フローラル", "ヘザー", "floral", "heather", "rose"]),
        rule("sweet", "甘い", &["蜂蜜", "ハチミツ", "はちみつ", "バニラ", "キャラメル", "チョコ", "甘", "honey", "vanilla", "caramel", "toffee", "chocolate"]),
        rule("spicy", "スパイシー", &["スパイス", "胡椒", "シナモン", "ジンジャー", "spice", "pepper", "cinnamon", "ginger", "clove"]),
        rule("woody", "ウッディ", &["樽", "オーク", "木", "ウッディ", "oak", "wood", "cedar"]),
        rule("smoky", "スモーキー", &["スモーク", "煙", "ピート", "燻", "ヨード", "smoke", "peat", "iodine", "ash"]),
        rule("cereal", "穀物", &["麦", "モルト", "パン", "穀", "malt", "cereal", "bread", "biscuit"]),
    ]
}

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("unknown vocabulary field {0:?} (expected aroma or flavor)")]
    UnknownField(String),
    #[error("read error for {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("invalid category file {0}: {1}")]
    Categories(PathBuf, toml::de::Error),
    #[error("failed to serialize vocabulary: {0}")]
    Serialize(serde_json::Error),
    #[error("write error for {0}: {1}")]
    Write(PathBuf, std::io::Error),
}
