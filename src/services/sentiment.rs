//! 情感极性分析
//!
//! 输出 [-1, 1] 的连续极性分数。内置后端是一个词典打分器：对句子中出现的
//! 情感词取平均，前置的程度副词会放大或减弱分数，否定词会把分数反转并减半。

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::error::Result;

pub trait SentimentClassifier: Send + Sync {
    /// 计算极性分数
    fn polarity(&self, text: &str) -> Result<f64>;

    /// 后端名称
    fn name(&self) -> &str;
}

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)*|[.,;!?]").expect("valid token regex"));

/// 情感词与极性
///
/// 压力类词汇（tired、overwhelmed、anxious 等）刻意不在表中：它们的句子应落在
/// 中性区间，由心情映射的关键词规则区分 stressed 与 neutral。
const POLARITY_LEXICON: &[(&str, f64)] = &[
    // positive
    ("happy", 0.8),
    ("happier", 0.8),
    ("glad", 0.5),
    ("joy", 0.8),
    ("joyful", 0.8),
    ("excited", 0.375),
    ("exciting", 0.3),
    ("great", 0.8),
    ("good", 0.7),
    ("better", 0.5),
    ("best", 1.0),
    ("nice", 0.6),
    ("fine", 0.4167),
    ("love", 0.5),
    ("lovely", 0.5),
    ("loved", 0.7),
    ("wonderful", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("fantastic", 0.4),
    ("excellent", 1.0),
    ("beautiful", 0.85),
    ("fun", 0.3),
    ("proud", 0.8),
    ("calm", 0.3),
    ("relaxed", 0.3),
    ("peaceful", 0.25),
    ("cheerful", 0.6),
    ("grateful", 0.6),
    ("thankful", 0.5),
    ("hopeful", 0.5),
    ("lucky", 0.3333),
    ("positive", 0.2273),
    ("perfect", 1.0),
    ("brilliant", 0.9),
    ("delighted", 0.7),
    ("pleased", 0.5),
    ("content", 0.3),
    ("energized", 0.4),
    ("motivated", 0.4),
    // negative
    ("sad", -0.5),
    ("sadder", -0.5),
    ("unhappy", -0.6),
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("miserable", -1.0),
    ("depressed", -0.4),
    ("depressing", -0.5),
    ("lonely", -0.3),
    ("alone", -0.25),
    ("angry", -0.5),
    ("upset", -0.5),
    ("hate", -0.8),
    ("hurt", -0.4),
    ("painful", -0.7),
    ("afraid", -0.6),
    ("scared", -0.5),
    ("sick", -0.7143),
    ("broken", -0.4),
    ("disappointed", -0.75),
    ("frustrated", -0.7),
    ("annoyed", -0.4),
    ("boring", -1.0),
    ("bored", -0.5),
    ("poor", -0.4),
    ("hopeless", -0.8),
    ("stupid", -0.8),
    ("useless", -0.5),
    ("crying", -0.5),
    ("heartbroken", -0.8),
    ("down", -0.1556),
    ("hard", -0.2917),
];

/// 程度副词及其倍率
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("so", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("super", 1.5),
    ("absolutely", 1.5),
    ("totally", 1.3),
    ("too", 1.2),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("somewhat", 0.8),
    ("slightly", 0.7),
    ("barely", 0.5),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "cannot", "nothing", "nobody", "neither", "nor"];

/// 否定后分数的倍率
const NEGATION_FACTOR: f64 = -0.5;

/// 词典打分器
#[derive(Debug, Clone)]
pub struct LexiconSentimentClassifier {
    lexicon: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl Default for LexiconSentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentimentClassifier {
    pub fn new() -> Self {
        Self {
            lexicon: POLARITY_LEXICON
                .iter()
                .map(|(w, p)| (w.to_string(), *p))
                .collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(w, m)| (w.to_string(), *m))
                .collect(),
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// 增加或覆盖一个情感词
    pub fn add_term(&mut self, word: &str, polarity: f64) {
        self.lexicon
            .insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
    }

    fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token) || token.ends_with("n't")
    }

    /// 同步计算，内部使用
    pub fn score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut scores = Vec::new();
        let mut multiplier = 1.0;
        let mut negated = false;

        for token in TOKEN_RE.find_iter(&lowered).map(|m| m.as_str()) {
            if token.len() == 1 && ".,;!?".contains(token) {
                multiplier = 1.0;
                negated = false;
                continue;
            }

            if self.is_negation(token) {
                negated = true;
                continue;
            }

            if let Some(m) = self.intensifiers.get(token) {
                multiplier *= m;
                continue;
            }

            if let Some(polarity) = self.lexicon.get(token) {
                let mut score = polarity * multiplier;
                if negated {
                    score *= NEGATION_FACTOR;
                }
                scores.push(score.clamp(-1.0, 1.0));
                multiplier = 1.0;
                negated = false;
            }
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl SentimentClassifier for LexiconSentimentClassifier {
    fn polarity(&self, text: &str) -> Result<f64> {
        Ok(self.score(text))
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

pub fn create_sentiment_classifier() -> Box<dyn SentimentClassifier> {
    Box::new(LexiconSentimentClassifier::new())
}
