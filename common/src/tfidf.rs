//! TF-IDF 語彙モデルとベクトル化
//!
//! ## トークン化
//! 小文字化したテキストから `\b\w\w+\b`（Unicode単語文字2文字以上）を抽出する。
//! fit と transform で同じ規則を使う。
//!
//! ## 重み
//! 平滑化IDF: `idf(t) = ln((1 + N) / (1 + df(t))) + 1`
//! 文書ベクトルは `tf × idf` をL2正規化したもの。

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// テキストをトークンに分割
pub fn tokenize(text: &str) -> Vec<String> {
    lazy_static::lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(r"\b\w\w+\b").unwrap();
    }

    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// 疎ベクトル（インデックス昇順）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// (インデックス, 値) の組を昇順で返す
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// 非ゼロ要素数
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// 内積（両方ともインデックス昇順なのでマージで計算）
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// 語彙（語 → IDF重み）
///
/// 一度 fit したら変更しない。語の並びは辞書順で、ベクトルの次元に対応する。
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: usize,
}

impl Vocabulary {
    /// コーパスから語彙を構築
    ///
    /// 使える語が1つもなければ `EmptyVocabulary`。
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Result<Self> {
        let mut df: BTreeMap<String, usize> = BTreeMap::new();

        for doc in corpus {
            let unique: BTreeSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        if df.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let n = corpus.len() as f64;
        let mut terms = Vec::with_capacity(df.len());
        let mut idf = Vec::with_capacity(df.len());
        let mut index = HashMap::with_capacity(df.len());

        for (i, (term, count)) in df.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + count as f64)).ln() + 1.0);
            index.insert(term.clone(), i);
            terms.push(term);
        }

        Ok(Self {
            terms,
            index,
            idf,
            documents: corpus.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// fit に使った文書数
    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// 語のIDF重み（語彙外なら None）
    pub fn weight(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|i| self.idf[i])
    }

    /// テキストをL2正規化済みTF-IDFベクトルに変換
    ///
    /// 語彙外の語は無視する。語彙の語を含まないテキストはゼロベクトル。
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(i) = self.term_index(&token) {
                *counts.entry(i).or_insert(0.0) += 1.0;
            }
        }

        let (indices, mut values): (Vec<usize>, Vec<f64>) = counts
            .into_iter()
            .map(|(i, tf)| (i, tf * self.idf[i]))
            .unzip();

        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut values {
                *v /= norm;
            }
        }

        SparseVector { indices, values }
    }

    /// 複数テキストをまとめて変換
    pub fn transform_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<SparseVector> {
        texts.iter().map(|t| self.transform(t.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_short_tokens() {
        assert_eq!(
            tokenize("Atraso. Entrega. Pedido X"),
            vec!["atraso", "entrega", "pedido"]
        );
    }

    #[test]
    fn test_tokenize_unicode_words() {
        assert_eq!(tokenize("Cobrança INDEVIDA, x"), vec!["cobrança", "indevida"]);
        assert_eq!(tokenize("140 - excluded"), vec!["140", "excluded"]);
    }

    #[test]
    fn test_fit_orders_terms_and_weights_rare_terms_higher() {
        let vocab = Vocabulary::fit(&["billing error", "delivery error", "error"]).unwrap();
        assert_eq!(vocab.terms(), &["billing", "delivery", "error"]);
        assert_eq!(vocab.documents(), 3);

        // N=3: error df=3 → ln(4/4)+1 = 1, billing df=1 → ln(4/2)+1
        assert!((vocab.weight("error").unwrap() - 1.0).abs() < 1e-12);
        assert!((vocab.weight("billing").unwrap() - (2.0f64.ln() + 1.0)).abs() < 1e-12);
        assert!(vocab.weight("billing").unwrap() > vocab.weight("error").unwrap());
        assert_eq!(vocab.weight("unknown"), None);
    }

    #[test]
    fn test_fit_empty_corpus_fails() {
        let empty: [&str; 0] = [];
        assert!(matches!(Vocabulary::fit(&empty), Err(Error::EmptyVocabulary)));
        assert!(matches!(Vocabulary::fit(&["", "a. b. c"]), Err(Error::EmptyVocabulary)));
    }

    #[test]
    fn test_transform_is_unit_length() {
        let vocab = Vocabulary::fit(&["billing error", "delivery delay"]).unwrap();
        let v = vocab.transform("billing billing error");
        assert_eq!(v.nnz(), 2);
        assert!((v.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_out_of_vocabulary_is_zero_vector() {
        let vocab = Vocabulary::fit(&["billing error"]).unwrap();
        let v = vocab.transform("nothing known here");
        assert!(v.is_zero());
        assert_eq!(v.norm(), 0.0);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let vocab = Vocabulary::fit(&["atraso na entrega", "erro de cobrança", "entrega parcial"]).unwrap();
        let a = vocab.transform("Atraso. Entrega. Pedido X");
        let b = vocab.transform("Atraso. Entrega. Pedido X");
        assert_eq!(a.indices(), b.indices());
        let bits_a: Vec<u64> = a.values().iter().map(|v| v.to_bits()).collect();
        let bits_b: Vec<u64> = b.values().iter().map(|v| v.to_bits()).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn test_dot_of_sparse_vectors() {
        let vocab = Vocabulary::fit(&["aa bb", "bb cc"]).unwrap();
        let a = vocab.transform("aa bb");
        let b = vocab.transform("cc dd");
        assert!((a.dot(&a) - 1.0).abs() < 1e-12);
        assert_eq!(a.dot(&b), 0.0);
        assert_eq!(a.dot(&SparseVector::default()), 0.0);
    }
}
