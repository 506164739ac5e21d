//! 類似度計算と最良一致の選択
//!
//! Problema ベクトルから転置インデックス（語 → (Problema番号, 重み)）を作り、
//! Fato Gerador ベクトルとのコサイン類似度を疎に計算する。
//! ベクトルはL2正規化済みなので、コサイン類似度は内積に等しい。

use crate::error::{Error, Result};
use crate::tfidf::SparseVector;
use crate::types::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 最良一致
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    /// Problema のインデックス
    pub index: usize,
    /// 類似度 [0, 1]
    pub score: f64,
}

/// 2ベクトルのコサイン類似度（どちらかがゼロベクトルなら0）
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        0.0
    } else {
        (a.dot(b) / denom).clamp(0.0, 1.0)
    }
}

/// Problema ベクトルの転置インデックス
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    postings: HashMap<usize, Vec<(usize, f64)>>,
    len: usize,
}

impl SimilarityIndex {
    /// Problema ベクトル群からインデックスを構築（空ならエラー）
    pub fn new(problems: &[SparseVector]) -> Result<Self> {
        if problems.is_empty() {
            return Err(Error::EmptyDataset(Dataset::Problems));
        }

        let mut postings: HashMap<usize, Vec<(usize, f64)>> = HashMap::new();
        for (p, vector) in problems.iter().enumerate() {
            for (term, weight) in vector.iter() {
                postings.entry(term).or_default().push((p, weight));
            }
        }

        Ok(Self {
            postings,
            len: problems.len(),
        })
    }

    /// Problema の件数
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// クエリと全 Problema の類似度（類似度行列の1行）
    ///
    /// 語番号の昇順に加算するので、同じ入力なら結果はビット単位で一致する。
    pub fn scores(&self, query: &SparseVector) -> Vec<f64> {
        let mut scores = vec![0.0; self.len];
        for (term, q) in query.iter() {
            if let Some(list) = self.postings.get(&term) {
                for &(p, w) in list {
                    scores[p] += q * w;
                }
            }
        }
        scores
    }

    /// 最も類似度の高い Problema を選ぶ
    ///
    /// 同点の場合はインデックスが小さい方。語の重なりがなくても
    /// インデックス0（類似度0）を返す。
    pub fn best_match(&self, query: &SparseVector) -> BestMatch {
        let scores = self.scores(query);
        let mut best = BestMatch { index: 0, score: scores[0] };

        for (index, &score) in scores.iter().enumerate().skip(1) {
            if score > best.score {
                best = BestMatch { index, score };
            }
        }

        best.score = best.score.clamp(0.0, 1.0);
        best
    }

    /// 複数クエリの最良一致をまとめて計算
    pub fn best_matches(&self, queries: &[SparseVector]) -> Vec<BestMatch> {
        queries.iter().map(|q| self.best_match(q)).collect()
    }
}
