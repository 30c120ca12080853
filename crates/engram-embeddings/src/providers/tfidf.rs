//! Hashed TF-IDF provider.
//!
//! Memory texts are short third-person facts ("User's sister lives in
//! Lyon"), so terms are possessive-stripped and common function words are
//! dropped before hashing. No network, deterministic, always available.

use std::collections::HashMap;

use engram_core::errors::EngramResult;
use engram_core::traits::IEmbeddingProvider;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

const STOPWORDS: &[&str] = &[
    "an", "and", "are", "as", "at", "be", "by", "do", "does", "for", "from", "has", "have", "in",
    "is", "it", "of", "on", "or", "so", "the", "to", "was", "were", "with",
];

/// Local embedder: term frequencies hashed into a fixed number of buckets.
pub struct TfIdfEmbedder {
    dimensions: usize,
}

impl TfIdfEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn bucket(&self, term: &str) -> usize {
        let hash = term
            .bytes()
            .fold(FNV_OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME));
        (hash % self.dimensions as u64) as usize
    }

    fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '_'))
            .map(|raw| {
                let word = raw.trim_matches('\'').to_lowercase();
                word.strip_suffix("'s").map(str::to_string).unwrap_or(word)
            })
            .filter(|term| term.chars().count() >= 2 && !STOPWORDS.contains(&term.as_str()))
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        let mut total = 0u32;
        for term in Self::terms(text) {
            *counts.entry(term).or_default() += 1;
            total += 1;
        }

        let mut vector = vec![0.0f32; self.dimensions];
        for (term, count) in &counts {
            let tf = *count as f32 / total as f32;
            // Length stands in for rarity; there is no corpus to count over.
            let weight = 1.0 + (term.chars().count() as f32).ln();
            vector[self.bucket(term)] += tf * weight;
        }
        l2_normalize(&mut vector);
        vector
    }
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
}

impl IEmbeddingProvider for TfIdfEmbedder {
    fn embed(&self, text: &str) -> EngramResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> EngramResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "tfidf"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn empty_text_returns_zero_vector() {
        let p = TfIdfEmbedder::new(128);
        let v = p.embed("").unwrap();
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn output_is_normalized() {
        let p = TfIdfEmbedder::new(256);
        let v = p.embed("the user prefers green tea in the morning").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn deterministic() {
        let p = TfIdfEmbedder::new(256);
        assert_eq!(p.embed("lives in Lisbon").unwrap(), p.embed("lives in Lisbon").unwrap());
    }

    #[test]
    fn batch_matches_individual() {
        let p = TfIdfEmbedder::new(128);
        let texts = vec!["likes hiking".to_string(), "owns a cat".to_string()];
        let batch = p.embed_batch(&texts).unwrap();
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(batch[i], p.embed(text).unwrap());
        }
    }

    #[test]
    fn related_facts_score_higher() {
        let p = TfIdfEmbedder::new(256);
        let a = p.embed("user likes green tea").unwrap();
        let b = p.embed("user likes black tea").unwrap();
        let c = p.embed("flight to Osaka on Friday").unwrap();
        assert!(dot(&a, &b) > dot(&a, &c));
    }

    #[test]
    fn possessives_and_stopwords_are_ignored() {
        let p = TfIdfEmbedder::new(256);
        assert_eq!(
            p.embed("User's sister lives in Lyon").unwrap(),
            p.embed("the user sister lives Lyon").unwrap()
        );
        assert!(p.embed("the and of").unwrap().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn zero_dimensions_is_clamped() {
        assert_eq!(TfIdfEmbedder::new(0).dimensions(), 1);
    }
}
