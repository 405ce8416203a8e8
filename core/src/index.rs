use crate::recipe::Recipe;
use crate::scorer::{score_document, FieldWeights};
use crate::DocId;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub score: u64, // field-weighted term score
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub num_docs: usize,
    pub num_terms: usize,
    pub num_postings: usize,
}

/// Immutable inverted index over a recipe corpus.
///
/// The index owns the recipes; a posting refers to its recipe by `doc_id`, which is the
/// recipe's position in corpus order. Nothing mutates the index after [`InvertedIndex::build`],
/// so a shared reference can serve any number of concurrent queries.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<Posting>>, // postings sorted by doc_id
    docs: Vec<Recipe>,
}

impl InvertedIndex {
    pub fn build(recipes: Vec<Recipe>) -> Self {
        Self::build_with_weights(recipes, &FieldWeights::default())
    }

    pub fn build_with_weights(recipes: Vec<Recipe>, weights: &FieldWeights) -> Self {
        let start = Instant::now();
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        for (doc_id, recipe) in recipes.iter().enumerate() {
            let doc_id = doc_id as DocId;
            for (term, score) in score_document(recipe, weights) {
                // Documents are visited in id order, so each list stays sorted.
                postings.entry(term).or_default().push(Posting { doc_id, score });
            }
        }
        let index = Self { postings, docs: recipes };
        let stats = index.stats();
        tracing::info!(
            num_docs = stats.num_docs,
            num_terms = stats.num_terms,
            num_postings = stats.num_postings,
            took_ms = start.elapsed().as_millis() as u64,
            "index build complete"
        );
        index
    }

    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    pub fn num_postings(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_docs: self.num_docs(),
            num_terms: self.num_terms(),
            num_postings: self.num_postings(),
        }
    }

    pub fn doc(&self, doc_id: DocId) -> Option<&Recipe> {
        self.docs.get(doc_id as usize)
    }

    pub fn docs(&self) -> &[Recipe] {
        &self.docs
    }

    /// Postings for a normalized term, sorted by `doc_id`. Empty when the term is not indexed.
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Score of `term` in `doc_id`, if the document contains the term.
    pub fn term_score(&self, term: &str, doc_id: DocId) -> Option<u64> {
        let list = self.postings(term);
        list.binary_search_by_key(&doc_id, |p| p.doc_id)
            .ok()
            .map(|i| list[i].score)
    }
}

pub fn build_index(recipes: Vec<Recipe>) -> InvertedIndex {
    InvertedIndex::build(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn corpus() -> Vec<Recipe> {
        let mut pie = Recipe::titled("Apple Pie");
        pie.ingredients = vec!["apple".into(), "sugar".into()];
        pie.directions = vec!["mix".into(), "bake".into()];
        let mut crumble = Recipe::titled("Crumble");
        crumble.ingredients = vec!["apple".into(), "oats".into()];
        crumble.categories = vec!["Dessert".into()];
        vec![pie, crumble]
    }

    #[test]
    fn indexes_every_term_of_every_field() {
        let index = build_index(corpus());
        assert_eq!(index.num_docs(), 2);
        assert_eq!(
            index.postings("apple"),
            &[Posting { doc_id: 0, score: 10 }, Posting { doc_id: 1, score: 2 }]
        );
        assert_eq!(index.postings("dessert"), &[Posting { doc_id: 1, score: 4 }]);
        assert!(index.postings("banana").is_empty());
    }

    #[test]
    fn every_posting_points_at_a_containing_document() {
        let index = build_index(corpus());
        for (term, list) in &index.postings {
            for p in list {
                let r = index.doc(p.doc_id).unwrap();
                let text = format!(
                    "{} {} {} {}",
                    r.title,
                    r.categories.join(" "),
                    r.ingredients.join(" "),
                    r.directions.join(" ")
                );
                assert!(tokenize(&text).contains(term));
                assert!(p.score >= 1);
            }
        }
    }

    #[test]
    fn term_score_lookup() {
        let index = build_index(corpus());
        assert_eq!(index.term_score("apple", 1), Some(2));
        assert_eq!(index.term_score("sugar", 1), None);
        assert_eq!(index.term_score("nothing", 0), None);
    }

    #[test]
    fn stats_count_postings() {
        let stats = build_index(corpus()).stats();
        // apple pie sugar mix bake crumble oats dessert
        assert_eq!(stats, IndexStats { num_docs: 2, num_terms: 8, num_postings: 9 });
    }

    #[test]
    fn empty_corpus() {
        let index = build_index(Vec::new());
        assert_eq!(index.stats(), IndexStats { num_docs: 0, num_terms: 0, num_postings: 0 });
    }
}
