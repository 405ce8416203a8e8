//! Query evaluation: AND-intersection of posting lists, then one of three rankings.

use crate::index::InvertedIndex;
use crate::ranking::{healthy_score, simple_score};
use crate::recipe::Recipe;
use crate::tokenizer::tokenize_set;
use crate::{DocId, Error};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Ranking strategy applied to the matched candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankOrder {
    /// Sum of field-weighted query-term scores plus rating, highest first.
    #[default]
    Relevance,
    /// Ingredient count times direction count, highest first.
    Simple,
    /// Distance to whole balanced servings, lowest first.
    Healthy,
}

impl RankOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankOrder::Relevance => "relevance",
            RankOrder::Simple => "simple",
            RankOrder::Healthy => "healthy",
        }
    }
}

impl fmt::Display for RankOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" | "normal" => Ok(RankOrder::Relevance),
            "simple" => Ok(RankOrder::Simple),
            "healthy" => Ok(RankOrder::Healthy),
            _ => Err(Error::InvalidOrdering(s.to_string())),
        }
    }
}

/// A ranked match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<'a> {
    pub doc_id: DocId,
    pub score: f64,
    pub recipe: &'a Recipe,
}

impl InvertedIndex {
    /// Documents containing every term, in ascending `doc_id` order, each with the sum of its
    /// term scores. No terms means no candidates.
    pub fn candidates<S: AsRef<str>>(&self, terms: &[S]) -> Vec<(DocId, u64)> {
        let mut lists: Vec<_> = terms.iter().map(|t| self.postings(t.as_ref())).collect();
        lists.sort_by_key(|l| l.len());
        let Some((shortest, rest)) = lists.split_first() else {
            return Vec::new();
        };
        shortest
            .iter()
            .filter_map(|p| {
                let mut total = p.score;
                for list in rest {
                    let i = list.binary_search_by_key(&p.doc_id, |q| q.doc_id).ok()?;
                    total = total.saturating_add(list[i].score);
                }
                Some((p.doc_id, total))
            })
            .collect()
    }

    /// Every match for `query`, ranked by `order`. Ties keep ascending `doc_id` order.
    pub fn rank(&self, query: &str, order: RankOrder) -> Vec<Hit<'_>> {
        let start = Instant::now();
        let terms: Vec<String> = tokenize_set(query).into_iter().collect();
        let candidates = self.candidates(&terms);
        let num_candidates = candidates.len();

        let mut hits: Vec<Hit<'_>> = candidates
            .into_iter()
            .filter_map(|(doc_id, term_total)| {
                let recipe = self.doc(doc_id)?;
                let score = match order {
                    RankOrder::Relevance => term_total as f64 + recipe.rating,
                    RankOrder::Simple => simple_score(recipe)? as f64,
                    RankOrder::Healthy => healthy_score(recipe)?,
                };
                Some(Hit { doc_id, score, recipe })
            })
            .collect();

        // Stable sorts over doc_id-ordered input keep ties deterministic.
        match order {
            RankOrder::Relevance | RankOrder::Simple => {
                hits.sort_by(|a, b| b.score.total_cmp(&a.score))
            }
            RankOrder::Healthy => hits.sort_by(|a, b| a.score.total_cmp(&b.score)),
        }

        tracing::debug!(
            terms = terms.len(),
            candidates = num_candidates,
            hits = hits.len(),
            %order,
            took_us = start.elapsed().as_micros() as u64,
            "ranked query"
        );
        hits
    }

    /// The best `count` matches for `query` under `order`.
    pub fn search_ranked(&self, query: &str, order: RankOrder, count: usize) -> Vec<Hit<'_>> {
        let mut hits = self.rank(query, order);
        hits.truncate(count);
        hits
    }

    /// Like [`InvertedIndex::search_ranked`], with the ordering given by name
    /// (`relevance`/`normal`, `simple`, `healthy`).
    pub fn search(&self, query: &str, ordering: &str, count: usize) -> Result<Vec<Hit<'_>>, Error> {
        let order: RankOrder = ordering.parse()?;
        Ok(self.search_ranked(query, order, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use crate::scorer::FieldWeights;

    fn recipe(title: &str, ingredients: &[&str], directions: &[&str], rating: f64) -> Recipe {
        let mut r = Recipe::titled(title);
        r.ingredients = ingredients.iter().map(|s| s.to_string()).collect();
        r.directions = directions.iter().map(|s| s.to_string()).collect();
        r.rating = rating;
        r
    }

    fn titles(hits: &[Hit<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.recipe.title.clone()).collect()
    }

    #[test]
    fn parses_orderings() {
        assert_eq!("normal".parse::<RankOrder>().unwrap(), RankOrder::Relevance);
        assert_eq!("relevance".parse::<RankOrder>().unwrap(), RankOrder::Relevance);
        assert_eq!("healthy".parse::<RankOrder>().unwrap(), RankOrder::Healthy);
        assert_eq!("simple".parse::<RankOrder>().unwrap(), RankOrder::Simple);
        for other in ["h", "S", "N", "r", " Healthy ", "SIMPLE", ""] {
            assert_eq!(other.parse::<RankOrder>(), Err(Error::InvalidOrdering(other.into())));
        }
        assert_eq!(
            "tastiest".parse::<RankOrder>(),
            Err(Error::InvalidOrdering("tastiest".into()))
        );
    }

    #[test]
    fn candidates_require_every_term() {
        let index = build_index(vec![
            recipe("Tomato Soup", &["tomato"], &[], 0.0),
            recipe("Tomato Salad", &["tomato", "basil"], &[], 0.0),
            recipe("Basil Pesto", &["basil"], &[], 0.0),
        ]);
        assert_eq!(index.candidates(&["tomato", "basil"]), vec![(1, 8 + 2 + 2)]);
        assert_eq!(index.candidates(&["tomato"]), vec![(0, 10), (1, 10)]);
        assert!(index.candidates(&["tomato", "missing"]).is_empty());
        assert!(index.candidates::<&str>(&[]).is_empty());
    }

    #[test]
    fn candidate_totals_do_not_overflow() {
        let heavy = FieldWeights { title: u32::MAX, categories: 4, ingredients: 2, directions: 1 };
        let index = InvertedIndex::build_with_weights(
            vec![recipe("Lemon Lemon Tart Tart", &[], &[], 0.0)],
            &heavy,
        );
        let expected = 4 * u64::from(u32::MAX);
        assert_eq!(index.candidates(&["lemon", "tart"]), vec![(0, expected)]);
        let hits = index.search_ranked("lemon tart", RankOrder::Relevance, 1);
        assert_eq!(hits[0].score, expected as f64);
    }

    #[test]
    fn relevance_adds_rating() {
        let index = build_index(vec![
            recipe("Plain Rice", &["rice"], &[], 1.0),
            recipe("Fried Rice", &["rice"], &[], 4.5),
        ]);
        let hits = index.search_ranked("rice", RankOrder::Relevance, 10);
        assert_eq!(titles(&hits), vec!["Fried Rice", "Plain Rice"]);
        assert_eq!(hits[0].score, 10.0 + 4.5);
    }

    #[test]
    fn ties_break_by_doc_id() {
        let index = build_index(vec![
            recipe("Bean Stew", &[], &[], 0.0),
            recipe("Bean Dip", &[], &[], 0.0),
            recipe("Bean Chili", &[], &[], 0.0),
        ]);
        let hits = index.search_ranked("Bean", RankOrder::Relevance, 10);
        let ids: Vec<_> = hits.iter().map(|h| h.doc_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn simple_filters_and_sorts_descending() {
        let index = build_index(vec![
            recipe("Cake One", &["egg"], &["bake", "cool"], 0.0),
            recipe("Cake Two", &["egg", "milk"], &["mix", "bake"], 0.0),
            recipe("Cake Three", &["egg", "milk", "flour"], &["mix", "bake"], 0.0),
        ]);
        let hits = index.search_ranked("cake", RankOrder::Simple, 10);
        assert_eq!(titles(&hits), vec!["Cake Three", "Cake Two"]);
        assert_eq!(hits[0].score, 6.0);
    }

    #[test]
    fn healthy_filters_unknown_and_sorts_ascending() {
        let mut far = recipe("Stew Far", &[], &[], 0.0);
        far.calories = Some(100.0);
        far.fat = Some(5.0);
        far.protein = Some(2.0);
        let mut exact = recipe("Stew Exact", &[], &[], 0.0);
        exact.calories = Some(510.0);
        exact.fat = Some(150.0);
        exact.protein = Some(18.0);
        let unknown = recipe("Stew Unknown", &[], &[], 0.0);
        let index = build_index(vec![far, unknown, exact]);
        let hits = index.search_ranked("stew", RankOrder::Healthy, 10);
        assert_eq!(titles(&hits), vec!["Stew Exact", "Stew Far"]);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn truncates_to_count() {
        let index = build_index(vec![
            recipe("Pasta One", &[], &[], 0.0),
            recipe("Pasta Two", &[], &[], 0.0),
            recipe("Pasta Three", &[], &[], 0.0),
        ]);
        assert_eq!(index.search_ranked("pasta", RankOrder::Relevance, 2).len(), 2);
        assert_eq!(index.search_ranked("pasta", RankOrder::Relevance, 100).len(), 3);
        assert!(index.search_ranked("pasta", RankOrder::Relevance, 0).is_empty());
    }

    #[test]
    fn invalid_ordering_is_an_error() {
        let index = build_index(vec![recipe("Pasta", &[], &[], 0.0)]);
        assert!(matches!(index.search("pasta", "random", 5), Err(Error::InvalidOrdering(_))));
        assert!(matches!(index.search("pasta", "h", 5), Err(Error::InvalidOrdering(_))));
        assert!(matches!(index.search("pasta", "Normal", 5), Err(Error::InvalidOrdering(_))));
    }

    #[test]
    fn query_without_terms_matches_nothing() {
        let index = build_index(vec![recipe("Pie", &[], &[], 0.0)]);
        assert!(index.search_ranked("a 12 !!", RankOrder::Relevance, 5).is_empty());
    }
}
