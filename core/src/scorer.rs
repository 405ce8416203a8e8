use crate::recipe::Recipe;
use crate::tokenizer::tokenize;
use std::collections::HashMap;

/// Term → field-weighted importance within one recipe.
pub type TermScores = HashMap<String, u64>;

/// Per-occurrence weight of a term in each recipe field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldWeights {
    pub title: u32,
    pub categories: u32,
    pub ingredients: u32,
    pub directions: u32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self { title: 8, categories: 4, ingredients: 2, directions: 1 }
    }
}

/// Score every distinct term of a recipe.
///
/// Each occurrence adds the weight of the field it occurs in, so a term found twice in the
/// title and once in the directions scores `2 * title + directions`.
pub fn score_document(recipe: &Recipe, weights: &FieldWeights) -> TermScores {
    let mut scores = TermScores::new();
    let fields: [(String, u32); 4] = [
        (recipe.title.clone(), weights.title),
        (recipe.categories.join(" "), weights.categories),
        (recipe.ingredients.join(" "), weights.ingredients),
        (recipe.directions.join(" "), weights.directions),
    ];
    for (text, weight) in fields.iter() {
        for term in tokenize(text) {
            let score = scores.entry(term).or_insert(0);
            *score = score.saturating_add(u64::from(*weight));
        }
    }
    scores
}
