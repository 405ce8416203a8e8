//! Document-intrinsic ranking metrics.
//!
//! Neither metric looks at the query: they rank an already matched candidate set by recipe
//! structure (`simple`) or by how close its nutrition is to whole balanced servings (`healthy`).

use crate::recipe::{Nutrition, Recipe};

/// Nutrition of one balanced serving.
pub const REFERENCE_SERVING: Nutrition = Nutrition { calories: 510.0, fat: 150.0, protein: 18.0 };

const FAT_WEIGHT: f64 = 4.0;
const PROTEIN_WEIGHT: f64 = 2.0;

/// `ingredients * directions`, or `None` when either list has fewer than two entries.
pub fn simple_score(recipe: &Recipe) -> Option<u64> {
    let ingredients = recipe.ingredients.len() as u64;
    let directions = recipe.directions.len() as u64;
    if ingredients < 2 || directions < 2 {
        return None;
    }
    Some(ingredients * directions)
}

/// Smallest `n >= 1` with `value - per * n <= 0`.
fn servings_for(value: f64, per: f64) -> f64 {
    let mut n = (value / per).ceil().max(1.0);
    // Division rounding can put the ceiling one step off the exact comparison.
    if n > 1.0 && value - per * (n - 1.0) <= 0.0 {
        n -= 1.0;
    } else if value - per * n > 0.0 {
        n += 1.0;
    }
    n
}

/// Number of reference servings needed to cover every nutrient of `nutrition`.
pub fn max_servings(nutrition: &Nutrition) -> u64 {
    max_servings_f64(nutrition) as u64
}

fn max_servings_f64(nutrition: &Nutrition) -> f64 {
    let r = REFERENCE_SERVING;
    servings_for(nutrition.calories, r.calories)
        .max(servings_for(nutrition.fat, r.fat))
        .max(servings_for(nutrition.protein, r.protein))
}

/// Weighted distance between `nutrition` and `servings` reference servings.
pub fn serving_distance(nutrition: &Nutrition, servings: f64) -> f64 {
    let r = REFERENCE_SERVING;
    (nutrition.calories - r.calories * servings).abs() / r.calories
        + FAT_WEIGHT * (nutrition.fat - r.fat * servings).abs() / r.fat
        + PROTEIN_WEIGHT * (nutrition.protein - r.protein * servings).abs() / r.protein
}

/// Minimum [`serving_distance`] over `1..=max_servings`; lower is healthier.
///
/// Returns `None` when any nutrition value is unknown. The distance is convex in the serving
/// count with kinks at each nutrient's own ratio, so only the integers around those kinks and
/// the two range ends need evaluating.
pub fn healthy_score(recipe: &Recipe) -> Option<f64> {
    let nutrition = recipe.nutrition()?;
    let r = REFERENCE_SERVING;
    let max_n = max_servings_f64(&nutrition);
    let kinks = [
        nutrition.calories / r.calories,
        nutrition.fat / r.fat,
        nutrition.protein / r.protein,
    ];
    let mut candidates = vec![1.0, max_n];
    for k in kinks {
        candidates.push(k.floor());
        candidates.push(k.ceil());
    }
    candidates
        .into_iter()
        .map(|n| n.clamp(1.0, max_n))
        .map(|n| serving_distance(&nutrition, n))
        .min_by(f64::total_cmp)
}
