use serde::{Deserialize, Serialize};

/// A recipe as it arrives from the corpus. Every field but the title may be missing or `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecipe {
    pub title: String,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub directions: Option<Vec<String>>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// An indexed recipe with ingestion defaults already applied.
///
/// Nutrition values are `None` when unknown. A negative value is also treated as unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub title: String,
    pub categories: Vec<String>,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    pub calories: Option<f64>,
    pub fat: Option<f64>,
    pub protein: Option<f64>,
    pub rating: f64,
}

/// Calories, fat and protein of a recipe whose nutrition is fully known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutrition {
    pub calories: f64,
    pub fat: f64,
    pub protein: f64,
}

impl From<RawRecipe> for Recipe {
    fn from(raw: RawRecipe) -> Self {
        Self {
            title: raw.title,
            categories: raw.categories.unwrap_or_default(),
            ingredients: raw.ingredients.unwrap_or_default(),
            directions: raw.directions.unwrap_or_default(),
            calories: raw.calories,
            fat: raw.fat,
            protein: raw.protein,
            rating: raw.rating.unwrap_or(0.0),
        }
    }
}

impl Recipe {
    /// A recipe with only a title, everything else defaulted.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            categories: Vec::new(),
            ingredients: Vec::new(),
            directions: Vec::new(),
            calories: None,
            fat: None,
            protein: None,
            rating: 0.0,
        }
    }

    /// All three nutrition values, or `None` if any of them is unknown.
    pub fn nutrition(&self) -> Option<Nutrition> {
        let known = |v: Option<f64>| v.filter(|x| *x >= 0.0);
        Some(Nutrition {
            calories: known(self.calories)?,
            fat: known(self.fat)?,
            protein: known(self.protein)?,
        })
    }
}
