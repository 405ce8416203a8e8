//! Keyword search over an in-memory recipe corpus.
//!
//! The corpus is indexed once with [`InvertedIndex::build`]; the resulting index is read-only
//! and answers boolean-AND queries under one of three [`RankOrder`]s.

pub mod corpus;
mod error;
pub mod index;
pub mod ranking;
pub mod recipe;
pub mod scorer;
pub mod search;
pub mod tokenizer;

pub type DocId = u32;

pub use error::Error;
pub use index::{build_index, IndexStats, InvertedIndex, Posting};
pub use recipe::{Nutrition, RawRecipe, Recipe};
pub use scorer::{score_document, FieldWeights, TermScores};
pub use search::{Hit, RankOrder};
