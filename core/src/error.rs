/// Errors returned by the query interface.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested ranking strategy does not exist.
    #[error("invalid ordering {0:?}: expected relevance, simple or healthy")]
    InvalidOrdering(String),
}
