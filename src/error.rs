use thiserror::Error;

use crate::model::SuggestionCategory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("{category} transform needs a non-empty title")]
    EmptyTitle { category: SuggestionCategory },

    #[error("{category} transform needs a story category to frame the discussion")]
    MissingCategory { category: SuggestionCategory },

    #[error("{category} transform found no sections to rewrite")]
    NoSections { category: SuggestionCategory },
}
