use serde::Deserialize;

use crate::schema::errors::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchQueryInput {
    pub query: Option<String>
}

impl SearchQueryInput {
    pub fn new(query: &str) -> Self {
        Self { query: Some(query.to_string()) }
    }
}

/// A description filter. `None` means every transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery(Option<String>);

impl SearchQuery {
    pub fn all() -> Self {
        SearchQuery(None)
    }

    /// Blank text is treated the same as no filter.
    pub fn matching(text: &str) -> Self {
        let text = text.trim();

        if text.is_empty() {
            SearchQuery(None)
        } else {
            SearchQuery(Some(text.to_string()))
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_all(&self) -> bool {
        self.0.is_none()
    }
}

pub struct SearchQuerySchema;

impl SearchQuerySchema {
    pub fn validate(input: &SearchQueryInput) -> Result<SearchQuery, ValidationError> {
        Ok(input.query.as_deref().map(SearchQuery::matching).unwrap_or_default())
    }
}
