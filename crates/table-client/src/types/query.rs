//! List query parameters.

use serde::{Deserialize, Serialize};

/// Sort direction for a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A single sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Parameters for listing records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Formula the store evaluates per record; only truthy records are returned.
    pub filter_by_formula: Option<String>,

    /// Sort keys, most significant first.
    pub sort: Vec<SortSpec>,

    /// Maximum records per page (the store caps this at 100).
    pub page_size: Option<u32>,

    /// Continuation token from the previous page.
    pub offset: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ascending sort key.
    pub fn sort_asc(mut self, field: impl Into<String>) -> Self {
        self.sort.push(SortSpec {
            field: field.into(),
            direction: SortDirection::Asc,
        });
        self
    }

    /// Add a descending sort key.
    pub fn sort_desc(mut self, field: impl Into<String>) -> Self {
        self.sort.push(SortSpec {
            field: field.into(),
            direction: SortDirection::Desc,
        });
        self
    }

    /// Set the filter formula.
    pub fn filter(mut self, formula: impl Into<String>) -> Self {
        self.filter_by_formula = Some(formula.into());
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Copy of this query continuing at the given offset.
    pub fn at_offset(&self, offset: Option<String>) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    /// Render as URL query pairs, using the store's bracketed sort syntax.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        for (i, spec) in self.sort.iter().enumerate() {
            pairs.push((format!("sort[{}][field]", i), spec.field.clone()));
            pairs.push((
                format!("sort[{}][direction]", i),
                spec.direction.as_str().to_string(),
            ));
        }

        if let Some(formula) = &self.filter_by_formula {
            pairs.push(("filterByFormula".to_string(), formula.clone()));
        }

        if let Some(size) = self.page_size {
            pairs.push(("pageSize".to_string(), size.to_string()));
        }

        if let Some(offset) = &self.offset {
            pairs.push(("offset".to_string(), offset.clone()));
        }

        pairs
    }
}
