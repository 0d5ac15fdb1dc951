//! Filter Specification
//!
//! Ephemeral, client-held query parameters describing which items to
//! retrieve and how to order them. Not persisted.

use serde::{Deserialize, Serialize};

use super::item::{ItemKind, ItemStatus};

/// Which item stream to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Lost,
    Found,
}

impl KindFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            KindFilter::All => "all",
            KindFilter::Lost => "lost",
            KindFilter::Found => "found",
        }
    }
}

impl From<ItemKind> for KindFilter {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Lost => KindFilter::Lost,
            ItemKind::Found => KindFilter::Found,
        }
    }
}

/// Status dimension of the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ItemStatus),
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

/// Result ordering by `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }
}

/// Committed query state for one item listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ItemFilter {
    pub kind: KindFilter,
    pub status: StatusFilter,
    /// Free-text substring query, matched remotely against at least
    /// title and description
    pub search: String,
    pub sort: SortOrder,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ItemFilter {
    pub fn for_kind(kind: KindFilter) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Search text with surrounding whitespace stripped
    pub fn search_trimmed(&self) -> &str {
        self.search.trim()
    }

    /// Encode as outgoing query parameters.
    ///
    /// Fields that equal their no-op default (`status=all`, blank search,
    /// `sort=newest`) are omitted to keep requests minimal; `type` is
    /// always sent, `page`/`limit` only when set.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("type", self.kind.as_str().to_string())];
        if let StatusFilter::Only(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        let search = self.search_trimmed();
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }
        if self.sort != SortOrder::Newest {
            params.push(("sort", self.sort.as_str().to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.page_size {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_filter_sends_only_type() {
        let filter = ItemFilter::default();
        assert_eq!(filter.query_params(), vec![("type", "all".to_string())]);
    }

    #[test]
    fn test_non_default_fields_are_sent() {
        let filter = ItemFilter {
            kind: KindFilter::Lost,
            status: StatusFilter::Only(ItemStatus::Claimed),
            search: "  wallet  ".to_string(),
            sort: SortOrder::Oldest,
            page: Some(2),
            page_size: Some(10),
        };
        assert_eq!(
            filter.query_params(),
            vec![
                ("type", "lost".to_string()),
                ("status", "diclaim".to_string()),
                ("search", "wallet".to_string()),
                ("sort", "oldest".to_string()),
                ("page", "2".to_string()),
                ("limit", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_omitted() {
        let filter = ItemFilter {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.query_params(), vec![("type", "all".to_string())]);
    }
}
