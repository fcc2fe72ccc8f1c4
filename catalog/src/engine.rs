use crate::suggest::{self, Suggestions};
use crate::text::{fold, fold_term};
use crate::{CatalogIndex, CategoryFilter, Product, Query, SortOrder};
use std::cmp::Reverse;
use std::sync::Arc;

/// Runs queries against a shared, read-only [`CatalogIndex`].
#[derive(Debug, Clone)]
pub struct QueryEngine {
    index: Arc<CatalogIndex>,
}

impl QueryEngine {
    pub fn new(index: Arc<CatalogIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Filter and sort the catalog.
    ///
    /// Text, category, color and size filters are ANDed together; colors and
    /// sizes each match if any listed value matches. Every sort is stable, so
    /// products with equal keys keep their canonical order.
    pub fn search(&self, query: &Query) -> Vec<&Product> {
        let needle = query.term.as_deref().and_then(fold_term);
        let mut hits: Vec<&Product> = self
            .index
            .text_matches(needle.as_deref())
            .filter(|p| matches_category(p, query.category))
            .filter(|p| query.colors.is_empty() || query.colors.contains(&p.color))
            .filter(|p| query.sizes.is_empty() || p.has_any_size(&query.sizes))
            .collect();

        match query.sort {
            SortOrder::Newest => {}
            SortOrder::PriceAsc => hits.sort_by_key(|p| p.price_cents),
            SortOrder::PriceDesc => hits.sort_by_key(|p| Reverse(p.price_cents)),
            SortOrder::AlphaAsc => hits.sort_by_cached_key(|p| fold(&p.name)),
            SortOrder::AlphaDesc => hits.sort_by_cached_key(|p| Reverse(fold(&p.name))),
        }

        tracing::debug!(term = ?query.term, sort = %query.sort, hits = hits.len(), "search");
        hits
    }

    /// Autocomplete suggestions for the text typed so far.
    pub fn suggest(&self, partial: &str) -> Suggestions<'_> {
        suggest::suggest(&self.index, partial)
    }
}

fn matches_category(product: &Product, filter: Option<CategoryFilter>) -> bool {
    match filter {
        None => true,
        Some(CategoryFilter::NewArrivals) => product.is_new,
        Some(CategoryFilter::Category(c)) => product.category == c,
    }
}
