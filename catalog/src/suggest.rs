use crate::text::fold_term;
use crate::{CatalogIndex, Product};
use serde::Serialize;

/// Maximum number of products offered while typing.
pub const SUGGESTION_LIMIT: usize = 6;

/// Autocomplete result. `active` is false while the input is too short to
/// search; an active result with no items is the "no results" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestions<'a> {
    pub active: bool,
    pub items: Vec<&'a Product>,
}

impl Suggestions<'_> {
    pub fn inactive() -> Self {
        Suggestions { active: false, items: Vec::new() }
    }
}

/// First [`SUGGESTION_LIMIT`] products, in canonical order, whose name or
/// category contains `partial`. Input of one character or less (after
/// trimming) is inactive.
pub fn suggest<'a>(index: &'a CatalogIndex, partial: &str) -> Suggestions<'a> {
    if partial.trim().chars().count() <= 1 {
        return Suggestions::inactive();
    }
    let Some(needle) = fold_term(partial) else {
        return Suggestions::inactive();
    };
    let items: Vec<&Product> = index.text_matches(Some(&needle)).take(SUGGESTION_LIMIT).collect();
    tracing::debug!(input = partial, items = items.len(), "suggest");
    Suggestions { active: true, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Color, Size};

    fn catalog(n: usize) -> CatalogIndex {
        let products = (0..n)
            .map(|i| Product {
                id: format!("p{i}"),
                name: format!("Tee {i} | Chocolate"),
                price_cents: 100,
                category: Category::Tops,
                color: Color::Brown,
                sizes: [Size::M].into_iter().collect(),
                is_new: false,
                image: String::new(),
            })
            .collect();
        CatalogIndex::from_products(products).unwrap()
    }

    #[test]
    fn short_input_is_inactive() {
        let idx = catalog(3);
        assert_eq!(suggest(&idx, ""), Suggestions::inactive());
        assert_eq!(suggest(&idx, "a"), Suggestions::inactive());
        assert_eq!(suggest(&idx, "  t  "), Suggestions::inactive());
    }

    #[test]
    fn truncates_to_limit_in_canonical_order() {
        let idx = catalog(9);
        let s = suggest(&idx, "chocolate");
        assert!(s.active);
        let ids: Vec<&str> = s.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p0", "p1", "p2", "p3", "p4", "p5"]);
    }

    #[test]
    fn active_with_no_matches() {
        let idx = catalog(2);
        let s = suggest(&idx, "zz");
        assert!(s.active);
        assert!(s.items.is_empty());
    }
}
