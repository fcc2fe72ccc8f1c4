//! Storefront collections and the static navigation lists around search.

use crate::query::{CategoryFilter, Query, SortOrder};
use crate::{Category, Color, Size};
use serde::Serialize;

/// A named landing page over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    /// Category restriction this collection applies; `None` for `all`.
    #[serde(skip)]
    pub filter: Option<CategoryFilter>,
}

pub static COLLECTIONS: [Collection; 5] = [
    Collection {
        id: "all",
        title: "All Products",
        description: "Shop our complete collection of With Jean products.",
        image: "https://ext.same-assets.com/3712905662/4138745921.jpeg",
        filter: None,
    },
    Collection {
        id: "new",
        title: "New Arrivals",
        description: "Shop our latest arrivals - fresh styles for the season.",
        image: "https://ext.same-assets.com/598493245/1231598346.jpeg",
        filter: Some(CategoryFilter::NewArrivals),
    },
    Collection {
        id: "tops",
        title: "Tops",
        description: "Shop our collection of tops, from casual to dressy styles.",
        image: "https://ext.same-assets.com/3712905662/4138745921.jpeg",
        filter: Some(CategoryFilter::Category(Category::Tops)),
    },
    Collection {
        id: "bottoms",
        title: "Bottoms",
        description: "Shop our collection of bottoms, from jeans to skirts.",
        image: "https://ext.same-assets.com/4275065108/2932829183.jpeg",
        filter: Some(CategoryFilter::Category(Category::Bottoms)),
    },
    Collection {
        id: "dresses",
        title: "Dresses",
        description: "Shop our collection of dresses for every occasion.",
        image: "https://ext.same-assets.com/2953662866/2211759542.jpeg",
        filter: Some(CategoryFilter::Category(Category::Dresses)),
    },
];

impl Collection {
    /// Look a collection up by id. Unknown ids fall back to `all`.
    pub fn lookup(id: &str) -> &'static Collection {
        COLLECTIONS.iter().find(|c| c.id.eq_ignore_ascii_case(id.trim())).unwrap_or(&COLLECTIONS[0])
    }

    /// A fresh query restricted to this collection.
    pub fn query(&self) -> Query {
        Query { category: self.filter, ..Query::default() }
    }
}

pub const POPULAR_SEARCHES: [&str; 6] = ["Dresses", "Tops", "Jeans", "Skirts", "New Arrivals", "Sale"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopularCategory {
    pub name: &'static str,
    pub collection: &'static str,
}

pub const POPULAR_CATEGORIES: [PopularCategory; 4] = [
    PopularCategory { name: "Dresses", collection: "dresses" },
    PopularCategory { name: "Tops", collection: "tops" },
    PopularCategory { name: "Bottoms", collection: "bottoms" },
    PopularCategory { name: "New Arrivals", collection: "new" },
];

/// Everything a filter panel offers.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<Category>,
    pub colors: Vec<Color>,
    pub sizes: Vec<Size>,
    pub sort_options: Vec<SortOption>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SortOption {
    pub key: SortOrder,
    pub label: &'static str,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            categories: Category::ALL.to_vec(),
            colors: Color::ALL.to_vec(),
            sizes: Size::ALL.to_vec(),
            sort_options: SortOrder::ALL.iter().map(|&key| SortOption { key, label: key.label() }).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_back_to_all() {
        assert_eq!(Collection::lookup("dresses").title, "Dresses");
        assert_eq!(Collection::lookup("NEW").filter, Some(CategoryFilter::NewArrivals));
        assert_eq!(Collection::lookup("sale").id, "all");
        assert_eq!(Collection::lookup("sale").filter, None);
    }

    #[test]
    fn popular_categories_resolve_to_collections() {
        for pc in POPULAR_CATEGORIES {
            assert_eq!(Collection::lookup(pc.collection).id, pc.collection);
        }
    }

    #[test]
    fn filter_options_list_sizes_in_order() {
        let opts = FilterOptions::default();
        assert_eq!(opts.sizes.first(), Some(&Size::Xxs));
        assert_eq!(opts.sizes.last(), Some(&Size::Xl));
        assert_eq!(opts.sort_options[1].label, "Price: Low to High");
    }
}
