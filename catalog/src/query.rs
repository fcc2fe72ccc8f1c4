use crate::{Category, CatalogError, Color, Result, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Category restriction of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    Category(Category),
    /// Products flagged `is_new`, whatever their category.
    NewArrivals,
}

impl CategoryFilter {
    /// Parse a collection-style token. `all` (or blank) means no filter.
    pub fn parse_optional(raw: &str) -> Result<Option<Self>> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        raw.parse().map(Some)
    }
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("new") || s.eq_ignore_ascii_case("new-arrivals") {
            return Ok(CategoryFilter::NewArrivals);
        }
        s.parse().map(CategoryFilter::Category)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::Category(c) => f.write_str(c.as_str()),
            CategoryFilter::NewArrivals => f.write_str("new-arrivals"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Canonical catalog order.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    AlphaAsc,
    AlphaDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] =
        [SortOrder::Newest, SortOrder::PriceAsc, SortOrder::PriceDesc, SortOrder::AlphaAsc, SortOrder::AlphaDesc];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::AlphaAsc => "alpha-asc",
            SortOrder::AlphaDesc => "alpha-desc",
        }
    }

    /// The label shown in the storefront's sort dropdown.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::PriceAsc => "Price: Low to High",
            SortOrder::PriceDesc => "Price: High to Low",
            SortOrder::AlphaAsc => "Alphabetical: A-Z",
            SortOrder::AlphaDesc => "Alphabetical: Z-A",
        }
    }
}

impl FromStr for SortOrder {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        SortOrder::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s) || o.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::InvalidQuery(format!("unknown sort: {s:?}")))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search/filter request. Built fresh per interaction and never mutated by
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub term: Option<String>,
    pub category: Option<CategoryFilter>,
    pub colors: BTreeSet<Color>,
    pub sizes: BTreeSet<Size>,
    pub sort: SortOrder,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = Some(category);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.colors.insert(color);
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.sizes.insert(size);
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Build a query from the loose textual parameters a URL or command line
    /// carries. Color and size lists are comma separated; blank parts are
    /// ignored and unknown tokens are rejected.
    pub fn from_params(
        term: Option<&str>,
        category: Option<&str>,
        colors: Option<&str>,
        sizes: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self> {
        Ok(Query {
            term: term.map(str::to_string),
            category: category.map(CategoryFilter::parse_optional).transpose()?.flatten(),
            colors: parse_list(colors)?,
            sizes: parse_list(sizes)?,
            sort: sort.filter(|s| !s.trim().is_empty()).map(str::parse::<SortOrder>).transpose()?.unwrap_or_default(),
        })
    }
}

fn parse_list<T>(raw: Option<&str>) -> Result<BTreeSet<T>>
where
    T: FromStr<Err = CatalogError> + Ord,
{
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<T>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_tokens() {
        assert_eq!(CategoryFilter::parse_optional("all").unwrap(), None);
        assert_eq!(CategoryFilter::parse_optional("").unwrap(), None);
        assert_eq!(CategoryFilter::parse_optional("new").unwrap(), Some(CategoryFilter::NewArrivals));
        assert_eq!(CategoryFilter::parse_optional("New-Arrivals").unwrap(), Some(CategoryFilter::NewArrivals));
        assert_eq!(
            CategoryFilter::parse_optional("Dresses").unwrap(),
            Some(CategoryFilter::Category(Category::Dresses))
        );
        assert!(CategoryFilter::parse_optional("hats").is_err());
    }

    #[test]
    fn parses_sort_keys_and_labels() {
        assert_eq!("price-desc".parse::<SortOrder>().unwrap(), SortOrder::PriceDesc);
        assert_eq!("Alphabetical: Z-A".parse::<SortOrder>().unwrap(), SortOrder::AlphaDesc);
        assert!("cheapest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn from_params_builds_sets() {
        let q = Query::from_params(Some("tee"), Some("tops"), Some("white, black,"), Some("S,m"), None).unwrap();
        assert_eq!(q.term.as_deref(), Some("tee"));
        assert_eq!(q.category, Some(CategoryFilter::Category(Category::Tops)));
        assert_eq!(q.colors, BTreeSet::from([Color::Black, Color::White]));
        assert_eq!(q.sizes, BTreeSet::from([Size::S, Size::M]));
        assert_eq!(q.sort, SortOrder::Newest);
    }

    #[test]
    fn from_params_rejects_unknown_tokens() {
        let err = Query::from_params(None, None, Some("red"), None, None).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidQuery(msg) if msg.contains("red")));
        assert!(Query::from_params(None, None, None, Some("XXL"), None).is_err());
        assert!(Query::from_params(None, None, None, None, Some("random")).is_err());
    }

    #[test]
    fn serializes_as_plain_json() {
        let q = Query::new().term("dress").category(CategoryFilter::NewArrivals).color(Color::Blue).sort(SortOrder::PriceAsc);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["category"], "new-arrivals");
        assert_eq!(json["sort"], "price-asc");
        assert_eq!(json["colors"][0], "blue");
        let tops = serde_json::to_value(Query::new().category(CategoryFilter::Category(Category::Tops))).unwrap();
        assert_eq!(tops["category"], "tops");
        let back: Query = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
        let empty: Query = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Query::new());
    }
}
