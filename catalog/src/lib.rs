//! Storefront catalog engine: an immutable product index with filter, sort,
//! free-text search and autocomplete suggestions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub mod collections;
pub mod engine;
pub mod error;
pub mod index;
pub mod money;
pub mod persist;
pub mod query;
pub mod suggest;
pub mod text;

pub use engine::QueryEngine;
pub use error::{CatalogError, Result};
pub use index::CatalogIndex;
pub use query::{CategoryFilter, Query, SortOrder};
pub use suggest::{Suggestions, SUGGESTION_LIMIT};

pub type ProductId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tops,
    Bottoms,
    Dresses,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Tops, Category::Bottoms, Category::Dresses];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Dresses => "dresses",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
    Brown,
    Beige,
    Blue,
}

impl Color {
    pub const ALL: [Color; 5] = [Color::Black, Color::White, Color::Brown, Color::Beige, Color::Blue];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Brown => "brown",
            Color::Beige => "beige",
            Color::Blue => "blue",
        }
    }
}

/// Garment size. Declaration order is the size order, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Xxs,
    Xs,
    S,
    M,
    L,
    Xl,
}

impl Size {
    pub const ALL: [Size; 6] = [Size::Xxs, Size::Xs, Size::S, Size::M, Size::L, Size::Xl];

    pub fn as_str(self) -> &'static str {
        match self {
            Size::Xxs => "XXS",
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
        }
    }
}

macro_rules! token_enum_impls {
    ($ty:ident, $kind:literal) => {
        impl FromStr for $ty {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self> {
                let s = s.trim();
                $ty::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| CatalogError::InvalidQuery(format!("unknown {}: {s:?}", $kind)))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

token_enum_impls!(Category, "category");
token_enum_impls!(Color, "color");
token_enum_impls!(Size, "size");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price_cents: u64,
    pub category: Category,
    pub color: Color,
    /// Never empty once the product is part of a [`CatalogIndex`].
    pub sizes: BTreeSet<Size>,
    pub is_new: bool,
    /// Opaque image reference (URL or asset key).
    pub image: String,
}

impl Product {
    pub fn has_any_size(&self, wanted: &BTreeSet<Size>) -> bool {
        self.sizes.iter().any(|s| wanted.contains(s))
    }
}
