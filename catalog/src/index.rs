use crate::text::fold;
use crate::{CatalogError, Product, ProductId, Result};
use std::collections::HashMap;

/// Case-folded copies of the searchable fields of one product.
#[derive(Debug, Clone)]
struct FoldedText {
    name: String,
    category: &'static str,
}

/// The authoritative, read-only product list.
///
/// Products keep the order they were given in; that order is the canonical
/// ("Newest") order and the tie-break for every other sort.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    products: Vec<Product>,
    positions: HashMap<ProductId, usize>,
    folded: Vec<FoldedText>,
}

impl CatalogIndex {
    /// Build an index, validating id uniqueness and non-empty size sets.
    pub fn from_products(products: Vec<Product>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(products.len());
        let mut folded = Vec::with_capacity(products.len());
        for (pos, p) in products.iter().enumerate() {
            if p.id.is_empty() {
                return Err(CatalogError::EmptyId(pos));
            }
            if p.sizes.is_empty() {
                return Err(CatalogError::EmptySizes(p.id.clone()));
            }
            if positions.insert(p.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(p.id.clone()));
            }
            folded.push(FoldedText { name: fold(&p.name), category: p.category.as_str() });
        }
        tracing::debug!(num_products = products.len(), "catalog index built");
        Ok(Self { products, positions, folded })
    }

    /// All products in canonical order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn by_id(&self, id: &str) -> Result<&Product> {
        self.positions
            .get(id)
            .and_then(|&pos| self.products.get(pos))
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose name or category contains the already-folded `needle`,
    /// in canonical order. `None` yields every product.
    pub fn text_matches<'a: 'n, 'n>(
        &'a self,
        needle: Option<&'n str>,
    ) -> impl Iterator<Item = &'a Product> + 'n {
        self.products
            .iter()
            .zip(self.folded.iter())
            .filter(move |(_, f)| match needle {
                Some(n) => f.name.contains(n) || f.category.contains(n),
                None => true,
            })
            .map(|(p, _)| p)
    }
}
