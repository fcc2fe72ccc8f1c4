//! Loading product records from JSON / JSONL into a [`CatalogIndex`].

use crate::money::parse_price;
use crate::{CatalogError, CatalogIndex, Category, Color, Product, Result, Size};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BUILTIN_CATALOG: &str = include_str!("../data/products.json");

/// A product as written in a catalog file. Prices may be integer cents or a
/// decimal string such as `"$139.00"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "priceCents", skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub category: Category,
    pub color: Color,
    pub sizes: Vec<Size>,
    #[serde(default, alias = "isNew")]
    pub is_new: bool,
    #[serde(default, alias = "imageRef")]
    pub image: String,
}

impl TryFrom<ProductRecord> for Product {
    type Error = CatalogError;

    fn try_from(r: ProductRecord) -> Result<Self> {
        let price_cents = match (r.price_cents, r.price.as_deref()) {
            (Some(cents), _) => cents,
            (None, Some(raw)) => parse_price(raw)?,
            (None, None) => return Err(CatalogError::MissingPrice(r.id)),
        };
        Ok(Product {
            id: r.id,
            name: r.name,
            price_cents,
            category: r.category,
            color: r.color,
            sizes: r.sizes.into_iter().collect(),
            is_new: r.is_new,
            image: r.image,
        })
    }
}

impl CatalogIndex {
    /// Validate records and build an index in record order.
    pub fn from_records(records: Vec<ProductRecord>) -> Result<Self> {
        let products = records.into_iter().map(Product::try_from).collect::<Result<Vec<_>>>()?;
        CatalogIndex::from_products(products)
    }

    /// The seed catalog of the storefront, newest first.
    pub fn builtin() -> Result<Self> {
        CatalogIndex::from_records(parse_json(BUILTIN_CATALOG)?)
    }
}

/// Load a catalog from a `.json`/`.jsonl` file or a directory of them.
///
/// Directories are walked recursively in file-name order; products keep the
/// order they are read in.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogIndex> {
    let path = path.as_ref();
    let mut records = Vec::new();
    for file in catalog_files(path)? {
        let before = records.len();
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut records)?;
        } else {
            records.extend(parse_json(&fs::read_to_string(&file)?)?);
        }
        tracing::debug!(file = %file.display(), products = records.len() - before, "read catalog file");
    }
    let index = CatalogIndex::from_records(records)?;
    tracing::info!(path = %path.display(), num_products = index.len(), "catalog loaded");
    Ok(index)
}

fn catalog_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        // a missing file surfaces as an Io error when it is opened
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        match p.extension().and_then(|s| s.to_str()) {
            Some("json" | "jsonl") => files.push(p.to_path_buf()),
            _ => tracing::warn!(file = %p.display(), "skipping non-catalog file"),
        }
    }
    Ok(files)
}

/// A JSON document holding either one record or an array of records.
fn parse_json(text: &str) -> Result<Vec<ProductRecord>> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    match json {
        serde_json::Value::Array(arr) => {
            arr.into_iter().map(|v| serde_json::from_value(v).map_err(CatalogError::from)).collect()
        }
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

fn read_jsonl(file: &Path, records: &mut Vec<ProductRecord>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_newest_first() {
        let idx = CatalogIndex::builtin().unwrap();
        assert_eq!(idx.len(), 8);
        let first = &idx.all()[0];
        assert_eq!(first.id, "kya-zip-through-chocolate");
        assert_eq!(first.price_cents, 13900);
        assert!(first.is_new);
        assert_eq!(idx.by_id("daisy-mini-dress-blue").unwrap().price_cents, 17900);
    }

    #[test]
    fn record_price_forms() {
        let json = r#"[
            {"id":"a","name":"A","price":"$12.50","category":"tops","color":"black","sizes":["S"]},
            {"id":"b","name":"B","price_cents":99,"category":"tops","color":"black","sizes":["M"],"isNew":true}
        ]"#;
        let idx = CatalogIndex::from_records(parse_json(json).unwrap()).unwrap();
        assert_eq!(idx.all()[0].price_cents, 1250);
        assert_eq!(idx.all()[1].price_cents, 99);
        assert!(idx.all()[1].is_new);
    }

    #[test]
    fn camel_case_records_load() {
        let json = r#"{"id":"a","name":"Kya Zip Through","priceCents":13900,"category":"tops","color":"brown","sizes":["S","M"],"isNew":true,"imageRef":"x"}"#;
        let idx = CatalogIndex::from_records(parse_json(json).unwrap()).unwrap();
        let p = idx.by_id("a").unwrap();
        assert_eq!(p.price_cents, 13900);
        assert!(p.is_new);
        assert_eq!(p.image, "x");
    }

    #[test]
    fn missing_or_bad_price_is_rejected() {
        let missing = r#"{"id":"a","name":"A","category":"tops","color":"black","sizes":["S"]}"#;
        let err = CatalogIndex::from_records(parse_json(missing).unwrap()).unwrap_err();
        assert!(matches!(&err, CatalogError::MissingPrice(id) if id == "a"));
        assert_eq!(err.to_string(), "product a has no price");

        let bad = r#"{"id":"a","name":"A","price":"cheap","category":"tops","color":"black","sizes":["S"]}"#;
        let err = CatalogIndex::from_records(parse_json(bad).unwrap()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPrice(p) if p == "cheap"));
    }

    #[test]
    fn unknown_enum_tokens_fail_to_parse() {
        let json = r#"{"id":"a","name":"A","price_cents":1,"category":"hats","color":"black","sizes":["S"]}"#;
        assert!(matches!(parse_json(json), Err(CatalogError::Json(_))));
    }
}
