use anyhow::Result;
use catalog::collections::Collection;
use catalog::money::format_price;
use catalog::persist::load_catalog;
use catalog::{CatalogIndex, Product, Query, QueryEngine};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Query a storefront product catalog", long_about = None)]
struct Cli {
    /// Catalog file or directory (JSON/JSONL). Uses the built-in catalog when omitted.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort the catalog
    Search(SearchArgs),
    /// Autocomplete suggestions for partially typed text
    Suggest {
        /// Text typed so far
        #[arg(default_value = "")]
        text: String,
    },
    /// Show one product by id
    Show {
        id: String,
    },
    /// Load and validate the catalog, then print a summary
    Validate,
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text term matched against name and category
    #[arg(long, short)]
    q: Option<String>,
    /// Category, or `new` for new arrivals
    #[arg(long)]
    category: Option<String>,
    /// Collection id (all, new, tops, bottoms, dresses); overrides --category
    #[arg(long)]
    collection: Option<String>,
    /// Comma-separated colors
    #[arg(long)]
    color: Option<String>,
    /// Comma-separated sizes
    #[arg(long)]
    size: Option<String>,
    /// newest, price-asc, price-desc, alpha-asc, alpha-desc
    #[arg(long)]
    sort: Option<String>,
}

#[derive(Serialize)]
struct Row<'a> {
    id: &'a str,
    name: &'a str,
    price: String,
    category: &'static str,
    color: &'static str,
    is_new: bool,
}

impl<'a> From<&'a Product> for Row<'a> {
    fn from(p: &'a Product) -> Self {
        Row {
            id: &p.id,
            name: &p.name,
            price: format_price(p.price_cents),
            category: p.category.as_str(),
            color: p.color.as_str(),
            is_new: p.is_new,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let index = match &cli.catalog {
        Some(path) => load_catalog(path)?,
        None => CatalogIndex::builtin()?,
    };
    let engine = QueryEngine::new(Arc::new(index));

    match cli.command {
        Commands::Search(args) => run_search(&engine, &args),
        Commands::Suggest { text } => {
            let suggestions = engine.suggest(&text);
            let rows: Vec<Row<'_>> = suggestions.items.into_iter().map(Row::from).collect();
            print_json(&serde_json::json!({ "active": suggestions.active, "items": rows }))
        }
        Commands::Show { id } => print_json(engine.index().by_id(&id)?),
        Commands::Validate => {
            let index = engine.index();
            let new_arrivals = index.all().iter().filter(|p| p.is_new).count();
            tracing::info!(num_products = index.len(), new_arrivals, "catalog valid");
            print_json(&serde_json::json!({ "products": index.len(), "new_arrivals": new_arrivals }))
        }
    }
}

fn run_search(engine: &QueryEngine, args: &SearchArgs) -> Result<()> {
    let query = search_query(args)?;
    let rows: Vec<Row<'_>> = engine.search(&query).into_iter().map(Row::from).collect();
    print_json(&serde_json::json!({ "query": query, "total_hits": rows.len(), "results": rows }))
}

/// `--collection` wins over `--category` when both are given.
fn search_query(args: &SearchArgs) -> Result<Query> {
    let mut query = Query::from_params(
        args.q.as_deref(),
        args.category.as_deref(),
        args.color.as_deref(),
        args.size.as_deref(),
        args.sort.as_deref(),
    )?;
    if let Some(id) = &args.collection {
        query.category = Collection::lookup(id).filter;
    }
    Ok(query)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Category, CategoryFilter};

    #[test]
    fn parses_search_flags() {
        let cli = Cli::try_parse_from(["catalog", "search", "-q", "dress", "--size", "S,M", "--sort", "price-asc"]).unwrap();
        assert!(cli.catalog.is_none());
        let Commands::Search(args) = cli.command else { panic!("expected search") };
        assert_eq!(args.q.as_deref(), Some("dress"));
        assert_eq!(args.size.as_deref(), Some("S,M"));
    }

    #[test]
    fn catalog_flag_is_global() {
        let cli = Cli::try_parse_from(["catalog", "show", "tammy-tee-white", "--catalog", "data"]).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("data")));
        assert!(matches!(cli.command, Commands::Show { id } if id == "tammy-tee-white"));
    }

    fn search_args(argv: &[&str]) -> SearchArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        let Commands::Search(args) = cli.command else { panic!("expected search") };
        args
    }

    #[test]
    fn collection_overrides_category() {
        let args = search_args(&["catalog", "search", "--category", "tops", "--collection", "new", "--sort", "alpha-asc"]);
        let query = search_query(&args).unwrap();
        assert_eq!(query.category, Some(CategoryFilter::NewArrivals));

        let engine = QueryEngine::new(Arc::new(CatalogIndex::builtin().unwrap()));
        let ids: Vec<&str> = engine.search(&query).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["king-jorts-black", "kya-track-pant-chocolate", "kya-zip-through-chocolate", "tammy-tee-white"]);
    }

    #[test]
    fn category_applies_without_collection() {
        let args = search_args(&["catalog", "search", "--category", "dresses", "--color", "blue"]);
        let query = search_query(&args).unwrap();
        assert_eq!(query.category, Some(CategoryFilter::Category(Category::Dresses)));
        assert!(search_query(&search_args(&["catalog", "search", "--color", "red"])).is_err());
    }

    #[test]
    fn rows_format_prices() {
        let index = CatalogIndex::builtin().unwrap();
        let row = Row::from(index.by_id("stella-dress-white").unwrap());
        assert_eq!(row.price, "$189.00");
        assert_eq!(row.category, "dresses");
    }
}
