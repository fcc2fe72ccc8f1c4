use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use catalog::collections::{Collection, FilterOptions, PopularCategory, POPULAR_CATEGORIES, POPULAR_SEARCHES};
use catalog::money::format_price;
use catalog::persist::load_catalog;
use catalog::{CatalogError, CatalogIndex, Category, Color, Product, QueryEngine, Size};
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
    /// Comma-separated colors.
    pub color: Option<String>,
    /// Comma-separated sizes.
    pub size: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: catalog::Query,
    pub total_hits: usize,
    pub results: Vec<ProductView>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub active: bool,
    pub items: Vec<ProductView>,
}

#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub collection: &'static Collection,
    pub total_hits: usize,
    pub results: Vec<ProductView>,
}

#[derive(Debug, Serialize)]
pub struct PopularResponse {
    pub searches: Vec<&'static str>,
    pub categories: Vec<PopularCategory>,
}

/// Product as rendered to clients: integer cents plus a display price.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price_cents: u64,
    pub price: String,
    pub category: Category,
    pub color: Color,
    pub sizes: Vec<Size>,
    pub is_new: bool,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(p: &Product) -> Self {
        ProductView {
            id: p.id.clone(),
            name: p.name.clone(),
            price_cents: p.price_cents,
            price: format_price(p.price_cents),
            category: p.category,
            color: p.color,
            sizes: p.sizes.iter().copied().collect(),
            is_new: p.is_new,
            image: p.image.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub engine: QueryEngine,
}

/// Load the catalog (or the built-in one) and build the router around it.
pub fn build_app(catalog_path: Option<&FsPath>) -> Result<Router> {
    let index = match catalog_path {
        Some(path) => load_catalog(path)?,
        None => {
            let index = CatalogIndex::builtin()?;
            tracing::info!(num_products = index.len(), "using built-in catalog");
            index
        }
    };
    Ok(router(QueryEngine::new(Arc::new(index))))
}

pub fn router(engine: QueryEngine) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/suggest", get(suggest_handler))
        .route("/products/:id", get(product_handler))
        .route("/collections/:id", get(collection_handler))
        .route("/filters", get(filters_handler))
        .route("/popular", get(popular_handler))
        .with_state(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let query = catalog::Query::from_params(
        params.q.as_deref(),
        params.category.as_deref(),
        params.color.as_deref(),
        params.size.as_deref(),
        params.sort.as_deref(),
    )
    .map_err(error_response)?;
    let results: Vec<ProductView> = state.engine.search(&query).into_iter().map(ProductView::from).collect();
    Ok(Json(SearchResponse { query, total_hits: results.len(), results }))
}

pub async fn suggest_handler(State(state): State<AppState>, Query(params): Query<SuggestParams>) -> Json<SuggestResponse> {
    let suggestions = state.engine.suggest(&params.q);
    Json(SuggestResponse {
        active: suggestions.active,
        items: suggestions.items.into_iter().map(ProductView::from).collect(),
    })
}

pub async fn product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>, (StatusCode, String)> {
    let product = state.engine.index().by_id(&id).map_err(error_response)?;
    Ok(Json(product.into()))
}

pub async fn collection_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<CollectionResponse>, (StatusCode, String)> {
    let collection = Collection::lookup(&id);
    let mut query = catalog::Query::from_params(
        None,
        None,
        params.color.as_deref(),
        params.size.as_deref(),
        params.sort.as_deref(),
    )
    .map_err(error_response)?;
    query.category = collection.filter;
    let results: Vec<ProductView> = state.engine.search(&query).into_iter().map(ProductView::from).collect();
    Ok(Json(CollectionResponse { collection, total_hits: results.len(), results }))
}

pub async fn filters_handler() -> Json<FilterOptions> {
    Json(FilterOptions::default())
}

pub async fn popular_handler() -> Json<PopularResponse> {
    Json(PopularResponse { searches: POPULAR_SEARCHES.to_vec(), categories: POPULAR_CATEGORIES.to_vec() })
}

fn error_response(err: CatalogError) -> (StatusCode, String) {
    let status = match err {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
