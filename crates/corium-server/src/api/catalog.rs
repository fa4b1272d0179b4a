//! Storefront catalog view-models: the card list and the product detail
//! page. Handlers stay thin; the assembly functions are pure so the
//! selection behavior is unit-testable without HTTP.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use corium_core::variants::{
    colors_for, display_state, format_guaranies, resolve, sizes_for, AxisOption, DisplayState,
    SelectionState,
};
use corium_core::{Product, ProductImage, Variant};

use crate::middleware::RequestId;

use super::{map_commerce_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CategoryItem {
    name: String,
    slug: String,
    description: Option<String>,
    image_url: Option<String>,
}

/// One product card on the catalog grid, rendered with no selection made.
#[derive(Debug, Serialize)]
pub(super) struct ProductCard {
    id: String,
    name: String,
    category: Option<String>,
    display: DisplayState,
}

#[derive(Debug, Serialize)]
pub(super) struct VariantView {
    id: String,
    sku: String,
    color: Option<String>,
    size: Option<String>,
    price: i64,
    formatted_price: String,
    stock: u32,
    available: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct SelectedAxes {
    color: Option<String>,
    size: Option<String>,
}

/// The product detail page: axis selectors, resolved variant, and display
/// state for the replayed selection. Empty `colors`/`sizes` arrays mean the
/// product has no such axis and the control is not rendered.
#[derive(Debug, Serialize)]
pub(super) struct ProductDetailView {
    id: String,
    name: String,
    description: Option<String>,
    category: Option<String>,
    images: Vec<ProductImage>,
    colors: Vec<AxisOption>,
    sizes: Vec<AxisOption>,
    selected: SelectedAxes,
    resolved_variant: Option<VariantView>,
    display: DisplayState,
}

#[derive(Debug, Deserialize)]
pub(super) struct CatalogQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SelectionQuery {
    pub color: Option<String>,
    pub size: Option<String>,
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CategoryItem>>> {
    let data = state
        .categories
        .iter()
        .map(|c| CategoryItem {
            name: c.name.clone(),
            slug: c.slug(),
            description: c.description.clone(),
            image_url: c.image_url.clone(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn list_catalog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ApiResponse<Vec<ProductCard>>>, ApiError> {
    let products = state
        .client
        .list_products(query.category.as_deref())
        .await
        .map_err(|e| map_commerce_error(req_id.0.clone(), &e))?;

    let data = products.iter().map(card_view).collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_product_view(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<String>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<ApiResponse<ProductDetailView>>, ApiError> {
    let product = state
        .client
        .get_product(&product_id)
        .await
        .map_err(|e| map_commerce_error(req_id.0.clone(), &e))?;

    let data = detail_view(&product, query.color.as_deref(), query.size.as_deref());

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Card state for the catalog grid: product-level defaults, no selection.
fn card_view(product: &Product) -> ProductCard {
    let state = SelectionState::new();
    ProductCard {
        id: product.id.clone(),
        name: product.name.clone(),
        category: product.category.clone(),
        display: display_state(product, state.selection()),
    }
}

/// Detail state for one product under the replayed query selection.
///
/// The query parameters replay the user's picks through the mutation
/// protocol — color first, then size — so a stale axis from an earlier
/// request is cleared exactly as a live interaction would clear it.
fn detail_view(product: &Product, color: Option<&str>, size: Option<&str>) -> ProductDetailView {
    let mut state = SelectionState::new();
    if let Some(color) = color.filter(|c| !c.is_empty()) {
        state.pick_color(&product.variants, color);
    }
    if let Some(size) = size.filter(|s| !s.is_empty()) {
        state.pick_size(&product.variants, size);
    }

    let selection = state.selection();
    let resolution = resolve(&product.variants, selection);

    ProductDetailView {
        id: product.id.clone(),
        name: product.name.clone(),
        description: product.description.clone(),
        category: product.category.clone(),
        images: product.images.clone(),
        colors: colors_for(&product.variants, selection.size()),
        sizes: sizes_for(&product.variants, selection.color()),
        selected: SelectedAxes {
            color: selection.color().map(ToOwned::to_owned),
            size: selection.size().map(ToOwned::to_owned),
        },
        resolved_variant: resolution.variant().map(variant_view),
        display: display_state(product, selection),
    }
}

fn variant_view(variant: &Variant) -> VariantView {
    VariantView {
        id: variant.id.clone(),
        sku: variant.sku.clone(),
        color: variant.color.clone(),
        size: variant.size.clone(),
        price: variant.price,
        formatted_price: format_guaranies(variant.price),
        stock: variant.stock,
        available: variant.available,
    }
}
