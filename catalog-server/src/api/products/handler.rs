//! Product API handlers
//!
//! Writes run a full load → mutate → save cycle under the store's
//! single-writer lock. Uploaded images are stored before validation runs
//! (upload failures take precedence over field errors, matching the wire
//! contract); an image left without a record is deleted on the error path.

use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use shared::models::{Product, ProductDraft, ProductView};
use shared::query::{ListParams, ProductPage};

use crate::api::DataBody;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::query;
use crate::utils::validation::parse_price;
use crate::utils::{AppError, AppResult, ValidationMode, validate_product};

fn to_view(state: &ServerState, product: Product) -> ProductView {
    let image_url = state.image_url(product.image_filename.as_deref());
    ProductView { product, image_url }
}

/// Read the multipart form into a draft, storing an uploaded image as a
/// side effect. On any later failure the caller must delete that image via
/// [`discard_upload`].
async fn read_form(state: &ServerState, multipart: &mut Multipart) -> AppResult<ProductDraft> {
    let mut draft = ProductDraft::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => draft.name = Some(field.text().await?),
            "brand" => draft.brand = Some(field.text().await?),
            "category" => draft.category = Some(field.text().await?),
            "price" => draft.price = Some(field.text().await?),
            "description" => draft.description = Some(field.text().await?),
            "image" => {
                let original = field.file_name().map(str::to_string).unwrap_or_default();
                let data = field.bytes().await?;
                // Browsers submit an empty image part when no file is picked
                if original.is_empty() && data.is_empty() {
                    continue;
                }
                match state.images.save(&original, &data) {
                    Ok(filename) => {
                        // A repeated image part replaces the earlier upload
                        if let Some(previous) = draft.image_filename.replace(filename) {
                            state.images.delete(&previous);
                        }
                    }
                    Err(e) => {
                        discard_upload(state, &draft);
                        return Err(e);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(draft)
}

/// Delete an image stored for a request that did not produce a record
fn discard_upload(state: &ServerState, draft: &ProductDraft) {
    if let Some(filename) = &draft.image_filename {
        state.images.delete(filename);
    }
}

/// GET /products - run the listing pipeline over the catalog
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataBody<ProductPage>>> {
    let doc = state.store.load();
    let (products, pagination) =
        query::run(&doc.products, &params).map_err(AppError::Validation)?;

    let products = products
        .into_iter()
        .map(|p| to_view(&state, p))
        .collect();

    Ok(Json(DataBody {
        data: ProductPage {
            products,
            pagination,
        },
    }))
}

/// GET /products/:id - fetch a single product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductView>> {
    let doc = state.store.load();
    let product = doc
        .products
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(to_view(&state, product)))
}

/// POST /products - create a product from a multipart form
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProductView>)> {
    let draft = read_form(&state, &mut multipart).await?;

    let errors = validate_product(&draft, ValidationMode::Create);
    if !errors.is_empty() {
        discard_upload(&state, &draft);
        return Err(AppError::Validation(errors));
    }
    // Guaranteed numeric by the validator
    let price = draft
        .price
        .as_deref()
        .and_then(parse_price)
        .ok_or_else(|| AppError::internal("validated price failed to parse"))?;

    let _guard = state.store.lock_for_write().await;
    let mut doc = state.store.load();
    let id = state.store.next_id(&doc);

    // Text fields are stored trimmed
    let product = Product {
        id,
        name: draft.name.as_deref().unwrap_or_default().trim().to_string(),
        brand: draft.brand.as_deref().unwrap_or_default().trim().to_string(),
        category: draft
            .category
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
        price,
        description: draft
            .description
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
        image_filename: draft.image_filename.clone(),
        created_at: Utc::now(),
        updated_at: None,
    };
    doc.products.push(product.clone());

    if let Err(e) = state.store.save(&doc) {
        discard_upload(&state, &draft);
        return Err(AppError::internal(e.to_string()));
    }

    tracing::info!(id, user = %user.email, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(to_view(&state, product))))
}

/// PUT|PATCH /products/:id - partial update from a multipart form
///
/// Only the submitted fields are merged; a new image replaces the previous
/// asset, which is deleted best-effort after the document is persisted.
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<ProductView>> {
    let draft = read_form(&state, &mut multipart).await?;

    let errors = validate_product(&draft, ValidationMode::Update);
    if !errors.is_empty() {
        discard_upload(&state, &draft);
        return Err(AppError::Validation(errors));
    }

    let _guard = state.store.lock_for_write().await;
    let mut doc = state.store.load();
    let Some(product) = doc.products.iter_mut().find(|p| p.id == id) else {
        discard_upload(&state, &draft);
        return Err(AppError::not_found("Product not found"));
    };

    if let Some(name) = draft.name.as_deref() {
        product.name = name.trim().to_string();
    }
    if let Some(brand) = draft.brand.as_deref() {
        product.brand = brand.trim().to_string();
    }
    if let Some(category) = draft.category.as_deref() {
        product.category = category.trim().to_string();
    }
    if let Some(description) = draft.description.as_deref() {
        product.description = description.trim().to_string();
    }
    if let Some(raw) = draft.price.as_deref()
        && let Some(price) = parse_price(raw)
    {
        product.price = price;
    }
    let replaced_image = if draft.image_filename.is_some() {
        std::mem::replace(&mut product.image_filename, draft.image_filename.clone())
    } else {
        None
    };
    product.updated_at = Some(Utc::now());
    let updated = product.clone();

    if let Err(e) = state.store.save(&doc) {
        discard_upload(&state, &draft);
        return Err(AppError::internal(e.to_string()));
    }

    if let Some(old) = replaced_image {
        state.images.delete(&old);
    }

    tracing::info!(id, user = %user.email, "Product updated");
    Ok(Json(to_view(&state, updated)))
}

/// DELETE /products/:id - remove a product and its image asset
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let _guard = state.store.lock_for_write().await;
    let mut doc = state.store.load();

    let Some(pos) = doc.products.iter().position(|p| p.id == id) else {
        return Err(AppError::not_found("Product not found"));
    };
    let removed = doc.products.remove(pos);

    state
        .store
        .save(&doc)
        .map_err(|e| AppError::internal(e.to_string()))?;

    // Asset cleanup after the document is durable; a failure here only logs
    if let Some(filename) = removed.image_filename {
        state.images.delete(&filename);
    }

    tracing::info!(id, user = %user.email, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
