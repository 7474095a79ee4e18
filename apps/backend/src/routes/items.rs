//! Inventory item endpoints under `/api/inventory`.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::info;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::inventory_items::{self, NewInventoryItem};
use crate::state::app_state::AppState;

/// Route name of the single-item resource, used to build `Location` headers.
pub const ITEM_RESOURCE: &str = "inventory_item";

/// Characters escaped when an article number becomes a single path segment.
/// `url_for` leaves `%` and `/` untouched, so they are escaped here.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

async fn list_items(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let items = inventory_items::list_all(db).await?;
    Ok(HttpResponse::Ok().json(items))
}

async fn get_item(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let article_number = path.into_inner();
    let db = require_db(&app_state)?;
    let item = inventory_items::require_by_article_number(db, &article_number).await?;
    Ok(HttpResponse::Ok().json(item))
}

async fn create_item(
    req: HttpRequest,
    body: ValidatedJson<NewInventoryItem>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let item = inventory_items::create(db, body.into_inner()).await?;

    let segment = utf8_percent_encode(&item.article_number, PATH_SEGMENT).to_string();
    let location = req
        .url_for(ITEM_RESOURCE, [segment.as_str()])
        .map_err(|e| AppError::internal(format!("cannot build item location: {e}")))?;

    info!(id = item.id, article_number = %item.article_number, "item=created");
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.to_string()))
        .json(item))
}

async fn update_quantity(
    path: web::Path<String>,
    body: ValidatedJson<i32>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let article_number = path.into_inner();
    let quantity = body.into_inner();

    let item = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            inventory_items::update_quantity(txn, &article_number, quantity)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    info!(id = item.id, quantity, "item=quantity_updated");
    Ok(HttpResponse::Ok().json(item))
}

async fn delete_item(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let article_number = path.into_inner();
    let deleted = article_number.clone();

    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            inventory_items::delete(txn, &article_number)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    info!(article_number = %deleted, "item=deleted");
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_items))
            .route(web::post().to(create_item)),
    )
    .service(
        web::resource("/{article_number}")
            .name(ITEM_RESOURCE)
            .route(web::get().to(get_item))
            .route(web::put().to(update_quantity))
            .route(web::delete().to(delete_item)),
    );
}
