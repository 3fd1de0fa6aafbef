use actix_web::{delete, get, patch, post, put, web, HttpResponse};

use crate::actions;
use crate::errors::ApiResult;
use crate::models::{ListingChanges, ListingFilter, ListingResponse, NewListing, ReviewResponse};
use crate::DbPool;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/listings")
            .service(list_listings)
            .service(create_listing)
            .service(get_listing)
            .service(replace_listing)
            .service(patch_listing)
            .service(delete_listing)
            .service(listing_reviews),
    );
}

#[get("")]
async fn list_listings(
    pool: web::Data<DbPool>,
    filter: web::Query<ListingFilter>,
) -> ApiResult<HttpResponse> {
    let filter = filter.into_inner();

    let listings = web::block(move || {
        let mut conn = pool.get()?;
        actions::list_listings(&mut conn, &filter)
    })
    .await??;

    let body: Vec<ListingResponse> = listings.into_iter().map(ListingResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[post("")]
async fn create_listing(
    pool: web::Data<DbPool>,
    form: web::Json<NewListing>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();

    let listing = web::block(move || {
        let mut conn = pool.get()?;
        actions::create_listing(&mut conn, &form)
    })
    .await??;

    Ok(HttpResponse::Created().json(ListingResponse::from(listing)))
}

#[get("/{id}")]
async fn get_listing(pool: web::Data<DbPool>, path: web::Path<i32>) -> ApiResult<HttpResponse> {
    let listing_id = path.into_inner();

    let listing = web::block(move || {
        let mut conn = pool.get()?;
        actions::find_listing(&mut conn, listing_id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(ListingResponse::from(listing)))
}

#[put("/{id}")]
async fn replace_listing(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<NewListing>,
) -> ApiResult<HttpResponse> {
    let listing_id = path.into_inner();
    let form = form.into_inner();

    let listing = web::block(move || {
        let mut conn = pool.get()?;
        actions::update_listing(&mut conn, listing_id, &form)
    })
    .await??;

    Ok(HttpResponse::Ok().json(ListingResponse::from(listing)))
}

#[patch("/{id}")]
async fn patch_listing(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<ListingChanges>,
) -> ApiResult<HttpResponse> {
    let listing_id = path.into_inner();
    let form = form.into_inner();

    let listing = web::block(move || {
        let mut conn = pool.get()?;
        actions::patch_listing(&mut conn, listing_id, &form)
    })
    .await??;

    Ok(HttpResponse::Ok().json(ListingResponse::from(listing)))
}

#[delete("/{id}")]
async fn delete_listing(pool: web::Data<DbPool>, path: web::Path<i32>) -> ApiResult<HttpResponse> {
    let listing_id = path.into_inner();

    web::block(move || {
        let mut conn = pool.get()?;
        actions::delete_listing(&mut conn, listing_id)
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}

#[get("/{id}/reviews")]
async fn listing_reviews(pool: web::Data<DbPool>, path: web::Path<i32>) -> ApiResult<HttpResponse> {
    let listing_id = path.into_inner();

    let reviews = web::block(move || {
        let mut conn = pool.get()?;
        actions::reviews_for_listing(&mut conn, listing_id)
    })
    .await??;

    let body: Vec<ReviewResponse> = reviews.into_iter().map(ReviewResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
