use actix_web::{delete, get, patch, post, put, web, HttpResponse};

use crate::actions;
use crate::auth::AuthenticatedUser;
use crate::errors::ApiResult;
use crate::models::{
    BookingChanges, BookingFilter, BookingRequest, BookingResponse, BookingStatus, NewBooking,
};
use crate::DbPool;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .service(list_bookings)
            .service(create_booking)
            .service(get_booking)
            .service(replace_booking)
            .service(patch_booking)
            .service(delete_booking),
    );
}

#[get("")]
async fn list_bookings(
    pool: web::Data<DbPool>,
    filter: web::Query<BookingFilter>,
) -> ApiResult<HttpResponse> {
    let filter = filter.into_inner();

    let bookings = web::block(move || {
        let mut conn = pool.get()?;
        actions::list_bookings(&mut conn, &filter)
    })
    .await??;

    let body: Vec<BookingResponse> = bookings.into_iter().map(BookingResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[post("")]
async fn create_booking(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    form: web::Json<BookingRequest>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();

    // The stored owner is always the authenticated caller, never anything
    // the client put in the body.
    let new_booking = NewBooking {
        listing_id: form.listing_id,
        user_id: Some(user.0),
        guest_name: form.guest_name,
        check_in: form.check_in,
        check_out: form.check_out,
        total_price: form.total_price,
        status: form.status.unwrap_or(BookingStatus::Pending),
    };

    let booking = web::block(move || {
        let mut conn = pool.get()?;
        actions::create_booking(&mut conn, &new_booking)
    })
    .await??;

    Ok(HttpResponse::Created().json(BookingResponse::from(booking)))
}

#[get("/{id}")]
async fn get_booking(pool: web::Data<DbPool>, path: web::Path<i32>) -> ApiResult<HttpResponse> {
    let booking_id = path.into_inner();

    let booking = web::block(move || {
        let mut conn = pool.get()?;
        actions::find_booking(&mut conn, booking_id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(BookingResponse::from(booking)))
}

#[put("/{id}")]
async fn replace_booking(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<BookingRequest>,
) -> ApiResult<HttpResponse> {
    let booking_id = path.into_inner();
    let form = form.into_inner();

    let booking = web::block(move || {
        let mut conn = pool.get()?;
        actions::update_booking(&mut conn, booking_id, &form)
    })
    .await??;

    Ok(HttpResponse::Ok().json(BookingResponse::from(booking)))
}

#[patch("/{id}")]
async fn patch_booking(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    form: web::Json<BookingChanges>,
) -> ApiResult<HttpResponse> {
    let booking_id = path.into_inner();
    let form = form.into_inner();

    let booking = web::block(move || {
        let mut conn = pool.get()?;
        actions::patch_booking(&mut conn, booking_id, &form)
    })
    .await??;

    Ok(HttpResponse::Ok().json(BookingResponse::from(booking)))
}

#[delete("/{id}")]
async fn delete_booking(pool: web::Data<DbPool>, path: web::Path<i32>) -> ApiResult<HttpResponse> {
    let booking_id = path.into_inner();

    web::block(move || {
        let mut conn = pool.get()?;
        actions::delete_booking(&mut conn, booking_id)
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_filter_parses_both_fields() {
        let filter =
            web::Query::<BookingFilter>::from_query("listing_id=3&user_id=alice").unwrap();
        assert_eq!(filter.listing_id, Some(3));
        assert_eq!(filter.user_id.as_deref(), Some("alice"));

        let filter = web::Query::<BookingFilter>::from_query("").unwrap();
        assert_eq!(filter.listing_id, None);
        assert_eq!(filter.user_id, None);
    }

    #[test]
    fn booking_filter_treats_empty_values_as_absent() {
        let filter = web::Query::<BookingFilter>::from_query("listing_id=&user_id=").unwrap();
        assert_eq!(filter.listing_id, None);
        assert_eq!(filter.user_id, None);

        let filter = web::Query::<BookingFilter>::from_query("user_id=").unwrap();
        assert_eq!(filter.user_id, None);
    }

    #[test]
    fn booking_filter_rejects_a_non_numeric_listing_id() {
        assert!(web::Query::<BookingFilter>::from_query("listing_id=first").is_err());
    }
}
