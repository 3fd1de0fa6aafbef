use diesel::prelude::*;

use crate::errors::{ApiError, ApiResult};
use crate::models::{self, BookingStatus};

fn ensure_positive_price(price_per_night: f64) -> ApiResult<()> {
    if price_per_night > 0.0 {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "price_per_night must be a positive number.".to_owned(),
        ))
    }
}

pub fn list_listings(
    conn: &mut PgConnection,
    filter: &models::ListingFilter,
) -> ApiResult<Vec<models::Listing>> {
    use crate::schema::listings;

    let mut query = listings::table
        .order(listings::created_at.desc())
        .into_boxed();

    if let Some(max_price) = filter.max_price {
        query = query.filter(listings::price_per_night.le(max_price));
    }

    Ok(query.load::<models::Listing>(conn)?)
}

pub fn create_listing(
    conn: &mut PgConnection,
    new_listing: &models::NewListing,
) -> ApiResult<models::Listing> {
    use crate::schema::listings;

    ensure_positive_price(new_listing.price_per_night)?;

    conn.transaction(|conn| {
        let id: i32 = diesel::insert_into(listings::table)
            .values(new_listing)
            .returning(listings::id)
            .get_result(conn)?;

        // Re-read the row so column defaults (created_at, is_available)
        // show up in the response.
        Ok(listings::table.find(id).first::<models::Listing>(conn)?)
    })
}

pub fn find_listing(conn: &mut PgConnection, listing_id: i32) -> ApiResult<models::Listing> {
    use crate::schema::listings;

    Ok(listings::table
        .find(listing_id)
        .first::<models::Listing>(conn)?)
}

pub fn update_listing(
    conn: &mut PgConnection,
    listing_id: i32,
    data: &models::NewListing,
) -> ApiResult<models::Listing> {
    use crate::schema::listings;

    ensure_positive_price(data.price_per_night)?;

    conn.transaction(|conn| {
        let updated = diesel::update(listings::table.find(listing_id))
            .set((
                listings::title.eq(&data.title),
                listings::description.eq(&data.description),
                listings::location.eq(&data.location),
                listings::price_per_night.eq(data.price_per_night),
                listings::is_available.eq(data.is_available.unwrap_or(true)),
            ))
            .execute(conn)?;

        if updated == 0 {
            return Err(ApiError::NotFound);
        }

        Ok(listings::table
            .find(listing_id)
            .first::<models::Listing>(conn)?)
    })
}

pub fn patch_listing(
    conn: &mut PgConnection,
    listing_id: i32,
    changes: &models::ListingChanges,
) -> ApiResult<models::Listing> {
    use crate::schema::listings;

    if let Some(price) = changes.price_per_night {
        ensure_positive_price(price)?;
    }

    conn.transaction(|conn| {
        // An empty patch is a no-op, not an error; diesel refuses to build
        // an UPDATE with no assignments.
        if changes.has_changes() {
            let updated = diesel::update(listings::table.find(listing_id))
                .set(changes)
                .execute(conn)?;

            if updated == 0 {
                return Err(ApiError::NotFound);
            }
        }

        Ok(listings::table
            .find(listing_id)
            .first::<models::Listing>(conn)?)
    })
}

pub fn delete_listing(conn: &mut PgConnection, listing_id: i32) -> ApiResult<()> {
    use crate::schema::listings;

    let deleted = diesel::delete(listings::table.find(listing_id)).execute(conn)?;
    if deleted == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(())
}

pub fn reviews_for_listing(
    conn: &mut PgConnection,
    listing_id: i32,
) -> ApiResult<Vec<models::Review>> {
    use crate::schema::{listings, reviews};

    // A missing listing is a 404; an existing listing with no reviews is an
    // empty list.
    listings::table
        .find(listing_id)
        .first::<models::Listing>(conn)?;

    Ok(reviews::table
        .filter(reviews::listing_id.eq(listing_id))
        .load::<models::Review>(conn)?)
}

pub fn list_bookings(
    conn: &mut PgConnection,
    filter: &models::BookingFilter,
) -> ApiResult<Vec<(models::Booking, models::Listing)>> {
    use crate::schema::{bookings, listings};

    let mut query = bookings::table
        .inner_join(listings::table)
        .select((bookings::all_columns, listings::all_columns))
        .order(bookings::created_at.desc())
        .into_boxed();

    if let Some(listing_id) = filter.listing_id {
        query = query.filter(bookings::listing_id.eq(listing_id));
    }
    if let Some(user_id) = &filter.user_id {
        query = query.filter(bookings::user_id.eq(user_id.clone()));
    }

    Ok(query.load::<(models::Booking, models::Listing)>(conn)?)
}

pub fn create_booking(
    conn: &mut PgConnection,
    new_booking: &models::NewBooking,
) -> ApiResult<(models::Booking, models::Listing)> {
    use crate::schema::bookings;

    conn.transaction(|conn| {
        let id: i32 = diesel::insert_into(bookings::table)
            .values(new_booking)
            .returning(bookings::id)
            .get_result(conn)?;

        find_booking(conn, id)
    })
}

pub fn find_booking(
    conn: &mut PgConnection,
    booking_id: i32,
) -> ApiResult<(models::Booking, models::Listing)> {
    use crate::schema::{bookings, listings};

    let pair = bookings::table
        .inner_join(listings::table)
        .filter(bookings::id.eq(booking_id))
        .select((bookings::all_columns, listings::all_columns))
        .first::<(models::Booking, models::Listing)>(conn)?;

    Ok(pair)
}

pub fn update_booking(
    conn: &mut PgConnection,
    booking_id: i32,
    data: &models::BookingRequest,
) -> ApiResult<(models::Booking, models::Listing)> {
    use crate::schema::bookings;

    conn.transaction(|conn| {
        let updated = diesel::update(bookings::table.find(booking_id))
            .set((
                bookings::listing_id.eq(data.listing_id),
                bookings::guest_name.eq(data.guest_name.clone()),
                bookings::check_in.eq(data.check_in),
                bookings::check_out.eq(data.check_out),
                bookings::total_price.eq(data.total_price),
                bookings::status.eq(data.status.clone().unwrap_or(BookingStatus::Pending)),
            ))
            .execute(conn)?;

        if updated == 0 {
            return Err(ApiError::NotFound);
        }

        find_booking(conn, booking_id)
    })
}

pub fn patch_booking(
    conn: &mut PgConnection,
    booking_id: i32,
    changes: &models::BookingChanges,
) -> ApiResult<(models::Booking, models::Listing)> {
    use crate::schema::bookings;

    conn.transaction(|conn| {
        if changes.has_changes() {
            let updated = diesel::update(bookings::table.find(booking_id))
                .set(changes)
                .execute(conn)?;

            if updated == 0 {
                return Err(ApiError::NotFound);
            }
        }

        // Reload from storage instead of echoing the patch, so the response
        // reflects the authoritative post-write state.
        find_booking(conn, booking_id)
    })
}

pub fn delete_booking(conn: &mut PgConnection, booking_id: i32) -> ApiResult<()> {
    use crate::schema::bookings;

    conn.transaction(|conn| {
        let booking = bookings::table
            .find(booking_id)
            .first::<models::Booking>(conn)?;

        if booking.status == BookingStatus::Confirmed {
            return Err(ApiError::Validation(
                "Cannot delete a confirmed booking.".to_owned(),
            ));
        }

        diesel::delete(bookings::table.find(booking_id)).execute(conn)?;

        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_guard_accepts_only_positive_values() {
        assert!(ensure_positive_price(0.01).is_ok());
        assert!(ensure_positive_price(300.0).is_ok());
        assert!(matches!(ensure_positive_price(0.0), Err(ApiError::Validation(_))));
        assert!(matches!(ensure_positive_price(-50.0), Err(ApiError::Validation(_))));
    }
}
