use serde::{Deserialize, Serialize};
use crate::schema::{bookings, listings, reviews};
use chrono::{NaiveDate, NaiveDateTime};
use diesel::{deserialize::{self, FromSql}, pg::{Pg, PgValue}, serialize::{self, Output, ToSql}, sql_types::Text};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = crate::schema::sql_types::BookingStatus)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ToSql<crate::schema::sql_types::BookingStatus, Pg> for BookingStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match *self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        };
        <str as ToSql<Text, Pg>>::to_sql(s, out)
    }
}

impl FromSql<crate::schema::sql_types::BookingStatus, Pg> for BookingStatus {
    fn from_sql(bytes: PgValue) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            s => Err(format!("Unrecognized booking status: {}", s).into()),
        }
    }
}

#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = listings)]
pub struct Listing {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price_per_night: f64,
    pub is_available: bool,
    pub created_at: Option<NaiveDateTime>,
}

// Doubles as the POST/PUT payload: the column set and the writable field
// set are identical. A `None` for `is_available` falls back to the column
// default (true).
#[derive(Debug, Clone, Deserialize, Insertable)]
#[diesel(table_name = listings)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub location: String,
    pub price_per_night: f64,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, AsChangeset)]
#[diesel(table_name = listings)]
pub struct ListingChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price_per_night: Option<f64>,
    pub is_available: Option<bool>,
}

impl ListingChanges {
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.location.is_some()
            || self.price_per_night.is_some()
            || self.is_available.is_some()
    }
}

#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = bookings)]
pub struct Booking {
    pub id: i32,
    pub listing_id: i32,
    pub user_id: Option<String>,
    pub guest_name: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBooking {
    pub listing_id: i32,
    pub user_id: Option<String>,
    pub guest_name: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = reviews)]
pub struct Review {
    pub id: i32,
    pub listing_id: i32,
    pub reviewer_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReview {
    pub listing_id: i32,
    pub reviewer_name: String,
    pub rating: i32,
    pub comment: String,
}

// Request/response models for the API.
//
// The owner of a booking is never part of a request body; it is stamped
// from the authenticated caller on create and immutable afterwards, so a
// client-supplied "user_id" key is simply ignored by deserialization.

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub listing_id: i32,
    pub guest_name: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, AsChangeset)]
#[diesel(table_name = bookings)]
pub struct BookingChanges {
    pub listing_id: Option<i32>,
    pub guest_name: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub total_price: Option<f64>,
    pub status: Option<BookingStatus>,
}

impl BookingChanges {
    pub fn has_changes(&self) -> bool {
        self.listing_id.is_some()
            || self.guest_name.is_some()
            || self.check_in.is_some()
            || self.check_out.is_some()
            || self.total_price.is_some()
            || self.status.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilter {
    pub max_price: Option<f64>,
}

// Booking filters sent present-but-empty (`?user_id=`) impose no
// constraint, same as leaving the parameter off entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilter {
    #[serde(default, deserialize_with = "empty_as_absent")]
    pub listing_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_absent")]
    pub user_id: Option<String>,
}

fn empty_as_absent<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price_per_night: f64,
    pub is_available: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        ListingResponse {
            id: listing.id,
            title: listing.title,
            description: listing.description,
            location: listing.location,
            price_per_night: listing.price_per_night,
            is_available: listing.is_available,
            created_at: listing.created_at,
        }
    }
}

// The listing association is expanded on every read; writes go through the
// bare `listing_id` on the request types above.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: i32,
    pub listing: ListingResponse,
    pub user_id: Option<String>,
    pub guest_name: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: Option<NaiveDateTime>,
}

impl From<(Booking, Listing)> for BookingResponse {
    fn from((booking, listing): (Booking, Listing)) -> Self {
        BookingResponse {
            id: booking.id,
            listing: ListingResponse::from(listing),
            user_id: booking.user_id,
            guest_name: booking.guest_name,
            check_in: booking.check_in,
            check_out: booking.check_out,
            total_price: booking.total_price,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: i32,
    pub listing_id: i32,
    pub reviewer_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: Option<NaiveDateTime>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id,
            listing_id: review.listing_id,
            reviewer_name: review.reviewer_name,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}
