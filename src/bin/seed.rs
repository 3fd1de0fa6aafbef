//! Fills the database with sample listings, bookings and reviews.
//!
//! Run with `cargo run --bin seed`. Repeated runs keep appending rows.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use diesel::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use travelstay::models::{BookingStatus, NewBooking, NewListing, NewReview};
use travelstay::{actions, schema};

const TITLES: &[&str] = &[
    "Cozy cabin in the pines",
    "Sunny loft near the harbour",
    "Quiet farmhouse retreat",
    "Downtown studio with a view",
    "Beachside bungalow",
    "Restored stone cottage",
    "Riverside guesthouse",
    "Modern flat by the park",
    "Hilltop villa with terrace",
    "Garden apartment near the market",
];

const LOCATIONS: &[&str] = &[
    "Lisbon", "Marrakesh", "Cape Town", "Nairobi", "Accra", "Porto", "Valencia", "Kigali",
];

const DESCRIPTIONS: &[&str] = &[
    "Bright rooms, a well stocked kitchen and fast wifi. Close to cafes and public transport.",
    "A calm spot to unwind, with a private patio and plenty of morning sun.",
    "Freshly renovated, sleeps four comfortably. Walking distance from the old town.",
    "Simple, clean and quiet. Ideal for remote work weeks or weekend getaways.",
];

const GUESTS: &[&str] = &[
    "Amina Diallo",
    "Jonas Berger",
    "Priya Nair",
    "Tomas Silva",
    "Leila Haddad",
    "Gabriel Mensah",
    "Ines Costa",
    "Samuel Okoro",
];

const COMMENTS: &[&str] = &[
    "Great stay, exactly as described.",
    "Lovely host and a very comfortable bed.",
    "Good value, though the street gets noisy in the morning.",
    "Would absolutely book again.",
    "Check-in was smooth and the location is unbeatable.",
];

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let conn_spec = std::env::var("DATABASE_URL").expect("DATABASE_URL should be set");
    let mut conn = PgConnection::establish(&conn_spec)
        .expect("database URL should point to a reachable PostgreSQL server");
    let mut rng = rand::thread_rng();

    log::info!("Seeding data...");

    let year_start = NaiveDate::from_ymd_opt(Utc::now().year(), 1, 1).unwrap();

    for &title in TITLES {
        let listing = actions::create_listing(
            &mut conn,
            &NewListing {
                title: title.to_owned(),
                description: DESCRIPTIONS.choose(&mut rng).unwrap().to_string(),
                location: LOCATIONS.choose(&mut rng).unwrap().to_string(),
                price_per_night: rng.gen_range(50..=300) as f64,
                is_available: Some(rng.gen_bool(0.5)),
            },
        )
        .expect("listing insert should succeed");

        for _ in 0..rng.gen_range(1..=5) {
            let check_in = year_start + Duration::days(rng.gen_range(0..350));
            let check_out = check_in + Duration::days(rng.gen_range(1..=14));
            actions::create_booking(
                &mut conn,
                &NewBooking {
                    listing_id: listing.id,
                    user_id: None,
                    guest_name: Some(GUESTS.choose(&mut rng).unwrap().to_string()),
                    check_in,
                    check_out,
                    total_price: rng.gen_range(100..=1000) as f64,
                    status: BookingStatus::Pending,
                },
            )
            .expect("booking insert should succeed");
        }

        for _ in 0..rng.gen_range(0..=3) {
            diesel::insert_into(schema::reviews::table)
                .values(NewReview {
                    listing_id: listing.id,
                    reviewer_name: GUESTS.choose(&mut rng).unwrap().to_string(),
                    rating: rng.gen_range(1..=5),
                    comment: COMMENTS.choose(&mut rng).unwrap().to_string(),
                })
                .execute(&mut conn)
                .expect("review insert should succeed");
        }
    }

    log::info!("Seeding complete!");
}
