pub mod bookings;
pub mod listings;
