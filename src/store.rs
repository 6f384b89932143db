use thiserror::Error;

use crate::models::{BookingInquiry, NewBookingInquiry, Venue, VenueFilter};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Persistence seam used by both engines. Production runs it against
/// Postgres (`impl Store for PgConnection` in `actions`); tests run the
/// in-memory store below so engine behavior is checked without a database.
pub trait Store {
    fn venue_by_id(&mut self, venue_id: i32) -> Result<Option<Venue>, StoreError>;

    fn venue_by_slug(&mut self, slug: &str) -> Result<Option<Venue>, StoreError>;

    /// Returns the requested page plus the total count of venues matching
    /// the filter, ignoring pagination.
    fn search_venues(&mut self, filter: &VenueFilter) -> Result<(Vec<Venue>, i64), StoreError>;

    /// Inquiries for the venue whose status is not `rejected`. These are the
    /// rows the conflict engine checks for date-range overlap.
    fn active_inquiries(&mut self, venue_id: i32) -> Result<Vec<BookingInquiry>, StoreError>;

    /// All inquiries for the venue, ascending by start date. Rejected
    /// entries are included; filtering them is the caller's policy.
    fn inquiries_for_venue(&mut self, venue_id: i32) -> Result<Vec<BookingInquiry>, StoreError>;

    fn insert_inquiry(&mut self, inquiry: &NewBookingInquiry)
        -> Result<BookingInquiry, StoreError>;
}
