use diesel::prelude::*;

use crate::models::{BookingInquiry, InquiryStatus, NewBookingInquiry, Venue, VenueFilter};
use crate::store::{Store, StoreError};

/// Escapes LIKE/ILIKE metacharacters so a search term matches as a literal
/// substring. Without this, a term like `100%` or `_` acts as a wildcard,
/// diverging from the in-memory store's literal `contains`.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl Store for PgConnection {
    fn venue_by_id(&mut self, vid: i32) -> Result<Option<Venue>, StoreError> {
        use crate::schema::venues::dsl::*;

        let venue = venues.find(vid).first::<Venue>(self).optional()?;
        Ok(venue)
    }

    fn venue_by_slug(&mut self, venue_slug: &str) -> Result<Option<Venue>, StoreError> {
        use crate::schema::venues::dsl::*;

        let venue = venues
            .filter(slug.eq(venue_slug))
            .first::<Venue>(self)
            .optional()?;
        Ok(venue)
    }

    fn search_venues(&mut self, filter: &VenueFilter) -> Result<(Vec<Venue>, i64), StoreError> {
        use crate::schema::venues::dsl::*;

        // Boxed queries cannot be cloned, so the filter is applied twice:
        // once for the count, once for the page.
        let apply = |filter: &VenueFilter| {
            let mut query = venues.into_boxed();
            if let Some(term) = &filter.search {
                let pattern = format!("%{}%", escape_like(term));
                query = query.filter(name.ilike(pattern.clone()).or(city.ilike(pattern)));
            }
            if let Some(min) = filter.min_capacity {
                query = query.filter(capacity.ge(min));
            }
            if let Some(max) = &filter.max_price {
                query = query.filter(price_per_night.le(max.clone()));
            }
            query
        };

        let total: i64 = apply(filter).count().get_result(self)?;
        let page = apply(filter)
            .order((created_at.desc(), id.desc()))
            .offset(filter.offset())
            .limit(filter.limit)
            .load::<Venue>(self)?;

        Ok((page, total))
    }

    fn active_inquiries(&mut self, vid: i32) -> Result<Vec<BookingInquiry>, StoreError> {
        use crate::schema::booking_inquiries::dsl::*;

        let rows = booking_inquiries
            .filter(venue_id.eq(vid))
            .filter(status.ne(InquiryStatus::Rejected))
            .load::<BookingInquiry>(self)?;
        Ok(rows)
    }

    fn inquiries_for_venue(&mut self, vid: i32) -> Result<Vec<BookingInquiry>, StoreError> {
        use crate::schema::booking_inquiries::dsl::*;

        let rows = booking_inquiries
            .filter(venue_id.eq(vid))
            .order(start_date.asc())
            .load::<BookingInquiry>(self)?;
        Ok(rows)
    }

    fn insert_inquiry(
        &mut self,
        inquiry: &NewBookingInquiry,
    ) -> Result<BookingInquiry, StoreError> {
        use crate::schema::booking_inquiries::dsl::*;

        let row = diesel::insert_into(booking_inquiries)
            .values(inquiry)
            .get_result::<BookingInquiry>(self)?;
        Ok(row)
    }
}
