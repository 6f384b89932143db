use chrono::NaiveDate;

use crate::errors::ApiError;
use crate::models::{BookingInquiry, BookingRequest, DateRange, InquiryStatus, NewBookingInquiry};
use crate::store::Store;

/// Half-open interval intersection. A checkout day does not occupy the
/// venue, so a stay ending on day X never conflicts with one starting on X.
pub fn ranges_overlap(
    start_a: NaiveDate,
    end_a: NaiveDate,
    start_b: NaiveDate,
    end_b: NaiveDate,
) -> bool {
    start_a < end_b && end_a > start_b
}

/// Validates a booking request against the venue and its existing inquiries,
/// then persists it as a `pending` inquiry with the venue's current price
/// snapshotted. Checks run in strict order and short-circuit; nothing is
/// written unless all of them pass.
///
/// The overlap check and the insert are separate statements, so two
/// concurrent requests for the same venue and overlapping dates can both
/// pass the check before either inserts. See DESIGN.md.
pub fn create_booking<S: Store>(
    store: &mut S,
    request: &BookingRequest,
) -> Result<BookingInquiry, ApiError> {
    let venue = crate::venues::venue_by_id(store, request.venue_id)?;

    if request.attendee_count > venue.capacity {
        return Err(ApiError::CapacityExceeded {
            capacity: venue.capacity,
        });
    }

    let conflicts: Vec<DateRange> = store
        .active_inquiries(request.venue_id)?
        .iter()
        .filter(|b| ranges_overlap(b.start_date, b.end_date, request.start_date, request.end_date))
        .map(|b| DateRange {
            start_date: b.start_date,
            end_date: b.end_date,
        })
        .collect();
    if !conflicts.is_empty() {
        return Err(ApiError::DatesUnavailable { conflicts });
    }

    let inquiry = store.insert_inquiry(&NewBookingInquiry {
        venue_id: venue.id,
        company_name: request.company_name.clone(),
        email: request.email.clone(),
        start_date: request.start_date,
        end_date: request.end_date,
        attendee_count: request.attendee_count,
        status: InquiryStatus::Pending,
        quoted_price_per_night: venue.price_per_night.clone(),
        message: request.message.clone(),
    })?;
    Ok(inquiry)
}

/// Raw inquiry list for a venue, ascending by start date. Includes rejected
/// entries; public availability listings filter those out at the boundary.
pub fn bookings_for_venue<S: Store>(
    store: &mut S,
    venue_id: i32,
) -> Result<Vec<BookingInquiry>, ApiError> {
    Ok(store.inquiries_for_venue(venue_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::{date, venue, MemStore};
    use bigdecimal::BigDecimal;

    fn request(venue_id: i32, start: NaiveDate, end: NaiveDate, attendees: i32) -> BookingRequest {
        BookingRequest {
            venue_id,
            company_name: "Acme GmbH".to_owned(),
            email: "events@acme.example".to_owned(),
            start_date: start,
            end_date: end,
            attendee_count: attendees,
            message: None,
        }
    }

    fn store_with_capacity_100() -> MemStore {
        MemStore::with_venues(vec![venue(1, "Harbor Hall", "Hamburg", 100, "450")])
    }

    // ── ranges_overlap ────────────────────────────────────

    #[test]
    fn overlap_contained_and_spanning() {
        let (a, b) = (date(2025, 3, 2), date(2025, 3, 4));
        assert!(ranges_overlap(date(2025, 3, 1), date(2025, 3, 5), a, b));
        assert!(ranges_overlap(date(2025, 3, 2), date(2025, 3, 3), a, b));
        assert!(ranges_overlap(date(2025, 3, 3), date(2025, 3, 6), a, b));
    }

    #[test]
    fn boundary_touch_does_not_overlap() {
        let (a, b) = (date(2025, 3, 2), date(2025, 3, 4));
        assert!(!ranges_overlap(date(2025, 3, 4), date(2025, 3, 6), a, b));
        assert!(!ranges_overlap(date(2025, 2, 28), date(2025, 3, 2), a, b));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        assert!(!ranges_overlap(
            date(2025, 3, 10),
            date(2025, 3, 12),
            date(2025, 3, 2),
            date(2025, 3, 4)
        ));
    }

    // ── create_booking ────────────────────────────────────

    #[test]
    fn unknown_venue_is_not_found_regardless_of_other_fields() {
        let mut store = store_with_capacity_100();
        let result = create_booking(
            &mut store,
            &request(42, date(2025, 3, 1), date(2025, 3, 5), 1_000_000),
        );
        assert!(matches!(result, Err(ApiError::VenueNotFound)));
        assert!(store.inquiries.is_empty());
    }

    #[test]
    fn attendee_count_at_capacity_is_accepted() {
        let mut store = store_with_capacity_100();
        let inquiry = create_booking(
            &mut store,
            &request(1, date(2025, 3, 1), date(2025, 3, 5), 100),
        )
        .unwrap();
        assert_eq!(inquiry.attendee_count, 100);
    }

    #[test]
    fn attendee_count_over_capacity_carries_the_limit() {
        let mut store = store_with_capacity_100();
        let result = create_booking(
            &mut store,
            &request(1, date(2025, 3, 1), date(2025, 3, 5), 150),
        );
        match result {
            Err(ApiError::CapacityExceeded { capacity }) => {
                assert_eq!(capacity, 100);
            }
            other => panic!("expected CapacityExceeded, got {:?}", other),
        }
        assert!(store.inquiries.is_empty());
    }

    #[test]
    fn capacity_error_message_names_the_limit() {
        let err = ApiError::CapacityExceeded { capacity: 100 };
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn overlapping_request_is_rejected_with_conflicting_ranges() {
        let mut store = store_with_capacity_100();
        store.seed_inquiry(1, date(2025, 3, 2), date(2025, 3, 4), InquiryStatus::Pending);

        let result = create_booking(
            &mut store,
            &request(1, date(2025, 3, 1), date(2025, 3, 5), 50),
        );
        match result {
            Err(ApiError::DatesUnavailable { conflicts }) => {
                assert_eq!(
                    conflicts,
                    vec![DateRange {
                        start_date: date(2025, 3, 2),
                        end_date: date(2025, 3, 4),
                    }]
                );
            }
            other => panic!("expected DatesUnavailable, got {:?}", other),
        }
        assert_eq!(store.inquiries.len(), 1);
    }

    #[test]
    fn back_to_back_booking_is_accepted() {
        let mut store = store_with_capacity_100();
        store.seed_inquiry(1, date(2025, 3, 2), date(2025, 3, 4), InquiryStatus::Pending);

        let inquiry = create_booking(
            &mut store,
            &request(1, date(2025, 3, 4), date(2025, 3, 6), 50),
        )
        .unwrap();
        assert_eq!(inquiry.start_date, date(2025, 3, 4));
    }

    #[test]
    fn rejected_prior_booking_does_not_block() {
        let mut store = store_with_capacity_100();
        store.seed_inquiry(1, date(2025, 3, 2), date(2025, 3, 4), InquiryStatus::Rejected);

        let inquiry = create_booking(
            &mut store,
            &request(1, date(2025, 3, 2), date(2025, 3, 4), 50),
        )
        .unwrap();
        assert_eq!(inquiry.status, InquiryStatus::Pending);
    }

    #[test]
    fn confirmed_prior_booking_still_blocks() {
        let mut store = store_with_capacity_100();
        store.seed_inquiry(1, date(2025, 3, 2), date(2025, 3, 4), InquiryStatus::Confirmed);

        let result = create_booking(
            &mut store,
            &request(1, date(2025, 3, 3), date(2025, 3, 5), 50),
        );
        assert!(matches!(result, Err(ApiError::DatesUnavailable { .. })));
    }

    #[test]
    fn accepted_booking_is_pending_with_price_snapshot() {
        let mut store = store_with_capacity_100();
        let inquiry = create_booking(
            &mut store,
            &request(1, date(2025, 3, 1), date(2025, 3, 5), 50),
        )
        .unwrap();
        assert_eq!(inquiry.status, InquiryStatus::Pending);
        assert_eq!(
            inquiry.quoted_price_per_night,
            "450".parse::<BigDecimal>().unwrap()
        );

        // A later venue price change must not touch the stored quote.
        store.venues[0].price_per_night = "999".parse().unwrap();
        assert_eq!(
            store.inquiries[0].quoted_price_per_night,
            "450".parse::<BigDecimal>().unwrap()
        );
    }

    #[test]
    fn capacity_is_checked_before_overlap() {
        let mut store = store_with_capacity_100();
        store.seed_inquiry(1, date(2025, 3, 2), date(2025, 3, 4), InquiryStatus::Pending);

        // Request both over capacity and overlapping: capacity wins.
        let result = create_booking(
            &mut store,
            &request(1, date(2025, 3, 1), date(2025, 3, 5), 150),
        );
        assert!(matches!(result, Err(ApiError::CapacityExceeded { .. })));
    }

    // ── bookings_for_venue ────────────────────────────────

    #[test]
    fn venue_bookings_are_ascending_by_start_date_and_include_rejected() {
        let mut store = store_with_capacity_100();
        store.seed_inquiry(1, date(2025, 4, 10), date(2025, 4, 12), InquiryStatus::Pending);
        store.seed_inquiry(1, date(2025, 3, 2), date(2025, 3, 4), InquiryStatus::Rejected);
        store.seed_inquiry(1, date(2025, 3, 20), date(2025, 3, 22), InquiryStatus::Confirmed);

        let rows = bookings_for_venue(&mut store, 1).unwrap();
        let starts: Vec<NaiveDate> = rows.iter().map(|b| b.start_date).collect();
        assert_eq!(
            starts,
            vec![date(2025, 3, 2), date(2025, 3, 20), date(2025, 4, 10)]
        );
        assert_eq!(rows.len(), 3);
    }
}
