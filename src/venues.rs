use crate::errors::ApiError;
use crate::models::{PaginationMeta, Venue, VenueFilter, VenueListResponse};
use crate::store::Store;

/// Runs a filtered, paginated venue search. A page past the end of the
/// result set comes back empty; the metadata still reports real totals.
pub fn search_venues<S: Store>(
    store: &mut S,
    filter: &VenueFilter,
) -> Result<VenueListResponse, ApiError> {
    let (data, total) = store.search_venues(filter)?;
    Ok(VenueListResponse {
        data,
        pagination: PaginationMeta {
            page: filter.page,
            limit: filter.limit,
            total,
            total_pages: total_pages(total, filter.limit),
        },
    })
}

fn total_pages(total: i64, limit: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

pub fn venue_by_id<S: Store>(store: &mut S, venue_id: i32) -> Result<Venue, ApiError> {
    store.venue_by_id(venue_id)?.ok_or(ApiError::VenueNotFound)
}

pub fn venue_by_slug<S: Store>(store: &mut S, slug: &str) -> Result<Venue, ApiError> {
    store.venue_by_slug(slug)?.ok_or(ApiError::VenueNotFound)
}
