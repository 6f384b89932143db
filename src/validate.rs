use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use regex::Regex;

use crate::errors::{ApiError, FieldError};
use crate::models::{BookingPayload, BookingRequest, VenueFilter, VenueQueryParams};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;
const MAX_COMPANY_NAME: usize = 255;
const MAX_MESSAGE: usize = 1000;

/// Pure validation gate for booking bodies. `today` is the submission-day
/// calendar date; the caller derives it from its clock so the engines never
/// have to. Returns either a well-typed request or every field failure at
/// once.
pub fn validate_booking(
    payload: &BookingPayload,
    today: NaiveDate,
) -> Result<BookingRequest, ApiError> {
    let mut errors = Vec::new();

    let venue_id = match payload.venue_id {
        Some(v) if v >= 1 && v <= i32::MAX as i64 => Some(v as i32),
        _ => {
            errors.push(FieldError::new("venueId", "Venue ID is required and must be a positive integer"));
            None
        }
    };

    let company_name = match payload.company_name.as_deref() {
        Some(s) if !s.is_empty() && s.chars().count() <= MAX_COMPANY_NAME => Some(s.to_owned()),
        _ => {
            errors.push(FieldError::new(
                "companyName",
                "Company name must be between 1 and 255 characters",
            ));
            None
        }
    };

    let email_re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    let email = match payload.email.as_deref() {
        Some(s) if email_re.is_match(s) => Some(s.to_owned()),
        _ => {
            errors.push(FieldError::new("email", "Invalid email address"));
            None
        }
    };

    let start_date = parse_date(payload.start_date.as_deref(), "startDate", &mut errors);
    let end_date = parse_date(payload.end_date.as_deref(), "endDate", &mut errors);

    let attendee_count = match payload.attendee_count {
        Some(v) if v >= 1 && v <= i32::MAX as i64 => Some(v as i32),
        _ => {
            errors.push(FieldError::new(
                "attendeeCount",
                "Attendee count must be positive",
            ));
            None
        }
    };

    let mut message = None;
    if let Some(s) = payload.message.as_deref() {
        if s.chars().count() > MAX_MESSAGE {
            errors.push(FieldError::new(
                "message",
                "Message must be at most 1000 characters",
            ));
        } else {
            message = Some(s.to_owned());
        }
    }

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start < today {
            errors.push(FieldError::new("startDate", "Start date cannot be in the past"));
        }
        if end <= start {
            errors.push(FieldError::new("endDate", "End date must be after start date"));
        }
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation {
            context: "Invalid request body",
            errors,
        });
    }

    Ok(BookingRequest {
        venue_id: venue_id.unwrap(),
        company_name: company_name.unwrap(),
        email: email.unwrap(),
        start_date: start_date.unwrap(),
        end_date: end_date.unwrap(),
        attendee_count: attendee_count.unwrap(),
        message,
    })
}

fn parse_date(
    raw: Option<&str>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    match raw.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d")) {
        Some(Ok(d)) => Some(d),
        _ => {
            errors.push(FieldError::new(field, "Must be a date in YYYY-MM-DD format"));
            None
        }
    }
}

/// Coerces raw venue query parameters into a bounded filter. Absent or empty
/// parameters fall back to defaults; malformed ones are field errors.
pub fn validate_filters(params: &VenueQueryParams) -> Result<VenueFilter, ApiError> {
    let mut errors = Vec::new();

    let search = params
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    let min_capacity = match present(params.min_capacity.as_deref()) {
        None => None,
        Some(raw) => match raw.parse::<i32>() {
            Ok(v) if v >= 1 => Some(v),
            _ => {
                errors.push(FieldError::new(
                    "minCapacity",
                    "minCapacity must be a positive integer",
                ));
                None
            }
        },
    };

    let max_price = match present(params.max_price.as_deref()) {
        None => None,
        Some(raw) => match raw.parse::<BigDecimal>() {
            Ok(v) if v > BigDecimal::from(0) => Some(v),
            _ => {
                errors.push(FieldError::new("maxPrice", "maxPrice must be a positive number"));
                None
            }
        },
    };

    let page = parse_paging(params.page.as_deref(), "page", DEFAULT_PAGE, &mut errors);
    let limit = parse_paging(params.limit.as_deref(), "limit", DEFAULT_LIMIT, &mut errors);
    if limit > MAX_LIMIT {
        errors.push(FieldError::new("limit", "limit must be at most 100"));
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation {
            context: "Invalid query parameters",
            errors,
        });
    }

    Ok(VenueFilter {
        search,
        min_capacity,
        max_price,
        page,
        limit,
    })
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

fn parse_paging(
    raw: Option<&str>,
    field: &'static str,
    default: i64,
    errors: &mut Vec<FieldError>,
) -> i64 {
    match present(raw) {
        None => default,
        Some(raw) => match raw.parse::<i64>() {
            Ok(v) if v >= 1 => v,
            _ => {
                errors.push(FieldError::new(
                    field,
                    "Must be a positive integer",
                ));
                default
            }
        },
    }
}
