use serde::{Deserialize, Serialize};
use crate::schema::{booking_inquiries, venues};
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::{deserialize::{self, FromSql}, pg::{Pg, PgValue}, serialize::{self, Output, ToSql}, sql_types::Text, Insertable};

#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
#[diesel(table_name = venues)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub city: String,
    pub address: String,
    pub capacity: i32,
    pub price_per_night: BigDecimal,
    pub description: String,
    pub image_url: String,
    pub amenities: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = crate::schema::sql_types::InquiryStatus)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl InquiryStatus {
    /// Transitions an administrative tool may perform. The booking engine
    /// itself only ever writes `Pending`; both transitions out of it are
    /// terminal.
    pub fn can_transition_to(self, next: InquiryStatus) -> bool {
        matches!(
            (self, next),
            (InquiryStatus::Pending, InquiryStatus::Confirmed)
                | (InquiryStatus::Pending, InquiryStatus::Rejected)
        )
    }
}

impl ToSql<crate::schema::sql_types::InquiryStatus, Pg> for InquiryStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match *self {
            InquiryStatus::Pending => "pending",
            InquiryStatus::Confirmed => "confirmed",
            InquiryStatus::Rejected => "rejected",
        };
        <str as ToSql<Text, Pg>>::to_sql(s, out)
    }
}

impl FromSql<crate::schema::sql_types::InquiryStatus, Pg> for InquiryStatus {
    fn from_sql(bytes: PgValue) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Pg>>::from_sql(bytes)?.as_str() {
            "pending" => Ok(InquiryStatus::Pending),
            "confirmed" => Ok(InquiryStatus::Confirmed),
            "rejected" => Ok(InquiryStatus::Rejected),
            s => Err(format!("Unrecognized inquiry status: {}", s).into()),
        }
    }
}

#[derive(Debug, Clone, Queryable, Serialize)]
#[diesel(table_name = booking_inquiries)]
#[serde(rename_all = "camelCase")]
pub struct BookingInquiry {
    pub id: i32,
    pub venue_id: i32,
    pub company_name: String,
    pub email: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub attendee_count: i32,
    pub status: InquiryStatus,
    pub quoted_price_per_night: BigDecimal,
    pub message: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = booking_inquiries)]
pub struct NewBookingInquiry {
    pub venue_id: i32,
    pub company_name: String,
    pub email: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub attendee_count: i32,
    pub status: InquiryStatus,
    pub quoted_price_per_night: BigDecimal,
    pub message: Option<String>,
}

// Request/Response models for API

/// Raw booking body as received on the wire. Every field is optional so the
/// validation gate can report all missing/invalid fields at once instead of
/// failing on the first deserialization error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub venue_id: Option<i64>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub attendee_count: Option<i64>,
    pub message: Option<String>,
}

/// A booking request that has passed the validation gate: dates parsed and
/// range-checked against the submission day, counts known positive.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub venue_id: i32,
    pub company_name: String,
    pub email: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub attendee_count: i32,
    pub message: Option<String>,
}

/// Raw venue list query string, coerced and bounded by the validation gate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueQueryParams {
    pub search: Option<String>,
    pub min_capacity: Option<String>,
    pub max_price: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VenueFilter {
    pub search: Option<String>,
    pub min_capacity: Option<i32>,
    pub max_price: Option<BigDecimal>,
    pub page: i64,
    pub limit: i64,
}

impl VenueFilter {
    /// Saturating so an absurdly large `page` yields an end-of-range offset
    /// (empty page) instead of overflowing into a negative OFFSET.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct VenueListResponse {
    pub data: Vec<Venue>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
