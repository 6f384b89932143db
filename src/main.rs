#[macro_use]
extern crate diesel;

use actix_web::{error, get, middleware, post, web, App, HttpResponse, HttpServer};
use chrono::Utc;
use diesel::{prelude::*, r2d2};

mod actions;
mod bookings;
mod errors;
mod models;
mod schema;
mod store;
mod validate;
mod venues;

use errors::ApiError;
use models::{DateRange, InquiryStatus};

type DbPool = r2d2::Pool<r2d2::ConnectionManager<PgConnection>>;

#[get("/venues")]
async fn list_venues(
    pool: web::Data<DbPool>,
    query: web::Query<models::VenueQueryParams>,
) -> Result<HttpResponse, ApiError> {
    let filter = validate::validate_filters(&query.into_inner())?;

    let result = web::block(move || {
        let mut conn = pool.get()?;
        venues::search_venues(&mut *conn, &filter)
    })
    .await??;

    Ok(HttpResponse::Ok().json(result))
}

#[get("/venues/{slug}")]
async fn get_venue(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let slug = path.into_inner();

    let venue = web::block(move || {
        let mut conn = pool.get()?;
        venues::venue_by_slug(&mut *conn, &slug)
    })
    .await??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": venue })))
}

#[get("/venues/{slug}/bookings")]
async fn get_venue_bookings(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let slug = path.into_inner();

    let booked_dates = web::block(move || -> Result<Vec<DateRange>, ApiError> {
        let mut conn = pool.get()?;
        let venue = venues::venue_by_slug(&mut *conn, &slug)?;
        let inquiries = bookings::bookings_for_venue(&mut *conn, venue.id)?;

        // Public availability listing: rejected inquiries do not block dates,
        // and only the date ranges are exposed.
        Ok(inquiries
            .into_iter()
            .filter(|b| b.status != InquiryStatus::Rejected)
            .map(|b| DateRange {
                start_date: b.start_date,
                end_date: b.end_date,
            })
            .collect())
    })
    .await??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": booked_dates })))
}

#[post("/bookings")]
async fn create_booking(
    pool: web::Data<DbPool>,
    body: web::Json<models::BookingPayload>,
) -> Result<HttpResponse, ApiError> {
    // "Not in the past" is judged against the UTC calendar day at submission
    // time, here at the boundary; the engine never reads a clock.
    let today = Utc::now().date_naive();
    let request = validate::validate_booking(&body.into_inner(), today)?;

    let inquiry = web::block(move || {
        let mut conn = pool.get()?;
        bookings::create_booking(&mut *conn, &request)
    })
    .await??;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "data": inquiry,
        "message": "Booking inquiry submitted successfully"
    })))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // initialize DB pool outside of `HttpServer::new` so that it is shared across all workers
    let pool = initialize_db_pool();

    log::info!("starting HTTP server at http://localhost:8080");

    HttpServer::new(move || {
        App::new()
            // add DB pool handle to app data; enables use of `web::Data<DbPool>` extractor
            .app_data(web::Data::new(pool.clone()))
            .wrap(middleware::Logger::default())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let detail = err.to_string();
                let response = HttpResponse::BadRequest().json(serde_json::json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": "Invalid request body",
                        "details": detail,
                    }
                }));
                error::InternalError::from_response(err, response).into()
            }))
            .service(list_venues)
            .service(get_venue)
            .service(get_venue_bookings)
            .service(create_booking)
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}

fn initialize_db_pool() -> DbPool {
    let conn_spec = std::env::var("DATABASE_URL").expect("DATABASE_URL should be set");
    let manager = r2d2::ConnectionManager::<PgConnection>::new(conn_spec);
    r2d2::Pool::builder()
        .build(manager)
        .expect("DATABASE_URL should be a valid Postgres connection string")
}
