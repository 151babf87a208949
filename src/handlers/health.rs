// GET /health handler

use crate::models::HealthResponse;
use std::convert::Infallible;
use warp::http::StatusCode;

pub async fn health_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::with_status(
        warp::reply::json(&HealthResponse::ok()),
        StatusCode::OK,
    ))
}
