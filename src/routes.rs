// Route definitions

use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

use crate::handlers;
use crate::pipeline::AnalysisPipeline;

pub fn configure_routes(
    pipeline: Arc<AnalysisPipeline>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let cors = warp::cors().allow_any_origin().allow_methods(vec!["GET"]);

    // GET /health
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler)
        .with(cors);

    // WebSocket upgrade on / and /ws
    let socket = warp::path::end()
        .or(warp::path("ws").and(warp::path::end()))
        .unify()
        .and(warp::ws())
        .and(with_pipeline(pipeline))
        .map(|ws: warp::ws::Ws, pipeline: Arc<AnalysisPipeline>| {
            ws.on_upgrade(move |socket| handlers::run_session(socket, pipeline))
        });

    health.or(socket)
}

fn with_pipeline(
    pipeline: Arc<AnalysisPipeline>,
) -> impl Filter<Extract = (Arc<AnalysisPipeline>,), Error = Infallible> + Clone {
    warp::any().map(move || pipeline.clone())
}
