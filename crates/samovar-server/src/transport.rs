//! HTTP transport for the dispatcher.
//!
//! `POST /mcp` takes a JSON action envelope and always answers 200 for
//! dispatcher-level outcomes, including the dispatcher's own error
//! responses. 500 is reserved for transport failures such as a malformed
//! request body. `GET /health` is a fixed liveness payload.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::dispatch::{ActionRequest, Dispatcher};

/// Build the route tree: `POST /mcp` and `GET /health`.
pub fn routes(
    dispatcher: Arc<Dispatcher>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let mcp = warp::post()
        .and(warp::path("mcp"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_dispatcher(dispatcher))
        .and_then(handle_action);

    let health = warp::get()
        .and(warp::path("health"))
        .and(warp::path::end())
        .map(|| warp::reply::json(&serde_json::json!({"status": "ok"})));

    mcp.or(health).recover(handle_rejection)
}

/// Bind and run the transport until the process exits.
pub async fn serve(dispatcher: Arc<Dispatcher>, addr: SocketAddr) {
    warp::serve(routes(dispatcher)).run(addr).await
}

fn with_dispatcher(
    dispatcher: Arc<Dispatcher>,
) -> impl Filter<Extract = (Arc<Dispatcher>,), Error = Infallible> + Clone {
    warp::any().map(move || dispatcher.clone())
}

async fn handle_action(
    request: ActionRequest,
    dispatcher: Arc<Dispatcher>,
) -> Result<impl Reply, Rejection> {
    let response = dispatcher.handle(request).await;
    Ok(warp::reply::json(&response))
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed".to_string(),
        )
    } else {
        tracing::error!(?err, "Unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_string(),
        )
    };

    let body = warp::reply::json(&serde_json::json!({ "error": message }));
    Ok(warp::reply::with_status(body, status))
}
