// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP front end.
//!
//! A single route, `POST /`, accepts inbound requests. Transport problems
//! are answered with a bare HTTP error:
//!
//! | Problem                               | Status |
//! |---------------------------------------|--------|
//! | `Content-Type` missing or not JSON    | 400    |
//! | Body is not a JSON object             | 400    |
//! | `header.token` missing or empty       | 401    |
//! | Method other than `POST`              | 405    |
//!
//! Everything else reaches the [`Skill`] and is answered with `200` and an
//! envelope, error responses included.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::Skill;
use crate::directive::Request;
use crate::error::ValidationError;

/// Creates the router serving `skill`.
pub fn router(skill: Arc<Skill>) -> Router {
    Router::new()
        .route("/", post(directive))
        .layer(TraceLayer::new_for_http())
        .with_state(skill)
}

#[tracing::instrument(skip_all)]
async fn directive(State(skill): State<Arc<Skill>>, headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let request = match Request::from_http(content_type, &body) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(error = %err, "Rejected request");
            return rejection(&err).into_response();
        }
    };

    let envelope = skill.handle_event(&request.payload).await;
    (StatusCode::OK, Json(envelope)).into_response()
}

fn rejection(err: &ValidationError) -> (StatusCode, String) {
    let status = match err {
        ValidationError::ContentType | ValidationError::MalformedBody(_) => StatusCode::BAD_REQUEST,
        ValidationError::MissingToken => StatusCode::UNAUTHORIZED,
    };
    (status, err.to_string())
}

/// The bound HTTP server.
///
/// # Examples
///
/// ```no_run
/// use hippo_alexa::Skill;
/// use hippo_alexa::gateway::GatewayConfig;
/// use hippo_alexa::server::Server;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let skill = Skill::new(GatewayConfig::new("127.0.0.1").into_client()?);
/// let server = Server::bind("0.0.0.0:8080".parse()?, skill).await?;
///
/// server
///     .serve(async {
///         tokio::signal::ctrl_c().await.ok();
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    skill: Arc<Skill>,
}

impl Server {
    /// Binds the listener.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the address cannot be bound.
    pub async fn bind(addr: SocketAddr, skill: Skill) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            skill: Arc::new(skill),
        })
    }

    /// Returns the bound address.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the socket address cannot be queried.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves until `shutdown` completes, then drains open connections.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if serving fails.
    pub async fn serve<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = self.listener.local_addr() {
            tracing::info!(%addr, "Listening for directives");
        }

        axum::serve(self.listener, router(self.skill))
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutting down gracefully");
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Method, Request as HttpRequest};
    use tower::ServiceExt;

    use super::*;
    use crate::gateway::GatewayClient;

    fn app() -> Router {
        // Nothing listens here; none of these tests reach the daemon.
        let gateway =
            GatewayClient::with_base_url("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        router(Arc::new(Skill::new(gateway)))
    }

    fn json_post(content_type: Option<&str>, body: &str) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().method(Method::POST).uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let response = app()
            .oneshot(json_post(None, r#"{"header": {"token": "t"}, "payload": {}}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let response = app()
            .oneshot(json_post(Some("application/json"), "{"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let response = app()
            .oneshot(json_post(Some("application/json"), r#"{"payload": {}}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_is_not_allowed() {
        let request = HttpRequest::builder()
            .method(Method::GET)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn missing_directive_is_an_error_envelope() {
        let response = app()
            .oneshot(json_post(
                Some("application/json"),
                r#"{"header": {"token": "t"}, "payload": {}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["event"]["header"]["name"], "ErrorResponse");
        assert_eq!(json["event"]["payload"]["type"], "INVALID_DIRECTIVE");
    }
}
