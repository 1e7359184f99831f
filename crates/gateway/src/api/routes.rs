//! Router assembly: the route table turned into an axum `Router`

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::api::handlers::{dispatch_create, dispatch_get};
use crate::api::models::IdParams;
use crate::api::GatewayState;

/// Build the gateway router from the state's route table.
///
/// Every row is wired to the generic dispatcher with its table index;
/// method routers for the same path are merged by axum.
pub fn create_router(state: Arc<GatewayState>) -> Router {
    let mut router = Router::new();

    for (idx, spec) in state.table.routes().iter().enumerate() {
        let method_router = match spec.method {
            Method::GET => get(
                move |state: State<Arc<GatewayState>>, query: Query<IdParams>| {
                    dispatch_get(state, idx, query)
                },
            ),
            Method::POST => post(move |state: State<Arc<GatewayState>>, body: Bytes| {
                dispatch_create(state, idx, body)
            }),
            ref other => {
                tracing::warn!(method = %other, path = %spec.path, "Unsupported route method");
                continue;
            }
        };

        router = router.route(&spec.path, method_router);
    }

    router.with_state(state)
}
