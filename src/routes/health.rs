//! Health check endpoint for the load balancer target group.
//!
//! Reports liveness together with the identity of the instance that answered,
//! so a caller behind the load balancer can see which node served it.

use axum::{extract::State, Json};

use crate::environment::InstanceIdentity;
use crate::models::HealthStatus;
use crate::state::AppState;

/// Health check handler.
///
/// Always reports `"healthy"` if the process can respond. The timestamp is the
/// local time at which the request was handled.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let identity = InstanceIdentity::from_env(state.env.as_ref());
    Json(HealthStatus::new(state.clock.now(), identity))
}
