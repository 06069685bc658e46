//! Execution route
//!
//! Orchestration order is fixed: feature flag, identity, command, then the
//! dispatch pipeline. Failures render as a single plain-text line with
//! status 200; only the transport's own errors produce other statuses.

use crate::auth::remote_user;
use atelier_core::{Command, ExecError, ExecRequest, Preferences, RequestPath, EXECUTION_ENABLED};
use atelier_dispatch::Dispatcher;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

/// Shared per-process server state
#[derive(Debug)]
pub struct ServerState {
    /// Server preferences (feature flags, OAuth keys)
    pub prefs: Preferences,
    /// The dispatch pipeline
    pub dispatcher: Dispatcher,
}

/// Build the `GET /exec/...` route
pub fn exec_route(
    state: Arc<ServerState>,
) -> impl Filter<Extract = (String,), Error = warp::Rejection> + Clone {
    warp::path("exec")
        .and(warp::get())
        .and(warp::path::tail())
        .and(warp::query::<HashMap<String, String>>())
        .and(warp::header::optional::<String>("authorization"))
        .and_then(
            move |tail: warp::path::Tail,
                  query: HashMap<String, String>,
                  authorization: Option<String>| {
                let state = state.clone();
                async move {
                    Ok::<_, Infallible>(handle(&state, &tail, &query, authorization.as_deref()).await)
                }
            },
        )
}

async fn handle(
    state: &ServerState,
    tail: &warp::path::Tail,
    query: &HashMap<String, String>,
    authorization: Option<&str>,
) -> String {
    if !state.prefs.get_bool(EXECUTION_ENABLED) {
        return format!("{}\n", ExecError::FeatureDisabled);
    }

    let Some(user) = authorization.and_then(remote_user) else {
        return "Authentication required.\n".to_string();
    };
    let Some(command) = query
        .get("command")
        .and_then(|raw| Command::parse(raw))
    else {
        return "Missing command parameter.\n".to_string();
    };

    let path = RequestPath::parse(tail.as_str());
    tracing::debug!(%user, %command, %path, "execution request");

    let request = ExecRequest::new(command, user, path);
    match state.dispatcher.dispatch(&request).await {
        Ok(lines) => {
            let mut body = lines.join("\n");
            body.push('\n');
            body
        }
        Err(error) => {
            if error.is_unexpected() {
                tracing::error!(%error, path = %request.path, "execution request failed");
            }
            format!("{error}\n")
        }
    }
}
