//! Atelier Server - HTTP boundary for the execution service
//!
//! Thin glue over the dispatch pipeline:
//! - `GET /exec/<workspace>/<project>[/<path...>]?command=...` runs the
//!   pipeline for the authenticated user
//! - Every outcome renders as HTTP 200 plain text: output lines on
//!   success, a single-line message on failure (deliberately preserved
//!   boundary contract)
//! - The whole route is gated on the `execution.enabled` preference
//!
//! Also carries the declarative OAuth provider parameter tables used by
//! the login flow ([`oauth`]).

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod auth;
pub mod oauth;
pub mod routes;

pub use routes::{exec_route, ServerState};
