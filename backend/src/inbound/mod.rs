//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! [`http`] serves the JSON API under `/api`; [`web`] renders the
//! server-side pages and owns the cookie session.

pub mod http;
pub mod web;
