//! Microlend Backend Library
//!
//! In-memory loan book for a microfinance platform: the loan registry,
//! filter/search view, status counters and the HTTP/WebSocket surface used
//! by the borrower and admin dashboards.

pub mod config;
pub mod error;
pub mod handlers;
pub mod latency;
pub mod loan;
pub mod middleware;
pub mod models;
pub mod notifications;
pub mod routes;
pub mod session;
pub mod state;
pub mod websocket;
