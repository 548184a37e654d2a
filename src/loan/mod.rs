//! Loan domain module
//!
//! Contains the loan model, the in-memory registry, the filter view,
//! summary counters and the service that drives status changes.

mod filter;
mod model;
mod registry;
pub mod seed;
mod service;
mod summary;
mod transition;

pub use filter::{filter_loans, LoanFilter, StatusFilter};
pub use model::*;
pub use registry::LoanRegistry;
pub use service::LoanService;
pub use summary::{counts, portfolio, PortfolioSummary, StatusCounts};
pub use transition::TransitionPolicy;
