//! API handlers for the microlending backend

pub mod loan;
pub mod session;

pub use loan::*;
pub use session::*;
