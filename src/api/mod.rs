//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for calculating, approving,
//! paying and deleting salary records, and the account seam used by the
//! ledger payment path.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ApproveRequest, CalculateRequest, DeleteRequest, PayRequest, PeriodQuery, PreviewRequest,
    RegisterAccountRequest,
};
pub use response::{ApiError, BatchResponse};
pub use state::AppState;
