//! In-memory stub of the payroll `/Employees` API.
//!
//! The stub lets the contract suite run without the real system. It can
//! also reproduce the known defect where employee creation skips
//! authentication.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::{AppState, DEFAULT_STUB_SALARY, DEFAULT_STUB_USERNAME, StubSettings};
