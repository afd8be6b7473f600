//! Fallible operations without uncontrolled panics.
//!
//! [`Outcome`] is `std::result::Result`; querying (`is_ok`), extraction
//! (`unwrap`, test code only), `map` and `map_err` are the std methods. This
//! module adds the boundary helpers:
//!
//! - [`wrap_throwable`] / [`wrap_async_throwable`] - run an operation once and
//!   turn its error *or panic* into a mapped failure
//! - [`combine_results`] - all successes in order, or the first failure
//! - [`logging`] - record a failure to an injected sink and pass it on

pub mod future;
pub mod helpers;
pub mod logging;

pub use future::wrap_async_throwable;
pub use helpers::{PanicPayload, Thrown, combine_results, unexpected_error, wrap_throwable};
pub use logging::{ErrorLogger, ErrorSink, MemorySink, TracingSink, log_error};

use crate::errors::AppError;

/// Success with a value, or failure with an error.
pub type Outcome<T, E = AppError> = std::result::Result<T, E>;
