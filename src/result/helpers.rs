use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::errors::AppError;

/// Boxed value a panic unwound with.
pub type PanicPayload = Box<dyn Any + Send + 'static>;

/// What a wrapped operation raised: the error it returned, or a panic.
pub enum Thrown<X> {
    /// The exact `Err` value the operation returned
    Error(X),
    /// The panic payload, untouched
    Panic(PanicPayload),
}

impl<X> Thrown<X> {
    /// Text of a `&str` or `String` panic payload.
    ///
    /// `None` for returned errors and for payloads of any other type; use
    /// `downcast_ref` on the payload to reach those.
    pub fn panic_message(&self) -> Option<&str> {
        match self {
            Thrown::Panic(payload) => payload_str(payload.as_ref()),
            Thrown::Error(_) => None,
        }
    }
}

impl<X: fmt::Debug> fmt::Debug for Thrown<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thrown::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Thrown::Panic(payload) => {
                f.debug_tuple("Panic").field(&payload_str(payload.as_ref())).finish()
            }
        }
    }
}

impl<X: fmt::Display> fmt::Display for Thrown<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thrown::Error(err) => write!(f, "{}", err),
            Thrown::Panic(payload) => match payload_str(payload.as_ref()) {
                Some(message) => write!(f, "panicked: {}", message),
                None => f.write_str("panicked with a non-string payload"),
            },
        }
    }
}

/// Run `op` exactly once; map whatever it raises through `error_mapper`.
///
/// A panic reaches the mapper as [`Thrown::Panic`] carrying the original
/// payload. The process panic hook still runs first, so the default hook
/// prints the panic to stderr; install a quiet hook with
/// [`std::panic::set_hook`] where that output is unwanted.
///
/// # Examples
///
/// ```
/// use cchistory::result::{Thrown, wrap_throwable};
///
/// let ok = wrap_throwable(|| Ok::<_, String>(42), |_: Thrown<String>| "mapped");
/// assert_eq!(ok, Ok(42));
///
/// let failed = wrap_throwable(|| Err::<i32, _>("x".to_string()), |thrown| match thrown {
///     Thrown::Error(e) => e,
///     Thrown::Panic(_) => "panicked".to_string(),
/// });
/// assert_eq!(failed, Err("x".to_string()));
/// ```
pub fn wrap_throwable<T, X, E>(
    op: impl FnOnce() -> Result<T, X>,
    error_mapper: impl FnOnce(Thrown<X>) -> E,
) -> Result<T, E> {
    match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(error_mapper(Thrown::Error(err))),
        Err(payload) => Err(error_mapper(Thrown::Panic(payload))),
    }
}

/// Default mapper: classify anything raised as an unexpected error.
pub fn unexpected_error<X: fmt::Display>(thrown: Thrown<X>) -> AppError {
    AppError::unexpected(thrown)
}

/// All success values in input order, or the first failure by position.
///
/// Later failures are discarded; inspect the input before combining to see
/// all of them. An empty input is a success with an empty vector.
pub fn combine_results<T, E>(results: impl IntoIterator<Item = Result<T, E>>) -> Result<Vec<T>, E> {
    let mut values = Vec::new();
    for result in results {
        values.push(result?);
    }
    Ok(values)
}

fn payload_str(payload: &(dyn Any + Send)) -> Option<&str> {
    if let Some(message) = payload.downcast_ref::<&str>() {
        Some(*message)
    } else {
        payload.downcast_ref::<String>().map(String::as_str)
    }
}
