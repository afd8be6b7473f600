//! Async counterpart of [`wrap_throwable`](super::wrap_throwable).
//!
//! Runtime-agnostic: the wrapped future is polled inside
//! `std::panic::catch_unwind`, so a panic on any poll (including the call
//! that creates the future) settles the outcome instead of unwinding into
//! the executor.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use super::helpers::{PanicPayload, Thrown};

struct CatchUnwind<F> {
    inner: Pin<Box<F>>,
}

impl<F: Future> Future for CatchUnwind<F> {
    type Output = Result<F::Output, PanicPayload>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = self.inner.as_mut();
        match panic::catch_unwind(AssertUnwindSafe(|| inner.poll(cx))) {
            Ok(Poll::Pending) => Poll::Pending,
            Ok(Poll::Ready(output)) => Poll::Ready(Ok(output)),
            Err(payload) => Poll::Ready(Err(payload)),
        }
    }
}

/// Await `op()` once; map its error or panic through `error_mapper`.
///
/// Timeouts and cancellation belong to the caller: wrap `op`'s future in
/// whatever deadline the runtime offers before handing it over.
pub async fn wrap_async_throwable<T, X, E, F, Fut>(
    op: F,
    error_mapper: impl FnOnce(Thrown<X>) -> E,
) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, X>>,
{
    let settled = CatchUnwind { inner: Box::pin(async move { op().await }) }.await;
    match settled {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(error_mapper(Thrown::Error(err))),
        Err(payload) => Err(error_mapper(Thrown::Panic(payload))),
    }
}
