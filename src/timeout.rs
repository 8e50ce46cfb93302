/// Bounded waits built on a caller-supplied timer future
use std::future::Future;

use futures::future::{Either, select};
use futures::pin_mut;

/// Race `operation` against `timer`. `None` means the timer fired first.
/// When both are ready on the same poll the operation wins.
pub async fn bounded<F, T>(operation: F, timer: T) -> Option<F::Output>
where
    F: Future,
    T: Future<Output = ()>,
{
    pin_mut!(operation);
    pin_mut!(timer);

    match select(operation, timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}
