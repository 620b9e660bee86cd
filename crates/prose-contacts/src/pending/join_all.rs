// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::Mutex;

use super::{OperationError, PendingOperation};

/// Aggregates `operations` into a single operation.
///
/// The returned operation finishes once every operation has finished. It succeeds with the
/// results in submission order if all of them succeeded. Otherwise it fails with the error of the
/// lowest-indexed failed operation, but only after the remaining operations have finished too.
pub fn join_all<T, I>(operations: I) -> PendingOperation<Vec<T>>
where
    T: Clone + Send + 'static,
    I: IntoIterator<Item = PendingOperation<T>>,
{
    let operations = operations.into_iter().collect::<Vec<_>>();
    let joined = PendingOperation::new();

    if operations.is_empty() {
        joined.set_finished(vec![]);
        return joined;
    }

    let slots = Arc::new(Mutex::new(JoinState {
        results: vec![None; operations.len()],
        remaining: operations.len(),
    }));

    for (idx, operation) in operations.iter().enumerate() {
        let slots = slots.clone();
        let joined = joined.clone();

        operation.on_finished(move |result| {
            let results = {
                let mut state = slots.lock();
                state.results[idx] = Some(result.clone());
                state.remaining -= 1;

                if state.remaining > 0 {
                    return;
                }
                std::mem::take(&mut state.results)
            };

            match results
                .into_iter()
                .flatten()
                .collect::<Result<Vec<_>, OperationError>>()
            {
                Ok(values) => joined.set_finished(values),
                Err(err) => joined.set_finished_with_error(err),
            }
        });
    }

    joined
}

struct JoinState<T> {
    results: Vec<Option<Result<T, OperationError>>>,
    remaining: usize,
}
