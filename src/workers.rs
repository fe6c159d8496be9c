/*
 * Copyright (c) Radzivon Bartoshyk, 10/2024. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::error::ResampleError;
use std::num::NonZeroUsize;
use std::thread;

/// Default worker count: the host's available parallelism, falling back to 1
/// if the platform can't report it.
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Runs one `work` invocation per item, each on its own scoped thread, joins
/// every thread regardless of outcome, then surfaces the first failure.
///
/// A worker panic is converted into [`ResampleError::WorkerFailed`] rather
/// than being propagated as a raw panic payload or silently swallowed, so a
/// failure in one striped worker deterministically aborts the pass for the
/// caller.
pub(crate) fn run_parallel<T, F>(items: Vec<T>, work: F) -> Result<(), ResampleError>
where
    T: Send,
    F: Fn(T) -> Result<(), ResampleError> + Sync,
{
    let results: Vec<Result<(), ResampleError>> = thread::scope(|scope| {
        let handles: Vec<_> = items
            .into_iter()
            .map(|item| {
                let work = &work;
                scope.spawn(move || work(item))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    Err(ResampleError::WorkerFailed(
                        "worker thread panicked".to_string(),
                    ))
                })
            })
            .collect()
    });

    for result in results {
        result?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_every_item_exactly_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let counter = AtomicUsize::new(0);
        let items: Vec<usize> = (0..37).collect();
        run_parallel(items, |_| {
            counter.fetch_add(1, Ordering::Relaxed);
            Ok(())
        })
        .unwrap();
        assert_eq!(counter.load(Ordering::Relaxed), 37);
    }

    #[test]
    fn first_error_is_surfaced() {
        let items: Vec<usize> = (0..8).collect();
        let result = run_parallel(items, |i| {
            if i == 3 {
                Err(ResampleError::WorkerFailed("boom".to_string()))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(ResampleError::WorkerFailed(_))));
    }

    #[test]
    fn panic_is_converted_to_worker_failed() {
        let items: Vec<usize> = (0..4).collect();
        let result = run_parallel(items, |i| -> Result<(), ResampleError> {
            if i == 2 {
                panic!("deliberate test panic");
            }
            Ok(())
        });
        assert!(matches!(result, Err(ResampleError::WorkerFailed(_))));
    }

    #[test]
    fn default_worker_count_is_at_least_one() {
        assert!(default_worker_count() >= 1);
    }
}
