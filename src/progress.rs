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
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Monotone counter driving progress notifications. Incremented once per
/// source row (horizontal pass) and once per destination column (vertical
/// pass); total is `src_height + dst_width`.
pub(crate) struct ProgressCounter {
    count: AtomicU64,
    total: u64,
}

impl ProgressCounter {
    pub(crate) fn new(total: u64) -> ProgressCounter {
        ProgressCounter {
            count: AtomicU64::new(0),
            total: total.max(1),
        }
    }

    #[inline]
    pub(crate) fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn fraction(&self) -> f32 {
        (self.count.load(Ordering::Relaxed) as f32 / self.total as f32).min(1.0)
    }
}

/// Condvar-backed stop flag so cancelling the sampler does not have to wait
/// out its poll interval.
#[derive(Default)]
pub(crate) struct StopSignal {
    stopped: Mutex<bool>,
    condvar: Condvar,
}

impl StopSignal {
    pub(crate) fn new() -> StopSignal {
        StopSignal::default()
    }

    pub(crate) fn signal(&self) {
        let mut stopped = self.stopped.lock().unwrap();
        *stopped = true;
        self.condvar.notify_all();
    }

    /// Waits up to `POLL_INTERVAL` or until `signal` is called, whichever
    /// comes first. Returns `true` if a stop was observed.
    fn wait_for_poll_or_stop(&self) -> bool {
        let stopped = self.stopped.lock().unwrap();
        if *stopped {
            return true;
        }
        let (stopped, _timeout) = self
            .condvar
            .wait_timeout(stopped, POLL_INTERVAL)
            .unwrap();
        *stopped
    }
}

/// Invokes `listener` with `fraction`, catching and swallowing any panic the
/// listener raises: an observability failure must never break the resample
/// itself, though the caught panic is logged.
pub(crate) fn notify_safely(listener: &(dyn Fn(f32) + Sync), fraction: f32) {
    let result = catch_unwind(AssertUnwindSafe(|| listener(fraction)));
    if result.is_err() {
        log::warn!("progress listener panicked; ignoring");
    }
}

/// Polls `counter` every ~10ms and calls `listener` whenever the observed
/// fraction changed, until `stop` is signalled. Intended to run on a scoped
/// thread alongside the horizontal/vertical passes.
pub(crate) fn run_sampler(
    counter: &ProgressCounter,
    stop: &StopSignal,
    listener: &(dyn Fn(f32) + Sync),
) {
    log::trace!("progress sampler started");
    let mut last_reported = -1.0f32;
    loop {
        let fraction = counter.fraction();
        if fraction != last_reported {
            notify_safely(listener, fraction);
            last_reported = fraction;
        }
        if stop.wait_for_poll_or_stop() {
            break;
        }
    }
    log::trace!("progress sampler stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn fraction_is_monotone_and_capped_at_one() {
        let counter = ProgressCounter::new(10);
        assert_eq!(counter.fraction(), 0.0);
        for _ in 0..15 {
            counter.increment();
        }
        assert_eq!(counter.fraction(), 1.0);
    }

    #[test]
    fn sampler_observes_prompt_cancellation() {
        let counter = ProgressCounter::new(100);
        let stop = StopSignal::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        thread::scope(|scope| {
            let handle = scope.spawn(|| {
                run_sampler(&counter, &stop, &move |_f| {
                    calls_clone.fetch_add(1, Ordering::Relaxed);
                });
            });
            // Signal stop almost immediately; the sampler must not block for
            // a full poll interval before exiting.
            let start = std::time::Instant::now();
            stop.signal();
            handle.join().unwrap();
            assert!(start.elapsed() < Duration::from_millis(200));
        });

        assert!(calls.load(Ordering::Relaxed) >= 1);
    }

    #[test]
    fn panicking_listener_is_swallowed() {
        notify_safely(&|_f| panic!("listener exploded"), 0.5);
    }
}
