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
use std::fmt;

/// Failure surfaced by [`crate::Resampler`] and the weight table builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// A caller-supplied argument violates the contract (zero-sized axis,
    /// destination smaller than 3x3, or a channel-count mismatch against a
    /// caller-supplied destination buffer).
    InvalidArgument(String),
    /// `resample` was called on an instance that already has a resample in
    /// flight. A single [`crate::Resampler`] is not reentrant.
    ConcurrentInvocation,
    /// A horizontal or vertical worker panicked or returned an error; the
    /// pass was aborted and no partially written output is returned.
    WorkerFailed(String),
    /// The caller requested cancellation and it was observed before
    /// completion.
    Cancelled,
}

impl fmt::Display for ResampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            ResampleError::ConcurrentInvocation => {
                write!(f, "resample called concurrently on the same instance")
            }
            ResampleError::WorkerFailed(msg) => write!(f, "worker failed: {msg}"),
            ResampleError::Cancelled => write!(f, "resample was cancelled"),
        }
    }
}

impl std::error::Error for ResampleError {}
