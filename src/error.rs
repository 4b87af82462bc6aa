// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use thiserror::Error;

/// Reasons a simulation, controller or plant parameter is rejected.
///
/// Every check runs when a configuration is built or a setter is called, so a simulation that
/// starts is guaranteed to run to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The mass is zero, negative or not finite.
    #[error("mass must be positive and finite")]
    InvalidMass,

    /// The integration step size is zero, negative or not finite.
    #[error("step size must be positive and finite")]
    InvalidStepSize,

    /// The simulated duration is zero, negative or not finite.
    #[error("duration must be positive and finite")]
    InvalidDuration,

    /// The duration and step size do not give a representable, non-zero number of steps.
    #[error("duration and step size give an invalid number of steps")]
    InvalidStepCount,

    /// The integral clamp is zero, negative or NaN.
    #[error("integral limit must be positive")]
    InvalidIntegralLimit,

    /// A plant coefficient, gain or target that is otherwise unconstrained is NaN.
    #[error("{0} must not be NaN")]
    InvalidParameter(&'static str),
}
