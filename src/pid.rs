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

use num_traits::Float;

use crate::error::ConfigError;
use crate::lit;

/// Gains and integrator settings of the PID controller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PidConfig<F: Float> {
    /// Proportional gain coefficient.
    /// Defaults to 80.0.
    kp: F,

    /// Integral gain coefficient, applied to the accumulated `error * dt`.
    /// Defaults to 10.0.
    ki: F,

    /// Derivative gain coefficient, applied to the backward difference `(error - last_error) / dt`.
    /// Defaults to 15.0.
    kd: F,

    /// Symmetric bound on the accumulated error.
    /// Defaults to positive infinity, i.e. the integrator is unbounded.
    integral_limit: F,
}

impl<F: Float> Default for PidConfig<F> {
    fn default() -> Self {
        PidConfig {
            kp: lit(80.0),
            ki: lit(10.0),
            kd: lit(15.0),
            integral_limit: F::infinity(),
        }
    }
}

impl<F: Float> PidConfig<F> {
    /// Creates a configuration with the given gains and an unbounded integrator.
    ///
    /// Gains may be zero or negative; only NaN is rejected.
    pub fn new(kp: F, ki: F, kd: F) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.set_gains(kp, ki, kd)?;
        Ok(config)
    }

    /// Returns the proportional gain.
    pub fn kp(&self) -> F {
        self.kp
    }

    /// Returns the integral gain.
    pub fn ki(&self) -> F {
        self.ki
    }

    /// Returns the derivative gain.
    pub fn kd(&self) -> F {
        self.kd
    }

    /// Convenience method that returns the proportional, integral, and derivative gains together as a tuple.
    pub fn gains(&self) -> (F, F, F) {
        (self.kp, self.ki, self.kd)
    }

    /// Returns the bound on the accumulated error. Infinite when the integrator is unbounded.
    pub fn integral_limit(&self) -> F {
        self.integral_limit
    }

    /// Returns whether the integral accumulator is clamped.
    pub fn is_integral_limited(&self) -> bool {
        self.integral_limit.is_finite()
    }

    /// Sets the proportional gain.
    ///
    /// # Errors
    /// - `InvalidParameter` if the gain is NaN.
    pub fn set_kp(&mut self, kp: F) -> Result<(), ConfigError> {
        if kp.is_nan() {
            return Err(ConfigError::InvalidParameter("kp"));
        }
        self.kp = kp;
        Ok(())
    }

    /// Sets the integral gain.
    ///
    /// # Errors
    /// - `InvalidParameter` if the gain is NaN.
    pub fn set_ki(&mut self, ki: F) -> Result<(), ConfigError> {
        if ki.is_nan() {
            return Err(ConfigError::InvalidParameter("ki"));
        }
        self.ki = ki;
        Ok(())
    }

    /// Sets the derivative gain.
    ///
    /// # Errors
    /// - `InvalidParameter` if the gain is NaN.
    pub fn set_kd(&mut self, kd: F) -> Result<(), ConfigError> {
        if kd.is_nan() {
            return Err(ConfigError::InvalidParameter("kd"));
        }
        self.kd = kd;
        Ok(())
    }

    /// Convenience method to set the proportional, integral, and derivative gains together.
    ///
    /// All three gains are checked before any of them is written.
    pub fn set_gains(&mut self, kp: F, ki: F, kd: F) -> Result<(), ConfigError> {
        let mut staged = *self;
        staged.set_kp(kp)?;
        staged.set_ki(ki)?;
        staged.set_kd(kd)?;
        *self = staged;
        Ok(())
    }

    /// Bounds the accumulated error to `[-limit, limit]`.
    ///
    /// Passing positive infinity removes the bound.
    ///
    /// # Errors
    /// - `InvalidIntegralLimit` if the limit is zero, negative or NaN.
    pub fn set_integral_limit(&mut self, limit: F) -> Result<(), ConfigError> {
        if limit.is_nan() || limit <= F::zero() {
            return Err(ConfigError::InvalidIntegralLimit);
        }
        self.integral_limit = limit;
        Ok(())
    }

    /// Removes the bound on the accumulated error.
    pub fn clear_integral_limit(&mut self) {
        self.integral_limit = F::infinity();
    }
}

/// The memory a PID controller carries from one step to the next.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PidContext<F: Float> {
    integral_error: F,
    previous_error: F,
}

impl<F: Float> Default for PidContext<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> PidContext<F> {
    /// Creates a context with zero accumulated error and zero previous error.
    ///
    /// Because the previous error starts at zero, the first derivative term is `error / dt`.
    pub fn new() -> Self {
        Self {
            integral_error: F::zero(),
            previous_error: F::zero(),
        }
    }

    /// Returns the running sum of `error * dt`.
    pub fn integral_error(&self) -> F {
        self.integral_error
    }

    /// Returns the error seen on the last call to `compute`.
    pub fn previous_error(&self) -> F {
        self.previous_error
    }
}

/// A functional implementation of a PID (Proportional-Integral-Derivative) controller.
///
/// The controller holds only its configuration. A context object is passed in and returned with
/// each call to `compute`, which makes `compute` a pure function of its arguments.
#[derive(Copy, Clone, Debug)]
pub struct FuncPidController<F: Float> {
    config: PidConfig<F>,
}

/// A stateful implementation of a PID (Proportional-Integral-Derivative) controller.
///
/// This controller keeps its own `PidContext` and forwards to `FuncPidController`.
#[derive(Copy, Clone, Debug)]
pub struct PidController<F: Float> {
    ctx: PidContext<F>,
    controller: FuncPidController<F>,
}

impl<F: Float> FuncPidController<F> {
    /// Creates a controller from a configuration.
    pub fn new(config: PidConfig<F>) -> Self {
        FuncPidController { config }
    }

    /// Returns the controller configuration.
    pub fn config(&self) -> &PidConfig<F> {
        &self.config
    }

    /// Returns the controller configuration for in-place tuning.
    pub fn config_mut(&mut self) -> &mut PidConfig<F> {
        &mut self.config
    }

    /// Computes the control force for one step.
    ///
    /// # Arguments
    /// - `ctx`: The controller memory after the previous step.
    /// - `error`: Setpoint minus measurement for this step.
    /// - `dt`: The step size. Must be positive; the simulation config guarantees this.
    ///
    /// # Returns
    /// The unsaturated force and the context to pass to the next call.
    pub fn compute(&self, mut ctx: PidContext<F>, error: F, dt: F) -> (F, PidContext<F>) {
        ctx.integral_error = self.integrate(ctx.integral_error, error, dt);

        let derivative_error = (error - ctx.previous_error) / dt;

        let force = self.config.kp * error
            + self.config.ki * ctx.integral_error
            + self.config.kd * derivative_error;

        ctx.previous_error = error;
        (force, ctx)
    }

    fn integrate(&self, integral_error: F, error: F, dt: F) -> F {
        let accumulated = integral_error + error * dt;
        // Infinite bounds leave finite and NaN values untouched
        let limit = self.config.integral_limit;
        num_traits::clamp(accumulated, -limit, limit)
    }
}

impl<F: Float> PidController<F> {
    /// Creates a controller with a zeroed context.
    pub fn new(config: PidConfig<F>) -> Self {
        Self {
            ctx: PidContext::new(),
            controller: FuncPidController::new(config),
        }
    }

    /// Returns the controller configuration.
    pub fn config(&self) -> &PidConfig<F> {
        &self.controller.config
    }

    /// Returns the controller configuration for in-place tuning.
    pub fn config_mut(&mut self) -> &mut PidConfig<F> {
        &mut self.controller.config
    }

    /// Returns the controller memory.
    pub fn context(&self) -> &PidContext<F> {
        &self.ctx
    }

    /// Computes the control force for one step and advances the internal context.
    pub fn compute(&mut self, error: F, dt: F) -> F {
        let (force, ctx) = self.controller.compute(self.ctx, error, dt);
        self.ctx = ctx;
        force
    }

    /// Forgets the accumulated and previous error.
    pub fn reset(&mut self) {
        self.ctx = PidContext::new();
    }
}
