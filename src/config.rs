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
use crate::pid::PidConfig;
use crate::plant::MassSpringDamper;
use crate::time::TimeGrid;

/// Every parameter of a closed-loop run, validated once and read-only afterwards.
///
/// Build one with `SimulationConfigBuilder`. The `Default` value is the reference run:
/// `m = 1, k = 20, c = 2, Kp = 80, Ki = 10, Kd = 15, dt = 0.001, t_end = 5, x_target = 1`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "SimulationConfigBuilder<F>",
        into = "SimulationConfigBuilder<F>",
        bound = "F: Float + serde::Serialize + serde::de::DeserializeOwned"
    )
)]
pub struct SimulationConfig<F: Float> {
    plant: MassSpringDamper<F>,
    pid: PidConfig<F>,
    grid: TimeGrid<F>,
    x_target: F,
}

impl<F: Float> Default for SimulationConfig<F> {
    fn default() -> Self {
        Self {
            plant: MassSpringDamper::default(),
            pid: PidConfig::default(),
            grid: TimeGrid::reference(),
            x_target: F::one(),
        }
    }
}

impl<F: Float> SimulationConfig<F> {
    /// Returns a builder pre-filled with this configuration's values.
    pub fn to_builder(&self) -> SimulationConfigBuilder<F> {
        SimulationConfigBuilder::from(*self)
    }

    /// Returns the plant parameters.
    pub fn plant(&self) -> &MassSpringDamper<F> {
        &self.plant
    }

    /// Returns the controller configuration.
    pub fn pid(&self) -> &PidConfig<F> {
        &self.pid
    }

    /// Returns the time grid.
    pub fn grid(&self) -> &TimeGrid<F> {
        &self.grid
    }

    /// Returns the mass.
    pub fn mass(&self) -> F {
        self.plant.mass()
    }

    /// Returns the spring constant.
    pub fn spring(&self) -> F {
        self.plant.spring()
    }

    /// Returns the damping coefficient.
    pub fn damping(&self) -> F {
        self.plant.damping()
    }

    /// Returns the proportional, integral and derivative gains.
    pub fn gains(&self) -> (F, F, F) {
        self.pid.gains()
    }

    /// Returns the step size.
    pub fn dt(&self) -> F {
        self.grid.dt()
    }

    /// Returns the simulated duration.
    pub fn t_end(&self) -> F {
        self.grid.t_end()
    }

    /// Returns the number of steps a run takes.
    pub fn steps(&self) -> usize {
        self.grid.len()
    }

    /// Returns the target position.
    pub fn x_target(&self) -> F {
        self.x_target
    }
}

/// Builder for `SimulationConfig`.
///
/// Values are only checked in `build`, so setters can be chained freely. Every unset value takes
/// the reference-run default.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct SimulationConfigBuilder<F: Float> {
    mass: F,
    spring: F,
    damping: F,
    kp: F,
    ki: F,
    kd: F,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    integral_limit: Option<F>,
    dt: F,
    t_end: F,
    x_target: F,
}

impl<F: Float> Default for SimulationConfigBuilder<F> {
    fn default() -> Self {
        SimulationConfig::default().to_builder()
    }
}

impl<F: Float> From<SimulationConfig<F>> for SimulationConfigBuilder<F> {
    fn from(config: SimulationConfig<F>) -> Self {
        let (kp, ki, kd) = config.gains();
        Self {
            mass: config.mass(),
            spring: config.spring(),
            damping: config.damping(),
            kp,
            ki,
            kd,
            integral_limit: config
                .pid
                .is_integral_limited()
                .then(|| config.pid.integral_limit()),
            dt: config.dt(),
            t_end: config.t_end(),
            x_target: config.x_target,
        }
    }
}

impl<F: Float> TryFrom<SimulationConfigBuilder<F>> for SimulationConfig<F> {
    type Error = ConfigError;

    fn try_from(builder: SimulationConfigBuilder<F>) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl<F: Float> SimulationConfigBuilder<F> {
    /// Sets the mass. Must be positive and finite.
    pub fn mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    /// Sets the spring constant.
    pub fn spring(mut self, spring: F) -> Self {
        self.spring = spring;
        self
    }

    /// Sets the damping coefficient.
    pub fn damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Sets the proportional gain.
    pub fn kp(mut self, kp: F) -> Self {
        self.kp = kp;
        self
    }

    /// Sets the integral gain.
    pub fn ki(mut self, ki: F) -> Self {
        self.ki = ki;
        self
    }

    /// Sets the derivative gain.
    pub fn kd(mut self, kd: F) -> Self {
        self.kd = kd;
        self
    }

    /// Clamps the accumulated error to `[-limit, limit]`. Unbounded unless set.
    pub fn integral_limit(mut self, limit: F) -> Self {
        self.integral_limit = Some(limit);
        self
    }

    /// Sets the step size. Must be positive and finite.
    pub fn dt(mut self, dt: F) -> Self {
        self.dt = dt;
        self
    }

    /// Sets the simulated duration. Must be positive and finite.
    pub fn t_end(mut self, t_end: F) -> Self {
        self.t_end = t_end;
        self
    }

    /// Sets the target position.
    pub fn x_target(mut self, x_target: F) -> Self {
        self.x_target = x_target;
        self
    }

    /// Validates every value and produces the configuration.
    ///
    /// # Errors
    /// The first failing check, in the order plant, controller, time grid, target.
    pub fn build(self) -> Result<SimulationConfig<F>, ConfigError> {
        let plant = MassSpringDamper::new(self.mass, self.spring, self.damping)?;

        let mut pid = PidConfig::new(self.kp, self.ki, self.kd)?;
        if let Some(limit) = self.integral_limit {
            pid.set_integral_limit(limit)?;
        }

        let grid = TimeGrid::new(self.t_end, self.dt)?;

        if self.x_target.is_nan() {
            return Err(ConfigError::InvalidParameter("x_target"));
        }

        Ok(SimulationConfig {
            plant,
            pid,
            grid,
            x_target: self.x_target,
        })
    }
}
