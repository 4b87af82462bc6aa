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

use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;

use num_traits::Float;

use crate::config::SimulationConfig;
use crate::pid::{FuncPidController, PidContext};
use crate::plant::{MassSpringDamper, PlantState};

/// One step of a run: the sample time, the plant state after the step, and the force applied
/// during it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sample<F> {
    /// Sample time at the start of the step.
    pub time: F,
    /// Position after the step.
    pub position: F,
    /// Velocity after the step.
    pub velocity: F,
    /// Control force applied during the step.
    pub force: F,
}

/// The closed loop, advanced one step per call to `next`.
///
/// Each step computes the error from the current position, asks the controller for a force,
/// and integrates the plant under that force. The iterator yields exactly
/// `config.steps()` samples and then stops; it never checks for convergence or divergence.
#[derive(Clone, Debug)]
pub struct Simulation<F: Float> {
    config: SimulationConfig<F>,
    controller: FuncPidController<F>,
    plant: MassSpringDamper<F>,
    ctx: PidContext<F>,
    state: PlantState<F>,
    step: usize,
}

impl<F: Float> Simulation<F> {
    /// Creates a simulation with the controller and plant at rest.
    pub fn new(config: SimulationConfig<F>) -> Self {
        Self {
            controller: FuncPidController::new(*config.pid()),
            plant: *config.plant(),
            ctx: PidContext::new(),
            state: PlantState::default(),
            step: 0,
            config,
        }
    }

    /// Returns the configuration being simulated.
    pub fn config(&self) -> &SimulationConfig<F> {
        &self.config
    }

    /// Returns the controller memory after the last completed step.
    pub fn context(&self) -> &PidContext<F> {
        &self.ctx
    }

    /// Returns the plant state after the last completed step.
    pub fn state(&self) -> &PlantState<F> {
        &self.state
    }

    /// Returns the number of completed steps.
    pub fn steps_taken(&self) -> usize {
        self.step
    }

    /// Returns whether every step of the grid has been taken.
    pub fn is_done(&self) -> bool {
        self.step >= self.config.steps()
    }
}

impl<F: Float> Iterator for Simulation<F> {
    type Item = Sample<F>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }

        let dt = self.config.dt();
        let time = self.config.grid().time_at(self.step);

        let error = self.config.x_target() - self.state.position;
        let (force, ctx) = self.controller.compute(self.ctx, error, dt);
        self.ctx = ctx;
        self.state = self.plant.step(self.state, force, dt);
        self.step += 1;

        Some(Sample {
            time,
            position: self.state.position,
            velocity: self.state.velocity,
            force,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.config.steps().saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

impl<F: Float> ExactSizeIterator for Simulation<F> {}

impl<F: Float> FusedIterator for Simulation<F> {}

/// Runs the closed loop over the whole time grid and records every step.
pub fn run<F: Float + Debug>(config: &SimulationConfig<F>) -> SimulationTrace<F> {
    tracing::debug!(
        steps = config.steps(),
        dt = ?config.dt(),
        t_end = ?config.t_end(),
        "starting closed-loop simulation"
    );

    let mut trace = SimulationTrace::with_capacity(config.steps(), config.x_target());
    for sample in Simulation::new(*config) {
        trace.push(sample);
    }

    tracing::debug!(
        steps = trace.len(),
        final_position = ?trace.final_position(),
        final_force = ?trace.force.last(),
        "simulation finished"
    );
    trace
}

/// Index-aligned histories of a run.
///
/// `time[i]`, `position[i]`, `velocity[i]` and `force[i]` all describe step `i`. The trace is
/// filled once by `run` and is read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationTrace<F> {
    time: Vec<F>,
    position: Vec<F>,
    velocity: Vec<F>,
    force: Vec<F>,
    target: F,
}

impl<F: Float> SimulationTrace<F> {
    fn with_capacity(capacity: usize, target: F) -> Self {
        Self {
            time: Vec::with_capacity(capacity),
            position: Vec::with_capacity(capacity),
            velocity: Vec::with_capacity(capacity),
            force: Vec::with_capacity(capacity),
            target,
        }
    }

    fn push(&mut self, sample: Sample<F>) {
        self.time.push(sample.time);
        self.position.push(sample.position);
        self.velocity.push(sample.velocity);
        self.force.push(sample.force);
    }

    /// Returns the number of recorded steps.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns whether no step was recorded.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Sample times.
    pub fn time(&self) -> &[F] {
        &self.time
    }

    /// Positions after each step.
    pub fn position(&self) -> &[F] {
        &self.position
    }

    /// Velocities after each step.
    pub fn velocity(&self) -> &[F] {
        &self.velocity
    }

    /// Control forces applied during each step.
    pub fn force(&self) -> &[F] {
        &self.force
    }

    /// The constant target position, for drawing a reference line.
    pub fn target(&self) -> F {
        self.target
    }

    /// Returns step `index` as a `Sample`.
    pub fn sample(&self, index: usize) -> Option<Sample<F>> {
        Some(Sample {
            time: *self.time.get(index)?,
            position: *self.position.get(index)?,
            velocity: *self.velocity.get(index)?,
            force: *self.force.get(index)?,
        })
    }

    /// Iterates over the recorded steps in time order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Sample<F>> + '_ {
        (0..self.len()).map(move |i| Sample {
            time: self.time[i],
            position: self.position[i],
            velocity: self.velocity[i],
            force: self.force[i],
        })
    }

    /// Position after the last step.
    pub fn final_position(&self) -> Option<F> {
        self.position.last().copied()
    }

    /// Target minus the position after the last step.
    pub fn final_error(&self) -> Option<F> {
        self.final_position().map(|position| self.target - position)
    }

    /// Largest position reached.
    pub fn peak_position(&self) -> Option<F> {
        self.position.iter().copied().reduce(F::max)
    }

    /// How far the position travelled past the target, in the direction of the target as seen
    /// from the initial rest position at zero. Zero when the target was never passed.
    pub fn overshoot(&self) -> Option<F> {
        let beyond = if self.target >= F::zero() {
            self.peak_position()? - self.target
        } else {
            self.target - self.position.iter().copied().reduce(F::min)?
        };
        Some(beyond.max(F::zero()))
    }

    /// Largest absolute control force.
    pub fn peak_force(&self) -> Option<F> {
        self.force.iter().map(|force| force.abs()).reduce(F::max)
    }
}
