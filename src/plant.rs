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

#[cfg(feature = "nalgebra")]
use nalgebra as na;

use crate::error::ConfigError;
use crate::lit;

/// Position and velocity of the mass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlantState<F> {
    /// Displacement from the spring's rest position.
    pub position: F,
    /// Rate of change of the displacement.
    pub velocity: F,
}

impl<F: Float> Default for PlantState<F> {
    /// The mass at rest at the spring's rest position.
    fn default() -> Self {
        Self::new(F::zero(), F::zero())
    }
}

impl<F: Float> PlantState<F> {
    /// Creates a state from a position and velocity.
    pub fn new(position: F, velocity: F) -> Self {
        Self { position, velocity }
    }
}

/// A single degree of freedom mass-spring-damper:
///
/// m x'' + c x' + k x = u
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MassSpringDamper<F: Float> {
    /// Defaults to 1.0.
    mass: F,
    /// Defaults to 20.0.
    spring: F,
    /// Defaults to 2.0.
    damping: F,
}

impl<F: Float> Default for MassSpringDamper<F> {
    fn default() -> Self {
        Self {
            mass: F::one(),
            spring: lit(20.0),
            damping: lit(2.0),
        }
    }
}

impl<F: Float> MassSpringDamper<F> {
    /// Creates a plant from its mass, spring constant and damping coefficient.
    ///
    /// The spring and damping coefficients are not range-checked. Negative values make the plant
    /// physically unstable, which the simulation will faithfully reproduce.
    ///
    /// # Errors
    /// - `InvalidMass` if the mass is not positive and finite.
    /// - `InvalidParameter` if the spring or damping coefficient is NaN.
    pub fn new(mass: F, spring: F, damping: F) -> Result<Self, ConfigError> {
        let mut plant = Self::default();
        plant.set_mass(mass)?;
        plant.set_spring(spring)?;
        plant.set_damping(damping)?;
        Ok(plant)
    }

    /// Returns the mass.
    pub fn mass(&self) -> F {
        self.mass
    }

    /// Returns the spring constant.
    pub fn spring(&self) -> F {
        self.spring
    }

    /// Returns the damping coefficient.
    pub fn damping(&self) -> F {
        self.damping
    }

    /// Sets the mass.
    ///
    /// # Errors
    /// - `InvalidMass` if the mass is zero, negative or not finite.
    pub fn set_mass(&mut self, mass: F) -> Result<(), ConfigError> {
        if mass <= F::zero() || !mass.is_finite() {
            return Err(ConfigError::InvalidMass);
        }
        self.mass = mass;
        Ok(())
    }

    /// Sets the spring constant.
    pub fn set_spring(&mut self, spring: F) -> Result<(), ConfigError> {
        if spring.is_nan() {
            return Err(ConfigError::InvalidParameter("spring"));
        }
        self.spring = spring;
        Ok(())
    }

    /// Sets the damping coefficient.
    pub fn set_damping(&mut self, damping: F) -> Result<(), ConfigError> {
        if damping.is_nan() {
            return Err(ConfigError::InvalidParameter("damping"));
        }
        self.damping = damping;
        Ok(())
    }

    /// Acceleration of the mass under the applied force, from Newton's second law.
    pub fn acceleration(&self, state: PlantState<F>, force: F) -> F {
        (force - self.damping * state.velocity - self.spring * state.position) / self.mass
    }

    /// Advances the plant by one step of semi-implicit Euler integration.
    ///
    /// The acceleration is evaluated at the start of the step. Velocity is updated first, and the
    /// position is then advanced with the *updated* velocity.
    pub fn step(&self, state: PlantState<F>, force: F, dt: F) -> PlantState<F> {
        let acceleration = self.acceleration(state, force);
        let velocity = state.velocity + acceleration * dt;
        let position = state.position + velocity * dt;
        PlantState { position, velocity }
    }

    /// Implements the state-space realization of the mass-spring-damper system:
    /// ┌     ┐   ┌              ┐┌    ┐   ┌     ┐
    /// │ p'  │ = │  0     1     ││ p  │ + │ 0   │ u
    /// │ p'' │   │  -k/m  -c/m  ││ p' │   │ 1/m │
    /// └     ┘   └              ┘└    ┘   └     ┘
    #[cfg(feature = "nalgebra")]
    pub fn derivative(&self, x: na::Vector2<F>, u: F) -> na::Vector2<F>
    where
        F: na::Scalar,
    {
        let state = PlantState::from(x);
        na::Vector2::new(state.velocity, self.acceleration(state, u))
    }

    /// Output map of the state-space realization: the measured quantity is the position.
    #[cfg(feature = "nalgebra")]
    pub fn output(&self, x: na::Vector2<F>) -> F
    where
        F: na::Scalar,
    {
        x[0]
    }
}

#[cfg(feature = "nalgebra")]
impl<F: Float + na::Scalar> From<PlantState<F>> for na::Vector2<F> {
    fn from(state: PlantState<F>) -> Self {
        na::Vector2::new(state.position, state.velocity)
    }
}

#[cfg(feature = "nalgebra")]
impl<F: Float + na::Scalar> From<na::Vector2<F>> for PlantState<F> {
    fn from(x: na::Vector2<F>) -> Self {
        PlantState::new(x[0], x[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_state_is_an_equilibrium() {
        let plant = MassSpringDamper::<f64>::default();
        let state = plant.step(PlantState::default(), 0.0, 0.001);
        assert_eq!(state, PlantState::default());
    }

    #[test]
    fn test_spring_force_balances_applied_force() {
        let plant = MassSpringDamper::<f64>::default();
        // 20 N/m spring stretched by 0.5 m pushes back with exactly 10 N
        let state = PlantState::new(0.5, 0.0);
        assert_eq!(plant.acceleration(state, 10.0), 0.0);
        assert_eq!(plant.step(state, 10.0, 0.01), state);
    }
}
