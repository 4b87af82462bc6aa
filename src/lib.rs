#![warn(missing_docs)]

//! # Mass-Spring-Damper PID Simulation
//!
//! This library simulates a discrete PID controller driving a mass-spring-damper plant toward a
//! fixed target position, and records the resulting trajectory and control effort.
//!
//! ## Features
//!
//! - A discrete PID law with rectangular integration and a backward-difference derivative:
//!   - No output saturation and, by default, an unbounded integrator.
//!   - An opt-in symmetric clamp on the integral accumulator.
//!   - Functional and stateful controller flavours.
//!
//! - A single degree of freedom mass-spring-damper plant advanced with semi-implicit Euler
//!   integration: velocity first, then position from the updated velocity.
//!
//! - A deterministic fixed-step driver:
//!   - The time grid covers the half-open interval `[0, t_end)` in `ceil(t_end / dt)` steps.
//!   - Results land in a pre-sized, index-aligned trace of time, position, velocity and force.
//!   - Configuration is validated before any step is taken, so a run never fails midway.
//!
//! ## Usage
//!
//! ### One-shot simulation
//!
//! ```rust
//! use msd_pid::config::SimulationConfigBuilder;
//! use msd_pid::sim;
//!
//! let config = SimulationConfigBuilder::default()
//!     .kp(80.0)
//!     .ki(10.0)
//!     .kd(15.0)
//!     .t_end(5.0)
//!     .build()
//!     .expect("Invalid simulation config");
//!
//! let trace = sim::run(&config);
//! assert_eq!(trace.len(), 5000);
//!
//! let final_position = trace.final_position().unwrap();
//! assert!(final_position > 0.8 && final_position < 1.0);
//! ```
//!
//! ### Stepping the loop yourself
//!
//! The functional controller and the plant take their state by value and hand back the
//! updated state, so each half of the loop can be driven and tested in isolation.
//!
//! ```rust
//! use msd_pid::pid::{FuncPidController, PidConfig, PidContext};
//! use msd_pid::plant::{MassSpringDamper, PlantState};
//!
//! let pid = FuncPidController::new(PidConfig::new(80.0, 10.0, 15.0).unwrap());
//! let plant = MassSpringDamper::new(1.0, 20.0, 2.0).unwrap();
//!
//! let mut ctx = PidContext::new();
//! let mut state = PlantState::default();
//! let dt = 0.001;
//! let target = 1.0;
//!
//! for _ in 0..100 {
//!     let (force, next_ctx) = pid.compute(ctx, target - state.position, dt);
//!     ctx = next_ctx;
//!     state = plant.step(state, force, dt);
//! }
//! assert!(state.position > 0.0);
//! ```
//!
//! ## License
//!
//! MIT
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use num_traits::Float;

/// Validated, immutable simulation parameters and their builder
pub mod config;

/// The error type shared by every parameter check
pub mod error;

/// The discrete PID controller
pub mod pid;

/// The mass-spring-damper plant
pub mod plant;

/// The fixed-step simulation driver and the trace it produces
pub mod sim;

/// The fixed time grid the simulation steps along
pub mod time;

pub use error::ConfigError;

/// Converts an `f64` literal into the working float type.
///
/// Both `f32` and `f64` represent every literal used in this crate, so the conversion never
/// falls through to NaN in practice.
pub(crate) fn lit<F: Float>(value: f64) -> F {
    F::from(value).unwrap_or_else(F::nan)
}

/// Converts a step index into the working float type.
pub(crate) fn index_to_float<F: Float>(index: usize) -> F {
    F::from(index).unwrap_or_else(F::nan)
}

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
