//! Runs the closed-loop simulation and writes the trace as CSV for plotting.
//! This binary requires the `--features cli` flag to be enabled.
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

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use msd_pid::config::{SimulationConfig, SimulationConfigBuilder};
use msd_pid::sim::{self, SimulationTrace};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "msd-sim")]
#[command(about = "PID control of a mass-spring-damper system")]
struct Args {
    /// Mass (kg)
    #[arg(long, default_value_t = 1.0)]
    mass: f64,

    /// Spring constant (N/m)
    #[arg(long, default_value_t = 20.0)]
    spring: f64,

    /// Damping coefficient (N·s/m)
    #[arg(long, default_value_t = 2.0)]
    damping: f64,

    /// Proportional gain
    #[arg(long, default_value_t = 80.0)]
    kp: f64,

    /// Integral gain
    #[arg(long, default_value_t = 10.0)]
    ki: f64,

    /// Derivative gain
    #[arg(long, default_value_t = 15.0)]
    kd: f64,

    /// Symmetric clamp on the accumulated error; unbounded when absent
    #[arg(long)]
    integral_limit: Option<f64>,

    /// Step size (s)
    #[arg(long, default_value_t = 0.001)]
    dt: f64,

    /// Simulated duration (s)
    #[arg(long, default_value_t = 5.0)]
    t_end: f64,

    /// Target position (m)
    #[arg(long, default_value_t = 1.0)]
    x_target: f64,

    /// CSV output file; the trace goes to stdout when absent
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Result<SimulationConfig<f64>> {
        let mut builder = SimulationConfigBuilder::default()
            .mass(self.mass)
            .spring(self.spring)
            .damping(self.damping)
            .kp(self.kp)
            .ki(self.ki)
            .kd(self.kd)
            .dt(self.dt)
            .t_end(self.t_end)
            .x_target(self.x_target);
        if let Some(limit) = self.integral_limit {
            builder = builder.integral_limit(limit);
        }
        builder.build().context("invalid simulation parameters")
    }
}

fn write_csv<W: Write>(trace: &SimulationTrace<f64>, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["time", "position", "target", "velocity", "force"])?;

    let target = trace.target().to_string();
    for sample in trace.iter() {
        wtr.write_record([
            sample.time.to_string().as_str(),
            sample.position.to_string().as_str(),
            target.as_str(),
            sample.velocity.to_string().as_str(),
            sample.force.to_string().as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so the CSV can be piped from stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config()?;

    info!(
        steps = config.steps(),
        dt = config.dt(),
        t_end = config.t_end(),
        "Simulating PID control of mass-spring-damper"
    );

    let trace = sim::run(&config);

    info!(
        final_position = trace.final_position(),
        final_error = trace.final_error(),
        overshoot = trace.overshoot(),
        peak_force = trace.peak_force(),
        "Simulation complete"
    );

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_csv(&trace, io::BufWriter::new(file))?;
            info!("Trace written to {}", path.display());
        }
        None => write_csv(&trace, io::stdout().lock())?,
    }

    Ok(())
}
