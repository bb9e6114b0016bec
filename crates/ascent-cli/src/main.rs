// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Multi-start gain-tuning harness.
//!
//! Demonstrates the engine against the kind of collaborator it was built
//! for: a fixed-dimension vector of motion-control gains evaluated by
//! driving a (here closed-form, deterministic) episode to completion.

use ascent_engine::prelude::*;
use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

const GAIN_MIN: f64 = 0.0;
const GAIN_MAX: f64 = 4.0;
const PERTURB_SPAN: f64 = 0.25;
const EPISODE_TICKS: usize = 400;
const DT: f64 = 0.02;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT | FmtSpan::CLOSE)
        .init();
}

/// Four tunable motion-control gains: proportional, integral, derivative,
/// and velocity damping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct GainVector {
    kp: f64,
    ki: f64,
    kd: f64,
    damping: f64,
}

impl std::fmt::Display for GainVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GainVector(kp: {:.3}, ki: {:.3}, kd: {:.3}, damping: {:.3})",
            self.kp, self.ki, self.kd, self.damping
        )
    }
}

impl GainVector {
    fn sample(rng: &mut ChaCha8Rng) -> Self {
        Self {
            kp: rng.random_range(GAIN_MIN..=GAIN_MAX),
            ki: rng.random_range(GAIN_MIN..=GAIN_MAX),
            kd: rng.random_range(GAIN_MIN..=GAIN_MAX),
            damping: rng.random_range(GAIN_MIN..=GAIN_MAX),
        }
    }
}

/// Perturbs one randomly chosen gain by a bounded delta, clamped to the
/// tunable range.
struct GainPerturber {
    rng: ChaCha8Rng,
}

impl Neighborhood<GainVector> for GainPerturber {
    fn name(&self) -> &str {
        "GainPerturber"
    }
    fn neighbor(&mut self, current: &GainVector) -> GainVector {
        let delta = self.rng.random_range(-PERTURB_SPAN..=PERTURB_SPAN);
        let mut next = *current;
        match self.rng.random_range(0..4) {
            0 => next.kp = (next.kp + delta).clamp(GAIN_MIN, GAIN_MAX),
            1 => next.ki = (next.ki + delta).clamp(GAIN_MIN, GAIN_MAX),
            2 => next.kd = (next.kd + delta).clamp(GAIN_MIN, GAIN_MAX),
            _ => next.damping = (next.damping + delta).clamp(GAIN_MIN, GAIN_MAX),
        }
        next
    }
}

/// Deterministic stand-in for the real simulated episode: a point mass
/// chasing a unit step under the candidate gains. Score is the negated
/// accumulated tracking error, so higher is better and 0 is the
/// (unreachable) ideal.
struct EpisodeEvaluator;

impl Evaluator<GainVector, f64> for EpisodeEvaluator {
    fn name(&self) -> &str {
        "EpisodeEvaluator"
    }
    fn evaluate(&mut self, gains: &GainVector) -> f64 {
        let mut position = 0.0_f64;
        let mut velocity = 0.0_f64;
        let mut integral = 0.0_f64;
        let mut previous_error = 1.0_f64;
        let mut accumulated = 0.0_f64;

        for _ in 0..EPISODE_TICKS {
            let error = 1.0 - position;
            integral += error * DT;
            let derivative = (error - previous_error) / DT;
            previous_error = error;

            let force =
                gains.kp * error + gains.ki * integral + gains.kd * derivative
                    - gains.damping * velocity;
            velocity += force * DT;
            position += velocity * DT;

            accumulated += error.abs() * DT;
        }

        -accumulated
    }
}

#[derive(Serialize)]
struct TuningRecord {
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    runs: u32,
    max_steps: u64,
    evaluations: u64,
    best_fitness: f64,
    best_gains: GainVector,
}

fn main() {
    enable_tracing();

    let runs = 8_u32;
    let max_steps = 1_500_u64;

    let mut engine = SearchEngine::new(
        GainPerturber {
            rng: ChaCha8Rng::seed_from_u64(0x5EED_0001),
        },
        EpisodeEvaluator,
        Maximize,
        GreedyAcceptor::new(Maximize),
    );
    let params = OptimizeParams::new(max_steps, -0.05).with_runs(runs);

    tracing::info!(
        "Tuning 4 gains over {} run(s) of up to {} step(s) each",
        runs,
        max_steps
    );

    let start_ts = Utc::now();
    let t0 = Instant::now();

    let mut producer_rng = ChaCha8Rng::seed_from_u64(0x5EED_0002);
    let report = engine
        .optimize_report(&params, || GainVector::sample(&mut producer_rng))
        .expect("run count is non-zero");

    let runtime = t0.elapsed();
    let end_ts = Utc::now();

    tracing::info!(
        "Finished: best {} with fitness {:.4} after {} evaluation(s), runtime={:?}",
        report.solution(),
        report.fitness(),
        report.evaluations(),
        runtime
    );

    let record = TuningRecord {
        start_ts,
        end_ts,
        runtime_ms: runtime.as_millis(),
        runs,
        max_steps,
        evaluations: report.evaluations(),
        best_fitness: *report.fitness(),
        best_gains: *report.solution(),
    };

    let out_path = PathBuf::from("tuning_results.json");
    match File::create(&out_path).and_then(|mut f| {
        let json = serde_json::to_string_pretty(&record).expect("serialize record");
        f.write_all(json.as_bytes())
    }) {
        Ok(()) => {
            tracing::info!("Wrote tuning record to {}", out_path.display());
        }
        Err(e) => {
            tracing::error!("Failed to write results to {}: {}", out_path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_score_is_finite_and_nonpositive() {
        let mut ev = EpisodeEvaluator;
        let score = ev.evaluate(&GainVector {
            kp: 1.0,
            ki: 0.1,
            kd: 0.5,
            damping: 1.0,
        });
        assert!(score.is_finite());
        assert!(score <= 0.0);
    }

    #[test]
    fn perturber_moves_exactly_one_gain_within_range() {
        let mut nb = GainPerturber {
            rng: ChaCha8Rng::seed_from_u64(3),
        };
        let base = GainVector {
            kp: 2.0,
            ki: 2.0,
            kd: 2.0,
            damping: 2.0,
        };
        for _ in 0..100 {
            let next = nb.neighbor(&base);
            let changed = [
                next.kp != base.kp,
                next.ki != base.ki,
                next.kd != base.kd,
                next.damping != base.damping,
            ]
            .iter()
            .filter(|&&c| c)
            .count();
            assert!(changed <= 1);
            for g in [next.kp, next.ki, next.kd, next.damping] {
                assert!((GAIN_MIN..=GAIN_MAX).contains(&g));
            }
        }
    }

    #[test]
    fn tuned_gains_beat_a_random_start() {
        let mut producer_rng = ChaCha8Rng::seed_from_u64(17);
        let start = GainVector::sample(&mut producer_rng);
        let mut ev = EpisodeEvaluator;
        let start_score = ev.evaluate(&start);

        let mut engine = SearchEngine::new(
            GainPerturber {
                rng: ChaCha8Rng::seed_from_u64(18),
            },
            EpisodeEvaluator,
            Maximize,
            GreedyAcceptor::new(Maximize),
        );
        let params = OptimizeParams::new(300, 0.0);
        let report = engine.optimize_report(&params, || start).unwrap();
        assert!(*report.fitness() >= start_score);
    }
}
