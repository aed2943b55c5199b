use rand::Rng;
use serde::Serialize;

/// Closed-form curve plus bounded uniform jitter:
/// `base + amplitude * sin(frequency * i) + U[0, noise)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesShape {
    pub base: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub noise: f64,
}

pub const PERFORMANCE_SHAPE: SeriesShape = SeriesShape {
    base: 120_000.0,
    amplitude: 10_000.0,
    frequency: 0.2,
    noise: 5_000.0,
};

pub const RISK_SHAPE: SeriesShape = SeriesShape {
    base: 30.0,
    amplitude: 15.0,
    frequency: 0.3,
    noise: 10.0,
};

impl SeriesShape {
    pub fn curve(&self, index: usize) -> f64 {
        self.base + self.amplitude * (index as f64 * self.frequency).sin()
    }

    pub fn sample<R: Rng>(&self, index: usize, rng: &mut R) -> f64 {
        let jitter = if self.noise > 0.0 {
            rng.gen_range(0.0..self.noise)
        } else {
            0.0
        };
        self.curve(index) + jitter
    }

    /// Inclusive envelope every sample falls into.
    pub fn bounds(&self) -> (f64, f64) {
        (
            self.base - self.amplitude,
            self.base + self.amplitude + self.noise,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PerformancePoint {
    pub day: u32,
    pub value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RiskPoint {
    pub time: u32,
    pub risk: f64,
}

/// Portfolio value per day, days numbered from 1.
pub fn generate_performance_series<R: Rng>(len: usize, rng: &mut R) -> Vec<PerformancePoint> {
    (0..len)
        .map(|i| PerformancePoint {
            day: i as u32 + 1,
            value: PERFORMANCE_SHAPE.sample(i, rng),
        })
        .collect()
}

/// Risk score per time step, steps numbered from 0.
pub fn generate_risk_series<R: Rng>(len: usize, rng: &mut R) -> Vec<RiskPoint> {
    (0..len)
        .map(|i| RiskPoint {
            time: i as u32,
            risk: RISK_SHAPE.sample(i, rng),
        })
        .collect()
}

pub fn performance_chart_points(series: &[PerformancePoint]) -> Vec<(f64, f64)> {
    series.iter().map(|p| (p.day as f64, p.value)).collect()
}

pub fn risk_chart_points(series: &[RiskPoint]) -> Vec<(f64, f64)> {
    series.iter().map(|p| (p.time as f64, p.risk)).collect()
}
