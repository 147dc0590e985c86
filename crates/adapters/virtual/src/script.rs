//! Reading scripts replayed by the virtual sensor.

use std::time::Duration;

use proxiwake_domain::time::Millis;

/// Distance reported while covered.
pub const NEAR_DISTANCE: f32 = 0.0;

/// One scripted reading, delivered `after_ms` after the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub after_ms: Millis,
    pub distance: f32,
}

impl ScriptStep {
    #[must_use]
    pub const fn new(after_ms: Millis, distance: f32) -> Self {
        Self { after_ms, distance }
    }
}

/// An ordered list of readings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    /// Names accepted by [`Script::by_name`].
    pub const NAMES: [&'static str; 3] = ["wave", "pocket", "idle"];

    #[must_use]
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }

    /// Build one of the built-in scripts for a sensor whose far readings
    /// report `max_range`.
    #[must_use]
    pub fn by_name(name: &str, max_range: f32) -> Option<Self> {
        match name {
            "wave" => Some(Self::wave(max_range)),
            "pocket" => Some(Self::pocket(max_range)),
            "idle" => Some(Self::idle(max_range)),
            _ => None,
        }
    }

    /// A hand passing over the sensor twice.
    #[must_use]
    pub fn wave(max_range: f32) -> Self {
        Self::from_pairs(&[
            (0, max_range),
            (300, NEAR_DISTANCE),
            (300, max_range),
            (300, NEAR_DISTANCE),
            (300, max_range),
        ])
    }

    /// The device sitting in a pocket for a few seconds, then taken out.
    #[must_use]
    pub fn pocket(max_range: f32) -> Self {
        Self::from_pairs(&[(0, NEAR_DISTANCE), (3500, max_range)])
    }

    /// Nothing near the sensor.
    #[must_use]
    pub fn idle(max_range: f32) -> Self {
        Self::from_pairs(&[(0, max_range), (1000, max_range), (1000, max_range)])
    }

    #[must_use]
    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Time from the first to the last reading.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.steps.iter().map(|s| s.after_ms).sum())
    }

    fn from_pairs(pairs: &[(Millis, f32)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|&(after_ms, distance)| ScriptStep::new(after_ms, distance))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_every_named_script() {
        for name in Script::NAMES {
            assert!(Script::by_name(name, 5.0).is_some(), "{name}");
        }
    }

    #[test]
    fn should_return_none_for_unknown_script() {
        assert!(Script::by_name("shake", 5.0).is_none());
    }

    #[test]
    fn should_sum_step_delays_into_duration() {
        assert_eq!(Script::wave(5.0).duration(), Duration::from_millis(1200));
        assert_eq!(Script::pocket(5.0).duration(), Duration::from_millis(3500));
    }

    #[test]
    fn should_report_far_readings_at_max_range() {
        let script = Script::pocket(8.0);
        assert!((script.steps()[1].distance - 8.0).abs() < f32::EPSILON);
    }
}
