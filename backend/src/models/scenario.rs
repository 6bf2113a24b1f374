//! Daily traffic scenarios
//!
//! A scenario names a period of the day and the normal distribution that
//! per-car queue lengths are drawn from during it.

use serde::{Deserialize, Serialize};

/// One named traffic scenario.
///
/// Scenarios are processed in the order they are listed in the config, which
/// also fixes the row order of the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Scenario label written to the `day_scenario` column
    pub name: String,

    /// Mean queue length per car
    pub mean: f64,

    /// Standard deviation of the queue length per car
    pub stddev: f64,
}

impl ScenarioConfig {
    pub fn new(name: impl Into<String>, mean: f64, stddev: f64) -> Self {
        Self {
            name: name.into(),
            mean,
            stddev,
        }
    }

    /// Weekday morning peak.
    pub fn morning_rush() -> Self {
        Self::new("Morning_rush", 40.0, 10.0)
    }

    /// Moderate lunchtime load.
    pub fn midday() -> Self {
        Self::new("Midday", 18.0, 6.0)
    }

    /// Evening commute.
    pub fn evening_peak() -> Self {
        Self::new("Evening_peak", 32.0, 9.0)
    }

    /// The three reference scenarios in their canonical order.
    pub fn default_day() -> Vec<Self> {
        vec![Self::morning_rush(), Self::midday(), Self::evening_peak()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_day_order() {
        let names: Vec<String> = ScenarioConfig::default_day()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Morning_rush", "Midday", "Evening_peak"]);
    }

    #[test]
    fn test_scenario_deserializes_from_json() {
        let json = r#"{"name": "Late_night", "mean": 3.5, "stddev": 2}"#;
        let scenario: ScenarioConfig = serde_json::from_str(json).unwrap();
        assert_eq!(scenario, ScenarioConfig::new("Late_night", 3.5, 2.0));
    }
}
