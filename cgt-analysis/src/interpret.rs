//! Plain-language reading of a composite report.

use serde::Serialize;
use std::fmt;

use crate::composite::CompositeReport;
use crate::stats::round_to;
use crate::trend::TrendDirection;

/// Mean unexplained share of warming, in percent, above which evidence is strong.
pub const UNEXPLAINED_WARMING_THRESHOLD: f64 = 30.0;

/// CO2/temperature correlation above which the relationship is called very strong.
pub const VERY_STRONG_CO2_CORRELATION: f64 = 0.8;

const STRONG_RECOMMENDATION: &str = "The data strongly suggests factors beyond CO2 are driving temperature increases. Further investigation into groundwater depletion is warranted.";
const MODERATE_RECOMMENDATION: &str =
    "Continue monitoring to establish stronger statistical relationships.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceStrength {
    #[default]
    Moderate,
    Strong,
}

impl fmt::Display for EvidenceStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenceStrength::Moderate => write!(f, "moderate"),
            EvidenceStrength::Strong => write!(f, "strong"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    pub main_findings: Vec<String>,
    pub evidence_strength: EvidenceStrength,
    pub recommendation: String,
}

pub fn interpret(report: &CompositeReport) -> Interpretation {
    let mut main_findings = Vec::new();
    let mut evidence_strength = EvidenceStrength::default();

    if let Some(gap) = &report.gap_summary {
        if gap.percentage_unexplained > UNEXPLAINED_WARMING_THRESHOLD {
            main_findings.push(format!(
                "Significant unexplained warming: {}% of temperature increase cannot be attributed to CO2 alone",
                round_to(gap.percentage_unexplained, 1)
            ));
            evidence_strength = EvidenceStrength::Strong;
        }
    }

    if let Some(correlation) = &report.co2_temperature_correlation {
        if correlation.correlation > VERY_STRONG_CO2_CORRELATION {
            main_findings.push("Very strong correlation between CO2 and temperature observed".to_string());
        }
    }

    let temperature = &report.temperature_trend;
    if temperature.direction == TrendDirection::Increasing {
        main_findings.push(format!(
            "Temperature increasing at {}°C per year",
            round_to(temperature.annual_change(), 3)
        ));
    }

    let recommendation = match evidence_strength {
        EvidenceStrength::Strong => STRONG_RECOMMENDATION,
        EvidenceStrength::Moderate => MODERATE_RECOMMENDATION,
    };

    Interpretation {
        main_findings,
        evidence_strength,
        recommendation: recommendation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::GapAggregate;
    use crate::stats::PairCorrelation;
    use crate::trend::{fit_trend, TrendResult};

    fn report(
        temperature_trend: TrendResult,
        correlation: Option<f64>,
        percentage_unexplained: Option<f64>,
    ) -> CompositeReport {
        CompositeReport {
            co2_trend: TrendResult::insufficient(),
            temperature_trend,
            co2_temperature_correlation: correlation.map(|r| PairCorrelation::new(r, 0.01)),
            groundwater_impact: None,
            gap_summary: percentage_unexplained.map(|pct| GapAggregate {
                mean_unexplained_warming: 0.3,
                max_unexplained_warming: 0.5,
                percentage_unexplained: pct,
            }),
            key_findings: Vec::new(),
        }
    }

    #[test]
    fn test_defaults_to_moderate() {
        let result = interpret(&report(TrendResult::insufficient(), None, None));
        assert_eq!(result.evidence_strength, EvidenceStrength::Moderate);
        assert!(result.main_findings.is_empty());
        assert_eq!(result.recommendation, MODERATE_RECOMMENDATION);
    }

    #[test]
    fn test_large_unexplained_share_is_strong() {
        let result = interpret(&report(TrendResult::insufficient(), None, Some(34.56)));
        assert_eq!(result.evidence_strength, EvidenceStrength::Strong);
        assert_eq!(
            result.main_findings,
            vec!["Significant unexplained warming: 34.6% of temperature increase cannot be attributed to CO2 alone".to_string()]
        );
        assert!(result.recommendation.contains("groundwater depletion"));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let result = interpret(&report(TrendResult::insufficient(), Some(0.8), Some(30.0)));
        assert_eq!(result.evidence_strength, EvidenceStrength::Moderate);
        assert!(result.main_findings.is_empty());
    }

    #[test]
    fn test_correlation_and_trend_findings() {
        // 0.01 °C per month
        let trend = fit_trend(&[14.80, 14.81, 14.82, 14.83]);
        let result = interpret(&report(trend, Some(0.93), Some(12.0)));
        assert_eq!(result.evidence_strength, EvidenceStrength::Moderate);
        assert_eq!(
            result.main_findings,
            vec![
                "Very strong correlation between CO2 and temperature observed".to_string(),
                "Temperature increasing at 0.12°C per year".to_string(),
            ]
        );
    }

    #[test]
    fn test_evidence_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(EvidenceStrength::Strong).unwrap(),
            serde_json::json!("strong")
        );
        assert_eq!(EvidenceStrength::Moderate.to_string(), "moderate");
    }
}
