use core_types::Ranking;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The complete indicator set for one entity.
///
/// Built by `IndicatorEngine::evaluate` and immutable afterwards. The baseline
/// and period values are stored once, as the full series, and exposed as
/// read-only views of it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityIndicatorReport {
    entity_name: String,
    full_series: Vec<Decimal>,
    growth_rates: Vec<Decimal>,
    rankings: Vec<Ranking>,
    mean_growth_rate: Decimal,
    compound_growth_rate: Decimal,
    std_dev_growth_rate: Decimal,
}

impl EntityIndicatorReport {
    pub(crate) fn new(
        entity_name: String,
        full_series: Vec<Decimal>,
        growth_rates: Vec<Decimal>,
        rankings: Vec<Ranking>,
        mean_growth_rate: Decimal,
        compound_growth_rate: Decimal,
        std_dev_growth_rate: Decimal,
    ) -> Self {
        debug_assert!(full_series.len() >= 2);
        debug_assert_eq!(growth_rates.len(), full_series.len() - 1);
        debug_assert_eq!(rankings.len(), growth_rates.len());
        Self {
            entity_name,
            full_series,
            growth_rates,
            rankings,
            mean_growth_rate,
            compound_growth_rate,
            std_dev_growth_rate,
        }
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// The period-0 measurement.
    pub fn baseline_value(&self) -> Decimal {
        self.full_series[0]
    }

    pub fn period_values(&self) -> &[Decimal] {
        &self.full_series[1..]
    }

    /// The baseline followed by every period value.
    pub fn full_series(&self) -> &[Decimal] {
        &self.full_series
    }

    /// One rate per consecutive pair in the full series, aligned with `period_values`.
    pub fn growth_rates(&self) -> &[Decimal] {
        &self.growth_rates
    }

    pub fn rankings(&self) -> &[Ranking] {
        &self.rankings
    }

    pub fn mean_growth_rate(&self) -> Decimal {
        self.mean_growth_rate
    }

    pub fn compound_growth_rate(&self) -> Decimal {
        self.compound_growth_rate
    }

    pub fn std_dev_growth_rate(&self) -> Decimal {
        self.std_dev_growth_rate
    }

    /// Returns an owned snapshot of every computed field.
    pub fn summary(&self) -> IndicatorSummary {
        IndicatorSummary {
            entity_name: self.entity_name.clone(),
            baseline_value: self.baseline_value(),
            period_values: self.period_values().to_vec(),
            full_series: self.full_series.clone(),
            growth_rates: self.growth_rates.clone(),
            rankings: self.rankings.clone(),
            mean_growth_rate: self.mean_growth_rate,
            compound_growth_rate: self.compound_growth_rate,
            std_dev_growth_rate: self.std_dev_growth_rate,
        }
    }
}

/// A plain data transfer object of an `EntityIndicatorReport`, for the
/// presentation layer. It carries values only, never formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    pub entity_name: String,
    pub baseline_value: Decimal,
    pub period_values: Vec<Decimal>,
    pub full_series: Vec<Decimal>,
    pub growth_rates: Vec<Decimal>,
    pub rankings: Vec<Ranking>,
    pub mean_growth_rate: Decimal,
    pub compound_growth_rate: Decimal,
    pub std_dev_growth_rate: Decimal,
}
