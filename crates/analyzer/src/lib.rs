use configuration::VolatilitySettings;
use core_types::{DispersionTable, Stability};
use rust_decimal::Decimal;
use serde::Serialize;

/// One entity holding the minimum dispersion, with its qualitative label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StabilityVerdict {
    pub entity_name: String,
    pub dispersion: Decimal,
    pub stability: Stability,
}

/// The result of a volatility comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "verdicts", rename_all = "snake_case")]
pub enum VolatilityOutcome {
    /// The comparison was given no entities. This is a valid, empty run.
    NoData,
    /// Every entity sharing the minimum dispersion, in table order.
    Ranked(Vec<StabilityVerdict>),
}

impl VolatilityOutcome {
    pub fn verdicts(&self) -> &[StabilityVerdict] {
        match self {
            VolatilityOutcome::NoData => &[],
            VolatilityOutcome::Ranked(verdicts) => verdicts,
        }
    }
}

/// Identifies the least volatile entities of a run.
#[derive(Debug, Clone)]
pub struct VolatilityComparator {
    stability_threshold: Decimal,
}

impl VolatilityComparator {
    pub fn new(settings: &VolatilitySettings) -> Self {
        Self {
            stability_threshold: settings.stability_threshold,
        }
    }

    /// Finds every entity whose dispersion equals the minimum of the table.
    ///
    /// Ties are all reported, never collapsed to a single winner. The minimum
    /// is labelled `MostStable` when strictly below the stability threshold
    /// and `LeastRisky` otherwise; every holder gets the same label.
    pub fn compare(&self, dispersion_by_entity: &DispersionTable) -> VolatilityOutcome {
        let Some(minimum) = dispersion_by_entity.iter().map(|(_, value)| value).min() else {
            tracing::debug!("Volatility comparison requested with no entities.");
            return VolatilityOutcome::NoData;
        };

        let stability = if minimum < self.stability_threshold {
            Stability::MostStable
        } else {
            Stability::LeastRisky
        };

        let verdicts: Vec<_> = dispersion_by_entity
            .iter()
            .filter(|(_, value)| *value == minimum)
            .map(|(name, value)| StabilityVerdict {
                entity_name: name.to_string(),
                dispersion: value,
                stability,
            })
            .collect();

        tracing::debug!(
            minimum = %minimum,
            holders = verdicts.len(),
            label = %stability,
            "Volatility comparison complete"
        );

        VolatilityOutcome::Ranked(verdicts)
    }
}

impl Default for VolatilityComparator {
    fn default() -> Self {
        Self::new(&VolatilitySettings::default())
    }
}
