use crate::error::AnalyticsError;
use crate::ranking::RankingScale;
use crate::report::EntityIndicatorReport;
use configuration::IndicatorSettings;
use core_types::EntitySeries;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// The largest scale a `Decimal` can carry.
const MAX_DECIMAL_PLACES: u32 = 28;

/// A stateless calculator for deriving growth indicators from an entity's value series.
///
/// The engine only holds its settings; every report it builds is independent,
/// so one engine can be shared across any number of entities.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    scale: RankingScale,
    std_dev_decimal_places: u32,
    default_entity_name: String,
}

impl IndicatorEngine {
    pub fn new(settings: &IndicatorSettings) -> Result<Self, AnalyticsError> {
        if settings.std_dev_decimal_places > MAX_DECIMAL_PLACES {
            return Err(AnalyticsError::InvalidInput(format!(
                "std_dev_decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                settings.std_dev_decimal_places
            )));
        }
        Ok(Self {
            scale: RankingScale::from_settings(settings)?,
            std_dev_decimal_places: settings.std_dev_decimal_places,
            default_entity_name: settings.default_entity_name.clone(),
        })
    }

    /// The main entry point: derives the full indicator set for one entity.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - `series.periods` is empty, or the compound growth rate
    ///   is undefined for the baseline/ending signs.
    /// * `DivisionByZero` - any value that precedes another in the series is zero.
    /// * `InsufficientData` - only one period was supplied, so the standard
    ///   deviation has no degrees of freedom.
    pub fn evaluate(&self, series: EntitySeries) -> Result<EntityIndicatorReport, AnalyticsError> {
        let EntitySeries {
            name,
            baseline,
            periods,
        } = series;
        let entity_name = name.unwrap_or_else(|| self.default_entity_name.clone());

        let Some(&ending) = periods.last() else {
            return Err(AnalyticsError::InvalidInput(format!(
                "entity '{entity_name}' needs at least one period value"
            )));
        };
        let period_count = periods.len();

        tracing::debug!(entity = %entity_name, periods = period_count, "Evaluating indicators");

        let mut full_series = Vec::with_capacity(period_count + 1);
        full_series.push(baseline);
        full_series.extend(periods);

        let growth_rates = Self::growth_rates(&full_series)?;
        let rankings = self.scale.classify_all(&growth_rates);
        let mean_growth_rate = Self::mean(&growth_rates)?;
        let compound_growth_rate = Self::compound_growth_rate(baseline, ending, period_count)?;
        let std_dev_growth_rate =
            Self::sample_std_dev(&growth_rates, self.std_dev_decimal_places)?;

        tracing::debug!(
            entity = %entity_name,
            mean = %mean_growth_rate,
            compound = %compound_growth_rate,
            std_dev = %std_dev_growth_rate,
            "Indicators derived"
        );

        Ok(EntityIndicatorReport::new(
            entity_name,
            full_series,
            growth_rates,
            rankings,
            mean_growth_rate,
            compound_growth_rate,
            std_dev_growth_rate,
        ))
    }

    /// Percentage change from `start` to `end`: `100 * (end - start) / start`.
    pub fn growth_rate(start: Decimal, end: Decimal) -> Result<Decimal, AnalyticsError> {
        if start.is_zero() {
            return Err(AnalyticsError::DivisionByZero("growth_rate".to_string()));
        }
        end.checked_sub(start)
            .and_then(|change| change.checked_mul(Decimal::ONE_HUNDRED))
            .and_then(|scaled| scaled.checked_div(start))
            .ok_or_else(|| {
                AnalyticsError::Calculation(format!(
                    "growth rate from {start} to {end} overflows"
                ))
            })
    }

    /// One growth rate per consecutive pair of `series`, in order.
    pub fn growth_rates(series: &[Decimal]) -> Result<Vec<Decimal>, AnalyticsError> {
        if series.len() < 2 {
            return Err(AnalyticsError::InsufficientData(format!(
                "growth rates need at least 2 values, got {}",
                series.len()
            )));
        }
        series
            .windows(2)
            .map(|pair| Self::growth_rate(pair[0], pair[1]))
            .collect()
    }

    /// Arithmetic mean.
    pub fn mean(values: &[Decimal]) -> Result<Decimal, AnalyticsError> {
        if values.is_empty() {
            return Err(AnalyticsError::InsufficientData(
                "mean of an empty set".to_string(),
            ));
        }
        let sum = values
            .iter()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
            .ok_or_else(|| AnalyticsError::Calculation("sum overflows".to_string()))?;
        Ok(sum / Decimal::from(values.len()))
    }

    /// The constant per-period rate that compounds `baseline` into `ending`
    /// over `periods` periods: `100 * ((ending / baseline)^(1 / periods) - 1)`.
    ///
    /// Intermediate values play no part. With more than one period the
    /// exponent is fractional, so both endpoints must be positive.
    pub fn compound_growth_rate(
        baseline: Decimal,
        ending: Decimal,
        periods: usize,
    ) -> Result<Decimal, AnalyticsError> {
        if periods == 0 {
            return Err(AnalyticsError::InvalidInput(
                "compound growth rate needs at least one period".to_string(),
            ));
        }
        if baseline.is_zero() {
            return Err(AnalyticsError::DivisionByZero(
                "compound_growth_rate".to_string(),
            ));
        }
        if periods > 1 && (baseline <= Decimal::ZERO || ending <= Decimal::ZERO) {
            return Err(AnalyticsError::InvalidInput(format!(
                "compound growth rate over {periods} periods is undefined for baseline {baseline} and ending value {ending}"
            )));
        }

        let ratio = ending.checked_div(baseline).ok_or_else(|| {
            AnalyticsError::Calculation(format!("ratio {ending} / {baseline} overflows"))
        })?;
        let exponent = Decimal::ONE / Decimal::from(periods);
        let growth_factor = ratio.checked_powd(exponent).ok_or_else(|| {
            AnalyticsError::Calculation(format!("{ratio} raised to {exponent} overflows"))
        })?;

        (growth_factor - Decimal::ONE)
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| {
                AnalyticsError::Calculation(format!(
                    "compound growth from {baseline} to {ending} overflows"
                ))
            })
    }

    /// Sample standard deviation (`n - 1` denominator), rounded half-to-even
    /// to `decimal_places`.
    pub fn sample_std_dev(
        rates: &[Decimal],
        decimal_places: u32,
    ) -> Result<Decimal, AnalyticsError> {
        if rates.len() < 2 {
            return Err(AnalyticsError::InsufficientData(format!(
                "standard deviation needs at least 2 growth rates, got {}",
                rates.len()
            )));
        }

        let mean = Self::mean(rates)?;
        let sum_of_squares = rates
            .iter()
            .try_fold(Decimal::ZERO, |acc, r| {
                let deviation = r.checked_sub(mean)?;
                acc.checked_add(deviation.checked_mul(deviation)?)
            })
            .ok_or_else(|| {
                AnalyticsError::Calculation("sum of squared deviations overflows".to_string())
            })?;
        let variance = sum_of_squares
            .checked_div(Decimal::from(rates.len() - 1))
            .ok_or_else(|| AnalyticsError::Calculation("variance overflows".to_string()))?;

        let std_dev = variance.sqrt().ok_or_else(|| {
            AnalyticsError::Calculation(
                "Failed to calculate square root for variance".to_string(),
            )
        })?;

        Ok(std_dev.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven))
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        let settings = IndicatorSettings::default();
        Self {
            scale: RankingScale::default(),
            std_dev_decimal_places: settings.std_dev_decimal_places,
            default_entity_name: settings.default_entity_name,
        }
    }
}

impl EntityIndicatorReport {
    /// Builds a report with the default engine settings.
    ///
    /// `entity_name` falls back to the configured placeholder when `None`.
    pub fn build(
        baseline: Decimal,
        periods: Vec<Decimal>,
        entity_name: Option<&str>,
    ) -> Result<Self, AnalyticsError> {
        IndicatorEngine::default().evaluate(EntitySeries {
            name: entity_name.map(str::to_string),
            baseline,
            periods,
        })
    }
}
