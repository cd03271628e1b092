use crate::error::AnalyticsError;
use configuration::IndicatorSettings;
use core_types::Ranking;
use rust_decimal::Decimal;

/// An ordered table of `(threshold, label)` tiers used to rank a growth rate.
///
/// A rate takes the label of the first tier whose threshold it strictly
/// exceeds, so a rate sitting exactly on a threshold falls to the tier below.
/// Rates that exceed no threshold take the floor label.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingScale {
    tiers: Vec<(Decimal, Ranking)>,
    floor: Ranking,
}

impl RankingScale {
    /// Thresholds must be strictly descending.
    pub fn new(tiers: Vec<(Decimal, Ranking)>, floor: Ranking) -> Result<Self, AnalyticsError> {
        if let Some(pair) = tiers.windows(2).find(|pair| pair[0].0 <= pair[1].0) {
            return Err(AnalyticsError::InvalidInput(format!(
                "ranking thresholds must be strictly descending, found {} before {}",
                pair[0].0, pair[1].0
            )));
        }
        Ok(Self { tiers, floor })
    }

    pub fn from_settings(settings: &IndicatorSettings) -> Result<Self, AnalyticsError> {
        Self::new(
            vec![
                (settings.exceptional_threshold, Ranking::Exceptional),
                (settings.good_threshold, Ranking::Good),
            ],
            Ranking::Poor,
        )
    }

    pub fn classify(&self, rate: Decimal) -> Ranking {
        self.tiers
            .iter()
            .find(|(threshold, _)| rate > *threshold)
            .map_or(self.floor, |(_, label)| *label)
    }

    pub fn classify_all(&self, rates: &[Decimal]) -> Vec<Ranking> {
        rates.iter().map(|rate| self.classify(*rate)).collect()
    }
}

impl Default for RankingScale {
    fn default() -> Self {
        Self {
            tiers: vec![
                (Decimal::from(25), Ranking::Exceptional),
                (Decimal::ZERO, Ranking::Good),
            ],
            floor: Ranking::Poor,
        }
    }
}
