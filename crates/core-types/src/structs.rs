use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The raw input for one entity: a baseline measurement followed by its
/// chronological period-end values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySeries {
    /// Purely descriptive and not required to be unique. `None` means the
    /// caller did not supply one and a configured placeholder is used.
    #[serde(default)]
    pub name: Option<String>,
    pub baseline: Decimal,
    pub periods: Vec<Decimal>,
}

impl EntitySeries {
    pub fn new(name: impl Into<String>, baseline: Decimal, periods: Vec<Decimal>) -> Self {
        Self {
            name: Some(name.into()),
            baseline,
            periods,
        }
    }

    pub fn unnamed(baseline: Decimal, periods: Vec<Decimal>) -> Self {
        Self {
            name: None,
            baseline,
            periods,
        }
    }
}

/// Parses `NAME=baseline,v1,v2,...` or a bare `baseline,v1,v2,...`.
impl FromStr for EntitySeries {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, values) = match s.split_once('=') {
            Some((name, values)) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(CoreError::InvalidInput(
                        "entity".to_string(),
                        format!("missing name before '=' in '{s}'"),
                    ));
                }
                (Some(name.to_string()), values)
            }
            None => (None, s),
        };

        let mut parsed = values
            .split(',')
            .map(|token| {
                let token = token.trim();
                Decimal::from_str(token).map_err(|e| {
                    CoreError::InvalidInput("value".to_string(), format!("'{token}': {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();

        // `split` always yields at least one token, so an empty string fails above.
        let baseline = parsed.next().ok_or_else(|| {
            CoreError::InvalidInput("entity".to_string(), "no baseline value".to_string())
        })?;

        Ok(Self {
            name,
            baseline,
            periods: parsed.collect(),
        })
    }
}

/// An insertion-ordered mapping from entity name to a dispersion value.
///
/// Inserting a name that is already present replaces its value without moving
/// it, so iteration order is the order in which names were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispersionTable {
    entries: Vec<(String, Decimal)>,
}

impl DispersionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the dispersion for `name`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: Decimal) -> Option<Decimal> {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for DispersionTable {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_named_series() {
        let series: EntitySeries = "Aurelia=100, 150,200,150".parse().unwrap();
        assert_eq!(series.name.as_deref(), Some("Aurelia"));
        assert_eq!(series.baseline, dec!(100));
        assert_eq!(series.periods, vec![dec!(150), dec!(200), dec!(150)]);
    }

    #[test]
    fn parses_unnamed_series() {
        let series: EntitySeries = "1000.5,1020".parse().unwrap();
        assert_eq!(series.name, None);
        assert_eq!(series.baseline, dec!(1000.5));
        assert_eq!(series.periods, vec![dec!(1020)]);
    }

    #[test]
    fn baseline_only_parses_with_no_periods() {
        let series: EntitySeries = "X=100".parse().unwrap();
        assert!(series.periods.is_empty());
    }

    #[rstest]
    #[case("")]
    #[case("=100,200")]
    #[case("X=100,,200")]
    #[case("X=100,abc")]
    fn rejects_malformed_series(#[case] input: &str) {
        assert!(matches!(
            input.parse::<EntitySeries>(),
            Err(CoreError::InvalidInput(_, _))
        ));
    }

    #[test]
    fn reinserting_a_name_keeps_its_position() {
        let mut table = DispersionTable::new();
        assert_eq!(table.insert("A", dec!(10)), None);
        table.insert("B", dec!(20));
        assert_eq!(table.insert("A", dec!(5)), Some(dec!(10)));

        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![("A", dec!(5)), ("B", dec!(20))]);
    }

    #[test]
    fn collects_from_pairs() {
        let table: DispersionTable = [("X", dec!(40)), ("Y", dec!(1))].into_iter().collect();
        assert!(!table.is_empty());
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![("X", dec!(40)), ("Y", dec!(1))]);
    }
}
