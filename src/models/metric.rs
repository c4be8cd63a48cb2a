use derive_getters::Getters;
use derive_new::new;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// A `{label, value}` pair offered to a selector.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct MenuItem {
    label: String,
    value: String,
}

/// Graphable performance columns.
#[derive(Clone, Copy, Debug, Default, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
pub enum Metric {
    #[strum(serialize = "Acquisition")]
    Acquisition,
    #[strum(serialize = "Close")]
    Close,
    #[default]
    #[strum(serialize = "Market")]
    Market,
    #[strum(serialize = "Est Profit")]
    EstProfit,
    #[strum(serialize = "% Est Profit")]
    PctEstProfit,
}

impl Metric {
    pub fn menu() -> Vec<MenuItem> {
        Metric::iter()
            .map(|metric| MenuItem::new(metric.to_string(), metric.to_string()))
            .collect()
    }

    pub fn next(&self) -> Metric {
        let all: Vec<Metric> = Metric::iter().collect();
        let i = all.iter().position(|m| m == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }
}
