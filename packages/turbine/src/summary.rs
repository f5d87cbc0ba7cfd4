//! Per-rank record counts.

use std::collections::BTreeMap;
use std::fmt;

use wind_map_turbine_models::{DataRank, TurbineRecord};

/// Counts of records by [`DataRank`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankSummary {
    /// Records per rank. Ranks with no records are absent.
    pub counts: BTreeMap<DataRank, usize>,
    /// All records.
    pub total: usize,
    /// Records without a position (not drawn on the map).
    pub unpositioned: usize,
}

impl RankSummary {
    /// Tallies `records`.
    #[must_use]
    pub fn from_records(records: &[TurbineRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            *summary.counts.entry(record.rank).or_default() += 1;
            summary.total += 1;
            if record.position.is_none() {
                summary.unpositioned += 1;
            }
        }
        summary
    }

    /// Number of records with `rank`.
    #[must_use]
    pub fn count(&self, rank: DataRank) -> usize {
        self.counts.get(&rank).copied().unwrap_or(0)
    }
}

impl fmt::Display for RankSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} turbines", self.total)?;
        for rank in DataRank::ALL_DESCENDING {
            writeln!(f, "  {:<8}{:>8}", rank.to_string(), self.count(*rank))?;
        }
        if self.unpositioned > 0 {
            writeln!(f, "  ({} without coordinates)", self.unpositioned)?;
        }
        Ok(())
    }
}
