//! Data-quality ranking.
//!
//! A record attains a rank only if every field that rank requires is
//! present. Because the gold requirements include the silver ones, a
//! gold record would also qualify as silver and bronze; it is labelled
//! with the highest rank it reaches.

use wind_map_turbine_models::{DataRank, TurbineRecord};

/// The highest rank whose required fields are all present on `record`.
#[must_use]
pub fn rank_for(record: &TurbineRecord) -> DataRank {
    DataRank::ALL_DESCENDING
        .iter()
        .copied()
        .find(|rank| record.has_all(rank.required_fields()))
        .unwrap_or_default()
}

/// Whether `record` meets the requirements of `rank` (not necessarily as
/// its highest rank).
#[must_use]
pub fn qualifies_for(record: &TurbineRecord, rank: DataRank) -> bool {
    record.has_all(rank.required_fields())
}

/// Recomputes the rank of every record in place.
pub fn assign_ranks(records: &mut [TurbineRecord]) {
    for record in records {
        record.rank = rank_for(record);
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator as _;
    use wind_map_turbine_models::{GOLD_FIELDS, MetadataField, OsmElementType, SILVER_FIELDS};

    use super::*;

    fn record_with(fields: &[MetadataField]) -> TurbineRecord {
        let mut record = TurbineRecord::new(1, OsmElementType::Node);
        for field in fields {
            *record.field_mut(*field) = Some(format!("{field} value"));
        }
        record
    }

    #[test]
    fn bare_record_is_bronze() {
        assert_eq!(rank_for(&record_with(&[])), DataRank::Bronze);
    }

    #[test]
    fn hub_height_and_rotor_diameter_make_silver() {
        assert_eq!(rank_for(&record_with(SILVER_FIELDS)), DataRank::Silver);
        assert_eq!(
            rank_for(&record_with(&[MetadataField::HeightHub])),
            DataRank::Bronze
        );
    }

    #[test]
    fn all_gold_fields_make_gold() {
        assert_eq!(rank_for(&record_with(GOLD_FIELDS)), DataRank::Gold);
    }

    #[test]
    fn missing_any_gold_field_drops_to_silver() {
        for skipped in GOLD_FIELDS {
            if SILVER_FIELDS.contains(skipped) {
                continue;
            }
            let fields: Vec<MetadataField> = GOLD_FIELDS
                .iter()
                .copied()
                .filter(|f| f != skipped)
                .collect();
            assert_eq!(
                rank_for(&record_with(&fields)),
                DataRank::Silver,
                "without {skipped}"
            );
        }
    }

    #[test]
    fn name_does_not_affect_rank() {
        let mut fields = GOLD_FIELDS.to_vec();
        fields.push(MetadataField::Name);
        assert_eq!(rank_for(&record_with(&fields)), DataRank::Gold);
        assert_eq!(
            rank_for(&record_with(&[MetadataField::Name])),
            DataRank::Bronze
        );
    }

    #[test]
    fn ranking_is_monotonic() {
        // Every subset of the gold fields, encoded as a bitmask.
        for mask in 0u32..(1 << GOLD_FIELDS.len()) {
            let fields: Vec<MetadataField> = GOLD_FIELDS
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, f)| *f)
                .collect();
            let record = record_with(&fields);
            let rank = rank_for(&record);

            for lower in DataRank::iter().filter(|r| *r <= rank) {
                assert!(
                    qualifies_for(&record, lower),
                    "{rank} record does not qualify for {lower}"
                );
            }
            if qualifies_for(&record, DataRank::Gold) {
                assert!(qualifies_for(&record, DataRank::Silver));
                assert!(qualifies_for(&record, DataRank::Bronze));
            }
        }
    }

    #[test]
    fn assigns_ranks_in_place() {
        let mut records = vec![record_with(GOLD_FIELDS), record_with(&[])];
        records[1].rank = DataRank::Gold;
        assign_ranks(&mut records);
        assert_eq!(records[0].rank, DataRank::Gold);
        assert_eq!(records[1].rank, DataRank::Bronze);
    }
}
