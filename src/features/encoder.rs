//! One-hot encoding of feature records.
//!
//! Reproduces the training pipeline's dummy-variable expansion: categorical
//! fields become `<field>_<value>` indicator columns, and the result is
//! reindexed to the exact training-time column order, zero-filling columns
//! the record does not produce and dropping ones the metadata does not list.

use std::collections::HashMap;

use crate::features::record::FeatureRecord;

/// Encode one record into the model's fixed column order.
///
/// Pure and infallible: unknown columns in `columns` simply come out as 0.
pub fn encode(record: &FeatureRecord, columns: &[String]) -> Vec<f64> {
    let mut values: HashMap<String, f64> = HashMap::new();

    values.insert("bill_length_mm".to_string(), record.bill_length_mm);
    values.insert("bill_depth_mm".to_string(), record.bill_depth_mm);
    values.insert("flipper_length_mm".to_string(), record.flipper_length_mm);
    values.insert("body_mass_g".to_string(), record.body_mass_g);
    values.insert("year".to_string(), record.year as f64);

    // Indicator columns for the observed category values only; the absent
    // siblings fall out as zeros during reindexing.
    values.insert(format!("sex_{}", record.sex.as_str()), 1.0);
    values.insert(format!("island_{}", record.island.as_str()), 1.0);

    columns
        .iter()
        .map(|column| values.get(column.as_str()).copied().unwrap_or(0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::record::{Island, Sex};

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn record() -> FeatureRecord {
        FeatureRecord {
            bill_length_mm: 40.0,
            bill_depth_mm: 18.0,
            flipper_length_mm: 195.0,
            body_mass_g: 4000.0,
            year: 2008,
            sex: Sex::Male,
            island: Island::Biscoe,
        }
    }

    #[test]
    fn test_indicator_expansion() {
        let cols = columns(&[
            "bill_length_mm",
            "bill_depth_mm",
            "flipper_length_mm",
            "body_mass_g",
            "year",
            "sex_female",
            "sex_male",
            "island_Biscoe",
            "island_Dream",
            "island_Torgersen",
        ]);
        let row = encode(&record(), &cols);
        assert_eq!(
            row,
            vec![40.0, 18.0, 195.0, 4000.0, 2008.0, 0.0, 1.0, 1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_column_order_is_authoritative() {
        let cols = columns(&["sex_male", "bill_length_mm"]);
        assert_eq!(encode(&record(), &cols), vec![1.0, 40.0]);

        let cols = columns(&["bill_length_mm", "sex_male"]);
        assert_eq!(encode(&record(), &cols), vec![40.0, 1.0]);
    }

    #[test]
    fn test_unknown_columns_zero_filled() {
        let cols = columns(&["bill_length_mm", "wingspan_mm", "island_Atka"]);
        assert_eq!(encode(&record(), &cols), vec![40.0, 0.0, 0.0]);
    }

    #[test]
    fn test_record_fields_outside_metadata_are_dropped() {
        // Only one column requested: everything else the record carries
        // (including the observed indicators) is simply not emitted.
        let cols = columns(&["body_mass_g"]);
        assert_eq!(encode(&record(), &cols), vec![4000.0]);
    }

    #[test]
    fn test_non_positive_body_mass_passes_through() {
        let mut r = record();
        r.body_mass_g = -3000.0;
        let cols = columns(&["body_mass_g"]);
        assert_eq!(encode(&r, &cols), vec![-3000.0]);
    }
}
