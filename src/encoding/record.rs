//! Reference record held by the store

use deepsize::DeepSizeOf;
use serde::Serialize;

use super::{CODE_MAX_LEN, PERIOD_MAX_LEN, REGION_MAX_LEN, UPDATED_AT_MAX_LEN};
use crate::error::StoreError;
use crate::util::text::try_bounded_copy;

/// Per-state statistical record.
///
/// Field names on the wire follow the upstream dataset (`estado`, `regiao`,
/// `vl_uf`, ...). Text fields are always within their `*_MAX_LEN` bounds.
#[derive(Debug, Clone, PartialEq, Serialize, DeepSizeOf)]
pub struct Record {
    /// State code, the lookup key
    #[serde(rename = "estado")]
    pub code: String,
    #[serde(rename = "regiao")]
    pub region_name: String,
    #[serde(rename = "vl_uf", serialize_with = "super::decimal::two_places")]
    pub value_state: f64,
    #[serde(rename = "vl_regiao", serialize_with = "super::decimal::two_places")]
    pub value_region: f64,
    #[serde(rename = "vl_brasil", serialize_with = "super::decimal::two_places")]
    pub value_country: f64,
    /// Reporting period, e.g. "202310"
    #[serde(rename = "dt_competencia")]
    pub period: String,
    /// Last update identifier, e.g. "20231101"
    #[serde(rename = "dt_atualizacao")]
    pub updated_at: String,
}

impl Record {
    /// Build a record, truncating every text field to its bound.
    ///
    /// `values` are the state, region and country measurements in that order.
    pub fn new(
        code: &str,
        region_name: &str,
        values: [f64; 3],
        period: &str,
        updated_at: &str,
    ) -> Result<Self, StoreError> {
        let alloc = |s: &str, max: usize| {
            try_bounded_copy(s, max).map_err(|source| StoreError::Allocation {
                code: code.to_string(),
                source,
            })
        };
        let [value_state, value_region, value_country] = values;

        Ok(Self {
            code: alloc(code, CODE_MAX_LEN)?,
            region_name: alloc(region_name, REGION_MAX_LEN)?,
            value_state,
            value_region,
            value_country,
            period: alloc(period, PERIOD_MAX_LEN)?,
            updated_at: alloc(updated_at, UPDATED_AT_MAX_LEN)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_short_fields() {
        let record =
            Record::new("SP", "Sudeste", [150.5, 140.2, 130.0], "202310", "20231101").unwrap();
        assert_eq!(record.code, "SP");
        assert_eq!(record.region_name, "Sudeste");
        assert_eq!(record.value_state, 150.5);
        assert_eq!(record.value_region, 140.2);
        assert_eq!(record.value_country, 130.0);
        assert_eq!(record.period, "202310");
        assert_eq!(record.updated_at, "20231101");
    }

    #[test]
    fn test_new_truncates_long_fields() {
        let region = "R".repeat(80);
        let stamp = "9".repeat(40);
        let record = Record::new("SPXYZ", &region, [1.0, 2.0, 3.0], &stamp, &stamp).unwrap();

        assert_eq!(record.code, "SPXY");
        assert_eq!(record.region_name.len(), REGION_MAX_LEN);
        assert_eq!(record.period.len(), PERIOD_MAX_LEN);
        assert_eq!(record.updated_at.len(), UPDATED_AT_MAX_LEN);
    }

    #[test]
    fn test_serialize_field_order_and_names() {
        let record =
            Record::new("SP", "Sudeste", [150.5, 140.2, 130.0], "202310", "20231101").unwrap();
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            concat!(
                r#"{"estado":"SP","regiao":"Sudeste","vl_uf":150.50,"vl_regiao":140.20,"#,
                r#""vl_brasil":130.00,"dt_competencia":"202310","dt_atualizacao":"20231101"}"#
            )
        );
    }

    #[test]
    fn test_deep_size_counts_text() {
        let small = Record::new("SP", "S", [0.0; 3], "1", "1").unwrap();
        let large = Record::new("SP", &"S".repeat(49), [0.0; 3], "1", "1").unwrap();
        assert!(large.deep_size_of() > small.deep_size_of());
    }
}
