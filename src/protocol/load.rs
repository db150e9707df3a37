use crate::encoding::{CODE_MAX_LEN, PERIOD_MAX_LEN, REGION_MAX_LEN, Record, UPDATED_AT_MAX_LEN};
use crate::error::{ParseError, StoreError};
use crate::protocol::command::Command;
use crate::store::RecordStore;
use crate::util::text::truncate_chars;

const LOAD_ARITY: usize = 7;

/// LOAD command: L code region vl_uf vl_regiao vl_brasil period updated_at
#[derive(Debug, Clone, PartialEq)]
pub struct LoadCmd {
    pub code: String,
    pub region_name: String,
    pub values: [f64; 3],
    pub period: String,
    pub updated_at: String,
}

impl LoadCmd {
    /// Parse LOAD arguments (everything after the `L` tag).
    ///
    /// Text fields are truncated to their bounds; numbers must be finite
    /// decimal literals.
    pub fn parse(args: &[&str]) -> Result<Command, ParseError> {
        let &[code, region, v_state, v_region, v_country, period, updated_at] = args else {
            return Err(ParseError::WrongArity {
                command: "L",
                expected: LOAD_ARITY,
                actual: args.len(),
            });
        };

        let values = [
            parse_value("vl_uf", v_state)?,
            parse_value("vl_regiao", v_region)?,
            parse_value("vl_brasil", v_country)?,
        ];

        Ok(Command::Load(LoadCmd {
            code: truncate_chars(code, CODE_MAX_LEN).to_string(),
            region_name: truncate_chars(region, REGION_MAX_LEN).to_string(),
            values,
            period: truncate_chars(period, PERIOD_MAX_LEN).to_string(),
            updated_at: truncate_chars(updated_at, UPDATED_AT_MAX_LEN).to_string(),
        }))
    }

    /// Execute the LOAD command
    pub fn execute(&self, store: &mut RecordStore) -> Result<(), StoreError> {
        let record = Record::new(
            &self.code,
            &self.region_name,
            self.values,
            &self.period,
            &self.updated_at,
        )?;
        store.insert(record)
    }
}

fn parse_value(field: &'static str, text: &str) -> Result<f64, ParseError> {
    let value = text.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        field,
        value: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ParseError::NonFinite {
            field,
            value: text.to_string(),
        });
    }
    Ok(value)
}
