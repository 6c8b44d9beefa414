// Copyright 2026 The Sankey Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use crate::common::{Error, ErrorCode, ErrorKind, Result};
use crate::datamodel::EntityRecord;
use crate::taxonomy::Taxonomy;
use crate::{config_err, input_err};

/// Loads entity rows from a CSV file with one row per entity, a primary
/// category column, and one 0/1 column per indicator in the taxonomy's
/// vocabulary.
///
/// Every vocabulary column must be present in the header; a missing column
/// is a configuration error reported before any row is read.  Empty
/// indicator cells count as 0.
pub fn load_records(
    path: &str,
    primary_column: &str,
    taxonomy: &Taxonomy,
) -> Result<Vec<EntityRecord>> {
    let mut rdr = csv::Reader::from_path(path)
        .map_err(|err| Error::new(ErrorKind::Input, ErrorCode::Generic, Some(err.to_string())))?;

    let header = rdr
        .headers()
        .map_err(|err| Error::new(ErrorKind::Input, ErrorCode::Generic, Some(err.to_string())))?
        .clone();
    let column = |name: &str| -> Option<usize> { header.iter().position(|h| h == name) };

    let primary_idx = match column(primary_column) {
        Some(idx) => idx,
        None => return config_err!(MissingColumn, primary_column.to_string()),
    };
    let mut indicator_columns: Vec<(String, usize)> = Vec::new();
    for indicator in taxonomy.vocabulary() {
        match column(indicator) {
            Some(idx) => indicator_columns.push((indicator.to_string(), idx)),
            None => return config_err!(MissingColumn, indicator.to_string()),
        }
    }

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|err| {
            Error::new(ErrorKind::Input, ErrorCode::Generic, Some(err.to_string()))
        })?;

        let primary = record.get(primary_idx).unwrap_or("").trim();
        if primary.is_empty() {
            return input_err!(MissingPrimaryCategory, format!("row {}", row + 1));
        }

        let mut entity = EntityRecord::new(primary);
        for (indicator, idx) in &indicator_columns {
            let cell = record.get(*idx).unwrap_or("").trim();
            let active = match cell {
                "" | "0" => false,
                "1" => true,
                _ => {
                    return input_err!(
                        BadIndicatorValue,
                        format!("row {}, column '{}': '{}'", row + 1, indicator, cell)
                    );
                }
            };
            if active {
                entity = entity.with_indicator(indicator, true);
            }
        }
        records.push(entity);
    }

    Ok(records)
}
