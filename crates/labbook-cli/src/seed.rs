//! Seed records for the in-memory backend.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;

use labbook_model::FieldName;

pub type Cells = BTreeMap<FieldName, String>;

/// Load seed rows from a JSON file (an array of field-to-value maps), or
/// fall back to the built-in sample dataset.
pub fn load(path: Option<&Path>) -> anyhow::Result<Vec<Cells>> {
    let Some(path) = path else {
        return Ok(sample());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading seed data from {}", path.display()))?;
    let records: Vec<BTreeMap<String, String>> =
        serde_json::from_str(&raw).context("seed data must be an array of string maps")?;

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let mut cells = Cells::new();
        for (name, value) in record {
            let field = FieldName::new(name).context("seed data field name")?;
            cells.insert(field, value);
        }
        rows.push(cells);
    }
    Ok(rows)
}

fn sample() -> Vec<Cells> {
    let records: &[&[(&str, &str)]] = &[
        &[
            ("ref", "JH142"),
            ("reactant_1", "V2O5"),
            ("quantity_1", "0.31"),
            ("unit_1", "g"),
            ("reactant_2", "H2O"),
            ("quantity_2", "4.0"),
            ("unit_2", "g"),
            ("temp", "110"),
            ("time", "24"),
            ("pH", "3.5"),
            ("slow_cool", "Yes"),
            ("leak", "No"),
            ("outcome", "3"),
            ("purity", "2"),
        ],
        &[
            ("ref", "JH143"),
            ("reactant_1", "MoO3"),
            ("quantity_1", "0.52"),
            ("unit_1", "g"),
            ("temp", "95"),
            ("time", "48"),
            ("pH", "1.2"),
            ("slow_cool", "No"),
            ("leak", "No"),
            ("outcome", "1"),
            ("purity", "1"),
        ],
        &[
            ("ref", "AN007"),
            ("reactant_1", "SeO2"),
            ("quantity_1", "1.10"),
            ("unit_1", "g"),
            ("reactant_2", "EtOH"),
            ("quantity_2", "2.4"),
            ("unit_2", "mL"),
            ("temp", "180"),
            ("time", "72"),
            ("pH", "6.8"),
            ("slow_cool", "?"),
            ("leak", "?"),
            ("outcome", "4"),
            ("purity", "2"),
        ],
        &[
            ("ref", "AN011"),
            ("reactant_1", "TeO2"),
            ("quantity_1", "0.77"),
            ("unit_1", "g"),
            ("temp", "220"),
            ("time", "12"),
            ("pH", "9.0"),
            ("slow_cool", "Yes"),
            ("leak", "No"),
            ("outcome", "0"),
            ("purity", "0"),
        ],
        &[
            ("ref", "KL290"),
            ("reactant_1", "ZnO"),
            ("quantity_1", "0.08"),
            ("unit_1", "g"),
            ("temp", "150"),
            ("time", "96"),
            ("pH", "12.5"),
            ("slow_cool", "No"),
            ("leak", "Yes"),
            ("outcome", "2"),
            ("purity", "1"),
        ],
    ];

    records
        .iter()
        .map(|record| {
            record
                .iter()
                .map(|(name, value)| {
                    let field = FieldName::new(*name).expect("sample field names are non-empty");
                    (field, (*value).to_string())
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rows_are_well_formed() {
        let rows = sample();
        assert!(rows.len() >= 5);
        for row in &rows {
            assert!(row.keys().any(|field| field.as_str() == "ref"));
        }
    }
}
