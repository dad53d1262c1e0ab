//! The TA and section tables: caller-facing raw rows in, validated,
//! strongly-typed tables out.

use crate::error::{Error, Result};

/// A TA's stance on a single section.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Preference {
  /// The TA prefers this section.
  Preferred,
  /// The TA is willing, but doesn't prefer, this section.
  Willing,
  /// The TA is unwilling to support this section.
  Unwilling,
}

impl Preference {
  /// Parses a single preference code. Accepts exactly `"P"`, `"W"` or `"U"`.
  pub fn parse(code: &str) -> Option<Self> {
    match code {
      "P" => Some(Preference::Preferred),
      "W" => Some(Preference::Willing),
      "U" => Some(Preference::Unwilling),
      _ => None,
    }
  }
}

/// A loosely-typed TA row, as a caller (e.g. a CSV loader) would produce it
/// before this crate validates it.
#[derive(Clone, Debug)]
pub struct RawTaRow {
  /// The TA's id.
  pub id: i64,
  /// The TA's maximum number of sections.
  pub max_assigned: i64,
  /// One preference code per section, in section-table order.
  pub preferences: Vec<String>,
}

/// A validated TA: an id, a capacity, and a preference for every section.
#[derive(Clone, Debug)]
pub struct TaRecord {
  /// The TA's id.
  pub id: u32,
  /// The TA's maximum number of sections.
  pub max_assigned: u32,
  /// One preference per section, in section-table order.
  pub preferences: Vec<Preference>,
}

/// The full, ordered, immutable TA table for a run.
#[derive(Clone, Debug)]
pub struct TaTable {
  records: Vec<TaRecord>,
}

impl TaTable {
  /// Validates `rows` against `section_count` and builds a `TaTable`.
  ///
  /// Every row must have exactly `section_count` preference codes, each one
  /// of `"P"`, `"W"` or `"U"`; `max_assigned` and `id` must be non-negative.
  pub fn from_raw(rows: Vec<RawTaRow>, section_count: usize) -> Result<Self> {
    let records = rows
      .into_iter()
      .enumerate()
      .map(|(row, raw)| {
        if raw.id < 0 {
          return Err(Error::NegativeId {
            table: "ta",
            row,
            value: raw.id,
          });
        }
        let id = u32::try_from(raw.id).map_err(|_| Error::ValueOutOfRange {
          table: "ta",
          row,
          field: "id",
          value: raw.id,
        })?;
        if raw.max_assigned < 0 {
          return Err(Error::NegativeMaxAssigned {
            row,
            ta_id: raw.id,
            value: raw.max_assigned,
          });
        }
        let max_assigned =
          u32::try_from(raw.max_assigned).map_err(|_| Error::ValueOutOfRange {
            table: "ta",
            row,
            field: "max_assigned",
            value: raw.max_assigned,
          })?;
        if raw.preferences.len() != section_count {
          return Err(Error::PreferenceCountMismatch {
            row,
            ta_id: raw.id,
            expected: section_count,
            actual: raw.preferences.len(),
          });
        }
        let preferences = raw
          .preferences
          .iter()
          .enumerate()
          .map(|(col, code)| {
            Preference::parse(code).ok_or_else(|| Error::InvalidPreferenceCode {
              row,
              ta_id: raw.id,
              col,
              code: code.clone(),
            })
          })
          .collect::<Result<Vec<_>>>()?;
        Ok(TaRecord {
          id,
          max_assigned,
          preferences,
        })
      })
      .collect::<Result<Vec<_>>>()?;
    Ok(TaTable { records })
  }

  /// The validated rows, in input order.
  pub fn records(&self) -> &[TaRecord] {
    &self.records
  }

  /// Number of TAs.
  pub fn len(&self) -> usize {
    self.records.len()
  }

  /// Whether there are no TAs at all.
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}

/// A loosely-typed section row, as a caller would produce it before this
/// crate validates it.
#[derive(Clone, Debug)]
pub struct RawSectionRow {
  /// The section's id.
  pub id: i64,
  /// The meeting slot, e.g. `"MWF 10am"`. Sections sharing the same text
  /// share the same slot.
  pub daytime: String,
  /// The minimum number of TAs this section needs.
  pub min_ta: i64,
}

/// A validated section: an id, a meeting slot, and a staffing floor.
#[derive(Clone, Debug)]
pub struct SectionRecord {
  /// The section's id.
  pub id: u32,
  /// The meeting slot.
  pub daytime: String,
  /// The minimum number of TAs this section needs.
  pub min_ta: u32,
}

/// The full, ordered, immutable section table for a run.
#[derive(Clone, Debug)]
pub struct SectionTable {
  records: Vec<SectionRecord>,
}

impl SectionTable {
  /// Validates `rows` and builds a `SectionTable`.
  ///
  /// `id` and `min_ta` must be non-negative and `daytime` must not be empty.
  pub fn from_raw(rows: Vec<RawSectionRow>) -> Result<Self> {
    let records = rows
      .into_iter()
      .enumerate()
      .map(|(row, raw)| {
        if raw.id < 0 {
          return Err(Error::NegativeId {
            table: "section",
            row,
            value: raw.id,
          });
        }
        let id = u32::try_from(raw.id).map_err(|_| Error::ValueOutOfRange {
          table: "section",
          row,
          field: "id",
          value: raw.id,
        })?;
        if raw.daytime.is_empty() {
          return Err(Error::EmptyDaytime {
            row,
            section_id: raw.id,
          });
        }
        if raw.min_ta < 0 {
          return Err(Error::NegativeMinTa {
            row,
            section_id: raw.id,
            value: raw.min_ta,
          });
        }
        let min_ta = u32::try_from(raw.min_ta).map_err(|_| Error::ValueOutOfRange {
          table: "section",
          row,
          field: "min_ta",
          value: raw.min_ta,
        })?;
        Ok(SectionRecord {
          id,
          daytime: raw.daytime,
          min_ta,
        })
      })
      .collect::<Result<Vec<_>>>()?;
    Ok(SectionTable { records })
  }

  /// The validated rows, in input order.
  pub fn records(&self) -> &[SectionRecord] {
    &self.records
  }

  /// Number of sections.
  pub fn len(&self) -> usize {
    self.records.len()
  }

  /// Whether there are no sections at all.
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ta_row(id: i64, max_assigned: i64, prefs: &[&str]) -> RawTaRow {
    RawTaRow {
      id,
      max_assigned,
      preferences: prefs.iter().map(|s| s.to_string()).collect(),
    }
  }

  #[test]
  fn test_preference_parse() {
    assert_eq!(Preference::parse("P"), Some(Preference::Preferred));
    assert_eq!(Preference::parse("W"), Some(Preference::Willing));
    assert_eq!(Preference::parse("U"), Some(Preference::Unwilling));
    assert_eq!(Preference::parse("X"), None);
    assert_eq!(Preference::parse(""), None);
  }

  #[test]
  fn test_ta_table_from_raw_ok() {
    let rows = vec![ta_row(0, 2, &["P", "W", "U"]), ta_row(1, 1, &["U", "U", "P"])];
    let table = TaTable::from_raw(rows, 3).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[0].max_assigned, 2);
    assert_eq!(table.records()[1].preferences[2], Preference::Preferred);
  }

  #[test]
  fn test_ta_table_rejects_mismatched_preference_count() {
    let rows = vec![ta_row(0, 2, &["P", "W"])];
    let err = TaTable::from_raw(rows, 3).unwrap_err();
    assert_eq!(
      err,
      Error::PreferenceCountMismatch {
        row: 0,
        ta_id: 0,
        expected: 3,
        actual: 2
      }
    );
  }

  #[test]
  fn test_ta_table_rejects_invalid_code() {
    let rows = vec![ta_row(0, 2, &["P", "X", "U"])];
    let err = TaTable::from_raw(rows, 3).unwrap_err();
    assert_eq!(
      err,
      Error::InvalidPreferenceCode {
        row: 0,
        ta_id: 0,
        col: 1,
        code: "X".to_string()
      }
    );
  }

  #[test]
  fn test_ta_table_rejects_negative_cap() {
    let rows = vec![ta_row(0, -1, &["P"])];
    let err = TaTable::from_raw(rows, 1).unwrap_err();
    assert_eq!(
      err,
      Error::NegativeMaxAssigned {
        row: 0,
        ta_id: 0,
        value: -1
      }
    );
  }

  #[test]
  fn test_ta_table_rejects_id_above_u32_max() {
    let rows = vec![ta_row(i64::from(u32::MAX) + 1, 1, &["P"])];
    let err = TaTable::from_raw(rows, 1).unwrap_err();
    assert_eq!(
      err,
      Error::ValueOutOfRange {
        table: "ta",
        row: 0,
        field: "id",
        value: i64::from(u32::MAX) + 1,
      }
    );
  }

  #[test]
  fn test_ta_table_rejects_max_assigned_above_u32_max() {
    let rows = vec![ta_row(0, i64::from(u32::MAX) + 1, &["P"])];
    let err = TaTable::from_raw(rows, 1).unwrap_err();
    assert_eq!(
      err,
      Error::ValueOutOfRange {
        table: "ta",
        row: 0,
        field: "max_assigned",
        value: i64::from(u32::MAX) + 1,
      }
    );
  }

  #[test]
  fn test_section_table_from_raw_ok() {
    let rows = vec![
      RawSectionRow {
        id: 0,
        daytime: "MWF 10am".to_string(),
        min_ta: 2,
      },
      RawSectionRow {
        id: 1,
        daytime: "TR 2pm".to_string(),
        min_ta: 1,
      },
    ];
    let table = SectionTable::from_raw(rows).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[0].daytime, "MWF 10am");
  }

  #[test]
  fn test_section_table_rejects_empty_daytime() {
    let rows = vec![RawSectionRow {
      id: 0,
      daytime: "".to_string(),
      min_ta: 1,
    }];
    let err = SectionTable::from_raw(rows).unwrap_err();
    assert_eq!(
      err,
      Error::EmptyDaytime {
        row: 0,
        section_id: 0
      }
    );
  }

  #[test]
  fn test_section_table_rejects_negative_min_ta() {
    let rows = vec![RawSectionRow {
      id: 0,
      daytime: "MWF 10am".to_string(),
      min_ta: -2,
    }];
    let err = SectionTable::from_raw(rows).unwrap_err();
    assert_eq!(
      err,
      Error::NegativeMinTa {
        row: 0,
        section_id: 0,
        value: -2
      }
    );
  }

  #[test]
  fn test_section_table_rejects_id_above_u32_max() {
    let rows = vec![RawSectionRow {
      id: i64::from(u32::MAX) + 1,
      daytime: "MWF 10am".to_string(),
      min_ta: 1,
    }];
    let err = SectionTable::from_raw(rows).unwrap_err();
    assert_eq!(
      err,
      Error::ValueOutOfRange {
        table: "section",
        row: 0,
        field: "id",
        value: i64::from(u32::MAX) + 1,
      }
    );
  }

  #[test]
  fn test_section_table_rejects_min_ta_above_u32_max() {
    let rows = vec![RawSectionRow {
      id: 0,
      daytime: "MWF 10am".to_string(),
      min_ta: i64::from(u32::MAX) + 1,
    }];
    let err = SectionTable::from_raw(rows).unwrap_err();
    assert_eq!(
      err,
      Error::ValueOutOfRange {
        table: "section",
        row: 0,
        field: "min_ta",
        value: i64::from(u32::MAX) + 1,
      }
    );
  }
}
