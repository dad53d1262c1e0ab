//! The validated, read-only context shared by scorers, agents and the loop.

use crate::{
  error::{Error, Result},
  tables::{SectionTable, TaTable},
};

/// A TA table and a section table that have been checked against each
/// other. Every TA's preference vector has exactly as many entries as
/// there are sections, in section-table order.
#[derive(Clone, Debug)]
pub struct Problem {
  /// The TA table.
  pub tas: TaTable,
  /// The section table.
  pub sections: SectionTable,
}

impl Problem {
  /// Bundles `tas` and `sections`, checking that every TA's preference
  /// vector has one entry per section.
  pub fn new(tas: TaTable, sections: SectionTable) -> Result<Self> {
    for (row, record) in tas.records().iter().enumerate() {
      if record.preferences.len() != sections.len() {
        return Err(Error::PreferenceCountMismatch {
          row,
          ta_id: record.id as i64,
          expected: sections.len(),
          actual: record.preferences.len(),
        });
      }
    }
    Ok(Problem { tas, sections })
  }

  /// `T`, the number of TAs.
  pub fn num_tas(&self) -> usize {
    self.tas.len()
  }

  /// `S`, the number of sections.
  pub fn num_sections(&self) -> usize {
    self.sections.len()
  }
}
