//! Fatal input errors, returned at construction time.

/// Everything that can go wrong while turning caller-supplied rows into a
/// validated [`crate::tables::TaTable`], [`crate::tables::SectionTable`] or
/// [`crate::problem::Problem`].
///
/// Nothing in this crate returns `Error` once a `Problem` has been built:
/// from that point on, bad states are either structurally impossible (a
/// `Solution`'s entries are always 0 or 1) or are programming bugs that
/// panic instead (an agent invoked on an empty population).
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
  /// A TA row's preference vector doesn't have one entry per section.
  #[error(
    "ta row {row} (id {ta_id}): expected {expected} preference columns, got {actual}"
  )]
  PreferenceCountMismatch {
    /// Zero-based row index in the TA table.
    row: usize,
    /// The TA id at that row, for a human-readable diagnostic.
    ta_id: i64,
    /// Number of sections in the section table.
    expected: usize,
    /// Number of preference columns actually present.
    actual: usize,
  },

  /// A preference column held something other than `P`, `W` or `U`.
  #[error(
    "ta row {row} (id {ta_id}), section column {col}: invalid preference code {code:?}"
  )]
  InvalidPreferenceCode {
    /// Zero-based row index in the TA table.
    row: usize,
    /// The TA id at that row.
    ta_id: i64,
    /// Zero-based column index among the preference columns.
    col: usize,
    /// The offending raw value.
    code: String,
  },

  /// A TA's `max_assigned` was negative.
  #[error("ta row {row} (id {ta_id}): max_assigned must be non-negative, got {value}")]
  NegativeMaxAssigned {
    /// Zero-based row index in the TA table.
    row: usize,
    /// The TA id at that row.
    ta_id: i64,
    /// The offending raw value.
    value: i64,
  },

  /// A section's `min_ta` was negative.
  #[error(
    "section row {row} (id {section_id}): min_ta must be non-negative, got {value}"
  )]
  NegativeMinTa {
    /// Zero-based row index in the section table.
    row: usize,
    /// The section id at that row.
    section_id: i64,
    /// The offending raw value.
    value: i64,
  },

  /// A TA or section id was negative.
  #[error("{table} row {row}: id must be non-negative, got {value}")]
  NegativeId {
    /// Which table the bad row belongs to (`"ta"` or `"section"`).
    table: &'static str,
    /// Zero-based row index.
    row: usize,
    /// The offending raw value.
    value: i64,
  },

  /// A section's `daytime` was empty.
  #[error("section row {row} (id {section_id}): daytime must not be empty")]
  EmptyDaytime {
    /// Zero-based row index in the section table.
    row: usize,
    /// The section id at that row.
    section_id: i64,
  },

  /// An id, cap, or minimum was non-negative but too large to fit a `u32`.
  #[error("{table} row {row}: {field} {value} exceeds u32::MAX")]
  ValueOutOfRange {
    /// Which table the bad row belongs to (`"ta"` or `"section"`).
    table: &'static str,
    /// Zero-based row index.
    row: usize,
    /// Which field overflowed (`"id"`, `"max_assigned"`, or `"min_ta"`).
    field: &'static str,
    /// The offending raw value.
    value: i64,
  },
}

/// Convenience alias for results that can fail with this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
