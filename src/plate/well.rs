use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::plate::PlateError;

pub const PLATE_ROWS: u8 = 8;
pub const PLATE_COLS: u8 = 12;
pub const PLATE_WELLS: usize = (PLATE_ROWS as usize) * (PLATE_COLS as usize);

/// One of the 96 wells `A1`..`H12`. Orders row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WellPosition {
    row: u8,
    col: u8,
}

impl WellPosition {
    /// `row` is 1-based (A=1), `col` is 1-based.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (1..=PLATE_ROWS).contains(&row) && (1..=PLATE_COLS).contains(&col) {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub fn row_letter(self) -> char {
        (b'A' + self.row - 1) as char
    }

    /// Default scanner coordinate for this well: `R{row:02}C{col:02}`.
    pub fn default_sentrix_position(self) -> String {
        format!("R{:02}C{:02}", self.row, self.col)
    }

    pub fn all() -> impl Iterator<Item = WellPosition> {
        (1..=PLATE_ROWS).flat_map(|row| (1..=PLATE_COLS).map(move |col| WellPosition { row, col }))
    }
}

impl FromStr for WellPosition {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlateError::InvalidWell(s.to_string());
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(invalid());
        }
        let digits = chars.as_str();
        if digits.is_empty()
            || digits.len() > 2
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let col: u8 = digits.parse().map_err(|_| invalid())?;
        let row = letter as u8 - b'A' + 1;
        WellPosition::new(row, col).ok_or_else(invalid)
    }
}

impl TryFrom<String> for WellPosition {
    type Error = PlateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WellPosition> for String {
    fn from(value: WellPosition) -> Self {
        value.to_string()
    }
}

impl fmt::Display for WellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.col)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/plate/well.rs"]
mod tests;
