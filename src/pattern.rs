use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::PatternError;

/// Separator between pattern rows.
pub const ROW_DELIMITER: char = '#';

const ALIVE: char = '1';
const DEAD: char = '0';

/// Seed pattern: rows of alive/dead cells, placed at the grid's top-left corner.
///
/// Text form is rows over `{'0','1'}` separated by [`ROW_DELIMITER`], e.g. `010#001#111`.
/// Rows may differ in length; missing cells are dead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    rows: Vec<Vec<bool>>,
}

impl Pattern {
    /// Parse the text form, checking only the alphabet.
    ///
    /// Trailing delimiters do not produce extra rows, and an empty string is an
    /// empty pattern.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let trimmed = text.trim_end_matches(ROW_DELIMITER);
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let rows = trimmed
            .split(ROW_DELIMITER)
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| match ch {
                        ALIVE => Ok(true),
                        DEAD => Ok(false),
                        _ => Err(PatternError::IllegalCharacter { row, col, ch }),
                    })
                    .collect::<Result<Vec<bool>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rows })
    }

    /// Uniformly random pattern covering exactly `rows` x `cols` cells.
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let rows = (0..rows)
            .map(|_| (0..cols).map(|_| rng.gen_bool(0.5)).collect::<Vec<bool>>())
            .collect();
        Self { rows }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Reject the pattern if it would not fit a `rows` x `cols` grid.
    pub fn check_fits(&self, rows: usize, cols: usize) -> Result<(), PatternError> {
        if let Some((row, line)) = self.rows.iter().enumerate().find(|(_, l)| l.len() > cols) {
            return Err(PatternError::RowTooLong {
                row,
                len: line.len(),
                max: cols,
            });
        }
        if self.rows.len() > rows {
            return Err(PatternError::TooManyRows {
                count: self.rows.len(),
                max: rows,
            });
        }
        Ok(())
    }

    /// Every cell the pattern covers, as `(row, col, alive)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, line)| {
            line.iter().enumerate().map(move |(c, &alive)| (r, c, alive))
        })
    }

    /// Number of alive cells in the pattern.
    pub fn population(&self) -> usize {
        self.cells().filter(|&(_, _, alive)| alive).count()
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, "{ROW_DELIMITER}")?;
            }
            for &alive in line {
                write!(f, "{}", if alive { ALIVE } else { DEAD })?;
            }
        }
        Ok(())
    }
}

/// Decode `text` for a `rows` x `cols` grid without touching any grid.
pub fn decode(text: &str, rows: usize, cols: usize) -> Result<Pattern, PatternError> {
    let pattern = Pattern::parse(text)?;
    pattern.check_fits(rows, cols)?;
    Ok(pattern)
}
