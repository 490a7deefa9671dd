#![forbid(unsafe_code)]

//! String and id-array forms of a pattern.
//!
//! A dot's id is `row * size + column`. Grids with at most ten cells write
//! one decimal digit per dot (`"0148"`), which keeps stored patterns from
//! the stock 3×3 widget readable. Larger grids write comma-separated ids
//! (`"0,5,10,15"`) so multi-digit ids stay unambiguous.
//!
//! Decoding is strict: any character outside the format, any id past the
//! grid, and any repeated id is a [`DecodeError`]. There is no partial
//! result.

use patternlock_core::{DecodeError, Grid, Pattern};
use tracing::debug;

const DELIMITER: char = ',';

/// How ids are laid out in the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdFormat {
    /// One decimal digit per dot, no separator.
    Compact,
    /// Decimal ids separated by commas.
    Delimited,
}

impl IdFormat {
    /// The format used for `grid`.
    #[must_use]
    pub fn for_grid(grid: Grid) -> Self {
        if grid.cell_count() <= 10 {
            Self::Compact
        } else {
            Self::Delimited
        }
    }
}

/// Serialize `pattern` in draw order. An empty pattern encodes to `""`.
#[must_use]
pub fn encode(pattern: &Pattern) -> String {
    let ids = pattern.iter().map(|dot| dot.id().to_string());
    match IdFormat::for_grid(pattern.grid()) {
        IdFormat::Compact => ids.collect(),
        IdFormat::Delimited => ids.collect::<Vec<_>>().join(","),
    }
}

/// Parse a string produced by [`encode`] for a grid of the same size.
pub fn decode(grid: Grid, input: &str) -> Result<Pattern, DecodeError> {
    let result = match IdFormat::for_grid(grid) {
        IdFormat::Compact => decode_compact(grid, input),
        IdFormat::Delimited => decode_delimited(grid, input),
    };
    if let Err(err) = &result {
        debug!(
            size = grid.size(),
            input_len = input.len(),
            error = %err,
            "pattern decode failed"
        );
    }
    result
}

/// Dot ids in draw order.
#[must_use]
pub fn to_ids(pattern: &Pattern) -> Vec<u32> {
    pattern.ids()
}

/// Build a pattern from dot ids.
///
/// Error positions are indices into `ids`.
pub fn from_ids(grid: Grid, ids: impl IntoIterator<Item = u32>) -> Result<Pattern, DecodeError> {
    let mut pattern = Pattern::new(grid);
    for (index, id) in ids.into_iter().enumerate() {
        push_id(&mut pattern, index, u64::from(id))?;
    }
    Ok(pattern)
}

fn decode_compact(grid: Grid, input: &str) -> Result<Pattern, DecodeError> {
    let mut pattern = Pattern::new(grid);
    for (index, ch) in input.char_indices() {
        let digit = ch
            .to_digit(10)
            .ok_or(DecodeError::InvalidCharacter { index, found: ch })?;
        push_id(&mut pattern, index, u64::from(digit))?;
    }
    Ok(pattern)
}

fn decode_delimited(grid: Grid, input: &str) -> Result<Pattern, DecodeError> {
    let mut pattern = Pattern::new(grid);
    if input.is_empty() {
        return Ok(pattern);
    }

    let mut start = 0;
    for field in input.split(DELIMITER) {
        if field.is_empty() {
            return Err(DecodeError::EmptyField { index: start });
        }
        let id = parse_id(field, start)?;
        push_id(&mut pattern, start, id)?;
        start += field.len() + DELIMITER.len_utf8();
    }
    Ok(pattern)
}

/// Parse a decimal field starting at byte `offset`, saturating on overflow
/// so the range check reports it.
fn parse_id(field: &str, offset: usize) -> Result<u64, DecodeError> {
    let mut id: u64 = 0;
    for (i, ch) in field.char_indices() {
        let digit = ch.to_digit(10).ok_or(DecodeError::InvalidCharacter {
            index: offset + i,
            found: ch,
        })?;
        id = id.saturating_mul(10).saturating_add(u64::from(digit));
    }
    Ok(id)
}

fn push_id(pattern: &mut Pattern, index: usize, id: u64) -> Result<(), DecodeError> {
    let grid = pattern.grid();
    let max = grid.cell_count() - 1;
    let dot = u32::try_from(id)
        .ok()
        .and_then(|id| grid.dot_by_id(id))
        .ok_or(DecodeError::IdOutOfRange { index, id, max })?;
    pattern.try_push(dot).map_err(|_| DecodeError::DuplicateId {
        index,
        id: dot.id(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: u16) -> Grid {
        Grid::new(size).unwrap()
    }

    fn pattern(size: u16, ids: &[u32]) -> Pattern {
        from_ids(grid(size), ids.iter().copied()).unwrap()
    }

    #[test]
    fn format_switches_past_ten_cells() {
        assert_eq!(IdFormat::for_grid(grid(1)), IdFormat::Compact);
        assert_eq!(IdFormat::for_grid(grid(3)), IdFormat::Compact);
        assert_eq!(IdFormat::for_grid(grid(4)), IdFormat::Delimited);
    }

    #[test]
    fn encode_compact_is_digit_string() {
        assert_eq!(encode(&pattern(3, &[0, 4, 8])), "048");
        assert_eq!(encode(&pattern(3, &[6, 3, 0, 1, 2])), "63012");
    }

    #[test]
    fn encode_delimited_uses_commas() {
        assert_eq!(encode(&pattern(4, &[0, 5, 10, 15])), "0,5,10,15");
        assert_eq!(encode(&pattern(5, &[24])), "24");
    }

    #[test]
    fn empty_pattern_is_empty_string() {
        assert_eq!(encode(&Pattern::new(grid(3))), "");
        assert_eq!(encode(&Pattern::new(grid(6))), "");
        assert!(decode(grid(3), "").unwrap().is_empty());
        assert!(decode(grid(6), "").unwrap().is_empty());
    }

    #[test]
    fn decode_compact() {
        let p = decode(grid(3), "2587").unwrap();
        assert_eq!(p.ids(), vec![2, 5, 8, 7]);
        let last = p.last().unwrap();
        assert_eq!((last.row(), last.column()), (2, 1));
    }

    #[test]
    fn decode_compact_rejects_out_of_range_digit() {
        assert_eq!(
            decode(grid(2), "019"),
            Err(DecodeError::IdOutOfRange {
                index: 2,
                id: 9,
                max: 3
            })
        );
    }

    #[test]
    fn decode_compact_rejects_non_digit() {
        assert_eq!(
            decode(grid(3), "01a"),
            Err(DecodeError::InvalidCharacter {
                index: 2,
                found: 'a'
            })
        );
        assert!(matches!(
            decode(grid(3), "0,1"),
            Err(DecodeError::InvalidCharacter { index: 1, .. })
        ));
    }

    #[test]
    fn decode_rejects_duplicates() {
        assert_eq!(
            decode(grid(3), "0120"),
            Err(DecodeError::DuplicateId { index: 3, id: 0 })
        );
        assert_eq!(
            decode(grid(4), "3,7,3"),
            Err(DecodeError::DuplicateId { index: 4, id: 3 })
        );
    }

    #[test]
    fn decode_delimited() {
        assert_eq!(decode(grid(4), "15,10,5,0").unwrap().ids(), vec![15, 10, 5, 0]);
    }

    #[test]
    fn decode_delimited_reports_field_offsets() {
        assert_eq!(
            decode(grid(4), "1,,2"),
            Err(DecodeError::EmptyField { index: 2 })
        );
        assert_eq!(decode(grid(4), "1,"), Err(DecodeError::EmptyField { index: 2 }));
        assert_eq!(
            decode(grid(4), "1,16"),
            Err(DecodeError::IdOutOfRange {
                index: 2,
                id: 16,
                max: 15
            })
        );
        assert_eq!(
            decode(grid(4), "1, 2"),
            Err(DecodeError::InvalidCharacter {
                index: 2,
                found: ' '
            })
        );
    }

    #[test]
    fn decode_huge_id_saturates() {
        let err = decode(grid(4), "99999999999999999999999").unwrap_err();
        assert_eq!(
            err,
            DecodeError::IdOutOfRange {
                index: 0,
                id: u64::MAX,
                max: 15
            }
        );
    }

    #[test]
    fn ids_round_trip() {
        let p = pattern(5, &[12, 7, 2, 3]);
        assert_eq!(to_ids(&p), vec![12, 7, 2, 3]);
        assert_eq!(from_ids(grid(5), to_ids(&p)).unwrap(), p);
    }

    #[test]
    fn from_ids_indexes_errors_by_position() {
        assert_eq!(
            from_ids(grid(3), [0, 9]),
            Err(DecodeError::IdOutOfRange {
                index: 1,
                id: 9,
                max: 8
            })
        );
        assert_eq!(
            from_ids(grid(3), [4, 4]),
            Err(DecodeError::DuplicateId { index: 1, id: 4 })
        );
    }

    #[tracing_test::traced_test]
    #[test]
    fn decode_failure_is_logged() {
        let _ = decode(grid(3), "x");
        assert!(logs_contain("pattern decode failed"));
    }
}
