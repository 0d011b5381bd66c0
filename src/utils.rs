use crate::engine::{State, BLANK};
use crate::error::StateError;
use std::str::FromStr;

/// Parses a puzzle written as text into a `State`.
///
/// Each digit is one cell, read row by row. `_` and `.` are accepted for
/// the blank as well as `0`. Whitespace, commas, slashes and square or round
/// brackets are ignored, so all of these describe the same state:
/// `"123406758"`, `"1 2 3 / 4 _ 6 / 7 5 8"`, `"[1, 2, 3, 4, 0, 6, 7, 5, 8]"`.
///
/// # Returns
/// * `Ok(State)` if the text names nine cells holding each of `0..=8` once.
/// * `Err(StateError::UnrecognizedCharacter)` for any other character, or the
///   errors of [`State::new`] for a wrong count or a repeated label.
///
/// # Examples
/// ```
/// use puzzle8_solver::utils::state_from_str;
/// let state = state_from_str("1 2 3 / 4 _ 6 / 7 5 8").unwrap();
/// assert_eq!(state.cells(), &[1, 2, 3, 4, 0, 6, 7, 5, 8]);
///
/// assert!(state_from_str("12340675x").is_err());
/// assert!(state_from_str("1234").is_err());
/// ```
pub fn state_from_str(s: &str) -> Result<State, StateError> {
    let mut cells = Vec::with_capacity(9);
    for (position, ch) in s.chars().enumerate() {
        match ch {
            '_' | '.' => cells.push(BLANK),
            c if c.is_ascii_digit() => cells.push(c as u8 - b'0'),
            c if c.is_whitespace() => {}
            ',' | '/' | '[' | ']' | '(' | ')' => {}
            _ => return Err(StateError::UnrecognizedCharacter { ch, position }),
        }
    }
    State::new(&cells)
}

impl FromStr for State {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        state_from_str(s)
    }
}
