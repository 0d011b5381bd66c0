//! Error types for building puzzle states.
//!
//! Running out of frontier is not an error: the solvers report it as `None`.

use thiserror::Error;

/// Reasons a cell sequence cannot become a [`crate::engine::State`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The sequence does not hold exactly nine cells.
    #[error("Expected {expected} cells, found {found}")]
    WrongLength {
        /// The required number of cells.
        expected: usize,
        /// The number of cells supplied.
        found: usize,
    },

    /// A label outside `0..=8` was supplied.
    #[error("Label {label} at position {index} is out of range (expected 0-8)")]
    LabelOutOfRange {
        /// The offending label.
        label: u8,
        /// Row-major position of the label.
        index: usize,
    },

    /// A label appears more than once, so another one is missing.
    #[error("Label {label} appears more than once")]
    DuplicateLabel {
        /// The repeated label.
        label: u8,
    },

    /// Text input contained a character that is neither a digit, a blank
    /// marker nor a separator.
    #[error("Unrecognized character '{ch}' at position {position}")]
    UnrecognizedCharacter {
        /// The rejected character.
        ch: char,
        /// Character offset in the input.
        position: usize,
    },
}
