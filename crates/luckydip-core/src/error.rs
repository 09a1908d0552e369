use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Which of the two number pools a number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    Main,
    Lucky,
}

impl Display for NumberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Lucky => write!(f, "lucky"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LuckyDipError {
    #[error("cannot draw {count} unique {kind} numbers from 1..={upper}")]
    InfeasibleDraw {
        kind: NumberKind,
        count: usize,
        upper: u8,
    },

    #[error("invalid game rules: {0}")]
    InvalidRules(String),

    #[error("ticket cost must be a finite, non-negative amount, got {0}")]
    InvalidCost(f64),

    #[error("expected {expected} {kind} numbers, got {got}")]
    WrongCount {
        kind: NumberKind,
        expected: usize,
        got: usize,
    },

    #[error("{kind} number {number} is out of range (1-{upper})")]
    OutOfRange {
        kind: NumberKind,
        number: u8,
        upper: u8,
    },

    #[error("duplicate {kind} number {number}")]
    DuplicateNumber { kind: NumberKind, number: u8 },

    #[error("requested {requested} unique tickets but only {available} combinations exist")]
    NotEnoughCombinations { requested: usize, available: u128 },

    #[error("gave up after {attempts} attempts with {generated} of {requested} unique tickets")]
    AttemptsExhausted {
        requested: usize,
        generated: usize,
        attempts: usize,
    },

    #[error("ticket {0} duplicates the numbers of a ticket already in the batch")]
    DuplicateTicket(uuid::Uuid),

    #[error("export failed: {0}")]
    Export(String),
}

pub type Result<T, E = LuckyDipError> = std::result::Result<T, E>;
