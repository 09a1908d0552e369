//! Lucky dip lottery tickets.
//!
//! Tickets draw their main and lucky numbers at creation, are checked number
//! by number against a draw and can be bought and settled in batches.

pub mod batch;
pub mod config;
pub mod draw;
pub mod error;
pub mod rules;
pub mod ticket;

pub use batch::{BatchOptions, BatchSummary, TicketBatch};
pub use config::LuckyDipConfig;
pub use draw::{Draw, draw_unique};
pub use error::{LuckyDipError, NumberKind};
pub use rules::{GameRules, PrizeRule};
pub use ticket::{Combination, ExportTicket, Ticket};
