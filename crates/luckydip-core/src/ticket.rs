mod check;
mod def;
mod export;

pub use def::{Combination, Ticket};
pub use export::ExportTicket;
