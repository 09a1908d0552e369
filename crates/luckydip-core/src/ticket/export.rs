use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LuckyDipError, Result};
use crate::ticket::Ticket;

/// Flat, serializable snapshot of a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTicket {
    pub uuid: Uuid,
    pub ticket_cost: f64,
    pub main_numbers: BTreeSet<u8>,
    pub main_matches_count: usize,
    pub main_matches: BTreeSet<u8>,
    pub lucky_numbers: BTreeSet<u8>,
    pub lucky_matches_count: usize,
    pub lucky_matches: BTreeSet<u8>,
    pub winner: bool,
    pub has_all_main_numbers: bool,
    pub has_both_lucky_numbers: bool,
    pub prize: u64,
}

impl From<&Ticket> for ExportTicket {
    fn from(ticket: &Ticket) -> Self {
        Self {
            uuid: ticket.uuid,
            ticket_cost: ticket.ticket_cost,
            main_numbers: ticket.main_numbers.clone(),
            main_matches_count: ticket.main_matches_count,
            main_matches: ticket.main_matches.clone(),
            lucky_numbers: ticket.lucky_numbers.clone(),
            lucky_matches_count: ticket.lucky_matches_count,
            lucky_matches: ticket.lucky_matches.clone(),
            winner: ticket.winner,
            has_all_main_numbers: ticket.has_all_main_numbers,
            has_both_lucky_numbers: ticket.has_both_lucky_numbers,
            prize: ticket.prize,
        }
    }
}

impl Ticket {
    pub fn prepare_for_export(&self) -> ExportTicket {
        ExportTicket::from(self)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.prepare_for_export())
            .map_err(|e| LuckyDipError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::draw::Draw;
    use crate::rules::GameRules;

    #[test]
    fn test_export_carries_match_state() {
        let rules = GameRules::default();
        let mut ticket = Ticket::with_numbers(&[9, 3, 27, 14, 41], &[4, 8], &rules).unwrap();
        let draw = Draw::new(&[3, 14, 27, 30, 31], &[8, 10], &rules).unwrap();
        ticket.check_draw(&draw, &rules);

        let value: Value = serde_json::from_str(&ticket.to_json().unwrap()).unwrap();
        assert_eq!(value["uuid"], json!(ticket.uuid().to_string()));
        assert_eq!(value["ticket_cost"], json!(2.5));
        assert_eq!(value["main_numbers"], json!([3, 9, 14, 27, 41]));
        assert_eq!(value["main_matches_count"], json!(3));
        assert_eq!(value["main_matches"], json!([3, 14, 27]));
        assert_eq!(value["lucky_numbers"], json!([4, 8]));
        assert_eq!(value["lucky_matches_count"], json!(1));
        assert_eq!(value["lucky_matches"], json!([8]));
        assert_eq!(value["winner"], json!(true));
        assert_eq!(value["has_all_main_numbers"], json!(false));
        assert_eq!(value["has_both_lucky_numbers"], json!(false));
        assert_eq!(value["prize"], json!(8));
    }

    #[test]
    fn test_export_reads_back() {
        let rules = GameRules::default();
        let ticket = Ticket::random(&rules).unwrap();
        let exported = ticket.prepare_for_export();
        let parsed: ExportTicket = serde_json::from_str(&ticket.to_json().unwrap()).unwrap();
        assert_eq!(parsed, exported);
    }
}
