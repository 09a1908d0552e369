use std::collections::BTreeSet;
use std::fmt::Display;

use console::style;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draw::{draw_unique, validate_numbers};
use crate::error::{LuckyDipError, NumberKind, Result};
use crate::rules::GameRules;

/// The numbers a ticket plays. Two tickets are duplicates when their
/// combinations are equal, whatever their identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Combination {
    pub main: BTreeSet<u8>,
    pub lucky: BTreeSet<u8>,
}

/// A lucky dip ticket.
///
/// The numbers are fixed at creation. Match state only changes through
/// [`Ticket::check_main`], [`Ticket::check_lucky`] and [`Ticket::settle`].
#[derive(Debug, Clone)]
pub struct Ticket {
    pub(super) uuid: Uuid,
    pub(super) ticket_cost: f64,
    pub(super) main_numbers: BTreeSet<u8>,
    pub(super) main_total: usize,
    pub(super) main_matches_count: usize,
    pub(super) main_matches: BTreeSet<u8>,
    pub(super) lucky_numbers: BTreeSet<u8>,
    pub(super) lucky_total: usize,
    pub(super) lucky_matches_count: usize,
    pub(super) lucky_matches: BTreeSet<u8>,
    pub(super) winner: bool,
    pub(super) has_all_main_numbers: bool,
    pub(super) has_both_lucky_numbers: bool,
    pub(super) prize: u64,
}

impl Ticket {
    /// Draw a fresh ticket at the rules' ticket cost.
    pub fn generate<R: Rng + ?Sized>(rules: &GameRules, rng: &mut R) -> Result<Self> {
        Self::generate_with_cost(rules, rules.ticket_cost, rng)
    }

    pub fn generate_with_cost<R: Rng + ?Sized>(
        rules: &GameRules,
        ticket_cost: f64,
        rng: &mut R,
    ) -> Result<Self> {
        rules.validate()?;
        check_cost(ticket_cost)?;

        // uuid comes from the same rng so seeded runs repeat exactly
        let uuid = uuid::Builder::from_random_bytes(rng.r#gen::<[u8; 16]>()).into_uuid();
        let main_numbers = draw_unique(rng, rules.main_count, rules.main_max, NumberKind::Main)?;
        let lucky_numbers =
            draw_unique(rng, rules.lucky_count, rules.lucky_max, NumberKind::Lucky)?;

        Ok(Self::assemble(
            uuid,
            ticket_cost,
            main_numbers,
            lucky_numbers,
            rules,
        ))
    }

    /// Draw a ticket from the thread-local rng.
    pub fn random(rules: &GameRules) -> Result<Self> {
        Self::generate(rules, &mut rand::thread_rng())
    }

    /// Build a ticket from numbers picked by hand.
    pub fn with_numbers(main: &[u8], lucky: &[u8], rules: &GameRules) -> Result<Self> {
        rules.validate()?;
        let main_numbers = validate_numbers(main, rules, NumberKind::Main)?;
        let lucky_numbers = validate_numbers(lucky, rules, NumberKind::Lucky)?;
        Ok(Self::assemble(
            Uuid::new_v4(),
            rules.ticket_cost,
            main_numbers,
            lucky_numbers,
            rules,
        ))
    }

    fn assemble(
        uuid: Uuid,
        ticket_cost: f64,
        main_numbers: BTreeSet<u8>,
        lucky_numbers: BTreeSet<u8>,
        rules: &GameRules,
    ) -> Self {
        Self {
            uuid,
            ticket_cost,
            main_numbers,
            main_total: rules.main_count,
            main_matches_count: 0,
            main_matches: BTreeSet::new(),
            lucky_numbers,
            lucky_total: rules.lucky_count,
            lucky_matches_count: 0,
            lucky_matches: BTreeSet::new(),
            winner: false,
            has_all_main_numbers: false,
            has_both_lucky_numbers: false,
            prize: 0,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn cost(&self) -> f64 {
        self.ticket_cost
    }

    pub fn main_numbers(&self) -> &BTreeSet<u8> {
        &self.main_numbers
    }

    pub fn lucky_numbers(&self) -> &BTreeSet<u8> {
        &self.lucky_numbers
    }

    pub fn main_matches(&self) -> &BTreeSet<u8> {
        &self.main_matches
    }

    pub fn lucky_matches(&self) -> &BTreeSet<u8> {
        &self.lucky_matches
    }

    pub fn main_matches_count(&self) -> usize {
        self.main_matches_count
    }

    pub fn lucky_matches_count(&self) -> usize {
        self.lucky_matches_count
    }

    pub fn is_winner(&self) -> bool {
        self.winner
    }

    pub fn has_all_main_numbers(&self) -> bool {
        self.has_all_main_numbers
    }

    pub fn has_both_lucky_numbers(&self) -> bool {
        self.has_both_lucky_numbers
    }

    pub fn is_jackpot(&self) -> bool {
        self.has_all_main_numbers && self.has_both_lucky_numbers
    }

    pub fn prize(&self) -> u64 {
        self.prize
    }

    pub fn combination(&self) -> Combination {
        Combination {
            main: self.main_numbers.clone(),
            lucky: self.lucky_numbers.clone(),
        }
    }

    /// Structural equality: same main and lucky numbers.
    pub fn same_numbers(&self, other: &Self) -> bool {
        self.main_numbers == other.main_numbers && self.lucky_numbers == other.lucky_numbers
    }
}

fn check_cost(cost: f64) -> Result<()> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(())
    } else {
        Err(LuckyDipError::InvalidCost(cost))
    }
}

fn join(numbers: &BTreeSet<u8>) -> String {
    numbers
        .iter()
        .map(|n| format!("{n:>2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "uuid:              {}", self.uuid)?;
        writeln!(
            f,
            "main numbers:      {}",
            style(join(&self.main_numbers)).red().bold()
        )?;
        write!(
            f,
            "lucky numbers:     {}",
            style(join(&self.lucky_numbers)).yellow().bold()
        )
    }
}
