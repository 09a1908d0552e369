use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::draw::Draw;
use crate::error::{LuckyDipError, Result};
use crate::rules::GameRules;
use crate::ticket::{Combination, ExportTicket, Ticket};

const DEFAULT_ATTEMPTS_PER_TICKET: usize = 1_000;

/// How a batch of tickets is put together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    pub number_of_tickets: usize,
    /// Overrides the rules' ticket cost when set.
    pub ticket_cost: Option<f64>,
    pub duplicate_tickets: bool,
    /// Upper bound on tickets drawn while hunting for unique ones.
    /// Defaults to 1000 per requested ticket.
    pub max_attempts: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            number_of_tickets: 5,
            ticket_cost: None,
            duplicate_tickets: false,
            max_attempts: None,
        }
    }
}

impl BatchOptions {
    pub fn attempt_limit(&self) -> usize {
        self.max_attempts.unwrap_or_else(|| {
            self.number_of_tickets
                .saturating_mul(DEFAULT_ATTEMPTS_PER_TICKET)
        })
    }
}

/// An ordered list of tickets bought together.
#[derive(Debug, Clone)]
pub struct TicketBatch {
    tickets: Vec<Ticket>,
    /// Distinct combinations among `tickets`
    combinations: HashSet<Combination>,
    total_cost: f64,
    duplicate_tickets: bool,
}

impl TicketBatch {
    pub fn new(duplicate_tickets: bool) -> Self {
        Self {
            tickets: Vec::new(),
            combinations: HashSet::new(),
            total_cost: 0.0,
            duplicate_tickets,
        }
    }

    fn with_capacity(capacity: usize, duplicate_tickets: bool) -> Self {
        Self {
            tickets: Vec::with_capacity(capacity),
            combinations: HashSet::with_capacity(capacity),
            ..Self::new(duplicate_tickets)
        }
    }

    /// Draw a batch of tickets.
    ///
    /// With duplicates disallowed, tickets whose numbers repeat an earlier
    /// ticket are thrown away and redrawn.
    pub fn generate<R: Rng + ?Sized>(
        rules: &GameRules,
        options: &BatchOptions,
        rng: &mut R,
    ) -> Result<Self> {
        rules.validate()?;
        let cost = options.ticket_cost.unwrap_or(rules.ticket_cost);
        let requested = options.number_of_tickets;

        let batch = if options.duplicate_tickets {
            let mut batch = Self::with_capacity(requested, true);
            for _ in 0..requested {
                let ticket = Ticket::generate_with_cost(rules, cost, rng)?;
                batch.push(ticket)?;
            }
            batch
        } else {
            Self::generate_unique(rules, cost, requested, options.attempt_limit(), rng)?
        };

        log::info!(
            "generated {} tickets, total cost {:.2}",
            batch.len(),
            batch.total_cost
        );
        Ok(batch)
    }

    /// Draw a batch from the thread-local rng.
    pub fn random(rules: &GameRules, options: &BatchOptions) -> Result<Self> {
        Self::generate(rules, options, &mut rand::thread_rng())
    }

    fn generate_unique<R: Rng + ?Sized>(
        rules: &GameRules,
        cost: f64,
        requested: usize,
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let available = rules.unique_combinations();
        if requested as u128 > available {
            return Err(LuckyDipError::NotEnoughCombinations {
                requested,
                available,
            });
        }

        let mut batch = Self::with_capacity(requested, false);
        let mut attempts = 0;

        while batch.len() < requested {
            if attempts >= max_attempts {
                return Err(LuckyDipError::AttemptsExhausted {
                    requested,
                    generated: batch.len(),
                    attempts,
                });
            }
            attempts += 1;

            let ticket = Ticket::generate_with_cost(rules, cost, rng)?;
            if let Err(ticket) = batch.insert(ticket) {
                log::debug!("ticket {} repeats an earlier combination, redrawing", ticket.uuid());
            }
        }

        log::debug!("{requested} unique tickets after {attempts} attempts");
        Ok(batch)
    }

    /// Collect existing tickets, rejecting repeats unless duplicates are allowed.
    pub fn from_tickets(tickets: Vec<Ticket>, duplicate_tickets: bool) -> Result<Self> {
        let mut batch = Self::with_capacity(tickets.len(), duplicate_tickets);
        for ticket in tickets {
            batch.push(ticket)?;
        }
        Ok(batch)
    }

    pub fn push(&mut self, ticket: Ticket) -> Result<()> {
        self.insert(ticket)
            .map_err(|ticket| LuckyDipError::DuplicateTicket(ticket.uuid()))
    }

    /// Add a ticket, handing it back when its combination is already taken
    /// and duplicates are disallowed.
    fn insert(&mut self, ticket: Ticket) -> std::result::Result<(), Ticket> {
        let fresh = self.combinations.insert(ticket.combination());
        if !fresh && !self.duplicate_tickets {
            return Err(ticket);
        }
        self.total_cost += ticket.cost();
        self.tickets.push(ticket);
        Ok(())
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ticket> {
        self.tickets.iter()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn allows_duplicates(&self) -> bool {
        self.duplicate_tickets
    }

    pub fn has_duplicate_combinations(&self) -> bool {
        self.combinations.len() != self.tickets.len()
    }

    pub fn winners(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(|t| t.is_winner())
    }

    /// Check every ticket against a draw and total up the results.
    pub fn check_draw(&mut self, draw: &Draw, rules: &GameRules) -> BatchSummary {
        let mut summary = BatchSummary {
            tickets: self.tickets.len(),
            total_cost: self.total_cost,
            ..BatchSummary::default()
        };

        for ticket in &mut self.tickets {
            let tier = ticket.check_draw(draw, rules);
            if ticket.is_winner() {
                summary.winners += 1;
            }
            if ticket.is_jackpot() {
                summary.jackpots += 1;
            }
            if let Some(tier) = tier {
                summary.total_prize = summary.total_prize.saturating_add(tier.amount);
                *summary.tiers.entry(tier.label()).or_insert(0) += 1;
            }
        }

        log::info!(
            "checked {} tickets: {} winners, {} in prizes",
            summary.tickets,
            summary.winners,
            summary.total_prize
        );
        summary
    }

    pub fn export(&self) -> Vec<ExportTicket> {
        self.tickets.iter().map(ExportTicket::from).collect()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.export())
            .map_err(|e| LuckyDipError::Export(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a TicketBatch {
    type Item = &'a Ticket;
    type IntoIter = std::slice::Iter<'a, Ticket>;

    fn into_iter(self) -> Self::IntoIter {
        self.tickets.iter()
    }
}

impl Display for TicketBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "lucky dip tickets: {}", self.tickets.len())?;
        write!(f, "duplicate tickets: {}", self.duplicate_tickets)
    }
}

/// Totals for a batch checked against one draw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub tickets: usize,
    pub winners: usize,
    pub jackpots: usize,
    pub total_cost: f64,
    /// Sum of payouts, saturating at `u64::MAX`
    pub total_prize: u64,
    /// Ticket count per prize tier, keyed by label (`5+2`, `4+1`, ...)
    pub tiers: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn net(&self) -> f64 {
        self.total_prize as f64 - self.total_cost
    }
}

impl Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "tickets checked:   {}", self.tickets)?;
        writeln!(f, "winners:           {}", self.winners)?;
        writeln!(f, "jackpots:          {}", self.jackpots)?;
        writeln!(f, "total cost:        {:.2}", self.total_cost)?;
        write!(f, "total prize:       {}", self.total_prize)?;
        for (tier, count) in &self.tiers {
            write!(f, "\n  {tier:<5} x {count}")?;
        }
        Ok(())
    }
}
