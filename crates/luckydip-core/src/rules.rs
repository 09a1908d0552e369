use serde::{Deserialize, Serialize};

use crate::error::{LuckyDipError, NumberKind, Result};

/// One row of the prize table: a ticket with exactly `main` main matches and
/// `lucky` lucky matches wins `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrizeRule {
    pub main: usize,
    pub lucky: usize,
    pub amount: u64,
}

impl PrizeRule {
    pub const fn new(main: usize, lucky: usize, amount: u64) -> Self {
        Self {
            main,
            lucky,
            amount,
        }
    }

    /// Tier label such as `5+2`
    pub fn label(&self) -> String {
        format!("{}+{}", self.main, self.lucky)
    }
}

/// EuroMillions tiers, best first, with nominal fixed payouts.
const DEFAULT_PRIZES: [PrizeRule; 13] = [
    PrizeRule::new(5, 2, 17_000_000),
    PrizeRule::new(5, 1, 130_000),
    PrizeRule::new(5, 0, 20_000),
    PrizeRule::new(4, 2, 1_000),
    PrizeRule::new(4, 1, 100),
    PrizeRule::new(3, 2, 50),
    PrizeRule::new(4, 0, 30),
    PrizeRule::new(2, 2, 10),
    PrizeRule::new(3, 1, 8),
    PrizeRule::new(3, 0, 7),
    PrizeRule::new(1, 2, 6),
    PrizeRule::new(2, 1, 4),
    PrizeRule::new(2, 0, 3),
];

/// Shape of a game: how many numbers of each kind a ticket holds, the range
/// they are drawn from, what a ticket costs and what it can win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub main_count: usize,
    pub main_max: u8,
    pub lucky_count: usize,
    pub lucky_max: u8,
    pub ticket_cost: f64,
    pub prizes: Vec<PrizeRule>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            main_count: 5,
            main_max: 50,
            lucky_count: 2,
            lucky_max: 12,
            ticket_cost: 2.5,
            prizes: DEFAULT_PRIZES.to_vec(),
        }
    }
}

impl GameRules {
    pub fn validate(&self) -> Result<()> {
        for (kind, count, upper) in [
            (NumberKind::Main, self.main_count, self.main_max),
            (NumberKind::Lucky, self.lucky_count, self.lucky_max),
        ] {
            if count == 0 {
                return Err(LuckyDipError::InvalidRules(format!(
                    "{kind} count must be at least 1"
                )));
            }
            if count > usize::from(upper) {
                return Err(LuckyDipError::InfeasibleDraw { kind, count, upper });
            }
        }

        if !self.ticket_cost.is_finite() || self.ticket_cost < 0.0 {
            return Err(LuckyDipError::InvalidCost(self.ticket_cost));
        }

        if let Some(rule) = self
            .prizes
            .iter()
            .find(|p| p.main > self.main_count || p.lucky > self.lucky_count)
        {
            return Err(LuckyDipError::InvalidRules(format!(
                "prize tier {} needs more matches than a {}+{} ticket holds",
                rule.label(),
                self.main_count,
                self.lucky_count
            )));
        }

        Ok(())
    }

    pub fn count_for(&self, kind: NumberKind) -> usize {
        match kind {
            NumberKind::Main => self.main_count,
            NumberKind::Lucky => self.lucky_count,
        }
    }

    pub fn max_for(&self, kind: NumberKind) -> u8 {
        match kind {
            NumberKind::Main => self.main_max,
            NumberKind::Lucky => self.lucky_max,
        }
    }

    /// Number of distinct tickets these rules allow, saturating at `u128::MAX`.
    pub fn unique_combinations(&self) -> u128 {
        binomial(self.main_max, self.main_count)
            .saturating_mul(binomial(self.lucky_max, self.lucky_count))
    }

    /// Prize tier for a match outcome, if any.
    pub fn prize_for(&self, main_matches: usize, lucky_matches: usize) -> Option<&PrizeRule> {
        self.prizes
            .iter()
            .find(|p| p.main == main_matches && p.lucky == lucky_matches)
    }
}

/// `n` choose `k`, saturating on overflow.
fn binomial(n: u8, k: usize) -> u128 {
    let n = u128::from(n);
    let k = k as u128;
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) is always divisible by (i + 1)
        acc = match acc.checked_mul(n - i) {
            Some(v) => v / (i + 1),
            None => return u128::MAX,
        };
    }
    acc
}
