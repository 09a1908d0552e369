use crate::draw::Draw;
use crate::rules::{GameRules, PrizeRule};
use crate::ticket::Ticket;

impl Ticket {
    /// Check a main number drawn from the bowl against this ticket.
    ///
    /// A number already recorded as a match is ignored, so the counter always
    /// equals the number of distinct matches.
    pub fn check_main(&mut self, number_drawn: u8) {
        if self.main_numbers.contains(&number_drawn) && self.main_matches.insert(number_drawn) {
            self.main_matches_count += 1;
            self.winner = true;

            if self.main_matches_count == self.main_total {
                self.has_all_main_numbers = true;
            }
        }
    }

    /// Check a lucky number drawn from the bowl against this ticket.
    pub fn check_lucky(&mut self, number_drawn: u8) {
        if self.lucky_numbers.contains(&number_drawn) && self.lucky_matches.insert(number_drawn) {
            self.lucky_matches_count += 1;
            self.winner = true;

            if self.lucky_matches_count == self.lucky_total {
                self.has_both_lucky_numbers = true;
            }
        }
    }

    /// Check every number of a draw, then settle the prize.
    pub fn check_draw(&mut self, draw: &Draw, rules: &GameRules) -> Option<PrizeRule> {
        for &number in draw.main() {
            self.check_main(number);
        }
        for &number in draw.lucky() {
            self.check_lucky(number);
        }
        self.settle(rules)
    }

    /// Look the current matches up in the prize table and record the payout.
    pub fn settle(&mut self, rules: &GameRules) -> Option<PrizeRule> {
        let tier = rules
            .prize_for(self.main_matches_count, self.lucky_matches_count)
            .copied();
        self.prize = tier.map_or(0, |t| t.amount);
        tier
    }
}
