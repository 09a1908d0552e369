use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LuckyDipError, NumberKind, Result};
use crate::rules::GameRules;

/// Draw `count` unique numbers from `1..=upper`.
///
/// Numbers are sampled uniformly and duplicates are rejected until the set is
/// full. Requests that can never be satisfied fail instead of looping.
pub fn draw_unique<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    upper: u8,
    kind: NumberKind,
) -> Result<BTreeSet<u8>> {
    if count > usize::from(upper) {
        return Err(LuckyDipError::InfeasibleDraw { kind, count, upper });
    }

    let mut numbers = BTreeSet::new();
    while numbers.len() < count {
        let number = rng.gen_range(1..=upper);
        if !numbers.insert(number) {
            log::trace!("rejected repeated {kind} number {number}");
        }
    }
    Ok(numbers)
}

/// Check a caller-supplied set of numbers against the rules for `kind`.
pub(crate) fn validate_numbers(
    numbers: &[u8],
    rules: &GameRules,
    kind: NumberKind,
) -> Result<BTreeSet<u8>> {
    let expected = rules.count_for(kind);
    let upper = rules.max_for(kind);

    if numbers.len() != expected {
        return Err(LuckyDipError::WrongCount {
            kind,
            expected,
            got: numbers.len(),
        });
    }

    let mut set = BTreeSet::new();
    for &number in numbers {
        if !(1..=upper).contains(&number) {
            return Err(LuckyDipError::OutOfRange {
                kind,
                number,
                upper,
            });
        }
        if !set.insert(number) {
            return Err(LuckyDipError::DuplicateNumber { kind, number });
        }
    }
    Ok(set)
}

/// The numbers drawn from the bowl for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    main: BTreeSet<u8>,
    lucky: BTreeSet<u8>,
}

impl Draw {
    pub fn new(main: &[u8], lucky: &[u8], rules: &GameRules) -> Result<Self> {
        Ok(Self {
            main: validate_numbers(main, rules, NumberKind::Main)?,
            lucky: validate_numbers(lucky, rules, NumberKind::Lucky)?,
        })
    }

    pub fn random<R: Rng + ?Sized>(rules: &GameRules, rng: &mut R) -> Result<Self> {
        rules.validate()?;
        let main = draw_unique(rng, rules.main_count, rules.main_max, NumberKind::Main)?;
        let lucky = draw_unique(rng, rules.lucky_count, rules.lucky_max, NumberKind::Lucky)?;
        log::debug!("drew main {main:?} lucky {lucky:?}");
        Ok(Self { main, lucky })
    }

    pub fn main(&self) -> &BTreeSet<u8> {
        &self.main
    }

    pub fn lucky(&self) -> &BTreeSet<u8> {
        &self.lucky
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_draws_requested_count_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for seed_round in 0..200 {
            let set = draw_unique(&mut rng, 5, 50, NumberKind::Main).unwrap();
            assert_eq!(set.len(), 5, "round {seed_round}");
            assert!(set.iter().all(|n| (1..=50).contains(n)));
        }
    }

    #[test]
    fn test_full_range_draw_terminates() {
        let mut rng = StdRng::seed_from_u64(1);
        let set = draw_unique(&mut rng, 12, 12, NumberKind::Lucky).unwrap();
        assert_eq!(set, (1..=12).collect());
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(draw_unique(&mut rng, 0, 12, NumberKind::Lucky).unwrap().is_empty());
    }

    #[test]
    fn test_infeasible_draw_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            draw_unique(&mut rng, 13, 12, NumberKind::Lucky),
            Err(LuckyDipError::InfeasibleDraw {
                kind: NumberKind::Lucky,
                count: 13,
                upper: 12
            })
        );
    }

    #[test]
    fn test_same_seed_same_draw() {
        let rules = GameRules::default();
        let a = Draw::random(&rules, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Draw::random(&rules, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_explicit_draw_validation() {
        let rules = GameRules::default();
        assert!(Draw::new(&[1, 2, 3, 4, 5], &[1, 12], &rules).is_ok());
        assert_eq!(
            Draw::new(&[1, 2, 3, 4], &[1, 2], &rules),
            Err(LuckyDipError::WrongCount {
                kind: NumberKind::Main,
                expected: 5,
                got: 4
            })
        );
        assert_eq!(
            Draw::new(&[1, 2, 3, 4, 51], &[1, 2], &rules),
            Err(LuckyDipError::OutOfRange {
                kind: NumberKind::Main,
                number: 51,
                upper: 50
            })
        );
        assert_eq!(
            Draw::new(&[1, 2, 3, 4, 5], &[0, 2], &rules),
            Err(LuckyDipError::OutOfRange {
                kind: NumberKind::Lucky,
                number: 0,
                upper: 12
            })
        );
        assert_eq!(
            Draw::new(&[1, 2, 3, 4, 5], &[3, 3], &rules),
            Err(LuckyDipError::DuplicateNumber {
                kind: NumberKind::Lucky,
                number: 3
            })
        );
    }
}
