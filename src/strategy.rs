use crate::counting::CountState;
use crate::errors::EngineError;
use crate::probability;
use crate::session::hand::Hand;
use crate::session::shoe::Shoe;
use crate::session::Rank;
use crate::{Action, DoublePolicy, TableRules};

/// Chart entry: the preferred action plus the fallback played when the
/// preferred one is not available at the table (no double on three cards,
/// no late surrender, and so on).
type Entry = (Action, Action);

const H: Entry = (Action::Hit, Action::Hit);
const S: Entry = (Action::Stand, Action::Stand);
const P: Entry = (Action::Split, Action::Split);
const DH: Entry = (Action::Double, Action::Hit);
const DS: Entry = (Action::Double, Action::Stand);
const RH: Entry = (Action::Surrender, Action::Hit);
const RS: Entry = (Action::Surrender, Action::Stand);
const RP: Entry = (Action::Surrender, Action::Split);

// Columns are the dealer up-card value 1..=10, Ace first. Hard rows cover
// totals 5 through 18, clamped outward on both ends.
const HARD_CHART: [[Entry; 10]; 14] = [
    [H, H, H, H, H, H, H, H, H, H], // 5
    [H, H, H, H, H, H, H, H, H, H],
    [H, H, H, H, H, H, H, H, H, H],
    [H, H, H, H, H, H, H, H, H, H],
    [H, H, DH, DH, DH, DH, H, H, H, H],
    [H, DH, DH, DH, DH, DH, DH, DH, DH, H],
    [DH, DH, DH, DH, DH, DH, DH, DH, DH, DH],
    [H, H, H, S, S, S, H, H, H, H],
    [H, S, S, S, S, S, H, H, H, H],
    [H, S, S, S, S, S, H, H, H, H],
    [RH, S, S, S, S, S, H, H, H, RH],
    [RH, S, S, S, S, S, H, H, RH, RH],
    [RS, S, S, S, S, S, S, S, S, S], // 17
    [S, S, S, S, S, S, S, S, S, S], // 18 and above
];

// Soft rows cover totals 13 (Ace-2) through 21 (Ace-10); soft 12 is the
// special two-Ace case handled in the lookup.
const SOFT_CHART: [[Entry; 10]; 9] = [
    [H, H, H, H, DH, DH, H, H, H, H], // Ace + 2
    [H, H, H, H, DH, DH, H, H, H, H],
    [H, H, H, DH, DH, DH, H, H, H, H],
    [H, H, H, DH, DH, DH, H, H, H, H],
    [H, H, DH, DH, DH, DH, H, H, H, H],
    [H, DS, DS, DS, DS, DS, S, S, H, H],
    [S, S, S, S, S, DS, S, S, S, S],
    [S, S, S, S, S, S, S, S, S, S], // Ace + 9
    [S, S, S, S, S, S, S, S, S, S], // Ace + 10
];

// Pair rows cover the paired card value, Aces first.
const PAIR_CHART: [[Entry; 10]; 10] = [
    [P, P, P, P, P, P, P, P, P, P], // A,A
    [H, P, P, P, P, P, P, H, H, H], // 2,2
    [H, P, P, P, P, P, P, H, H, H],
    [H, H, H, H, P, P, H, H, H, H],
    [H, DH, DH, DH, DH, DH, DH, DH, DH, H],
    [H, P, P, P, P, P, H, H, H, H],
    [H, P, P, P, P, P, P, H, H, H],
    [RP, P, P, P, P, P, P, P, P, P], // 8,8
    [S, P, P, P, P, P, S, P, P, S],
    [S, S, S, S, S, S, S, S, S, S], // T,T
];

/// How a hand is addressed in the charts: its class plus the class-specific
/// key (total for hard and soft hands, paired card value for pairs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandKey {
    Hard(u16),
    Soft(u16),
    Pair(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    AtOrAbove,
    AtOrBelow,
}

/// A count-conditioned override of the base chart action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    pub key: HandKey,
    /// Dealer up-card value, 1..=10 with 1 for the Ace.
    pub dealer_up: u8,
    pub threshold: f64,
    pub trigger: Trigger,
    pub action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation {
    pub action: Action,
    /// One-draw bust probability, attached only when the recommended action
    /// is Hit or Double and the risk exceeds one half.
    pub bust_probability: Option<f64>,
}

/// The base charts plus the deviation rules. Immutable once built and
/// validated; independent of any shoe.
#[derive(Debug, Clone)]
pub struct StrategyTable {
    hard: [[Entry; 10]; 14],
    soft: [[Entry; 10]; 9],
    pairs: [[Entry; 10]; 10],
    deviations: Vec<Deviation>,
}

/// The Hi-Lo deviation set the original advisor shipped with.
pub fn standard_deviations() -> Vec<Deviation> {
    use Action::*;
    use HandKey::*;
    use Trigger::*;
    vec![
        Deviation { key: Hard(16), dealer_up: 10, threshold: 0.0, trigger: AtOrAbove, action: Stand },
        Deviation { key: Hard(15), dealer_up: 10, threshold: 4.0, trigger: AtOrAbove, action: Stand },
        Deviation { key: Hard(12), dealer_up: 3, threshold: 2.0, trigger: AtOrAbove, action: Stand },
        Deviation { key: Hard(12), dealer_up: 2, threshold: 3.0, trigger: AtOrAbove, action: Stand },
        Deviation { key: Hard(11), dealer_up: 1, threshold: 1.0, trigger: AtOrAbove, action: Double },
        Deviation { key: Hard(10), dealer_up: 1, threshold: 4.0, trigger: AtOrAbove, action: Double },
        Deviation { key: Hard(9), dealer_up: 2, threshold: 1.0, trigger: AtOrAbove, action: Double },
        Deviation { key: Pair(10), dealer_up: 5, threshold: -4.0, trigger: AtOrBelow, action: Split },
        Deviation { key: Pair(10), dealer_up: 6, threshold: -4.0, trigger: AtOrBelow, action: Split },
    ]
}

impl StrategyTable {
    pub fn standard() -> Result<StrategyTable, EngineError> {
        Self::with_deviations(standard_deviations())
    }

    /// Builds the table with the standard charts and a caller-supplied
    /// deviation set, validating completeness before handing it out.
    pub fn with_deviations(deviations: Vec<Deviation>) -> Result<StrategyTable, EngineError> {
        let table = StrategyTable {
            hard: HARD_CHART,
            soft: SOFT_CHART,
            pairs: PAIR_CHART,
            deviations,
        };
        table.validate()?;
        Ok(table)
    }

    /// Walks every reachable key and checks that it resolves to an entry
    /// whose fallback is unconditionally playable, then sanity-checks the
    /// deviation rules.
    pub fn validate(&self) -> Result<(), EngineError> {
        for dealer_up in 1..=10u8 {
            for total in 4..=21u16 {
                check_fallback(self.entry(HandKey::Hard(total), dealer_up), false)?;
            }
            for total in 12..=21u16 {
                check_fallback(self.entry(HandKey::Soft(total), dealer_up), false)?;
            }
            for value in 1..=10u8 {
                check_fallback(self.entry(HandKey::Pair(value), dealer_up), true)?;
            }
        }
        for deviation in &self.deviations {
            if !(1..=10).contains(&deviation.dealer_up) {
                return Err(EngineError::IncompleteStrategyTable {
                    reason: "deviation dealer up-card out of range",
                });
            }
            if !deviation.threshold.is_finite() {
                return Err(EngineError::IncompleteStrategyTable {
                    reason: "deviation threshold must be finite",
                });
            }
        }
        Ok(())
    }

    fn entry(&self, key: HandKey, dealer_up: u8) -> Entry {
        let col = (dealer_up - 1) as usize;
        match key {
            HandKey::Hard(total) => {
                let row = (total.clamp(5, 18) - 5) as usize;
                self.hard[row][col]
            }
            HandKey::Soft(total) => {
                if total <= 12 {
                    // Two Aces past the split limit: always draw.
                    H
                } else {
                    let row = (total.min(21) - 13) as usize;
                    self.soft[row][col]
                }
            }
            HandKey::Pair(value) => self.pairs[(value - 1) as usize][col],
        }
    }

    /// Resolves the recommended action for the player's hand against the
    /// dealer's up-card: classify, look up the base entry, filter it by
    /// table eligibility, then let the tightest satisfied deviation
    /// override. The bust-risk annotation never changes the action.
    pub fn recommend(
        &self,
        rules: &TableRules,
        hand: &Hand,
        dealer_up: Rank,
        counts: &CountState,
        shoe: &Shoe,
        split_count_so_far: u8,
        is_first_decision: bool,
    ) -> Result<Recommendation, EngineError> {
        if hand.cards().len() < 2 {
            return Err(EngineError::InvalidHand {
                reason: "a recommendation needs at least two cards",
            });
        }
        let total = hand.best_total();
        if total > 21 {
            return Err(EngineError::InvalidHand {
                reason: "hand has already bust",
            });
        }

        let key = if hand.is_pair() && split_count_so_far < rules.max_resplits {
            HandKey::Pair(hand.cards()[0].value())
        } else if hand.is_soft() {
            HandKey::Soft(total)
        } else {
            HandKey::Hard(total)
        };
        let up = dealer_up.value();

        let (preferred, fallback) = self.entry(key, up);
        let base = if available(preferred, rules, hand, split_count_so_far, is_first_decision) {
            preferred
        } else {
            fallback
        };

        let true_count = counts.true_count(shoe);
        let mut chosen: Option<&Deviation> = None;
        for deviation in &self.deviations {
            if deviation.key != key || deviation.dealer_up != up {
                continue;
            }
            let triggered = match deviation.trigger {
                Trigger::AtOrAbove => true_count >= deviation.threshold,
                Trigger::AtOrBelow => true_count <= deviation.threshold,
            };
            if !triggered {
                continue;
            }
            if !available(deviation.action, rules, hand, split_count_so_far, is_first_decision) {
                continue;
            }
            // Tightest threshold wins; earlier declaration breaks ties.
            match chosen {
                Some(current) if deviation.threshold.abs() >= current.threshold.abs() => {}
                _ => chosen = Some(deviation),
            }
        }
        let action = chosen.map(|deviation| deviation.action).unwrap_or(base);

        let bust_probability = match action {
            Action::Hit | Action::Double => {
                match probability::bust_probability(total, hand.is_soft(), shoe) {
                    Ok(p) if p > 0.5 => Some(p),
                    // An unestimatable risk is no annotation, not 0%.
                    _ => None,
                }
            }
            _ => None,
        };

        Ok(Recommendation {
            action,
            bust_probability,
        })
    }
}

fn check_fallback(entry: Entry, in_pair_chart: bool) -> Result<(), EngineError> {
    match entry.1 {
        Action::Hit | Action::Stand => Ok(()),
        Action::Split if in_pair_chart => Ok(()),
        _ => Err(EngineError::IncompleteStrategyTable {
            reason: "fallback action must be unconditionally playable",
        }),
    }
}

fn available(
    action: Action,
    rules: &TableRules,
    hand: &Hand,
    split_count_so_far: u8,
    is_first_decision: bool,
) -> bool {
    match action {
        Action::Hit | Action::Stand => true,
        Action::Split => hand.is_pair() && split_count_so_far < rules.max_resplits,
        Action::Double => {
            hand.cards().len() == 2
                && (split_count_so_far == 0 || rules.allow_das)
                && double_allowed_by_policy(rules.double_policy, hand)
        }
        Action::Surrender => {
            rules.allow_late_surrender && is_first_decision && hand.cards().len() == 2
        }
    }
}

fn double_allowed_by_policy(policy: DoublePolicy, hand: &Hand) -> bool {
    match policy {
        DoublePolicy::AnyTwo => true,
        DoublePolicy::NineTenElevenOnly => !hand.is_soft() && (9..=11).contains(&hand.best_total()),
        DoublePolicy::TenElevenOnly => !hand.is_soft() && (10..=11).contains(&hand.best_total()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for rank in ranks {
            hand.receive_card(*rank);
        }
        hand
    }

    fn recommend_with_count(
        rules: &TableRules,
        hand: &Hand,
        dealer_up: Rank,
        running: &[Rank],
        split_count_so_far: u8,
        is_first_decision: bool,
    ) -> Recommendation {
        let table = StrategyTable::standard().unwrap();
        let shoe = Shoe::new(rules.number_of_decks).unwrap();
        let mut counts = CountState::new();
        for rank in running {
            counts.observe(*rank);
        }
        table
            .recommend(rules, hand, dealer_up, &counts, &shoe, split_count_so_far, is_first_decision)
            .unwrap()
    }

    #[test]
    fn shipped_table_passes_validation() {
        assert!(StrategyTable::standard().is_ok());
    }

    #[test]
    fn hard_sixteen_vs_ten_hits_at_a_negative_count() {
        let rules = TableRules::default();
        let hand = hand_of(&[Rank::Ten, Rank::Six]);
        // Three high cards seen: running -3, no deviation triggers and
        // surrender is off the table after the first decision.
        let rec = recommend_with_count(
            &rules,
            &hand,
            Rank::King,
            &[Rank::Ten, Rank::Jack, Rank::Queen],
            0,
            false,
        );
        assert_eq!(rec.action, Action::Hit);
        assert!(rec.bust_probability.is_some());
    }

    #[test]
    fn hard_sixteen_vs_ten_stands_once_the_count_turns() {
        let rules = TableRules::default();
        let hand = hand_of(&[Rank::Ten, Rank::Six]);
        let rec = recommend_with_count(
            &rules,
            &hand,
            Rank::Ten,
            &[Rank::Two, Rank::Three, Rank::Four],
            0,
            false,
        );
        assert_eq!(rec.action, Action::Stand);
        assert_eq!(rec.bust_probability, None);
    }

    #[test]
    fn first_decision_sixteen_vs_ten_surrenders() {
        let rules = TableRules::default();
        let hand = hand_of(&[Rank::Ten, Rank::Six]);
        let rec = recommend_with_count(
            &rules,
            &hand,
            Rank::Ten,
            &[Rank::Ten, Rank::Jack, Rank::Queen],
            0,
            true,
        );
        assert_eq!(rec.action, Action::Surrender);
    }

    #[test]
    fn exhausted_splits_turn_eights_into_hard_sixteen() {
        let rules = TableRules::default();
        let hand = hand_of(&[Rank::Eight, Rank::Eight]);
        // Negative count so the sixteen-vs-ten deviation stays quiet.
        let rec = recommend_with_count(
            &rules,
            &hand,
            Rank::Ten,
            &[Rank::Ten, Rank::Jack],
            rules.max_resplits,
            false,
        );
        assert_eq!(rec.action, Action::Hit);

        let rec = recommend_with_count(&rules, &hand, Rank::Ten, &[Rank::Ten, Rank::Jack], 0, false);
        assert_eq!(rec.action, Action::Split);
    }

    #[test]
    fn eleven_doubles_only_on_the_first_two_cards() {
        let rules = TableRules::default();
        let rec = recommend_with_count(
            &rules,
            &hand_of(&[Rank::Six, Rank::Five]),
            Rank::Six,
            &[],
            0,
            true,
        );
        assert_eq!(rec.action, Action::Double);

        let rec = recommend_with_count(
            &rules,
            &hand_of(&[Rank::Three, Rank::Four, Rank::Four]),
            Rank::Six,
            &[],
            0,
            false,
        );
        assert_eq!(rec.action, Action::Hit);
    }

    #[test]
    fn soft_eighteen_falls_back_to_stand_on_three_cards() {
        let rules = TableRules::default();
        let rec = recommend_with_count(
            &rules,
            &hand_of(&[Rank::Ace, Rank::Seven]),
            Rank::Six,
            &[],
            0,
            true,
        );
        assert_eq!(rec.action, Action::Double);

        let rec = recommend_with_count(
            &rules,
            &hand_of(&[Rank::Ace, Rank::Three, Rank::Four]),
            Rank::Six,
            &[],
            0,
            false,
        );
        assert_eq!(rec.action, Action::Stand);
    }

    #[test]
    fn double_policy_gates_the_double() {
        let rules = TableRules {
            double_policy: DoublePolicy::TenElevenOnly,
            ..Default::default()
        };
        // Hard 9 vs 4 prefers Double but the policy only allows 10 and 11.
        let rec = recommend_with_count(
            &rules,
            &hand_of(&[Rank::Four, Rank::Five]),
            Rank::Four,
            &[],
            0,
            true,
        );
        assert_eq!(rec.action, Action::Hit);
    }

    #[test]
    fn tens_split_only_at_a_deeply_negative_count() {
        let rules = TableRules::default();
        let hand = hand_of(&[Rank::King, Rank::Queen]);
        let rec = recommend_with_count(&rules, &hand, Rank::Five, &[], 0, true);
        assert_eq!(rec.action, Action::Stand);

        let seen_tens: Vec<Rank> = std::iter::repeat(Rank::Ten).take(5).collect();
        let rec = recommend_with_count(&rules, &hand, Rank::Five, &seen_tens, 0, true);
        assert_eq!(rec.action, Action::Split);
    }

    #[test]
    fn two_aces_past_the_split_limit_just_hit() {
        let rules = TableRules::default();
        let hand = hand_of(&[Rank::Ace, Rank::Ace]);
        let rec = recommend_with_count(&rules, &hand, Rank::Six, &[], rules.max_resplits, false);
        assert_eq!(rec.action, Action::Hit);
    }

    #[test]
    fn tightest_threshold_wins_among_overlapping_deviations() {
        let deviations = vec![
            Deviation {
                key: HandKey::Hard(16),
                dealer_up: 10,
                threshold: 3.0,
                trigger: Trigger::AtOrAbove,
                action: Action::Hit,
            },
            Deviation {
                key: HandKey::Hard(16),
                dealer_up: 10,
                threshold: 1.0,
                trigger: Trigger::AtOrAbove,
                action: Action::Stand,
            },
        ];
        let table = StrategyTable::with_deviations(deviations).unwrap();
        let rules = TableRules::default();
        let shoe = Shoe::new(1).unwrap();
        let mut counts = CountState::new();
        for _ in 0..5 {
            counts.observe(Rank::Two);
        }
        // True count 5.0 satisfies both rules; |1.0| is tighter than |3.0|.
        let rec = table
            .recommend(
                &rules,
                &hand_of(&[Rank::Nine, Rank::Seven]),
                Rank::Ten,
                &counts,
                &shoe,
                0,
                false,
            )
            .unwrap();
        assert_eq!(rec.action, Action::Stand);
    }

    #[test]
    fn short_or_busted_hands_are_caller_errors() {
        let table = StrategyTable::standard().unwrap();
        let rules = TableRules::default();
        let shoe = Shoe::new(1).unwrap();
        let counts = CountState::new();

        let err = table
            .recommend(&rules, &Hand::new(), Rank::Five, &counts, &shoe, 0, true)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidHand { .. }));

        let busted = hand_of(&[Rank::King, Rank::Queen, Rank::Five]);
        let err = table
            .recommend(&rules, &busted, Rank::Five, &counts, &shoe, 0, false)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidHand { .. }));
    }

    #[test]
    fn risky_hit_carries_the_bust_probability() {
        let rules = TableRules::default();
        let rec = recommend_with_count(
            &rules,
            &hand_of(&[Rank::Nine, Rank::Seven]),
            Rank::Seven,
            &[],
            0,
            true,
        );
        assert_eq!(rec.action, Action::Hit);
        let p = rec.bust_probability.unwrap();
        assert!((p - 32.0 / 52.0).abs() < 1e-12);

        // Hard 12 vs 2 hits too, but the risk sits well under one half.
        let rec = recommend_with_count(
            &rules,
            &hand_of(&[Rank::Nine, Rank::Three]),
            Rank::Two,
            &[],
            0,
            true,
        );
        assert_eq!(rec.action, Action::Hit);
        assert_eq!(rec.bust_probability, None);
    }
}
