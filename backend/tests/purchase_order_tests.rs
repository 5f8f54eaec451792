//! Purchase-order lifecycle tests
//!
//! Tests for the order state machine and header aggregates:
//! - Transition rules and terminal states
//! - Editability gating on the pending status
//! - Header totals as a pure function of the lines
//! - Order code shape

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use chrono::NaiveDate;
use shared::models::{generate_order_code, OrderPriority, OrderStatus};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

const ALL_STATUSES: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Received,
    OrderStatus::Shipping,
    OrderStatus::Delivered,
    OrderStatus::Canceled,
];

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// The four legal transitions, and nothing else
    #[test]
    fn test_exact_transition_set() {
        let mut allowed = Vec::new();
        for from in ALL_STATUSES {
            for to in ALL_STATUSES {
                if from.can_transition_to(to) {
                    allowed.push((from, to));
                }
            }
        }
        assert_eq!(
            allowed,
            vec![
                (OrderStatus::Pending, OrderStatus::Received),
                (OrderStatus::Pending, OrderStatus::Canceled),
                (OrderStatus::Received, OrderStatus::Shipping),
                (OrderStatus::Shipping, OrderStatus::Delivered),
            ]
        );
    }

    /// Cancellation is only reachable from pending
    #[test]
    fn test_cancel_only_from_pending() {
        for from in ALL_STATUSES {
            assert_eq!(
                from.can_transition_to(OrderStatus::Canceled),
                from == OrderStatus::Pending
            );
        }
    }

    /// Delivered and canceled orders admit no further transition
    #[test]
    fn test_terminal_states_are_closed() {
        for from in ALL_STATUSES.into_iter().filter(OrderStatus::is_terminal) {
            for to in ALL_STATUSES {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    /// Line and header edits are gated on the pending status
    #[test]
    fn test_editability() {
        for status in ALL_STATUSES {
            assert_eq!(status.is_editable(), status == OrderStatus::Pending);
        }
    }

    /// Priority defaults to normal
    #[test]
    fn test_priority_default() {
        assert_eq!(OrderPriority::default(), OrderPriority::Normal);
    }

    /// Header totals are the sum of line totals
    #[test]
    fn test_header_total_is_line_sum() {
        let lines = [
            (3, dec("100")),  // 300
            (2, dec("50.5")), // 101
            (10, dec("0")),   // 0
        ];
        let total: Decimal = lines
            .iter()
            .map(|(count, price)| Decimal::from(*count) * price)
            .sum();
        assert_eq!(total, dec("401"));
    }

    /// Order code: ORD + date + four digits
    #[test]
    fn test_order_code_shape() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        let code = generate_order_code(date);

        assert_eq!(code.len(), 15);
        assert!(code.starts_with("ORD20260827"));
        assert!(code[11..].chars().all(|c| c.is_ascii_digit()));
    }

    /// Status strings stored in the database round-trip exactly
    #[test]
    fn test_status_round_trip() {
        for status in ALL_STATUSES {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("SHIPPED".parse::<OrderStatus>().is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = OrderStatus> {
        prop_oneof![
            Just(OrderStatus::Pending),
            Just(OrderStatus::Received),
            Just(OrderStatus::Shipping),
            Just(OrderStatus::Delivered),
            Just(OrderStatus::Canceled),
        ]
    }

    fn count_strategy() -> impl Strategy<Value = i32> {
        1i32..=500i32
    }

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=100000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// No transition is ever its own target, and terminal states never
        /// transition anywhere.
        #[test]
        fn prop_state_machine_closure(from in status_strategy(), to in status_strategy()) {
            prop_assert!(!from.can_transition_to(from));
            if from.is_terminal() {
                prop_assert!(!from.can_transition_to(to));
            }
        }

        /// Any walk along allowed transitions from pending terminates within
        /// three steps, in delivered or canceled or a state with no choice
        /// left but forward.
        #[test]
        fn prop_lifecycle_is_finite(choices in prop::collection::vec(any::<bool>(), 0..6)) {
            let mut state = OrderStatus::Pending;
            let mut steps = 0;

            for cancel in choices {
                let next = match (state, cancel) {
                    (OrderStatus::Pending, true) => Some(OrderStatus::Canceled),
                    (OrderStatus::Pending, false) => Some(OrderStatus::Received),
                    (OrderStatus::Received, _) => Some(OrderStatus::Shipping),
                    (OrderStatus::Shipping, _) => Some(OrderStatus::Delivered),
                    _ => None,
                };
                let Some(next) = next else { break };
                prop_assert!(state.can_transition_to(next));
                state = next;
                steps += 1;
            }

            prop_assert!(steps <= 3);
        }

        /// Recomputing header aggregates from lines is deterministic and
        /// deleting one line decreases the total by exactly that line.
        #[test]
        fn prop_totals_track_line_deletion(
            lines in prop::collection::vec((count_strategy(), price_strategy()), 1..10),
            victim_index in 0usize..10
        ) {
            let totals: Vec<Decimal> = lines
                .iter()
                .map(|(count, price)| Decimal::from(*count) * price)
                .collect();
            let before: Decimal = totals.iter().sum();

            let victim = victim_index % totals.len();
            let after: Decimal = totals
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != victim)
                .map(|(_, t)| *t)
                .sum();

            prop_assert_eq!(before - totals[victim], after);
        }

        /// Order codes always carry the date they were generated for.
        #[test]
        fn prop_order_code_embeds_date(
            year in 2020i32..=2099,
            month in 1u32..=12,
            day in 1u32..=28
        ) {
            let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            let code = generate_order_code(date);
            let expected = format!("ORD{}", date.format("%Y%m%d"));
            prop_assert!(code.starts_with(&expected));
            prop_assert_eq!(code.len(), expected.len() + 4);
        }
    }
}
