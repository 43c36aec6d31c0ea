//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::criteria::parse_price_range;
use super::event::{Bedrooms, Furnishing, PropertyType, GO_LABEL};
use super::*;
use crate::listings::Listing;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = ConvState> {
    proptest::sample::select(ConvState::ALL.to_vec())
}

fn arb_field() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9 -]{1,15}")
}

fn arb_prefs() -> impl Strategy<Value = UserPreferences> {
    (
        arb_state(),
        arb_field(),
        arb_field(),
        arb_field(),
        arb_field(),
        arb_field(),
    )
        .prop_map(
            |(state, property_type, price_range, bedrooms, furnished, area)| UserPreferences {
                state,
                property_type,
                price_range,
                bedrooms,
                furnished,
                area,
            },
        )
}

fn arb_known_payload() -> impl Strategy<Value = String> {
    let labels: Vec<String> = std::iter::once(GO_LABEL)
        .chain(PropertyType::ALL.map(PropertyType::label))
        .chain(Bedrooms::ALL.map(Bedrooms::label))
        .chain(Furnishing::ALL.map(Furnishing::label))
        .map(String::from)
        .collect();
    proptest::sample::select(labels)
}

fn arb_listing() -> impl Strategy<Value = Listing> {
    ("[0-9]{4}", "[a-zA-Z ]{5,20}", 500u32..5000, 0u32..6).prop_map(
        |(id, address, price, bedrooms)| Listing {
            id,
            address,
            price,
            bedrooms,
            description: String::new(),
            url: String::new(),
        },
    )
}

fn arb_outcome() -> impl Strategy<Value = SearchOutcome> {
    prop_oneof![
        Just(SearchOutcome::Failed),
        proptest::collection::vec(arb_listing(), 0..8).prop_map(SearchOutcome::Found),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        prop_oneof![
            Just("/start"),
            Just("/help"),
            Just("/preferences"),
            Just("/bogus")
        ]
        .prop_map(Event::from_text),
        "[a-zA-Z0-9 -]{1,20}".prop_map(|text| Event::from_text(&text)),
        "(1[0-9]{3}) ?- ?(2[0-9]{3})".prop_map(|text| Event::from_text(&text)),
        arb_known_payload().prop_map(|p| Event::from_payload(&p)),
        "[a-z]{1,10}".prop_map(|p| Event::from_payload(&p)),
        arb_outcome().prop_map(|outcome| Event::SearchComplete { outcome }),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Stored state is always a member of the enumerated set, including after
    // a round trip through the storage encoding
    #[test]
    fn prop_state_stays_enumerated(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut prefs = UserPreferences::blank();
        for event in events {
            if let Ok(result) = transition(&prefs, event) {
                prefs = result.new_prefs;
            }
            prop_assert!(ConvState::ALL.contains(&prefs.state));
            prop_assert_eq!(ConvState::from_stored(&prefs.state.to_stored()), prefs.state);
        }
    }

    // Reset from anywhere yields a blank record in the initial state
    #[test]
    fn prop_start_resets_from_any_record(prefs in arb_prefs()) {
        let result = transition(&prefs, Event::from_text("/start")).unwrap();
        prop_assert_eq!(&result.new_prefs, &UserPreferences::blank());
        prop_assert!(result.persists());
    }

    // Inspection never touches the record
    #[test]
    fn prop_preferences_command_is_read_only(prefs in arb_prefs()) {
        let result = transition(&prefs, Event::from_text("/preferences")).unwrap();
        prop_assert_eq!(&result.new_prefs, &prefs);
        prop_assert!(!result.persists());
        prop_assert_eq!(result.effects.len(), 1);
    }

    // Any change to the record is accompanied by a persistence effect
    #[test]
    fn prop_changes_persist(prefs in arb_prefs(), event in arb_event()) {
        if let Ok(result) = transition(&prefs, event) {
            if result.new_prefs != prefs {
                prop_assert!(
                    result.persists(),
                    "Record changed without persistence: {:?} -> {:?}",
                    prefs,
                    result.new_prefs
                );
            }
        }
    }

    // A search is only requested from the area state, and never advances it
    #[test]
    fn prop_search_requested_only_from_area(prefs in arb_prefs(), event in arb_event()) {
        if let Ok(result) = transition(&prefs, event) {
            let searches = result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::RunSearch { .. }))
                .count();
            if searches > 0 {
                prop_assert_eq!(searches, 1);
                prop_assert_eq!(prefs.state, ConvState::AwaitingArea);
                prop_assert_eq!(result.new_prefs.state, ConvState::AwaitingArea);
            }
        }
    }

    // Every search outcome from the area state returns to initial
    #[test]
    fn prop_search_outcome_resets(prefs in arb_prefs(), outcome in arb_outcome()) {
        let prefs = UserPreferences { state: ConvState::AwaitingArea, ..prefs };
        let result = transition(&prefs, Event::SearchComplete { outcome }).unwrap();
        prop_assert_eq!(result.new_prefs.state, ConvState::Initial);
        let replies = result
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::SendText { .. }))
            .count();
        prop_assert!((1..=7).contains(&replies));
    }

    #[test]
    fn prop_price_range_parses_with_any_spacing(
        min in 0u32..100_000,
        max in 0u32..100_000,
        left in " {0,3}",
        right in " {0,3}"
    ) {
        let raw = format!("{min}{left}-{right}{max}");
        prop_assert_eq!(parse_price_range(&raw), Ok((min, max)));
    }

    #[test]
    fn prop_price_range_without_dash_fails(raw in "[0-9a-z ]{0,12}") {
        prop_assert!(parse_price_range(&raw).is_err());
    }
}
