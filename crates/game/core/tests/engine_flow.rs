//! Turn flow: movement, phases, assistants, yielding.

mod common;

use common::*;
use istanbul_core::{
    Action, ActionError, Card, Facility, Good, MoveAction, Phase, PlayerColor, TurnError,
};

#[test]
fn a_full_turn_walks_the_phases() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    assert_eq!(state.current_player(), PlayerColor::Red);
    assert_eq!(state.current_phase(), Phase::Movement);

    // Fountain (7) to the fabric warehouse (3), alone there: the payment
    // phase is skipped.
    apply_ok(&mut state, move_to(3));
    assert_eq!(state.current_phase(), Phase::FacilityAction);

    apply_ok(&mut state, Action::Generic);
    assert_eq!(state.current_phase(), Phase::Encounters);

    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.cart_contents.get(Good::Red), 2);
    assert_eq!(red.stack_size, 3);
    assert_eq!(red.assistant_locations.as_slice(), &[loc(3)]);

    apply_ok(&mut state, Action::YieldTurn);
    assert_eq!(state.current_player(), PlayerColor::Blue);
    assert_eq!(state.current_phase(), Phase::Movement);
}

#[test]
fn actions_out_of_phase_are_rejected() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    assert_eq!(
        apply(&mut state, Action::Generic),
        Err(ActionError::Turn(TurnError::WrongPhase {
            action: "generic_facility_action",
            phase: Phase::Movement,
        }))
    );
    assert!(matches!(
        apply(&mut state, Action::YieldTurn),
        Err(ActionError::Turn(TurnError::WrongPhase { .. }))
    ));
}

#[test]
fn movement_distance_is_bounded() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    // The black market (9) is three cells from the fountain.
    assert_eq!(
        apply(&mut state, move_to(9)),
        Err(ActionError::MoveDistance { distance: 3 })
    );
}

#[test]
fn extra_move_card_reaches_further() {
    let mut state = new_game(vec![Card::ExtraMove, Card::OneGood]);
    apply_ok(
        &mut state,
        Action::ExtraMove(MoveAction {
            to: loc(16),
            skip_assistant: false,
        }),
    );
    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.location, loc(16));
    assert_eq!(red.hand.count(Card::ExtraMove), 0);
}

#[test]
fn extra_move_card_rejects_short_hops() {
    let mut state = new_game(vec![Card::ExtraMove, Card::OneGood]);
    assert_eq!(
        apply(
            &mut state,
            Action::ExtraMove(MoveAction {
                to: loc(8),
                skip_assistant: false,
            })
        ),
        Err(ActionError::MoveDistance { distance: 1 })
    );
    // The card was already spent when the distance check failed.
    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.hand.count(Card::ExtraMove), 0);
}

#[test]
fn no_move_card_stays_put() {
    let mut state = new_game(vec![Card::NoMove, Card::OneGood]);
    apply_ok(&mut state, Action::NoMove { skip_assistant: false });
    // Still at the fountain, which always skips the payment phase.
    assert_eq!(state.current_phase(), Phase::FacilityAction);
    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.location, loc(7));
    assert_eq!(red.stack_size, 3);
}

#[test]
fn skipping_the_assistant_step_forces_a_yield() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    apply_ok(&mut state, move_skipping_assistant(3));
    assert_eq!(state.current_phase(), Phase::Payment);
    assert!(state.turn().yield_required());

    assert!(matches!(
        apply(&mut state, Action::Generic),
        Err(ActionError::Turn(TurnError::YieldRequired { .. }))
    ));
    apply_ok(&mut state, Action::YieldTurn);
    assert_eq!(state.current_player(), PlayerColor::Blue);
}

#[test]
fn assistants_run_out_after_four_drops() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    // Drop an assistant at 3, 4, 8 and 12 over four turns.
    for destination in [3, 4, 8, 12] {
        apply_ok(&mut state, move_to(destination));
        apply_ok(&mut state, Action::SkipFacility);
        apply_ok(&mut state, Action::YieldTurn);
        pass_turn(&mut state);
    }
    assert_eq!(state.player_state(PlayerColor::Red).unwrap().stack_size, 0);

    // A fifth fresh drop fails; the move itself has already happened.
    assert_eq!(
        apply(&mut state, move_to(16)),
        Err(ActionError::AssistantsExhausted)
    );
    assert_eq!(
        state.player_state(PlayerColor::Red).unwrap().location,
        loc(16)
    );
    apply_ok(&mut state, Action::YieldTurn);
    pass_turn(&mut state);

    // Returning to a placed assistant picks it back up instead.
    apply_ok(&mut state, move_to(12));
    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.stack_size, 1);
    assert!(!red.assistant_locations.contains(&loc(12)));
}

#[test]
fn the_fountain_waives_the_assistant_step_when_the_stack_is_empty() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    for destination in [3, 4, 8, 12] {
        apply_ok(&mut state, move_to(destination));
        apply_ok(&mut state, Action::SkipFacility);
        apply_ok(&mut state, Action::YieldTurn);
        pass_turn(&mut state);
    }
    assert_eq!(state.player_state(PlayerColor::Red).unwrap().stack_size, 0);

    // Moving home with nothing left to place still succeeds; no assistant
    // lands at the fountain.
    apply_ok(&mut state, move_to(7));
    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.location, loc(7));
    assert_eq!(red.assistant_locations.len(), 4);
    assert!(!state
        .facility_state(Facility::Fountain)
        .assistants
        .contains(PlayerColor::Red));

    // And the fountain action then gathers all four back.
    apply_ok(&mut state, Action::Generic);
    assert_eq!(state.player_state(PlayerColor::Red).unwrap().stack_size, 4);
}

#[test]
fn fountain_recalls_every_assistant() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    apply_ok(&mut state, move_to(3));
    apply_ok(&mut state, Action::SkipFacility);
    apply_ok(&mut state, Action::YieldTurn);
    pass_turn(&mut state);

    apply_ok(&mut state, move_to(11));
    apply_ok(&mut state, Action::SkipFacility);
    apply_ok(&mut state, Action::YieldTurn);
    pass_turn(&mut state);

    // Back to the fountain: one more assistant lands there, then the
    // recall gathers all three.
    apply_ok(&mut state, move_to(7));
    assert_eq!(state.current_phase(), Phase::FacilityAction);
    apply_ok(&mut state, Action::Generic);

    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.stack_size, 4);
    assert!(red.assistant_locations.is_empty());
    for facility in [Facility::FabricWarehouse, Facility::SmallMarket, Facility::Fountain] {
        assert!(!state.facility_state(facility).assistants.contains(PlayerColor::Red));
    }
}

#[test]
fn fountain_can_recall_a_subset() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    apply_ok(&mut state, move_to(3));
    apply_ok(&mut state, Action::SkipFacility);
    apply_ok(&mut state, Action::YieldTurn);
    pass_turn(&mut state);

    apply_ok(&mut state, move_to(11));
    apply_ok(&mut state, Action::SkipFacility);
    apply_ok(&mut state, Action::YieldTurn);
    pass_turn(&mut state);

    apply_ok(&mut state, move_to(7));
    apply_ok(
        &mut state,
        Action::Fountain {
            recall: Some(vec![loc(3)]),
        },
    );

    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.stack_size, 2);
    assert_eq!(red.assistant_locations.as_slice(), &[loc(11), loc(7)]);
    assert!(state
        .facility_state(Facility::SmallMarket)
        .assistants
        .contains(PlayerColor::Red));
}

#[test]
fn paying_shares_the_destination() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    // Red parks at the tea house.
    apply_ok(&mut state, move_to(12));
    apply_ok(&mut state, Action::SkipFacility);
    apply_ok(&mut state, Action::YieldTurn);

    // Blue follows and has to pay 2 lira.
    apply_ok(&mut state, move_to(12));
    assert_eq!(state.current_phase(), Phase::Payment);
    apply_ok(&mut state, Action::Pay);

    assert_eq!(state.player_state(PlayerColor::Blue).unwrap().lira, 1);
    assert_eq!(state.player_state(PlayerColor::Red).unwrap().lira, 4);
}

#[test]
fn a_forced_yield_blocks_paying() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    apply_ok(&mut state, move_skipping_assistant(3));
    // The payment phase was reached only because the forced yield blocked
    // the skip; the yield still takes priority.
    assert_eq!(
        apply(&mut state, Action::Pay),
        Err(ActionError::Turn(TurnError::YieldRequired { action: "pay" }))
    );
}
