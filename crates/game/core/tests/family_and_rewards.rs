//! Family members, captures, rewards and NPC encounters.

mod common;

use common::*;
use istanbul_core::{
    Action, ActionError, Card, DiceOutcome, Facility, Good, PlayerColor, RewardChoice, Roll,
};

fn delegate_to_warehouse(state: &mut istanbul_core::GameState) {
    apply_ok(state, move_to(6));
    apply_ok(
        state,
        Action::PoliceStation {
            send_to: loc(3),
            delegated: Box::new(Action::Generic),
        },
    );
}

#[test]
fn family_member_acts_from_the_police_station() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    delegate_to_warehouse(&mut state);

    let red = state.player_state(PlayerColor::Red).unwrap();
    // The warehouse action ran for Red while Red stayed at the station.
    assert_eq!(red.cart_contents.get(Good::Red), 2);
    assert_eq!(red.location, loc(6));
    assert_eq!(red.family_location, loc(3));
    assert!(state
        .facility_state(Facility::FabricWarehouse)
        .family_members
        .contains(PlayerColor::Red));
    assert!(!state
        .facility_state(Facility::PoliceStation)
        .family_members
        .contains(PlayerColor::Red));

    // The delegated action advanced the phase on its own.
    apply_ok(&mut state, Action::YieldTurn);
}

#[test]
fn family_cannot_be_sent_home() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    apply_ok(&mut state, move_to(6));
    assert_eq!(
        apply(
            &mut state,
            Action::PoliceStation {
                send_to: loc(6),
                delegated: Box::new(Action::Generic),
            }
        ),
        Err(ActionError::DelegateToPoliceStation)
    );
}

#[test]
fn delegation_requires_a_family_member_at_the_station() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    delegate_to_warehouse(&mut state);
    apply_ok(&mut state, Action::YieldTurn);
    pass_turn(&mut state);

    // Wander off and come back; the family member is still out at the
    // warehouse.
    apply_ok(&mut state, move_to(5));
    apply_ok(&mut state, Action::SkipFacility);
    apply_ok(&mut state, Action::YieldTurn);
    pass_turn(&mut state);

    apply_ok(&mut state, move_to(6));
    assert_eq!(
        apply(
            &mut state,
            Action::PoliceStation {
                send_to: loc(8),
                delegated: Box::new(Action::Generic),
            }
        ),
        Err(ActionError::FamilyNotAtPoliceStation)
    );
}

#[test]
fn captures_queue_rewards_and_block_the_yield() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    // Red leaves a family member at the fabric warehouse.
    delegate_to_warehouse(&mut state);
    apply_ok(&mut state, Action::YieldTurn);

    // Blue's facility action at the same warehouse catches it.
    apply_ok(&mut state, move_to(3));
    apply_ok(&mut state, Action::Generic);
    assert_eq!(state.outstanding_reward_choices(), 1);

    assert_eq!(apply(&mut state, Action::YieldTurn), Err(ActionError::RewardPending));
    apply_ok(&mut state, Action::ChooseReward(RewardChoice::Lira));

    let blue = state.player_state(PlayerColor::Blue).unwrap();
    assert_eq!(blue.lira, 3 + 3);
    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.family_location, loc(6));
    assert!(state
        .facility_state(Facility::PoliceStation)
        .family_members
        .contains(PlayerColor::Red));

    apply_ok(&mut state, Action::YieldTurn);
    assert_eq!(state.current_player(), PlayerColor::Red);
}

#[test]
fn delegated_actions_never_capture() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    // Red's family member is already out at the fabric warehouse.
    delegate_to_warehouse(&mut state);
    apply_ok(&mut state, Action::YieldTurn);

    // Blue's family member acts on the same cell; it makes no arrest.
    apply_ok(&mut state, move_to(6));
    apply_ok(&mut state, Action::Pay);
    apply_ok(
        &mut state,
        Action::PoliceStation {
            send_to: loc(3),
            delegated: Box::new(Action::Generic),
        },
    );

    assert_eq!(state.outstanding_reward_choices(), 0);
    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.family_location, loc(3));
    let blue = state.player_state(PlayerColor::Blue).unwrap();
    assert_eq!(blue.cart_contents.get(Good::Red), 2);
    apply_ok(&mut state, Action::YieldTurn);
}

#[test]
fn one_action_can_capture_two_family_members() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood, Card::OneGood]);
    // Red and Blue each post a family member at the fabric warehouse.
    delegate_to_warehouse(&mut state);
    apply_ok(&mut state, Action::YieldTurn);
    apply_ok(&mut state, move_to(6));
    apply_ok(&mut state, Action::Pay);
    apply_ok(
        &mut state,
        Action::PoliceStation {
            send_to: loc(3),
            delegated: Box::new(Action::Generic),
        },
    );
    apply_ok(&mut state, Action::YieldTurn);

    // Green's visit in person arrests both at once.
    apply_ok(&mut state, move_to(3));
    apply_ok(&mut state, Action::Generic);
    assert_eq!(state.outstanding_reward_choices(), 2);

    // Both rewards have to be chosen before the turn can end.
    assert_eq!(apply(&mut state, Action::YieldTurn), Err(ActionError::RewardPending));
    apply_ok(&mut state, Action::ChooseReward(RewardChoice::Lira));
    assert_eq!(apply(&mut state, Action::YieldTurn), Err(ActionError::RewardPending));
    apply_ok(
        &mut state,
        Action::ChooseReward(RewardChoice::Card(Card::FiveLira)),
    );

    let green = state.player_state(PlayerColor::Green).unwrap();
    assert_eq!(green.lira, 4 + 3);
    assert_eq!(green.hand.count(Card::FiveLira), 1);
    for player in [PlayerColor::Red, PlayerColor::Blue] {
        assert!(state
            .facility_state(Facility::PoliceStation)
            .family_members
            .contains(player));
    }
    apply_ok(&mut state, Action::YieldTurn);
    assert_eq!(state.current_player(), PlayerColor::Red);
}

#[test]
fn choosing_a_reward_without_a_capture_is_rejected() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    assert_eq!(
        apply(&mut state, Action::ChooseReward(RewardChoice::Lira)),
        Err(ActionError::NoRewardPending)
    );
}

#[test]
fn arrest_family_card_pays_out_immediately() {
    let mut state = new_game(vec![Card::ArrestFamily, Card::OneGood]);
    // The card needs the family member away from the station first.
    delegate_to_warehouse(&mut state);
    apply_ok(&mut state, Action::YieldTurn);
    pass_turn(&mut state);

    apply_ok(
        &mut state,
        Action::ArrestFamily {
            reward: RewardChoice::Card(Card::FiveLira),
        },
    );

    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.family_location, loc(6));
    assert_eq!(red.hand.count(Card::FiveLira), 1);
    assert_eq!(red.hand.count(Card::ArrestFamily), 0);
    assert_eq!(state.outstanding_reward_choices(), 0);
}

#[test]
fn arrest_family_card_needs_the_family_out() {
    let mut state = new_game(vec![Card::ArrestFamily, Card::OneGood]);
    assert_eq!(
        apply(
            &mut state,
            Action::ArrestFamily {
                reward: RewardChoice::Lira,
            }
        ),
        Err(ActionError::FamilyAtPoliceStation)
    );
}

#[test]
fn governor_trades_a_card_and_moves_on() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    // The governor starts at the tea house.
    apply_ok(&mut state, move_to(12));
    apply_ok(&mut state, Action::SkipFacility);
    apply_ok(
        &mut state,
        Action::EncounterGovernor {
            gain: Card::SellAny,
            cost: istanbul_core::GovernorCost::Pay,
            roll: DiceOutcome::Rolled(Roll(3, 3)),
        },
    );

    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.hand.count(Card::SellAny), 1);
    assert_eq!(red.lira, 0);
    assert!(!state.facility_state(Facility::TeaHouse).governor);
    // Total 6 sends him to the caravansary.
    assert!(state.facility_state(Facility::Caravansary).governor);
}

#[test]
fn smuggler_trades_a_good_and_moves_on() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    // The smuggler starts at the black market, two moves away.
    apply_ok(&mut state, move_to(10));
    apply_ok(&mut state, Action::SkipFacility);
    apply_ok(&mut state, Action::YieldTurn);
    pass_turn(&mut state);

    apply_ok(&mut state, move_to(9));
    apply_ok(&mut state, Action::SkipFacility);
    apply_ok(
        &mut state,
        Action::EncounterSmuggler {
            gain: Good::Green,
            cost: istanbul_core::SmugglerCost::Pay,
            roll: DiceOutcome::Rolled(Roll(2, 2)),
        },
    );

    let red = state.player_state(PlayerColor::Red).unwrap();
    assert_eq!(red.cart_contents.get(Good::Green), 1);
    assert_eq!(red.lira, 0);
    assert!(!state.facility_state(Facility::BlackMarket).smuggler);
    // Total 4 sends him to the fruit warehouse.
    assert!(state.facility_state(Facility::FruitWarehouse).smuggler);
}

#[test]
fn encountering_an_absent_governor_fails() {
    let mut state = new_game(vec![Card::OneGood, Card::OneGood]);
    apply_ok(&mut state, move_to(3));
    apply_ok(&mut state, Action::SkipFacility);
    assert_eq!(
        apply(
            &mut state,
            Action::EncounterGovernor {
                gain: Card::FiveLira,
                cost: istanbul_core::GovernorCost::Pay,
                roll: DiceOutcome::Rolled(Roll(1, 1)),
            }
        ),
        Err(ActionError::GovernorNotHere {
            facility: Facility::FabricWarehouse
        })
    );
}
