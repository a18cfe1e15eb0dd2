mod helpers;

use cardroom_engine::config::GameOptions;
use cardroom_engine::engine::{Phase, TimerCmd};
use cardroom_engine::events::{GameEvent, RejectReason};
use cardroom_engine::player::PlayerId;
use helpers::*;

/// Plays `tokens` for `player`, asserting the attempt is turned away
/// with `reason` and leaves the round untouched.
fn assert_rejected(t: &mut TestTable, seat: usize, tokens: &[&str], reason: RejectReason) {
    let hand_before = t.engine.player(t.ids[seat]).unwrap().hand().to_vec();
    let pending_before = t.engine.pending_plays().len();
    t.notifier.clear();

    let cmd = t.engine.play(t.ids[seat], tokens);

    assert_eq!(cmd, TimerCmd::None);
    assert_eq!(t.notifier.last_rejection(t.conns[seat]), Some(reason));
    let player = t.engine.player(t.ids[seat]).unwrap();
    assert_eq!(player.hand(), hand_before.as_slice());
    assert!(!player.has_played);
    assert_eq!(t.engine.pending_plays().len(), pending_before);
}

#[test]
fn each_validation_failure_has_its_own_reason() {
    // two-blank prompts so the count checks have room to fail both ways
    let (mut t, _) = started_table(4, GameOptions::default(), deck_with_pick(2));

    assert_rejected(&mut t, 1, &["1"], RejectReason::TooFewCards);
    assert_rejected(&mut t, 1, &["1", "2", "3"], RejectReason::TooManyCards);
    assert_rejected(&mut t, 1, &["1", "two"], RejectReason::NotANumber);
    assert_rejected(&mut t, 1, &["4", "4"], RejectReason::DuplicateCard);
    assert_rejected(&mut t, 1, &["1", "8"], RejectReason::InvalidChoice);
    assert_rejected(&mut t, 1, &["0", "2"], RejectReason::InvalidChoice);

    // after all those failures the same player can still play
    let cmd = t.engine.play(t.ids[1], &["1", "2"]);
    assert_eq!(cmd, TimerCmd::None);
    assert!(t.engine.player(t.ids[1]).unwrap().has_played);
    assert_eq!(t.engine.pending_plays().len(), 1);
}

#[test]
fn the_picker_cannot_play() {
    let (mut t, _) = started_table(3, GameOptions::default(), deck());
    assert_rejected(&mut t, 0, &["1"], RejectReason::PickerCannotPlay);
}

#[test]
fn playing_twice_is_rejected() {
    let (mut t, _) = started_table(3, GameOptions::default(), deck());
    play_first_cards(&mut t.engine, t.ids[1]);

    t.notifier.clear();
    let cmd = t.engine.play(t.ids[1], &["1"]);
    assert_eq!(cmd, TimerCmd::None);
    assert_eq!(
        t.notifier.last_rejection(t.conns[1]),
        Some(RejectReason::AlreadyPlayed)
    );
    assert_eq!(t.engine.pending_plays().len(), 1);
}

#[test]
fn playing_before_a_game_starts_is_rejected() {
    let mut t = table(3, GameOptions::default(), deck());
    let cmd = t.engine.play(t.ids[0], &["1"]);
    assert_eq!(cmd, TimerCmd::None);
    assert_eq!(
        t.notifier.last_rejection(t.conns[0]),
        Some(RejectReason::GameNotStarted)
    );
}

#[test]
fn playing_into_the_pick_phase_is_rejected() {
    let (mut t, _) = started_table(3, GameOptions::default(), deck());
    play_first_cards(&mut t.engine, t.ids[1]);
    play_first_cards(&mut t.engine, t.ids[2]);
    assert_eq!(t.engine.phase(), Phase::Picking);

    t.notifier.clear();
    let cmd = t.engine.play(t.ids[1], &["1"]);
    assert_eq!(cmd, TimerCmd::None);
    assert_eq!(
        t.notifier.last_rejection(t.conns[1]),
        Some(RejectReason::AlreadyPlayed)
    );
    assert_eq!(t.engine.pending_plays().len(), 2);
}

#[test]
fn a_play_moves_the_exact_cards_out_of_the_hand() {
    let (mut t, _) = started_table(3, GameOptions::default(), deck_with_pick(2));
    let hand = t.engine.player(t.ids[1]).unwrap().hand().to_vec();

    // display positions 2 and 5
    t.engine.play(t.ids[1], &["2", "5"]);

    let played = &t.engine.pending_plays()[0].cards;
    assert_eq!(played, &vec![hand[1].clone(), hand[4].clone()]);
    let left = t.engine.player(t.ids[1]).unwrap().hand().to_vec();
    assert_eq!(left.len(), 5);
    assert!(!left.contains(&hand[1]));
    assert!(!left.contains(&hand[4]));
}

#[test]
fn the_pick_phase_opens_exactly_once_whatever_the_play_order() {
    for order in [[1usize, 2, 3], [3, 2, 1], [2, 3, 1]] {
        let (mut t, _) = started_table(4, GameOptions::default(), deck());
        let ids: Vec<PlayerId> = order.iter().map(|&i| t.ids[i]).collect();

        let mut arm_pick_count = 0;
        for id in ids {
            if matches!(play_first_cards(&mut t.engine, id), TimerCmd::ArmPick { .. }) {
                arm_pick_count += 1;
            }
        }

        assert_eq!(arm_pick_count, 1);
        assert_eq!(t.engine.phase(), Phase::Picking);
        let ready_announcements = t
            .notifier
            .broadcasts()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ChoicesReady { .. }))
            .count();
        assert_eq!(ready_announcements, 1);
    }
}

#[test]
fn every_play_is_acknowledged_with_the_wait_count() {
    let (mut t, _) = started_table(4, GameOptions::default(), deck());

    play_first_cards(&mut t.engine, t.ids[2]);
    play_first_cards(&mut t.engine, t.ids[1]);

    let waits: Vec<(String, usize)> = t
        .notifier
        .broadcasts()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::PlayRecorded { name, waiting_on } => Some((name, waiting_on)),
            _ => None,
        })
        .collect();
    assert_eq!(
        waits,
        vec![("p2".to_string(), 2), ("p1".to_string(), 1)]
    );
}
