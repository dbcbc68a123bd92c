use gametable::cards::Deck;
use gametable::engine::{Action, ChannelId, GameUpdate, Interactive, PlayerId};
use gametable::holdem::{HoldemSession, Street};

const CHANNEL: ChannelId = ChannelId(3);
const ALICE: PlayerId = PlayerId(1);
const BOB: PlayerId = PlayerId(2);

fn session(ante: i64) -> HoldemSession {
    HoldemSession::with_deck(CHANNEL, (ALICE, BOB), ante, Deck::standard_shuffled()).unwrap()
}

#[test]
fn streets_deal_the_right_community_counts() {
    let mut game = session(0);
    assert_eq!(game.street(), Street::PreFlop);
    assert_eq!(game.community().len(), 0);

    assert_eq!(game.advance().unwrap(), Street::Flop);
    assert_eq!(game.community().len(), 3);
    assert_eq!(game.advance().unwrap(), Street::Turn);
    assert_eq!(game.community().len(), 4);
    assert_eq!(game.advance().unwrap(), Street::River);
    assert_eq!(game.community().len(), 5);
    assert_eq!(game.advance().unwrap(), Street::Showdown);
    assert!(game.is_finished());
}

#[test]
fn showdown_reveals_without_ranking() {
    let mut game = session(0);
    for _ in 0..3 {
        game.handle(&Action::button(ALICE, "hd_deal"));
    }
    match game.handle(&Action::button(BOB, "hd_deal")) {
        GameUpdate::GameOver { message, payouts } => {
            assert!(message.contains("Showdown"));
            // Cosmetic reveal only: nobody wins money at showdown.
            assert!(payouts.iter().all(|p| p.amount == 0));
        }
        other => panic!("expected game over, got {other:?}"),
    }
}

#[test]
fn folding_forfeits_the_ante() {
    let mut game = session(100);
    match game.handle(&Action::button(BOB, "hd_fold")) {
        GameUpdate::GameOver { payouts, .. } => {
            let alice = payouts.iter().find(|p| p.player == ALICE).unwrap();
            let bob = payouts.iter().find(|p| p.player == BOB).unwrap();
            assert_eq!(alice.amount, 100);
            assert_eq!(bob.amount, -100);
        }
        other => panic!("expected game over, got {other:?}"),
    }
    assert!(game.is_finished());
}

#[test]
fn outsiders_cannot_act() {
    let mut game = session(0);
    assert!(matches!(
        game.handle(&Action::button(PlayerId(99), "hd_deal")),
        GameUpdate::Reject(_)
    ));
    assert_eq!(game.street(), Street::PreFlop);
}

#[test]
fn no_action_after_the_hand_ends() {
    let mut game = session(0);
    game.fold(ALICE).unwrap();
    assert!(game.advance().is_err());
    assert!(game.fold(BOB).is_err());
}

#[test]
fn view_tracks_reveal_state() {
    let mut game = session(0);
    assert!(game.view().revealed.is_none());
    game.advance().unwrap();
    assert!(game.view().revealed.is_none());
    game.fold(BOB).unwrap();
    let revealed = game.view().revealed.expect("finished hands reveal");
    assert_eq!(revealed.len(), 2);
    assert!(revealed.iter().all(|(_, hole)| hole.len() == 2));
}
