use gametable::blackjack::{
    dealer_should_hit, outcome, BlackjackSession, Hand, Outcome, Phase,
};
use gametable::cards::{Card, Deck, Rank, Suit};
use gametable::engine::{Action, ChannelId, GameUpdate, Interactive, PlayerId};

const CHANNEL: ChannelId = ChannelId(7);
const PLAYER: PlayerId = PlayerId(42);

fn hand(ranks: &[Rank]) -> Hand {
    let mut hand = Hand::new();
    for (i, &rank) in ranks.iter().enumerate() {
        // Suits don't matter for valuation; spread them to stay realistic.
        let suit = Suit::ALL[i % 4];
        hand.add(Card::new(rank, suit));
    }
    hand
}

#[test]
fn ace_king_is_twenty_one() {
    assert_eq!(hand(&[Rank::Ace, Rank::King]).value(), 21);
}

#[test]
fn double_ace_nine_is_twenty_one() {
    // One ace stays high (11), the other demotes to 1.
    assert_eq!(hand(&[Rank::Ace, Rank::Ace, Rank::Nine]).value(), 21);
}

#[test]
fn ten_ten_five_busts_at_twenty_five() {
    let h = hand(&[Rank::Ten, Rank::Ten, Rank::Five]);
    assert_eq!(h.value(), 25);
    assert!(h.is_bust());
}

#[test]
fn every_ace_demotes_when_needed() {
    assert_eq!(hand(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ace]).value(), 14);
    assert_eq!(hand(&[Rank::Ace, Rank::Five]).value(), 16);
    assert_eq!(hand(&[Rank::Ace, Rank::Five, Rank::Nine]).value(), 15);
}

#[test]
fn natural_blackjack_is_detected() {
    assert!(hand(&[Rank::Ace, Rank::Queen]).is_blackjack());
    assert!(!hand(&[Rank::Seven, Rank::Seven, Rank::Seven]).is_blackjack());
}

#[test]
fn dealer_policy_boundary() {
    assert!(dealer_should_hit(&hand(&[Rank::Ten, Rank::Six])));
    assert!(!dealer_should_hit(&hand(&[Rank::Ten, Rank::Seven])));
    // Soft 17 counts as 17: the dealer stands.
    assert!(!dealer_should_hit(&hand(&[Rank::Ace, Rank::Six])));
}

#[test]
fn outcome_table() {
    assert_eq!(outcome(20, 22), Outcome::Win);
    assert_eq!(outcome(20, 18), Outcome::Win);
    assert_eq!(outcome(18, 20), Outcome::Loss);
    assert_eq!(outcome(19, 19), Outcome::Push);
    // Player bust loses even against a dealer bust.
    assert_eq!(outcome(22, 25), Outcome::Loss);
}

/// Cards pop from the back of the code list; deal order is
/// player, dealer, player, dealer, then hits.
fn stacked(codes: &[&str]) -> Deck {
    Deck::from_codes(codes.iter().copied())
}

#[test]
fn natural_twenty_one_resolves_immediately() {
    // Player: A♠ K♥ (21). Dealer: 9♦ 8♦ (17, stands).
    let deck = stacked(&["2C", "3C", "8D", "KH", "9D", "AS"]);
    let session = BlackjackSession::with_deck(CHANNEL, PLAYER, 100, deck).unwrap();
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.outcome(), Some(Outcome::Win));
}

#[test]
fn hitting_into_a_bust_loses_without_dealer_play() {
    // Player: 10♠ 10♦, hit deals 5♣ for 25.
    let deck = stacked(&["9C", "5C", "3H", "0D", "2H", "0S"]);
    let mut session = BlackjackSession::with_deck(CHANNEL, PLAYER, 50, deck).unwrap();
    assert_eq!(session.phase(), Phase::PlayerTurn);

    match session.handle(&Action::button(PLAYER, "bj_hit")) {
        GameUpdate::GameOver { payouts, .. } => {
            assert_eq!(payouts, vec![gametable::Payout { player: PLAYER, amount: -50 }]);
        }
        other => panic!("expected game over, got {other:?}"),
    }
    assert_eq!(session.outcome(), Some(Outcome::Loss));
    // Dealer kept their two cards: a bust never plays out the dealer hand.
    assert_eq!(session.dealer_hand().cards.len(), 2);
}

#[test]
fn standing_plays_the_dealer_to_seventeen() {
    // Player: 10♠ 8♥ (18). Dealer: 6♦ 6♣ (12), draws 5♦ for 17 and
    // stands, losing to 18.
    let deck = stacked(&["2C", "5D", "6C", "8H", "6D", "0S"]);
    let mut session = BlackjackSession::with_deck(CHANNEL, PLAYER, 25, deck).unwrap();

    match session.handle(&Action::button(PLAYER, "bj_stand")) {
        GameUpdate::GameOver { payouts, .. } => {
            assert_eq!(payouts[0].amount, 25);
        }
        other => panic!("expected game over, got {other:?}"),
    }
    assert_eq!(session.outcome(), Some(Outcome::Win));
    assert!(session.dealer_hand().value() >= 17);
}

#[test]
fn wrong_actor_is_rejected() {
    let mut session =
        BlackjackSession::with_deck(CHANNEL, PLAYER, 0, Deck::standard_shuffled()).unwrap();
    if session.phase() != Phase::PlayerTurn {
        // A random deck occasionally deals a natural; nothing to test then.
        return;
    }
    assert!(matches!(
        session.handle(&Action::button(PlayerId(3), "bj_hit")),
        GameUpdate::Reject(_)
    ));
}

#[test]
fn hole_card_is_hidden_until_player_stands() {
    let deck = stacked(&["2C", "5D", "6C", "8H", "6D", "0S"]);
    let mut session = BlackjackSession::with_deck(CHANNEL, PLAYER, 0, deck).unwrap();
    let view = session.view();
    assert_eq!(view.dealer_cards.len(), 2);
    assert_eq!(view.dealer_cards[1], "??");

    session.stand().unwrap();
    let view = session.view();
    assert!(view.dealer_cards.iter().all(|c| c != "??"));
}

#[test]
fn acting_after_the_round_is_rejected() {
    let deck = stacked(&["2C", "5D", "6C", "8H", "6D", "0S"]);
    let mut session = BlackjackSession::with_deck(CHANNEL, PLAYER, 0, deck).unwrap();
    session.stand().unwrap();
    assert!(session.hit().is_err());
    assert!(session.stand().is_err());
}
