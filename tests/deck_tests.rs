use gametable::cards::{shuffled_deck_or_local, Card, Deck, DeckSource, Rank, Suit};
use gametable::error::GameError;
use std::collections::HashSet;

#[test]
fn standard_deck_has_52_unique_cards() {
    let mut deck = Deck::standard();
    assert_eq!(deck.remaining(), 52);
    assert!(deck.is_complete());

    let mut seen = HashSet::new();
    while let Ok(card) = deck.deal() {
        assert!(seen.insert(card), "dealt {card} twice");
    }
    assert_eq!(seen.len(), 52);
}

#[test]
fn shuffled_deck_is_still_complete() {
    let deck = Deck::standard_shuffled();
    assert!(deck.is_complete());
}

#[test]
fn dealing_decrements_and_exhausts() {
    let mut deck = Deck::standard();
    for expected_left in (0..52).rev() {
        deck.deal().unwrap();
        assert_eq!(deck.remaining(), expected_left);
    }
    assert!(matches!(deck.deal(), Err(GameError::EmptyDeck)));
}

#[test]
fn deal_many_fails_before_removing_anything() {
    let mut deck = Deck::standard();
    let _ = deck.deal_many(50).unwrap();
    assert_eq!(deck.remaining(), 2);
    assert!(matches!(deck.deal_many(3), Err(GameError::EmptyDeck)));
    assert_eq!(deck.remaining(), 2);
}

#[test]
fn card_codes_round_trip() {
    let card = Card::new(Rank::Ten, Suit::Diamonds);
    assert_eq!(card.code(), "0D");
    assert_eq!(Card::from_code("0D"), Some(card));
    assert_eq!(Card::from_code("0d"), Some(card));
    assert_eq!(Card::from_code("10D"), Some(card));
    assert_eq!(card.title(), "Ten of Diamonds");

    let ace = Card::new(Rank::Ace, Suit::Spades);
    assert_eq!(ace.code(), "AS");
    assert_eq!(Card::from_code("as"), Some(ace));
}

#[test]
fn malformed_codes_are_rejected() {
    for bad in ["", "Z", "XX", "1S", "AceS", "A♠", "11H"] {
        assert_eq!(Card::from_code(bad), None, "{bad:?} should not parse");
    }
}

#[test]
fn from_codes_skips_malformed_and_duplicates() {
    let deck = Deck::from_codes(["AS", "XX", "0D", "AS", "kh"]);
    // AS, 0D and KH survive; the garbage code and the duplicate do not.
    assert_eq!(deck.remaining(), 3);
}

#[test]
fn from_codes_full_payload_is_complete() {
    let reference = {
        let mut deck = Deck::standard();
        let mut codes = Vec::new();
        while let Ok(card) = deck.deal() {
            codes.push(card.code());
        }
        codes
    };
    let deck = Deck::from_codes(reference.iter().map(String::as_str));
    assert!(deck.is_complete());
}

struct BrokenSource;

#[async_trait::async_trait]
impl DeckSource for BrokenSource {
    async fn shuffled_deck(&self) -> Result<Deck, GameError> {
        Err(GameError::ExternalFetch {
            what: "deck",
            why: "deck unavailable".to_string(),
        })
    }
}

#[tokio::test]
async fn failing_source_falls_back_to_local_deck() {
    let deck = shuffled_deck_or_local(&BrokenSource).await;
    assert!(deck.is_complete());
}
