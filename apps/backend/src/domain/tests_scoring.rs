use crate::domain::bidding::Bid;
use crate::domain::cards::Suit;
use crate::domain::scoring::{category_points, score_hand};
use crate::domain::state::Team;
use crate::domain::test_state_helpers::finished_hand;
use crate::errors::domain::DomainError;

/// Trump hearts; all four category points plus 78 game points in play.
/// The first six tricks carry every contested card, the last three are
/// filler.
fn contested_tricks(strong: u8, weak: u8) -> Vec<(u8, [&'static str; 4])> {
    vec![
        (strong, ["AH", "KH", "4H", "3H"]),
        (strong, ["JH", "2H", "5H", "6H"]),
        (strong, ["AC", "KC", "QC", "JC"]),
        (strong, ["AD", "KD", "QD", "JD"]),
        (strong, ["AS", "KS", "QS", "JS"]),
        (strong, ["TC", "TD", "TH", "TS"]),
        (weak, ["2C", "3C", "4C", "5C"]),
        (weak, ["2D", "3D", "4D", "5D"]),
        (weak, ["2S", "3S", "4S", "5S"]),
    ]
}

#[test]
fn sweeping_team_takes_all_four_points() {
    let record = finished_hand(3, 1, Bid(2), Suit::Hearts, &contested_tricks(1, 0));
    let categories = category_points(&record).unwrap();
    assert_eq!(categories.high, Some(Team::Odd));
    assert_eq!(categories.low, Some(Team::Odd));
    assert_eq!(categories.jack, Some(Team::Odd));
    assert_eq!(categories.game, Some(Team::Odd));
    assert_eq!(categories.game_points, [0, 78]);
    assert_eq!(categories.count_for(Team::Odd), 4);
    assert_eq!(categories.count_for(Team::Even), 0);
}

#[test]
fn set_team_loses_its_bid() {
    // Seat 0 bids 3 and the even team takes nothing.
    let record = finished_hand(3, 0, Bid(3), Suit::Hearts, &contested_tricks(1, 2));
    let outcome = score_hand(&record, [0, 0]).unwrap();
    assert!(outcome.set);
    assert!(!outcome.auto_win);
    assert_eq!(outcome.net, [-3, 4]);
    assert_eq!(outcome.high_bid, Bid(3));
    assert_eq!(outcome.declarer, 0);
}

#[test]
fn met_bid_banks_the_category_points() {
    // The odd team bids 2 and takes high, low, and jack; the even team
    // runs up the game points with the filler swapped its way.
    let tricks = vec![
        (1, ["AH", "KH", "4H", "3H"]),
        (1, ["JH", "2H", "5H", "6H"]),
        (0, ["AC", "KC", "QC", "JC"]),
        (0, ["AD", "KD", "QD", "JD"]),
        (0, ["AS", "KS", "QS", "JS"]),
        (0, ["TC", "TD", "TH", "TS"]),
        (0, ["2C", "3C", "4C", "5C"]),
        (0, ["2D", "3D", "4D", "5D"]),
        (0, ["2S", "3S", "4S", "5S"]),
    ];
    let record = finished_hand(3, 1, Bid(2), Suit::Hearts, &tricks);
    let outcome = score_hand(&record, [0, 0]).unwrap();
    assert!(!outcome.set);
    assert_eq!(outcome.categories.game, Some(Team::Even));
    assert_eq!(outcome.net, [1, 3]);
}

#[test]
fn made_cinch_earns_the_bonus() {
    let record = finished_hand(3, 0, Bid::CINCH, Suit::Hearts, &contested_tricks(0, 2));
    let outcome = score_hand(&record, [3, 0]).unwrap();
    assert!(!outcome.set);
    assert!(!outcome.auto_win);
    assert_eq!(outcome.net, [14, 0]);
}

#[test]
fn made_cinch_from_zero_wins_outright() {
    let record = finished_hand(3, 0, Bid::CINCH, Suit::Hearts, &contested_tricks(0, 2));
    let outcome = score_hand(&record, [0, 5]).unwrap();
    assert!(outcome.auto_win);
    assert_eq!(outcome.net, [11, 0]);
}

#[test]
fn failed_cinch_sets_for_ten() {
    // The odd team steals the trick with the trump jack and low.
    let tricks = vec![
        (0, ["AH", "KH", "4H", "3H"]),
        (1, ["JH", "2H", "5H", "6H"]),
        (0, ["AC", "KC", "QC", "JC"]),
        (0, ["AD", "KD", "QD", "JD"]),
        (0, ["AS", "KS", "QS", "JS"]),
        (0, ["TC", "TD", "TH", "TS"]),
        (0, ["2C", "3C", "4C", "5C"]),
        (0, ["2D", "3D", "4D", "5D"]),
        (0, ["2S", "3S", "4S", "5S"]),
    ];
    let record = finished_hand(3, 0, Bid::CINCH, Suit::Hearts, &tricks);
    let outcome = score_hand(&record, [2, 2]).unwrap();
    assert!(outcome.set);
    assert_eq!(outcome.net, [-10, 2]);
}

#[test]
fn tied_game_points_award_no_one() {
    // Ten game points per side, no trump jack in the deal.
    let tricks = vec![
        (0, ["AC", "KC", "QC", "JC"]),
        (1, ["AD", "KD", "QD", "JD"]),
        (0, ["2H", "3H", "4H", "5H"]),
        (1, ["6H", "7H", "8H", "9H"]),
        (0, ["2C", "3C", "4C", "5C"]),
        (1, ["6C", "7C", "8C", "9C"]),
        (0, ["2D", "3D", "4D", "5D"]),
        (1, ["2S", "3S", "4S", "5S"]),
        (0, ["6S", "7S", "8S", "9S"]),
    ];
    let record = finished_hand(3, 1, Bid(1), Suit::Hearts, &tricks);
    let outcome = score_hand(&record, [0, 0]).unwrap();
    assert_eq!(outcome.categories.game, None);
    assert_eq!(outcome.categories.jack, None);
    assert_eq!(outcome.categories.high, Some(Team::Odd));
    assert_eq!(outcome.categories.low, Some(Team::Even));
    assert_eq!(outcome.categories.game_points, [10, 10]);
    assert_eq!(outcome.net, [1, 1]);
}

#[test]
fn lone_trump_card_is_both_high_and_low() {
    let tricks = vec![
        (1, ["5H", "2C", "3C", "4C"]),
        (0, ["AC", "KC", "QC", "JC"]),
        (1, ["AD", "KD", "QD", "JD"]),
        (0, ["2D", "3D", "4D", "5D"]),
        (1, ["6D", "7D", "8D", "9D"]),
        (0, ["2S", "3S", "4S", "5S"]),
        (1, ["6S", "7S", "8S", "9S"]),
        (0, ["6C", "7C", "8C", "9C"]),
        (1, ["AS", "KS", "QS", "JS"]),
    ];
    let record = finished_hand(3, 1, Bid(2), Suit::Hearts, &tricks);
    let outcome = score_hand(&record, [0, 0]).unwrap();
    assert_eq!(outcome.categories.high, Some(Team::Odd));
    assert_eq!(outcome.categories.low, Some(Team::Odd));
    assert_eq!(outcome.net, [0, 3]);
}

#[test]
fn scoring_a_partial_hand_is_a_corruption() {
    let mut record = finished_hand(3, 0, Bid(1), Suit::Hearts, &contested_tricks(0, 1));
    record.tricks.truncate(5);
    assert!(matches!(
        category_points(&record),
        Err(DomainError::Corruption(_))
    ));
}

#[test]
fn scoring_without_a_declarer_is_a_corruption() {
    let mut record = finished_hand(3, 0, Bid(1), Suit::Hearts, &contested_tricks(0, 1));
    record.declarer = None;
    assert!(matches!(
        score_hand(&record, [0, 0]),
        Err(DomainError::Corruption(_))
    ));
}
