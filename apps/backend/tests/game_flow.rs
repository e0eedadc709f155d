//! End-to-end flows through the service layer and the HTTP surface.

use actix_web::test as awtest;
use actix_web::{web, App};
use proptest::prelude::*;
use uuid::Uuid;

use cinch_backend::domain::bidding::Bid;
use cinch_backend::domain::events::GameEvent;
use cinch_backend::domain::rules::{MAX_HANDS, WINNING_SCORE};
use cinch_backend::domain::state::Phase;
use cinch_backend::routes;
use cinch_backend::services::rooms::AiSeat;
use cinch_backend::services::{RoomOptions, RoomRegistry};
use cinch_backend::AppState;

fn ai_seats(strategy: &str, seats: &[u8]) -> Vec<AiSeat> {
    seats
        .iter()
        .map(|&seat| AiSeat {
            seat,
            strategy: strategy.to_string(),
        })
        .collect()
}

#[test]
fn four_ai_room_plays_to_completion() {
    let rooms = RoomRegistry::new();
    let info = rooms
        .create(RoomOptions {
            seed: Some(42),
            ai: ai_seats("random", &[0, 1, 2, 3]),
            ..Default::default()
        })
        .expect("room creation drives the AI game to its end");

    assert_eq!(info.phase, Phase::Postgame);
    assert!(info.seats_taken.iter().all(|taken| *taken));
    assert!(info.hand_no <= MAX_HANDS);
    assert!(
        info.scores.iter().any(|s| *s >= WINNING_SCORE) || info.hand_no == MAX_HANDS,
        "game over without a winner or a draw: {:?}",
        info.scores
    );

    // The flat action log folds into one summary per completed hand,
    // ending at the final scores.
    let summaries = rooms.summary(info.id).expect("room exists");
    assert!(!summaries.is_empty());
    let last = summaries.last().unwrap();
    assert_eq!(last.scores_after, info.scores);
    for (i, summary) in summaries.iter().enumerate() {
        assert_eq!(summary.hand_no, i as u32 + 1);
        assert_eq!(summary.dealer, i as u8 % 4);
        assert!(summary.high_bid.value() >= 1);
    }
}

#[test]
fn greedy_strategies_also_finish() {
    let rooms = RoomRegistry::new();
    let info = rooms
        .create(RoomOptions {
            seed: Some(7),
            ai: ai_seats("greedy", &[0, 1, 2, 3]),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(info.phase, Phase::Postgame);
}

#[test]
fn human_seat_plays_against_ai() {
    let rooms = RoomRegistry::new();
    let info = rooms
        .create(RoomOptions {
            seed: Some(99),
            ai: ai_seats("random", &[1, 2, 3]),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(info.phase, Phase::Pregame);

    let me = Uuid::new_v4();
    let (view, events) = rooms.join(info.id, 0, me).expect("seat 0 is free");
    assert_eq!(view.seat, 0);

    // Events come back in acceptance order: the join, then the deal.
    assert!(matches!(events[0], GameEvent::SeatJoined { seat: 0 }));
    assert!(matches!(events[1], GameEvent::HandStarted { .. }));

    // Play out the whole game from seat 0, always taking the first
    // legal option; the registry drives the three AI seats in between.
    let mut guard = 0;
    loop {
        let view = rooms.seat_view(info.id, 0).unwrap();
        match view.phase {
            Phase::Postgame => break,
            Phase::Bid if view.active_player == 0 => {
                let bid = view.legal_bids()[0];
                rooms.submit_bid(info.id, 0, bid).expect("legal bid");
            }
            Phase::Play if view.active_player == 0 => {
                let card = view.legal_plays()[0];
                rooms.submit_play(info.id, 0, card).expect("legal play");
            }
            phase => panic!("stalled waiting for seat 0 in {phase:?}"),
        }
        guard += 1;
        assert!(guard < 1000, "game did not terminate");
    }

    let info = rooms.info(info.id).unwrap();
    assert_eq!(info.phase, Phase::Postgame);
}

#[test]
fn rejections_leave_the_room_playable() {
    let rooms = RoomRegistry::new();
    let info = rooms
        .create(RoomOptions {
            seed: Some(3),
            ai: ai_seats("random", &[1, 2, 3]),
            ..Default::default()
        })
        .unwrap();
    let me = Uuid::new_v4();
    rooms.join(info.id, 0, me).unwrap();

    // Hand 1 has dealer 0, so the AI seats bid first and seat 0 closes
    // the round. Bidding out of range or out of turn is rejected without
    // advancing anything.
    assert!(rooms.submit_bid(info.id, 0, Bid(6)).is_err());
    assert!(rooms.submit_bid(info.id, 2, Bid(4)).is_err());
    let view = rooms.seat_view(info.id, 0).unwrap();
    assert_eq!(view.phase, Phase::Bid);
    assert_eq!(view.active_player, 0);

    // Playing a card during bidding is rejected too.
    let any_card = cinch_backend::domain::cards::Card::from_code(1).unwrap();
    assert!(rooms.submit_play(info.id, 0, any_card).is_err());

    let bid = view.legal_bids()[0];
    rooms.submit_bid(info.id, 0, bid).expect("legal bid accepted");
}

#[test]
fn unknown_rooms_and_strategies_are_rejected() {
    let rooms = RoomRegistry::new();
    assert!(rooms.info(Uuid::new_v4()).is_err());
    assert!(rooms
        .create(RoomOptions {
            ai: ai_seats("perfect", &[0]),
            ..Default::default()
        })
        .is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Whatever the deal, random seats always find legal actions and the
    /// game runs to its end.
    #[test]
    fn random_seats_finish_any_seeded_game(seed in any::<u64>()) {
        let rooms = RoomRegistry::new();
        let info = rooms
            .create(RoomOptions {
                seed: Some(seed),
                ai: ai_seats("random", &[0, 1, 2, 3]),
                ..Default::default()
            })
            .unwrap();
        prop_assert_eq!(info.phase, Phase::Postgame);
        prop_assert!(info.hand_no <= MAX_HANDS);
    }
}

#[actix_web::test]
async fn http_surface_smoke() {
    let app = awtest::init_service(
        App::new()
            .app_data(web::Data::new(AppState::new()))
            .configure(routes::configure),
    )
    .await;

    let req = awtest::TestRequest::get().uri("/health").to_request();
    let resp = awtest::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(awtest::read_body(resp).await, "ok");

    // Create an all-AI room over HTTP; it finishes during the request.
    let req = awtest::TestRequest::post()
        .uri("/api/rooms")
        .set_json(serde_json::json!({
            "seed": 11,
            "ai": [
                { "seat": 0, "strategy": "random" },
                { "seat": 1, "strategy": "greedy" },
                { "seat": 2, "strategy": "random" },
                { "seat": 3, "strategy": "greedy" }
            ]
        }))
        .to_request();
    let resp = awtest::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let info: serde_json::Value = awtest::read_body_json(resp).await;
    assert_eq!(info["phase"], "postgame");
    let room_id = info["id"].as_str().expect("room id").to_string();

    let req = awtest::TestRequest::get().uri("/api/rooms").to_request();
    let rooms: serde_json::Value = awtest::call_and_read_body_json(&app, req).await;
    assert_eq!(rooms.as_array().map(Vec::len), Some(1));

    let req = awtest::TestRequest::get()
        .uri(&format!("/api/rooms/{room_id}/summary"))
        .to_request();
    let summaries: serde_json::Value = awtest::call_and_read_body_json(&app, req).await;
    assert!(!summaries.as_array().expect("summary array").is_empty());

    // Unknown strategy comes back as a problem+json rejection.
    let req = awtest::TestRequest::post()
        .uri("/api/rooms")
        .set_json(serde_json::json!({
            "ai": [{ "seat": 0, "strategy": "perfect" }]
        }))
        .to_request();
    let resp = awtest::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let problem: serde_json::Value = awtest::read_body_json(resp).await;
    assert_eq!(problem["code"], "UNKNOWN_STRATEGY");
}
