use arbiter::chess::{Color, GameSession, GameStatus, MoveOutcome, MoveRecord, Rejection};
use arbiter::messages::chess::{
    apply_update, generate_game_id, hash_board_state, notifications, validate_game_id,
    verify_board_hash,
};
use arbiter::messages::{Message, MessageError, UpdateBoard};

mod common;
use common::{play, play_all, queen};

/// Message Integration Tests
/// Replaying board updates between two sessions of the same game
#[cfg(test)]
mod messages_tests {
    use super::*;

    /// Sender and receiver share one game id
    fn paired_sessions() -> (GameSession, GameSession) {
        let sender = GameSession::new();
        let receiver = GameSession::new().with_id(sender.id());
        (sender, receiver)
    }

    fn update_for(session: &mut GameSession, text: &str) -> (MoveRecord, UpdateBoard) {
        let record = play(session, text);
        let update = UpdateBoard::new(session, &record);
        (record, update)
    }

    #[test]
    fn test_updates_keep_sessions_in_sync() {
        let (mut sender, mut receiver) = paired_sessions();
        for text in ["e2e4", "c7c5", "g1f3", "d7d6"] {
            let (record, update) = update_for(&mut sender, text);
            let replayed = apply_update(&mut receiver, &update).unwrap();
            assert_eq!(replayed.san, record.san);
        }
        assert_eq!(receiver.to_fen(), sender.to_fen());
        assert_eq!(receiver.fen_history(), sender.fen_history());
    }

    #[test]
    fn test_update_survives_the_wire() {
        let (mut sender, mut receiver) = paired_sessions();
        let (_, update) = update_for(&mut sender, "g1f3");

        let line = Message::UpdateBoard(update.clone()).to_json().unwrap();
        let decoded = Message::from_json(&line).unwrap();
        assert_eq!(decoded, Message::UpdateBoard(update));
        assert_eq!(decoded.game_id(), sender.id().to_string());

        let Message::UpdateBoard(received) = decoded else {
            panic!("expected a board update");
        };
        apply_update(&mut receiver, &received).unwrap();
        assert_eq!(receiver.side_to_move(), Color::Black);
    }

    #[test]
    fn test_promotion_replays_with_chosen_piece() {
        let mut sender = GameSession::from_fen("4k3/P7/8/8/8/8/8/4K3 w").unwrap();
        let mut receiver = GameSession::from_fen("4k3/P7/8/8/8/8/8/4K3 w")
            .unwrap()
            .with_id(sender.id());
        let (_, update) = update_for(&mut sender, "a7a8n");
        assert_eq!(update.chess_move, "a7a8n");

        apply_update(&mut receiver, &update).unwrap();
        assert_eq!(receiver.to_fen(), sender.to_fen());
    }

    /// Hex case of the received hash does not matter
    #[test]
    fn test_uppercase_hash_is_accepted() {
        let (mut sender, mut receiver) = paired_sessions();
        let (_, mut update) = update_for(&mut sender, "d2d4");
        update.board_state_hash = update.board_state_hash.to_uppercase();

        apply_update(&mut receiver, &update).unwrap();
        assert!(verify_board_hash(
            receiver.position(),
            &update.board_state_hash
        ));
    }

    #[test]
    fn test_hash_mismatch_leaves_session_untouched() {
        let (mut sender, mut receiver) = paired_sessions();
        let (_, mut update) = update_for(&mut sender, "e2e4");
        update.board_state_hash = hash_board_state(receiver.position());

        let before = receiver.to_fen();
        let result = apply_update(&mut receiver, &update);
        assert!(matches!(result, Err(MessageError::BoardHashMismatch { .. })));
        assert_eq!(receiver.to_fen(), before);
        assert!(receiver.history().is_empty());
    }

    #[test]
    fn test_illegal_update_is_rejected() {
        let (sender, mut receiver) = paired_sessions();
        let update = UpdateBoard {
            game_id: sender.id().to_string(),
            chess_move: "e2e5".to_string(),
            san: "e5".to_string(),
            move_kind: arbiter::chess::MoveKind::Movement,
            capture: false,
            promotion: None,
            check: false,
            checkmate: false,
            board_state_hash: hash_board_state(sender.position()),
        };

        match apply_update(&mut receiver, &update) {
            Err(MessageError::IllegalMove { chess_move, reason }) => {
                assert_eq!(chess_move, "e2e5");
                assert_eq!(reason, Rejection::NotInPattern);
            }
            other => panic!("expected an illegal move error, got {other:?}"),
        }
        assert!(receiver.history().is_empty());
    }

    #[test]
    fn test_unreadable_move_is_rejected() {
        let (mut sender, mut receiver) = paired_sessions();
        let (_, mut update) = update_for(&mut sender, "e2e4");
        update.chess_move = "knight to f3".to_string();
        assert!(matches!(
            apply_update(&mut receiver, &update),
            Err(MessageError::InvalidMove(_))
        ));
    }

    #[test]
    fn test_game_id_checks() {
        let (mut sender, _) = paired_sessions();
        let (_, update) = update_for(&mut sender, "e2e4");

        let mut stranger = GameSession::new();
        assert!(matches!(
            apply_update(&mut stranger, &update),
            Err(MessageError::GameIdMismatch { .. })
        ));

        let mut bogus = update.clone();
        bogus.game_id = "not-a-uuid".to_string();
        assert!(matches!(
            apply_update(&mut stranger, &bogus),
            Err(MessageError::InvalidGameId(_))
        ));
        assert!(stranger.history().is_empty());
    }

    #[test]
    fn test_notifications_announce_game_over() {
        let mut session = GameSession::new();
        play_all(&mut session, &["f2f3", "e7e5", "g2g4"]);
        let MoveOutcome::Accepted(record) = session.try_move_str("d8h4", &mut queen()).unwrap()
        else {
            panic!("Qh4 is legal");
        };

        let messages = notifications(&session, &record);
        assert_eq!(messages.len(), 2);
        match &messages[0] {
            Message::UpdateBoard(update) => {
                assert_eq!(update.san, "Qh4#");
                assert!(update.checkmate);
            }
            other => panic!("expected a board update first, got {other:?}"),
        }
        match &messages[1] {
            Message::GameOver(over) => {
                assert_eq!(
                    over.outcome,
                    GameStatus::Checkmate {
                        winner: Color::Black
                    }
                );
                assert_eq!(over.game_id, session.id().to_string());
            }
            other => panic!("expected game over second, got {other:?}"),
        }
    }

    #[test]
    fn test_ongoing_game_sends_only_update() {
        let mut session = GameSession::new();
        let record = play(&mut session, "d2d4");
        assert_eq!(notifications(&session, &record).len(), 1);
    }

    #[test]
    fn test_game_ids() {
        let id = generate_game_id();
        assert!(validate_game_id(&id));
        assert_ne!(id, generate_game_id());
        assert!(!validate_game_id("game-1"));
    }
}
