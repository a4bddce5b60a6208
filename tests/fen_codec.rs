use arbiter::chess::{fen, ChessError, Color, GameSession, PieceKind, Position};

mod common;
use common::{play_all, sq};

/// FEN Codec Integration Tests
/// Covers decode/encode inversion, malformed input and the side-to-move field
#[cfg(test)]
mod fen_codec_tests {
    use super::*;

    /// Decoding the encoding of a decoded FEN gives back the same board
    #[test]
    fn test_round_trip_start_position() {
        let decoded = fen::decode(fen::START_FEN).unwrap();
        let encoded = fen::encode(&decoded.0, decoded.1);
        assert_eq!(encoded, fen::START_FEN);
        assert_eq!(fen::decode(&encoded).unwrap(), decoded);
    }

    /// Round trip of a position reached by play, with captures on both sides
    #[test]
    fn test_round_trip_mid_game_with_captures() {
        let mut session = GameSession::new();
        play_all(
            &mut session,
            &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "d2d4", "c7c6"],
        );
        let fen_text = session.to_fen();
        assert_eq!(
            fen_text,
            "rnb1kbnr/pp2pppp/2p5/q7/3P4/2N5/PPP2PPP/R1BQKBNR w"
        );

        let decoded = fen::decode(&fen_text).unwrap();
        let again = fen::decode(&fen::encode(&decoded.0, decoded.1)).unwrap();
        assert_eq!(again, decoded);
    }

    /// Every FEN in the session history decodes and re-encodes unchanged
    #[test]
    fn test_history_fens_are_stable() {
        let mut session = GameSession::new();
        play_all(&mut session, &["g1f3", "g8f6", "e2e4", "f6e4", "d2d3", "e4c5"]);
        for fen_text in session.fen_history() {
            let (board, side) = fen::decode(fen_text).unwrap();
            assert_eq!(&fen::encode(&board, side), fen_text);
        }
    }

    #[test]
    fn test_decoded_pieces() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b").unwrap();
        assert_eq!(position.side_to_move(), Color::Black);
        let king = position.board().get(sq("e8")).unwrap();
        assert!(king.is(PieceKind::King, Color::Black));
        assert!(!king.has_moved);
        assert_eq!(position.player(Color::White).pieces().len(), 3);
    }

    #[test]
    fn test_malformed_fen_errors() {
        let cases = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/8 w",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w",
            "rnbqkbnr/pppppppp/08/8/8/8/PPPPPPPP/RNBQKBNR w",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR w",
        ];
        for case in cases {
            assert!(
                matches!(fen::decode(case), Err(ChessError::MalformedFen(_))),
                "expected MalformedFen for {case}"
            );
        }
    }

    #[test]
    fn test_side_to_move_errors() {
        assert_eq!(
            fen::decode("4k3/8/8/8/8/8/8/4K3"),
            Err(ChessError::MissingSideToMove)
        );
        assert!(matches!(
            fen::decode("4k3/8/8/8/8/8/8/4K3 white"),
            Err(ChessError::InvalidSideToMove(_))
        ));
    }

    #[test]
    fn test_unknown_piece_letter() {
        assert_eq!(
            fen::decode("4k3/8/8/8/8/8/8/4K2Z w"),
            Err(ChessError::UnknownPieceLetter('Z'))
        );
    }

    /// Each side needs exactly one king, otherwise nothing can be validated
    #[test]
    fn test_king_count_is_enforced() {
        for case in ["K6K/8/8/8/8/8/8/k7 w", "4k3/8/8/8/8/8/8/8 w", "8/8/8/8/8/8/8/8 b"] {
            assert!(
                matches!(
                    GameSession::from_fen(case),
                    Err(ChessError::MalformedFen(_))
                ),
                "expected MalformedFen for {case}"
            );
        }

        let session = GameSession::from_fen("K7/8/8/8/8/8/8/k7 w").unwrap();
        assert_eq!(session.legal_moves().len(), 3);
        assert!(session.is_legal(sq("a8"), sq("b8")));
    }

    /// Castling, en passant and clock fields are accepted and dropped
    #[test]
    fn test_six_field_fen_normalizes() {
        let session =
            GameSession::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(
            session.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"
        );
    }
}
