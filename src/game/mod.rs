//! A game of chess between two players sharing one board.
//!
//! `Game` owns the board and the turn. Every move request is answered with a
//! [`MoveStatus`]; only requests answered with an applied status change the
//! game.

mod player;
pub mod rules;
mod status;

pub use player::{assign_colors, Player};
pub use status::{DrawReason, GameState, MoveStatus};

use tracing::{debug, info, trace};

use crate::chess_board::{
    import_position, Board, Color, Coordinate, Move, Piece, PieceKind, Position, ZOBRIST,
};
use crate::config::{GameConfig, PromotionPolicy, RepetitionRule};
use crate::error::{FenResult, MoveParseError};

/// One entry of the repetition history.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PositionKey {
    Rendered(String),
    Hashed(u64),
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Color,
    en_passant_target: Option<Coordinate>,
    captured: [Vec<Piece>; 2],
    history: Vec<PositionKey>,
    fullmove_number: u32,
    state: GameState,
    config: GameConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::from_position(Position::default(), config)
    }

    pub fn from_fen(fen: &str, config: GameConfig) -> FenResult<Self> {
        Ok(Self::from_position(import_position(fen)?, config))
    }

    /// Starts from an arbitrary position. A position that is already mate or
    /// stalemate yields a game in that terminal state.
    pub fn from_position(position: Position, config: GameConfig) -> Self {
        let mut game = Self {
            board: position.board,
            current_player: position.side_to_move,
            en_passant_target: position.en_passant,
            captured: [Vec::new(), Vec::new()],
            history: Vec::new(),
            fullmove_number: position.fullmove_number.max(1),
            state: GameState::AwaitingMove(position.side_to_move),
            config,
        };
        game.history.push(game.position_key());
        game.state = game.evaluate_state();
        game
    }

    /// Requests a move from `from` to `to` for the side to move. A pawn
    /// reaching the last rank promotes to a queen.
    pub fn make_move(&mut self, from: Coordinate, to: Coordinate) -> MoveStatus {
        self.play(Move::new(from, to))
    }

    /// Like [`Game::make_move`], honouring the requested promotion piece when
    /// the configured policy allows a choice.
    pub fn play(&mut self, request: Move) -> MoveStatus {
        if self.state.is_terminal() {
            trace!(%request, state = ?self.state, "move rejected: game is over");
            return MoveStatus::InvalidMove;
        }

        let side = self.current_player;
        match self.board.get(request.from) {
            Some(piece) if piece.color == side => {}
            occupant => {
                trace!(%request, ?occupant, "move rejected: no piece of the side to move");
                return MoveStatus::InvalidMove;
            }
        }

        let Some(mv) = self.resolve(request) else {
            trace!(%request, "move rejected: not a move of this piece");
            return MoveStatus::InvalidMove;
        };

        if !rules::leaves_king_safe(&self.board, side, mv, self.en_passant_target) {
            trace!(%request, "move rejected: own king would be attacked");
            return MoveStatus::PutsKingInCheck;
        }

        self.commit(mv)
    }

    /// Parses move text such as "e2e4", "e2 e4" or "e7e8n" and plays it.
    pub fn play_algebraic(&mut self, text: &str) -> Result<MoveStatus, MoveParseError> {
        let request = Move::from_algebraic(text)?;
        Ok(self.play(request))
    }

    /// Picks the generated move matching the request, settling which piece a
    /// promoting pawn becomes.
    fn resolve(&self, request: Move) -> Option<Move> {
        if matches!(request.promotion, Some(PieceKind::King | PieceKind::Pawn)) {
            return None;
        }
        let promotions = self.config.promotion.choices();
        let candidates: Vec<Move> = self
            .board
            .generate_pseudo_moves_from(request.from, self.en_passant_target, promotions)
            .into_iter()
            .filter(|mv| mv.to == request.to)
            .collect();

        match candidates.as_slice() {
            [] => None,
            [only] if only.promotion.is_none() => request.promotion.is_none().then_some(*only),
            _ => {
                let wanted = match self.config.promotion {
                    PromotionPolicy::AutoQueen => PieceKind::Queen,
                    PromotionPolicy::AllowChoice => request.promotion.unwrap_or(PieceKind::Queen),
                };
                candidates.into_iter().find(|mv| mv.promotion == Some(wanted))
            }
        }
    }

    fn commit(&mut self, mv: Move) -> MoveStatus {
        let side = self.current_player;
        let effect = self.board.make_move(mv, self.en_passant_target);
        debug!(%mv, %side, ?effect, "move committed");

        if let Some(piece) = effect.captured {
            self.captured[side.index()].push(piece);
        }
        self.en_passant_target = effect.double_step_target;
        if side == Color::Black {
            self.fullmove_number += 1;
        }
        self.current_player = side.opposite();
        self.history.push(self.position_key());
        self.state = self.evaluate_state();

        match self.state {
            GameState::Checkmate { winner } => {
                info!(%winner, "checkmate");
                MoveStatus::Checkmate
            }
            GameState::Draw(reason) => {
                info!(%reason, "draw");
                MoveStatus::Draw(reason)
            }
            GameState::AwaitingMove(next) if self.board.is_in_check(next) => {
                info!(side = %next, "check");
                MoveStatus::Check
            }
            GameState::AwaitingMove(_) => MoveStatus::ValidMove,
        }
    }

    /// Terminal conditions for the side to move, most decisive first.
    fn evaluate_state(&self) -> GameState {
        let side = self.current_player;
        if !rules::has_legal_move(&self.board, side, self.en_passant_target) {
            return if self.board.is_in_check(side) {
                GameState::Checkmate { winner: side.opposite() }
            } else {
                GameState::Draw(DrawReason::Stalemate)
            };
        }
        if self.config.repetition_limit >= 2 && self.repetition_count() >= self.config.repetition_limit {
            return GameState::Draw(DrawReason::Repetition);
        }
        if self.config.insufficient_material_draw && rules::is_insufficient_material(&self.board) {
            return GameState::Draw(DrawReason::InsufficientMaterial);
        }
        GameState::AwaitingMove(side)
    }

    fn position_key(&self) -> PositionKey {
        match self.config.repetition_rule {
            RepetitionRule::RenderedBoard => PositionKey::Rendered(self.board.render_to_string()),
            RepetitionRule::FullPosition => PositionKey::Hashed(ZOBRIST.calculate_hash(
                &self.board,
                self.current_player,
                self.en_passant_target,
            )),
        }
    }

    /// How often the current position occurs in the history, itself included.
    fn repetition_count(&self) -> usize {
        let Some(current) = self.history.last() else {
            return 0;
        };
        self.history.iter().filter(|key| *key == current).count()
    }

    /// Every legal move of the side to move. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        rules::legal_moves(
            &self.board,
            self.current_player,
            self.en_passant_target,
            self.config.promotion.choices(),
        )
    }

    /// Legal moves of the piece on `from`, if it belongs to the side to move.
    pub fn legal_moves_from(&self, from: Coordinate) -> Vec<Move> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        match self.board.get(from) {
            Some(piece) if piece.color == self.current_player => self
                .board
                .generate_pseudo_moves_from(from, self.en_passant_target, self.config.promotion.choices())
                .into_iter()
                .filter(|&mv| rules::leaves_king_safe(&self.board, self.current_player, mv, self.en_passant_target))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Distinct destination squares of the piece on `from`, in file then
    /// rank order.
    pub fn legal_destinations(&self, from: Coordinate) -> Vec<Coordinate> {
        let mut destinations: Vec<Coordinate> = self.legal_moves_from(from).into_iter().map(|mv| mv.to).collect();
        destinations.sort();
        destinations.dedup();
        destinations
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.is_in_check(self.current_player)
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.state, GameState::Checkmate { .. })
    }

    pub fn is_stalemate(&self) -> bool {
        self.state == GameState::Draw(DrawReason::Stalemate)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn en_passant_target(&self) -> Option<Coordinate> {
        self.en_passant_target
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces taken by `color`, in capture order.
    pub fn captured(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    /// Number of positions recorded for repetition, the initial one included.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Snapshot of the game as a FEN position. The halfmove clock is not
    /// tracked and reads 0.
    pub fn position(&self) -> Position {
        Position {
            board: self.board.clone(),
            side_to_move: self.current_player,
            en_passant: self.en_passant_target,
            halfmove_clock: 0,
            fullmove_number: self.fullmove_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::export_position;
    use crate::chess_board::test_utils::*;
    use crate::error::FenError;

    fn play_all(game: &mut Game, moves: &[&str]) -> Vec<MoveStatus> {
        moves.iter().map(|m| game.play_algebraic(m).unwrap()).collect()
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.current_player(), Color::White);
        assert_eq!(game.state(), GameState::AwaitingMove(Color::White));
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.history_len(), 1);
        assert!(!game.is_check());
        assert_eq!(game.en_passant_target(), None);
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new();
        assert_eq!(game.make_move(sq("e2"), sq("e4")), MoveStatus::ValidMove);
        assert_eq!(game.current_player(), Color::Black);

        // White may not move twice
        assert_eq!(game.make_move(sq("d2"), sq("d4")), MoveStatus::InvalidMove);
        // Empty square
        assert_eq!(game.make_move(sq("e4"), sq("e5")), MoveStatus::InvalidMove);
        assert_eq!(game.make_move(sq("d5"), sq("d4")), MoveStatus::InvalidMove);
        assert_eq!(game.current_player(), Color::Black);
        assert_eq!(game.history_len(), 2);
    }

    #[test]
    fn test_rejected_move_leaves_game_unchanged() {
        let mut game = Game::new();
        let before = export_position(&game);
        assert_eq!(game.make_move(sq("e2"), sq("e5")), MoveStatus::InvalidMove);
        assert_eq!(game.make_move(sq("b1"), sq("d2")), MoveStatus::InvalidMove);
        assert_eq!(game.make_move(sq("a1"), sq("a3")), MoveStatus::InvalidMove);
        assert_eq!(export_position(&game), before);
        assert_eq!(game.history_len(), 1);
    }

    #[test]
    fn test_pawn_captures_only_diagonally() {
        let mut game = Game::new();
        play_all(&mut game, &["e2e4", "e7e5"]);
        // e4 is blocked head on and has nothing to take
        assert!(game.legal_moves_from(sq("e4")).is_empty());

        play_all(&mut game, &["g1f3", "d7d5"]);
        assert_eq!(game.legal_destinations(sq("e4")), vec![sq("d5")]);
        assert_eq!(game.make_move(sq("e4"), sq("d5")), MoveStatus::ValidMove);
        let taken = game.captured(Color::White);
        assert_eq!(taken.len(), 1);
        assert_eq!((taken[0].kind, taken[0].color), (PieceKind::Pawn, Color::Black));
        assert!(game.captured(Color::Black).is_empty());
    }

    #[test]
    fn test_fools_mate() {
        let mut game = Game::new();
        let statuses = play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(
            statuses,
            vec![
                MoveStatus::ValidMove,
                MoveStatus::ValidMove,
                MoveStatus::ValidMove,
                MoveStatus::Checkmate
            ]
        );
        assert!(game.is_checkmate());
        assert!(game.is_check());
        assert_eq!(game.state(), GameState::Checkmate { winner: Color::Black });
        assert!(game.legal_moves().is_empty());

        // Nothing moves after the game is over
        assert_eq!(game.make_move(sq("a2"), sq("a3")), MoveStatus::InvalidMove);
        assert_eq!(game.history_len(), 5);
    }

    #[test]
    fn test_check_reported() {
        let mut game = Game::new();
        let statuses = play_all(&mut game, &["e2e4", "f7f6", "d1h5"]);
        assert_eq!(statuses[2], MoveStatus::Check);
        assert!(game.is_check());
        assert_eq!(game.state(), GameState::AwaitingMove(Color::Black));

        // Black must answer the check
        assert_eq!(game.make_move(sq("a7"), sq("a6")), MoveStatus::PutsKingInCheck);
        assert_eq!(game.make_move(sq("g7"), sq("g6")), MoveStatus::ValidMove);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let mut game = Game::from_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1", GameConfig::default()).unwrap();
        assert!(game.legal_moves_from(sq("e2")).is_empty());
        assert_eq!(game.make_move(sq("e2"), sq("c3")), MoveStatus::PutsKingInCheck);
        assert_eq!(game.current_player(), Color::White);
        assert_eq!(game.make_move(sq("e2"), sq("e4")), MoveStatus::InvalidMove);
    }

    #[test]
    fn test_castling_moves_rook() {
        let mut game = Game::new();
        play_all(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);
        assert!(game.legal_destinations(sq("e1")).contains(&sq("g1")));

        assert_eq!(game.make_move(sq("e1"), sq("g1")), MoveStatus::ValidMove);
        let king = game.board().get(sq("g1")).unwrap();
        let rook = game.board().get(sq("f1")).unwrap();
        assert_eq!(king.kind, PieceKind::King);
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(king.has_moved() && rook.has_moved());
        assert!(game.board().is_empty_at(sq("e1")));
        assert!(game.board().is_empty_at(sq("h1")));
        assert_eq!(game.board().castling_rights(), [false, false, true, true]);
    }

    #[test]
    fn test_castling_refused_after_king_moved() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", GameConfig::default()).unwrap();
        play_all(&mut game, &["e1f1", "e8f8", "f1e1", "f8e8"]);
        assert_eq!(game.make_move(sq("e1"), sq("g1")), MoveStatus::InvalidMove);
        assert_eq!(game.make_move(sq("e1"), sq("c1")), MoveStatus::InvalidMove);
    }

    #[test]
    fn test_castling_through_attack_refused() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1", GameConfig::default()).unwrap();
        // f2 rook covers f1, so only the queen side is open
        assert_eq!(game.make_move(sq("e1"), sq("g1")), MoveStatus::InvalidMove);
        assert_eq!(game.make_move(sq("e1"), sq("c1")), MoveStatus::ValidMove);
        assert_eq!(game.board().get(sq("d1")).unwrap().kind, PieceKind::Rook);
    }

    #[test]
    fn test_en_passant() {
        let mut game = Game::new();
        play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert_eq!(game.en_passant_target(), Some(sq("d6")));
        assert_eq!(game.make_move(sq("e5"), sq("d6")), MoveStatus::ValidMove);
        assert!(game.board().is_empty_at(sq("d5")));
        assert_eq!(game.captured(Color::White)[0].kind, PieceKind::Pawn);
        assert_eq!(game.en_passant_target(), None);
    }

    #[test]
    fn test_impossible_en_passant_target_rejected() {
        // a rank 3 target with White to move would let d2 take on e3
        assert_eq!(
            Game::from_fen("4k3/8/8/8/8/8/3Pp3/7K w - e3 0 1", GameConfig::default()).map(|_| ()),
            Err(FenError::EnPassant("e3".to_string()))
        );
        let mut game = Game::from_fen("4k3/8/8/8/8/8/3Pp3/7K w - - 0 1", GameConfig::default()).unwrap();
        assert_eq!(game.make_move(sq("d2"), sq("e3")), MoveStatus::InvalidMove);
        assert!(game.captured(Color::White).is_empty());
    }

    #[test]
    fn test_en_passant_expires() {
        let mut game = Game::new();
        play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
        assert_eq!(game.en_passant_target(), None);
        assert_eq!(game.make_move(sq("e5"), sq("d6")), MoveStatus::InvalidMove);
    }

    #[test]
    fn test_promotion_auto_queen() {
        let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", GameConfig::default()).unwrap();
        // a requested knight is ignored
        assert_eq!(game.play_algebraic("a7a8n").unwrap(), MoveStatus::Check);
        assert_eq!(game.board().get(sq("a8")).unwrap().kind, PieceKind::Queen);
    }

    #[test]
    fn test_promotion_choice() {
        let config = GameConfig::default().with_promotion(PromotionPolicy::AllowChoice);
        // the black pawn keeps enough material on the board after a knight promotion
        let fen = "4k3/P7/8/8/8/8/7p/4K3 w - - 0 1";
        let mut game = Game::from_fen(fen, config.clone()).unwrap();
        assert_eq!(game.legal_moves_from(sq("a7")).len(), 4);
        assert_eq!(game.legal_destinations(sq("a7")), vec![sq("a8")]);
        assert_eq!(game.play_algebraic("a7a8n").unwrap(), MoveStatus::ValidMove);
        assert_eq!(game.board().get(sq("a8")).unwrap().kind, PieceKind::Knight);

        let mut game = Game::from_fen(fen, config).unwrap();
        let to_king = Move::new(sq("a7"), sq("a8")).with_promotion(PieceKind::King);
        assert_eq!(game.play(to_king), MoveStatus::InvalidMove);
        assert_eq!(game.make_move(sq("a7"), sq("a8")), MoveStatus::Check);
        assert_eq!(game.board().get(sq("a8")).unwrap().kind, PieceKind::Queen);
    }

    #[test]
    fn test_knight_promotion_leaving_bare_kings_is_drawn() {
        let config = GameConfig::default().with_promotion(PromotionPolicy::AllowChoice);
        let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", config).unwrap();
        assert_eq!(
            game.play_algebraic("a7a8n").unwrap(),
            MoveStatus::Draw(DrawReason::InsufficientMaterial)
        );
    }

    #[test]
    fn test_promotion_suffix_on_ordinary_move() {
        let mut game = Game::new();
        assert_eq!(game.play_algebraic("e2e4q").unwrap(), MoveStatus::InvalidMove);
        assert_eq!(game.history_len(), 1);
        assert_eq!(game.play_algebraic("e2e4").unwrap(), MoveStatus::ValidMove);

        let config = GameConfig::default().with_promotion(PromotionPolicy::AllowChoice);
        let mut game = Game::with_config(config);
        assert_eq!(game.play_algebraic("g1f3n").unwrap(), MoveStatus::InvalidMove);
    }

    #[test]
    fn test_castling_refused_after_rook_returns() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", GameConfig::default()).unwrap();
        let statuses = play_all(&mut game, &["h1h2", "a8b8", "h2h1", "b8a8"]);
        assert!(statuses.iter().all(|s| *s == MoveStatus::ValidMove));
        assert!(game.board().get(sq("h1")).unwrap().has_moved());
        assert_eq!(game.board().castling_rights(), [false, true, true, false]);

        assert_eq!(game.make_move(sq("e1"), sq("g1")), MoveStatus::InvalidMove);
        assert_eq!(game.make_move(sq("e1"), sq("c1")), MoveStatus::ValidMove);
        assert_eq!(game.board().get(sq("d1")).unwrap().kind, PieceKind::Rook);
    }

    #[test]
    fn test_stalemate() {
        let mut game = Game::from_fen("k7/8/1Q6/8/8/8/8/7K w - - 0 1", GameConfig::default()).unwrap();
        assert_eq!(game.make_move(sq("b6"), sq("c7")), MoveStatus::Draw(DrawReason::Stalemate));
        assert!(game.is_stalemate());
        assert!(!game.is_check());
        assert_eq!(game.make_move(sq("a8"), sq("a7")), MoveStatus::InvalidMove);
    }

    #[test]
    fn test_terminal_position_on_import() {
        let mated = Game::from_fen("1k6/8/8/8/8/8/PPn5/KN6 w - - 0 1", GameConfig::default()).unwrap();
        assert_eq!(mated.state(), GameState::Checkmate { winner: Color::Black });

        let stalemated = Game::from_fen("1k6/8/8/8/8/1r6/7r/K7 w - - 0 1", GameConfig::default()).unwrap();
        assert_eq!(stalemated.state(), GameState::Draw(DrawReason::Stalemate));
    }

    const KNIGHT_SHUFFLE: [&str; 8] = ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"];

    #[test]
    fn test_threefold_repetition() {
        let mut game = Game::new();
        let statuses = play_all(&mut game, &KNIGHT_SHUFFLE);
        assert!(statuses[..7].iter().all(|s| *s == MoveStatus::ValidMove));
        assert_eq!(statuses[7], MoveStatus::Draw(DrawReason::Repetition));
        assert_eq!(game.state(), GameState::Draw(DrawReason::Repetition));
        assert_eq!(game.history_len(), 9);
    }

    #[test]
    fn test_repetition_limit_configurable() {
        let config = GameConfig::default().with_repetition_limit(2);
        let mut game = Game::with_config(config);
        let statuses = play_all(&mut game, &KNIGHT_SHUFFLE[..4]);
        assert_eq!(statuses[3], MoveStatus::Draw(DrawReason::Repetition));

        let config = GameConfig::default().with_repetition_limit(0);
        let mut game = Game::with_config(config);
        let statuses = play_all(&mut game, &KNIGHT_SHUFFLE);
        assert!(statuses.iter().all(|s| *s == MoveStatus::ValidMove));
    }

    #[test]
    fn test_repetition_rules() {
        // The rook cycles b2-c2-d2 while the black king steps h8-h7. The
        // placement recurs after five plies with the other side to move, the
        // full position only after twelve.
        let fen = "7k/8/8/K7/8/8/1R6/8 w - - 0 1";
        let moves = [
            "b2c2", "h8h7", "c2d2", "h7h8", "d2b2", "h8h7", "b2c2", "h7h8", "c2d2", "h8h7", "d2b2", "h7h8",
        ];
        let config = GameConfig::default().with_repetition_limit(2);

        let mut rendered = Game::from_fen(fen, config.clone()).unwrap();
        let statuses = play_all(&mut rendered, &moves[..5]);
        assert!(statuses[..4].iter().all(|s| *s == MoveStatus::ValidMove));
        assert_eq!(statuses[4], MoveStatus::Draw(DrawReason::Repetition));

        let mut full = Game::from_fen(fen, config.with_repetition_rule(RepetitionRule::FullPosition)).unwrap();
        let statuses = play_all(&mut full, &moves);
        assert!(statuses[..11].iter().all(|s| *s == MoveStatus::ValidMove));
        assert_eq!(statuses[11], MoveStatus::Draw(DrawReason::Repetition));
    }

    #[test]
    fn test_insufficient_material() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1", GameConfig::default()).unwrap();
        assert_eq!(
            game.make_move(sq("e1"), sq("d2")),
            MoveStatus::Draw(DrawReason::InsufficientMaterial)
        );
        assert_eq!(game.captured(Color::White)[0].kind, PieceKind::Rook);

        let config = GameConfig::default().with_insufficient_material_draw(false);
        let mut game = Game::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1", config).unwrap();
        assert_eq!(game.make_move(sq("e1"), sq("d2")), MoveStatus::ValidMove);
    }

    #[test]
    fn test_position_export() {
        let mut game = Game::new();
        play_all(&mut game, &["e2e4"]);
        assert_eq!(
            export_position(&game),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        play_all(&mut game, &["c7c5", "g1f3"]);
        assert_eq!(
            export_position(&game),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 0 2"
        );
    }

    #[test]
    fn test_malformed_move_text() {
        let mut game = Game::new();
        assert!(game.play_algebraic("e2").is_err());
        assert!(game.play_algebraic("z2e4").is_err());
        assert!(game.play_algebraic("e7e8k").is_err());
        assert_eq!(game.history_len(), 1);
    }

    #[test]
    fn test_board_stays_consistent() {
        let mut game = Game::new();
        play_all(
            &mut game,
            &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "d2d4", "c7c6", "g1f3", "c8g4"],
        );
        assert!(game.board().is_consistent());
        assert_eq!(game.board().pieces().count(), 30);
        assert_eq!(game.captured(Color::White).len(), 1);
        assert_eq!(game.captured(Color::Black).len(), 1);
    }
}
