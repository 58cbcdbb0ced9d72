use crate::chess_board::PieceKind;

/// How repeated positions are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepetitionRule {
    /// Compare the rendered board text. Ignores side to move, castling
    /// rights and en passant, so some true repetitions are merged and none
    /// are missed.
    #[default]
    RenderedBoard,
    /// Compare a Zobrist key over placement, side to move, castling rights
    /// and the en passant file.
    FullPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionPolicy {
    /// Pawns reaching the last rank always become queens.
    #[default]
    AutoQueen,
    /// A move may name the promotion piece; queen when it does not.
    AllowChoice,
}

impl PromotionPolicy {
    pub fn choices(&self) -> &'static [PieceKind] {
        match self {
            PromotionPolicy::AutoQueen => &[PieceKind::Queen],
            PromotionPolicy::AllowChoice => &[PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight],
        }
    }
}

/// Tunables for a `Game`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Occurrences of one position that draw the game. Values below 2
    /// turn the rule off.
    pub repetition_limit: usize,
    pub repetition_rule: RepetitionRule,
    pub promotion: PromotionPolicy,
    pub insufficient_material_draw: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            repetition_limit: 3,
            repetition_rule: RepetitionRule::default(),
            promotion: PromotionPolicy::default(),
            insufficient_material_draw: true,
        }
    }
}

impl GameConfig {
    pub fn with_repetition_limit(mut self, limit: usize) -> Self {
        self.repetition_limit = limit;
        self
    }

    pub fn with_repetition_rule(mut self, rule: RepetitionRule) -> Self {
        self.repetition_rule = rule;
        self
    }

    pub fn with_promotion(mut self, promotion: PromotionPolicy) -> Self {
        self.promotion = promotion;
        self
    }

    pub fn with_insufficient_material_draw(mut self, enabled: bool) -> Self {
        self.insufficient_material_draw = enabled;
        self
    }
}
