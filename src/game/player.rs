use rand::Rng;

use crate::chess_board::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub color: Color,
}

/// Gives one of the two names White at random. Returned as [white, black].
pub fn assign_colors<R: Rng>(first: String, second: String, rng: &mut R) -> [Player; 2] {
    let (white, black) = if rng.gen_bool(0.5) { (first, second) } else { (second, first) };
    [
        Player {
            name: white,
            color: Color::White,
        },
        Player {
            name: black,
            color: Color::Black,
        },
    ]
}
