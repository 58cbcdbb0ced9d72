//! Text front end: two players at one terminal take turns typing moves.

use std::io::{self, BufRead, Write};

use circular_buffer::CircularBuffer;
use rand::Rng;
use tracing::debug;

use crate::chess_board::{export_position, Color, Coordinate, Move};
use crate::error::MoveParseError;
use crate::game::{assign_colors, Game, GameState, MoveStatus, Player};

const RECENT_MOVES: usize = 8;

const HELP: &str = "\
Commands:
  e2e4 | e2 e4 | e7e8q   move a piece (optional promotion letter)
  moves <square>         list destinations of the piece on <square>
  history                show the last moves
  captured               show captured pieces
  fen                    print the position as FEN
  help                   show this text
  quit                   leave the game";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Play(Move),
    Moves(Coordinate),
    History,
    Captured,
    Fen,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, MoveParseError> {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (Some("quit" | "exit"), None) => Ok(Command::Quit),
        (Some("help"), None) => Ok(Command::Help),
        (Some("fen"), None) => Ok(Command::Fen),
        (Some("captured"), None) => Ok(Command::Captured),
        (Some("history"), None) => Ok(Command::History),
        (Some("moves"), Some(square)) => Ok(Command::Moves(Coordinate::from_algebraic(square)?)),
        _ => Ok(Command::Play(Move::from_algebraic(line)?)),
    }
}

/// One game at the terminal.
pub struct Session<R, W> {
    input: R,
    output: W,
    game: Game,
    players: [Player; 2],
    recent: CircularBuffer<RECENT_MOVES, String>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Asks for both names and assigns colours with `rng`.
    pub fn start<G: Rng>(mut input: R, mut output: W, game: Game, rng: &mut G) -> io::Result<Self> {
        let first = ask_name(&mut input, &mut output, "Player 1")?;
        let second = ask_name(&mut input, &mut output, "Player 2")?;
        let players = assign_colors(first, second, rng);
        writeln!(
            output,
            "{} plays White, {} plays Black. Type 'help' for commands.",
            players[0].name, players[1].name
        )?;
        Ok(Self {
            input,
            output,
            game,
            players,
            recent: CircularBuffer::new(),
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.players[0],
            Color::Black => &self.players[1],
        }
    }

    /// Runs until the game ends, a player quits or input is exhausted.
    pub fn run(&mut self) -> io::Result<GameState> {
        write!(self.output, "{}", self.game.board().render_to_string())?;
        loop {
            if self.announce_result()? {
                return Ok(self.game.state());
            }

            let side = self.game.current_player();
            let name = self.player(side).name.clone();
            write!(self.output, "{name} ({side}) to move: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(self.game.state());
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match parse_command(line) {
                Ok(Command::Quit) => return Ok(self.game.state()),
                Ok(command) => self.execute(command)?,
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Play(mv) => self.play(mv)?,
            Command::Moves(from) => {
                let destinations: Vec<String> = self
                    .game
                    .legal_destinations(from)
                    .iter()
                    .map(Coordinate::as_algebraic)
                    .collect();
                if destinations.is_empty() {
                    writeln!(self.output, "No legal moves from {from}")?;
                } else {
                    writeln!(self.output, "{from}: {}", destinations.join(" "))?;
                }
            }
            Command::History => {
                for entry in self.recent.iter() {
                    writeln!(self.output, "{entry}")?;
                }
            }
            Command::Captured => {
                for color in [Color::White, Color::Black] {
                    let pieces: String = self.game.captured(color).iter().map(|p| p.to_char()).collect();
                    writeln!(self.output, "{color} captured: {pieces}")?;
                }
            }
            Command::Fen => writeln!(self.output, "{}", export_position(&self.game))?,
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn play(&mut self, mv: Move) -> io::Result<()> {
        let side = self.game.current_player();
        let status = self.game.play(mv);
        debug!(%mv, ?status, "move requested");

        match status {
            MoveStatus::InvalidMove => return writeln!(self.output, "Invalid move: {mv}"),
            MoveStatus::PutsKingInCheck => return writeln!(self.output, "{mv} would leave your king in check"),
            _ => {}
        }

        let ply = self.game.history_len() - 1;
        self.recent.push_back(format!("{ply}. {side}: {mv}"));
        write!(self.output, "{}", self.game.board().render_to_string())?;
        if status == MoveStatus::Check {
            writeln!(self.output, "Check!")?;
        }
        Ok(())
    }

    /// Prints the outcome once the game is over.
    fn announce_result(&mut self) -> io::Result<bool> {
        match self.game.state() {
            GameState::AwaitingMove(_) => Ok(false),
            GameState::Checkmate { winner } => {
                let name = self.player(winner).name.clone();
                writeln!(self.output, "Checkmate! {name} ({winner}) wins.")?;
                Ok(true)
            }
            GameState::Draw(reason) => {
                writeln!(self.output, "Draw by {reason}.")?;
                Ok(true)
            }
        }
    }
}

fn ask_name<R: BufRead, W: Write>(input: &mut R, output: &mut W, default: &str) -> io::Result<String> {
    write!(output, "{default}, enter your name: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let name = line.trim();
    Ok(if name.is_empty() { default.to_string() } else { name.to_string() })
}
