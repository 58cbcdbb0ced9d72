use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::arg;
use clap::command;
use clap::ArgMatches;
use clap::Command;

use rand::SeedableRng;
use rand_pcg::Pcg64;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use chesscore::chess_board::{export_position, INITIAL_POSITION};
use chesscore::config::{GameConfig, PromotionPolicy, RepetitionRule};
use chesscore::perft::divide;
use chesscore::play::Session;
use chesscore::{Game, MoveStatus};

fn cli() -> Command {
    command!()
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ))
        .subcommand(
            Command::new("play")
                .about("Play a game at the terminal")
                .arg(arg!(-f --fen <FEN> "Start position").default_value(INITIAL_POSITION))
                .arg(arg!(-s --seed <seed> "Seed for colour assignment").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(-r --"repetition-limit" <n> "Occurrences of a position that draw the game")
                        .default_value("3")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(arg!(--"full-position-repetition" "Compare side to move, castling and en passant too"))
                .arg(arg!(--"allow-underpromotion" "Let moves like e7e8n pick the promotion piece"))
                .arg(arg!(--"no-material-draw" "Do not end the game on insufficient material")),
        )
        .subcommand(
            Command::new("perft")
                .about("Run Perft test")
                .arg(
                    arg!(
                    -f --fen <FEN> "Board position"
                            )
                    .default_value(INITIAL_POSITION),
                )
                .arg(
                    arg!(
                    -x --depth <d> "depth"
                            )
                    .default_value("3")
                    .value_parser(clap::value_parser!(u8)),
                )
                .arg(
                    arg!(
                    -m --moves <moves> "List of moves"
                            )
                    .num_args(1..)
                    .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("fen")
                .about("Print the FEN reached after a list of moves")
                .arg(arg!(-f --fen <FEN> "Start position").default_value(INITIAL_POSITION))
                .arg(arg!([moves] ... "Moves such as e2e4")),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    init_logging(matches.get_flag("debug"));

    let result = match matches.subcommand() {
        Some(("play", arg_matches)) => play(arg_matches),
        Some(("perft", arg_matches)) => perft(arg_matches),
        Some(("fen", arg_matches)) => fen(arg_matches),
        None => play(&ArgMatches::default()),
        _ => unreachable!("Exhausted list of subcommands"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Flags are absent from the default matches used when no subcommand is given.
fn flag_set(arg_matches: &ArgMatches, id: &str) -> bool {
    matches!(arg_matches.try_get_one::<bool>(id), Ok(Some(&true)))
}

fn config_from(arg_matches: &ArgMatches) -> GameConfig {
    let mut config = GameConfig::default();
    if let Ok(Some(limit)) = arg_matches.try_get_one::<usize>("repetition-limit") {
        config = config.with_repetition_limit(*limit);
    }
    if flag_set(arg_matches, "full-position-repetition") {
        config = config.with_repetition_rule(RepetitionRule::FullPosition);
    }
    if flag_set(arg_matches, "allow-underpromotion") {
        config = config.with_promotion(PromotionPolicy::AllowChoice);
    }
    if flag_set(arg_matches, "no-material-draw") {
        config = config.with_insufficient_material_draw(false);
    }
    config
}

fn play(arg_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let fen = match arg_matches.try_get_one::<String>("fen") {
        Ok(Some(fen)) => fen.as_str(),
        _ => INITIAL_POSITION,
    };
    let game = Game::from_fen(fen, config_from(arg_matches))?;
    let mut rng = match arg_matches.try_get_one::<u64>("seed") {
        Ok(Some(seed)) => Pcg64::seed_from_u64(*seed),
        _ => Pcg64::from_entropy(),
    };

    let stdin = io::stdin();
    let mut session = Session::start(stdin.lock(), io::stdout(), game, &mut rng)?;
    let state = session.run()?;
    debug!(?state, fen = %export_position(session.game()), "session finished");
    Ok(())
}

/// Replays `moves` from `fen`, refusing anything the rules reject.
fn replay(fen: &str, moves: &[&String], config: GameConfig) -> Result<Game, Box<dyn std::error::Error>> {
    let mut game = Game::from_fen(fen, config)?;
    for m in moves {
        match game.play_algebraic(m)? {
            MoveStatus::InvalidMove | MoveStatus::PutsKingInCheck => {
                return Err(format!("Invalid move: {}", m).into());
            }
            _ => {}
        }
    }
    Ok(game)
}

#[derive(Tabled)]
struct DivideRow {
    #[tabled(rename = "move")]
    mv: String,
    nodes: u64,
}

fn perft(arg_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let fen = arg_matches
        .get_one::<String>("fen")
        .map_or(INITIAL_POSITION, String::as_str);
    let depth = arg_matches.get_one::<u8>("depth").copied().unwrap_or(3);
    let moves = arg_matches
        .get_many::<String>("moves")
        .unwrap_or_default()
        .filter(|&v| !v.is_empty())
        .collect::<Vec<_>>();
    println!("Perft test for {} moves {:?} with depth {}", fen, moves, depth);

    // underpromotions count as separate nodes
    let config = GameConfig::default().with_promotion(PromotionPolicy::AllowChoice);
    let position = replay(fen, &moves, config)?.position();

    let start_time = Instant::now();
    let divided = divide(&position, depth);
    let elapsed = start_time.elapsed();

    let num_nodes: u64 = divided.iter().map(|(_, nodes)| nodes).sum();
    let rows: Vec<DivideRow> = divided
        .into_iter()
        .map(|(mv, nodes)| DivideRow {
            mv: mv.as_algebraic(),
            nodes,
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::modern()));
    println!("\nNodes searched: {}", num_nodes);
    println!("Time: {:.3}s", elapsed.as_secs_f32());
    Ok(())
}

fn fen(arg_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let fen = arg_matches
        .get_one::<String>("fen")
        .map_or(INITIAL_POSITION, String::as_str);
    let moves = arg_matches.get_many::<String>("moves").unwrap_or_default().collect::<Vec<_>>();
    let game = replay(fen, &moves, GameConfig::default())?;
    println!("{}", export_position(&game));
    Ok(())
}
