use std::io::{self, BufRead, Write};

use chess_core::{Square, Verdict};
use chess_engine::{Difficulty, Game, Mode, TurnReport};
use log::warn;

const HELP: &str = "commands: <from><to> (e.g. e2e4), board, status, reset, difficulty <easy|medium|hard>, \
mode <pvp|pve|online[:color]>, remote <from><to|reset>, quit";

fn parse_move(input: &str) -> Option<(Square, Square)> {
    let compact: String = input.split_whitespace().collect();
    if compact.len() != 4 || !compact.is_ascii() {
        return None;
    }
    let from = Square::from_algebraic(&compact[..2]).ok()?;
    let to = Square::from_algebraic(&compact[2..]).ok()?;
    Some((from, to))
}

fn announce(report: &TurnReport) {
    match report.verdict {
        Verdict::Playing => println!("{}", report.mv),
        Verdict::Check => println!("{} check", report.mv),
        Verdict::Checkmate { winner } => println!("{} checkmate, {winner:?} wins", report.mv),
    }
}

/// Prints whatever the session queued for the peer, one relay line each.
fn relay(game: &mut Game) {
    for message in game.take_peer_messages() {
        println!("send {message}");
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let mut game = Game::default();
    println!("{}\n{HELP}", game.board());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (None, _) => {}
            (Some("quit"), _) => break,
            (Some("board"), _) => println!("{}", game.board()),
            (Some("status"), _) => println!(
                "mode {}, difficulty {}, {:?} to move",
                game.mode(),
                game.difficulty(),
                game.board().side_to_move()
            ),
            (Some("reset"), _) => {
                game.reset();
                relay(&mut game);
                println!("{}", game.board());
            }
            (Some("remote"), Some("reset")) => {
                game.apply_remote_reset();
                println!("{}", game.board());
            }
            (Some("remote"), Some(notation)) => match parse_move(notation) {
                Some((from, to)) => match game.apply_remote_move(from, to) {
                    Ok(report) => {
                        announce(&report);
                        println!("{}", game.board());
                    }
                    Err(err) => println!("remote move ignored: {err}"),
                },
                None => println!("{HELP}"),
            },
            (Some("difficulty"), Some(level)) => match level.parse::<Difficulty>() {
                Ok(difficulty) => game.set_difficulty(difficulty),
                Err(err) => println!("{err}"),
            },
            (Some("mode"), Some(mode)) => match mode.parse::<Mode>() {
                Ok(mode) => game.set_mode(mode),
                Err(err) => println!("{err}"),
            },
            _ => match parse_move(&line) {
                Some((from, to)) => match game.attempt_move(from, to) {
                    Ok(report) => {
                        announce(&report);
                        relay(&mut game);
                        if let Some(reply) = game.play_ai_turn() {
                            announce(&reply);
                        }
                        println!("{}", game.board());
                    }
                    Err(_) => println!("move not allowed"),
                },
                None => {
                    warn!("unrecognised input {line:?}");
                    println!("{HELP}");
                }
            },
        }
        stdout.flush()?;
    }
    Ok(())
}
