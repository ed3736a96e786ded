use std::io::prelude::*;
use std::io::Stdout;

use anyhow::Result;
use chess_timeline::engine::SearchLimits;
use chess_timeline::pgn::numbered_moves;
use chess_timeline::session::{Played, Session};
use chess_timeline::view::TextBoard;
use clap::Parser;
use env_logger::Env;
use log::info;

mod cli;

use cli::Cli;

type TextSession = Session<TextBoard<Stdout>>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut session = Session::new(cli.session_config()?, TextBoard::new(std::io::stdout()))?;
    println!("{}", session.status());
    run_replies(&mut session, &cli);

    for line in std::io::stdin().lines() {
        let line = line?;
        let tokens = line.split_ascii_whitespace().collect::<Vec<_>>();

        let Some(&command) = tokens.first() else {
            continue;
        };

        match command {
            "move" | "m" => match tokens.get(1) {
                Some(mv) => play(&mut session, &cli, mv),
                None => println!("usage: move <san|uci>"),
            },
            "undo" => {
                report(session.undo().map(|_| ()));
                run_replies(&mut session, &cli);
            }
            "goto" => match tokens.get(1).and_then(|n| n.parse::<usize>().ok()) {
                Some(n) => report(session.go_to_ply(n).map(|_| ())),
                None => println!("usage: goto <move number, from 0>"),
            },
            "back" => report(session.step_back().map(|_| ())),
            "forward" => report(session.step_forward().map(|_| ())),
            "live" => {
                session.return_to_live();
            }
            "new" => {
                session.new_game();
                run_replies(&mut session, &cli);
            }
            "position" => match get_fen(&tokens) {
                Some(fen) => {
                    report(session.load_fen(&fen));
                    run_replies(&mut session, &cli);
                }
                None => {
                    session.new_game();
                    run_replies(&mut session, &cli);
                }
            },
            "flip" => {
                session.flip();
            }
            "moves" => print_moves(&session),
            "status" => println!("{}", session.status()),
            "fen" => println!("{}", session.fen()),
            "pgn" => print!("{}", session.export_pgn()),
            "analyze" => {
                let depth = tokens
                    .get(1)
                    .and_then(|d| d.parse().ok())
                    .unwrap_or(cli.analysis_depth);
                match session.analyze(SearchLimits::Depth(depth)) {
                    Some(analysis) => println!("Best move: {}", analysis.best_move),
                    None => println!("No legal moves."),
                }
            }
            "board" => {
                session.return_to_live();
            }
            "quit" => {
                break;
            }
            _ => play(&mut session, &cli, command),
        }
        flush_stdout()?;
    }

    info!("final position {}", session.fen());
    Ok(())
}

fn play(session: &mut TextSession, cli: &Cli, mv: &str) {
    match session.play(mv) {
        Ok(Played::Moved(_)) => {
            println!("{}", session.status());
            run_replies(session, cli);
        }
        Ok(Played::Queued) => println!("premove {mv} queued"),
        Err(err) => println!("{err}"),
    }
}

fn run_replies(session: &mut TextSession, cli: &Cli) {
    while session.awaiting_reply() {
        std::thread::sleep(cli.reply_delay());
        match session.play_reply() {
            Ok(reply) => {
                println!("Reply: {}", reply.reply);
                if let Some(premove) = reply.premove {
                    println!("Premove: {premove}");
                }
                println!("{}", session.status());
            }
            Err(err) => {
                println!("{err}");
                break;
            }
        }
    }
}

fn print_moves(session: &TextSession) {
    let tokens = numbered_moves(session.timeline().initial(), session.moves());
    println!("{}", tokens.join(" "));
}

fn report<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(err) = result {
        println!("{err}");
    }
}

fn get_fen(tokens: &[&str]) -> Option<String> {
    let fen_index = tokens.iter().position(|&t| t == "fen")? + 1;
    let fen = tokens.get(fen_index..)?.iter().take(6).copied().collect::<Vec<_>>();
    (!fen.is_empty()).then(|| fen.join(" "))
}

fn flush_stdout() -> std::io::Result<()> {
    std::io::stdout().flush()
}
