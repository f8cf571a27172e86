//! Ultimate Games - Unified CLI
//!
//! Create, inspect and play stored ultimate tic-tac-toe games.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command, ModeArg};
use std::io::{BufRead, Write};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;
use ultimate_games::{
    AppConfig, Difficulty, FileGameStore, GameMode, GameSession, GameStore, HUMAN, render_board,
};
use ultimate_tictactoe::{Player, Position};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(dir) = cli.store_dir {
        config = config.with_store_dir(dir);
    }
    let mut store = FileGameStore::open(config.store_dir())?;

    match cli.command {
        Command::New { mode, difficulty } => {
            let mode = match mode {
                ModeArg::Ai => GameMode::Ai {
                    difficulty: difficulty.unwrap_or(*config.difficulty()),
                },
                ModeArg::Local => GameMode::Local,
            };
            run_new(&mut store, mode)
        }
        Command::Show { id } => run_show(&mut store, &config, &id),
        Command::Move {
            id,
            board,
            cell,
            player,
        } => run_move(&mut store, &config, &id, board, cell, player.into()),
        Command::AiMove { id } => run_ai_move(&mut store, &config, &id),
        Command::Reset { id } => run_reset(&mut store, &config, &id),
        Command::Delete { id } => run_delete(&mut store, &id),
        Command::Play { difficulty } => {
            let difficulty = difficulty.unwrap_or(*config.difficulty());
            run_play(&mut store, &config, difficulty)
        }
    }
}

/// Logs go to stderr so the board on stdout stays clean.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

#[instrument(skip(store, config))]
fn open_session(store: &mut FileGameStore, config: &AppConfig, id: &str) -> Result<GameSession> {
    let stored = store
        .load(id)?
        .with_context(|| format!("Game not found: {}", id))?;
    Ok(GameSession::from_stored(stored, &config.agent_settings()))
}

fn print_session(session: &GameSession, message: &str) {
    println!("Game {} [{}]", session.id(), session.mode());
    println!("{}", render_board(session.board()));
    println!("{}", message);
}

#[instrument(skip(store))]
fn run_new(store: &mut FileGameStore, mode: GameMode) -> Result<()> {
    let stored = store.create(mode)?;
    info!(game_id = %stored.id(), "New game stored");
    println!("{}", stored.id());
    let message = match mode {
        GameMode::Ai { .. } => "New game created. You are X. Make your move.",
        GameMode::Local => "New game created. X moves first.",
    };
    println!("{}", message);
    Ok(())
}

#[instrument(skip(store, config))]
fn run_show(store: &mut FileGameStore, config: &AppConfig, id: &str) -> Result<()> {
    let session = open_session(store, config, id)?;
    print_session(&session, &session.status_message());
    Ok(())
}

#[instrument(skip(store, config))]
fn run_move(
    store: &mut FileGameStore,
    config: &AppConfig,
    id: &str,
    board: usize,
    cell: usize,
    player: Player,
) -> Result<()> {
    let mut session = open_session(store, config, id)?;
    let message = session.play(board, cell, player)?;
    store.save(&session.to_stored())?;
    print_session(&session, &message);
    Ok(())
}

#[instrument(skip(store, config))]
fn run_ai_move(store: &mut FileGameStore, config: &AppConfig, id: &str) -> Result<()> {
    let mut session = open_session(store, config, id)?;
    let turn = session.agent_move()?;
    if let Some(chosen) = turn.chosen {
        store.save(&session.to_stored())?;
        println!("AI played {}", chosen);
    }
    print_session(&session, &turn.message);
    Ok(())
}

#[instrument(skip(store, config))]
fn run_reset(store: &mut FileGameStore, config: &AppConfig, id: &str) -> Result<()> {
    let mut session = open_session(store, config, id)?;
    session.reset();
    store.save(&session.to_stored())?;
    print_session(&session, &session.status_message());
    Ok(())
}

#[instrument(skip(store))]
fn run_delete(store: &mut FileGameStore, id: &str) -> Result<()> {
    if !store.delete(id)? {
        bail!("Game not found: {}", id);
    }
    println!("Deleted {}", id);
    Ok(())
}

/// Parses `"<board> <cell>"`, each as an index or a position label.
fn parse_move(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let board = Position::from_label_or_number(parts.next()?)?;
    let cell = Position::from_label_or_number(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((board.to_index(), cell.to_index()))
}

#[instrument(skip(store, config))]
fn run_play(store: &mut FileGameStore, config: &AppConfig, difficulty: Difficulty) -> Result<()> {
    let stored = store.create(GameMode::Ai { difficulty })?;
    let mut session = GameSession::from_stored(stored, &config.agent_settings());
    print_session(&session, "New game created. You are X. Make your move.");
    println!("Enter moves as '<board> <cell>' (0-8 or labels like top-left), 'reset' or 'quit'.");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "q" => break,
            "reset" => {
                session.reset();
                store.save(&session.to_stored())?;
                print_session(&session, &session.status_message());
                continue;
            }
            _ => {}
        }

        let Some((board, cell)) = parse_move(line) else {
            println!("Could not read '{}'. Enter '<board> <cell>'.", line);
            continue;
        };

        match session.play(board, cell, HUMAN) {
            Ok(message) => {
                store.save(&session.to_stored())?;
                print_session(&session, &message);
            }
            Err(err) => {
                warn!(error = %err, "Move refused");
                println!("{}", err);
                continue;
            }
        }

        if session.board().is_over() {
            break;
        }

        let turn = session.agent_move()?;
        store.save(&session.to_stored())?;
        if let Some(chosen) = turn.chosen {
            println!("AI played {}", chosen);
        }
        print_session(&session, &turn.message);

        if session.board().is_over() {
            break;
        }
    }

    info!(game_id = %session.id(), outcome = ?session.board().outcome(), "Interactive game ended");
    println!("Game saved as {}", session.id());
    Ok(())
}
