use anyhow::Result;
use clap::Parser;
use fortuna::board::{Color, GameStatus, Move, Position};
use fortuna::book::OpeningBook;
use fortuna::openings;
use fortuna::search::Searcher;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against the engine", long_about = None)]
struct Args {
    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Search depth in plies
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// Polyglot opening book (.bin); built-in lines are used when absent
    #[arg(long)]
    book: Option<PathBuf>,

    /// Threads for the root search
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn parse_color(color_str: &str) -> Result<Color> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

enum HumanAction {
    Play(Move),
    Undo,
    Quit,
}

fn get_human_action(pos: &mut Position, played: &[String]) -> Result<HumanAction> {
    let legal = pos.legal_moves();
    loop {
        print!("Enter your move (e.g. e2e4), or a command: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(HumanAction::Quit);
        }
        let input = input.trim();

        match input {
            "quit" | "exit" => return Ok(HumanAction::Quit),
            "undo" => return Ok(HumanAction::Undo),
            "history" => {
                if played.is_empty() {
                    println!("No moves played yet.");
                } else {
                    println!("{}", played.join(" "));
                }
                continue;
            }
            "help" => {
                println!("Moves in UCI form (e2e4, e7e8q).");
                println!("Commands: undo, history, help, quit.");
                continue;
            }
            _ => {}
        }

        match pos.parse_uci_move(input) {
            Ok(mv) if legal.contains(&mv) => return Ok(HumanAction::Play(mv)),
            Ok(_) => println!("Illegal move!"),
            Err(_) => println!("Invalid move format! Use format like 'e2e4'"),
        }
    }
}

/// Book suggestion for the current position, if it is actually legal here.
fn book_move(book: &OpeningBook, pos: &mut Position) -> Option<Move> {
    let uci = book.probe(pos)?.to_string();
    let mv = pos.parse_uci_move(&uci).ok()?;
    pos.legal_moves().contains(&mv).then_some(mv)
}

fn announce_result(status: GameStatus) {
    match status {
        GameStatus::Checkmate { winner } => println!("\nCheckmate! {winner} wins!"),
        GameStatus::Stalemate => println!("\nGame is a stalemate!"),
        GameStatus::FiftyMoveDraw => println!("\nDraw by the fifty-move rule!"),
        GameStatus::InsufficientMaterial => {
            println!("\nDraw by insufficient material!")
        }
        GameStatus::Ongoing => {}
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let human_color = parse_color(&args.color)?;
    let mut pos = match &args.fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::startpos(),
    };

    let book = match &args.book {
        Some(path) => {
            let book = OpeningBook::load_polyglot(path)?;
            println!("Loaded {} book positions from {}", book.len(), path.display());
            book
        }
        None => OpeningBook::from_openings(&openings::builtin_openings()),
    };

    let mut searcher = Searcher::with_threads(args.threads);
    let mut played: Vec<String> = Vec::new();

    loop {
        let status = pos.game_status();
        if status.is_over() {
            println!("\n{pos}");
            announce_result(status);
            break;
        }

        println!("\n{}'s turn", pos.side_to_move);
        println!("{pos}");

        if pos.side_to_move == human_color {
            match get_human_action(&mut pos, &played)? {
                HumanAction::Play(mv) => {
                    pos.make_move(mv, true);
                    played.push(mv.uci());
                }
                HumanAction::Undo => {
                    // Take back the engine's reply and the player's own move.
                    if pos.history_len() < 2 {
                        println!("Nothing to undo.");
                    } else {
                        pos.unmake_move();
                        pos.unmake_move();
                        played.truncate(played.len().saturating_sub(2));
                    }
                }
                HumanAction::Quit => break,
            }
        } else {
            let mv = if let Some(mv) = book_move(&book, &mut pos) {
                println!("Book move.");
                mv
            } else {
                if args.verbose {
                    println!("Thinking...");
                }
                let start = Instant::now();
                let result = searcher.find_best_move(&mut pos, args.depth);
                let Some(mv) = result.best else {
                    // game_status above rules this out, but don't panic on it.
                    println!("No legal moves available!");
                    break;
                };
                if args.verbose {
                    let elapsed = start.elapsed().as_secs_f32();
                    println!(
                        "score: {} nodes: {} elapsed: {elapsed:.2}s",
                        result.score, result.nodes
                    );
                }
                mv
            };
            println!("Computer plays: {mv}");
            pos.make_move(mv, true);
            played.push(mv.uci());
        }
    }

    Ok(())
}
