// Simple command-line application to play chess

use chessrules::{board::PrettyStyle, Board, Color, Game, GameError, MoveError, Scenario};
use std::io::{self, BufRead, Write};

fn prompt(stdin: &mut impl BufRead, text: &str) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut s = String::new();
    if stdin.read_line(&mut s)? == 0 {
        return Ok(None);
    }
    Ok(Some(s.trim().to_lowercase()))
}

fn explain(e: &MoveError) -> String {
    match e {
        MoveError::Parse(_) => "Invalid input format. Please use notation like \"e2 e4\".".into(),
        MoveError::NoPiece(sq) => format!("No piece found at {}.", sq),
        MoveError::WrongTurn { .. } => "It's the other player's turn.".into(),
        MoveError::InvalidMovement { .. } | MoveError::Rejected => "Invalid move!".into(),
        MoveError::LeavesKingInCheck => {
            "Illegal move: this would put your king in check.".into()
        }
    }
}

fn play(stdin: &mut impl BufRead, board: Board) -> io::Result<()> {
    let mut game = Game::new(board);

    loop {
        if let Some(outcome) = game.outcome() {
            println!("{}", game.board().pretty(PrettyStyle::Utf8));
            println!("Game finished: {}", outcome);
            return Ok(());
        }

        println!("{}", game.board().pretty(PrettyStyle::Utf8));
        println!("Material advantage: {}", game.material_balance());
        let side = match game.side() {
            Color::White => "White",
            Color::Black => "Black",
        };
        println!();
        println!("{}'s turn.", side);
        let s = match prompt(stdin, "Enter your move (e.g., e2 e4): ")? {
            Some(s) => s,
            None => return Ok(()),
        };
        if s == "exit" {
            return Ok(());
        }

        match game.make_move(&s) {
            Ok(report) => {
                if report.gives_check {
                    println!("The {} king is in check!", game.side());
                }
            }
            Err(GameError::Move(e)) => println!("{}", explain(&e)),
            Err(GameError::Finished(_)) => {}
        }
        println!();
    }
}

fn choose_challenge(stdin: &mut impl BufRead) -> io::Result<Option<Board>> {
    loop {
        println!();
        println!("=== CHALLENGES ===");
        for (i, scenario) in Scenario::iter().enumerate() {
            println!(" {}. {}", i + 1, scenario);
        }
        println!(" 0. Return to main menu");
        let s = match prompt(stdin, "Select a challenge: ")? {
            Some(s) => s,
            None => return Ok(None),
        };
        if s == "0" {
            return Ok(None);
        }
        let chosen = s
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|n| Scenario::iter().nth(n));
        match chosen {
            Some(scenario) => return Ok(Some(scenario.board())),
            None => println!("Invalid option! Please try again."),
        }
    }
}

fn show_rules() {
    println!();
    println!("=== GAME RULES ===");
    println!("1. White moves first.");
    println!("2. To make a move, type it in the format \"e2 e4\".");
    println!("3. There is no castling, en passant or pawn promotion.");
    println!("4. The game ends with checkmate or stalemate.");
    println!("5. Type \"exit\" during a game to quit.");
}

fn main() -> io::Result<()> {
    env_logger::init();
    let mut stdin = io::stdin().lock();

    loop {
        println!();
        println!("=== MAIN MENU ===");
        println!(" 1. Start new game");
        println!(" 2. Challenges");
        println!(" 3. Rules");
        println!(" 4. Exit");
        let s = match prompt(&mut stdin, "Select an option: ")? {
            Some(s) => s,
            None => return Ok(()),
        };
        match s.as_str() {
            "1" => play(&mut stdin, Board::initial())?,
            "2" => {
                if let Some(board) = choose_challenge(&mut stdin)? {
                    play(&mut stdin, board)?;
                }
            }
            "3" => show_rules(),
            "4" => {
                println!("See you next time!");
                return Ok(());
            }
            _ => println!("Invalid option! Please try again."),
        }
    }
}
