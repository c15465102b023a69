//! Interactive terminal front-end.
//!
//! The loop owns a [`GameController`] and drives it from line input; all
//! rendering happens in a snapshot subscriber, so the board is redrawn
//! exactly once per state transition and the controller stays the sole
//! source of truth.

use colored::Colorize;
use othello_core::controller::GameController;
use othello_core::game::GameState;
use othello_core::piece::Piece;
use othello_core::position::Position;
use othello_core::settings::Settings;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub fn ui_loop(settings: Settings) {
    let mut rl = DefaultEditor::new().unwrap();
    let mut controller = GameController::new(settings);
    controller.subscribe(|state| render(state));

    loop {
        let readline = rl.readline("> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                let mut parts = line.split_whitespace();
                let Some(cmd) = parts.next() else {
                    continue;
                };
                println!();

                match cmd {
                    "new" | "n" => {
                        controller.reset(Default::default());
                    }
                    "undo" | "u" => {
                        if !controller.undo() {
                            println!("Nothing to undo.");
                        }
                    }
                    "highlight" | "h" => {
                        controller.toggle_highlight();
                    }
                    "first" | "f" => {
                        set_first_player(&mut controller, parts.next());
                    }
                    "size" | "s" => {
                        set_board_size(&mut controller, parts.next());
                    }
                    "sizes" => {
                        let sizes: Vec<String> = GameController::supported_board_sizes()
                            .iter()
                            .map(|s| s.to_string())
                            .collect();
                        println!("Supported board sizes: {}", sizes.join(", "));
                    }
                    "history" => {
                        print_history(&controller.state());
                    }
                    "help" | "?" => {
                        print_help();
                    }
                    "quit" | "q" | "exit" => {
                        break;
                    }
                    square => {
                        play_square(&mut controller, square);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("Input error: {err:?}");
                break;
            }
        }
    }
}

fn play_square(controller: &mut GameController, square: &str) {
    let size = controller.state().board.size();
    match Position::parse(square, size) {
        Ok(pos) => {
            if !controller.play(pos.row, pos.col) {
                println!("{} is not a legal move.", pos);
            }
        }
        Err(_) => {
            println!("Unknown command or square: {square} (try \"help\")");
        }
    }
}

fn set_first_player(controller: &mut GameController, arg: Option<&str>) {
    let Some(color) = arg.and_then(|s| s.parse::<Piece>().ok()) else {
        println!("Usage: first <black|white>");
        return;
    };
    if !controller.set_first_player(color) {
        println!("{color} already opens the game.");
    }
}

fn set_board_size(controller: &mut GameController, arg: Option<&str>) {
    let Some(size) = arg.and_then(|s| s.parse::<usize>().ok()) else {
        println!("Usage: size <8|10>");
        return;
    };
    if !controller.set_board_size(size) {
        println!("Board size {size} is unsupported or already in use.");
    }
}

fn render(state: &GameState) {
    let size = state.board.size();

    print!("    ");
    for col in 0..size {
        print!(" {} ", (b'a' + col as u8) as char);
    }
    println!();

    for row in 0..size {
        print!(" {:2} ", row + 1);
        for col in 0..size {
            let pos = Position::new(row, col);
            let highlight = state.settings.highlight_legal_moves
                && state.legal_moves.iter().any(|m| m.position == pos);
            let symbol = match state.board.get(pos) {
                Piece::Black => " X ".bright_green(),
                Piece::White => " O ".bright_yellow(),
                Piece::Empty if highlight => " · ".bright_cyan(),
                Piece::Empty => " . ".bright_black(),
            };
            print!("{symbol}");
        }
        println!();
    }

    println!(
        "    Black: {}  White: {}  Empty: {}",
        state.score.black.to_string().bright_green(),
        state.score.white.to_string().bright_yellow(),
        state.score.empty
    );

    if let Some(entry) = state.history.last() {
        if entry.is_pass {
            println!("    {} has no move and passes.", entry.player);
        }
    }

    if state.is_game_over {
        let result = match state.score.black.cmp(&state.score.white) {
            std::cmp::Ordering::Greater => "Black wins!".bright_green(),
            std::cmp::Ordering::Less => "White wins!".bright_yellow(),
            std::cmp::Ordering::Equal => "Draw".bright_cyan(),
        };
        println!("    *** Game over: {result} ***");
    } else {
        let turn = match state.current_player {
            Piece::Black => "Black's turn (X)".bright_green(),
            Piece::White => "White's turn (O)".bright_yellow(),
            Piece::Empty => unreachable!("the side to move is always a player"),
        };
        println!("    {turn}");
    }
    println!();
}

fn print_history(state: &GameState) {
    if state.history.is_empty() {
        println!("No moves yet.");
        return;
    }
    for (i, entry) in state.history.iter().enumerate() {
        match entry.position {
            Some(pos) => println!(
                "{:3}. {} {} (flips {})",
                i + 1,
                entry.player,
                pos,
                entry.flipped.len()
            ),
            None => println!("{:3}. {} passes", i + 1, entry.player),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <square>        play a move, e.g. c4");
    println!("  new             start a new game");
    println!("  undo            undo the last move (one level)");
    println!("  highlight       toggle legal-move highlighting");
    println!("  first <color>   set which color opens (restarts the game)");
    println!("  size <n>        set the board size (restarts the game)");
    println!("  sizes           list supported board sizes");
    println!("  history         show the move record");
    println!("  quit            exit");
}
