mod ui;

use clap::Parser;
use othello_core::piece::Piece;
use othello_core::settings::Settings;

#[derive(Parser, Debug)]
struct Cli {
    /// Board edge length (8 or 10).
    #[arg(long, default_value = "8")]
    size: usize,

    /// Which color opens the game.
    #[arg(long, default_value = "black")]
    first: Piece,

    /// Start with legal-move highlighting disabled.
    #[arg(long)]
    no_highlight: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();
    // Unsupported sizes fall back to the default via settings normalization.
    let settings = Settings {
        first_player: args.first,
        highlight_legal_moves: !args.no_highlight,
        board_size: args.size,
    };

    ui::ui_loop(settings);
}
