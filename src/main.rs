use chocosweeper::{
    Difficulty, Game, GameConfig, GameError, GameStatus, Leaderboard, Position,
    DEFAULT_BEST_SCORES,
};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    Beginner,
    Intermediate,
    Expert,
    Custom,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Beginner => Difficulty::Beginner,
            Level::Intermediate => Difficulty::Intermediate,
            Level::Expert => Difficulty::Expert,
            Level::Custom => Difficulty::Custom,
        }
    }
}

/// Play minesweeper in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(short, long, value_enum, default_value_t = Level::Beginner)]
    difficulty: Level,
    /// Board rows (5-50); implies a custom game
    #[arg(long)]
    rows: Option<u32>,
    /// Board columns (5-50); implies a custom game
    #[arg(long)]
    columns: Option<u32>,
    /// Number of mines; implies a custom game
    #[arg(long)]
    mines: Option<u32>,
    /// Seed for mine placement
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> GameConfig {
        let preset = GameConfig::from_difficulty(self.difficulty.into());
        if self.rows.is_none() && self.columns.is_none() && self.mines.is_none() {
            return preset;
        }
        GameConfig::custom(
            self.rows.unwrap_or(preset.rows()),
            self.columns.unwrap_or(preset.columns()),
            self.mines.unwrap_or(preset.mine_count()),
        )
    }
}

enum Command {
    Reveal(Position),
    Flag(Position),
    NewGame,
    Quit,
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let args = Args::parse();

    match run_game(&args) {
        Ok(_) => println!("Thanks for playing!"),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn run_game(args: &Args) -> Result<(), GameError> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::with_rng(args.config(), rng)?;
    let mut leaderboard = Leaderboard::new();

    println!("{}", game.config());
    loop {
        print_board(&game);

        let Some(command) = get_user_input() else {
            continue;
        };
        match command {
            Command::Reveal(pos) => {
                game.reveal(pos)?;
            }
            Command::Flag(pos) => {
                game.toggle_flag(pos)?;
            }
            Command::NewGame => {
                game.new_game()?;
                continue;
            }
            Command::Quit => return Ok(()),
        }

        match game.status() {
            GameStatus::Won => {
                print_board(&game);
                println!("Congratulations! You won in {}s.", game.elapsed_seconds());
                record_score(&game, &mut leaderboard);
                game.new_game()?;
            }
            GameStatus::Lost => {
                print_board(&game);
                println!("Game Over!");
                game.new_game()?;
            }
            GameStatus::NotStarted | GameStatus::InProgress => {}
        }
    }
}

fn record_score(game: &Game, leaderboard: &mut Leaderboard) {
    if !leaderboard.is_high_score(game.elapsed_seconds(), game.config(), DEFAULT_BEST_SCORES) {
        return;
    }

    print!("New best time! Your name: ");
    if io::stdout().flush().is_err() {
        return;
    }
    let mut name = String::new();
    if io::stdin().read_line(&mut name).is_err() {
        return;
    }
    let name = match name.trim() {
        "" => "Player",
        name => name,
    };

    if let Some(score) = game.score(name) {
        leaderboard.add(score);
    }
    println!("Best times for {}:", game.config());
    for (rank, score) in leaderboard
        .best_scores(game.config(), DEFAULT_BEST_SCORES)
        .iter()
        .enumerate()
    {
        println!("{:>2}. {:<16} {}s", rank + 1, score.player_name, score.elapsed_seconds);
    }
}

fn print_board(game: &Game) {
    let (rows, columns) = game.dimensions();

    println!(
        "Mines left: {}  Time: {}s",
        game.mines_remaining(),
        game.elapsed_seconds()
    );

    // Print column numbers
    print!("   ");
    for col in 0..columns {
        print!("{:>2}", col % 100);
    }
    println!();

    for row in 0..rows {
        print!("{:>2} ", row);
        for col in 0..columns {
            let symbol = match game.cell(Position::new(row as i32, col as i32)) {
                Some(cell) if cell.is_flagged() => "⚑".to_string(),
                Some(cell) if !cell.is_revealed() => "□".to_string(),
                Some(cell) if cell.has_mine() => "*".to_string(),
                Some(cell) if cell.adjacent_mines() == 0 => " ".to_string(),
                Some(cell) => cell.adjacent_mines().to_string(),
                None => "?".to_string(),
            };
            print!("{:>2}", symbol);
        }
        println!();
    }
}

fn get_user_input() -> Option<Command> {
    print!("Enter command (r row col | f row col | n | q): ");
    io::stdout().flush().ok()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input).ok()? == 0 {
        return Some(Command::Quit);
    }

    let mut parts = input.split_whitespace();
    let action = parts.next()?.chars().next()?;

    let mut position = || -> Option<Position> {
        let row = parts.next()?.parse().ok()?;
        let col = parts.next()?.parse().ok()?;
        Some(Position::new(row, col))
    };

    match action {
        'r' => position().map(Command::Reveal),
        'f' => position().map(Command::Flag),
        'n' => Some(Command::NewGame),
        'q' => Some(Command::Quit),
        _ => {
            println!("Invalid command. Use 'r' to reveal, 'f' to flag, 'n' for a new game, 'q' to quit");
            None
        }
    }
}
