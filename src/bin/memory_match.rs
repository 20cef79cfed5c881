//! Terminal front-end.
//!
//! Home screen, difficulty choice, board, end screen, replay. Cards are
//! picked by their number on the board.

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use memory_match::{
    listener, Difficulty, GameConfig, IgnoreReason, JsonFileScoreStore, Selection, SessionController,
    SessionEvent, SessionEventKind, SessionStatus,
};

#[derive(Parser, Debug)]
#[command(name = "memory-match", about = "Find every pair in as few attempts as possible")]
struct Cli {
    /// Grid size (2, 4 or 6). Asked interactively when omitted.
    #[arg(long)]
    size: Option<u8>,

    /// RNG seed for a reproducible deal.
    #[arg(long)]
    seed: Option<u64>,

    /// Best score file.
    #[arg(long, default_value = "memory-scores.json")]
    scores: PathBuf,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mismatch flip-back delay in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,
}

type Controller = SessionController<JsonFileScoreStore>;

fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn choose_difficulty(input: &mut impl BufRead) -> io::Result<Option<Difficulty>> {
    println!("\nChoose your difficulty");
    for difficulty in Difficulty::ALL {
        println!("  [{}] {difficulty}", difficulty.grid_size());
    }

    loop {
        let Some(answer) = prompt(input, "> ")? else {
            return Ok(None);
        };
        match answer.parse::<u8>().ok().map(Difficulty::from_grid_size) {
            Some(Ok(difficulty)) => return Ok(Some(difficulty)),
            _ => println!("Please type 2, 4 or 6."),
        }
    }
}

fn render_board(controller: &Controller, attempts: u32) {
    let Some(difficulty) = controller.difficulty() else {
        return;
    };
    let width = usize::from(difficulty.grid_size());

    println!("\nAttempts: {attempts}");
    for (row_index, row) in controller.session().deck().rows(width).enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(column, card)| {
                if card.is_matched() {
                    format!("*{:^9}*", card.face())
                } else if card.is_face_up() {
                    format!("[{:^9}]", card.face())
                } else {
                    format!("[{:^9}]", row_index * width + column + 1)
                }
            })
            .collect();
        println!("{}", cells.join(" "));
    }
}

fn play_round(
    controller: &mut Controller,
    attempts: &Cell<u32>,
    input: &mut impl BufRead,
) -> io::Result<bool> {
    let delay = controller.config().flip_back_delay();

    while controller.status() == SessionStatus::Running {
        render_board(controller, attempts.get());
        let Some(answer) = prompt(input, "Card number (q to quit): ")? else {
            return Ok(false);
        };
        if answer.eq_ignore_ascii_case("q") {
            return Ok(false);
        }

        let Ok(number) = answer.parse::<usize>() else {
            println!("Not a card number.");
            continue;
        };

        match controller.select_at(number.wrapping_sub(1)) {
            Selection::Ignored(IgnoreReason::UnknownCard) => println!("No card {number}."),
            Selection::Ignored(IgnoreReason::AlreadyFaceUp | IgnoreReason::AlreadyMatched) => {
                println!("That card is already showing.");
            }
            Selection::Ignored(_) => {}
            Selection::Mismatched { .. } => {
                render_board(controller, attempts.get());
                println!("No match.");
                std::thread::sleep(delay);
                controller.advance(delay);
            }
            Selection::Matched { .. } => println!("Match!"),
            Selection::Revealed | Selection::Won { .. } => {}
        }
    }

    render_board(controller, attempts.get());
    Ok(true)
}

fn render_end(controller: &Controller) {
    println!("\nYou did it in {} attempts!", controller.attempts());
    if let Some(best) = controller.best_score() {
        println!("Your best score is {best}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(delay_ms) = cli.delay_ms {
        config = config.with_flip_back_delay(Duration::from_millis(delay_ms));
    }
    let fixed_difficulty = cli.size.map(Difficulty::from_grid_size).transpose()?;

    let mut controller = SessionController::with_store(config, JsonFileScoreStore::new(&cli.scores));

    let attempts = Rc::new(Cell::new(0));
    let counter = Rc::clone(&attempts);
    controller.subscribe(
        SessionEventKind::AttemptsChanged,
        listener(move |event: &SessionEvent| {
            if let SessionEvent::AttemptsChanged { attempts } = event {
                counter.set(*attempts);
            }
        }),
    );

    let announced = Rc::new(Cell::new(false));
    let flag = Rc::clone(&announced);
    controller.subscribe(
        SessionEventKind::StatusChanged,
        listener(move |event: &SessionEvent| {
            if let SessionEvent::StatusChanged { new: SessionStatus::Ended, .. } = event {
                flag.set(true);
            }
        }),
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("=== MEMORY MATCH ===");
    println!("Find every pair in as few attempts as possible.");

    loop {
        let difficulty = match fixed_difficulty {
            Some(difficulty) => difficulty,
            None => match choose_difficulty(&mut input)? {
                Some(difficulty) => difficulty,
                None => break,
            },
        };

        announced.set(false);
        attempts.set(0);
        controller.start(difficulty)?;
        if !play_round(&mut controller, &attempts, &mut input)? {
            break;
        }
        if announced.get() {
            render_end(&controller);
        }

        match prompt(&mut input, "\nPlay again? [y/N] ")? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => {}
            _ => break,
        }
    }

    Ok(())
}
