//! # Sliding Puzzle CLI
//!
//! Terminal presentation layer for the sliding-tile puzzle engine: play
//! interactively with animated moves, or run headless shuffle/solve
//! simulations with parseable output.
//!
//! The engine owns the rules; this binary owns the clock. Every move the
//! engine starts is "animated" by sleeping for its reported duration and
//! then reporting completion back, which is what lets shuffles and undo
//! chains play out one tile at a time on screen.

use clap::{Parser, ValueEnum};
use slide_puzzle_core::{Coord, MoveStarted, Puzzle, PuzzleConfig, TileId};
use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slide-puzzle")]
#[command(author, version, about = "Play the sliding-tile puzzle in the terminal or run simulations")]
struct Args {
    /// Board size (tiles per side)
    #[arg(short = 'n', long, default_value = "4")]
    size: u32,

    /// Random seed for deterministic shuffles
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of shuffle moves per scramble
    #[arg(long, default_value = "20")]
    shuffle_length: u32,

    /// Player move animation duration in milliseconds
    #[arg(long, default_value = "200")]
    move_ms: u64,

    /// Shuffle and undo animation duration in milliseconds
    #[arg(long, default_value = "100")]
    shuffle_ms: u64,

    /// Number of episodes to run in headless mode
    #[arg(short, long)]
    episodes: Option<u32>,

    /// Policy for headless mode
    #[arg(short, long, value_enum, default_value = "reverse")]
    policy: Policy,

    /// Maximum presses per episode for the random policy
    #[arg(short, long, default_value = "10000")]
    max_steps: u32,

    /// Show the board after each applied move in headless mode
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Unwind the scramble through the undo stack
    Reverse,
    /// Press random tiles adjacent to the empty cell
    Random,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Some(episodes) = args.episodes {
        run_headless(&args, episodes);
    } else {
        run_interactive(&args);
    }
}

fn build_puzzle(args: &Args, seed: u64) -> Puzzle {
    let config = PuzzleConfig {
        size: args.size,
        move_duration: Duration::from_millis(args.move_ms),
        shuffle_move_duration: Duration::from_millis(args.shuffle_ms),
        shuffle_length: args.shuffle_length,
    };
    match Puzzle::with_config(config, seed) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

// -----------------------------------------------------------------------------
// Interactive mode
// -----------------------------------------------------------------------------

/// Run interactive mode where the user plays with the keyboard.
fn run_interactive(args: &Args) {
    enable_raw_mode();

    let mut puzzle = build_puzzle(args, args.seed);
    let mut stdin = io::stdin();
    let mut buffer = [0u8; 3];
    // Batch mode: presses queue up and are released together.
    let mut batch = false;

    redraw(&puzzle, batch);

    loop {
        let bytes_read = stdin.read(&mut buffer).unwrap_or(0);
        if bytes_read == 0 {
            continue;
        }

        match parse_input(&buffer[..bytes_read]) {
            InputAction::Slide(offset) => {
                // The pressed tile is the neighbor of the empty cell that
                // slides against the arrow direction.
                let cell = puzzle.board().empty_coord() + offset;
                if batch {
                    if let Some(tile) = pressable_tile(&puzzle, cell) {
                        puzzle.enqueue_tile(tile);
                    }
                    redraw(&puzzle, batch);
                } else {
                    let started = puzzle.press_cell(cell);
                    animate(&mut puzzle, started, batch);
                }
            }
            InputAction::ToggleBatch => {
                batch = !batch;
                if !batch {
                    // Leaving batch mode releases everything held back.
                    let started = puzzle.process_pending();
                    animate(&mut puzzle, started, batch);
                } else {
                    redraw(&puzzle, batch);
                }
            }
            InputAction::Shuffle => {
                let length = puzzle.config().shuffle_length;
                let started = puzzle.start_shuffle(length);
                animate(&mut puzzle, started, batch);
            }
            InputAction::Reverse => {
                let started = puzzle.reverse_all();
                animate(&mut puzzle, started, batch);
            }
            InputAction::DiscardPending => {
                puzzle.discard_pending();
                redraw(&puzzle, batch);
            }
            InputAction::Restart => {
                puzzle.reset(args.seed);
                redraw(&puzzle, batch);
            }
            InputAction::Quit => {
                disable_raw_mode();
                println!("\nGoodbye!");
                break;
            }
            InputAction::None => {}
        }
    }
}

/// Tile at `cell`, unless the cell is empty or out of bounds.
fn pressable_tile(puzzle: &Puzzle, cell: Coord) -> Option<TileId> {
    let tile = puzzle.board().tile_at(cell)?;
    if tile == puzzle.board().empty_tile() {
        None
    } else {
        Some(tile)
    }
}

/// Play out every chained animation: redraw, sleep for the reported
/// duration, report completion, repeat while the engine keeps starting
/// moves.
fn animate(puzzle: &mut Puzzle, mut started: Option<MoveStarted>, batch: bool) {
    while let Some(mv) = started {
        redraw(puzzle, batch);
        thread::sleep(mv.duration);
        started = puzzle.animation_complete();
    }
    redraw(puzzle, batch);
}

fn redraw(puzzle: &Puzzle, batch: bool) {
    println!("\x1b[2J\x1b[H"); // Clear screen
    println!("=== Sliding Puzzle ===");
    println!("Arrows/WASD slide | Space shuffle | X undo all | U drop queued | B batch | R restart | Q quit\n");
    print!("{puzzle}");

    let mut status = Vec::new();
    if puzzle.shuffle_moves_remaining() > 0 {
        status.push(format!(
            "shuffling ({} left)",
            puzzle.shuffle_moves_remaining()
        ));
    }
    if puzzle.is_reversing() {
        status.push("reversing".to_string());
    }
    if puzzle.pending_count() > 0 {
        status.push(format!("{} queued", puzzle.pending_count()));
    }
    if batch {
        status.push("batch mode".to_string());
    }
    if !status.is_empty() {
        println!("  [{}]", status.join(", "));
    }
    if puzzle.is_solved() && puzzle.history_count() == 0 {
        println!("\n  *** SOLVED ***");
    }
    io::stdout().flush().unwrap();
}

enum InputAction {
    Slide(Coord),
    Shuffle,
    Reverse,
    DiscardPending,
    ToggleBatch,
    Restart,
    Quit,
    None,
}

fn parse_input(bytes: &[u8]) -> InputAction {
    match bytes {
        // Arrow keys (escape sequences). The board renders with y = 0 on
        // top, so "up" presses the tile below the empty cell, and so on.
        [27, 91, 65] => InputAction::Slide(Coord::new(0, 1)), // Up arrow
        [27, 91, 66] => InputAction::Slide(Coord::new(0, -1)), // Down arrow
        [27, 91, 67] => InputAction::Slide(Coord::new(-1, 0)), // Right arrow
        [27, 91, 68] => InputAction::Slide(Coord::new(1, 0)), // Left arrow

        // WASD keys
        [b'w'] | [b'W'] => InputAction::Slide(Coord::new(0, 1)),
        [b's'] | [b'S'] => InputAction::Slide(Coord::new(0, -1)),
        [b'd'] | [b'D'] => InputAction::Slide(Coord::new(-1, 0)),
        [b'a'] | [b'A'] => InputAction::Slide(Coord::new(1, 0)),

        // Control keys
        [b' '] => InputAction::Shuffle,
        [b'x'] | [b'X'] => InputAction::Reverse,
        [b'u'] | [b'U'] => InputAction::DiscardPending,
        [b'b'] | [b'B'] => InputAction::ToggleBatch,
        [b'r'] | [b'R'] => InputAction::Restart,
        [b'q'] | [b'Q'] | [3] | [27] => InputAction::Quit, // q, Q, Ctrl+C, Esc

        _ => InputAction::None,
    }
}

// -----------------------------------------------------------------------------
// Headless mode
// -----------------------------------------------------------------------------

/// Run headless simulation mode: shuffle, then play a policy to the end.
fn run_headless(args: &Args, episodes: u32) {
    let mut solved_count = 0u32;
    let mut total_applied: u64 = 0;
    let mut total_distance: u64 = 0;

    // Separate RNG for the random policy's tile picks.
    let mut action_rng = SimpleRng::new(args.seed.wrapping_add(1000));

    for episode in 0..episodes {
        let episode_seed = args.seed.wrapping_add(episode as u64);
        let mut puzzle = build_puzzle(args, episode_seed);

        puzzle.start_shuffle(args.shuffle_length);
        let mut applied = drive_to_idle(&mut puzzle, args.verbose);

        match args.policy {
            Policy::Reverse => {
                puzzle.reverse_all();
                applied += drive_to_idle(&mut puzzle, args.verbose);
            }
            Policy::Random => {
                let mut steps = 0;
                while !puzzle.is_solved() && steps < args.max_steps {
                    let cell = random_neighbor(&puzzle, &mut action_rng);
                    puzzle.press_cell(cell);
                    applied += drive_to_idle(&mut puzzle, args.verbose);
                    steps += 1;
                }
            }
        }

        let distance = manhattan_distance(&puzzle);
        if puzzle.is_solved() {
            solved_count += 1;
        }
        total_applied += applied as u64;
        total_distance += distance as u64;

        if args.verbose {
            println!(
                "Episode {}: applied={}, solved={}, distance={}",
                episode + 1,
                applied,
                puzzle.is_solved(),
                distance
            );
        }
    }

    // Output results in parseable format
    println!("=== Simulation Results ===");
    println!("episodes={episodes}");
    println!("policy={:?}", args.policy);
    println!("seed={}", args.seed);
    println!("size={}", args.size);
    println!("shuffle_length={}", args.shuffle_length);
    println!("solved={solved_count}");
    println!(
        "avg_applied_moves={:.2}",
        total_applied as f64 / episodes as f64
    );
    println!(
        "avg_final_distance={:.2}",
        total_distance as f64 / episodes as f64
    );
}

/// Drive the engine with a zero-length clock: complete animations until a
/// completion starts nothing new, counting the moves that ran.
fn drive_to_idle(puzzle: &mut Puzzle, verbose: bool) -> u32 {
    let mut completed = 0;
    while puzzle.is_animating() {
        completed += 1;
        puzzle.animation_complete();
        if verbose {
            print!("{puzzle}");
        }
    }
    completed
}

/// A cell adjacent to the empty slot, chosen uniformly among the in-bounds
/// ones.
fn random_neighbor(puzzle: &Puzzle, rng: &mut SimpleRng) -> Coord {
    let offsets = [
        Coord::new(1, 0),
        Coord::new(-1, 0),
        Coord::new(0, 1),
        Coord::new(0, -1),
    ];
    let empty = puzzle.board().empty_coord();
    let candidates: Vec<Coord> = offsets
        .iter()
        .map(|&offset| empty + offset)
        .filter(|&cell| puzzle.board().in_bounds(cell))
        .collect();
    candidates[(rng.next() as usize) % candidates.len()]
}

/// Sum over all tiles of how far each sits from its home cell.
fn manhattan_distance(puzzle: &Puzzle) -> u32 {
    let board = puzzle.board();
    let n = board.size() as i32;
    let mut distance = 0;
    for y in 0..n {
        for x in 0..n {
            let coord = Coord::new(x, y);
            let Some(tile) = board.tile_at(coord) else {
                continue;
            };
            if tile == board.empty_tile() {
                continue;
            }
            let home = board.home_coord(tile);
            distance += (coord.x - home.x).unsigned_abs() + (coord.y - home.y).unsigned_abs();
        }
    }
    distance
}

/// Simple xorshift RNG for policy tile picks.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

// Platform-specific terminal raw mode handling
#[cfg(unix)]
fn enable_raw_mode() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        let fd = io::stdin().as_raw_fd();
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);
        termios.c_lflag &= !(libc::ICANON | libc::ECHO);
        termios.c_cc[libc::VMIN] = 1;
        termios.c_cc[libc::VTIME] = 0;
        libc::tcsetattr(fd, libc::TCSANOW, &termios);
    }
}

#[cfg(unix)]
fn disable_raw_mode() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        let fd = io::stdin().as_raw_fd();
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);
        termios.c_lflag |= libc::ICANON | libc::ECHO;
        libc::tcsetattr(fd, libc::TCSANOW, &termios);
    }
}

#[cfg(not(unix))]
fn enable_raw_mode() {
    // Without raw mode, interactive play needs Enter after each key.
}

#[cfg(not(unix))]
fn disable_raw_mode() {}
