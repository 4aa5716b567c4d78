use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use console::{Key, Term};
use indicatif::{ProgressBar, ProgressStyle};
use slide_maze::{solve, Direction, Grid, MoverView};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Shortest routes through mazes where every move slides until it is stopped.
#[derive(Debug, Parser)]
#[command(name = "slide-maze", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the fewest slides from S to F and print them
    Solve {
        /// Map file: `S` start, `F` finish, `0` blocked, anything else open
        #[arg(default_value = "grid.txt")]
        map: PathBuf,

        /// Print the search time after the result
        #[arg(long)]
        timing: bool,

        /// Hide the progress spinner
        #[arg(short, long)]
        quiet: bool,
    },

    /// Slide around the map with the arrow keys
    Play {
        #[arg(default_value = "grid.txt")]
        map: PathBuf,
    },
}

enum Action {
    Exit,
    Slide(Direction),
    Undo,
    Reset,
}

impl TryFrom<Key> for Action {
    type Error = ();

    fn try_from(key: Key) -> Result<Self, Self::Error> {
        Ok(match key {
            Key::ArrowLeft | Key::Char('a') => Self::Slide(Direction::Left),
            Key::ArrowRight | Key::Char('d') => Self::Slide(Direction::Right),
            Key::ArrowUp | Key::Char('w') => Self::Slide(Direction::Up),
            Key::ArrowDown | Key::Char('s') => Self::Slide(Direction::Down),
            Key::Escape | Key::Char('q') => Self::Exit,
            Key::Char('z') => Self::Undo,
            Key::Char('r') => Self::Reset,
            _ => return Err(()),
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Solve { map, timing, quiet } => run_solve(&map, timing, quiet),
        Command::Play { map } => run_play(&map),
    }
}

fn read_map(path: &Path) -> Result<Grid> {
    let map_data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read the map from {}", path.display()))?;
    map_data.parse::<Grid>().context("Failed to parse the map")
}

fn run_solve(path: &Path, timing: bool, quiet: bool) -> Result<()> {
    let grid = read_map(path)?;

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::with_template(
        "{spinner} {pos} positions expanded [{elapsed}]",
    )?);

    let started = Instant::now();
    let route = solve::solve(&grid, || spinner.inc(1))?;
    let elapsed = started.elapsed();
    spinner.finish_and_clear();
    info!(
        map = %path.display(),
        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        found = route.is_some(),
        "search finished"
    );

    match route {
        Some(route) => print!("{route}"),
        None => println!("No path found."),
    }
    if timing {
        println!("\nrun-time: {} ms", elapsed.as_millis());
    }
    Ok(())
}

fn run_play(path: &Path) -> Result<()> {
    let grid = read_map(path)?;
    let mut mover = grid.start();
    let mut history = Vec::new();

    let term = Term::stderr();
    ensure!(term.is_term(), "play needs an interactive terminal");
    loop {
        eprintln!("{}", MoverView::new(&grid, mover));
        if mover == grid.finish() {
            eprintln!("Completed! ({} moves)", history.len());
            break;
        }

        let action = loop {
            if let Ok(action) = Action::try_from(term.read_key()?) {
                break action;
            }
        };

        match action {
            Action::Exit => break,
            Action::Slide(dir) => match grid.slide(mover, dir).destination() {
                Some(to) => {
                    history.push(mover);
                    mover = to;
                }
                None => eprintln!("Cannot slide {dir}"),
            },
            Action::Undo => {
                if let Some(last) = history.pop() {
                    mover = last;
                }
            }
            Action::Reset => {
                history.push(mover);
                mover = grid.start();
            }
        }
    }

    Ok(())
}
