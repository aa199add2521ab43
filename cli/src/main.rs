use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use logisweep_core::*;
use tracing_subscriber::EnvFilter;
use web_time::{Duration, Instant};

mod view;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    board: BoardArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct BoardArgs {
    /// TOML file with the board configuration, the flags below take precedence
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, allow_negative_numbers = true)]
    width: Option<Coord>,

    #[arg(long, global = true, allow_negative_numbers = true)]
    height: Option<Coord>,

    #[arg(long, global = true)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Layouts to try while looking for one solvable without guessing
    #[arg(long, global = true)]
    attempts: Option<u32>,
}

impl BoardArgs {
    fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(mines) = self.mines {
            config.mines = mines;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(attempts) = self.attempts {
            config.attempts = attempts;
        }

        config.validate().context("invalid board configuration")?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place mines around a first click and print the layout
    Generate {
        /// First click as X,Y
        #[arg(long, value_parser = parse_coords, default_value = "0,0")]
        at: Coord2,

        /// Dump the whole game as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Generate many boards and report how many are solvable without guessing
    Stats {
        #[arg(short = 'n', long, default_value_t = 100)]
        count: u32,

        /// First click as X,Y, defaults to the board center
        #[arg(long, value_parser = parse_coords)]
        at: Option<Coord2>,
    },
    /// Play from stdin: `p X Y` reveals, `s X Y` marks, `r` restarts, `q` quits
    Play,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Move {
    Primary(Coord2),
    Secondary(Coord2),
    Reset,
    Quit,
}

fn parse_coords(s: &str) -> Result<Coord2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
    let x = x.trim().parse().map_err(|err| format!("bad x {x:?}: {err}"))?;
    let y = y.trim().parse().map_err(|err| format!("bad y {y:?}: {err}"))?;
    Ok((x, y))
}

fn parse_move(line: &str) -> Result<Move> {
    let mut words = line.split_whitespace();
    let Some(action) = words.next() else {
        bail!("empty command");
    };

    let mut coords = || -> Result<Coord2> {
        let x = words.next().context("missing x")?.parse().context("bad x")?;
        let y = words.next().context("missing y")?.parse().context("bad y")?;
        Ok((x, y))
    };

    Ok(match action {
        "p" | "primary" => Move::Primary(coords()?),
        "s" | "secondary" => Move::Secondary(coords()?),
        "r" | "reset" => Move::Reset,
        "q" | "quit" => Move::Quit,
        other => bail!("unknown command {other:?}"),
    })
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(verbose.log_level_filter().as_str().to_ascii_lowercase())
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn generate(config: GameConfig, at: Coord2, json: bool) -> Result<()> {
    let mut engine = GameEngine::new(config);
    engine.primary_click(at);

    if json {
        println!("{}", serde_json::to_string_pretty(&engine)?);
        return Ok(());
    }

    print!("{}", view::layout_view(engine.board()));
    println!(
        "seed {}, {}",
        engine.seed(),
        if engine.unsolvable() {
            "not solvable without guessing"
        } else {
            "solvable without guessing"
        }
    );
    Ok(())
}

fn stats(config: GameConfig, count: u32, at: Option<Coord2>) -> Result<()> {
    let at = at.unwrap_or((config.width / 2, config.height / 2));
    let first_seed = config.seed.unwrap_or_else(rand_seed);

    let mut solvable = 0u32;
    let mut attempts = 0u64;
    let mut elapsed = Duration::ZERO;

    for i in 0..count {
        let seed = first_seed.wrapping_add(u64::from(i));
        let mut engine = GameEngine::new(GameConfig {
            seed: Some(seed),
            ..config
        });

        let started = Instant::now();
        let generation = engine
            .generate_mines(at)
            .with_context(|| format!("generating board with seed {seed}"))?;
        elapsed += started.elapsed();

        log::debug!("seed {}: {:?}", seed, generation);
        attempts += u64::from(generation.attempts);
        if generation.solvable {
            solvable += 1;
        }
    }

    println!(
        "{}x{} with {} mines, seeds {}..{}",
        config.width,
        config.height,
        config.mines,
        first_seed,
        first_seed.wrapping_add(u64::from(count))
    );
    println!("solvable:   {solvable}");
    println!("unsolvable: {}", count - solvable);
    if count > 0 {
        println!("mean attempts: {:.2}", attempts as f64 / f64::from(count));
        println!("mean time:     {:?}", elapsed / count);
    }
    Ok(())
}

fn rand_seed() -> u64 {
    let mut config = GameConfig::default();
    config.randomize_seed();
    config.seed.unwrap_or_default()
}

fn play(config: GameConfig) -> Result<()> {
    let mut engine = GameEngine::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    write!(stdout, "{}", view::player_view(&engine))?;
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_move(&line) {
            Ok(Move::Quit) => break,
            Ok(action) => {
                let outcome = apply_move(&mut engine, config, action);
                log::trace!("{:?} -> {:?}", action, outcome);
            }
            Err(err) => {
                writeln!(stdout, "{err:#}")?;
                continue;
            }
        }

        write!(stdout, "{}", view::player_view(&engine))?;
        writeln!(stdout, "{}", view::status_line(&engine))?;
    }
    Ok(())
}

fn apply_move(engine: &mut GameEngine, config: GameConfig, action: Move) -> ClickOutcome {
    match action {
        Move::Primary(coords) => engine.primary_click(coords),
        Move::Secondary(coords) => engine.secondary_click(coords),
        Move::Reset => {
            engine.reset(config);
            ClickOutcome::Changed
        }
        Move::Quit => ClickOutcome::NoChange,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.verbose);

    let config = cli.board.resolve()?;
    log::debug!("config: {:?}", config);

    match cli.command {
        Command::Generate { at, json } => generate(config, at, json),
        Command::Stats { count, at } => stats(config, count, at),
        Command::Play => play(config),
    }
}
