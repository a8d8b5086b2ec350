use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::domain::reveal::RevealMode;
use crate::domain::seat::SeatKey;

#[derive(Debug, Parser)]
#[command(name = "seigae")]
#[command(about = "Seat assignment with constraints, manual adjustment and staged reveal")]
pub struct Cli {
    /// JSON store file (overrides SEIGAE_STORE_PATH)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// RNG seed for reproducible generation and roulette order (overrides SEIGAE_SEED)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Generation retry budget (overrides SEIGAE_MAX_RETRIES)
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, inspect and delete projects
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Change the seat grid
    #[command(subcommand)]
    Layout(LayoutCommand),
    /// Enable or disable single seats
    #[command(subcommand)]
    Seat(SeatCommand),
    /// Manage the people to seat
    #[command(subcommand)]
    Person(PersonCommand),
    /// Manage seating rules
    #[command(subcommand)]
    Rule(RuleCommand),
    /// Generate a new assignment for a project
    Generate {
        project: Uuid,
    },
    /// Inspect, re-check and adjust assignments
    #[command(subcommand)]
    Assignment(AssignmentCommand),
    /// Run a staged reveal of an assignment
    #[command(subcommand)]
    Reveal(RevealCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    Create { name: String },
    List,
    Show { project: Uuid },
    Rename { project: Uuid, name: String },
    Delete { project: Uuid },
}

#[derive(Debug, Subcommand)]
pub enum LayoutCommand {
    /// Resize the grid; each side is clamped to 1..=20
    Resize { project: Uuid, rows: u32, cols: u32 },
}

#[derive(Debug, Subcommand)]
pub enum SeatCommand {
    /// Flip a seat between enabled and disabled
    Toggle { project: Uuid, seat: String },
}

#[derive(Debug, Subcommand)]
pub enum PersonCommand {
    Add {
        project: Uuid,
        name: String,
    },
    /// Add one person per line of FILE (`-` reads stdin)
    Bulk {
        project: Uuid,
        file: PathBuf,
    },
    /// Flip the absent flag
    Absent {
        project: Uuid,
        person: String,
    },
    /// Flip between male and female
    Gender {
        project: Uuid,
        person: String,
    },
    /// Remove a person and every rule naming them
    Remove {
        project: Uuid,
        person: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum RuleCommand {
    /// Pin a person to a seat
    Fixed {
        project: Uuid,
        person: String,
        seat: String,
    },
    /// Keep two persons out of adjacent seats
    Separate {
        project: Uuid,
        person_a: String,
        person_b: String,
    },
    Remove {
        project: Uuid,
        rule: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AssignmentCommand {
    List {
        project: Uuid,
    },
    Show {
        assignment: Uuid,
    },
    /// Re-check a stored assignment against the project as it is now
    Validate {
        assignment: Uuid,
    },
    /// Apply seat drags and save the result as a new assignment
    Adjust(AdjustArgs),
}

#[derive(Debug, Args)]
pub struct AdjustArgs {
    pub assignment: Uuid,

    /// Drag FROM:TO, e.g. `--drag r1c1:r2c3`; repeatable, applied in order
    #[arg(long = "drag", value_parser = parse_drag, required = true)]
    pub drags: Vec<Drag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drag {
    pub from: SeatKey,
    pub to: SeatKey,
}

fn parse_drag(s: &str) -> Result<Drag, String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got '{s}'"))?;
    if from.is_empty() || to.is_empty() {
        return Err(format!("expected FROM:TO, got '{s}'"));
    }
    Ok(Drag {
        from: SeatKey::from(from),
        to: SeatKey::from(to),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Roulette,
    RevealAll,
    Block,
}

impl From<ModeArg> for RevealMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Roulette => RevealMode::Roulette,
            ModeArg::RevealAll => RevealMode::RevealAll,
            ModeArg::Block => RevealMode::Block,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum RevealCommand {
    Start {
        assignment: Uuid,
        #[arg(long, value_enum, default_value = "roulette")]
        mode: ModeArg,
    },
    /// Reveal the next person
    Step {
        session: Uuid,
    },
    Pause {
        session: Uuid,
    },
    Resume {
        session: Uuid,
    },
    /// Reveal everyone at once
    Finish {
        session: Uuid,
    },
    /// Advance on a timer until the session stops revealing
    Play {
        session: Uuid,
        /// Milliseconds between steps (overrides SEIGAE_REVEAL_TICK_MS)
        #[arg(long)]
        tick_ms: Option<u64>,
    },
    List {
        project: Uuid,
    },
}
