//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pokeher",
    author,
    version,
    about = "Texas Hold'em hand engine for bot matches"
)]
pub struct PokeherCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a run of hands between bots
    Sim {
        #[arg(long, default_value_t = 10)]
        hands: u64,
        /// Bot kinds, one per seat (baseline, station, random)
        #[arg(long, value_delimiter = ',', default_value = "baseline,random")]
        bots: Vec<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Starting stack for every bot
        #[arg(long)]
        stack: Option<u32>,
        /// Print hand records as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Rank hole cards against a board
    Showdown {
        /// Board cards, e.g. "5s Kc 3d Qc 9c"
        #[arg(long)]
        board: String,
        /// A named hand, e.g. "alice=AhAs"; repeat for each player
        #[arg(long = "hand", required = true)]
        hands: Vec<String>,
        /// Pot to divide among the winners
        #[arg(long)]
        pot: Option<u32>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
