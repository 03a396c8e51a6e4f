use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use remaining_weight::{
    error::Result,
    utility::{random_grid_graph, write_graph},
};

/// Writes a random street grid with transit lines, as .bincode or .json.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Outfile in .bincode or .json format
    #[arg(short, long)]
    graph: PathBuf,
    #[arg(long, default_value_t = 100)]
    width: u32,
    #[arg(long, default_value_t = 100)]
    height: u32,
    /// Every this many rows gets a transit line, 0 for none
    #[arg(short, long, default_value_t = 10)]
    line_spacing: u32,
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let graph = random_grid_graph(args.width, args.height, args.line_spacing, &mut rng);
    info!(
        "generated graph with {} edges, writing to {:?}",
        graph.number_of_edges(),
        args.graph
    );

    write_graph(&graph, &args.graph)
}
