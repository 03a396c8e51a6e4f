use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use clap::{Parser, ValueEnum};
use indicatif::{ParallelProgressIterator, ProgressIterator};
use itertools::Itertools;
use log::{error, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use remaining_weight::{
    error::Result,
    graphs::{edge_weight::GeneralizedCost, Direction, Graph, Vertex, Weight},
    heuristics::{
        config::HeuristicConfig,
        remaining_weight::ReverseSearchHeuristic,
        spawner::{InlineSpawner, RayonSpawner, ThreadSpawner, WorkerSpawner},
        RemainingWeightHeuristic, TrivialHeuristic,
    },
    search::{astar::astar, dijkstra::one_to_all, path::RoutingRequest},
    utility::{get_progressbar, read_graph},
};

#[derive(Debug, ValueEnum, Clone)]
enum Spawner {
    Thread,
    Rayon,
    Inline,
}

/// Runs random queries with and without the reverse search heuristic and
/// checks that both find paths of equal weight.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in .bincode or .json format
    #[arg(short, long)]
    graph: PathBuf,
    #[arg(short, long, default_value_t = 100)]
    number_of_queries: u32,
    /// Queries pick their target from this many random vertices
    #[arg(short, long, default_value_t = 5)]
    targets: u32,
    #[arg(short, long, default_value_t = Weight::INFINITY)]
    max_weight: Weight,
    #[arg(short, long)]
    arrive_by: bool,
    #[arg(long, value_enum, default_value_t = Spawner::Thread)]
    spawner: Spawner,
    /// Heuristic configuration in .json format
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Also compare against plain Dijkstra
    #[arg(short, long)]
    validate: bool,
    #[arg(short, long)]
    seed: Option<u64>,
}

struct Query {
    origin: Vertex,
    target: Vertex,
    weight: Option<Weight>,
}

fn same_weight(a: Option<Weight>, b: Option<Weight>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() <= 1e-6 * a.abs().max(1.0),
        (None, None) => true,
        _ => false,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let graph = Arc::new(read_graph(&args.graph)?);
    let config = match &args.config {
        Some(path) => HeuristicConfig::from_json_file(path)?,
        None => HeuristicConfig::default(),
    };
    let spawner: Arc<dyn WorkerSpawner> = match args.spawner {
        Spawner::Thread => Arc::new(ThreadSpawner),
        Spawner::Rayon => Arc::new(RayonSpawner),
        Spawner::Inline => Arc::new(InlineSpawner),
    };
    let edge_weight = Arc::new(GeneralizedCost);
    let heuristic = ReverseSearchHeuristic::new(graph.clone(), edge_weight.clone())
        .with_spawner(spawner)
        .with_config(config);

    let request = RoutingRequest {
        arrive_by: args.arrive_by,
        max_weight: args.max_weight,
        ..Default::default()
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let number_of_vertices = graph.number_of_vertices();
    let targets = (0..args.targets.max(1))
        .map(|_| rng.gen_range(0..number_of_vertices))
        .collect_vec();

    let mut with_heuristic = Duration::ZERO;
    let mut without_heuristic = Duration::ZERO;
    let mut mismatches = 0;
    let mut queries = Vec::new();

    for _ in (0..args.number_of_queries).progress_with(get_progressbar(
        "Running queries",
        args.number_of_queries as u64,
    )) {
        let origin = rng.gen_range(0..number_of_vertices);
        let target = *targets.choose(&mut rng).unwrap_or(&0);
        let request = request.clone().with_origin(origin);

        let start = Instant::now();
        let guided = astar(
            graph.as_ref(),
            edge_weight.as_ref(),
            &heuristic,
            &request,
            origin,
            target,
        );
        with_heuristic += start.elapsed();
        heuristic.reset();

        let start = Instant::now();
        let plain = astar(
            graph.as_ref(),
            edge_weight.as_ref(),
            &TrivialHeuristic,
            &request,
            origin,
            target,
        );
        without_heuristic += start.elapsed();

        let weight = plain.map(|path| path.weight);
        if !same_weight(guided.as_ref().map(|path| path.weight), weight) {
            error!(
                "weights differ from {} to {}: {:?} with heuristic, {:?} without",
                origin,
                target,
                guided.map(|path| path.weight),
                weight
            );
            mismatches += 1;
        }
        queries.push(Query {
            origin,
            target,
            weight,
        });
    }

    let number_of_queries = args.number_of_queries.max(1);
    info!(
        "average duration {:?} with heuristic, {:?} without",
        with_heuristic / number_of_queries,
        without_heuristic / number_of_queries
    );
    info!("{} of {} queries differ", mismatches, args.number_of_queries);

    if args.validate {
        let invalid = queries
            .par_iter()
            .progress_with(get_progressbar("Validating", queries.len() as u64))
            .filter(|query| {
                let direction = request.search_direction();
                let (start, end) = match direction {
                    Direction::Outgoing => (query.origin, query.target),
                    Direction::Incoming => (query.target, query.origin),
                };
                let weights = one_to_all(
                    graph.as_ref(),
                    edge_weight.as_ref(),
                    &request,
                    start,
                    direction,
                );
                let weight = Some(weights[end as usize]).filter(|weight| {
                    weight.is_finite() && *weight <= request.max_weight
                });
                !same_weight(weight, query.weight)
            })
            .count();
        info!("{} of {} queries disagree with dijkstra", invalid, queries.len());
    }

    Ok(())
}
