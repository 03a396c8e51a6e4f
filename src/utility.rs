use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use rand::Rng;

use crate::{
    error::{HeuristicError, Result},
    graphs::{multimodal_graph::MultimodalGraph, Edge, Mode, Vertex},
};

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(" {msg} {wide_bar} {pos}/{len} eta: {eta_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

pub fn get_progressspinner(job_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(job_name.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

enum GraphFileType {
    Bincode,
    Json,
}

fn graph_file_type(path: &Path) -> Result<GraphFileType> {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("bincode") => Ok(GraphFileType::Bincode),
        Some("json") => Ok(GraphFileType::Json),
        other => Err(HeuristicError::UnknownFileType(
            other.unwrap_or_default().to_string(),
        )),
    }
}

/// Reads a graph, picking the format from the file extension.
pub fn read_graph(path: &Path) -> Result<MultimodalGraph> {
    let file_type = graph_file_type(path)?;
    let spinner = get_progressspinner("Reading graph");
    let reader = BufReader::new(File::open(path)?);
    let graph = match file_type {
        GraphFileType::Bincode => bincode::deserialize_from(reader)?,
        GraphFileType::Json => serde_json::from_reader(reader)?,
    };
    spinner.finish_and_clear();
    Ok(graph)
}

pub fn write_graph(graph: &MultimodalGraph, path: &Path) -> Result<()> {
    let file_type = graph_file_type(path)?;
    let writer = BufWriter::new(File::create(path)?);
    match file_type {
        GraphFileType::Bincode => bincode::serialize_into(writer, graph)?,
        GraphFileType::Json => serde_json::to_writer(writer, graph)?,
    }
    Ok(())
}

/// A `width` x `height` street grid walkable in both directions, with a
/// faster transit line along every `line_spacing`-th row that stops at
/// every third intersection.
pub fn random_grid_graph<R: Rng>(
    width: u32,
    height: u32,
    line_spacing: u32,
    rng: &mut R,
) -> MultimodalGraph {
    let vertex = |x: u32, y: u32| -> Vertex { y * width + x };
    let mut graph = MultimodalGraph::with_vertices(width * height);

    let add_both_ways = |graph: &mut MultimodalGraph, tail, head, weight, mode| {
        if let Some(edge) = Edge::new(tail, head, weight, mode) {
            graph.add_edge(edge);
        }
        if let Some(edge) = Edge::new(head, tail, weight, mode) {
            graph.add_edge(edge);
        }
    };

    for (x, y) in (0..width).cartesian_product(0..height) {
        if x + 1 < width {
            let weight = rng.gen_range(60.0..120.0);
            add_both_ways(&mut graph, vertex(x, y), vertex(x + 1, y), weight, Mode::Walk);
        }
        if y + 1 < height {
            let weight = rng.gen_range(60.0..120.0);
            add_both_ways(&mut graph, vertex(x, y), vertex(x, y + 1), weight, Mode::Walk);
        }
    }

    if line_spacing > 0 {
        for y in (0..height).step_by(line_spacing as usize) {
            for (from, to) in (0..width).step_by(3).tuple_windows() {
                let weight = rng.gen_range(20.0..40.0) * (to - from) as f64;
                add_both_ways(&mut graph, vertex(from, y), vertex(to, y), weight, Mode::Transit);
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::graphs::Graph;

    #[test]
    fn grid_has_streets_and_transit() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = random_grid_graph(4, 3, 2, &mut rng);

        assert_eq!(graph.number_of_vertices(), 12);
        // 17 street links and one transit link on each of rows 0 and 2,
        // every link in both directions.
        assert_eq!(graph.number_of_edges(), 2 * (17 + 2));
        assert!(graph
            .out_edges(0)
            .iter()
            .any(|edge| edge.mode() == Mode::Transit && edge.head() == 3));
    }

    #[test]
    fn graph_files_round_trip() {
        let mut rng = StdRng::seed_from_u64(1);
        let graph = random_grid_graph(3, 3, 0, &mut rng);
        let dir = std::env::temp_dir().join(format!("remaining_weight_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        for name in ["graph.bincode", "graph.json"] {
            let path = dir.join(name);
            write_graph(&graph, &path).unwrap();
            let read = read_graph(&path).unwrap();
            assert_eq!(read.number_of_edges(), graph.number_of_edges());
            let heads = |graph: &MultimodalGraph| {
                graph.out_edges(4).iter().map(Edge::head).collect_vec()
            };
            assert_eq!(heads(&read), heads(&graph));
        }

        let result = write_graph(&graph, &dir.join("graph.txt"));
        assert!(matches!(result, Err(HeuristicError::UnknownFileType(_))));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
