use adjgraph_core::{
    breadth_first_search, degree_centrality, depth_first_search, farthest_vertices, write_tgf,
    DegreeStats, Graph, GraphBuilder, IntegerGraphBuilder,
};
use std::collections::VecDeque;
use std::io::Cursor;
use std::time::Instant;

/// Farthest-vertex search runs one BFS per vertex; skip it above this size.
const FARTHEST_LIMIT: usize = 5_000;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: adjgraph-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Ternary branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via arc sampling (hub-and-spoke)");
        println!("  smallworld  Ring lattice + random shortcuts");
        println!("  random      Uniform random arcs");
        println!("  barbell     Two dense clusters joined by a one-way bridge");
        println!("  dla         Frontier growth (organic branching)");
        println!();
        println!("Default node_count: 20000");
        return;
    }

    println!("adjgraph-bench");
    println!("==============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph<u64>)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free (arc sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world ring", gen_small_world)],
        "random" => vec![("Uniform random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "dla" => vec![("Frontier growth", gen_dla)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(u64) -> Graph<u64>),
            ("Scale-free (arc sampling)", gen_scale_free),
            ("Small-world ring", gen_small_world),
            ("Uniform random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("Frontier growth", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count.max(2));
    }
}

fn millis(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph<u64>, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} vertices", node_count);

    let t = Instant::now();
    let mut graph = generator(node_count);
    println!(
        "Generated in {:.1}ms: {} vertices, {} arcs, ~{:.1}MB",
        millis(t),
        graph.vertex_count(),
        graph.arc_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    // Traversal traces from vertex 0 toward progressively farther targets
    let last = graph.vertex_count() as u64 - 1;
    println!();
    println!(
        "{:>8} {:>10} {:>12} {:>10} {:>12} {:>10}",
        "target", "dfs trace", "dfs time", "bfs trace", "bfs time", "reached"
    );
    println!(
        "{:->8} {:->10} {:->12} {:->10} {:->12} {:->10}",
        "", "", "", "", "", ""
    );
    for target in [1, last / 100, last / 10, last / 2, last] {
        let t = Instant::now();
        let dfs = depth_first_search(&graph, &0, &target);
        let dfs_ms = millis(t);
        let t = Instant::now();
        let bfs = breadth_first_search(&graph, &0, &target);
        let bfs_ms = millis(t);

        match (dfs, bfs) {
            (Ok(dfs), Ok(bfs)) => println!(
                "{:>8} {:>10} {:>10.2}ms {:>10} {:>10.2}ms {:>10}",
                target,
                dfs.len(),
                dfs_ms,
                bfs.len(),
                bfs_ms,
                bfs.contains(&target)
            ),
            (Err(e), _) | (_, Err(e)) => println!("{:>8} error: {}", target, e),
        }
    }

    // Degree statistics
    println!();
    let t = Instant::now();
    let out_stats = DegreeStats::from_degrees(&graph.outdegrees());
    let in_stats = DegreeStats::from_degrees(&graph.indegrees());
    let top = degree_centrality(&graph, 5);
    let degree_ms = millis(t);
    if let (Ok(o), Ok(i)) = (out_stats, in_stats) {
        println!(
            "Degrees in {:.1}ms: out {}..{} (avg {:.2}), in {}..{} (avg {:.2})",
            degree_ms, o.min, o.max, o.average, i.min, i.max, i.average
        );
    }
    let hubs: Vec<String> = top
        .iter()
        .map(|r| format!("{}({})", r.vertex, r.total_degree))
        .collect();
    println!("Top by degree: {}", hubs.join(", "));

    if graph.vertex_count() <= FARTHEST_LIMIT {
        let t = Instant::now();
        if let Ok(far) = farthest_vertices(&graph, &0) {
            println!(
                "Farthest from 0: {} vertices at trace length {} in {:.1}ms",
                far.vertices.len(),
                far.distance,
                millis(t)
            );
        }
    }

    // TGF round trip through memory
    let t = Instant::now();
    let mut buf = Vec::new();
    let written = write_tgf(&graph, &mut buf);
    let write_ms = millis(t);
    let t = Instant::now();
    let read = written.and_then(|()| IntegerGraphBuilder.read(Cursor::new(&buf)));
    match read {
        Ok(back) => println!(
            "TGF: {:.1}KB written in {:.1}ms, read back in {:.1}ms ({} arcs)",
            buf.len() as f64 / 1024.0,
            write_ms,
            millis(t),
            back.arc_count()
        ),
        Err(e) => println!("TGF round trip failed: {}", e),
    }

    // Cascading removal of every tenth vertex
    let t = Instant::now();
    let victims: Vec<u64> = graph.vertices().copied().step_by(10).collect();
    let removed = victims.iter().filter(|v| graph.remove_vertex(v)).count();
    println!(
        "Removed {} vertices in {:.1}ms: {} vertices, {} arcs left",
        removed,
        millis(t),
        graph.vertex_count(),
        graph.arc_count()
    );
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded. Arcs point from older vertices
// to newer ones where the topology allows, so traces from 0 go somewhere.
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn with_vertices(node_count: u64) -> Graph<u64> {
    let mut graph = Graph::with_capacity(node_count as usize);
    for v in 0..node_count {
        graph.add_vertex(v);
    }
    graph
}

/// Ternary tree grown level by level: log-depth paths, exponential width.
fn gen_lsystem(node_count: u64) -> Graph<u64> {
    let mut graph = with_vertices(node_count);
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * 3);
        for &parent in &frontier {
            for _ in 0..3 {
                if next_id >= node_count {
                    break;
                }
                graph.add_arc(&parent, &next_id);
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Preferential attachment: sampling a random arc endpoint picks vertices
/// proportionally to their degree.
fn gen_scale_free(node_count: u64) -> Graph<u64> {
    let arcs_per_vertex = 5u64;
    let mut graph = with_vertices(node_count);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<u64> = Vec::with_capacity((node_count * arcs_per_vertex * 2) as usize);

    let seed = 5u64.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            graph.add_arc(&i, &j);
            endpoints.extend([i, j]);
        }
    }

    for v in seed..node_count {
        for _ in 0..arcs_per_vertex {
            let hub = endpoints[rng.next(endpoints.len() as u64) as usize];
            if graph.add_arc(&hub, &v) {
                endpoints.extend([hub, v]);
            }
        }
    }

    graph
}

/// Ring lattice with `k` forward neighbors per vertex; each arc is redirected
/// to a random vertex with probability `p`.
fn gen_small_world(node_count: u64) -> Graph<u64> {
    let k = 5u64;
    let p = 0.05f64;
    let mut graph = with_vertices(node_count);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let target = if rng.next_f64() < p {
                rng.next(node_count)
            } else {
                (i + j) % node_count
            };
            if target != i {
                graph.add_arc(&i, &target);
            }
        }
    }

    graph
}

/// About five uniformly random arcs per vertex; no structure.
fn gen_random(node_count: u64) -> Graph<u64> {
    let mut graph = with_vertices(node_count);
    let mut rng = FastRng::new(54321);

    for _ in 0..node_count * 5 {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            graph.add_arc(&from, &to);
        }
    }

    graph
}

/// Two dense clusters joined by a one-way chain of bridge vertices. Every
/// trace from cluster A into cluster B must squeeze through the chain.
fn gen_barbell(node_count: u64) -> Graph<u64> {
    let bridge_len = 10u64.min(node_count / 2);
    let cluster = (node_count - bridge_len) / 2;
    let mut graph = with_vertices(node_count);
    let mut rng = FastRng::new(99999);

    let b_start = cluster + bridge_len;
    for base in [0, b_start] {
        for i in 0..cluster {
            for _ in 0..10u64.min(cluster.saturating_sub(1)) {
                let target = rng.next(cluster);
                if target != i {
                    graph.add_arc(&(base + i), &(base + target));
                }
            }
        }
    }

    // Chain: last of A -> bridge -> first of B
    for v in cluster.saturating_sub(1)..b_start {
        graph.add_arc(&v, &(v + 1));
    }

    graph
}

/// New vertices hang off a bounded window of recent vertices, with an
/// occasional second arc from anywhere older.
fn gen_dla(node_count: u64) -> Graph<u64> {
    let mut graph = with_vertices(node_count);
    let mut rng = FastRng::new(77777);

    let surface_max = 1000usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for v in 1..node_count {
        let parent = surface[rng.next(surface.len() as u64) as usize];
        graph.add_arc(&parent, &v);

        if rng.next(10) == 0 && v > 1 {
            let other = rng.next(v);
            if other != parent {
                graph.add_arc(&other, &v);
            }
        }

        surface.push_back(v);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    graph
}
