use hierarchical_aco::graph::export::{Dot, Export};
use hierarchical_aco::graph::ChannelId;
use hierarchical_aco::metaheuristic::Supervisor;
use hierarchical_aco::rng::{next_seed, rng64};
use hierarchical_aco::search::{HierarchicalSearch, SearchError};
use hierarchical_aco::search_config::SearchConfig;

use csv::Writer;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const STAGES: u64 = 6;

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: {} <config glob> [statistics.csv]", args[0]);
        std::process::exit(2);
    }

    let configs: Vec<PathBuf> = glob(&args[1])?.filter_map(Result::ok).collect();
    if configs.is_empty() {
        warn!(pattern = %args[1], "no config files matched");
    }

    for config in &configs {
        let stats = args
            .get(2)
            .map(|base| stats_path(Path::new(base), config, configs.len() > 1));
        run_config(config, stats.as_deref())?;
    }

    Ok(())
}

/// With several configs every one gets its own statistics file, named after the config.
fn stats_path(base: &Path, config: &Path, several: bool) -> PathBuf {
    if !several {
        return base.to_path_buf();
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("stats");
    let config_stem = config
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("config");
    base.with_file_name(format!("{}_{}.csv", stem, config_stem))
}

fn run_config(path: &Path, stats: Option<&Path>) -> Result<(), Box<dyn Error>> {
    info!(config = %path.display(), "loading");
    let config = SearchConfig::from_file(path)?;
    let general = config.search.cfg();

    let progress = ProgressBar::new(STAGES);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner} [{elapsed_precise}] {bar:30} {pos}/{len} {msg}"),
    );
    progress.set_message("building graph");

    let mut graph = config.graph()?;
    progress.inc(1);

    let mut rng = rng64(general.seed as u128);
    let start = match general.start {
        Some(node) => node,
        None => graph.random_node(&mut rng).ok_or("graph has no nodes")?,
    };
    let end = match general.end {
        Some(node) => node,
        None => graph.random_node(&mut rng).ok_or("graph has no nodes")?,
    };
    info!(
        nodes = graph.order(),
        edges = graph.size(),
        start,
        end,
        seed = general.seed,
        "graph ready"
    );

    let mut supervisor = match stats {
        Some(stats) => Some(Supervisor::new(
            general.aggregation_rate,
            Writer::from_path(stats)?,
        )),
        None => None,
    };

    let params = config.colony.search_params(next_seed(&mut rng));
    let mut search = HierarchicalSearch::new(params, Some(next_seed(&mut rng)));
    if let Some(supervisor) = &supervisor {
        search.set_supervisor(supervisor.sender());
    }

    let result = search.search_with(&mut graph, start, end, |stage| {
        progress.inc(1);
        progress.set_message(stage);
    });

    match result {
        Ok(route) => {
            progress.finish_with_message("done");
            info!(
                length = route.length,
                hops = route.path.hops(),
                waypoints = route.meta_path.hops(),
                "route found"
            );
            println!("{}", route.path);

            if let (Some(dot_output), Some(meta_graph)) = (&general.dot_output, &route.meta_graph)
            {
                let dot = Dot::from_pheromone_graph(meta_graph, Some(ChannelId::new(0)), "meta");
                fs::write(dot_output, dot)?;
                info!(file = %dot_output, "meta-graph written");
            }
        }
        Err(SearchError::NoRoute(stage)) => {
            progress.abandon_with_message("no route");
            warn!(%stage, start, end, "no route found");
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(supervisor) = &mut supervisor {
        supervisor.write_rows()?;
    }

    Ok(())
}
