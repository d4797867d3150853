mod error;
mod meta_graph;
mod params;

pub use error::{SearchError, SearchStage};
pub use meta_graph::{build_meta_graph, objectives_from_meta_path};
pub use params::SearchParams;

use crate::graph::{NodeId, PheromoneGraph};
use crate::metaheuristic::{
    best_path, Colony, Layer, Message, MultiObjectiveColony, NeighbourColony, Neighbourhood,
    ObjectiveSession, Params, Path, TargetFound, UniquePaths,
};
use crate::rng::{next_seed, os_random_seed, rng64};

use oorandom::Rand64;
use std::sync::mpsc::Sender;
use tracing::{info, warn};

/// The outcome of a hierarchical search.
pub struct Route<IndexType> {
    /// Waypoints over colony base nodes.
    pub meta_path: Path<IndexType>,
    /// The route through the searched graph.
    pub path: Path<IndexType>,
    pub length: f64,
    pub meta_graph: Option<PheromoneGraph<IndexType>>,
}

impl<IndexType: NodeId> Route<IndexType> {
    fn empty(node: IndexType) -> Self {
        Route {
            meta_path: Path::starting_at(node),
            path: Path::starting_at(node),
            length: 0.0,
            meta_graph: None,
        }
    }
}

/// Finds a route in two levels: colonies spread over the graph learn how close they are to
/// each other, the best chain of colonies from start to end is searched on the resulting
/// meta-graph and a last colony follows the pheromone of that chain through the graph.
pub struct HierarchicalSearch {
    params: SearchParams,
    rng: Rand64,
    sender: Option<Sender<Message>>,
}

impl HierarchicalSearch {
    pub fn new(params: SearchParams, seed: Option<u128>) -> Self {
        HierarchicalSearch {
            params,
            rng: rng64(seed.unwrap_or_else(os_random_seed)),
            sender: None,
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Every colony created from now on reports its iterations to this sender.
    pub fn set_supervisor(&mut self, sender: Sender<Message>) {
        self.sender = Some(sender);
    }

    /// Runs all stages. The graph needs `params().required_channels()` free channels.
    pub fn search<IndexType: NodeId>(
        &mut self,
        graph: &mut PheromoneGraph<IndexType>,
        start: IndexType,
        end: IndexType,
    ) -> Result<Route<IndexType>, SearchError<IndexType>> {
        self.search_with(graph, start, end, |_| {})
    }

    /// Like `search`, calling `on_stage` with a short description after every stage.
    pub fn search_with<IndexType, F>(
        &mut self,
        graph: &mut PheromoneGraph<IndexType>,
        start: IndexType,
        end: IndexType,
        mut on_stage: F,
    ) -> Result<Route<IndexType>, SearchError<IndexType>>
    where
        IndexType: NodeId,
        F: FnMut(&str),
    {
        if start == end {
            graph.degree(start)?;
            return Ok(Route::empty(start));
        }

        let mut neighbourhood = self.train_neighbourhood(graph)?;
        on_stage("neighbourhood trained");
        let (start_colony, end_colony) =
            self.train_endpoints(graph, &mut neighbourhood, start, end)?;
        on_stage("endpoints trained");
        let mut meta_graph =
            build_meta_graph(&neighbourhood, &start_colony, &end_colony, graph.bounds())?;
        on_stage("meta-graph built");
        let meta_path = self.find_meta_path(&mut meta_graph, start, end)?;
        on_stage("meta-path found");

        let mut channels = neighbourhood.channel_map();
        channels.insert(end, end_colony.get_id());
        let session = objectives_from_meta_path(&meta_path, &channels);
        let path = self.find_path(graph, &session, start, end)?;
        on_stage("path found");

        Ok(Route {
            length: path.length().into_inner(),
            meta_path,
            path,
            meta_graph: Some(meta_graph),
        })
    }

    pub fn train_neighbourhood<IndexType: NodeId>(
        &mut self,
        graph: &mut PheromoneGraph<IndexType>,
    ) -> Result<Neighbourhood<IndexType>, SearchError<IndexType>> {
        let mut neighbourhood =
            Neighbourhood::new(graph, self.params.colonies, self.params.colony, &mut self.rng)?;
        if let Some(sender) = &self.sender {
            neighbourhood.set_supervisor(sender);
        }
        info!(
            colonies = neighbourhood.len(),
            iterations = self.params.training_iterations,
            "training neighbourhood"
        );

        for _ in 0..self.params.training_iterations {
            neighbourhood.run(graph)?;
            neighbourhood.update(graph)?;
        }
        Ok(neighbourhood)
    }

    /// Creates colonies at both endpoints and trains them together with the neighbourhood.
    pub fn train_endpoints<IndexType: NodeId>(
        &mut self,
        graph: &mut PheromoneGraph<IndexType>,
        neighbourhood: &mut Neighbourhood<IndexType>,
        start: IndexType,
        end: IndexType,
    ) -> Result<(NeighbourColony<IndexType>, NeighbourColony<IndexType>), SearchError<IndexType>>
    {
        let bases = neighbourhood.get_base_nodes();
        let mut start_colony =
            NeighbourColony::new(graph, start, bases.clone(), self.colony_params())?;
        let mut end_colony = NeighbourColony::new(graph, end, bases, self.colony_params())?;
        if let Some(sender) = &self.sender {
            start_colony.set_supervisor(sender.clone());
            end_colony.set_supervisor(sender.clone());
        }
        info!(%start, %end, iterations = self.params.endpoint_iterations, "training endpoints");

        for _ in 0..self.params.endpoint_iterations {
            let shared: &PheromoneGraph<IndexType> = graph;
            let (trained, (started, ended)) = rayon::join(
                || neighbourhood.run(shared),
                || rayon::join(|| start_colony.run(shared), || end_colony.run(shared)),
            );
            trained?;
            started?;
            ended?;

            neighbourhood.update(graph)?;
            start_colony.update(graph)?;
            end_colony.update(graph)?;
        }

        if start_colony.get_metric() <= 0.0 || end_colony.get_metric() <= 0.0 {
            warn!(
                start_metric = start_colony.get_metric(),
                end_metric = end_colony.get_metric(),
                "an endpoint never reached the neighbourhood"
            );
            return Err(SearchError::NoRoute(SearchStage::Endpoints));
        }
        Ok((start_colony, end_colony))
    }

    /// Best distinct meta-path any ant found from start to end.
    pub fn find_meta_path<IndexType: NodeId>(
        &mut self,
        meta_graph: &mut PheromoneGraph<IndexType>,
        start: IndexType,
        end: IndexType,
    ) -> Result<Path<IndexType>, SearchError<IndexType>> {
        info!(
            nodes = meta_graph.order(),
            edges = meta_graph.size(),
            "searching meta-path"
        );
        let mut colony = Colony::new(meta_graph, start, self.colony_params())?;
        colony.set_layer(Layer::Meta);
        if let Some(sender) = &self.sender {
            colony.set_supervisor(sender.clone());
        }
        let mut recorder = UniquePaths::new(end);
        for _ in 0..self.params.meta_iterations {
            colony.run(meta_graph, &mut recorder)?;
            colony.update(meta_graph)?;
        }

        match best_path(recorder.successful_paths()) {
            Some(path) => {
                info!(
                    meta_path = %path,
                    candidates = recorder.successful_paths().len(),
                    "chose meta-path"
                );
                Ok(path.clone())
            }
            None => {
                warn!("no meta-path from start to end");
                Err(SearchError::NoRoute(SearchStage::MetaPath))
            }
        }
    }

    /// Lets a multi-objective colony follow the session's objectives from start to end.
    pub fn find_path<IndexType: NodeId>(
        &mut self,
        graph: &mut PheromoneGraph<IndexType>,
        session: &ObjectiveSession<IndexType>,
        start: IndexType,
        end: IndexType,
    ) -> Result<Path<IndexType>, SearchError<IndexType>> {
        info!(
            objectives = session.len(),
            iterations = self.params.final_iterations,
            "searching final path"
        );
        let mut colony = MultiObjectiveColony::new(graph, start, self.colony_params())?;
        if let Some(sender) = &self.sender {
            colony.set_supervisor(sender.clone());
        }
        let mut success = TargetFound::new(end);
        for _ in 0..self.params.final_iterations {
            colony.run(graph, session, &mut success)?;
            colony.update(graph)?;
        }

        match colony.best_path() {
            Some(path) if colony.get_metric() > 0.0 => Ok(path.clone()),
            _ => {
                warn!(metric = colony.get_metric(), "no ant reached the end");
                Err(SearchError::NoRoute(SearchStage::FinalPath))
            }
        }
    }

    fn colony_params(&mut self) -> Params {
        self.params.colony.reseeded(next_seed(&mut self.rng))
    }
}
