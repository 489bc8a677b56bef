//! Shortest distances along the road network between two positions
//! on its edges.
//!
//! Distances are measured on the *interpolated* network, the one the
//! reference points were sampled from. Since a reference point is
//! known by its edge and its offset along that edge, the interpolated
//! graph is never built: a route leaves the source edge through one of
//! its end nodes, follows the original network, and enters the target
//! edge through one of its end nodes.
//!
//! ```text
//!   source edge            network            target edge
//!  +-----x=====+ ~~~~~~~~~~~~~~~~~~~~~~~~~~~ +=====x-------+
//!        ^ offset                                  ^ offset
//! ```

#[doc(hidden)]
pub mod cache;
#[doc(hidden)]
pub mod dijkstra;

#[doc(inline)]
pub use cache::{Reach, ReachCache};
#[doc(inline)]
pub use dijkstra::{Dijkstra, DijkstraReachable, DijkstraReachableItem};

use smallvec::{smallvec, SmallVec};

use crate::network::{Directionality, EdgeIx, NetworkView, NodeIx, RoadEdge};

/// A position on the network, as an edge and a distance along it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub edge: EdgeIx,
    pub offset: f64,
}

type Ends = SmallVec<[(NodeIx, f64); 2]>;

/// Routes between [`Location`]s within a [`NetworkView`].
///
/// Owns its [`ReachCache`], so a router belongs to a single decode.
/// Independent trajectories each create their own.
pub struct NetworkRouter<'a> {
    view: &'a NetworkView<'a>,
    cache: ReachCache,
}

impl<'a> NetworkRouter<'a> {
    pub fn new(view: &'a NetworkView<'a>) -> Self {
        Self {
            view,
            cache: ReachCache::default(),
        }
    }

    pub fn view(&self) -> &'a NetworkView<'a> {
        self.view
    }

    /// Number of nodes explored from so far.
    pub fn explored(&self) -> usize {
        self.cache.len()
    }

    /// Nodes through which a traveller at `location` can leave its edge,
    /// with the distance remaining to reach each of them.
    fn exits(&self, edge: &RoadEdge, location: &Location) -> Ends {
        let forward = (edge.target, (edge.length - location.offset).max(0.0));

        match self.view.network().directionality() {
            Directionality::Directed => smallvec![forward],
            Directionality::Undirected => smallvec![forward, (edge.source, location.offset)],
        }
    }

    /// Nodes through which a traveller can enter the edge of `location`,
    /// with the distance still to travel once entered.
    fn entries(&self, edge: &RoadEdge, location: &Location) -> Ends {
        let forward = (edge.source, location.offset);

        match self.view.network().directionality() {
            Directionality::Directed => smallvec![forward],
            Directionality::Undirected => smallvec![
                forward,
                (edge.target, (edge.length - location.offset).max(0.0))
            ],
        }
    }

    /// The shortest network distance from `from` to `to`, in meters.
    ///
    /// Routes longer than `bound` are not explored, `None` is returned
    /// when `to` cannot be reached within it.
    pub fn distance(&mut self, from: &Location, to: &Location, bound: f64) -> Option<f64> {
        let network = self.view.network();
        let source = network.edge(from.edge)?;
        let target = network.edge(to.edge)?;

        let mut best: Option<f64> = None;

        // Travelling along a single edge
        if from.edge == to.edge {
            let delta = to.offset - from.offset;
            if delta >= 0.0 || network.directionality() == Directionality::Undirected {
                best = Some(delta.abs());
            }
        }

        let entries = self.entries(target, to);
        for (exit, leave) in self.exits(source, from) {
            if leave > bound || best.is_some_and(|best| leave >= best) {
                continue;
            }

            let reach = self.cache.query(self.view, exit, bound);
            for (entry, enter) in &entries {
                if let Some(between) = reach.distances.get(entry) {
                    let total = leave + between + enter;
                    if best.map_or(true, |best| total < best) {
                        best = Some(total);
                    }
                }
            }
        }

        best.filter(|distance| *distance <= bound)
    }
}
