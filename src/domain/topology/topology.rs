use std::collections::{BTreeSet, HashMap};

use crate::api::topology_dto::TopologyDto;
use crate::domain::topology::edge::{Edge, EdgeRelation};
use crate::domain::topology::node::{Node, NodeCategory, NodeId};
use crate::error::TopologyError;

/// Read-only service-dependency graph shared by every trial of a batch.
///
/// Nodes are stored densely in load order; the propagation hot path works on these
/// dense indices and never touches the attribute maps. There are no mutating methods
/// after [`Topology::load`], so a `&Topology` can be handed to any number of worker
/// threads without locking.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    /// All nodes, in the order they were supplied.
    nodes: Vec<Node>,

    /// All edges, in the order they were supplied.
    edges: Vec<Edge>,

    /// Maps a `NodeId` to its position in `nodes`.
    index: HashMap<NodeId, usize>,

    /// Outgoing adjacency by dense index. One entry per edge, so parallel edges
    /// appear more than once.
    adjacency: Vec<Vec<usize>>,
}

impl TryFrom<TopologyDto> for Topology {
    type Error = TopologyError;

    fn try_from(dto: TopologyDto) -> Result<Self, Self::Error> {
        let nodes = dto
            .nodes
            .into_iter()
            .map(|n| Node { id: NodeId(n.id), label: n.label, category: NodeCategory::from(n.category), attributes: n.extra })
            .collect();

        let edges = dto
            .edges
            .into_iter()
            .map(|e| Edge { source: NodeId(e.source), target: NodeId(e.target), relation: EdgeRelation::from(e.typ), attributes: e.extra })
            .collect();

        Topology::load(nodes, edges)
    }
}

impl Topology {
    /// Builds a topology, rejecting duplicate node ids and edges whose endpoints are
    /// not in the node set.
    pub fn load(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, TopologyError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (pos, node) in nodes.iter().enumerate() {
            if index.insert(node.id, pos).is_some() {
                return Err(TopologyError::DuplicateNode(node.id));
            }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for edge in &edges {
            let dangling = |missing| TopologyError::DanglingEdge { from: edge.source, to: edge.target, missing };
            let source = *index.get(&edge.source).ok_or_else(|| dangling(edge.source))?;
            let target = *index.get(&edge.target).ok_or_else(|| dangling(edge.target))?;
            adjacency[source].push(target);
        }

        log::debug!("Topology loaded with {} nodes and {} edges.", nodes.len(), edges.len());

        Ok(Topology { nodes, edges, index, adjacency })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Targets of the outgoing edges of `id`, one item per edge, in edge load order.
    pub fn neighbors(&self, id: NodeId) -> Result<impl Iterator<Item = NodeId> + '_, TopologyError> {
        let pos = *self.index.get(&id).ok_or(TopologyError::UnknownNode(id))?;
        Ok(self.adjacency[pos].iter().map(|&target| self.nodes[target].id))
    }

    pub fn nodes_by_category(&self, category: &NodeCategory) -> BTreeSet<NodeId> {
        self.nodes.iter().filter(|node| &node.category == category).map(|node| node.id).collect()
    }

    /// Outgoing targets of the node at dense index `pos`.
    pub(crate) fn outgoing(&self, pos: usize) -> &[usize] {
        &self.adjacency[pos]
    }

    pub(crate) fn id_at(&self, pos: usize) -> NodeId {
        self.nodes[pos].id
    }
}
