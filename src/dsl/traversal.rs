use super::Rendering;
use super::printer::{write_step, write_transition};
use super::topology::{LinkIdx, NodeIdx, Topology};
use crate::error::GraphError;
use crate::graph::NodeRole;
use ahash::AHashSet;
use tracing::{debug, trace, warn};

/// Working state of one reconstruction.
///
/// Holds the text built so far plus the nodes not yet printed and the links
/// not yet followed. Both start as full copies; the graph itself is never touched.
pub(super) struct Traversal<'t, 'g> {
    topology: &'t Topology<'g>,
    text: String,
    unvisited_nodes: Vec<NodeIdx>,
    unfollowed_links: Vec<LinkIdx>,
    depth: usize,
}

impl<'t, 'g> Traversal<'t, 'g> {
    pub(super) fn new(topology: &'t Topology<'g>) -> Self {
        // Reserved markers are never printed as steps, however many there are.
        let unvisited_nodes = (0..topology.node_count())
            .filter(|&idx| {
                !matches!(
                    topology.role(idx),
                    NodeRole::Start | NodeRole::End | NodeRole::Fail
                )
            })
            .collect();
        Self {
            topology,
            text: String::new(),
            unvisited_nodes,
            unfollowed_links: (0..topology.link_count()).collect(),
            depth: 0,
        }
    }

    pub(super) fn run(mut self, drain_limit: usize) -> Result<Rendering, GraphError> {
        let to_follow = self.topology.links_from(self.topology.start, false);
        self.follow_links(to_follow, None, false)?;

        // Steps reachable only through transitions are still unvisited, e.g.
        // `aa 'foo'->bb '*'->cc && bb && cc` never links aa to bb directly.
        let mut heads = 0;
        while !self.unvisited_nodes.is_empty() && heads < drain_limit {
            let head = self.find_a_head();
            self.mark_visited(head);
            let to_follow = self.topology.links_from(head, false);
            debug!(head = %self.topology.describe(head), links = to_follow.len(), "draining unvisited node");
            // A head leading nowhere is already named by the transitions into it.
            if !to_follow.is_empty() {
                self.text.push_str(" && ");
                self.print_node(head);
                self.follow_links(to_follow, None, false)?;
            }
            heads += 1;
        }

        let truncated = !self.unvisited_nodes.is_empty();
        if truncated {
            warn!(
                limit = drain_limit,
                remaining = self.unvisited_nodes.len(),
                "drain limit reached with unvisited nodes left, graph is probably malformed"
            );
        }
        Ok(Rendering {
            text: self.text,
            truncated,
        })
    }

    /// Picks an unvisited node and walks back along unfollowed links until
    /// reaching one with no unfollowed predecessor.
    fn find_a_head(&self) -> NodeIdx {
        let topology = self.topology;
        let mut candidate = self.unvisited_nodes[0];
        let mut seen = AHashSet::from_iter([candidate]);
        let mut changed = true;
        while changed {
            changed = false;
            for &link in &self.unfollowed_links {
                if topology.target(link) == candidate {
                    let predecessor = topology.source(link);
                    if !seen.insert(predecessor) {
                        // Cycle: any node on it will do.
                        return candidate;
                    }
                    candidate = predecessor;
                    changed = true;
                }
            }
        }
        candidate
    }

    /// Emits text for `to_follow`, stopping when `terminate_at` is reached.
    ///
    /// A single link is a flow step, handled in place so long chains do not
    /// nest. Several links form a split, printed as `<..||..>` and then
    /// continued from the node where the branches rejoin.
    fn follow_links(
        &mut self,
        mut to_follow: Vec<LinkIdx>,
        terminate_at: Option<NodeIdx>,
        mut in_nested_split: bool,
    ) -> Result<(), GraphError> {
        self.descend()?;
        let topology = self.topology;
        while !to_follow.is_empty() {
            if to_follow.len() == 1 {
                let link = to_follow[0];
                let target = topology.target(link);
                if Some(target) == terminate_at {
                    break;
                }
                if !self.text.is_empty() {
                    self.text.push_str(" && ");
                }
                self.take_link(link);
                to_follow = self.visit_node(target, terminate_at)?;
                in_nested_split = false;
                continue;
            }

            if !in_nested_split && !self.text.is_empty() {
                self.text.push_str(" && ");
            }
            self.text.push('<');
            let end_of_split = topology.find_end_of_split(&to_follow)?;
            if to_follow.len() > 2 {
                let nested = topology.find_nested_splits(&to_follow, end_of_split)?;
                for (i, split) in nested.iter().enumerate() {
                    debug!(
                        nested_end = %topology.describe(split.end),
                        branches = split.links.len(),
                        "rendering nested split"
                    );
                    self.follow_links(split.links.clone(), Some(split.end), true)?;
                    to_follow.retain(|l| !split.links.contains(l));
                    self.text.push_str(" && ");
                    self.follow_node(split.end, Some(end_of_split))?;
                    if i + 1 < nested.len() {
                        self.text.push_str(" || ");
                    }
                }
                if !to_follow.is_empty() && !nested.is_empty() {
                    self.text.push_str(" || ");
                }
            }
            for (i, &link) in to_follow.iter().enumerate() {
                if i > 0 {
                    self.text.push_str(" || ");
                }
                self.take_link(link);
                self.follow_node(topology.target(link), Some(end_of_split))?;
            }
            self.text.push('>');

            if topology.role(end_of_split) == NodeRole::End || Some(end_of_split) == terminate_at {
                break;
            }
            self.mark_visited(end_of_split);
            // SYNC only joins branches; it never appears in the text.
            if topology.role(end_of_split) != NodeRole::Sync {
                self.text.push_str(" && ");
                self.print_node(end_of_split);
                let mut exits = topology.links_from(end_of_split, false);
                self.print_transitions(&mut exits, None);
            }
            to_follow = topology.links_from_without_transitions(end_of_split, false);
        }
        self.depth -= 1;
        Ok(())
    }

    fn take_link(&mut self, link: LinkIdx) {
        trace!(link = %self.topology.link(link), "following link");
        self.unfollowed_links.retain(|&l| l != link);
    }

    /// Prints `node` with its transitions, then follows its remaining links.
    fn follow_node(&mut self, node: NodeIdx, finish_at: Option<NodeIdx>) -> Result<(), GraphError> {
        self.descend()?;
        let to_follow = self.visit_node(node, finish_at)?;
        self.follow_links(to_follow, finish_at, false)?;
        self.depth -= 1;
        Ok(())
    }

    /// Prints `node` and its transitions, returning the flow links still to follow.
    fn visit_node(
        &mut self,
        node: NodeIdx,
        finish_at: Option<NodeIdx>,
    ) -> Result<Vec<LinkIdx>, GraphError> {
        let topology = self.topology;
        let mut to_follow = topology.links_from(node, false);

        // A step with several transition exits and one plain exit, whose
        // branches meet again at a real step (not END), must be wrapped as a
        // one-branch split. Otherwise, once re-parsed, each transition target
        // would run straight on to END instead of to the common step:
        // `<Import 'Error'->T1> && Backwards`.
        let mut common_target = None;
        if to_follow.len() > 1 && self.all_transitions_but_one(&to_follow) {
            match topology.find_end_of_split(&sort_transitions_first(topology, &to_follow)) {
                Ok(target) => {
                    if topology.role(target) != NodeRole::End && Some(target) != finish_at {
                        common_target = Some(target);
                    }
                }
                Err(GraphError::SplitEndNotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        match common_target {
            Some(target) => {
                self.text.push('<');
                self.print_node(node);
                self.print_transitions(&mut to_follow, Some(target));
                self.text.push('>');
            }
            None => {
                self.print_node(node);
                self.print_transitions(&mut to_follow, finish_at);
            }
        }
        Ok(to_follow)
    }

    fn print_node(&mut self, node: NodeIdx) {
        self.mark_visited(node);
        write_step(&mut self.text, self.topology.node(node));
    }

    /// Prints each transition in `to_follow` as ` 'status'->target` and removes
    /// it, leaving only flow links behind.
    ///
    /// A transition target that goes nowhere else (or only on to `finish_at`)
    /// is fully described here, so it is marked visited.
    fn print_transitions(&mut self, to_follow: &mut Vec<LinkIdx>, finish_at: Option<NodeIdx>) {
        let topology = self.topology;
        let (transitions, flows): (Vec<LinkIdx>, Vec<LinkIdx>) = to_follow
            .iter()
            .partition(|&&l| topology.is_transition(l));
        *to_follow = flows;

        for link in transitions {
            let target = topology.target(link);
            let status = topology.link(link).transition_name().unwrap_or_default();
            write_transition(&mut self.text, status, topology.node(target));
            self.unfollowed_links.retain(|&l| l != link);

            let onward = topology.links_from(target, false);
            let ends_here = onward.is_empty()
                || finish_at.is_some_and(|f| onward.iter().all(|&l| topology.target(l) == f));
            if ends_here {
                self.mark_visited(target);
            }
        }
    }

    fn all_transitions_but_one(&self, links: &[LinkIdx]) -> bool {
        self.topology.count_without_transitions(links) == 1
    }

    fn mark_visited(&mut self, node: NodeIdx) {
        if let Some(pos) = self.unvisited_nodes.iter().position(|&n| n == node) {
            self.unvisited_nodes.remove(pos);
        }
    }

    fn descend(&mut self) -> Result<(), GraphError> {
        self.depth += 1;
        if self.depth > self.topology.max_depth {
            return Err(GraphError::RecursionLimit {
                limit: self.topology.max_depth,
            });
        }
        Ok(())
    }
}

/// Orders transition links first (most recent first), then the plain links.
fn sort_transitions_first(topology: &Topology, links: &[LinkIdx]) -> Vec<LinkIdx> {
    let mut sorted = Vec::with_capacity(links.len());
    for &link in links {
        if topology.is_transition(link) {
            sorted.insert(0, link);
        } else {
            sorted.push(link);
        }
    }
    sorted
}
