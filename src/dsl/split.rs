use super::topology::{LinkIdx, NodeIdx, Topology};
use crate::error::GraphError;
use ahash::AHashSet;
use tracing::debug;

/// A group of split branches that rejoin at `end` before the enclosing split does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct NestedSplit {
    pub(super) end: NodeIdx,
    pub(super) links: Vec<LinkIdx>,
}

impl Topology<'_> {
    /// Finds the node where all of `links` converge.
    ///
    /// Walks forward from the first link's target, skipping over inner splits,
    /// until it reaches a node every other link also leads to.
    pub(super) fn find_end_of_split(&self, links: &[LinkIdx]) -> Result<NodeIdx, GraphError> {
        self.end_of_split(links, 0)
    }

    fn end_of_split(&self, links: &[LinkIdx], depth: usize) -> Result<NodeIdx, GraphError> {
        if depth > self.max_depth {
            return Err(GraphError::RecursionLimit {
                limit: self.max_depth,
            });
        }
        let Some((&first, others)) = links.split_first() else {
            return Err(GraphError::SplitEndNotFound {
                split_from: "<no branches>".to_string(),
            });
        };
        if others.is_empty() {
            return Ok(self.target(first));
        }

        let mut seen = AHashSet::new();
        let mut next = Some(self.target(first));
        while let Some(candidate) = next {
            if !seen.insert(candidate) {
                break;
            }
            if others.iter().all(|&l| self.found_in_chain(l, candidate)) {
                debug!(
                    split_from = %self.describe(self.source(first)),
                    split_end = %self.describe(candidate),
                    branches = links.len(),
                    "found end of split"
                );
                return Ok(candidate);
            }
            next = self.step_past(candidate, depth)?;
        }
        Err(GraphError::SplitEndNotFound {
            split_from: self.describe(self.source(first)),
        })
    }

    /// The next node along a chain, jumping straight to the end of any
    /// split that starts at `node`.
    fn step_past(&self, node: NodeIdx, depth: usize) -> Result<Option<NodeIdx>, GraphError> {
        let mut links = self.links_from(node, true);
        if links.is_empty() {
            return Ok(None);
        }
        // With at most one plain link every way out meets again further on.
        if self.count_without_transitions(&links) <= 1 {
            return Ok(Some(self.target(links[0])));
        }
        let mut seen = AHashSet::new();
        let mut candidate = node;
        while self.count_without_transitions(&links) > 1 {
            candidate = self.end_of_split(&links, depth + 1)?;
            if !seen.insert(candidate) {
                return Err(GraphError::SplitEndNotFound {
                    split_from: self.describe(node),
                });
            }
            links = self.links_from(candidate, true);
        }
        Ok(Some(candidate))
    }

    /// Discovers groups among `links` that rejoin before `end`, ordered
    /// innermost (earliest converging) first.
    ///
    /// For `<<a || b> && c || d>` the three links leaving the split yield one
    /// group, `{a, b}` ending at `c`.
    pub(super) fn find_nested_splits(
        &self,
        links: &[LinkIdx],
        end: NodeIdx,
    ) -> Result<Vec<NestedSplit>, GraphError> {
        let mut nested: Vec<NestedSplit> = Vec::new();
        for &link in links {
            let mut seen = AHashSet::new();
            let mut successor = Some(self.target(link));
            while let Some(node) = successor {
                if node == end || !seen.insert(node) {
                    break;
                }
                if let Some(common) = self.links_reaching(links, link, node) {
                    self.record_nested_split(&mut nested, node, common);
                }
                successor = self.step_past(node, 0)?;
            }
        }
        self.order_innermost_first(&mut nested);
        Ok(nested)
    }

    /// The links (besides `known`, which is appended last) that lead to
    /// `node`, or `None` if no other link does.
    fn links_reaching(
        &self,
        links: &[LinkIdx],
        known: LinkIdx,
        node: NodeIdx,
    ) -> Option<Vec<LinkIdx>> {
        let mut reaching: Vec<LinkIdx> = links
            .iter()
            .copied()
            .filter(|&l| l != known && self.found_in_chain(l, node))
            .collect();
        if reaching.is_empty() {
            return None;
        }
        reaching.push(known);
        Some(reaching)
    }

    fn record_nested_split(&self, nested: &mut Vec<NestedSplit>, end: NodeIdx, links: Vec<LinkIdx>) {
        let mut insert = true;
        let mut superseded = None;
        for split in nested.iter().filter(|s| same_links(&s.links, &links)) {
            if self.is_successor(split.end, end) {
                // Same branches, later node: the known end is the real one.
                insert = false;
            } else {
                superseded = Some(split.end);
            }
        }
        if !insert {
            return;
        }
        if let Some(old_end) = superseded {
            nested.retain(|s| s.end != old_end);
        }
        match nested.iter_mut().find(|s| s.end == end) {
            Some(existing) => existing.links = links,
            None => nested.push(NestedSplit { end, links }),
        }
    }

    /// Stable insertion sort: a split moves ahead of any split whose end it reaches.
    fn order_innermost_first(&self, nested: &mut [NestedSplit]) {
        for i in 1..nested.len() {
            let mut j = i;
            while j > 0 && self.is_successor(nested[j].end, nested[j - 1].end) {
                nested.swap(j, j - 1);
                j -= 1;
            }
        }
    }
}

fn same_links(a: &[LinkIdx], b: &[LinkIdx]) -> bool {
    a.iter().all(|l| b.contains(l)) && b.iter().all(|l| a.contains(l))
}
