use std::fmt;
use delaunator::Point;

use crate::utils;

/// A parabolic arc of the beach line, a leaf of the tree.
#[derive(Debug, Clone)]
pub(crate) struct Arc {
    /// Index of the site that is the focus of this arc.
    pub site: usize,

    /// Index of the circle event predicting this arc's removal, if any.
    pub circle_event: Option<usize>,

    /// Arc to the left.
    pub prev: Option<usize>,

    /// Arc to the right.
    pub next: Option<usize>,

    /// Edge traced by the breakpoint on the left side.
    pub s0: Option<usize>,

    /// Edge traced by the breakpoint on the right side.
    pub s1: Option<usize>,
}

impl Arc {
    fn new(site: usize) -> Self {
        Self {
            site,
            circle_event: None,
            prev: None,
            next: None,
            s0: None,
            s1: None,
        }
    }
}

/// Intersection between the arc of focus `a` (left) and the arc of focus `b` (right), an internal node of the tree.
///
/// Its position is not stored, it depends on the sweep line and is recalculated when needed.
#[derive(Debug, Clone)]
pub(crate) struct Breakpoint {
    pub a: usize,
    pub b: usize,
    pub left: usize,
    pub right: usize,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Arc(Arc),
    Breakpoint(Breakpoint),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub parent: Option<usize>,
    pub kind: NodeKind,
}

/// The beach line: a binary tree whose leaves are arcs ordered from left to right and whose internal nodes are breakpoints.
///
/// Nodes live in an arena and refer to each other by index. Removed nodes are left behind detached, so indices stay valid for the
/// whole sweep. Arcs are also linked to their neighbors through [Arc::prev] and [Arc::next].
#[derive(Default)]
pub(crate) struct BeachLine {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl BeachLine {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[cfg(test)]
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    #[inline]
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.nodes[node].parent
    }

    /// Installs the arc of the very first site as the root of the tree.
    pub fn add_first_arc(&mut self, site: usize) -> usize {
        if let Some(root) = self.root {
            panic!("Beach line already has root node {}, cannot add first arc for site {}", root, site);
        }

        let arc = self.add_arc(site);
        self.root = Some(arc);
        arc
    }

    /// Creates a detached arc.
    pub fn add_arc(&mut self, site: usize) -> usize {
        self.nodes.push(Node {
            parent: None,
            kind: NodeKind::Arc(Arc::new(site)),
        });
        self.nodes.len() - 1
    }

    /// Creates a detached breakpoint between foci `a` and `b`, adopting `left` and `right` as children.
    pub fn add_breakpoint(&mut self, a: usize, b: usize, left: usize, right: usize) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            parent: None,
            kind: NodeKind::Breakpoint(Breakpoint { a, b, left, right }),
        });
        self.nodes[left].parent = Some(index);
        self.nodes[right].parent = Some(index);
        index
    }

    /// Puts `new` in the position `old` had under `parent`, or as the root if `parent` is None.
    ///
    /// `parent` must be read before `old` is adopted by another node.
    pub fn replace(&mut self, parent: Option<usize>, old: usize, new: usize) {
        match parent {
            Some(parent) => {
                let breakpoint = self.breakpoint_mut(parent);
                if breakpoint.left == old {
                    breakpoint.left = new;
                } else if breakpoint.right == old {
                    breakpoint.right = new;
                } else {
                    panic!("Node {} is not a child of {}", old, parent);
                }
            },
            None => self.root = Some(new),
        }

        self.nodes[new].parent = parent;
    }

    pub fn arc(&self, node: usize) -> &Arc {
        match &self.nodes[node].kind {
            NodeKind::Arc(arc) => arc,
            NodeKind::Breakpoint(_) => panic!("Expected node {} to be an arc, found a breakpoint", node),
        }
    }

    pub fn arc_mut(&mut self, node: usize) -> &mut Arc {
        match &mut self.nodes[node].kind {
            NodeKind::Arc(arc) => arc,
            NodeKind::Breakpoint(_) => panic!("Expected node {} to be an arc, found a breakpoint", node),
        }
    }

    pub fn breakpoint(&self, node: usize) -> &Breakpoint {
        match &self.nodes[node].kind {
            NodeKind::Breakpoint(breakpoint) => breakpoint,
            NodeKind::Arc(_) => panic!("Expected node {} to be a breakpoint, found an arc", node),
        }
    }

    pub fn breakpoint_mut(&mut self, node: usize) -> &mut Breakpoint {
        match &mut self.nodes[node].kind {
            NodeKind::Breakpoint(breakpoint) => breakpoint,
            NodeKind::Arc(_) => panic!("Expected node {} to be a breakpoint, found an arc", node),
        }
    }

    /// Whether `node` is the left child of its parent.
    pub fn is_left_child(&self, node: usize) -> bool {
        match self.nodes[node].parent {
            Some(parent) => self.breakpoint(parent).left == node,
            None => false,
        }
    }

    /// Finds the arc right above `point` when the sweep line is at `point.y`.
    pub fn get_above_arc(&self, point: &Point, sites: &[Point]) -> usize {
        let mut node = self.root.unwrap_or_else(|| panic!("Beach line is empty, no arc above {:?}", point));

        while let NodeKind::Breakpoint(breakpoint) = &self.nodes[node].kind {
            let x = utils::breakpoint(&sites[breakpoint.a], &sites[breakpoint.b], point.y).x;
            node = if point.x < x {
                breakpoint.left
            } else {
                breakpoint.right
            };
        }

        node
    }

    /// Leftmost arc of the subtree rooted at `node`.
    pub fn find_min(&self, mut node: usize) -> usize {
        while let NodeKind::Breakpoint(breakpoint) = &self.nodes[node].kind {
            node = breakpoint.left;
        }
        node
    }

    /// Rightmost arc of the subtree rooted at `node`.
    pub fn find_max(&self, mut node: usize) -> usize {
        while let NodeKind::Breakpoint(breakpoint) = &self.nodes[node].kind {
            node = breakpoint.right;
        }
        node
    }

    /// Leftmost arc of the beach line.
    pub fn head(&self) -> Option<usize> {
        self.root.map(|root| self.find_min(root))
    }

    /// Takes `arc` out of the tree. Its sibling takes the place of their parent breakpoint.
    ///
    /// The prev/next links are left for the caller to rewire.
    pub fn remove_arc(&mut self, arc: usize) {
        let parent = self.nodes[arc].parent
            .unwrap_or_else(|| panic!("Cannot remove arc {}, it is the root of the beach line", arc));

        let sibling = {
            let breakpoint = self.breakpoint(parent);
            if breakpoint.left == arc {
                breakpoint.right
            } else {
                breakpoint.left
            }
        };

        let grandparent = self.nodes[parent].parent;
        self.replace(grandparent, parent, sibling);
        self.nodes[arc].parent = None;
        self.nodes[parent].parent = None;

        self.refresh_ancestors(sibling);
    }

    /// Recalculates the foci of every breakpoint above `node`, after the arcs under it changed.
    pub fn refresh_ancestors(&mut self, mut node: usize) {
        while let Some(parent) = self.nodes[node].parent {
            if self.is_left_child(node) {
                let left = self.breakpoint(parent).left;
                let a = self.arc(self.find_max(left)).site;
                self.breakpoint_mut(parent).a = a;
            } else {
                let right = self.breakpoint(parent).right;
                let b = self.arc(self.find_min(right)).site;
                self.breakpoint_mut(parent).b = b;
            }

            node = parent;
        }
    }

    /// Arcs from left to right, following the linked list.
    pub fn iter_arcs(&self) -> impl Iterator<Item = usize> + '_ {
        let mut next = self.head();
        std::iter::from_fn(move || {
            let current = next?;
            next = self.arc(current).next;
            Some(current)
        })
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, node: usize, depth: usize) -> fmt::Result {
        match &self.nodes[node].kind {
            NodeKind::Breakpoint(breakpoint) => {
                self.fmt_node(f, breakpoint.left, depth + 1)?;
                writeln!(f, "{:indent$}[{}, {}]", "", breakpoint.a, breakpoint.b, indent = depth * 2)?;
                self.fmt_node(f, breakpoint.right, depth + 1)
            },
            NodeKind::Arc(arc) => writeln!(f, "{:indent$}({})", "", arc.site, indent = depth * 2),
        }
    }
}

impl fmt::Debug for BeachLine {
    /// Prints the tree in order, one node per line, indented by depth.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.fmt_node(f, root, 0),
            None => writeln!(f, "<empty>"),
        }
    }
}
