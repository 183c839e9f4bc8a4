//! The forest of disjoint groups.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::slice;

use log::{debug, trace};

use super::{ByKey, Identity, Node};

/// A collection of disjoint groups of keyed nodes.
///
/// The forest tracks one representative per group, plus a cache from keys
/// to nodes that speeds up repeated [`find_by_id`](#method.find_by_id)
/// lookups. It does not own its nodes: callers create them, hand them to
/// [`make_set`](#method.make_set), and keep their own handles.
///
/// Operations never panic on a node that isn’t in the forest; they return
/// `None`, an empty vector, or `false` instead. Keys must be unique within
/// a forest, which is not checked (but see [`validate`](#method.validate)).
///
/// Dropping the forest [`clear`](#method.clear)s it.
///
/// # Examples
///
/// ```
/// use keyed_forest::{Forest, Node};
///
/// let mut forest: Forest = Forest::new();
/// let nodes: Vec<Node> = (1..=4u32).map(|i| Node::new(i.to_string())).collect();
/// for node in &nodes {
///     forest.make_set(node, true);
/// }
///
/// forest.union(&nodes[0], &nodes[1]);
/// forest.union(&nodes[2], &nodes[1]);
/// assert_eq!(2, forest.size());
/// assert!(forest.equiv(&nodes[0], &nodes[2]));
///
/// let group = forest.copy_set(&nodes[2]);
/// assert_eq!(vec!["1", "3", "2"], Forest::by_id(&group));
/// ```
pub struct Forest<Data = (), Id = ByKey> {
    pub(crate) sets: Vec<Node<Data, Id>>,
    cache: HashMap<String, Node<Data, Id>>,
}
// Invariant: every node in `sets` was a representative when it was added,
// and no union has since made it a child.

impl<Data, Id> Debug for Forest<Data, Id> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Forest(")?;
        formatter.debug_list().entries(self.sets.iter()).finish()?;
        write!(formatter, ")")
    }
}

impl<Data, Id> Default for Forest<Data, Id> {
    fn default() -> Self {
        Forest::new()
    }
}

impl<Data, Id> Drop for Forest<Data, Id> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<Data, Id> Forest<Data, Id> {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty forest with room for `capacity` groups.
    pub fn with_capacity(capacity: usize) -> Self {
        Forest {
            sets: Vec::with_capacity(capacity),
            cache: HashMap::new(),
        }
    }

    /// The number of disjoint groups.
    pub fn size(&self) -> usize {
        self.sets.len()
    }

    /// Does the forest have no groups?
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The current representatives, one per group.
    pub fn representatives(&self) -> slice::Iter<Node<Data, Id>> {
        self.sets.iter()
    }

    /// Forgets every group.
    ///
    /// Severs the parent and next links of each representative and empties
    /// the lookup cache. Every other member has its `next` link severed and
    /// its parent pointed straight at the old representative, so it no
    /// longer leads anywhere: [`find`](#method.find) on one of them returns
    /// `None`.
    pub fn clear(&mut self) {
        if self.sets.is_empty() && self.cache.is_empty() {
            return;
        }

        debug!("clearing forest of {} groups", self.sets.len());

        for root in self.sets.drain(..) {
            root.detach_group();
        }

        self.cache.clear();
    }

    /// Registers a group.
    ///
    /// If `singleton` is true, `node` becomes a group of its own: its own
    /// parent and its own next, with rank 0.
    ///
    /// Otherwise `node` must already be the representative of a wired-up
    /// group: its own parent, every member’s parent chain leading to it,
    /// and the members’ `next` links forming a circle through it. The
    /// wiring isn’t checked (use [`try_make_set`](#method.try_make_set)
    /// for that).
    pub fn make_set(&mut self, node: &Node<Data, Id>, singleton: bool) {
        if singleton {
            node.make_singleton();
        }

        trace!("make_set {:?} (singleton: {})", node, singleton);
        self.sets.push(node.clone());
    }

    /// Returns the keys of the given nodes, in order.
    pub fn by_id(nodes: &[Node<Data, Id>]) -> Vec<String> {
        nodes.iter().map(Node::key).collect()
    }

    // HELPERS

    fn forget(&mut self, root: &Node<Data, Id>) {
        if let Some(index) = self.sets.iter().position(|n| Node::ptr_eq(n, root)) {
            self.sets.remove(index);
        }
    }
}

impl<Data, Id: Identity<Data>> Forest<Data, Id> {
    /// Finds the representative of the group containing `node`.
    ///
    /// Returns `None` if `node` isn’t linked into a group. The result is the
    /// live representative, not a copy.
    ///
    /// Every node on the path is pointed directly at the representative.
    /// Afterward, if the representative’s rank exceeds 1, it is decreased by
    /// one to account for the shortened path. This happens on every call,
    /// including one made on the representative itself.
    pub fn find(&self, node: &Node<Data, Id>) -> Option<Node<Data, Id>> {
        let root = node.find_root()?;

        let rank = root.rank();
        if rank > 1 {
            root.set_rank(rank - 1);
        }

        Some(root)
    }

    /// Are the two nodes in the same group?
    pub fn equiv(&self, a: &Node<Data, Id>, b: &Node<Data, Id>) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(a), Some(b)) => a.is_equal(&b),
            _ => false,
        }
    }

    /// Joins the groups of the two nodes.
    ///
    /// Returns whether anything changed. That is, if the groups were
    /// different, it returns `true`, but if they were already the same, or
    /// either node isn’t in a group, then it returns `false`.
    ///
    /// The representative of higher rank absorbs the other. On a tie,
    /// `x`’s representative wins and its rank rises from 0 to 1 if it was
    /// 0. The two groups’ circular lists are spliced into one.
    pub fn union(&mut self, x: &Node<Data, Id>, y: &Node<Data, Id>) -> bool {
        let (a, b) = match (self.find(x), self.find(y)) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                trace!("union {:?} {:?}: not both in groups", x, y);
                return false;
            }
        };

        if a.is_equal(&b) {
            return false;
        }

        self.join(&a, &b);
        true
    }

    /// Looks up a node by key.
    ///
    /// Consults the cache first. On a miss, searches each group in turn:
    /// a representative with the key is cached and returned as is, while
    /// any other member with the key is returned (and cached) as a
    /// [`deep_clone`](struct.Node.html#method.deep_clone).
    ///
    /// The cache is never invalidated by later unions, so a cached result
    /// is a snapshot and may no longer match the forest.
    pub fn find_by_id(&mut self, key: &str) -> Option<Node<Data, Id>>
            where Data: Clone {
        if let Some(node) = self.cache.get(key) {
            return Some(node.clone());
        }

        let found = self.sets.iter().find_map(|root| {
            if root.key() == key {
                return Some(root.clone());
            }

            root.members()
                .skip(1)
                .find(|member| member.key() == key)
                .map(|member| member.deep_clone())
        })?;

        self.cache.insert(key.to_owned(), found.clone());
        Some(found)
    }

    /// Returns copies of every node in `node`’s group: the representative
    /// first, then the rest in circular-list order.
    ///
    /// Returns an empty vector if `node` isn’t in a group.
    pub fn copy_set(&self, node: &Node<Data, Id>) -> Vec<Node<Data, Id>>
            where Data: Clone {
        match self.find(node) {
            Some(root) => root.members().map(|n| n.deep_clone()).collect(),
            None => Vec::new(),
        }
    }

    /// Returns copies of every group, in the order of the representatives.
    pub fn groups(&self) -> Vec<Vec<Node<Data, Id>>>
            where Data: Clone {
        self.sets.iter()
            .map(|root| root.members().map(|n| n.deep_clone()).collect())
            .collect()
    }

    /// Stores a copy of each given node in the lookup cache under its key.
    ///
    /// [`Clone`](#impl-Clone) uses this so that a cloned forest’s cache
    /// shares nothing with the original’s.
    pub fn fill_cache(&mut self, cache: &HashMap<String, Node<Data, Id>>)
            where Data: Clone {
        debug!("filling cache with {} entries", cache.len());

        for (key, node) in cache {
            self.cache.insert(key.clone(), node.deep_clone());
        }
    }

    // HELPERS

    // PRECONDITION:
    //  - a and b are representatives of different groups
    fn join(&mut self, a: &Node<Data, Id>, b: &Node<Data, Id>) {
        a.splice(b);

        let rank_a = a.rank();
        let rank_b = b.rank();

        let (parent, child) = match rank_a.cmp(&rank_b) {
            Ordering::Less => (b, a),
            Ordering::Greater => (a, b),
            Ordering::Equal => {
                if rank_a == 0 {
                    a.set_rank(1);
                }
                (a, b)
            }
        };

        trace!("union: {:?} (rank {}) absorbs {:?} (rank {})",
               parent, parent.rank(), child, child.rank());

        child.set_parent(parent);
        self.forget(child);
    }
}

impl<Data: Clone, Id: Identity<Data>> Clone for Forest<Data, Id> {
    /// Copies every group into a new forest that shares no nodes with this
    /// one.
    ///
    /// In each copied group the members point directly at the copied
    /// representative, and the circular list keeps its order.
    fn clone(&self) -> Self {
        let mut forest = Forest::with_capacity(self.sets.len());

        for root in &self.sets {
            let new_root = root.deep_clone();
            let mut tail = new_root.clone();

            for member in root.members().skip(1) {
                let copy = member.deep_clone();
                copy.set_parent(&new_root);
                tail.set_next(&copy);
                tail = copy;
            }

            tail.set_next(&new_root);
            forest.make_set(&new_root, false);
        }

        forest.fill_cache(&self.cache);

        debug!("cloned forest of {} groups", forest.size());
        forest
    }
}
