//! Keyed nodes with parent and next links.

use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::marker::PhantomData;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{ByKey, Identity};

/// A scalar payload carried by a node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Number(n) => write!(formatter, "{}", n),
            Value::Text(ref s) => write!(formatter, "{}", s),
        }
    }
}

/// The scalar contents of a node: everything except its rank and links.
///
/// This is what an [`Identity`](trait.Identity.html) compares.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record<Data = ()> {
    /// The node’s key, unique within a forest.
    pub key: String,
    /// Optional scalar payload.
    pub value: Option<Value>,
    /// Optional opaque payload, never looked at by the forest.
    pub data: Option<Data>,
}

impl<Data> Record<Data> {
    /// Creates a record with only a key.
    pub fn new<K: Into<String>>(key: K) -> Self {
        Record {
            key: key.into(),
            value: None,
            data: None,
        }
    }
}

/// A shared handle to a forest node.
///
/// Cloning a `Node` clones the handle, not the node; use
/// [`deep_clone`](#method.deep_clone) for an independent copy. Two handles
/// compare equal (`==`) when the node’s `Id` says the nodes are the same,
/// which by default means their keys match; use
/// [`ptr_eq`](#method.ptr_eq) to ask whether two handles are the same node.
///
/// A node has two links:
///
///  - `parent` points toward the representative of its group, and the
///    representative points to itself;
///
///  - `next` threads every member of the group onto a circular list.
///
/// A fresh node has neither; [`Forest::make_set`](struct.Forest.html#method.make_set)
/// turns it into a singleton group, or the links can be wired by hand with
/// [`set_parent`](#method.set_parent) and [`set_next`](#method.set_next)
/// to build a group in advance.
pub struct Node<Data = (), Id = ByKey>(pub(crate) Rc<RefCell<NodeImpl<Data, Id>>>);

pub(crate) struct NodeImpl<Data, Id> {
    record: Record<Data>,
    rank: u32,
    parent: Link<Data, Id>,
    next: Link<Data, Id>,
    identity: PhantomData<Id>,
}

// A self-link is `Own` rather than a handle to the node itself, so that a
// singleton holds no reference cycle.
pub(crate) enum Link<Data, Id> {
    Detached,
    Own,
    To(Node<Data, Id>),
}

use self::Link::*;

impl<Data, Id> Clone for Node<Data, Id> {
    fn clone(&self) -> Self {
        Node(Rc::clone(&self.0))
    }
}

impl<Data, Id> Debug for Node<Data, Id> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(node) => write!(formatter, "Node({:?})", node.record.key),
            Err(_) => write!(formatter, "Node({:p})", self.0),
        }
    }
}

impl<Data, Id: Identity<Data>> PartialEq for Node<Data, Id> {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl<Data, Id> Node<Data, Id> {
    /// Creates a detached node with the given key.
    pub fn new<K: Into<String>>(key: K) -> Self {
        Self::from_record(Record::new(key))
    }

    /// Creates a detached node with a key and a scalar value.
    pub fn with_value<K, V>(key: K, value: V) -> Self
            where K: Into<String>, V: Into<Value> {
        let mut record = Record::new(key);
        record.value = Some(value.into());
        Self::from_record(record)
    }

    /// Creates a detached node with a key and opaque data.
    pub fn with_data<K: Into<String>>(key: K, data: Data) -> Self {
        let mut record = Record::new(key);
        record.data = Some(data);
        Self::from_record(record)
    }

    /// Creates a detached node from a record.
    pub fn from_record(record: Record<Data>) -> Self {
        Node(Rc::new(RefCell::new(NodeImpl {
            record: record,
            rank: 0,
            parent: Detached,
            next: Detached,
            identity: PhantomData,
        })))
    }

    /// Are the two handles the same node?
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub(crate) fn addr(&self) -> usize {
        &*self.0 as *const _ as usize
    }

    /// The node’s key.
    pub fn key(&self) -> String {
        self.0.borrow().record.key.clone()
    }

    /// The node’s scalar value, if any.
    pub fn value(&self) -> Option<Value> {
        self.0.borrow().record.value.clone()
    }

    /// Replaces the node’s scalar value, returning the old one.
    pub fn set_value(&self, value: Option<Value>) -> Option<Value> {
        use std::mem::replace;
        replace(&mut self.0.borrow_mut().record.value, value)
    }

    /// Returns a clone of the node’s data.
    pub fn clone_data(&self) -> Option<Data>
            where Data: Clone {
        self.0.borrow().record.data.clone()
    }

    /// Replaces the node’s data, returning the old data.
    pub fn replace_data(&self, new: Option<Data>) -> Option<Data> {
        use std::mem::replace;
        self.map_data(|data| replace(data, new))
    }

    /// Allows modifying the node’s data in place.
    pub fn map_data<R, F>(&self, f: F) -> R
            where F: FnOnce(&mut Option<Data>) -> R {
        f(&mut self.0.borrow_mut().record.data)
    }

    /// Returns a copy of the node’s key, value and data.
    pub fn record(&self) -> Record<Data>
            where Data: Clone {
        self.0.borrow().record.clone()
    }

    /// The node’s rank. Only meaningful for a representative.
    pub fn rank(&self) -> u32 {
        self.0.borrow().rank
    }

    /// Sets the node’s rank.
    pub fn set_rank(&self, rank: u32) {
        self.0.borrow_mut().rank = rank;
    }

    /// The node’s parent, or `None` if it has not been linked.
    ///
    /// A representative returns itself.
    pub fn parent(&self) -> Option<Self> {
        self.0.borrow().parent.resolve(self)
    }

    /// Links the node to a parent. Passing the node itself makes it a
    /// representative.
    pub fn set_parent(&self, parent: &Self) {
        let link = self.link_to(parent);
        self.0.borrow_mut().parent = link;
    }

    /// The node after this one on its group’s circular list, or `None` if
    /// it has not been linked.
    pub fn next(&self) -> Option<Self> {
        self.0.borrow().next.resolve(self)
    }

    /// Links the node to the following node on its group’s circular list.
    pub fn set_next(&self, next: &Self) {
        let link = self.link_to(next);
        self.0.borrow_mut().next = link;
    }

    /// Has the node no parent link?
    pub fn is_detached(&self) -> bool {
        match self.0.borrow().parent {
            Detached => true,
            _ => false,
        }
    }

    // HELPERS

    fn link_to(&self, target: &Self) -> Link<Data, Id> {
        if Self::ptr_eq(self, target) { Own } else { To(target.clone()) }
    }

    // Makes the node a singleton group of rank 0.
    pub(crate) fn make_singleton(&self) {
        let mut node = self.0.borrow_mut();
        node.parent = Own;
        node.next = Own;
        node.rank = 0;
    }

    // Severs both links of a representative, then walks its circular list
    // severing each member's `next` link and pointing its parent straight
    // at the representative. No member is left holding a long chain of
    // `Rc`s, so dropping the group never recurses more than one level.
    pub(crate) fn detach_group(&self) {
        let mut cursor = self.next();
        {
            let mut node = self.0.borrow_mut();
            node.parent = Detached;
            node.next = Detached;
        }

        while let Some(member) = cursor {
            if Self::ptr_eq(&member, self) {
                break;
            }

            cursor = member.next();
            let link = member.link_to(self);
            let mut node = member.0.borrow_mut();
            node.parent = link;
            node.next = Detached;
        }
    }

    // Swaps the `next` links of two nodes. When the nodes are on different
    // circular lists, this splices the lists into one.
    pub(crate) fn splice(&self, other: &Self) {
        let mine = self.next();
        let theirs = other.next();
        let mine = mine.map_or(Detached, |n| other.link_to(&n));
        let theirs = theirs.map_or(Detached, |n| self.link_to(&n));
        self.0.borrow_mut().next = theirs;
        other.0.borrow_mut().next = mine;
    }

    // Points `parent` straight at `root`, as path compression does.
    fn compress_to(&self, root: &Self) {
        let link = self.link_to(root);
        self.0.borrow_mut().parent = link;
    }
}

impl<Data, Id: Identity<Data>> Node<Data, Id> {
    /// Is `other` the same node as `self`, according to `Id`?
    ///
    /// A handle is always equal to itself.
    pub fn is_equal(&self, other: &Self) -> bool {
        if Self::ptr_eq(self, other) {
            return true;
        }

        let a = self.0.borrow();
        let b = other.0.borrow();
        Id::is_equal(&a.record, &b.record)
    }

    /// Is the node the representative of its group, i.e., is its parent
    /// equal to itself?
    pub fn is_representative(&self) -> bool {
        match self.0.borrow().parent {
            Own => return true,
            Detached => return false,
            To(_) => (),
        }

        self.parent().map_or(false, |parent| self.is_equal(&parent))
    }

    /// Makes an independent copy of the node.
    ///
    /// The copy has the same key, value, data and rank. It is its own
    /// parent and its own next, forming a group of one; callers that copy
    /// a whole group relink the copies themselves.
    pub fn deep_clone(&self) -> Self
            where Data: Clone {
        let node = self.0.borrow();
        Node(Rc::new(RefCell::new(NodeImpl {
            record: node.record.clone(),
            rank: node.rank,
            parent: Own,
            next: Own,
            identity: PhantomData,
        })))
    }

    /// Walks the circular `next` list starting at this node.
    ///
    /// Yields this node first and stops before reaching a node equal to it
    /// again, or at a node with no `next` link.
    pub fn members(&self) -> Members<Data, Id> {
        Members {
            start: self.clone(),
            cursor: Some(self.clone()),
        }
    }

    // Finds the representative by following parent links, then points every
    // node on the way straight at it. Returns `None` if the walk reaches a
    // detached node, in which case nothing is changed.
    pub(crate) fn find_root(&self) -> Option<Self> {
        let mut path = Vec::new();
        let mut current = self.clone();

        let root = loop {
            let parent = match current.0.borrow().parent {
                Own => None,
                Detached => return None,
                To(ref parent) => Some(parent.clone()),
            };

            match parent {
                Some(parent) if !current.is_equal(&parent) => {
                    path.push(current);
                    current = parent;
                }
                _ => break current,
            }
        };

        for node in &path {
            node.compress_to(&root);
        }

        Some(root)
    }
}

impl<Data, Id> Link<Data, Id> {
    fn resolve(&self, owner: &Node<Data, Id>) -> Option<Node<Data, Id>> {
        match *self {
            Detached => None,
            Own => Some(owner.clone()),
            To(ref node) => Some(node.clone()),
        }
    }
}

/// Iterator over the members of a group, in `next` order.
///
/// Created by [`Node::members`](struct.Node.html#method.members).
pub struct Members<Data = (), Id = ByKey> {
    start: Node<Data, Id>,
    cursor: Option<Node<Data, Id>>,
}

impl<Data, Id: Identity<Data>> Iterator for Members<Data, Id> {
    type Item = Node<Data, Id>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.take()?;
        let start = &self.start;
        self.cursor = current.next().filter(|next| !next.is_equal(start));
        Some(current)
    }
}

impl<Data, Id> Debug for Members<Data, Id> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Members({:?})", self.start)
    }
}
