//! Checked construction and invariant checking.

use std::collections::HashSet;

use log::debug;

use super::{Forest, ForestError, Identity, Node};

impl<Data, Id: Identity<Data>> Forest<Data, Id> {
    /// Checks every group for broken invariants.
    ///
    /// Walks each group’s parent and next links without modifying them and
    /// reports the first problem found: a tracked node that isn’t a
    /// representative, a detached link, a parent cycle, a `next` list that
    /// doesn’t close at its representative, a member that belongs to some
    /// other group, or a key used twice.
    pub fn validate(&self) -> Result<(), ForestError> {
        let mut keys = HashSet::new();

        for root in &self.sets {
            check_group(root, &mut keys)?;
        }

        Ok(())
    }

    /// Like [`make_set`](#method.make_set), but refuses to register a
    /// group that would break the forest’s invariants.
    ///
    /// The forest must itself be valid. For a singleton, the node’s key
    /// must be new to the forest. Otherwise the whole pre-wired group is
    /// checked as [`validate`](#method.validate) would, and none of its
    /// keys may already be in the forest. Nothing is changed on error.
    pub fn try_make_set(&mut self, node: &Node<Data, Id>, singleton: bool)
                        -> Result<(), ForestError> {

        let mut keys = HashSet::new();
        for root in &self.sets {
            check_group(root, &mut keys)?;
        }

        if singleton {
            let key = node.key();
            if keys.contains(&key) {
                debug!("try_make_set: rejecting duplicate key {:?}", key);
                return Err(ForestError::DuplicateKey { key: key });
            }
        } else {
            check_group(node, &mut keys)?;
        }

        self.make_set(node, singleton);
        Ok(())
    }
}

// Checks one group, adding its keys to `keys`.
fn check_group<Data, Id>(root: &Node<Data, Id>, keys: &mut HashSet<String>)
                         -> Result<(), ForestError>
        where Id: Identity<Data> {

    if !root.is_representative() {
        let key = root.key();
        return Err(if root.is_detached() {
            ForestError::Detached { key: key }
        } else {
            ForestError::NotRepresentative { key: key }
        });
    }

    let mut visited = HashSet::new();
    let mut cursor = root.clone();

    loop {
        if !visited.insert(cursor.addr()) {
            return Err(ForestError::OpenCycle { key: root.key() });
        }

        let key = cursor.key();

        let owner = peek_root(&cursor)?;
        if !owner.is_equal(root) {
            return Err(ForestError::ForeignMember {
                key: key,
                representative: root.key(),
            });
        }

        if !keys.insert(key.clone()) {
            return Err(ForestError::DuplicateKey { key: key });
        }

        cursor = match cursor.next() {
            Some(next) => next,
            None => return Err(ForestError::Detached { key: key }),
        };

        if Node::ptr_eq(&cursor, root) {
            return Ok(());
        }
    }
}

// Follows parent links to the representative without compressing them.
fn peek_root<Data, Id>(node: &Node<Data, Id>) -> Result<Node<Data, Id>, ForestError>
        where Id: Identity<Data> {

    let mut visited = HashSet::new();
    let mut current = node.clone();

    while !current.is_representative() {
        if !visited.insert(current.addr()) {
            return Err(ForestError::ParentCycle { key: node.key() });
        }

        current = match current.parent() {
            Some(parent) => parent,
            None => return Err(ForestError::Detached { key: current.key() }),
        };
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Wires `members` into a group under `root`.
    fn wire(root: &Node, members: &[&Node]) {
        root.set_parent(root);
        let mut tail = root.clone();
        for member in members {
            member.set_parent(root);
            tail.set_next(member);
            tail = (*member).clone();
        }
        tail.set_next(root);
    }

    #[test]
    fn valid_forest() {
        let mut forest = Forest::new();
        let n: Vec<Node> = (0..6u32).map(|i| Node::new(i.to_string())).collect();
        for node in &n {
            forest.try_make_set(node, true).unwrap();
        }
        forest.union(&n[0], &n[1]);
        forest.union(&n[2], &n[3]);
        forest.union(&n[3], &n[1]);
        assert_eq!(Ok(()), forest.validate());
    }

    #[test]
    fn duplicate_singleton() {
        let mut forest: Forest = Forest::new();
        forest.try_make_set(&Node::new("a"), true).unwrap();

        let again = Node::new("a");
        assert_eq!(Err(ForestError::DuplicateKey { key: "a".to_owned() }),
                   forest.try_make_set(&again, true));
        assert_eq!(1, forest.size());
        assert!(again.is_detached());
    }

    #[test]
    fn duplicate_across_groups() {
        let mut forest: Forest = Forest::new();
        forest.make_set(&Node::new("a"), true);
        forest.make_set(&Node::new("a"), true);
        assert_eq!(Err(ForestError::DuplicateKey { key: "a".to_owned() }),
                   forest.validate());
    }

    #[test]
    fn prewired_group() {
        let root: Node = Node::new("n");
        let n1 = Node::new("n1");
        let n2 = Node::new("n2");
        wire(&root, &[&n1, &n2]);

        let mut forest = Forest::new();
        assert_eq!(Ok(()), forest.try_make_set(&root, false));
        assert_eq!(1, forest.size());
        assert_eq!(Ok(()), forest.validate());
    }

    #[test]
    fn open_cycle() {
        let root: Node = Node::new("n");
        let n1 = Node::new("n1");
        let n2 = Node::new("n2");
        wire(&root, &[&n1, &n2]);
        n2.set_next(&n1);

        let mut forest = Forest::new();
        assert_eq!(Err(ForestError::OpenCycle { key: "n".to_owned() }),
                   forest.try_make_set(&root, false));
        assert!(forest.is_empty());
    }

    #[test]
    fn foreign_member() {
        let root: Node = Node::new("n");
        let other: Node = Node::new("other");
        let n1 = Node::new("n1");
        wire(&root, &[&n1]);
        other.set_parent(&other);
        n1.set_parent(&other);

        let mut forest = Forest::new();
        assert_eq!(Err(ForestError::ForeignMember {
                       key: "n1".to_owned(),
                       representative: "n".to_owned(),
                   }),
                   forest.try_make_set(&root, false));
    }

    #[test]
    fn parent_cycle() {
        let root: Node = Node::new("n");
        let n1 = Node::new("n1");
        let n2 = Node::new("n2");
        wire(&root, &[&n1, &n2]);
        n1.set_parent(&n2);
        n2.set_parent(&n1);

        let mut forest = Forest::new();
        forest.make_set(&root, false);
        assert_eq!(Err(ForestError::ParentCycle { key: "n1".to_owned() }),
                   forest.validate());

        n1.set_parent(&root);
        n2.set_parent(&root);
    }

    #[test]
    fn not_representative() {
        let a: Node = Node::new("a");
        let b: Node = Node::new("b");
        let mut forest = Forest::new();
        forest.make_set(&a, true);
        forest.make_set(&b, true);
        a.set_parent(&b);
        assert_eq!(Err(ForestError::NotRepresentative { key: "a".to_owned() }),
                   forest.validate());
    }

    #[test]
    fn detached_group() {
        let a: Node = Node::new("a");
        let mut forest = Forest::new();
        assert_eq!(Err(ForestError::Detached { key: "a".to_owned() }),
                   forest.try_make_set(&a, false));
    }

    #[test]
    fn error_messages() {
        let err = ForestError::ForeignMember {
            key: "x".to_owned(),
            representative: "r".to_owned(),
        };
        assert_eq!(r#"node "x" is on the list of group "r" but belongs elsewhere"#,
                   err.to_string());
    }
}
