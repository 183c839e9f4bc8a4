/// A broken invariant found by [`Forest::validate`](struct.Forest.html#method.validate)
/// or [`Forest::try_make_set`](struct.Forest.html#method.try_make_set).
///
/// The ordinary forest operations never report these; they trust the
/// caller to keep keys unique and to pre-wire groups correctly.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ForestError {
    /// A node the forest tracks as a representative has another node as
    /// its parent.
    #[error("node {key:?} is tracked as a representative but is not its own parent")]
    NotRepresentative {
        /// Key of the offending node.
        key: String,
    },

    /// A node in a group is missing its parent or next link.
    #[error("node {key:?} has a detached link")]
    Detached {
        /// Key of the offending node.
        key: String,
    },

    /// Following parent links from a node never reaches a representative.
    #[error("parent links from node {key:?} form a cycle")]
    ParentCycle {
        /// Key of the node the walk started from.
        key: String,
    },

    /// The `next` list of a group loops back to one of its members instead
    /// of to its representative.
    #[error("the next list of group {key:?} does not return to its representative")]
    OpenCycle {
        /// Key of the group’s representative.
        key: String,
    },

    /// A node on one group’s `next` list belongs to another group.
    #[error("node {key:?} is on the list of group {representative:?} but belongs elsewhere")]
    ForeignMember {
        /// Key of the offending node.
        key: String,
        /// Key of the representative whose list it is on.
        representative: String,
    },

    /// Two nodes in the forest share a key.
    #[error("key {key:?} appears more than once")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
}
