use super::Record;

/// The equality test that decides whether two nodes denote the same node.
///
/// The forest uses it wherever it compares nodes: to recognize a
/// representative (a node whose parent equals itself), to decide whether a
/// union has anything to do, and to know when a walk around a group’s
/// `next` list is complete.
///
/// Implementations must be reflexive and symmetric. Keys are expected to be
/// unique within a forest; an identity that looks past the key (such as
/// [`ByKeyAndValue`](struct.ByKeyAndValue.html)) lets two nodes share a key
/// and still be told apart.
pub trait Identity<Data> {
    /// Are the two records the same node?
    fn is_equal(a: &Record<Data>, b: &Record<Data>) -> bool;
}

/// Nodes are equal when their keys are equal. This is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByKey;

impl<Data> Identity<Data> for ByKey {
    #[inline]
    fn is_equal(a: &Record<Data>, b: &Record<Data>) -> bool {
        a.key == b.key
    }
}

/// Nodes are equal when both their keys and their values are equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByKeyAndValue;

impl<Data> Identity<Data> for ByKeyAndValue {
    #[inline]
    fn is_equal(a: &Record<Data>, b: &Record<Data>) -> bool {
        a.key == b.key && a.value == b.value
    }
}
