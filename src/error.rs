use std::error::Error;
use std::fmt::{Display, Formatter};

/// Possible errors that arise due to issues with the input graphs, trees or
/// attribute arrays handed to the hierarchy algorithms.
///
/// All failures are deterministic rejections of the provided input, raised at
/// the point of detection. None of them are transient; retrying a call with
/// the same input will fail identically.
#[derive(Debug, Clone)]
pub enum HierarchyError {
    /// Mismatched array lengths, out-of-range indices or non-finite weights.
    InvalidInput(String),
    /// A spanning-tree based builder was given a graph with no spanning tree.
    DisconnectedGraph(String),
    /// A deletion mask that cannot legally be applied to the tree.
    InvalidDeletionMask(String),
    /// An attribute array that violates the non-decreasing invariant assumed
    /// by extinction and persistence computation.
    NonMonotonicAttribute(String),
}

impl Error for HierarchyError {}

impl Display for HierarchyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            HierarchyError::InvalidInput(msg) => format!("Invalid input: {msg}"),
            HierarchyError::DisconnectedGraph(msg) => {
                format!("The input graph is not connected: {msg}")
            }
            HierarchyError::InvalidDeletionMask(msg) => {
                format!("Invalid deletion mask: {msg}")
            }
            HierarchyError::NonMonotonicAttribute(msg) => {
                format!("Attribute is not non-decreasing: {msg}")
            }
        };
        write!(f, "{message}")
    }
}
