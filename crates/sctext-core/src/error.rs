//! Error types for graph construction.

use thiserror::Error;

use crate::{element::Tag, identifier::ElementId};

/// Structural-integrity errors detected while building a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("element `{0}` is defined more than once")]
    DuplicateElement(ElementId),

    #[error("element `{referrer}` references unknown element `{missing}`")]
    UnknownElement {
        referrer: ElementId,
        missing: ElementId,
    },

    #[error("connector `{0}` uses itself as source or target")]
    SelfReferencingConnector(ElementId),

    #[error("element `{parent}` is a {tag}, not a contour")]
    NotAContour { parent: ElementId, tag: Tag },
}
