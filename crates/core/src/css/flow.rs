//! Flow classification: positioned vs. in-flow elements, and the row/column
//! direction of containers.

use serde::{Deserialize, Serialize};

use super::Declarations;

/// Whether the declarations take the element out of normal flow: a
/// transform, `position: absolute|relative`, or any non-empty offset.
pub fn is_removed_from_flow(style: &Declarations) -> bool {
    let declared = |prop: &str| style.get(prop).is_some_and(|v| !v.trim().is_empty());

    let positioned = matches!(
        style.get("position").map(|v| v.trim()),
        Some("absolute") | Some("relative")
    );

    declared("transform")
        || positioned
        || ["top", "left", "right", "bottom"].into_iter().any(declared)
}

/// Direction a container lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Row,
    Column,
}

/// `display: flex` lays out as a row unless `flex-direction: column`.
/// Everything else is a column.
pub fn resolve_layout(style: &Declarations) -> LayoutKind {
    let value = |prop: &str| style.get(prop).map(|v| v.trim());
    if value("display") == Some("flex") && value("flex-direction") != Some("column") {
        LayoutKind::Row
    } else {
        LayoutKind::Column
    }
}
