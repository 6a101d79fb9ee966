//! Animation step vocabulary.
//!
//! Every generator in the workspace speaks this closed set of events. A step
//! carries at most one state-changing effect; the replay engine applies them
//! in order and never reorders or merges them.

use crate::table::TableValue;

/// Outcome attached to a highlight during string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Verdict {
    Match,
    Mismatch,
}

/// A single discrete animation event.
///
/// Index meaning depends on the emitting algorithm: array positions for
/// sorts and searches, `[row, col]` for grid cells and DP cells,
/// `[text, pattern]` for string compares, `row * n + col` for board puzzles,
/// node indices for graph algorithms and `[r1, c1, r2, c2]` for grid edges.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum AnimationStep {
    /// Two (or one) positions are being compared; pure highlight.
    Compare { indices: Vec<usize> },

    /// Exchange the values at two array positions.
    Swap { indices: [usize; 2] },

    /// Write `value` at the given positions, or just flash them when `None`.
    Overwrite {
        indices: Vec<usize>,
        value: Option<i64>,
    },

    /// Emphasis without mutation, optionally tagged with a match verdict.
    Highlight {
        indices: Vec<usize>,
        verdict: Option<Verdict>,
    },

    /// A grid cell was settled by a search.
    Visit { indices: Vec<usize> },

    /// A grid cell belongs to the reconstructed path.
    Path { indices: Vec<usize> },

    /// A grid cell became a wall.
    Wall { indices: Vec<usize> },

    /// Terminal success marker.
    Found { indices: Vec<usize> },

    /// Marks the sought element or a dependency cell.
    Target { indices: Vec<usize> },

    /// Swap in a whole new array (e.g. a sorted copy or a resized structure).
    Replace {
        #[cfg_attr(feature = "serde", serde(rename = "newArray"))]
        new_array: Vec<i64>,
    },

    /// Write into the auxiliary array.
    UpdateAux { indices: [usize; 1], value: i64 },

    /// Lift an array element into a bucket; the slot becomes hidden.
    MoveToBucket {
        indices: [usize; 1],
        value: i64,
        bucket: usize,
    },

    /// Put a value back into the array, draining the front of `bucket`.
    Restore {
        indices: [usize; 1],
        value: i64,
        bucket: Option<usize>,
    },

    /// Fill one cell of the DP table.
    UpdateTable {
        row: usize,
        col: usize,
        val: TableValue,
    },
}

/// Ordered list of steps produced by one generator run.
pub type StepLog = Vec<AnimationStep>;

impl AnimationStep {
    pub fn compare(indices: impl Into<Vec<usize>>) -> Self {
        AnimationStep::Compare { indices: indices.into() }
    }

    pub fn swap(a: usize, b: usize) -> Self {
        AnimationStep::Swap { indices: [a, b] }
    }

    pub fn overwrite(index: usize, value: i64) -> Self {
        AnimationStep::Overwrite {
            indices: vec![index],
            value: Some(value),
        }
    }

    /// Overwrite step that only flashes the position.
    pub fn flash(index: usize) -> Self {
        AnimationStep::Overwrite {
            indices: vec![index],
            value: None,
        }
    }

    pub fn highlight(indices: impl Into<Vec<usize>>) -> Self {
        AnimationStep::Highlight {
            indices: indices.into(),
            verdict: None,
        }
    }

    pub fn verdict(indices: impl Into<Vec<usize>>, verdict: Verdict) -> Self {
        AnimationStep::Highlight {
            indices: indices.into(),
            verdict: Some(verdict),
        }
    }

    pub fn visit(row: usize, col: usize) -> Self {
        AnimationStep::Visit { indices: vec![row, col] }
    }

    pub fn path(row: usize, col: usize) -> Self {
        AnimationStep::Path { indices: vec![row, col] }
    }

    pub fn wall(row: usize, col: usize) -> Self {
        AnimationStep::Wall { indices: vec![row, col] }
    }

    pub fn found(indices: impl Into<Vec<usize>>) -> Self {
        AnimationStep::Found { indices: indices.into() }
    }

    pub fn target(indices: impl Into<Vec<usize>>) -> Self {
        AnimationStep::Target { indices: indices.into() }
    }

    pub fn replace(new_array: Vec<i64>) -> Self {
        AnimationStep::Replace { new_array }
    }

    pub fn update_aux(index: usize, value: i64) -> Self {
        AnimationStep::UpdateAux {
            indices: [index],
            value,
        }
    }

    pub fn move_to_bucket(index: usize, value: i64, bucket: usize) -> Self {
        AnimationStep::MoveToBucket {
            indices: [index],
            value,
            bucket,
        }
    }

    pub fn restore(index: usize, value: i64, bucket: Option<usize>) -> Self {
        AnimationStep::Restore {
            indices: [index],
            value,
            bucket,
        }
    }

    pub fn update_table(row: usize, col: usize, val: impl Into<TableValue>) -> Self {
        AnimationStep::UpdateTable {
            row,
            col,
            val: val.into(),
        }
    }

    /// Positions this step refers to.
    pub fn indices(&self) -> &[usize] {
        match self {
            AnimationStep::Compare { indices }
            | AnimationStep::Overwrite { indices, .. }
            | AnimationStep::Highlight { indices, .. }
            | AnimationStep::Visit { indices }
            | AnimationStep::Path { indices }
            | AnimationStep::Wall { indices }
            | AnimationStep::Found { indices }
            | AnimationStep::Target { indices } => indices,
            AnimationStep::Swap { indices } => indices,
            AnimationStep::UpdateAux { indices, .. }
            | AnimationStep::MoveToBucket { indices, .. }
            | AnimationStep::Restore { indices, .. } => indices,
            AnimationStep::Replace { .. } | AnimationStep::UpdateTable { .. } => &[],
        }
    }

    /// Wire name of the step kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AnimationStep::Compare { .. } => "compare",
            AnimationStep::Swap { .. } => "swap",
            AnimationStep::Overwrite { .. } => "overwrite",
            AnimationStep::Highlight { .. } => "highlight",
            AnimationStep::Visit { .. } => "visit",
            AnimationStep::Path { .. } => "path",
            AnimationStep::Wall { .. } => "wall",
            AnimationStep::Found { .. } => "found",
            AnimationStep::Target { .. } => "target",
            AnimationStep::Replace { .. } => "replace",
            AnimationStep::UpdateAux { .. } => "updateAux",
            AnimationStep::MoveToBucket { .. } => "moveToBucket",
            AnimationStep::Restore { .. } => "restore",
            AnimationStep::UpdateTable { .. } => "updateTable",
        }
    }

    /// Whether applying this step changes data rather than just emphasis.
    pub fn is_mutation(&self) -> bool {
        match self {
            AnimationStep::Overwrite { value, .. } => value.is_some(),
            AnimationStep::Swap { .. }
            | AnimationStep::Visit { .. }
            | AnimationStep::Path { .. }
            | AnimationStep::Wall { .. }
            | AnimationStep::Replace { .. }
            | AnimationStep::UpdateAux { .. }
            | AnimationStep::MoveToBucket { .. }
            | AnimationStep::Restore { .. }
            | AnimationStep::UpdateTable { .. } => true,
            AnimationStep::Compare { .. }
            | AnimationStep::Highlight { .. }
            | AnimationStep::Found { .. }
            | AnimationStep::Target { .. } => false,
        }
    }
}
