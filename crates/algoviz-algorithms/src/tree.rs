//! Binary search trees, plain and AVL-balanced.
//!
//! Tree operations are applied directly per user action rather than through a
//! step log. After every structural change the tree is laid out again so the
//! renderer can draw it as-is.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use algoviz_core::{height, NodeId, TreeNode};

use crate::error::ParseError;

/// Horizontal position of the root.
pub const ROOT_X: f64 = 500.0;
/// Vertical position of the root.
pub const ROOT_Y: f64 = 50.0;
/// Vertical distance between levels.
pub const LEVEL_HEIGHT: f64 = 80.0;
/// Horizontal child offset at the first level; halves at every level below.
pub const ROOT_OFFSET: f64 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TreeFlavor {
    #[default]
    Bst,
    Avl,
}

/// AVL rebalancing case, named after the path to the inserted or heavier node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    LeftLeft,
    RightRight,
    LeftRight,
    RightLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TraversalOrder {
    Inorder,
    Preorder,
    Postorder,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::Inorder => "inorder",
            TraversalOrder::Preorder => "preorder",
            TraversalOrder::Postorder => "postorder",
        };
        f.write_str(name)
    }
}

impl FromStr for TraversalOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inorder" => Ok(TraversalOrder::Inorder),
            "preorder" => Ok(TraversalOrder::Preorder),
            "postorder" => Ok(TraversalOrder::Postorder),
            _ => Err(ParseError::UnknownTraversal(s.to_string())),
        }
    }
}

/// A binary search tree with stable node ids. Duplicate values are ignored.
#[derive(Debug, Clone, Default)]
pub struct BinaryTree {
    root: Option<Box<TreeNode>>,
    flavor: TreeFlavor,
    next_id: u64,
    rotations: Vec<Rotation>,
}

impl BinaryTree {
    pub fn new(flavor: TreeFlavor) -> Self {
        Self {
            flavor,
            ..Self::default()
        }
    }

    pub fn flavor(&self) -> TreeFlavor {
        self.flavor
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.len())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.root().and_then(|r| r.find(value)).is_some()
    }

    /// Rotations performed by the most recent insert or delete.
    pub fn last_rotations(&self) -> &[Rotation] {
        &self.rotations
    }

    /// Drop every node. Ids keep counting up.
    pub fn clear(&mut self) {
        self.root = None;
        self.rotations.clear();
    }

    /// Insert `value`, returning the new node's id, or `None` for a duplicate.
    pub fn insert(&mut self, value: i64) -> Option<NodeId> {
        self.rotations.clear();
        let mut ctx = Ctx {
            avl: self.flavor == TreeFlavor::Avl,
            next_id: &mut self.next_id,
            inserted: None,
            rotations: &mut self.rotations,
        };
        self.root = Some(insert_node(self.root.take(), value, &mut ctx));
        let inserted = ctx.inserted;
        self.layout();
        inserted
    }

    /// Remove `value`. A node with two children takes its inorder
    /// successor's value and the successor is removed instead.
    pub fn delete(&mut self, value: i64) -> bool {
        self.rotations.clear();
        let mut removed = false;
        let avl = self.flavor == TreeFlavor::Avl;
        self.root = delete_node(self.root.take(), value, avl, &mut removed, &mut self.rotations);
        self.layout();
        removed
    }

    /// Node ids in traversal order.
    pub fn traverse(&self, order: TraversalOrder) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len());
        if let Some(root) = self.root() {
            walk(root, order, &mut |n| out.push(n.id));
        }
        out
    }

    /// Node values in traversal order.
    pub fn traverse_values(&self, order: TraversalOrder) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len());
        if let Some(root) = self.root() {
            walk(root, order, &mut |n| out.push(n.value));
        }
        out
    }

    /// Assign `x`/`y` to every node: children sit one level lower, shifted
    /// left or right by an offset that halves with depth.
    pub fn layout(&mut self) {
        fn place(node: &mut TreeNode, x: f64, y: f64, offset: f64) {
            node.x = x;
            node.y = y;
            if let Some(left) = node.left.as_deref_mut() {
                place(left, x - offset, y + LEVEL_HEIGHT, offset / 2.0);
            }
            if let Some(right) = node.right.as_deref_mut() {
                place(right, x + offset, y + LEVEL_HEIGHT, offset / 2.0);
            }
        }
        if let Some(root) = self.root.as_deref_mut() {
            place(root, ROOT_X, ROOT_Y, ROOT_OFFSET);
        }
    }
}

struct Ctx<'a> {
    avl: bool,
    next_id: &'a mut u64,
    inserted: Option<NodeId>,
    rotations: &'a mut Vec<Rotation>,
}

fn walk(node: &TreeNode, order: TraversalOrder, visit: &mut impl FnMut(&TreeNode)) {
    if order == TraversalOrder::Preorder {
        visit(node);
    }
    if let Some(left) = &node.left {
        walk(left, order, visit);
    }
    if order == TraversalOrder::Inorder {
        visit(node);
    }
    if let Some(right) = &node.right {
        walk(right, order, visit);
    }
    if order == TraversalOrder::Postorder {
        visit(node);
    }
}

fn update_height(node: &mut TreeNode) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

fn balance(node: &TreeNode) -> i64 {
    i64::from(height(&node.left)) - i64::from(height(&node.right))
}

fn child_balance(child: &Option<Box<TreeNode>>) -> i64 {
    child.as_deref().map_or(0, balance)
}

fn rotate_right(mut y: Box<TreeNode>) -> Box<TreeNode> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    update_height(&mut y);
    x.right = Some(y);
    update_height(&mut x);
    x
}

fn rotate_left(mut x: Box<TreeNode>) -> Box<TreeNode> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    update_height(&mut x);
    y.left = Some(x);
    update_height(&mut y);
    y
}

fn rebalance(mut node: Box<TreeNode>, rotations: &mut Vec<Rotation>) -> Box<TreeNode> {
    let bf = balance(&node);
    if bf > 1 {
        if child_balance(&node.left) >= 0 {
            rotations.push(Rotation::LeftLeft);
        } else {
            rotations.push(Rotation::LeftRight);
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if bf < -1 {
        if child_balance(&node.right) <= 0 {
            rotations.push(Rotation::RightRight);
        } else {
            rotations.push(Rotation::RightLeft);
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

fn insert_node(slot: Option<Box<TreeNode>>, value: i64, ctx: &mut Ctx<'_>) -> Box<TreeNode> {
    let Some(mut node) = slot else {
        let id = NodeId(*ctx.next_id);
        *ctx.next_id += 1;
        ctx.inserted = Some(id);
        return Box::new(TreeNode::new(id, value));
    };
    match value.cmp(&node.value) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), value, ctx)),
        Ordering::Greater => node.right = Some(insert_node(node.right.take(), value, ctx)),
        Ordering::Equal => return node,
    }
    update_height(&mut node);
    if ctx.avl {
        rebalance(node, ctx.rotations)
    } else {
        node
    }
}

fn min_value(node: &TreeNode) -> i64 {
    let mut cur = node;
    while let Some(left) = cur.left.as_deref() {
        cur = left;
    }
    cur.value
}

fn delete_node(
    slot: Option<Box<TreeNode>>,
    value: i64,
    avl: bool,
    removed: &mut bool,
    rotations: &mut Vec<Rotation>,
) -> Option<Box<TreeNode>> {
    let mut node = slot?;
    match value.cmp(&node.value) {
        Ordering::Less => {
            node.left = delete_node(node.left.take(), value, avl, removed, rotations);
        }
        Ordering::Greater => {
            node.right = delete_node(node.right.take(), value, avl, removed, rotations);
        }
        Ordering::Equal => {
            *removed = true;
            match (node.left.take(), node.right.take()) {
                (None, None) => return None,
                (Some(child), None) | (None, Some(child)) => return Some(child),
                (Some(left), Some(right)) => {
                    let successor = min_value(&right);
                    node.value = successor;
                    node.left = Some(left);
                    let mut spliced = false;
                    node.right = delete_node(Some(right), successor, avl, &mut spliced, rotations);
                }
            }
        }
    }
    update_height(&mut node);
    Some(if avl { rebalance(node, rotations) } else { node })
}
