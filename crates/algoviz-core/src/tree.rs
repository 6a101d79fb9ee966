//! Binary tree nodes used by the BST and AVL visualizations.

/// Stable identity of a tree node, independent of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

/// A tree node. Children are owned; rotations move the boxes around.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode {
    pub id: NodeId,
    pub value: i64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
    /// AVL height; a leaf has height 1.
    pub height: u32,
    pub x: f64,
    pub y: f64,
}

impl TreeNode {
    pub fn new(id: NodeId, value: i64) -> Self {
        Self {
            id,
            value,
            left: None,
            right: None,
            height: 1,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Number of nodes in this subtree.
    pub fn len(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.len()) + self.right.as_ref().map_or(0, |n| n.len())
    }

    /// Values in sorted (inorder) order.
    pub fn inorder_values(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len());
        fn walk(node: &TreeNode, out: &mut Vec<i64>) {
            if let Some(left) = &node.left {
                walk(left, out);
            }
            out.push(node.value);
            if let Some(right) = &node.right {
                walk(right, out);
            }
        }
        walk(self, &mut out);
        out
    }

    /// Find the node holding `value`.
    pub fn find(&self, value: i64) -> Option<&TreeNode> {
        let mut cur = Some(self);
        while let Some(node) = cur {
            cur = match value.cmp(&node.value) {
                std::cmp::Ordering::Less => node.left.as_deref(),
                std::cmp::Ordering::Greater => node.right.as_deref(),
                std::cmp::Ordering::Equal => return Some(node),
            };
        }
        None
    }
}

/// Height of an optional subtree (0 when empty).
pub fn height(node: &Option<Box<TreeNode>>) -> u32 {
    node.as_ref().map_or(0, |n| n.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        let mut root = TreeNode::new(NodeId(0), 5);
        root.left = Some(Box::new(TreeNode::new(NodeId(1), 2)));
        root.right = Some(Box::new(TreeNode::new(NodeId(2), 9)));
        root
    }

    #[test]
    fn inorder_is_sorted() {
        assert_eq!(sample().inorder_values(), vec![2, 5, 9]);
        assert_eq!(sample().len(), 3);
    }

    #[test]
    fn find_by_value() {
        let root = sample();
        assert_eq!(root.find(9).map(|n| n.id), Some(NodeId(2)));
        assert!(root.find(4).is_none());
    }
}
