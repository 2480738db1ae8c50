//! Traversal state shared by node transforms.

use crate::ast::{NodeKind, TemplateNode};
use crate::error::TransformResult;
use crate::transforms::{transform_element, transform_root, transform_text};
use smol_str::SmolStr;
use std::fmt;

/// Deferred work registered on entry to a node, run after its children.
///
/// The action receives the node occupying the slot at exit time, which is the
/// replacement if a transform called [`TransformContext::replace_node`].
pub type ExitAction = Box<dyn FnOnce(&mut TemplateNode, &mut TransformContext) -> TransformResult<()>>;

/// A transform rule, invoked once per node on entry.
pub type NodeTransform =
    fn(&mut TemplateNode, &mut TransformContext) -> TransformResult<Option<ExitAction>>;

/// Options for a transform pass.
#[derive(Clone)]
pub struct TransformOptions {
    /// Name of the generated render function.
    pub function_name: SmolStr,
    /// Name of the node-creation helper called for each element.
    pub helper: SmolStr,
    /// Rules, in registration order.
    pub node_transforms: Vec<NodeTransform>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            function_name: "render".into(),
            helper: "h".into(),
            node_transforms: default_node_transforms(),
        }
    }
}

impl fmt::Debug for TransformOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformOptions")
            .field("function_name", &self.function_name)
            .field("helper", &self.helper)
            .field("node_transforms", &self.node_transforms.len())
            .finish()
    }
}

/// The built-in rules.
pub fn default_node_transforms() -> Vec<NodeTransform> {
    vec![transform_root, transform_element, transform_text]
}

/// A structural edit requested by a transform for the current node.
#[derive(Debug)]
pub(crate) enum NodeMutation {
    Replace(TemplateNode),
    Remove,
}

/// Traversal state for one transform pass.
///
/// A context is created by [`crate::transform`] and dropped when the pass
/// ends. It only records kinds and indices of the nodes around the cursor;
/// the tree itself stays exclusively owned by the caller.
pub struct TransformContext {
    function_name: SmolStr,
    helper: SmolStr,
    pub(crate) node_transforms: Vec<NodeTransform>,
    current: Option<NodeKind>,
    /// Kinds of the nodes from the root down to the current node's parent.
    ancestors: Vec<NodeKind>,
    /// Child indices from the root down to the current node.
    path: Vec<usize>,
    pending: Option<NodeMutation>,
}

impl TransformContext {
    /// Create a new transform context.
    pub fn new(options: &TransformOptions) -> Self {
        Self {
            function_name: options.function_name.clone(),
            helper: options.helper.clone(),
            node_transforms: options.node_transforms.clone(),
            current: None,
            ancestors: Vec::new(),
            path: Vec::new(),
            pending: None,
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn helper(&self) -> &str {
        &self.helper
    }

    /// Kind of the node being visited.
    pub fn current_node(&self) -> Option<NodeKind> {
        self.current
    }

    /// Kind of the current node's parent, `None` at the root.
    pub fn parent(&self) -> Option<NodeKind> {
        self.ancestors.last().copied()
    }

    /// Position of the current node within its parent's children.
    pub fn child_index(&self) -> Option<usize> {
        self.path.last().copied()
    }

    /// Child indices leading from the root to the current node.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Overwrite the current node's slot in its parent.
    ///
    /// The new node becomes the subject of the remaining transforms and its
    /// children are the ones visited.
    pub fn replace_node(&mut self, node: TemplateNode) {
        self.pending = Some(NodeMutation::Replace(node));
    }

    /// Remove the current node from its parent.
    ///
    /// No further transforms run on it, its children are not visited and
    /// its exit actions are dropped.
    pub fn remove_node(&mut self) {
        self.pending = Some(NodeMutation::Remove);
    }

    pub(crate) fn take_mutation(&mut self) -> Option<NodeMutation> {
        self.pending.take()
    }

    pub(crate) fn set_current(&mut self, kind: NodeKind) {
        self.current = Some(kind);
    }

    pub(crate) fn enter_child(&mut self, parent: NodeKind, index: usize) {
        self.ancestors.push(parent);
        self.path.push(index);
    }

    pub(crate) fn exit_child(&mut self) {
        self.ancestors.pop();
        self.path.pop();
    }
}

impl fmt::Debug for TransformContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformContext")
            .field("current", &self.current)
            .field("ancestors", &self.ancestors)
            .field("path", &self.path)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
