//! Template transformations.
//!
//! A transform pass walks the template AST depth-first. On entry to a node
//! every registered rule runs in order and may hand back an [`ExitAction`];
//! once the node's children are done, the collected exit actions run in
//! reverse registration order. Code for an element depends on the code of its
//! children, so composition happens in exit actions.

use crate::ast::{NodeKind, TemplateNode};
use crate::context::{ExitAction, NodeMutation, TransformContext, TransformOptions};
use crate::error::{TransformError, TransformResult};
use render_codegen::{CodeNode, Identifier};

/// Outcome of visiting a node, reported to the parent's child loop.
enum Visit {
    Kept,
    Removed,
}

/// Run a transform pass over `root`, attaching generated code in place.
pub fn transform(root: &mut TemplateNode, options: &TransformOptions) -> TransformResult<()> {
    let mut ctx = TransformContext::new(options);
    match traverse_node(root, &mut ctx)? {
        Visit::Kept => {
            tracing::debug!(
                generated = root.generated().map(CodeNode::kind),
                "transformed template"
            );
            Ok(())
        }
        Visit::Removed => Err(TransformError::DetachedRoot),
    }
}

/// Visit a node and its subtree.
fn traverse_node(node: &mut TemplateNode, ctx: &mut TransformContext) -> TransformResult<Visit> {
    ctx.set_current(node.kind());

    let mut exit_actions: Vec<ExitAction> = Vec::new();
    for i in 0..ctx.node_transforms.len() {
        let node_transform = ctx.node_transforms[i];
        if let Some(exit) = node_transform(node, ctx)? {
            exit_actions.push(exit);
        }
        match ctx.take_mutation() {
            None => {}
            Some(_) if ctx.is_root() => return Err(TransformError::DetachedRoot),
            Some(NodeMutation::Replace(replacement)) => {
                tracing::trace!(
                    from = %node.kind(),
                    to = %replacement.kind(),
                    path = ?ctx.path(),
                    "replaced node"
                );
                *node = replacement;
                ctx.set_current(node.kind());
            }
            Some(NodeMutation::Remove) => {
                tracing::trace!(kind = %node.kind(), path = ?ctx.path(), "removed node");
                return Ok(Visit::Removed);
            }
        }
    }

    let kind = node.kind();
    if let Some(children) = node.children_mut() {
        traverse_children(kind, children, ctx)?;
    }

    ctx.set_current(kind);
    for exit in exit_actions.into_iter().rev() {
        exit(node, ctx)?;
    }
    Ok(Visit::Kept)
}

/// Visit children by index so removals can shrink the list mid-loop.
fn traverse_children(
    parent: NodeKind,
    children: &mut Vec<TemplateNode>,
    ctx: &mut TransformContext,
) -> TransformResult<()> {
    let mut i = 0;
    while i < children.len() {
        ctx.enter_child(parent, i);
        let visit = traverse_node(&mut children[i], ctx);
        ctx.exit_child();
        match visit? {
            Visit::Kept => i += 1,
            Visit::Removed => {
                children.remove(i);
            }
        }
    }
    Ok(())
}

/// Attach a string literal to text nodes.
pub fn transform_text(
    node: &mut TemplateNode,
    _ctx: &mut TransformContext,
) -> TransformResult<Option<ExitAction>> {
    let TemplateNode::Text(text) = &*node else {
        return Ok(None);
    };
    let literal = CodeNode::string(text.content.as_str());
    node.set_generated(literal)?;
    Ok(None)
}

/// Build a helper call for each element once its children have code.
pub fn transform_element(
    node: &mut TemplateNode,
    _ctx: &mut TransformContext,
) -> TransformResult<Option<ExitAction>> {
    if node.kind() != NodeKind::Element {
        return Ok(None);
    }
    let exit: ExitAction = Box::new(exit_element);
    Ok(Some(exit))
}

fn exit_element(node: &mut TemplateNode, ctx: &mut TransformContext) -> TransformResult<()> {
    // A later rule may have swapped the element for another kind of node.
    let TemplateNode::Element(el) = &*node else {
        return Ok(());
    };

    let mut arguments = vec![CodeNode::string(el.tag.as_str())];
    match el.children.as_slice() {
        [] => {}
        [only] => arguments.push(child_code(only)?),
        children => {
            let elements = children
                .iter()
                .map(child_code)
                .collect::<TransformResult<Vec<_>>>()?;
            arguments.push(CodeNode::array(elements));
        }
    }

    let call = CodeNode::call(Identifier::new(ctx.helper()), arguments);
    node.set_generated(call)
}

/// Wrap the first top-level node in the render function.
pub fn transform_root(
    node: &mut TemplateNode,
    _ctx: &mut TransformContext,
) -> TransformResult<Option<ExitAction>> {
    if node.kind() != NodeKind::Root {
        return Ok(None);
    }
    let exit: ExitAction = Box::new(exit_root);
    Ok(Some(exit))
}

fn exit_root(node: &mut TemplateNode, ctx: &mut TransformContext) -> TransformResult<()> {
    let TemplateNode::Root(root) = &*node else {
        return Ok(());
    };
    let first = root.children.first().ok_or(TransformError::EmptyTemplate)?;
    if root.children.len() > 1 {
        tracing::warn!(
            count = root.children.len(),
            "template has several top-level nodes, only the first is rendered"
        );
    }

    let body = vec![CodeNode::return_statement(child_code(first)?)];
    let render = CodeNode::function(Identifier::new(ctx.function_name()), Vec::new(), body);
    node.set_generated(render)
}

/// A copy of a child's generated code.
fn child_code(child: &TemplateNode) -> TransformResult<CodeNode> {
    child
        .generated()
        .cloned()
        .ok_or_else(|| TransformError::MissingGeneratedCode {
            kind: child.kind(),
            span: child.span(),
        })
}
