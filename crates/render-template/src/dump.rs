//! Plain-text rendering of the template AST, for debugging.

use crate::ast::TemplateNode;

/// Render `node` as one line per node, indented with hyphens by depth.
///
/// ```text
/// Root
/// --Element: div
/// ----Element: p
/// ------Text: Vue
/// ```
pub fn dump(node: &TemplateNode) -> String {
    let mut out = String::new();
    dump_node(node, 0, &mut out);
    out
}

fn dump_node(node: &TemplateNode, indent: usize, out: &mut String) {
    out.push_str(&"-".repeat(indent));
    out.push_str(node.kind().as_str());
    match node {
        TemplateNode::Root(_) => {}
        TemplateNode::Element(el) => {
            out.push_str(": ");
            out.push_str(&el.tag);
        }
        TemplateNode::Text(text) => {
            out.push_str(": ");
            out.push_str(&text.content);
        }
    }
    out.push('\n');

    for child in node.children().unwrap_or_default() {
        dump_node(child, indent + 2, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use render_lexer::tokenize;

    #[test]
    fn test_dump_nested() {
        let ast = parse(tokenize("<div><p>Vue</p><p>Hello</p></div>").unwrap()).unwrap();
        insta::assert_snapshot!(dump(&ast), @r"
        Root
        --Element: div
        ----Element: p
        ------Text: Vue
        ----Element: p
        ------Text: Hello
        ");
    }

    #[test]
    fn test_dump_empty_root() {
        let ast = parse(Vec::new()).unwrap();
        assert_eq!(dump(&ast), "Root\n");
    }
}
