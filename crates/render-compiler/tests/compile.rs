//! End-to-end tests for the compilation pipeline.

use pretty_assertions::assert_eq;
use render_compiler::{compile, compile_ast, compile_default, CompileError, CompilerOptions};
use render_lexer::LexError;
use render_template::{dump, ParseError, TemplateNode, TransformError};

#[test]
fn test_compile_single_child() {
    insta::assert_snapshot!(compile_default("<div><p>Vue</p></div>").unwrap(), @r#"
    function render() {
      return h("div", h("p", "Vue"))
    }
    "#);
}

#[test]
fn test_compile_exact_output() {
    assert_eq!(
        compile_default("<div><p>Vue</p></div>").unwrap(),
        "function render() {\n  return h(\"div\", h(\"p\", \"Vue\"))\n}"
    );
    assert_eq!(
        compile_default("<div><p>Vue</p><p>Hello</p></div>").unwrap(),
        "function render() {\n  return h(\"div\", [h(\"p\", \"Vue\"), h(\"p\", \"Hello\")])\n}"
    );
}

#[test]
fn test_compile_deeply_nested() {
    insta::assert_snapshot!(
        compile_default("<section><header><h>Title</h></header><main>Body<em>text</em></main></section>").unwrap(),
        @r#"
    function render() {
      return h("section", [h("header", h("h", "Title")), h("main", ["Body", h("em", "text")])])
    }
    "#
    );
}

#[test]
fn test_single_child_is_never_wrapped() {
    let code = compile_default("<ul><li><b>x</b></li></ul>").unwrap();
    assert!(!code.contains('['));
    assert_eq!(
        code,
        "function render() {\n  return h(\"ul\", h(\"li\", h(\"b\", \"x\")))\n}"
    );
}

#[test]
fn test_ast_mirrors_source_nesting() {
    let ast = compile_ast("<div><p>Vue</p>mid<span>a</span></div>", &CompilerOptions::default())
        .unwrap();
    insta::assert_snapshot!(dump(&ast), @r"
    Root
    --Element: div
    ----Element: p
    ------Text: Vue
    ----Text: mid
    ----Element: span
    ------Text: a
    ");
}

#[test]
fn test_every_node_has_generated_code() {
    fn check(node: &TemplateNode) {
        assert!(node.generated().is_some(), "{:?} has no code", node.kind());
        for child in node.children().unwrap_or_default() {
            check(child);
        }
    }
    let ast = compile_ast("<div><p>Vue</p><p>Hello</p></div>", &CompilerOptions::default())
        .unwrap();
    check(&ast);
}

#[test]
fn test_generate_is_idempotent() {
    let ast = compile_ast("<div><p>Vue</p><p>Hello</p></div>", &CompilerOptions::default())
        .unwrap();
    let code = ast.generated().unwrap();
    assert_eq!(render_codegen::generate(code), render_codegen::generate(code));
}

#[test]
fn test_compile_with_options() {
    let options = CompilerOptions {
        function_name: "view".into(),
        helper: "createElement".into(),
        indent_width: 4,
    };
    assert_eq!(
        compile("<p>Vue</p>", &options).unwrap(),
        "function view() {\n    return createElement(\"p\", \"Vue\")\n}"
    );
}

#[test]
fn test_only_first_top_level_node_is_rendered() {
    assert_eq!(
        compile_default("<a>x</a><b>y</b>").unwrap(),
        "function render() {\n  return h(\"a\", \"x\")\n}"
    );
}

#[test]
fn test_mismatched_closing_tag_fails() {
    let err = compile_default("<div><p>Vue</span></div>").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Parse(ParseError::MismatchedClosingTag { .. })
    ));
    assert_eq!(err.code(), "mismatched-closing-tag");
    assert_eq!(err.stage(), "parse");
}

#[test]
fn test_empty_input_fails() {
    let err = compile_default("").unwrap_err();
    assert_eq!(err, CompileError::Transform(TransformError::EmptyTemplate));
    assert!(err.span().is_none());
    assert!(err.help().is_some());
}

#[test]
fn test_unclosed_element_fails() {
    let err = compile_default("<div><p>Vue</p>").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Parse(ParseError::UnexpectedEndOfInput { .. })
    ));
}

#[test]
fn test_lexer_errors_surface() {
    assert!(matches!(
        compile_default("<div>x</div").unwrap_err(),
        CompileError::Lex(LexError::UnterminatedTag { .. })
    ));
    assert!(matches!(
        compile_default("<div>x</div>y").unwrap_err(),
        CompileError::Lex(LexError::UnterminatedText { .. })
    ));
    assert!(matches!(
        compile_default("<div class>x</div>").unwrap_err(),
        CompileError::Lex(LexError::InvalidCharacter { found: ' ', .. })
    ));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        compile_default("<div><p>Vue</span></div>").unwrap_err().to_string(),
        "mismatched closing tag: expected </p>, found </span>"
    );
    assert_eq!(
        compile_default("<div>").unwrap_err().to_string(),
        "unexpected end of input: <div> is never closed"
    );
    assert_eq!(
        compile_default("").unwrap_err().to_string(),
        "empty template: there is nothing to render"
    );
}
