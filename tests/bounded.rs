//! Bounded previews.
//!
//! A preview of `n` characters is the first `n` characters of the full
//! render of the root, and content past the limit is never rendered.

use std::cell::Cell;

use pretty_assertions::assert_eq;
use proptest::collection::vec;
use proptest::prelude::*;

use mdscribe::{
    Block, CheckReferences, Config, Extension, ExtensionContext, Inline, Node, Renderer, blocks,
    inlines, md, nodes,
};

/// Renders every value as `x`, counting calls.
#[derive(Default)]
struct Counting {
    calls: Cell<usize>,
}

impl Extension<u32> for Counting {
    fn render(&self, _value: &u32, _cx: &ExtensionContext<'_>) -> mdscribe::Result<String> {
        self.calls.set(self.calls.get() + 1);
        Ok("x".to_string())
    }
}

/// Full render of the root alone: nothing appended, nothing validated.
fn root_only() -> Config {
    Config::DEFAULT
        .with_auto_references(false)
        .with_check_references(CheckReferences::Off)
}

#[test]
fn test_preview_is_prefix() {
    let doc: Node = md::section(
        Some(md::h("Title")),
        blocks![
            md::p("Some *text*"),
            md::list(nodes!["one", "two"]),
            md::codeblock("let x = 1;"),
        ],
    )
    .into();
    let renderer = Renderer::new();
    let full = renderer.render(&doc).unwrap();
    assert_eq!(full, "\n# Title\n\nSome \\*text\\*\n\n- one\n- two\n\n```\nlet x = 1;\n```\n");

    assert_eq!(renderer.preview(&doc, 0).unwrap(), "");
    assert_eq!(renderer.preview(&doc, 9).unwrap(), "\n# Title\n");
    assert_eq!(renderer.preview(&doc, 16).unwrap(), "\n# Title\n\nSome \\");
    assert_eq!(renderer.preview(&doc, 1000).unwrap(), full);
}

#[test]
fn test_preview_escapes_line_start_like_render() {
    let doc: Node = md::p("text\n1. more").into();
    let renderer = Renderer::new();
    assert_eq!(renderer.render(&doc).unwrap(), "\ntext  \n1\\. more\n");
    assert_eq!(renderer.preview(&doc, 9).unwrap(), "\ntext  \n1");
    assert_eq!(renderer.preview(&doc, 10).unwrap(), "\ntext  \n1\\");
}

#[test]
fn test_preview_excludes_appended_definitions() {
    let note = md::footnote(nodes!["note"]);
    let doc: Node = md::p(inlines!["a", note.reference()]).into();
    let renderer = Renderer::new();
    assert_eq!(renderer.render(&doc).unwrap(), "\na[^1]\n\n[^1]: note\n");
    assert_eq!(renderer.preview(&doc, 1000).unwrap(), "\na[^1]\n");
}

#[test]
fn test_preview_skips_content_past_limit() {
    let counting = Counting::default();
    let run: Vec<Inline<u32>> = (0..1000).map(md::ext).collect();
    let doc: Node<u32> = md::p(run).into();
    let renderer: Renderer<'_, u32> = Renderer::new().with_extension(&counting);

    assert_eq!(renderer.preview(&doc, 6).unwrap(), "\nxxxxx");
    assert!(counting.calls.get() < 50, "rendered {} values", counting.calls.get());

    counting.calls.set(0);
    let full = renderer.render(&doc).unwrap();
    assert_eq!(full.len(), 1002);
    assert_eq!(counting.calls.get(), 1000);
}

#[test]
fn test_preview_never_reaches_unsupported_values() {
    let doc: Node<u32> = md::p(inlines!["abc", md::ext(1u32)]).into();
    let renderer = Renderer::new();
    assert_eq!(renderer.preview(&doc, 2).unwrap(), "\na");
    assert!(renderer.render(&doc).is_err());
}

// ============================================================================
// Prefix Law
// ============================================================================

fn text() -> impl Strategy<Value = String> {
    r"[ab é#*_+1.:>|!`\[\]\n=-]{0,12}"
}

fn inline() -> impl Strategy<Value = Inline> {
    let leaf = prop_oneof![
        text().prop_map(Inline::from),
        text().prop_map(|code| -> Inline { Inline::from(md::code(code)) }),
        "[a-z]{1,6}".prop_map(|name| -> Inline { Inline::from(md::emoji(name)) }),
        (text(), "[a-z:/.]{1,10}").prop_map(|(t, href)| -> Inline { Inline::from(md::link(t, href)) }),
        text().prop_map(|t| -> Inline {
            Inline::from(md::link_to(t, &md::link_target("http://localhost")))
        }),
        text().prop_map(|t| -> Inline { Inline::from(md::footnote(nodes![t]).reference()) }),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(|run| -> Inline { Inline::from(md::b(run)) }),
            vec(inner.clone(), 0..4).prop_map(|run| -> Inline { Inline::from(md::i(run)) }),
            vec(inner, 0..4).prop_map(|run| -> Inline { Inline::from(md::t(run)) }),
        ]
    })
}

fn block() -> impl Strategy<Value = Block> {
    let leaf = prop_oneof![
        vec(inline(), 0..4).prop_map(|run| -> Block { Block::from(md::p(run)) }),
        vec(inline(), 0..3).prop_map(|run| -> Block { Block::from(md::h(run)) }),
        text().prop_map(|code| -> Block { Block::from(md::codeblock(code)) }),
        Just(Block::from(md::hr())),
        (vec(text(), 1..3), vec(vec(inline(), 0..3), 0..3)).prop_map(|(headers, rows)| -> Block {
            let headers = headers.into_iter().map(|h| md::th(h)).collect();
            let rows = rows.into_iter().map(|cells| md::tr(cells)).collect();
            Block::from(md::table(headers, rows))
        }),
        (vec(inline(), 0..2), vec(inline(), 0..2))
            .prop_map(|(term, description)| -> Block { Block::from(md::definition(term, description)) }),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        let node = prop_oneof![inline().prop_map(Node::from), inner.clone().prop_map(Node::from)].boxed();
        prop_oneof![
            vec(node.clone(), 0..4).prop_map(|items| -> Block { Block::from(md::list(items)) }),
            vec(node.clone(), 0..4).prop_map(|items| -> Block { Block::from(md::ordered(items)) }),
            vec(node, 0..4).prop_map(|items| -> Block { Block::from(md::blockquote(items)) }),
            (vec(inline(), 0..2), vec(inner, 0..4)).prop_map(|(title, children)| -> Block {
                Block::from(md::section(Some(md::h(title)), children))
            }),
        ]
    })
}

fn document() -> impl Strategy<Value = Node> {
    prop_oneof![inline().prop_map(Node::from), block().prop_map(Node::from)]
}

proptest! {
    #[test]
    fn prop_preview_is_prefix_of_render(doc in document(), cut in 0usize..200) {
        let renderer = Renderer::new().with_config(root_only());
        let full = renderer.render(&doc).unwrap();
        let preview = renderer.preview(&doc, cut).unwrap();

        prop_assert!(preview.chars().count() <= cut);
        prop_assert!(full.starts_with(&preview), "{:?} is not a prefix of {:?}", preview, full);
        if cut >= full.chars().count() {
            prop_assert_eq!(&preview, &full);
        }
    }

    #[test]
    fn prop_preview_fills_budget(doc in document(), cut in 0usize..200) {
        let renderer = Renderer::new().with_config(root_only());
        let full = renderer.render(&doc).unwrap();
        let preview = renderer.preview(&doc, cut).unwrap();
        prop_assert_eq!(preview.chars().count(), cut.min(full.chars().count()));
    }

    #[test]
    fn prop_preview_leaves_render_unchanged(doc in document(), cut in 0usize..200) {
        let renderer = Renderer::new().with_config(root_only());
        let before = renderer.render(&doc).unwrap();
        renderer.preview(&doc, cut).unwrap();
        prop_assert_eq!(renderer.render(&doc).unwrap(), before);
    }
}
