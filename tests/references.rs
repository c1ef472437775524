//! Link targets and footnotes: numbering, auto-append and validation.

use pretty_assertions::assert_eq;

use mdscribe::ir::{Footnote, LinkTarget};
use mdscribe::{
    Block, CheckReferences, Config, Error, Inline, Node, ReferenceErrorKind, Renderer, blocks, inlines,
    md, nodes,
};

/// Render with `config`, returning the output and the error codes.
fn render_checked(doc: &Node, config: Config) -> (String, Vec<&'static str>) {
    match Renderer::new().with_config(config).render(doc) {
        Ok(output) => (output, Vec::new()),
        Err(Error::References { output, errors }) => {
            (output, errors.iter().map(|e| e.kind.code()).collect())
        }
        Err(e) => panic!("render failed: {e}"),
    }
}

fn dedup() -> Config {
    Config {
        dedup_references: true,
        ..Config::DEFAULT
    }
}

// ============================================================================
// Link Targets
// ============================================================================

struct LinkFixture {
    doc: Node,
}

fn link_fixture() -> LinkFixture {
    let target = md::link_target("http://localhost").with_title("Localhost");
    let dup = md::link_target("http://localhost/dup");
    let missing = md::link_target("http://localhost/missing").with_title("Localhost \"missing\"");
    let unreferenced =
        md::link_target("http://localhost/unreferenced").with_title("Localhost (unreferenced)");

    let para = md::p(inlines![
        "linkRef: ",
        md::link_to("linkRef", &target),
        " linkRef again: ",
        md::link_to("linkRef", &target),
        " missing: ",
        md::link_to("linkRefMissing", &missing),
        " duplicate: ",
        md::link_to("linkRefDup", &dup),
    ]);
    let doc = md::section(None, blocks![para, target, dup.clone(), dup, unreferenced]).into();
    LinkFixture { doc }
}

#[test]
fn test_link_checks_without_auto_references() {
    let fixture = link_fixture();
    let (_, codes) = render_checked(&fixture.doc, Config::DEFAULT.with_auto_references(false));
    assert_eq!(
        codes,
        vec!["LINK_REFERENCE_MISSING", "LINK_REFERENCE_DUPLICATE", "LINK_REFERENCE_NOT_USED"]
    );
}

#[test]
fn test_link_checks_with_defaults() {
    let fixture = link_fixture();
    let (_, codes) = render_checked(&fixture.doc, Config::DEFAULT);
    assert_eq!(codes, vec!["LINK_REFERENCE_DUPLICATE", "LINK_REFERENCE_NOT_USED"]);
}

#[test]
fn test_link_dedup_and_auto_append() {
    let fixture = link_fixture();
    let (output, _) = render_checked(&fixture.doc, dedup());
    assert_eq!(
        output,
        "\nlinkRef: [linkRef][1] linkRef again: [linkRef][1] missing: [linkRefMissing][2] duplicate: [linkRefDup][3]\n\
         \n[1]: <http://localhost> \"Localhost\"\n\
         \n[3]: <http://localhost/dup>\n\
         \n[4]: <http://localhost/unreferenced> \"Localhost (unreferenced)\"\n\
         \n[2]: <http://localhost/missing> \"Localhost \\\"missing\\\"\"\n"
    );
}

#[test]
fn test_missing_only_skips_unused_and_duplicates() {
    let fixture = link_fixture();
    let config = Config::DEFAULT
        .with_auto_references(false)
        .with_check_references(CheckReferences::Missing);
    let (_, codes) = render_checked(&fixture.doc, config);
    assert_eq!(codes, vec!["LINK_REFERENCE_MISSING"]);
}

#[test]
fn test_check_off_reports_nothing() {
    let fixture = link_fixture();
    let config = Config::DEFAULT
        .with_auto_references(false)
        .with_check_references(CheckReferences::Off);
    let out = Renderer::new().with_config(config).render(&fixture.doc);
    assert!(out.is_ok());
}

#[test]
fn test_reference_style_paragraph() {
    let target = md::link_target("http://localhost").with_title("Localhost");
    let doc: Node = md::p(inlines![md::link_to("Reference-style link", &target)]).into();
    assert_eq!(
        mdscribe::render(&doc).unwrap(),
        "\n[Reference-style link][1]\n\n[1]: <http://localhost> \"Localhost\"\n"
    );
}

#[test]
fn test_number_start_is_configurable() {
    let target = md::link_target("http://localhost");
    let note = md::footnote(nodes!["note"]);
    let doc: Node = md::p(inlines![md::link_to("x", &target), note.reference()]).into();
    let config = Config {
        link_number_start: 10,
        footnote_number_start: 3,
        ..Config::DEFAULT
    };
    let out = Renderer::new().with_config(config).render(&doc).unwrap();
    assert_eq!(out, "\n[x][10][^3]\n\n[10]: <http://localhost>\n\n[^3]: note\n");
}

#[test]
fn test_long_definition_is_shortened_in_errors() {
    let target: LinkTarget = md::link_target(
        "http://localhost/missing-missing-a-long-long-long-long-long-long-long-long-long-long-long-long-link-link-link-link-link-link-link-link-link-link",
    )
    .with_title("Localhost missing");
    let doc: Node = md::p(inlines![md::link_to("x", &target)]).into();

    let err = Renderer::new()
        .with_config(Config::DEFAULT.with_auto_references(false))
        .render(&doc)
        .unwrap_err();
    let Error::References { errors, .. } = err else {
        panic!("expected reference errors, got {err:?}");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ReferenceErrorKind::LinkReferenceMissing);
    assert_eq!(errors[0].target, target.id());
    assert_eq!(
        errors[0].message,
        "Link reference missing: [1]: <http://localhost/missing-missing-a-long-long-long-long-long-long-long-long-long-long-long-long-link-link-link-link-link-link-link-link-link-link> \"Localh…"
    );
}

// ============================================================================
// Footnotes
// ============================================================================

fn footnote_fixture() -> Node {
    let footnote = md::footnote(nodes![md::t("A multi"), md::p("paragraph"), "foot-note"]);
    let dup = md::footnote(nodes![md::p("A duplicated footnote")]);
    let missing = md::footnote(nodes!["A missing footnote"]);
    let unreferenced = md::footnote(nodes!["http://localhost/unreferenced"])
        .push(md::p("Unreferenced, but added to the document..."));

    let para = md::p(inlines![
        "footnote ref: ",
        footnote.reference(),
        " ref again: ",
        footnote.reference(),
        " missing: ",
        missing.reference(),
        " duplicate: ",
        dup.reference(),
    ]);
    md::section(None, blocks![para, footnote, dup.clone(), dup, unreferenced]).into()
}

#[test]
fn test_footnote_checks_without_auto_references() {
    let doc = footnote_fixture();
    let (_, codes) = render_checked(&doc, Config::DEFAULT.with_auto_references(false));
    assert_eq!(codes, vec!["FOOTNOTE_MISSING", "FOOTNOTE_DUPLICATE", "FOOTNOTE_NOT_USED"]);
}

#[test]
fn test_footnote_checks_with_defaults() {
    let doc = footnote_fixture();
    let (_, codes) = render_checked(&doc, Config::DEFAULT);
    assert_eq!(codes, vec!["FOOTNOTE_DUPLICATE", "FOOTNOTE_NOT_USED"]);
}

#[test]
fn test_footnote_dedup_and_auto_append() {
    let doc = footnote_fixture();
    let (output, codes) = render_checked(&doc, dedup());
    assert_eq!(
        output,
        "\nfootnote ref: [^1] ref again: [^1] missing: [^2] duplicate: [^3]\n\
         \n[^1]: A multi\n\
         \n    paragraph\n\
         \n    foot-note\n\
         \n[^3]: A duplicated footnote\n\
         \n[^4]: http://localhost/unreferenced\n\
         \n    Unreferenced, but added to the document...\n\
         \n[^2]: A missing footnote\n"
    );
    assert_eq!(codes, vec!["FOOTNOTE_NOT_USED"]);
}

#[test]
fn test_explicit_footnote_id() {
    let note: Footnote = md::footnote(nodes!["Footnote of reference"]).with_id("refId");
    let doc: Node = md::p("Reference").push(note.reference()).into();
    assert_eq!(
        mdscribe::render(&doc).unwrap(),
        "\nReference[^refId]\n\n[^refId]: Footnote of reference\n"
    );
}

#[test]
fn test_explicit_id_takes_no_number() {
    let named: Footnote = md::footnote(nodes!["named"]).with_id("n");
    let plain = md::footnote(nodes!["plain"]);
    let doc: Node = md::p(inlines![named.reference(), plain.reference()]).into();
    assert_eq!(
        mdscribe::render(&doc).unwrap(),
        "\n[^n][^1]\n\n[^n]: named\n\n[^1]: plain\n"
    );
}

#[test]
fn test_unusable_footnote_ids_are_rejected() {
    for id in ["a]b", "two words", "", "back\\slash", "[x"] {
        let note: Footnote = md::footnote(nodes!["note"]).with_id(id);
        let doc: Node = md::p(inlines!["text", note.reference()]).into();
        match mdscribe::render(&doc) {
            Err(Error::InvalidFootnoteId { id: rejected }) => assert_eq!(rejected, id),
            other => panic!("expected {id:?} to be rejected, got {other:?}"),
        }

        let placed: Node = md::section(None, blocks![note]).into();
        assert!(matches!(mdscribe::render(&placed), Err(Error::InvalidFootnoteId { .. })));
    }

    let note: Footnote = md::footnote(nodes!["note"]).with_id("note-1_a.b");
    let doc: Node = md::p(inlines!["text", note.reference()]).into();
    assert_eq!(mdscribe::render(&doc).unwrap(), "\ntext[^note-1_a.b]\n\n[^note-1_a.b]: note\n");
}

#[test]
fn test_missing_footnote_fails_render() {
    let note = md::footnote(nodes!["Footnote not included"]);
    let doc: Node = md::p(inlines![note.reference()]).into();
    let err = Renderer::new()
        .with_config(Config::DEFAULT.with_auto_references(false))
        .render(&doc)
        .unwrap_err();
    assert!(err.to_string().contains("Footnote not included"));
    let Error::References { output, errors } = err else {
        panic!("expected reference errors");
    };
    assert_eq!(output, "\n[^1]\n");
    assert_eq!(errors[0].kind, ReferenceErrorKind::FootnoteMissing);
}

#[test]
fn test_footnote_referencing_footnote_is_appended() {
    let inner = md::footnote(nodes!["inner"]);
    let outer = md::footnote(nodes![md::p(inlines!["outer", inner.reference()])]);
    let doc: Node = md::p(inlines!["text", outer.reference()]).into();
    assert_eq!(
        mdscribe::render(&doc).unwrap(),
        "\ntext[^1]\n\n[^1]: outer[^2]\n\n[^2]: inner\n"
    );
}

#[test]
fn test_clones_share_identity() {
    let target = md::link_target("http://localhost");
    let copy = target.clone();
    let other = md::link_target("http://localhost");
    assert_eq!(target.id(), copy.id());
    assert_ne!(target.id(), other.id());

    let doc: Node = md::section(
        None,
        blocks![
            md::p(inlines![md::link_to("a", &target), md::link_to("b", &other)]),
            copy,
        ],
    )
    .into();
    assert_eq!(
        mdscribe::render(&doc).unwrap(),
        "\n[a][1][b][2]\n\n[1]: <http://localhost>\n\n[2]: <http://localhost>\n"
    );
}

// ============================================================================
// Classification
// ============================================================================

/// Codes reported for a definition referenced `uses` times and placed
/// `placements` times, with nothing appended.
fn classify(
    refer: impl Fn() -> Inline,
    define: impl Fn() -> Block,
    uses: usize,
    placements: usize,
    check: CheckReferences,
) -> Vec<&'static str> {
    let run: Vec<Inline> = (0..uses).map(|_| refer()).collect();
    let mut children = vec![Block::from(md::p(run))];
    children.extend((0..placements).map(|_| define()));
    let doc: Node = md::section(None, children).into();
    let config = Config::DEFAULT
        .with_auto_references(false)
        .with_check_references(check);
    render_checked(&doc, config).1
}

fn expected_codes(
    uses: usize,
    placements: usize,
    check: CheckReferences,
    [missing, not_used, duplicate]: [&'static str; 3],
) -> Vec<&'static str> {
    let strict = check == CheckReferences::Strict;
    if uses > 0 && placements == 0 {
        vec![missing]
    } else if strict && uses == 0 && placements > 0 {
        vec![not_used]
    } else if strict && placements > 1 {
        vec![duplicate]
    } else {
        Vec::new()
    }
}

#[test]
fn test_every_use_and_placement_count_is_classified() {
    let link_codes = ["LINK_REFERENCE_MISSING", "LINK_REFERENCE_NOT_USED", "LINK_REFERENCE_DUPLICATE"];
    let footnote_codes = ["FOOTNOTE_MISSING", "FOOTNOTE_NOT_USED", "FOOTNOTE_DUPLICATE"];

    for check in [CheckReferences::Strict, CheckReferences::Missing] {
        for uses in 0..3 {
            for placements in 0..3 {
                let target = md::link_target("http://localhost");
                let codes = classify(
                    || Inline::from(md::link_to("x", &target)),
                    || Block::from(target.clone()),
                    uses,
                    placements,
                    check,
                );
                assert_eq!(
                    codes,
                    expected_codes(uses, placements, check, link_codes),
                    "link used {uses}x, placed {placements}x, {check:?}"
                );

                let note = md::footnote(nodes!["note"]);
                let codes = classify(
                    || Inline::from(note.reference()),
                    || Block::from(note.clone()),
                    uses,
                    placements,
                    check,
                );
                assert_eq!(
                    codes,
                    expected_codes(uses, placements, check, footnote_codes),
                    "footnote used {uses}x, placed {placements}x, {check:?}"
                );
            }
        }
    }
}

#[test]
fn test_classification_of_corner_counts() {
    let target = md::link_target("http://localhost");
    let refer = || Inline::from(md::link_to("x", &target));
    let define = || Block::from(target.clone());
    // Placed twice but never used: reported as unused, not duplicated.
    assert_eq!(classify(refer, define, 0, 2, CheckReferences::Strict), vec!["LINK_REFERENCE_NOT_USED"]);
    assert_eq!(classify(refer, define, 2, 2, CheckReferences::Strict), vec!["LINK_REFERENCE_DUPLICATE"]);
    assert!(classify(refer, define, 2, 2, CheckReferences::Missing).is_empty());
}
