//! Filter suffixes, default chains and the non-HTML dialects.

use zencode::{expand_markup, Dialect, ExpandError, ExpansionContext, RenderOptions};

fn expand_with(abbreviation: &str, options: &RenderOptions) -> Result<String, ExpandError> {
    expand_markup(&mut ExpansionContext::new(), abbreviation, options)
}

fn expand(abbreviation: &str) -> Result<String, ExpandError> {
    expand_with(abbreviation, &RenderOptions::default())
}

#[test]
fn commented_html_marks_selectors() {
    insta::assert_snapshot!(expand("div#x.y>p.z|c").unwrap(), @r###"
<!-- #x.y -->
<div id="x" class="y">
    <!-- .z -->
    <p class="z"></p>
    <!-- /.z -->
</div>
<!-- /#x.y -->
"###);
    assert_eq!(expand("span>b|c").unwrap(), "<span><b></b></span>");
}

#[test]
fn haml_nests_by_indentation() {
    insta::assert_snapshot!(expand("ul>li.item$*2|haml").unwrap(), @r###"
%ul
    %li.item1
    %li.item2
"###);
}

#[test]
fn haml_drops_implicit_div() {
    assert_eq!(expand("#nav.top|haml").unwrap(), "#nav.top");
}

#[test]
fn hiccup_vectors() {
    assert_eq!(
        expand("a[href=/]{x}|hic").unwrap(),
        r#"[:a {:href "/"} "x"]"#
    );
    insta::assert_snapshot!(expand("ul>li*2|hic").unwrap(), @r###"
[:ul
    [:li]
    [:li]]
"###);
}

#[test]
fn escape_runs_after_rendering() {
    assert_eq!(expand("p{<b>}|e").unwrap(), "&lt;p&gt;&lt;b&gt;&lt;/p&gt;");
    assert_eq!(expand("p|html|e").unwrap(), "&lt;p&gt;&lt;/p&gt;");
}

#[test]
fn renderer_after_escape_is_rejected() {
    assert_eq!(
        expand("p|e|html").unwrap_err(),
        ExpandError::FilterOrder("html".to_string())
    );
}

#[test]
fn unknown_filter_aborts_the_chain() {
    assert_eq!(
        expand("p|html|nope").unwrap_err(),
        ExpandError::UnknownFilter("nope".to_string())
    );
}

#[test]
fn empty_filter_names_are_skipped() {
    assert_eq!(expand("p||").unwrap(), "<p></p>");
}

#[test]
fn document_extension_selects_the_default_chain() {
    let options = RenderOptions::default().with_extension("haml");
    assert_eq!(expand_with("div.a", &options).unwrap(), ".a");
    let options = RenderOptions::default().with_extension("cljs");
    assert_eq!(expand_with("p", &options).unwrap(), "[:p]");
}

#[test]
fn output_dialect_applies_without_a_mapping() {
    let options = RenderOptions::default().with_dialect(Dialect::Haml);
    assert_eq!(expand_with("p{hi}", &options).unwrap(), "%p\n    hi");
    let options = RenderOptions::default()
        .with_dialect(Dialect::Hiccup)
        .with_extension("txt");
    assert_eq!(expand_with("p", &options).unwrap(), "[:p]");
}

#[test]
fn explicit_filter_wins_over_the_extension() {
    let options = RenderOptions::default().with_extension("haml");
    assert_eq!(expand_with("p|html", &options).unwrap(), "<p></p>");
}
