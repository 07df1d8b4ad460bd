//! End-to-end markup expansion against the built-in tables.

use rstest::rstest;
use zencode::{expand_markup, ExpandError, ExpansionContext, RenderOptions};

fn expand(abbreviation: &str) -> Result<String, ExpandError> {
    let mut ctx = ExpansionContext::builder()
        .tables(zencode::Tables::builtin())
        .seed(42)
        .build()
        .expect("builtin tables are valid");
    expand_markup(&mut ctx, abbreviation, &RenderOptions::default())
}

#[rstest]
#[case("foo", "<foo></foo>")]
#[case("div#a.b.c", r#"<div id="a" class="b c"></div>"#)]
#[case("p+p", "<p></p>\n<p></p>")]
#[case("br", "<br/>")]
#[case("foo/", "<foo/>")]
#[case("img", r#"<img src="" alt=""/>"#)]
#[case("a{click$}*3", "<a href=\"\">click1</a>\n<a href=\"\">click2</a>\n<a href=\"\">click3</a>")]
#[case("span{$$@-3}*2", "<span>04</span>\n<span>03</span>")]
#[case("h$*2", "<h1></h1>\n<h2></h2>")]
#[case(".box", r#"<div class="box"></div>"#)]
#[case("#main{hi}", r#"<div id="main">hi</div>"#)]
#[case("p{a \\} b}", "<p>a } b</p>")]
#[case("a[href=/ title=\"x y\"]", r#"<a href="/" title="x y"></a>"#)]
#[case("(a+b)*2", "<a href=\"\"></a>\n<b></b>\n<a href=\"\"></a>\n<b></b>")]
#[case("span*0", "")]
#[case("bq.quote", r#"<blockquote class="quote"></blockquote>"#)]
#[case("!!!", "<!doctype html>")]
fn single_line_expansions(#[case] abbreviation: &str, #[case] expected: &str) {
    assert_eq!(expand(abbreviation).unwrap(), expected, "{abbreviation}");
}

#[test]
fn list_items_nest_one_level_inside_the_list() {
    insta::assert_snapshot!(expand("ul>li*3").unwrap(), @r###"
<ul>
    <li></li>
    <li></li>
    <li></li>
</ul>
"###);
}

#[test]
fn outer_multiplier_numbers_the_children() {
    assert_eq!(
        expand("li.item$*2>span{$}").unwrap(),
        "<li class=\"item1\"><span>1</span></li>\n<li class=\"item2\"><span>2</span></li>"
    );
}

#[test]
fn expand_shorthand_adds_the_default_child() {
    insta::assert_snapshot!(expand("ul+").unwrap(), @r###"
<ul>
    <li></li>
</ul>
"###);
    insta::assert_snapshot!(expand("dl++p").unwrap(), @r###"
<dl>
    <dt></dt>
    <dd></dd>
</dl>
<p></p>
"###);
}

#[test]
fn document_alias_expands_in_full() {
    insta::assert_snapshot!(expand("html:5").unwrap(), @r###"
<!doctype html>
<html lang="en">
    <head>
        <meta charset="UTF-8"/>
        <title>Document</title>
    </head>
    <body></body>
</html>
"###);
}

#[test]
fn alias_attributes_merge_with_the_caller() {
    assert_eq!(
        expand("input:text.x").unwrap(),
        r#"<input class="x" type="text" name="" id=""/>"#
    );
}

#[test]
fn tag_snippet_wraps_children() {
    assert_eq!(
        expand("cc:ie>p").unwrap(),
        "<!--[if IE]>\n    <p></p>\n<![endif]-->"
    );
}

#[test]
fn tag_snippet_reindents_nested_children() {
    assert_eq!(
        expand("cc:ie>ul>li*2").unwrap(),
        "<!--[if IE]>\n    <ul>\n        <li></li>\n        <li></li>\n    </ul>\n<![endif]-->"
    );
}

#[test]
fn lorem_fills_the_parent_with_words() {
    let out = expand("p>lorem5").unwrap();
    let inner = out
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
        .expect("a single paragraph");
    assert_eq!(inner.split_whitespace().count(), 5);
}

#[test]
fn lorem_is_reproducible_with_a_seed() {
    assert_eq!(expand("p*3>lipsum").unwrap(), expand("p*3>lipsum").unwrap());
}

#[test]
fn class_attribute_name_follows_the_options() {
    let mut ctx = ExpansionContext::new();
    let options = RenderOptions::default().with_class_attribute("className");
    assert_eq!(
        expand_markup(&mut ctx, "div.a", &options).unwrap(),
        r#"<div className="a"></div>"#
    );
}

#[rstest]
#[case("div>")]
#[case("div+")]
#[case("(div")]
#[case("div)")]
#[case("ul>>li")]
#[case("")]
fn dangling_operators_produce_no_output(#[case] abbreviation: &str) {
    assert!(matches!(expand(abbreviation), Err(ExpandError::Parse(_))));
}

#[test]
fn deep_nesting_hits_the_depth_limit() {
    let abbreviation = format!("{}a", "a>".repeat(200));
    assert!(matches!(
        expand(&abbreviation),
        Err(ExpandError::LimitExceeded { .. })
    ));
}

#[test]
fn long_sibling_chain_renders_without_deep_recursion() {
    let abbreviation = format!("{}p", "p+".repeat(5_000));
    let out = expand(&abbreviation).unwrap();
    assert_eq!(out.lines().count(), 5_001);
    assert!(out.lines().all(|line| line == "<p></p>"));
}

#[test]
fn grafting_onto_multiplied_groups_hits_the_node_limit() {
    assert!(matches!(
        expand("(a*100)>(b*100)>(c*100)"),
        Err(ExpandError::LimitExceeded { .. })
    ));
}

#[test]
fn huge_multiplier_hits_the_node_limit() {
    assert!(matches!(
        expand("p*99999999"),
        Err(ExpandError::LimitExceeded { .. })
    ));
}
