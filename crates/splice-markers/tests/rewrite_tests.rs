use pretty_assertions::assert_eq;
use rstest::rstest;
use splice_markers::{CommentStyle, MarkerDialect, MarkerSyntax, RegionMap, rewrite};

fn map(pairs: &[(&str, &str)]) -> RegionMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn bare_html() -> MarkerSyntax {
    MarkerSyntax::new(CommentStyle::Html, MarkerDialect::Bare)
}

#[test]
fn test_region_substituted_in_place() {
    let text = "a\n<!--begin FOO-->old<!--end FOO-->\nb";
    let outcome = rewrite(text, &bare_html(), &map(&[("FOO", "new")])).unwrap();
    assert_eq!(outcome.text, "a\nnew\nb");
    assert_eq!(outcome.regions_replaced, 1);
}

#[test]
fn test_region_removed_when_key_absent() {
    let text = "a\n<!--begin FOO-->old<!--end FOO-->\nb";
    let outcome = rewrite(text, &bare_html(), &RegionMap::new()).unwrap();
    assert_eq!(outcome.text, "a\n\nb");
    assert_eq!(outcome.regions_removed, 1);
}

#[test]
fn test_rewrite_is_idempotent() {
    let text = "a\n<!--begin FOO-->old<!--end FOO-->\nb";
    let replacements = map(&[("FOO", "new")]);
    let first = rewrite(text, &bare_html(), &replacements).unwrap();
    let second = rewrite(&first.text, &bare_html(), &replacements).unwrap();
    assert_eq!(second.text, first.text);
    assert_eq!(second.total(), 0);
}

#[test]
fn test_distinct_keys_are_independent() {
    let text = "p<!--begin k1-->a<!--end k1-->q<!--begin k2-->b<!--end k2-->r";
    let first = rewrite(text, &bare_html(), &map(&[("k1", "X"), ("k2", "Y")])).unwrap();
    let second = rewrite(text, &bare_html(), &map(&[("k1", "Z"), ("k2", "Y")])).unwrap();
    assert_eq!(first.text, "pXqYr");
    assert_eq!(second.text, "pZqYr");
}

#[test]
fn test_repeated_key_regions_all_substituted_in_one_pass() {
    let text = "a<!--begin F-->1<!--end F-->b<!--begin F-->2<!--end F-->c";
    let outcome = rewrite(text, &bare_html(), &map(&[("F", "X")])).unwrap();
    assert_eq!(outcome.text, "aXbXc");
    assert_eq!(outcome.regions_replaced, 2);
}

#[test]
fn test_keys_without_regions_are_ignored() {
    let text = "a\n<!--begin FOO-->old<!--end FOO-->\nb";
    let outcome = rewrite(text, &bare_html(), &map(&[("FOO", "new"), ("UNUSED", "x")])).unwrap();
    assert_eq!(outcome.text, "a\nnew\nb");
    assert_eq!(outcome.total(), 1);
}

#[test]
fn test_plain_text_passes_through_unchanged() {
    let text = "nothing marked here\njust lines\n";
    let outcome = rewrite(text, &bare_html(), &map(&[("FOO", "new")])).unwrap();
    assert_eq!(outcome.text, text);
    assert_eq!(outcome.total(), 0);
}

#[rstest]
#[case::slash(CommentStyle::Slash)]
#[case::hash(CommentStyle::Hash)]
#[case::html(CommentStyle::Html)]
fn test_versioned_round_trip_across_styles(#[case] style: CommentStyle) {
    let syntax = MarkerSyntax::new(style, MarkerDialect::Versioned);
    let text = format!(
        "before\n{}\nold body\n{}\nafter\n",
        syntax.format_begin("impl"),
        syntax.format_end("impl")
    );
    let outcome = rewrite(&text, &syntax, &map(&[("impl", "new body")])).unwrap();
    assert_eq!(outcome.text, "before\nnew body\nafter\n");
}

#[test]
fn test_versioned_markers_with_annotation_trailer() {
    let text = "\
package es

func resource() {
	//internal version: replace setTag begin, please do not modify this annotation and refrain from inserting any code between the beginning and end lines of the annotation.
	tagService := svc.NewTagService()
	//internal version: replace setTag end, please do not modify this annotation and refrain from inserting any code between the beginning and end lines of the annotation.
}
";
    let syntax = MarkerSyntax::new(CommentStyle::Slash, MarkerDialect::Versioned);
    let replaced = rewrite(
        text,
        &syntax,
        &map(&[("setTag", "tagService := internal.NewTagService()")]),
    )
    .unwrap();
    assert_eq!(
        replaced.text,
        "\
package es

func resource() {
	tagService := internal.NewTagService()
}
"
    );

    let removed = rewrite(text, &syntax, &RegionMap::new()).unwrap();
    assert_eq!(removed.text, "package es\n\nfunc resource() {\n\t\n}\n");
}

#[test]
fn test_keys_named_begin_and_end_substitute_independently() {
    let syntax = MarkerSyntax::new(CommentStyle::Slash, MarkerDialect::Versioned);
    let text = "\
func update() {
	//internal version: replace begin begin, please do not modify this annotation.
	//internal version: replace begin end, please do not modify this annotation.
	work()
	//internal version: replace end begin, please do not modify this annotation.
	//internal version: replace end end, please do not modify this annotation.
}
";
    let replaced = rewrite(
        text,
        &syntax,
        &map(&[("begin", "setup()"), ("end", "teardown()")]),
    )
    .unwrap();

    assert_eq!(
        replaced.text,
        "func update() {\n\tsetup()\n\twork()\n\tteardown()\n}\n"
    );
    assert_eq!(replaced.regions_replaced, 2);
}

#[test]
fn test_empty_region_between_adjacent_markers() {
    let syntax = MarkerSyntax::new(CommentStyle::Slash, MarkerDialect::Versioned);
    let text = format!(
        "head\n{}\n{}\ntail\n",
        syntax.format_begin("gap"),
        syntax.format_end("gap")
    );
    let outcome = rewrite(&text, &syntax, &map(&[("gap", "filled")])).unwrap();
    assert_eq!(outcome.text, "head\nfilled\ntail\n");
}

#[test]
fn test_reintroduced_markers_are_left_verbatim() {
    let text = "a\n<!--begin FOO-->old<!--end FOO-->\nb";
    let replacements = map(&[("FOO", "<!--begin FOO-->z<!--end FOO-->")]);
    let first = rewrite(text, &bare_html(), &replacements).unwrap();
    assert_eq!(first.text, "a\n<!--begin FOO-->z<!--end FOO-->\nb");

    // A later pass treats the re-introduced pair as an ordinary region.
    let second = rewrite(&first.text, &bare_html(), &RegionMap::new()).unwrap();
    assert_eq!(second.text, "a\n\nb");
}

#[test]
fn test_inline_html_region_shares_line_with_content() {
    let text = "keep <!--begin w-->x<!--end w--> keep";
    let outcome = rewrite(text, &bare_html(), &map(&[("w", "y")])).unwrap();
    assert_eq!(outcome.text, "keep y keep");
}

#[test]
fn test_malformed_pairing_rewrites_nothing() {
    let text = "a\n<!--begin FOO-->old\nb";
    let err = rewrite(text, &bare_html(), &map(&[("FOO", "new")])).unwrap_err();
    assert!(err.to_string().contains("never closed"));
}
