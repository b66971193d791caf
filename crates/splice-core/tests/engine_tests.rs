//! Tests for the PatchEngine

use pretty_assertions::assert_eq;
use rstest::rstest;
use splice_core::{ApplyOptions, Error, PatchEngine, ReplacementSet};
use splice_test_utils::TestTree;

fn engine_for(tree: &TestTree, yaml: &str) -> PatchEngine {
    PatchEngine::new(tree.root(), ReplacementSet::from_yaml(yaml).unwrap())
}

const GO_TARGET: &str = "\
package es

// internal version: replace import begin
import \"old\"
// internal version: replace import end

func resource() {
\t// internal version: replace setTag begin
\told()
\t// internal version: replace setTag end
}
";

#[test]
fn apply_rewrites_regions_in_place() {
    let tree = TestTree::new();
    tree.write_file("services/vod/resource.go", GO_TARGET);
    let engine = engine_for(
        &tree,
        "\
targets:
  services/vod/resource.go:
    regions:
      import: |-
        import \"new\"
      setTag: svc.SetTag(ctx)
",
    );

    let report = engine.apply(ApplyOptions::default()).unwrap();

    assert_eq!(
        tree.read_file("services/vod/resource.go"),
        "\
package es

import \"new\"

func resource() {
\tsvc.SetTag(ctx)
}
"
    );
    assert_eq!(report.files_processed, 1);
    assert_eq!(report.regions_replaced, 2);
    assert_eq!(report.regions_removed, 0);
    assert_eq!(
        report.actions,
        vec!["rewrote services/vod/resource.go (2 spans)".to_string()]
    );
}

#[test]
fn apply_deletes_regions_without_a_configured_key() {
    let tree = TestTree::new();
    tree.write_file("services/vod/resource.go", GO_TARGET);
    let engine = engine_for(
        &tree,
        "\
targets:
  services/vod/resource.go:
    regions:
      import: |-
        import \"new\"
",
    );

    let report = engine.apply(ApplyOptions::default()).unwrap();

    assert_eq!(report.regions_replaced, 1);
    assert_eq!(report.regions_removed, 1);
    assert_eq!(
        tree.read_file("services/vod/resource.go"),
        "\
package es

import \"new\"

func resource() {
\t
}
"
    );
}

#[test]
fn apply_overwrites_and_appends() {
    let tree = TestTree::new();
    tree.write_file("VERSION", "1.0.0\n");
    tree.write_file("go.mod", "module example.com/app\n\ngo 1.22\n");
    let engine = engine_for(
        &tree,
        "\
targets:
  VERSION:
    overwrite: |
      2.0.0
  go.mod:
    append: |
      require example.com/sdk v1.2.0
",
    );

    let report = engine.apply(ApplyOptions::default()).unwrap();

    assert_eq!(report.files_processed, 2);
    assert_eq!(tree.read_file("VERSION"), "2.0.0\n");
    assert_eq!(
        tree.read_file("go.mod"),
        "module example.com/app\n\ngo 1.22\nrequire example.com/sdk v1.2.0\n"
    );
    assert_eq!(report.actions.len(), 2);
    assert!(report.actions[0].contains("overwrote VERSION"));
    assert!(report.actions[1].contains("appended"));
}

#[test]
fn targets_run_in_document_order_and_abort_on_first_failure() {
    let tree = TestTree::new();
    tree.write_file("first.txt", "old\n");
    tree.write_file("third.txt", "old\n");
    let engine = engine_for(
        &tree,
        "\
targets:
  first.txt:
    overwrite: new
  second.txt:
    overwrite: new
  third.txt:
    overwrite: new
",
    );

    let err = engine.apply(ApplyOptions::default()).unwrap_err();

    assert!(matches!(err, Error::TargetNotFound { .. }));
    assert!(err.to_string().contains("second.txt"));
    // The failing target aborts the run but does not roll back earlier writes.
    assert_eq!(tree.read_file("first.txt"), "new");
    assert_eq!(tree.read_file("third.txt"), "old\n");
}

#[test]
fn dry_run_reports_changes_without_writing() {
    let tree = TestTree::new();
    tree.write_file("services/vod/resource.go", GO_TARGET);
    tree.write_file("VERSION", "1.0.0\n");
    let engine = engine_for(
        &tree,
        "\
targets:
  services/vod/resource.go:
    regions:
      import: |-
        import \"new\"
      setTag: svc.SetTag(ctx)
  VERSION:
    overwrite: 2.0.0
",
    );

    let report = engine.apply(ApplyOptions { dry_run: true }).unwrap();

    assert_eq!(tree.read_file("services/vod/resource.go"), GO_TARGET);
    assert_eq!(tree.read_file("VERSION"), "1.0.0\n");
    assert_eq!(report.files_processed, 2);
    assert_eq!(report.regions_replaced, 2);
    assert!(report.actions.iter().all(|a| a.starts_with("[dry-run]")));
}

#[rstest]
#[case::regions("regions:\n      k: v")]
#[case::overwrite("overwrite: x")]
#[case::append("append: x")]
fn every_directive_kind_requires_the_target_to_exist(#[case] directive: &str) {
    let tree = TestTree::new();
    let yaml = format!("targets:\n  ghost.go:\n    {directive}\n");
    let engine = engine_for(&tree, &yaml);

    let err = engine.apply(ApplyOptions::default()).unwrap_err();

    assert!(matches!(err, Error::TargetNotFound { .. }));
    assert!(err.to_string().contains("ghost.go"));
}

#[test]
fn malformed_markers_abort_without_touching_the_file() {
    let tree = TestTree::new();
    let broken = "// internal version: replace gone begin\nbody\n";
    tree.write_file("a.go", broken);
    let engine = engine_for(
        &tree,
        "\
targets:
  a.go:
    regions:
      gone: fixed
",
    );

    let err = engine.apply(ApplyOptions::default()).unwrap_err();

    assert!(matches!(err, Error::Marker { .. }));
    assert!(err.to_string().contains("a.go"));
    assert!(err.to_string().contains("never closed"));
    assert_eq!(tree.read_file("a.go"), broken);
}

#[test]
fn second_apply_is_a_no_op() {
    let tree = TestTree::new();
    tree.write_file("services/vod/resource.go", GO_TARGET);
    let yaml = "\
targets:
  services/vod/resource.go:
    regions:
      import: |-
        import \"new\"
      setTag: svc.SetTag(ctx)
";
    let engine = engine_for(&tree, yaml);

    engine.apply(ApplyOptions::default()).unwrap();
    let after_first = tree.read_file("services/vod/resource.go");

    let report = engine.apply(ApplyOptions::default()).unwrap();

    assert_eq!(tree.read_file("services/vod/resource.go"), after_first);
    assert_eq!(report.regions_replaced, 0);
    assert!(report.actions.is_empty());
}

#[test]
fn bare_dialect_substitutes_compact_html_regions() {
    let tree = TestTree::new();
    tree.write_file("README.md", "a\n<!--begin FOO-->old<!--end FOO-->\nb");
    let engine = engine_for(
        &tree,
        "\
dialect: bare
targets:
  README.md:
    regions:
      FOO: new
",
    );

    engine.apply(ApplyOptions::default()).unwrap();

    assert_eq!(tree.read_file("README.md"), "a\nnew\nb");
}

#[test]
fn bare_dialect_removes_unconfigured_html_regions() {
    let tree = TestTree::new();
    tree.write_file("README.md", "a\n<!--begin FOO-->old<!--end FOO-->\nb");
    let engine = engine_for(
        &tree,
        "\
dialect: bare
targets:
  README.md:
    regions: {}
",
    );

    engine.apply(ApplyOptions::default()).unwrap();

    assert_eq!(tree.read_file("README.md"), "a\n\nb");
}

#[test]
fn marked_lines_are_replaced_or_deleted() {
    let tree = TestTree::new();
    tree.write_file(
        "app/build.gradle",
        "plugins {\n}\n// yunti mark sdk\n// yunti mark move\n",
    );
    let engine = engine_for(
        &tree,
        "\
targets:
  app/build.gradle:
    regions:
      sdk: implementation sdk
",
    );

    let report = engine.apply(ApplyOptions::default()).unwrap();

    assert_eq!(
        tree.read_file("app/build.gradle"),
        "plugins {\n}\nimplementation sdk\n"
    );
    assert_eq!(report.lines_replaced, 1);
    assert_eq!(report.lines_removed, 1);
}

#[test]
fn diff_renders_unified_hunks_for_changed_targets_only() {
    let tree = TestTree::new();
    tree.write_file("services/vod/resource.go", GO_TARGET);
    tree.write_file("unchanged.txt", "same\n");
    let engine = engine_for(
        &tree,
        "\
targets:
  services/vod/resource.go:
    regions:
      import: |-
        import \"new\"
      setTag: svc.SetTag(ctx)
  unchanged.txt:
    overwrite: |
      same
",
    );

    let diffs = engine.diff().unwrap();

    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path, "services/vod/resource.go");
    assert!(diffs[0].unified.contains("--- a/services/vod/resource.go"));
    assert!(diffs[0].unified.contains("+import \"new\""));
    assert!(diffs[0].unified.contains("-import \"old\""));
    // Diffing never writes.
    assert_eq!(tree.read_file("services/vod/resource.go"), GO_TARGET);
}

#[test]
fn diff_fails_on_missing_targets() {
    let tree = TestTree::new();
    let engine = engine_for(
        &tree,
        "\
targets:
  ghost.go:
    overwrite: x
",
    );

    let err = engine.diff().unwrap_err();

    assert!(matches!(err, Error::TargetNotFound { .. }));
}

#[test]
fn diff_previews_appends() {
    let tree = TestTree::new();
    tree.write_file("go.mod", "module example.com/app\n");
    let engine = engine_for(
        &tree,
        "\
targets:
  go.mod:
    append: |
      require example.com/sdk v1.2.0
",
    );

    let diffs = engine.diff().unwrap();

    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].unified.contains("+require example.com/sdk v1.2.0"));
    assert_eq!(tree.read_file("go.mod"), "module example.com/app\n");
}
