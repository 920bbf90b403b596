use std::fs;
use std::path::Path;

use indoc::indoc;

use crate::config::Config;
use crate::diagnostics::DiagnosticKind;
use crate::mods::{self, Mod, ModOutcome};
use crate::pipeline::{Pipeline, convert_source, discover};
use crate::Error;

const API: &str = "com/bitwig/extension/controller/api";

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn source_tree(root: &Path) {
    write(
        root,
        &format!("{API}/SoloValue.java"),
        indoc! {r#"
            package com.bitwig.extension.controller.api;

            public interface SoloValue extends SettableBooleanValue {
                void toggle(boolean exclusive);
            }
        "#},
    );
    write(
        root,
        &format!("{API}/SettableBooleanValue.java"),
        indoc! {r#"
            package com.bitwig.extension.controller.api;

            import java.util.function.Consumer;
            import com.bitwig.extension.callback.BooleanValueChangedCallback;

            public interface SettableBooleanValue {
                void set(boolean value);
                void addValueObserver(BooleanValueChangedCallback callback);
            }
        "#},
    );
    write(
        root,
        "com/bitwig/extension/callback/BooleanValueChangedCallback.java",
        indoc! {r#"
            package com.bitwig.extension.callback;

            public interface BooleanValueChangedCallback {
                void valueChanged(boolean newValue);
            }
        "#},
    );
    write(root, "README.txt", "not java");
}

fn solo_mod() -> Mod {
    Mod::literal(
        &format!("{API}/SoloValue.d.ts"),
        "interface SoloValue",
        "// @ts-ignore\ninterface SoloValue",
    )
}

#[test]
fn end_to_end_with_ignore_mod() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    source_tree(&src);
    let out = dir.path().join("out/api.d.ts");

    let config = Config::new()
        .mods(vec![solo_mod()])
        .trailer("declare const host: com.bitwig.extension.controller.api.SoloValue;");
    let report = Pipeline::new(config).run(&src, &out).unwrap();

    assert_eq!(report.files, 3);
    assert_eq!(report.declarations, 3);
    assert_eq!(report.mods, [ModOutcome::Applied(1)]);
    assert_eq!(report.warning_count(), 0);

    let artifact = fs::read_to_string(&out).unwrap();
    insta::assert_snapshot!(artifact, @r"
    declare namespace com.bitwig.extension.callback {
      // source: com/bitwig/extension/callback/BooleanValueChangedCallback.java
      interface BooleanValueChangedCallback {
        (newValue: boolean): void;
      }
    }

    declare namespace com.bitwig.extension.controller.api {
      // source: com/bitwig/extension/controller/api/SettableBooleanValue.java
      import BooleanValueChangedCallback = com.bitwig.extension.callback.BooleanValueChangedCallback;

      interface SettableBooleanValue {
        set(value: boolean): void;
        addValueObserver(callback: BooleanValueChangedCallback): void;
      }

      // source: com/bitwig/extension/controller/api/SoloValue.java
      // @ts-ignore
      interface SoloValue extends SettableBooleanValue {
        toggle(exclusive: boolean): void;
      }
    }

    declare const host: com.bitwig.extension.controller.api.SoloValue;
    ");
    assert!(artifact.contains("  // @ts-ignore\n  interface SoloValue"));
    assert!(!dir.path().join("out/api.d.ts.parts").exists());
}

#[test]
fn runs_are_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    source_tree(&src);

    let pipeline = Pipeline::new(Config::new().mods(vec![solo_mod()]));
    pipeline.run(&src, &dir.path().join("a.d.ts")).unwrap();
    pipeline.run(&src, &dir.path().join("b.d.ts")).unwrap();

    let a = fs::read(dir.path().join("a.d.ts")).unwrap();
    let b = fs::read(dir.path().join("b.d.ts")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn scratch_tree_can_be_kept() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    source_tree(&src);
    let scratch = dir.path().join("parts");

    let config = Config::new()
        .mods(vec![solo_mod()])
        .scratch_dir(&scratch)
        .keep_scratch(true);
    Pipeline::new(config)
        .run(&src, &dir.path().join("api.d.ts"))
        .unwrap();

    let blob = fs::read_to_string(scratch.join(format!("{API}/SoloValue.d.ts"))).unwrap();
    assert!(blob.starts_with("namespace com.bitwig.extension.controller.api\n"));
    assert!(blob.contains("// @ts-ignore\ninterface SoloValue"));
}

#[test]
fn kept_scratch_is_cleared_by_next_run() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    source_tree(&src);
    let scratch = dir.path().join("parts");
    let out = dir.path().join("api.d.ts");

    let config = Config::new().scratch_dir(&scratch);
    Pipeline::new(config.clone().keep_scratch(true))
        .run(&src, &out)
        .unwrap();
    write(&scratch, &format!("{API}/Removed.d.ts"), "namespace gone\n");
    Pipeline::new(config).run(&src, &out).unwrap();

    assert!(!scratch.join(API).exists());
    assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
}

#[test]
fn foreign_scratch_directory_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    source_tree(&src);
    let mine = dir.path().join("mywork");
    write(&mine, "precious.txt", "keep me");
    let out = dir.path().join("api.d.ts");

    let err = Pipeline::new(Config::new().scratch_dir(&mine))
        .run(&src, &out)
        .unwrap_err();

    assert!(matches!(err, Error::ScratchNotEmpty { .. }));
    assert_eq!(fs::read_to_string(mine.join("precious.txt")).unwrap(), "keep me");
    assert!(!out.exists());
}

#[test]
fn empty_scratch_directory_survives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    source_tree(&src);
    let mine = dir.path().join("mywork");
    fs::create_dir(&mine).unwrap();

    Pipeline::new(Config::new().scratch_dir(&mine))
        .run(&src, &dir.path().join("api.d.ts"))
        .unwrap();

    assert!(mine.is_dir());
    assert_eq!(fs::read_dir(&mine).unwrap().count(), 0);
}

#[test]
fn plugin_host_preset_runs_reproducibly() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    source_tree(&src);
    write(
        &src,
        &format!("{API}/ControllerHost.java"),
        indoc! {r#"
            package com.bitwig.extension.controller.api;

            import java.util.ArrayList;

            public interface ControllerHost {
                ArrayList<Track> getTracks();
                void println(String message);
            }
        "#},
    );
    let scratch = dir.path().join("parts");
    let config = Config::plugin_host()
        .unwrap()
        .scratch_dir(&scratch)
        .keep_scratch(true);
    let pipeline = Pipeline::new(config);

    let first = pipeline.run(&src, &dir.path().join("a.d.ts")).unwrap();
    let second = pipeline.run(&src, &dir.path().join("b.d.ts")).unwrap();

    let expected = [ModOutcome::Applied(1), ModOutcome::Applied(1)];
    assert_eq!(first.mods, expected);
    assert_eq!(second.mods, expected);

    let a = fs::read_to_string(dir.path().join("a.d.ts")).unwrap();
    let b = fs::read_to_string(dir.path().join("b.d.ts")).unwrap();
    assert_eq!(a, b);
    assert!(a.contains("    getTracks(): Track[];"));
    assert!(a.contains("  // @ts-ignore\n  interface SoloValue"));
    assert!(!a.contains("ArrayList"));

    let again = mods::apply_mods(&scratch, &pipeline.config().mods).unwrap();
    assert_eq!(again, [ModOutcome::AlreadyApplied; 2]);
}

#[test]
fn stale_mod_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    source_tree(&src);
    let out = dir.path().join("api.d.ts");

    let stale = Mod::literal(&format!("{API}/SoloValue.d.ts"), "interface Gone", "interface Went");
    let err = Pipeline::new(Config::new().mods(vec![stale]))
        .run(&src, &out)
        .unwrap_err();

    assert!(matches!(err, Error::StaleMod { index: 0, .. }));
    assert!(!out.exists());
}

#[test]
fn warnings_are_reported_per_file() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "p/Outer.java",
        "package p;\ninterface Outer { class Inner {} ; }\n",
    );

    let report = Pipeline::new(Config::new())
        .run(dir.path(), &dir.path().join("out.d.ts"))
        .unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warning_count(), 2);
    assert_eq!(
        report.warnings[0].diagnostics.kinds(),
        [DiagnosticKind::NestedDeclaration, DiagnosticKind::EmptyMember]
    );
    assert!(report.warnings[0].source.contains("class Inner"));
}

#[test]
fn discover_keeps_java_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b/B.java", "");
    write(dir.path(), "a/Z.java", "");
    write(dir.path(), "a/A.java", "");
    write(dir.path(), "a/notes.md", "");

    let found = discover(dir.path()).unwrap();
    let found: Vec<_> = found.iter().map(|p| p.to_string_lossy().replace('\\', "/")).collect();
    assert_eq!(found, ["a/A.java", "a/Z.java", "b/B.java"]);
}

#[test]
fn missing_source_dir_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = discover(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn missing_package_is_fatal() {
    let err = convert_source(Path::new("A.java"), "interface A {}\n", &Config::new()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"A.java: missing package declaration");
}

#[test]
fn syntax_error_is_fatal() {
    let err = convert_source(
        Path::new("A.java"),
        "package p;\ninterface A { void broken( }\n",
        &Config::new(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Syntax { .. }));
}
