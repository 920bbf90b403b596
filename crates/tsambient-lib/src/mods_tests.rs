use indoc::indoc;

use crate::Error;
use crate::config::Config;
use crate::mods::{Mod, ModOutcome, apply_mods, apply_to_text, declaration_block};

const BLOB: &str = indoc! {"
    namespace com.example.api

    interface SoloValue extends SettableBooleanValue {
      toggle(exclusive: boolean): void;
    }

    interface Track {
      getItems(): List<Item>;
      getOther(): List<Item>;
    }
"};

fn apply(m: &Mod, text: &str) -> (String, ModOutcome) {
    apply_to_text(0, m, text).unwrap()
}

#[test]
fn prefix_insertion_lands_before_declaration() {
    let m = Mod::literal(
        "SoloValue.d.ts",
        "interface SoloValue",
        "// @ts-ignore\ninterface SoloValue",
    );
    let (out, outcome) = apply(&m, BLOB);

    assert_eq!(outcome, ModOutcome::Applied(1));
    assert!(out.contains("// @ts-ignore\ninterface SoloValue extends SettableBooleanValue {"));
}

#[test]
fn applying_twice_equals_applying_once() {
    let mods = [
        Mod::literal(
            "SoloValue.d.ts",
            "interface SoloValue",
            "// @ts-ignore\ninterface SoloValue",
        ),
        Mod::pattern("Track.d.ts", r"List<(\w+)>", "${1}[]").applied_when(r"\w+\[\];"),
        Mod::pattern("Track.d.ts", r"(toggle\(exclusive: boolean\): void;)", "$1\n  flip(): void;"),
    ];

    let run = |text: &str| {
        mods.iter().fold((text.to_string(), Vec::new()), |(acc, mut outcomes), m| {
            let (out, outcome) = apply(m, &acc);
            outcomes.push(outcome);
            (out, outcomes)
        })
    };
    let (once, first) = run(BLOB);
    let (twice, second) = run(&once);

    assert_eq!(once, twice);
    assert_eq!(
        first,
        [ModOutcome::Applied(1), ModOutcome::Applied(2), ModOutcome::Applied(1)]
    );
    assert_eq!(second, [ModOutcome::AlreadyApplied; 3]);
    assert_eq!(once.matches("// @ts-ignore").count(), 1);
    assert_eq!(once.matches("flip(): void;").count(), 1);
}

#[test]
fn capture_replacement_needs_applied_pattern_to_be_recognised() {
    let plain = Mod::pattern("Track.d.ts", r"List<(\w+)>", "${1}[]");
    let (once, _) = apply(&plain, BLOB);
    assert_eq!(apply(&plain, &once).1, ModOutcome::NoMatch);

    let recognised = plain.applied_when(r"\(\): \w+\[\];");
    assert_eq!(apply(&recognised, &once).1, ModOutcome::AlreadyApplied);
}

#[test]
fn invalid_applied_pattern_is_an_error() {
    let m = Mod::pattern("Track.d.ts", r"Missing", "x").applied_when(r"x(");
    let err = apply_to_text(2, &m, BLOB).unwrap_err();
    assert!(matches!(err, Error::InvalidModPattern { index: 2, .. }));
}

#[test]
fn pattern_replaces_every_match() {
    let m = Mod::pattern("Track.d.ts", r"List<(\w+)>", "${1}[]");
    let (out, outcome) = apply(&m, BLOB);

    assert_eq!(outcome, ModOutcome::Applied(2));
    assert!(out.contains("getItems(): Item[];"));
    assert!(out.contains("getOther(): Item[];"));
}

#[test]
fn literal_replaces_first_match_only() {
    let m = Mod::literal("Track.d.ts", "List<Item>", "Item[]");
    let (out, outcome) = apply(&m, BLOB);

    assert_eq!(outcome, ModOutcome::Applied(1));
    assert!(out.contains("getItems(): Item[];"));
    assert!(out.contains("getOther(): List<Item>;"));
}

#[test]
fn substitution_already_applied_is_detected() {
    let m = Mod::pattern("Track.d.ts", r"List<Item>", "Item[]");
    let (once, _) = apply(&m, BLOB);
    let (twice, outcome) = apply(&m, &once);

    assert_eq!(outcome, ModOutcome::AlreadyApplied);
    assert_eq!(once, twice);
}

#[test]
fn no_match_is_reported() {
    let m = Mod::literal("Track.d.ts", "interface Missing", "// x\ninterface Missing");
    let (out, outcome) = apply(&m, BLOB);

    assert_eq!(outcome, ModOutcome::NoMatch);
    assert_eq!(out, BLOB);
}

#[test]
fn scope_restricts_matches_to_declaration() {
    let m = Mod::pattern("Track.d.ts", r"\): ", "): /*scoped*/ ").in_declaration("SoloValue");
    let (out, outcome) = apply(&m, BLOB);

    assert_eq!(outcome, ModOutcome::Applied(1));
    assert!(out.contains("toggle(exclusive: boolean): /*scoped*/ void;"));
    assert!(out.contains("getItems(): List<Item>;"));
}

#[test]
fn missing_scope_is_stale() {
    let m = Mod::literal("Track.d.ts", "x", "y").in_declaration("Nope");
    let err = apply_to_text(3, &m, BLOB).unwrap_err();
    assert!(matches!(err, Error::StaleMod { index: 3, .. }));
}

#[test]
fn invalid_pattern_is_an_error() {
    let m = Mod::pattern("Track.d.ts", r"List<(", "x");
    let err = apply_to_text(0, &m, BLOB).unwrap_err();
    assert!(matches!(err, Error::InvalidModPattern { index: 0, .. }));
}

#[test]
fn declaration_block_spans_header_to_closing_brace() {
    let range = declaration_block(BLOB, "Track").unwrap();
    let block = &BLOB[range];
    assert!(block.starts_with("interface Track {"));
    assert!(block.ends_with("}\n"));
    assert!(!block.contains("SoloValue"));
}

#[test]
fn declaration_block_requires_whole_name() {
    assert!(declaration_block(BLOB, "Solo").is_none());
    assert!(declaration_block(BLOB, "Tra").is_none());
}

#[test]
fn apply_mods_rewrites_files_and_fails_on_stale() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("com/example/api/SoloValue.d.ts");
    std::fs::create_dir_all(target.parent().unwrap()).unwrap();
    std::fs::write(&target, BLOB).unwrap();

    let good = Mod::literal(
        "com/example/api/SoloValue.d.ts",
        "interface SoloValue",
        "// @ts-ignore\ninterface SoloValue",
    );
    let outcomes = apply_mods(dir.path(), std::slice::from_ref(&good)).unwrap();
    assert_eq!(outcomes, [ModOutcome::Applied(1)]);

    let outcomes = apply_mods(dir.path(), std::slice::from_ref(&good)).unwrap();
    assert_eq!(outcomes, [ModOutcome::AlreadyApplied]);

    let stale = Mod::literal("com/example/api/SoloValue.d.ts", "interface Gone", "interface Gone2");
    let err = apply_mods(dir.path(), &[good.clone(), stale]).unwrap_err();
    assert!(matches!(err, Error::StaleMod { index: 1, .. }));

    let missing = Mod::literal("com/example/api/Missing.d.ts", "a", "b");
    let err = apply_mods(dir.path(), &[missing]).unwrap_err();
    assert!(matches!(err, Error::StaleMod { index: 0, .. }));
}

#[test]
fn plugin_host_mods_are_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let api = dir.path().join("com/bitwig/extension/controller/api");
    std::fs::create_dir_all(&api).unwrap();
    std::fs::write(
        api.join("SoloValue.d.ts"),
        indoc! {"
            namespace com.bitwig.extension.controller.api

            interface SoloValue extends SettableBooleanValue {
              toggle(exclusive: boolean): void;
            }
        "},
    )
    .unwrap();
    std::fs::write(
        api.join("ControllerHost.d.ts"),
        indoc! {"
            namespace com.bitwig.extension.controller.api

            interface ControllerHost {
              getTracks(): ArrayList<Track>;
              getScenes(index: number): ArrayList<Scene>;
            }
        "},
    )
    .unwrap();
    let mods = Config::plugin_host().unwrap().mods;

    let first = apply_mods(dir.path(), &mods).unwrap();
    let host_once = std::fs::read_to_string(api.join("ControllerHost.d.ts")).unwrap();
    let solo_once = std::fs::read_to_string(api.join("SoloValue.d.ts")).unwrap();
    let second = apply_mods(dir.path(), &mods).unwrap();

    assert_eq!(first, [ModOutcome::Applied(1), ModOutcome::Applied(2)]);
    assert_eq!(second, [ModOutcome::AlreadyApplied; 2]);
    assert!(host_once.contains("getTracks(): Track[];"));
    assert!(host_once.contains("getScenes(index: number): Scene[];"));
    assert_eq!(
        host_once,
        std::fs::read_to_string(api.join("ControllerHost.d.ts")).unwrap()
    );
    assert_eq!(
        solo_once,
        std::fs::read_to_string(api.join("SoloValue.d.ts")).unwrap()
    );
}
