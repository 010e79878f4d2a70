//! End-to-end runs of the command line entry point against a fake codec.

mod common;

use std::cell::Cell;
use std::path::Path;

use speculate2::speculate;
use tag_manifest::cli::{run_with, Outcome};
use tag_manifest::error::CodecError;
use tag_manifest::models::*;

use common::{touch, write_manifest, FakeCodec};

fn run(args: &[&str], base: &Path) -> Outcome {
    run_with(args.iter().copied(), || Ok(FakeCodec::in_dir(base)))
}

fn photos_manifest(dir: &Path) -> String {
    let photos = dir.join("photos");
    touch(&photos, "img1.jpg");
    let path = write_manifest(
        dir,
        "tags.json",
        &format!(
            r#"{{"path": {}, "img1.jpg": ["beach", "sunset"], "img2.jpg": []}}"#,
            serde_json::to_string(&photos).expect("path json")
        ),
    );
    path.to_string_lossy().into_owned()
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
    }

    describe "completed batches" {
        it "exits zero even when entries fail" {
            let manifest = photos_manifest(dir.path());
            let outcome = run(&["tagm", "-f", &manifest], dir.path());

            assert_eq!(outcome.exit_code, 0);
            assert!(outcome.message.starts_with("Done: 1 of 2 applied, 1 missing, 0 format errors"));
            assert!(outcome.message.contains("img2.jpg: target_missing"));
        }

        it "matches the flag case-insensitively" {
            let manifest = photos_manifest(dir.path());
            let outcome = run(&["tagm", "-F", &manifest], dir.path());
            assert_eq!(outcome.exit_code, 0);
        }

        it "prints the report as JSON on request" {
            let manifest = photos_manifest(dir.path());
            let outcome = run(&["tagm", "--json", "-f", &manifest], dir.path());

            assert_eq!(outcome.exit_code, 0);
            let report: BatchReport = serde_json::from_str(&outcome.message).expect("report json");
            assert_eq!(
                report.results(),
                vec![
                    ("img1.jpg", ApplyResult::Applied),
                    ("img2.jpg", ApplyResult::TargetMissing),
                ]
            );
        }
    }

    describe "fatal errors" {
        it "rejects a missing flag as a usage error" {
            let outcome = run(&["tagm"], dir.path());
            assert_eq!(outcome.exit_code, 2);
        }

        it "rejects a flag without a path" {
            let outcome = run(&["tagm", "-f"], dir.path());
            assert_eq!(outcome.exit_code, 2);
        }

        it "rejects manifests without a .json extension" {
            let path = write_manifest(dir.path(), "tags.txt", "{}");
            let outcome = run(&["tagm", "-f", &path.to_string_lossy()], dir.path());

            assert_eq!(outcome.exit_code, 2);
            assert!(outcome.message.contains("must be a .json file"));
        }

        it "fails on a missing manifest" {
            let missing = dir.path().join("missing.json");
            let outcome = run(&["tagm", "-f", &missing.to_string_lossy()], dir.path());

            assert_eq!(outcome.exit_code, 1);
            assert!(outcome.message.contains("Manifest not found"));
        }

        it "fails on a malformed manifest before touching any file" {
            touch(dir.path(), "a.jpg");
            let path = write_manifest(dir.path(), "tags.json", r#"[{"a.jpg": ["x"]}]"#);
            let codec_built = Cell::new(false);

            let outcome = run_with(["tagm", "-f", &*path.to_string_lossy()], || {
                codec_built.set(true);
                Ok(FakeCodec::in_dir(dir.path()))
            });

            assert_eq!(outcome.exit_code, 1);
            assert!(outcome.message.contains("top level must be an object"));
            assert!(!codec_built.get());
        }

        it "fails when the codec cannot run" {
            let path = write_manifest(dir.path(), "tags.json", r#"{"a.jpg": ["x"]}"#);
            let outcome = run_with(["tagm", "-f", &*path.to_string_lossy()], || {
                Err::<FakeCodec, _>(CodecError::Unavailable("exiftool was not found on PATH".to_string()))
            });

            assert_eq!(outcome.exit_code, 1);
            assert!(outcome.message.contains("exiftool was not found on PATH"));
        }
    }
}
