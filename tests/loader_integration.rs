//! Integration tests for loading annotations from unit files on disk

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use dnotations::{load_annotated_unit, Annotations, LoadError};

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

fn unique_test_dir() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("dnotations-load-{}-{}", std::process::id(), id));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_unit(dir: &PathBuf, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_load_annotated_unit() {
    let dir = unique_test_dir();
    let path = write_unit(
        &dir,
        "proxy.service",
        "#annotations:\n#  part-of: demo\n#  component: proxy\n[Unit]\nDescription=x\n",
    );

    let annotations = load_annotated_unit(&path).await.unwrap();
    assert_eq!(
        annotations,
        Annotations {
            part_of: "demo".into(),
            component: "proxy".into(),
            version: String::new(),
            managed_by: String::new(),
            hostname: String::new(),
        }
    );
}

#[tokio::test]
async fn test_load_full_header() {
    let dir = unique_test_dir();
    let path = write_unit(
        &dir,
        "example.service",
        r#"# annotations:
#   part-of: my-project
#   component: proxy
#   managed-by: someuser
#   version: 1.0.0
#   hostname: myservice.example.com
[Unit]
Description=A proxy server.

[Service]
ExecStart=/usr/bin/proxy
"#,
    );

    let annotations = load_annotated_unit(&path).await.unwrap();
    assert_eq!(annotations.part_of, "my-project");
    assert_eq!(annotations.component, "proxy");
    assert_eq!(annotations.managed_by, "someuser");
    assert_eq!(annotations.version, "1.0.0");
    assert_eq!(annotations.hostname, "myservice.example.com");
}

#[tokio::test]
async fn test_load_unit_without_header() {
    let dir = unique_test_dir();
    let path = write_unit(&dir, "plain.service", "[Unit]\nDescription=x\n");

    let err = load_annotated_unit(&path).await.unwrap_err();
    assert!(matches!(err, LoadError::NoValidHeader { .. }));
    assert_eq!(err.path(), path.as_path());
}

#[tokio::test]
async fn test_load_empty_file() {
    let dir = unique_test_dir();
    let path = write_unit(&dir, "empty.service", "");

    let err = load_annotated_unit(&path).await.unwrap_err();
    assert!(err.is_unannotated());
}

#[tokio::test]
async fn test_load_header_after_blank_line() {
    let dir = unique_test_dir();
    let path = write_unit(
        &dir,
        "late.service",
        "\n# annotations:\n#   part-of: demo\n[Unit]\n",
    );

    let err = load_annotated_unit(&path).await.unwrap_err();
    assert!(err.is_unannotated());
}

#[tokio::test]
async fn test_load_multi_document_header() {
    let dir = unique_test_dir();
    let path = write_unit(
        &dir,
        "multi.service",
        r#"# SPDX-License-Identifier: MIT
#---
# annotations:
#   part-of: [broken
#---
# annotations:
#   part-of: cluster
#   component: worker
[Unit]
Description=Worker
"#,
    );

    let annotations = load_annotated_unit(&path).await.unwrap();
    assert_eq!(annotations.part_of, "cluster");
    assert_eq!(annotations.component, "worker");
}

#[tokio::test]
async fn test_load_header_without_annotations_key() {
    let dir = unique_test_dir();
    let path = write_unit(
        &dir,
        "other-tool.service",
        "# labels:\n#   team: infra\n[Unit]\n",
    );

    let err = load_annotated_unit(&path).await.unwrap_err();
    assert!(err.is_unannotated());
}

#[tokio::test]
async fn test_load_is_repeatable() {
    let dir = unique_test_dir();
    let path = write_unit(
        &dir,
        "repeat.service",
        "# annotations:\n#   hostname: a.example.com\n",
    );

    let first = load_annotated_unit(&path).await.unwrap();
    let second = load_annotated_unit(&path).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = unique_test_dir();
    let err = load_annotated_unit(&dir.join("gone.service"))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("gone.service"));
}
