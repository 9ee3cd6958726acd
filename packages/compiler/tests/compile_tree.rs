use std::fs;
use std::path::Path;

use gopherkv_compiler::{
    compile, CompileError, CompileOptions, Diagnostic, KeyPrefix, LocalFilesystem, MenuDocument,
    MenuRecord,
};
use gopherkv_store::InMemoryStore;
use tempfile::TempDir;

/// Lay out a small site the way a phlog author would.
fn build_site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("0000-About.html"), "<h1>About</h1>").unwrap();
    fs::write(root.join("0001-Contact"), "finger me").unwrap();
    fs::write(root.join("0002-Friends.link"), "gopher://example.org:7070/1foo").unwrap();
    fs::write(root.join("0003-Broken.link"), "::: nope :::").unwrap();
    fs::write(root.join("HEADER"), "Welcome!\n").unwrap();
    fs::write(root.join(".hidden"), "secret").unwrap();

    let posts = root.join("0010-Old_Posts");
    fs::create_dir(&posts).unwrap();
    fs::write(posts.join("REVERSE"), "").unwrap();
    fs::write(posts.join("2019-First_post.txt"), "first").unwrap();
    fs::write(posts.join("2020-Second_post.txt"), "second").unwrap();
    fs::write(posts.join("2021-archive.tgz"), [0x1f_u8, 0x8b, 0x08]).unwrap();

    dir
}

fn menu(store: &InMemoryStore, key: &str) -> MenuDocument {
    let bytes = store.value(key).unwrap_or_else(|| panic!("no menu at {key}"));
    MenuDocument::parse(std::str::from_utf8(bytes).unwrap()).unwrap()
}

fn options() -> CompileOptions {
    CompileOptions {
        local_host: "gopher.local".to_string(),
        local_port: 70,
        process_all: false,
    }
}

#[test]
fn compiles_a_site_from_disk() {
    let site = build_site();
    let mut store = InMemoryStore::new();

    let report = compile(
        &LocalFilesystem,
        &mut store,
        site.path(),
        &KeyPrefix::root(),
        &options(),
    )
    .unwrap();

    assert_eq!(
        menu(&store, "/").records(),
        &[
            MenuRecord::new('h', "About.html", "/About.html", "gopher.local", 70),
            MenuRecord::new('0', "Contact", "/Contact", "gopher.local", 70),
            MenuRecord::new('1', "Friends.link", "foo", "example.org", 7070),
            MenuRecord::new('1', "Old Posts", "/Old_Posts/", "gopher.local", 70),
        ]
    );

    // REVERSE puts the newest post first.
    assert_eq!(
        menu(&store, "/Old_Posts/").records(),
        &[
            MenuRecord::new('9', "archive.tgz", "/Old_Posts/archive.tgz", "gopher.local", 70),
            MenuRecord::new(
                '0',
                "Second post.txt",
                "/Old_Posts/Second_post.txt",
                "gopher.local",
                70
            ),
            MenuRecord::new(
                '0',
                "First post.txt",
                "/Old_Posts/First_post.txt",
                "gopher.local",
                70
            ),
        ]
    );

    assert_eq!(store.value("/Contact").unwrap().as_ref(), b"finger me");
    assert_eq!(
        store.value("/Old_Posts/archive.tgz").unwrap().as_ref(),
        &[0x1f_u8, 0x8b, 0x08]
    );

    let keys: Vec<&str> = store.keys().collect();
    assert_eq!(
        keys,
        vec![
            "/",
            "/About.html",
            "/Contact",
            "/Old_Posts/",
            "/Old_Posts/First_post.txt",
            "/Old_Posts/Second_post.txt",
            "/Old_Posts/archive.tgz",
        ]
    );

    assert_eq!(report.menus_written, 2);
    assert_eq!(report.blobs_written, 5);
    assert_eq!(report.links_resolved, 1);
    // HEADER at the root, REVERSE in Old_Posts.
    assert_eq!(report.modifiers_skipped, 2);
    assert_eq!(report.diagnostics.len(), 1);
    match &report.diagnostics[0] {
        Diagnostic::MalformedLink { path, .. } => {
            assert_eq!(path, &site.path().join("0003-Broken.link"))
        }
        other => panic!("unexpected diagnostic: {other}"),
    }
}

#[test]
fn recompiling_is_byte_identical() {
    let site = build_site();
    let prefix = KeyPrefix::parse("/phlog/").unwrap();

    let mut first = InMemoryStore::new();
    compile(&LocalFilesystem, &mut first, site.path(), &prefix, &options()).unwrap();
    let mut second = InMemoryStore::new();
    compile(&LocalFilesystem, &mut second, site.path(), &prefix, &options()).unwrap();

    assert_eq!(first, second);
    assert!(first.keys().all(|k| k.starts_with("/phlog/")));
}

#[test]
fn process_all_keeps_raw_names() {
    let site = build_site();
    let mut store = InMemoryStore::new();
    let options = CompileOptions {
        process_all: true,
        ..options()
    };

    compile(
        &LocalFilesystem,
        &mut store,
        site.path(),
        &KeyPrefix::root(),
        &options,
    )
    .unwrap();

    let root = menu(&store, "/");
    let titles: Vec<&str> = root.records().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "0000-About.html",
            "0001-Contact",
            "0002-Friends.link",
            "0010-Old Posts",
            "HEADER",
        ]
    );
    assert_eq!(store.value("/HEADER").unwrap().as_ref(), b"Welcome!\n");

    let posts = menu(&store, "/0010-Old_Posts/");
    assert_eq!(posts.records()[0].title, "REVERSE");
    assert_eq!(posts.len(), 4);
}

#[test]
fn unreadable_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not-a-dir");
    fs::write(&file, "x").unwrap();

    let mut store = InMemoryStore::new();
    let err = compile(
        &LocalFilesystem,
        &mut store,
        Path::new(&file),
        &KeyPrefix::root(),
        &options(),
    )
    .unwrap_err();

    assert!(matches!(err, CompileError::ListDirectory { .. }));
    assert!(store.is_empty());
}
