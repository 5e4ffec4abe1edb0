use std::fs;
use surfrank::{crawl, iterate_pagerank, Error};
use tempfile::TempDir;

fn write_pages(dir: &TempDir, pages: &[(&str, &str)]) {
    for (name, content) in pages {
        fs::write(dir.path().join(name), content).unwrap();
    }
}

#[test]
fn crawl_builds_closed_corpus() {
    let dir = TempDir::new().unwrap();
    write_pages(
        &dir,
        &[
            (
                "1.html",
                r#"<html><body><a href="2.html">Two</a><a href="https://example.com">out</a></body></html>"#,
            ),
            (
                "2.html",
                r#"<a href="1.html">One</a> <a href="3.html">Three</a> <a href="2.html">self</a>"#,
            ),
            ("3.html", r#"<p>See <a  class="x" href="2.html">two</a></p>"#),
            ("4.html", "<p>no links</p>"),
            ("notes.txt", r#"<a href="1.html">ignored, not html</a>"#),
        ],
    );
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("5.html"), r#"<a href="1.html">x</a>"#).unwrap();

    let corpus = crawl(dir.path()).unwrap();
    assert_eq!(corpus.pages(), ["1.html", "2.html", "3.html", "4.html"]);
    assert_eq!(corpus.links("1.html").unwrap().collect::<Vec<_>>(), vec!["2.html"]);
    assert_eq!(
        corpus.links("2.html").unwrap().collect::<Vec<_>>(),
        vec!["1.html", "3.html"]
    );
    assert_eq!(corpus.links("3.html").unwrap().collect::<Vec<_>>(), vec!["2.html"]);
    assert!(corpus.is_dangling("4.html"));

    let ranks = iterate_pagerank(&corpus, 0.85).unwrap();
    assert_eq!(ranks.len(), 4);
    assert!((ranks.total() - 1.0).abs() < 1e-9);
}

#[test]
fn crawl_empty_directory_gives_empty_corpus() {
    let dir = TempDir::new().unwrap();
    let corpus = crawl(dir.path()).unwrap();
    assert!(corpus.is_empty());
    assert!(matches!(iterate_pagerank(&corpus, 0.85), Err(Error::EmptyCorpus)));
}

#[test]
fn crawl_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let err = crawl(&missing).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "{err}");
}

#[test]
fn crawl_skips_non_utf8_pages() {
    let dir = TempDir::new().unwrap();
    write_pages(&dir, &[("a.html", r#"<a href="b.html">b</a>"#)]);
    fs::write(dir.path().join("b.html"), [0xff, 0xfe, 0x00]).unwrap();

    let corpus = crawl(dir.path()).unwrap();
    assert_eq!(corpus.pages(), ["a.html"]);
    assert!(corpus.is_dangling("a.html"));
}

#[cfg(unix)]
#[test]
fn crawl_follows_symlinked_pages() {
    let dir = TempDir::new().unwrap();
    write_pages(&dir, &[("a.html", r#"<a href="b.html">b</a>"#)]);
    fs::create_dir(dir.path().join("store")).unwrap();
    let target = dir.path().join("store").join("b-real.html");
    fs::write(&target, r#"<a href="a.html">a</a>"#).unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("b.html")).unwrap();

    let corpus = crawl(dir.path()).unwrap();
    assert_eq!(corpus.pages(), ["a.html", "b.html"]);
    assert_eq!(corpus.links("a.html").unwrap().collect::<Vec<_>>(), vec!["b.html"]);
    assert_eq!(corpus.links("b.html").unwrap().collect::<Vec<_>>(), vec!["a.html"]);
}

#[cfg(target_os = "linux")]
#[test]
fn crawl_skips_pages_with_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    write_pages(&dir, &[("a.html", r#"<a href="b.html">b</a>"#)]);
    let odd = OsStr::from_bytes(b"\xffb.html");
    fs::write(dir.path().join(odd), r#"<a href="a.html">a</a>"#).unwrap();

    let corpus = crawl(dir.path()).unwrap();
    assert_eq!(corpus.pages(), ["a.html"]);
    assert!(corpus.is_dangling("a.html"));
}
