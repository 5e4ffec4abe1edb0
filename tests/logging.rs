//! Log events of the sampler and the crawler.
//!
//! One test per binary: the capturing subscriber is installed per thread.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use surfrank::{crawl, sample_pagerank_trials, Corpus, SampleConfig};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, captured.text())
}

#[test]
fn trials_and_skipped_pages_are_logged() {
    let corpus = Corpus::new([
        ("a", vec!["b"]),
        ("b", vec!["a", "c"]),
        ("c", vec!["a"]),
    ])
    .unwrap();
    let cfg = SampleConfig { samples: 500, ..SampleConfig::default() };
    let (ranks, logs) = capture(|| sample_pagerank_trials(&corpus, cfg, 3));
    assert_eq!(ranks.unwrap().len(), 3);
    assert!(logs.contains("starting random surfer trials"), "{logs}");
    assert!(logs.contains("trials=3"), "{logs}");
    assert!(logs.contains("samples=500"), "{logs}");
    assert!(logs.contains("random surfer trials finished"), "{logs}");

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.html"), "<p>a</p>").unwrap();
    std::fs::write(dir.path().join("b.html"), [0xff, 0xfe]).unwrap();
    let (corpus, logs) = capture(|| crawl(dir.path()));
    assert_eq!(corpus.unwrap().pages(), ["a.html"]);
    assert!(logs.contains("skipping page that is not valid UTF-8"), "{logs}");

    #[cfg(target_os = "linux")]
    {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::fs::write(dir.path().join(OsStr::from_bytes(b"\xffc.html")), "<p>c</p>").unwrap();
        let (corpus, logs) = capture(|| crawl(dir.path()));
        assert_eq!(corpus.unwrap().pages(), ["a.html"]);
        assert!(logs.contains("skipping page whose name is not valid UTF-8"), "{logs}");
    }
}
