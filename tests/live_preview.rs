#![cfg(feature = "preview")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use helpmenu::backend::{ConfigStore, LocalBackend};
use helpmenu::preview::LivePreview;
use helpmenu::watch::ConfigWatcher;
use helpmenu::{ConfigDocument, RenderEnv};
use pretty_assertions::assert_eq;

fn doc_named(name: &str) -> ConfigDocument {
    let mut doc = ConfigDocument::default();
    doc.bot_info_mut().name = Some(name.to_string());
    doc
}

fn collect_titles(preview: &LivePreview) -> Arc<Mutex<Vec<String>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    preview.on_render(move |tree| sink.lock().unwrap().push(tree.header.title.text.clone()));
    seen
}

#[tokio::test]
async fn back_to_back_saves_render_the_last_one() {
    let dir = tempfile::tempdir().unwrap();
    let backend = LocalBackend::new(dir.path());
    backend.save(&doc_named("zero")).unwrap();

    let mut watcher = ConfigWatcher::new(backend.config_path()).unwrap();
    let preview = LivePreview::with_quiescence(Duration::from_millis(100));
    let seen = collect_titles(&preview);
    let env = RenderEnv::default();

    // Both saves land well inside one mtime tick
    let edits = async {
        backend.save(&doc_named("one")).unwrap();
        backend.save(&doc_named("two")).unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
    };
    tokio::select! {
        _ = preview.follow(&mut watcher, &backend, &env) => panic!("watcher closed early"),
        _ = edits => {}
    }

    let seen = seen.lock().unwrap();
    assert_eq!(seen.last().map(String::as_str), Some("two"));
    assert!(!seen.iter().any(|t| t == "one"));
}

#[tokio::test]
async fn broken_config_keeps_the_last_preview() {
    let dir = tempfile::tempdir().unwrap();
    let backend = LocalBackend::new(dir.path());
    backend.save(&doc_named("good")).unwrap();

    let mut watcher = ConfigWatcher::new(backend.config_path()).unwrap();
    let preview = LivePreview::with_quiescence(Duration::from_millis(50));
    let seen = collect_titles(&preview);
    let env = RenderEnv::default();
    preview.render_now(&backend.load().unwrap(), &env);

    let edits = async {
        std::fs::write(backend.config_path(), "bot_info: [unclosed\n").unwrap();
        tokio::time::sleep(Duration::from_millis(800)).await;
    };
    tokio::select! {
        _ = preview.follow(&mut watcher, &backend, &env) => panic!("watcher closed early"),
        _ = edits => {}
    }

    assert_eq!(*seen.lock().unwrap(), vec!["good".to_string()]);
}
