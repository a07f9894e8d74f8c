use criterion::{black_box, criterion_group, criterion_main, Criterion};
use helpmenu::config::{ConfigDocument, Item, Section};
use helpmenu::{paint_html, render, RenderEnv};

// A menu about the size operators actually build: a handful of sections with
// a dozen commands each.
fn large_menu() -> ConfigDocument {
    let mut doc = ConfigDocument::default();
    doc.bot_info_mut().name = Some("Bench Bot".into());
    doc.bot_info_mut().notice = Some("line one\n**bold** [link](http://x)".into());
    doc.bot_info_mut().corner_badge = Some("v1".into());
    for s in 0..6 {
        let items = (0..12)
            .map(|i| {
                Item::new(
                    "⭐",
                    &format!("cmd{}_{}", s, i),
                    "does a **thing** with __style__",
                    &format!("/cmd{} <arg>", i),
                )
            })
            .collect();
        doc.sections_mut().push(Section {
            name: Some(format!("Section {}", s)),
            icon: Some("📦".into()),
            items: Some(items),
        });
    }
    doc
}

fn bench_render(c: &mut Criterion) {
    let doc = large_menu();
    let env = RenderEnv::default();

    c.bench_function("render_tree", |b| {
        b.iter(|| render(black_box(&doc), black_box(&env)))
    });

    c.bench_function("render_and_paint_html", |b| {
        b.iter(|| paint_html(&render(black_box(&doc), black_box(&env))))
    });
}

fn bench_load_yaml(c: &mut Criterion) {
    let text = serde_yaml::to_string(&large_menu()).expect("serialize");
    c.bench_function("load_yaml", |b| {
        b.iter(|| ConfigDocument::from_yaml(black_box(&text)).expect("parse"))
    });
}

criterion_group!(benches, bench_render, bench_load_yaml);
criterion_main!(benches);
