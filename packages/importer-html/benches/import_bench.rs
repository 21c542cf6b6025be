use criterion::{black_box, criterion_group, criterion_main, Criterion};
use screenspec_importer_html::import_markup;

fn deep_page(sections: usize) -> String {
    let mut page = String::from(r#"<div style="display:flex;flex-direction:column;gap:16px">"#);
    for i in 0..sections {
        page.push_str(&format!(
            r#"<div style="display:grid;gap:8px">
                <h2>Section {i}</h2>
                <p>Body copy for section {i}.</p>
                <img src="/img-{i}.png" alt="Shot {i}">
                <button>Open {i}</button>
            </div>"#
        ));
    }
    page.push_str("</div>");
    page
}

fn bench_import(c: &mut Criterion) {
    let small = deep_page(10);
    let large = deep_page(200);

    c.bench_function("import_markup_10_sections", |b| {
        b.iter(|| import_markup(black_box(&small)).unwrap())
    });

    c.bench_function("import_markup_200_sections", |b| {
        b.iter(|| import_markup(black_box(&large)).unwrap())
    });
}

criterion_group!(benches, bench_import);
criterion_main!(benches);
