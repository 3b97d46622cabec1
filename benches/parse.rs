// benches/parse.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use family_sheet::csv::{parse_document, parse_line};
use family_sheet::specs::people::FIELDS;

fn sample_sheet(rows: usize) -> String {
    let headers: Vec<&str> = FIELDS.iter().map(|f| f.source_header).collect();
    let mut text = headers.join(",");
    text.push('\n');
    for i in 0..rows {
        let cells: Vec<String> = FIELDS
            .iter()
            .map(|f| match f.target_key {
                "id" => format!("P{i}"),
                "notes" => format!("\"Moved, twice; said \"\"hello\"\" {i}\""),
                "childrenIds" => format!("P{}; P{}", i + 1, i + 2),
                k if k.ends_with("Year") => (1800 + i % 200).to_string(),
                _ => format!("v{i}"),
            })
            .collect();
        text.push_str(&cells.join(","));
        text.push('\n');
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let doc = sample_sheet(2_000);
    let line = doc.lines().nth(1).unwrap_or_default().to_string();

    c.bench_function("parse_line", |b| {
        b.iter(|| black_box(parse_line(black_box(&line))).len())
    });

    c.bench_function("parse_document_2k", |b| {
        b.iter(|| {
            let ds = parse_document(black_box(&doc));
            black_box(ds.people.len())
        })
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
