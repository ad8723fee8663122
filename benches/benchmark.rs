use criterion::{black_box, criterion_group, criterion_main, Criterion};
use patti_records::{csv_record, LineTokenizer, ParserOptions, RecordParser};

csv_record! {
    #[derive(Debug, Default)]
    struct Row {
        id: i64,
        name: String,
        amount: rust_decimal::Decimal,
        active: bool,
        note: Option<String>,
    }
}

fn test_data(num_lines: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(num_lines + 1);
    lines.push(String::from("id,name,amount,active,note"));
    for i in 0..num_lines {
        lines.push(format!(
            "{},\"Name, {}\",{}.{:02},{},\"a \"\"quoted\"\" note\"",
            i,
            i,
            i,
            i % 100,
            i % 2 == 0
        ));
    }
    lines
}

fn tokenize_benchmark(c: &mut Criterion) {
    let tokenizer = LineTokenizer::csv();
    let line = "1234,\"Name, 1234\",1234.34,true,\"a \"\"quoted\"\" note\"";
    c.bench_function("tokenize line", |b| {
        b.iter(|| tokenizer.tokenize(black_box(line)))
    });
}

fn parse_benchmark(c: &mut Criterion) {
    let lines = test_data(10_000);
    let parser = RecordParser::<Row>::new(ParserOptions::default());
    c.bench_function("parse 10k lines", |b| {
        b.iter(|| parser.parse(black_box(&lines)))
    });
}

criterion_group!(benches, tokenize_benchmark, parse_benchmark);
criterion_main!(benches);
