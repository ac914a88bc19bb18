use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::fmt::Write as _;

/// Synthetic type-4 export: `verifications` three-row entries plus the usual
/// preamble, catalog and balance lines.
fn synthetic_document(verifications: usize) -> String {
    let mut text = String::new();
    text.push_str("#FLAGGA 0\n");
    text.push_str("#PROGRAM \"huvudbok bench\" 1.0\n");
    text.push_str("#SIETYP 4\n");
    text.push_str("#FNAMN \"Benchbolaget AB\"\n");
    text.push_str("#ORGNR 556000-0000\n");
    text.push_str("#RAR 0 20240101 20241231\n");
    text.push_str("#KONTO 1510 \"Kundfordringar\"\n");
    text.push_str("#KONTO 2610 \"Utgående moms, 25 %\"\n");
    text.push_str("#KONTO 3001 \"Försäljning inom Sverige, 25 % moms\"\n");
    text.push_str("#IB 0 1510 0.00\n");

    for n in 0..verifications {
        let gross = 1000 + (n % 900);
        let net = gross * 4 / 5;
        let vat = gross - net;
        let _ = writeln!(text, "#VER A {} 20240115 \"Faktura {}\"", n + 1, n + 1);
        text.push_str("{\n");
        let _ = writeln!(text, "   #TRANS 1510 {{}} {gross}.00");
        let _ = writeln!(text, "   #TRANS 3001 {{}} -{net}.00");
        let _ = writeln!(text, "   #TRANS 2610 {{}} -{vat}.00");
        text.push_str("}\n");
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("sie_parse");

    for &count in &[100usize, 1_000] {
        let text = synthetic_document(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("{count}_verifications"), |b| {
            b.iter(|| huvudbok_sie::parse(black_box(&text)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
