//! This bench test scans and shuffles a large quiz document in memory.

#![allow(missing_docs)]

use std::fmt::Write;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use quickfire::{Correspondence, Document, scan, storage::plan};
use rand::{SeedableRng, rngs::StdRng};

/// Generates a quiz with `count` questions, every answer marked B
fn large_quiz(count: usize) -> String {
    let mut content = String::from("# Quickfire\n\n## Questions\n\n");
    for i in 1..=count {
        let _ = write!(
            content,
            "### {i}. Question number {i}?\n\nA) wrong {i}\nB) right {i}\nC) other {i}\nD) last {i}\n\n"
        );
    }
    content.push_str("## Answers\n\n");
    for i in 1..=count {
        let _ = writeln!(content, "{i}. **B** - Because {i} is right.");
    }
    content.push_str("\n## Study Resources\n\n- docs\n");
    content
}

fn shuffle_document(c: &mut Criterion) {
    let content = large_quiz(1_000);

    c.bench_function("shuffle document", |b| {
        b.iter_batched(
            || (Document::new(&content), StdRng::seed_from_u64(0)),
            |(mut document, mut rng)| {
                let quiz = scan(&document).unwrap();
                let plan = plan(&quiz, Correspondence::Heading, &mut rng);
                document.apply(plan.patch);
                document
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, shuffle_document);
criterion_main!(benches);
