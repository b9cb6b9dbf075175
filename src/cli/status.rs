use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use quickfire::{Correspondence, Directory, Document, Letter, ScanError, scan};
use tracing::instrument;

use super::terminal::{Colorize, bar, is_narrow};

/// A letter holding more than this share of correct answers counts as biased.
const BIAS_THRESHOLD_PERCENT: usize = 40;

#[derive(Debug, Parser, Default)]
#[command(about = "Show how correct answers are distributed across option letters")]
pub struct Status {
    /// Quiz documents to inspect (default: discover them under the root)
    paths: Vec<PathBuf>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// How questions are paired with answer-key entries
    #[arg(long = "match", value_enum, value_name = "POLICY")]
    correspondence: Option<Correspondence>,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug)]
struct Row {
    name: String,
    tally: Result<[usize; 4], ScanError>,
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = Directory::new(root);
        let correspondence = self
            .correspondence
            .unwrap_or(directory.config().correspondence);
        let paths = if self.paths.is_empty() {
            directory.documents()
        } else {
            self.paths
        };

        let rows = paths
            .iter()
            .map(|path| {
                let document = Document::read(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let tally = scan(&document).map(|quiz| quiz.letter_counts(correspondence));
                Ok(Row {
                    name: display_name(path, directory.root()),
                    tally,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        if rows.is_empty() {
            println!(
                "No {} files found under {}.",
                directory.config().file_name,
                directory.root().display()
            );
            return Ok(());
        }

        let totals = rows
            .iter()
            .filter_map(|row| row.tally.ok())
            .fold([0; 4], |mut totals, counts| {
                for (total, count) in totals.iter_mut().zip(counts) {
                    *total += count;
                }
                totals
            });

        match self.output {
            OutputFormat::Json => Self::output_json(&rows, totals)?,
            OutputFormat::Table => Self::output_table(&rows, totals),
        }

        Ok(())
    }

    fn output_json(rows: &[Row], totals: [usize; 4]) -> anyhow::Result<()> {
        use serde_json::json;

        let documents: Vec<_> = rows
            .iter()
            .map(|row| match row.tally {
                Ok(counts) => json!({
                    "path": row.name,
                    "counts": counts_json(counts),
                }),
                Err(e) => json!({
                    "path": row.name,
                    "skipped": e.to_string(),
                }),
            })
            .collect();

        let output = json!({
            "documents": documents,
            "total": counts_json(totals),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(rows: &[Row], totals: [usize; 4]) {
        let narrow = is_narrow();
        let width = rows
            .iter()
            .map(|row| row.name.len())
            .max()
            .unwrap_or(0)
            .max("Document".len());

        println!("Correct answer positions");
        println!("{}", "────────────────────────".dim());

        if narrow {
            for row in rows {
                match row.tally {
                    Ok([a, b, c, d]) => println!("{}: A {a} B {b} C {c} D {d}", row.name),
                    Err(e) => println!("{}: {}", row.name, format!("skipped ({e})").warning()),
                }
            }
        } else {
            println!("{:<width$} {:>4} {:>4} {:>4} {:>4}", "Document", "A", "B", "C", "D");
            for row in rows {
                match row.tally {
                    Ok([a, b, c, d]) => {
                        println!("{:<width$} {a:>4} {b:>4} {c:>4} {d:>4}", row.name);
                    }
                    Err(e) => {
                        println!("{:<width$} {}", row.name, format!("skipped ({e})").warning());
                    }
                }
            }
        }

        println!();

        let total: usize = totals.iter().sum();
        if total == 0 {
            println!("No answered questions found.");
            return;
        }

        for letter in Letter::ALL {
            let count = totals[letter.index()];
            println!("{letter} {count:>5} {}", bar(count, total, 30));
        }
        println!();

        let (most_common, count) = Letter::ALL
            .into_iter()
            .map(|letter| (letter, totals[letter.index()]))
            .max_by_key(|&(_, count)| count)
            .unwrap_or((Letter::A, 0));
        let share = count * 100 / total;

        if share > BIAS_THRESHOLD_PERCENT {
            println!(
                "{}",
                format!("Most correct answers are {most_common} ({share}%) ⚠️").warning()
            );
            println!("{}", "Run 'quickfire shuffle' to rebalance.".dim());
        } else {
            println!("{}", "Correct answers are spread across letters ✅".success());
        }
    }
}

fn counts_json(counts: [usize; 4]) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = Letter::ALL
        .into_iter()
        .map(|letter| {
            (
                letter.to_string(),
                serde_json::Value::from(counts[letter.index()]),
            )
        })
        .collect();
    serde_json::Value::Object(map)
}

fn display_name(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
