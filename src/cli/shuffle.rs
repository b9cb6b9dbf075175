use std::{
    io,
    path::{Path, PathBuf},
};

use clap::Parser;
use quickfire::{
    Correspondence, Directory,
    storage::{Options, Outcome, shuffle_documents},
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser, Default)]
#[command(about = "Shuffle answer options and update the answer key")]
pub struct Shuffle {
    /// Quiz documents to shuffle (default: discover them under the root)
    paths: Vec<PathBuf>,

    /// Seed for the random number generator, for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Show what would change without writing any files
    #[arg(long)]
    dry_run: bool,

    /// How questions are paired with answer-key entries
    #[arg(long = "match", value_enum, value_name = "POLICY")]
    correspondence: Option<Correspondence>,
}

impl Shuffle {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let Self {
            paths,
            seed,
            dry_run,
            correspondence,
        } = self;

        let directory = Directory::new(root);
        let paths = if paths.is_empty() {
            directory.documents()
        } else {
            paths
        };

        if paths.is_empty() {
            println!(
                "No {} files found under {}.",
                directory.config().file_name,
                directory.root().display()
            );
            return Ok(());
        }

        println!("Found {} quiz documents", paths.len());
        println!();

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let options = Options {
            correspondence: correspondence.unwrap_or(directory.config().correspondence),
            dry_run,
        };

        let result = shuffle_documents(&paths, options, &mut rng, |path, result| {
            report(path, result, dry_run);
        });

        println!();
        let summary = match &result {
            Ok(summary) => *summary,
            Err(e) => *e.summary(),
        };
        let line = format!(
            "{} shuffled, {} skipped, {} answers moved",
            summary.shuffled, summary.skipped, summary.changed
        );
        if result.is_ok() {
            println!("{}", line.success());
        } else {
            println!("{}", line.warning());
        }
        if dry_run {
            println!("{}", "Dry run: no files were written.".dim());
        }

        result?;
        Ok(())
    }
}

fn report(path: &Path, result: &io::Result<Outcome>, dry_run: bool) {
    println!("Processing {}...", path.display());
    match result {
        Ok(Outcome::Shuffled { changed, .. }) => {
            let verb = if dry_run { "Would update" } else { "Updated" };
            println!("  {verb} {changed} questions with new answer positions");
        }
        Ok(Outcome::Skipped(e)) => {
            let message = format!("  Warning: could not parse questions or answers ({e})");
            println!("{}", message.warning());
        }
        Err(e) => {
            let message = format!("  Error: {e}");
            println!("{}", message.error());
        }
    }
}
