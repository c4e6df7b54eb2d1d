use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Instant;

use descmap_compiler::logging::Logger;
use rayon::prelude::*;

use crate::perform_generate::{
    generate_file, output_path, Destination, GenerateOptions, GeneratedMap,
};

/// Outcome for one input, in the order the inputs were given.
pub type GenerateOutcome = (PathBuf, anyhow::Result<GeneratedMap>);

/// Generates every document in parallel. Each document is encoded on a
/// single thread; only independent documents run concurrently.
pub fn generate_all(
    files: &[PathBuf],
    options: &GenerateOptions,
    logger: &dyn Logger,
) -> Vec<GenerateOutcome> {
    let start = Instant::now();
    logger.info(&format!("Generating {} source maps in parallel...", files.len()));

    let collisions = colliding_outputs(files, &options.destination);
    for output in &collisions {
        logger.warn(&format!("several inputs would write {}", output.display()));
    }

    let results: Vec<GenerateOutcome> = files
        .par_iter()
        .map(|file| {
            let result = match output_path(file, &options.destination) {
                Some(output) if collisions.contains(&output) => Err(anyhow::anyhow!(
                    "{} would overwrite {}, which another input also writes",
                    file.display(),
                    output.display()
                )),
                _ => generate_file(file, options, logger),
            };
            (file.clone(), result)
        })
        .collect();

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    logger.info(&format!(
        "Generation finished in {:?} ({} ok, {} failed)",
        start.elapsed(),
        results.len() - failed,
        failed
    ));

    results
}

/// Output paths that more than one input resolves to.
fn colliding_outputs(files: &[PathBuf], destination: &Destination) -> HashSet<PathBuf> {
    let mut counts: HashMap<PathBuf, usize> = HashMap::new();
    for output in files.iter().filter_map(|file| output_path(file, destination)) {
        *counts.entry(output).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(output, _)| output)
        .collect()
}
