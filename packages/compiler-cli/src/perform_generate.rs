//! Perform Generate
//!
//! Reads `.desc` files, encodes them and writes the resulting source maps.

use anyhow::Context;
use descmap_compiler::logging::Logger;
use descmap_compiler::{parse_desc, SourceMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Where a generated document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Returned to the caller only; the binary prints it.
    Stdout,
    /// `<stem>.map` next to the input.
    BesideInput,
    /// `<stem>.map` inside the directory.
    Dir(PathBuf),
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub destination: Destination,
    pub pretty: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            destination: Destination::Stdout,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedMap {
    pub input: PathBuf,
    /// `None` when the destination is stdout.
    pub output: Option<PathBuf>,
    pub json: String,
}

/// Parses `.desc` content and builds its source map.
pub fn generate_source_map(content: &str, logger: &dyn Logger) -> anyhow::Result<SourceMap> {
    let doc = parse_desc(content, logger)?;
    logger.debug(&format!(
        "parsed {} sources, {} mappings",
        doc.sources.len(),
        doc.mappings.len()
    ));
    let map = doc.to_source_map()?;
    Ok(map)
}

pub fn output_path(input: &Path, destination: &Destination) -> Option<PathBuf> {
    let file_name = format!(
        "{}.map",
        input.file_stem().unwrap_or(input.as_os_str()).to_string_lossy()
    );
    match destination {
        Destination::Stdout => None,
        Destination::BesideInput => Some(
            input
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(file_name),
        ),
        Destination::Dir(dir) => Some(dir.join(file_name)),
    }
}

pub fn generate_file(
    input: &Path,
    options: &GenerateOptions,
    logger: &dyn Logger,
) -> anyhow::Result<GeneratedMap> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let map = generate_source_map(&content, logger)
        .with_context(|| format!("failed to generate source map for {}", input.display()))?;
    let json = map.to_json_string(options.pretty)?;

    let output = output_path(input, &options.destination);
    if let Some(output) = &output {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(output, format!("{}\n", json))
            .with_context(|| format!("failed to write {}", output.display()))?;
        logger.info(&format!("{} -> {}", input.display(), output.display()));
    }

    Ok(GeneratedMap {
        input: input.to_path_buf(),
        output,
        json,
    })
}

/// Expands glob patterns; plain paths are kept even if they do not exist so
/// the read error names them.
pub fn expand_inputs(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if !pattern.contains(&['*', '?', '['][..]) {
            files.push(PathBuf::from(pattern));
            continue;
        }
        let matches = glob::glob(pattern)
            .map_err(|e| anyhow::anyhow!("Failed to read glob pattern {}: {}", pattern, e))?;
        let before = files.len();
        for entry in matches {
            files.push(entry?);
        }
        if files.len() == before {
            anyhow::bail!("no files match {}", pattern);
        }
    }
    Ok(files)
}
