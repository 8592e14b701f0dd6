//! The module dependency map and its transitive counts.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{config::AnalysisConfig, error::AnalysisError, scan::direct_references};

/// The dependencies of one module file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEntry {
    dependencies: IndexSet<String>,
    count: usize,
}

impl DependencyEntry {
    /// Returns the modules the file references directly, in first-seen order.
    #[must_use]
    pub const fn dependencies(&self) -> &IndexSet<String> {
        &self.dependencies
    }

    /// Returns how many other known module files are reachable from this one.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

/// Direct and transitive module dependencies for a set of module files.
///
/// Files are keyed by file name, such as `Heart.DES`; a reference to module
/// `Heart` is a dependency on the file `Heart.DES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyMap {
    entries: IndexMap<String, DependencyEntry>,
    missing: IndexSet<String>,
}

impl DependencyMap {
    /// Builds the map from `(file name, source)` pairs.
    ///
    /// The count of a file is the number of distinct known files reachable
    /// from it, not counting the file itself. Each file is counted once per
    /// traversal, so cycles terminate. References to files that are not in
    /// the set are collected in [`DependencyMap::missing`] and count nothing.
    pub fn build<I, F, S>(sources: I, config: &AnalysisConfig) -> Self
    where
        I: IntoIterator<Item = (F, S)>,
        F: Into<String>,
        S: AsRef<str>,
    {
        let graph: IndexMap<String, IndexSet<String>> = sources
            .into_iter()
            .map(|(file, source)| {
                let file = file.into();
                let dependencies = direct_references(source.as_ref(), config);
                trace!(file = %file, dependencies = dependencies.len(), "scanned module source");
                (file, dependencies)
            })
            .collect();

        let mut missing = IndexSet::new();
        let counts: Vec<usize> = graph
            .keys()
            .map(|file| count_reachable(file, &graph, config, &mut missing))
            .collect();

        let entries: IndexMap<String, DependencyEntry> = graph
            .into_iter()
            .zip(counts)
            .map(|((file, dependencies), count)| {
                (
                    file,
                    DependencyEntry {
                        dependencies,
                        count,
                    },
                )
            })
            .collect();

        debug!(
            files = entries.len(),
            missing = missing.len(),
            "built dependency map"
        );

        Self { entries, missing }
    }

    /// Builds the map from the module files directly inside `directory`.
    ///
    /// Only files with the configured extension are read, in file name order.
    /// Subdirectories are not searched.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or one of its module files cannot be
    /// read.
    pub fn from_directory(
        directory: impl AsRef<Path>,
        config: &AnalysisConfig,
    ) -> Result<Self, AnalysisError> {
        let directory = directory.as_ref();
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |error| AnalysisError::Io { path, error }
        };

        let mut paths: Vec<PathBuf> = fs::read_dir(directory)
            .map_err(io_error(directory))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<_, _>>()
            .map_err(io_error(directory))?;
        paths.retain(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|extension| extension == config.extension.as_str())
        });
        paths.sort();

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = fs::read(&path).map_err(io_error(&path))?;
            let Some(file) = path.file_name() else {
                continue;
            };
            sources.push((
                file.to_string_lossy().into_owned(),
                String::from_utf8_lossy(&bytes).into_owned(),
            ));
        }

        debug!(directory = %directory.display(), files = sources.len(), "read module sources");
        Ok(Self::build(sources, config))
    }

    /// Returns the entry for a file.
    #[must_use]
    pub fn get(&self, file: &str) -> Option<&DependencyEntry> {
        self.entries.get(file)
    }

    /// Returns every entry in input order.
    #[must_use]
    pub const fn entries(&self) -> &IndexMap<String, DependencyEntry> {
        &self.entries
    }

    /// Returns the referenced files that are not in the map, in first-seen
    /// order.
    #[must_use]
    pub const fn missing(&self) -> &IndexSet<String> {
        &self.missing
    }

    /// Serializes the map as `{file: {dependencies, count}}`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }
}

/// Counts the distinct known files reachable from `root` with a depth-first
/// traversal that visits each file at most once.
fn count_reachable(
    root: &str,
    graph: &IndexMap<String, IndexSet<String>>,
    config: &AnalysisConfig,
    missing: &mut IndexSet<String>,
) -> usize {
    let mut visited: HashSet<&str> = HashSet::from([root]);
    let mut stack: Vec<(&str, usize)> = vec![(root, 0)];
    let mut count = 0;

    while let Some(frame) = stack.last_mut() {
        let (file, position) = *frame;
        frame.1 += 1;

        let Some(dependency) = graph
            .get(file)
            .and_then(|dependencies| dependencies.get_index(position))
        else {
            stack.pop();
            continue;
        };

        let target = config.file_name(dependency);
        match graph.get_key_value(target.as_str()) {
            Some((target, _)) => {
                if visited.insert(target.as_str()) {
                    count += 1;
                    stack.push((target.as_str(), 0));
                }
            }
            None => {
                missing.insert(target);
            }
        }
    }

    count
}
