//! Sample names and output file names.

use rustc_hash::FxHashMap;

use std::path::{Path, PathBuf};

use crate::pairing::Role;

pub const OUTPUT_EXT: &str = ".fastq";

/// Short sample identifier: the basename of `path` up to the first `_`.
///
/// If the basename has no `_`, the whole basename is the sample name.
pub fn sample_name(path: impl AsRef<Path>) -> String {
    let base = path
        .as_ref()
        .file_name()
        .map(|b| b.to_string_lossy())
        .unwrap_or_default();

    match base.split_once('_') {
        Some((name, _)) => name.to_owned(),
        None => base.into_owned(),
    }
}

/// Output file for `path` when it is processed as `role`.
pub fn output_path(out_dir: impl AsRef<Path>, path: impl AsRef<Path>, role: Role) -> PathBuf {
    let file_name = format!("{}{}{}", role.prefix(), sample_name(path), OUTPUT_EXT);
    out_dir.as_ref().join(file_name)
}

/// Output files that more than one input would write to, with the inputs that collide.
///
/// `files` must already be in batch order so roles follow from positional parity.
pub fn collisions(out_dir: impl AsRef<Path>, files: &[PathBuf]) -> Vec<(PathBuf, Vec<PathBuf>)> {
    let mut by_output: FxHashMap<PathBuf, Vec<PathBuf>> = FxHashMap::default();

    for (i, file) in files.iter().enumerate() {
        let out = output_path(out_dir.as_ref(), file, Role::from_index(i));
        by_output.entry(out).or_default().push(file.clone());
    }

    let mut res = by_output
        .into_iter()
        .filter(|(_, inputs)| inputs.len() > 1)
        .collect::<Vec<_>>();
    res.sort();
    res
}
