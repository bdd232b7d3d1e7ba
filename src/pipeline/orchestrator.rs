use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::thread;

use log::debug;

use crate::docker::Inspect;
use crate::error::RekcodError;
use crate::input::{IndexedInput, Input};
use crate::translate::{self, TranslatedResult};

/// Translated records for each input, in input order.
pub type Resolved = Vec<Vec<TranslatedResult>>;

/// Resolve every input and translate the records it yields.
///
/// Container identifiers are inspected in one batched call; files are read on
/// their own threads; inline JSON is translated up front. All of it runs
/// concurrently and is joined before returning. The output has exactly one
/// slot per input, ordered by the input's original position no matter which
/// resolver finished first. The first failure, in input order, is returned.
pub fn resolve_all(
    inputs: Vec<IndexedInput>,
    inspector: &dyn Inspect,
) -> Result<Resolved, RekcodError> {
    let mut slots: BTreeMap<usize, Result<Vec<TranslatedResult>, RekcodError>> = BTreeMap::new();
    let mut containers: Vec<(usize, String)> = Vec::new();
    let mut files: Vec<(usize, PathBuf)> = Vec::new();

    for IndexedInput { index, input } in inputs {
        match input {
            Input::Json(value) => {
                slots.insert(index, translate::translate_value(value));
            }
            Input::File(path) => files.push((index, path)),
            Input::Container(id) => containers.push((index, id)),
        }
    }

    thread::scope(|s| {
        let batch = (!containers.is_empty()).then(|| {
            let ids: Vec<String> = containers.iter().map(|(_, id)| id.clone()).collect();
            debug!("dispatching batched inspect for {} container(s)", ids.len());
            s.spawn(move || inspector.inspect_many(&ids))
        });

        let reads: Vec<_> = files
            .iter()
            .map(|(index, path)| {
                debug!("dispatching read of {} for input #{index}", path.display());
                (*index, s.spawn(move || read_file(path)))
            })
            .collect();

        if let Some(handle) = batch {
            match join(handle) {
                Ok(values) => {
                    // The i-th container argument gets the i-th inspected record.
                    let mut values = values.into_iter();
                    for (index, _) in &containers {
                        let result = match values.next() {
                            Some(value) => translate::translate_value(value),
                            None => Ok(Vec::new()),
                        };
                        slots.insert(*index, result);
                    }
                }
                Err(err) => {
                    let mut indices = containers.iter().map(|(index, _)| *index);
                    if let Some(first) = indices.next() {
                        slots.insert(first, Err(err));
                    }
                    for index in indices {
                        slots.insert(index, Ok(Vec::new()));
                    }
                }
            }
        }

        for (index, handle) in reads {
            slots.insert(index, join(handle));
        }
    });

    debug!("all {} input(s) resolved", slots.len());
    slots.into_values().collect()
}

/// Read a file of `docker inspect` output and translate its records.
pub fn read_file(path: &Path) -> Result<Vec<TranslatedResult>, RekcodError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RekcodError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    translate::parse(&contents, &path.display().to_string())
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
