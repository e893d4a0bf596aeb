//! JSON data files read by the gallery front-end.
//!
//! # Layout
//!
//! | Path | Description |
//! |------|-------------|
//! | `works.json` | All works, in input order |
//! | `creators.json` | All creators, in first-appearance order |
//! | `timeline.json` | Works grouped by day offset |
//! | `creator/<id>.json` | One creator with its works |
//! | `work/<id>.json` | One work |
//!
//! Paths are relative to the data directory (`public/_data` by default).
//! Per-entry file names are the percent-encoded id.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::{fs, path::Path};

use super::{
    index::SiteIndex,
    types::{Creator, Work},
};

/// Renders one site-wide data file from the index.
type DataFileGenerator = fn(&SiteIndex, bool) -> serde_json::Result<String>;

const DATA_FILES: &[(&str, DataFileGenerator)] = &[
    ("works.json", |index, pretty| to_json(index.works(), pretty)),
    ("creators.json", |index, pretty| {
        to_json(index.creators(), pretty)
    }),
    ("timeline.json", |index, pretty| {
        to_json(&index.timeline(), pretty)
    }),
];

pub const CREATOR_DIR: &str = "creator";
pub const WORK_DIR: &str = "work";

/// Which kind of file was just written, for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Index,
    Creator,
    Work,
}

impl EntryKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "data",
            Self::Creator => "creator",
            Self::Work => "work",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    pub pretty: bool,
    pub per_entry: bool,
}

/// Payload of `creator/<id>.json`.
#[derive(Debug, Serialize)]
struct CreatorEntry<'a> {
    #[serde(flatten)]
    creator: &'a Creator,
    works: Vec<&'a Work>,
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// File name for a per-entry data file.
pub fn entry_file_name(id: &str) -> String {
    format!("{}.json", urlencoding::encode(id))
}

/// Works that get their own `work/<id>.json`.
///
/// Skips works with an empty id and later duplicates of an id.
pub fn entry_works(index: &SiteIndex) -> Vec<&Work> {
    index
        .works()
        .iter()
        .filter(|w| !w.id.is_empty() && index.is_canonical(w))
        .collect()
}

/// Number of files `write_to_disk` produces for each kind.
pub fn planned_counts(index: &SiteIndex, options: WriteOptions) -> [(EntryKind, usize); 3] {
    let (creators, works) = if options.per_entry {
        (index.creators().len(), entry_works(index).len())
    } else {
        (0, 0)
    };
    [
        (EntryKind::Index, DATA_FILES.len()),
        (EntryKind::Creator, creators),
        (EntryKind::Work, works),
    ]
}

/// Site-wide data file paths, relative to the data directory.
pub fn data_file_names() -> impl Iterator<Item = &'static str> {
    DATA_FILES.iter().map(|(name, _)| *name)
}

/// Render a site-wide data file by name.
pub fn render(index: &SiteIndex, name: &str, pretty: bool) -> Option<serde_json::Result<String>> {
    DATA_FILES
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, generator)| generator(index, pretty))
}

/// Render `creator/<id>.json`.
pub fn render_creator(index: &SiteIndex, id: &str, pretty: bool) -> Option<serde_json::Result<String>> {
    let creator = index.get_creator(id)?;
    let entry = CreatorEntry {
        creator,
        works: index.works_by_creator(&creator.id),
    };
    Some(to_json(&entry, pretty))
}

/// Write all data files into `data_dir`.
///
/// Per-entry files are written in parallel; `on_written` runs once per file.
/// Returns the number of files written.
pub fn write_to_disk<F>(
    index: &SiteIndex,
    data_dir: &Path,
    options: WriteOptions,
    on_written: F,
) -> Result<usize>
where
    F: Fn(EntryKind) + Sync,
{
    fs::create_dir_all(data_dir)?;

    for (name, generator) in DATA_FILES {
        write_file(&data_dir.join(name), &generator(index, options.pretty)?)?;
        on_written(EntryKind::Index);
    }

    if !options.per_entry {
        return Ok(DATA_FILES.len());
    }

    let creator_dir = data_dir.join(CREATOR_DIR);
    let work_dir = data_dir.join(WORK_DIR);
    fs::create_dir_all(&creator_dir)?;
    fs::create_dir_all(&work_dir)?;

    let works = entry_works(index);
    let (creators_result, works_result) = rayon::join(
        || {
            index.creators().par_iter().try_for_each(|creator| {
                if let Some(json) = render_creator(index, &creator.id, options.pretty) {
                    write_file(&creator_dir.join(entry_file_name(&creator.id)), &json?)?;
                }
                on_written(EntryKind::Creator);
                anyhow::Ok(())
            })
        },
        || {
            works.par_iter().try_for_each(|work| {
                let json = to_json(*work, options.pretty)?;
                write_file(&work_dir.join(entry_file_name(&work.id)), &json)?;
                on_written(EntryKind::Work);
                anyhow::Ok(())
            })
        },
    );
    creators_result?;
    works_result?;

    Ok(DATA_FILES.len() + index.creators().len() + works.len())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
