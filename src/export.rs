//! `folio export`: write the JSON data files the gallery pages fetch.

use crate::{
    config::SiteConfig,
    data::{
        SiteIndex,
        files::{self, EntryKind},
    },
    log,
    logger::ProgressBars,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Write every data file under `[export.output]/[export.dir]`.
///
/// Returns the number of files written.
pub fn export_site(config: &SiteConfig, index: &SiteIndex) -> Result<usize> {
    let data_dir = config.export.data_dir();
    let options = config.export.write_options();

    if config.export.clean {
        clear_data_dir(&data_dir)?;
    }

    log!("export"; "writing to {}", data_dir.display());
    let planned = files::planned_counts(index, options);
    let bars: Vec<_> = planned.iter().map(|(kind, n)| (kind.as_str(), *n)).collect();
    let progress = ProgressBars::new_filtered(&bars);

    let written = files::write_to_disk(index, &data_dir, options, |kind: EntryKind| {
        if let Some(p) = &progress {
            p.inc(kind.as_str());
        }
    })?;

    if let Some(p) = &progress {
        p.finish();
    }

    for name in files::data_file_names() {
        log!("export"; "{name}");
    }
    log!(
        "export";
        "done, {written} files ({} creators, {} works)",
        index.creators().len(),
        index.works().len()
    );
    Ok(written)
}

fn clear_data_dir(data_dir: &Path) -> Result<()> {
    if data_dir.exists() {
        fs::remove_dir_all(data_dir).with_context(|| {
            format!("Failed to clear data directory: {}", data_dir.display())
        })?;
    }
    Ok(())
}
