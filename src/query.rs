//! Read-only lookup commands: `creators`, `works`, `creator`, `work`, `timeline`.
//!
//! Each command writes to the given sink so it can run against a buffer in tests.

use crate::data::{SiteIndex, Work, WorkType, files};
use anyhow::{Result, anyhow};
use std::io::Write;

pub fn list_creators(index: &SiteIndex, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        let rendered = files::render(index, "creators.json", true)
            .ok_or_else(|| anyhow!("creators.json is not a known data file"))??;
        writeln!(out, "{rendered}")?;
        return Ok(());
    }

    for creator in index.creators() {
        let count = index.works_by_creator(&creator.id).len();
        writeln!(out, "{}\t{}\t{count} work(s)\t{}", creator.id, creator.name, creator.bilibili_space)?;
    }
    Ok(())
}

/// Works matching both filters, in input order.
pub fn filter_works<'a>(
    index: &'a SiteIndex,
    work_type: Option<&str>,
    creator: Option<&str>,
) -> Vec<&'a Work> {
    let works = match work_type {
        Some(ty) => index.works_of_type(&WorkType::from(ty)),
        None => index.works().iter().collect(),
    };
    works
        .into_iter()
        .filter(|w| creator.is_none_or(|id| w.creator_key() == Some(id)))
        .collect()
}

pub fn list_works(
    index: &SiteIndex,
    work_type: Option<&str>,
    creator: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let works = filter_works(index, work_type, creator);
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&works)?)?;
        return Ok(());
    }

    for work in works {
        write_work_line(work, out)?;
    }
    Ok(())
}

pub fn show_creator(index: &SiteIndex, id: &str, out: &mut impl Write) -> Result<()> {
    let rendered = files::render_creator(index, id, true)
        .ok_or_else(|| anyhow!("creator `{id}` not found"))??;
    writeln!(out, "{rendered}")?;
    Ok(())
}

pub fn show_work(index: &SiteIndex, id: &str, out: &mut impl Write) -> Result<()> {
    let work = index
        .get_work(id)
        .ok_or_else(|| anyhow!("work `{id}` not found"))?;
    writeln!(out, "{}", serde_json::to_string_pretty(work)?)?;
    Ok(())
}

pub fn show_timeline(index: &SiteIndex, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        let rendered = files::render(index, "timeline.json", true)
            .ok_or_else(|| anyhow!("timeline.json is not a known data file"))??;
        writeln!(out, "{rendered}")?;
        return Ok(());
    }

    for day in index.timeline() {
        match day.day {
            Some(n) => writeln!(out, "day {n}")?,
            None => writeln!(out, "undated")?,
        }
        for work in day.works {
            write!(out, "  ")?;
            write_work_line(work, out)?;
        }
    }
    Ok(())
}

fn write_work_line(work: &Work, out: &mut impl Write) -> Result<()> {
    let ty = work.work_type.as_ref().map_or("-", WorkType::as_str);
    let creator = work.creator_name.as_deref().map_or("-", str::trim);
    writeln!(out, "{}\t{ty}\t{}\t{creator}\t{}", work.id, work.slot, work.title)?;
    Ok(())
}
