//! `folio check`: load the dataset and report what the index had to ignore.

use crate::{
    config::SiteConfig,
    data::{IndexReport, SiteIndex},
    log,
};
use anyhow::{Result, bail};

/// Log index statistics and data problems.
///
/// With `strict`, any problem fails the command.
pub fn check_site(config: &SiteConfig, index: &SiteIndex, strict: bool) -> Result<()> {
    for line in site_summary(config, index) {
        log!("check"; "{line}");
    }

    let problems = describe(index, &index.report());
    for line in &problems {
        log!("warn"; "{line}");
    }

    match problems.len() {
        0 => log!("check"; "ok"),
        n if strict => bail!("{n} problem(s) found in {}", config.data.works.display()),
        n => log!("check"; "{n} problem(s), index built anyway"),
    }
    Ok(())
}

/// Site metadata, input paths and index size.
fn site_summary(config: &SiteConfig, index: &SiteIndex) -> Vec<String> {
    let mut lines = vec![format!("{} [{}]", config.base.title, config.base.language)];
    if !config.base.description.is_empty() {
        lines.push(config.base.description.clone());
    }
    lines.push(if config.config_path.is_file() {
        format!("config: {}", config.config_path.display())
    } else {
        "config: none, using defaults".to_owned()
    });
    lines.push(format!("works: {}", config.data.works.display()));
    lines.push(format!(
        "{} works, {} creators",
        index.works().len(),
        index.creators().len()
    ));
    lines
}

/// One human-readable line per finding.
fn describe(index: &SiteIndex, report: &IndexReport) -> Vec<String> {
    let mut lines = Vec::new();

    for id in &report.duplicate_works {
        lines.push(format!("duplicate work id `{id}`, only the first is reachable"));
    }
    for id in &report.orphans {
        lines.push(format!("work `{id}` has no creator id or name"));
    }
    for d in &report.divergences {
        lines.push(format!(
            "work `{}` gives creator `{}` {} `{}`, kept `{}`",
            d.work_id, d.creator_id, d.field, d.ignored, d.kept
        ));
    }
    for work in index.works() {
        match &work.work_type {
            None => lines.push(format!("work `{}` has no type", work.id)),
            Some(ty) if !ty.is_known() => {
                lines.push(format!("work `{}` has unknown type `{ty}`", work.id));
            }
            Some(_) => {}
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_works;
    use std::fs;
    use tempfile::TempDir;

    fn index(json: &str) -> SiteIndex {
        SiteIndex::new(parse_works(json).unwrap())
    }

    #[test]
    fn test_describe_clean() {
        let index = index(
            r#"[
                {"id": "w1", "creatorId": "c1", "creatorName": "Alice", "type": "video"},
                {"id": "w2", "creatorId": "c1", "creatorName": "Alice", "type": "music"}
            ]"#,
        );
        assert!(describe(&index, &index.report()).is_empty());
    }

    #[test]
    fn test_describe_problems() {
        let index = index(
            r#"[
                {"id": "w1", "creatorId": "c1", "creatorName": "Alice", "type": "video"},
                {"id": "w2", "creatorId": "c1", "creatorName": "Alicia", "type": "poem"},
                {"id": "w3", "creatorId": "", "creatorName": "Nobody"},
                {"id": "w1", "creatorId": "c1", "creatorName": "Alice", "type": "video"}
            ]"#,
        );

        let lines = describe(&index, &index.report());
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("duplicate work id `w1`"));
        assert!(lines[1].contains("`w3`"));
        assert!(lines[2].contains("name `Alicia`, kept `Alice`"));
        assert!(lines[3].contains("unknown type `poem`"));
        assert!(lines[4].contains("`w3` has no type"));
    }

    #[test]
    fn test_site_summary_defaults() {
        let index = index(r#"[{"id": "w1", "creatorId": "c1", "creatorName": "Alice"}]"#);
        let lines = site_summary(&SiteConfig::default(), &index);

        assert_eq!(lines[0], "Gallery [zh-Hans]");
        assert_eq!(lines[1], "config: none, using defaults");
        assert_eq!(lines[2], "works: data/works.json");
        assert_eq!(lines[3], "1 works, 1 creators");
    }

    #[test]
    fn test_site_summary_from_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("folio.toml");
        fs::write(
            &config_path,
            "[base]\ntitle = \"Spring\"\ndescription = \"Spring works\"\nlanguage = \"en-US\"\n",
        )
        .unwrap();
        let mut config = SiteConfig::from_path(&config_path).unwrap();
        config.config_path = config_path.clone();

        let lines = site_summary(&config, &SiteIndex::default());

        assert_eq!(lines[0], "Spring [en-US]");
        assert_eq!(lines[1], "Spring works");
        assert_eq!(lines[2], format!("config: {}", config_path.display()));
        assert_eq!(lines[4], "0 works, 0 creators");
    }

    #[test]
    fn test_check_strict_fails() {
        let index = index(r#"[{"id": "w1"}]"#);
        let config = SiteConfig::default();

        assert!(check_site(&config, &index, false).is_ok());
        assert!(check_site(&config, &index, true).is_err());
    }
}
