//! In-memory index over the works dataset.
//!
//! Built once from the loaded works and never mutated afterwards, so a
//! `&SiteIndex` can be shared freely between threads.
//!
//! Creators are kept in an append-only `Vec` (first-appearance order) with a
//! hash index from id to position for O(1) lookup.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

use super::types::{
    Creator, CreatorField, Divergence, IndexReport, TimelineDay, Work, WorkType,
};

#[derive(Debug, Default)]
pub struct SiteIndex {
    works: Vec<Work>,
    creators: Vec<Creator>,
    creator_index: FxHashMap<String, usize>,
    /// First position of each work id.
    work_index: FxHashMap<String, usize>,
}

impl SiteIndex {
    /// Index `works`, deriving one creator per distinct trimmed `creatorId`.
    ///
    /// Creator attributes come from the first work naming the id; later
    /// works with the same id never change them.
    pub fn new(works: Vec<Work>) -> Self {
        let mut creators = Vec::new();
        let mut creator_index = FxHashMap::default();

        for work in &works {
            let Some((id, name)) = work.creator_identity() else {
                continue;
            };
            if creator_index.contains_key(id) {
                continue;
            }
            creator_index.insert(id.to_owned(), creators.len());
            creators.push(Creator::first_seen(id, name, work));
        }

        let mut work_index = FxHashMap::default();
        for (pos, work) in works.iter().enumerate() {
            work_index.entry(work.id.clone()).or_insert(pos);
        }

        Self {
            works,
            creators,
            creator_index,
            work_index,
        }
    }

    /// All works, exactly as loaded.
    pub fn works(&self) -> &[Work] {
        &self.works
    }

    /// Deduplicated creators in first-appearance order.
    pub fn creators(&self) -> &[Creator] {
        &self.creators
    }

    /// Exact-match lookup; ids are not trimmed here.
    pub fn get_creator(&self, id: &str) -> Option<&Creator> {
        self.creator_index.get(id).map(|&pos| &self.creators[pos])
    }

    /// Exact-match lookup. With duplicate ids the first work wins.
    pub fn get_work(&self, id: &str) -> Option<&Work> {
        self.work_index.get(id).map(|&pos| &self.works[pos])
    }

    /// Whether `work` is the one `get_work` returns for its id.
    pub fn is_canonical(&self, work: &Work) -> bool {
        self.get_work(&work.id)
            .is_some_and(|first| std::ptr::eq(first, work))
    }

    /// Works attributed to `creator_id` (trimmed `creatorId` match), in input order.
    pub fn works_by_creator(&self, creator_id: &str) -> Vec<&Work> {
        self.works
            .iter()
            .filter(|w| w.creator_key() == Some(creator_id))
            .collect()
    }

    pub fn works_of_type(&self, ty: &WorkType) -> Vec<&Work> {
        self.works
            .iter()
            .filter(|w| w.work_type.as_ref() == Some(ty))
            .collect()
    }

    /// Group works by `dayOffset`, ascending.
    ///
    /// Works without an offset come last in a group with `day = None`.
    /// Input order is kept inside every group.
    pub fn timeline(&self) -> Vec<TimelineDay<'_>> {
        let mut days: BTreeMap<i64, Vec<&Work>> = BTreeMap::new();
        let mut undated = Vec::new();

        for work in &self.works {
            match work.day_offset {
                Some(day) => days.entry(day).or_default().push(work),
                None => undated.push(work),
            }
        }

        let mut timeline: Vec<_> = days
            .into_iter()
            .map(|(day, works)| TimelineDay {
                day: Some(day),
                works,
            })
            .collect();
        if !undated.is_empty() {
            timeline.push(TimelineDay {
                day: None,
                works: undated,
            });
        }
        timeline
    }

    /// Collect data-quality findings. The index itself is unaffected.
    pub fn report(&self) -> IndexReport {
        let mut report = IndexReport::default();
        let mut seen: FxHashMap<&str, usize> = FxHashMap::default();

        for work in &self.works {
            let count = seen.entry(work.id.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                report.duplicate_works.push(work.id.clone());
            }

            let Some((id, name)) = work.creator_identity() else {
                report.orphans.push(work.id.clone());
                continue;
            };
            let Some(creator) = self.get_creator(id) else {
                continue;
            };

            let candidates = [
                (CreatorField::Name, creator.name.as_str(), name),
                (
                    CreatorField::BilibiliSpace,
                    creator.bilibili_space.as_str(),
                    work.space(),
                ),
                (
                    CreatorField::Avatar,
                    creator.avatar.as_deref().unwrap_or_default(),
                    work.avatar_url().unwrap_or_default(),
                ),
            ];
            for (field, kept, seen_value) in candidates {
                if kept != seen_value {
                    report.divergences.push(Divergence {
                        creator_id: creator.id.clone(),
                        work_id: work.id.clone(),
                        field,
                        kept: kept.to_owned(),
                        ignored: seen_value.to_owned(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(id: &str, creator_id: &str, creator_name: &str) -> Work {
        Work {
            id: id.to_string(),
            title: format!("title of {id}"),
            creator_id: Some(creator_id.to_string()),
            creator_name: Some(creator_name.to_string()),
            ..Work::default()
        }
    }

    fn sample() -> Vec<Work> {
        vec![
            work("w1", "c1", "Alice"),
            work("w2", "c2", "Bob"),
            work("w3", "c1", "Alice2"),
            work("w4", "", "Nobody"),
        ]
    }

    #[test]
    fn test_example_scenario() {
        let index = SiteIndex::new(sample());

        let ids: Vec<_> = index.creators().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c1", "c2"]);
        assert_eq!(index.get_creator("c1").unwrap().name, "Alice");
        assert_eq!(index.get_creator("c2").unwrap().name, "Bob");
        assert_eq!(index.get_work("w4").unwrap().creator_name.as_deref(), Some("Nobody"));
    }

    #[test]
    fn test_works_returned_unchanged() {
        let input = sample();
        let index = SiteIndex::new(input.clone());
        assert_eq!(index.works(), input.as_slice());
    }

    #[test]
    fn test_creator_order_follows_first_appearance() {
        let index = SiteIndex::new(vec![
            work("1", "a", "A"),
            work("2", "b", "B"),
            work("3", "a", "A"),
            work("4", "c", "C"),
        ]);

        let ids: Vec<_> = index.creators().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_creators_unique_and_non_empty() {
        let index = SiteIndex::new(vec![
            work("1", "a", "A"),
            work("2", " a ", "A again"),
            work("3", "   ", "Blank"),
            work("4", "b", "   "),
            work("5", "c", "C"),
        ]);

        let mut ids: Vec<_> = index.creators().iter().map(|c| c.id.clone()).collect();
        assert!(index.creators().iter().all(|c| !c.id.is_empty() && !c.name.is_empty()));
        let len = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), len);
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_whitespace_creator_id_contributes_nothing() {
        let index = SiteIndex::new(vec![work("1", "   ", "Ghost"), work("2", "", "Ghost")]);
        assert!(index.creators().is_empty());
        assert_eq!(index.works().len(), 2);
    }

    #[test]
    fn test_missing_identity_fields() {
        let index = SiteIndex::new(vec![Work {
            id: "w1".into(),
            ..Work::default()
        }]);
        assert!(index.creators().is_empty());
        assert!(index.get_work("w1").is_some());
    }

    #[test]
    fn test_creator_fields_trimmed_and_frozen() {
        let first = Work {
            bilibili_space: Some("  https://space.bilibili.com/1 ".into()),
            avatar: Some("".into()),
            ..work("w1", " c1 ", " Alice ")
        };
        let second = Work {
            bilibili_space: Some("https://space.bilibili.com/other".into()),
            avatar: Some("/a.webp".into()),
            ..work("w2", "c1", "Alice")
        };
        let index = SiteIndex::new(vec![first, second]);

        let creator = index.get_creator("c1").unwrap();
        assert_eq!(creator.name, "Alice");
        assert_eq!(creator.bilibili_space, "https://space.bilibili.com/1");
        assert_eq!(creator.avatar, None);
    }

    #[test]
    fn test_avatar_kept_when_present() {
        let index = SiteIndex::new(vec![Work {
            avatar: Some(" /avatars/a.webp ".into()),
            ..work("w1", "c1", "Alice")
        }]);
        assert_eq!(index.get_creator("c1").unwrap().avatar.as_deref(), Some("/avatars/a.webp"));
    }

    #[test]
    fn test_lookup_is_exact() {
        let index = SiteIndex::new(vec![work("w1", " c1 ", "Alice")]);

        assert_eq!(index.get_creator("c1").unwrap().id, "c1");
        assert!(index.get_creator(" c1 ").is_none());
        assert!(index.get_creator("missing").is_none());
        assert!(index.get_work("W1").is_none());
    }

    #[test]
    fn test_duplicate_work_ids_first_wins() {
        let index = SiteIndex::new(vec![work("w1", "c1", "First"), work("w1", "c2", "Second")]);

        let found = index.get_work("w1").unwrap();
        assert_eq!(found.creator_name.as_deref(), Some("First"));
        assert!(index.is_canonical(&index.works()[0]));
        assert!(!index.is_canonical(&index.works()[1]));
    }

    #[test]
    fn test_works_by_creator() {
        let index = SiteIndex::new(sample());
        let ids: Vec<_> = index.works_by_creator("c1").iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["w1", "w3"]);
        assert!(index.works_by_creator("nobody").is_empty());
    }

    #[test]
    fn test_works_of_type() {
        let index = SiteIndex::new(vec![
            Work { work_type: Some(WorkType::Video), ..work("1", "a", "A") },
            Work { work_type: Some(WorkType::Comic), ..work("2", "a", "A") },
            Work { work_type: Some(WorkType::Video), ..work("3", "b", "B") },
        ]);

        let ids: Vec<_> = index.works_of_type(&WorkType::Video).iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert!(index.works_of_type(&WorkType::Music).is_empty());
    }

    #[test]
    fn test_timeline_grouping() {
        let index = SiteIndex::new(vec![
            Work { day_offset: Some(2), ..work("a", "c", "C") },
            Work { day_offset: None, ..work("b", "c", "C") },
            Work { day_offset: Some(0), ..work("c", "c", "C") },
            Work { day_offset: Some(2), ..work("d", "c", "C") },
        ]);

        let timeline = index.timeline();
        let days: Vec<_> = timeline.iter().map(|d| d.day).collect();
        assert_eq!(days, [Some(0), Some(2), None]);

        let second: Vec<_> = timeline[1].works.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(second, ["a", "d"]);
        assert_eq!(timeline[2].works[0].id, "b");
    }

    #[test]
    fn test_timeline_without_undated_group() {
        let index = SiteIndex::new(vec![Work { day_offset: Some(1), ..work("a", "c", "C") }]);
        assert_eq!(index.timeline().len(), 1);
        assert!(SiteIndex::new(Vec::new()).timeline().is_empty());
    }

    #[test]
    fn test_report() {
        let mut works = sample();
        works.push(work("w2", "c2", "Bob"));
        let index = SiteIndex::new(works);

        let report = index.report();
        assert_eq!(report.orphans, ["w4"]);
        assert_eq!(report.duplicate_works, ["w2"]);
        assert_eq!(report.divergences.len(), 1);

        let divergence = &report.divergences[0];
        assert_eq!(divergence.creator_id, "c1");
        assert_eq!(divergence.work_id, "w3");
        assert_eq!(divergence.field, CreatorField::Name);
        assert_eq!(divergence.kept, "Alice");
        assert_eq!(divergence.ignored, "Alice2");
        assert!(!report.is_clean());
    }

    #[test]
    fn test_report_clean() {
        let index = SiteIndex::new(vec![work("w1", "c1", "Alice"), work("w2", "c1", " Alice ")]);
        assert!(index.report().is_clean());
    }

    #[test]
    fn test_falsy_and_float_identities() {
        let works = crate::data::parse_works(
            r#"[
                {"id": "w1", "creatorId": 0, "creatorName": "Zero"},
                {"id": "w2", "creatorId": "c2", "creatorName": false},
                {"id": "w3", "creatorId": 1.0, "creatorName": "One"}
            ]"#,
        )
        .unwrap();
        let index = SiteIndex::new(works);

        let creators: Vec<_> = index
            .creators()
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect();
        assert_eq!(creators, [("1", "One")]);
        assert_eq!(index.get_creator("1").map(|c| c.name.as_str()), Some("One"));
        assert!(index.get_creator("0").is_none());
        assert_eq!(index.report().orphans, ["w1", "w2"]);
    }
}
