use crate::catalog::{GlobalCatalogs, OVERALL_KEY};
use crate::error::Result;
use crate::parser::tree::{Node, RawBlock};
use crate::parser::SchoolPosition;
use crate::record::{InstitutionRecord, RankingEntry};

const NATIONAL_GROUP: &str = "National";
const MAJOR_KEY_PREFIX: &str = "best-colleges-for-";
const MAJOR_DISPLAY_PREFIX: &str = "Best Colleges for ";
const DISPLAY_SUFFIX: &str = " in America";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    /// Computed from input order instead.
    Overall,
    Major,
    General,
}

pub fn classify(key: &str) -> BadgeKind {
    if key == OVERALL_KEY {
        BadgeKind::Overall
    } else if key.starts_with(MAJOR_KEY_PREFIX) {
        BadgeKind::Major
    } else {
        BadgeKind::General
    }
}

/// "Best Colleges for Biology in America" → "Biology"
pub fn display_name(kind: BadgeKind, display: &str) -> &str {
    let name = match kind {
        BadgeKind::Major => display.strip_prefix(MAJOR_DISPLAY_PREFIX).unwrap_or(display),
        _ => display,
    };
    name.strip_suffix(DISPLAY_SUFFIX).unwrap_or(name)
}

/// Records the national badges on the institution and in `catalogs`.
/// Major badges are dropped when `rec.major_rankings` is `None`.
pub fn badges(block: &RawBlock, rec: &mut InstitutionRecord, catalogs: &mut GlobalCatalogs) -> Result<()> {
    let groups = block.item("1", 0)?.key("badgeGroups")?;
    for group in groups.elements()? {
        if group.key("title")?.value().as_str() != Some(NATIONAL_GROUP) {
            continue;
        }
        for badge in group.key("badges")?.elements()? {
            record_badge(&badge, rec, catalogs)?;
        }
    }
    Ok(())
}

fn record_badge(badge: &Node<'_>, rec: &mut InstitutionRecord, catalogs: &mut GlobalCatalogs) -> Result<()> {
    let key = badge.key("vanityURL")?.str()?;
    let kind = classify(key);
    if kind == BadgeKind::Overall {
        return Ok(());
    }

    let display = badge.key("display")?.str()?;
    let entry = RankingEntry {
        ordinal: badge.key("ordinal")?.as_u64()?,
        total: badge.key("total")?.as_u64()?,
    };
    let name = display_name(kind, display);

    match kind {
        BadgeKind::Major => {
            if let Some(majors) = rec.major_rankings.as_mut() {
                majors.insert(key.to_string(), entry);
                catalogs.record_major(key, entry.total, name);
            }
        }
        _ => {
            rec.rankings.insert(key.to_string(), entry);
            catalogs.record_general(key, entry.total, name);
        }
    }
    Ok(())
}

/// Overall rank is the 1-based input position among all institutions.
pub fn insert_overall(rec: &mut InstitutionRecord, position: SchoolPosition) {
    rec.rankings.insert(
        OVERALL_KEY.to_string(),
        RankingEntry {
            ordinal: position.index as u64 + 1,
            total: position.total as u64,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CatalogEntry, RankingMap};
    use serde_json::{json, Value};

    fn rankings_block(groups: Value) -> RawBlock {
        serde_json::from_value(json!({
            "config": {"anchor": ["rankings"]},
            "buckets": {"1": {"contents": [{"badgeGroups": groups}]}}
        }))
        .unwrap()
    }

    fn full_record() -> InstitutionRecord {
        let mut rec = InstitutionRecord::new("A", "a");
        rec.major_rankings = Some(RankingMap::new());
        rec
    }

    #[test]
    fn major_badge() {
        let block = rankings_block(json!([{"title": "National", "badges": [{
            "vanityURL": "best-colleges-for-biology",
            "ordinal": 5, "total": 200,
            "display": "Best Colleges for Biology in America"
        }]}]));
        let mut rec = full_record();
        let mut catalogs = GlobalCatalogs::default();
        badges(&block, &mut rec, &mut catalogs).unwrap();

        assert_eq!(
            rec.major_rankings.as_ref().unwrap()["best-colleges-for-biology"],
            RankingEntry { ordinal: 5, total: 200 }
        );
        assert_eq!(
            catalogs.major_rankings["best-colleges-for-biology"],
            CatalogEntry { total: 200, name: "Biology".into() }
        );
        assert!(rec.rankings.is_empty());
        assert_eq!(catalogs.sorted_majors(), vec!["Biology"]);
    }

    #[test]
    fn general_badge_strips_suffix_only() {
        let block = rankings_block(json!([{"title": "National", "badges": [{
            "vanityURL": "colleges-with-the-best-professors",
            "ordinal": 12, "total": 1400,
            "display": "Colleges with the Best Professors in America"
        }]}]));
        let mut rec = full_record();
        let mut catalogs = GlobalCatalogs::default();
        badges(&block, &mut rec, &mut catalogs).unwrap();

        assert_eq!(rec.rankings["colleges-with-the-best-professors"].ordinal, 12);
        assert_eq!(
            catalogs.rankings["colleges-with-the-best-professors"].name,
            "Colleges with the Best Professors"
        );
    }

    #[test]
    fn overall_badge_and_other_groups_are_skipped() {
        let block = rankings_block(json!([
            {"title": "National", "badges": [
                {"vanityURL": "best-colleges", "ordinal": 1, "total": 1500, "display": "Best Colleges in America"}
            ]},
            {"title": "Regional", "badges": [
                {"vanityURL": "best-colleges-in-texas", "ordinal": 1, "total": 90, "display": "Best Colleges in Texas"}
            ]}
        ]));
        let mut rec = full_record();
        let mut catalogs = GlobalCatalogs::default();
        badges(&block, &mut rec, &mut catalogs).unwrap();
        assert!(rec.rankings.is_empty());
        assert_eq!(catalogs, GlobalCatalogs::default());
    }

    #[test]
    fn reduced_record_drops_major_badges() {
        let block = rankings_block(json!([{"title": "National", "badges": [{
            "vanityURL": "best-colleges-for-art", "ordinal": 3, "total": 40,
            "display": "Best Colleges for Art in America"
        }]}]));
        let mut rec = InstitutionRecord::new("A", "a");
        let mut catalogs = GlobalCatalogs::default();
        badges(&block, &mut rec, &mut catalogs).unwrap();
        assert!(rec.major_rankings.is_none());
        assert!(catalogs.major_rankings.is_empty());
    }

    #[test]
    fn overall_entry_uses_position() {
        let mut rec = InstitutionRecord::new("A", "a");
        insert_overall(&mut rec, SchoolPosition { index: 4, total: 10 });
        assert_eq!(rec.rankings[OVERALL_KEY], RankingEntry { ordinal: 5, total: 10 });
    }

    #[test]
    fn classify_keys() {
        assert_eq!(classify("best-colleges"), BadgeKind::Overall);
        assert_eq!(classify("best-colleges-for-music"), BadgeKind::Major);
        assert_eq!(classify("best-colleges-in-america"), BadgeKind::General);
        assert_eq!(display_name(BadgeKind::General, "Best Value Colleges"), "Best Value Colleges");
    }
}
