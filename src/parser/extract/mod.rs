pub mod academics;
pub mod admissions;
pub mod main_page;
pub mod rankings;
pub mod values;

use super::anchors::{Anchor, Page};
use super::tree::RawBlock;
use crate::catalog::GlobalCatalogs;
use crate::error::Result;
use crate::record::InstitutionRecord;

/// Apply the rule for this block's anchor. Blocks without config and blocks
/// whose anchor is unknown on `page` leave the record untouched.
pub fn apply_block(
    page: Page,
    block: &RawBlock,
    rec: &mut InstitutionRecord,
    catalogs: &mut GlobalCatalogs,
) -> Result<()> {
    let Some(config) = &block.config else {
        return Ok(());
    };
    let Some(anchor) = Anchor::detect(page, &config.anchor) else {
        return Ok(());
    };

    let outcome = match anchor {
        Anchor::Editorial => main_page::editorial(block, rec),
        Anchor::FromTheSchool => main_page::from_the_school(block, rec),
        Anchor::About => main_page::about(block, rec),
        Anchor::Admissions => main_page::admissions(block, rec),
        Anchor::Cost => main_page::cost(block, rec),
        Anchor::Academics => main_page::academics(block, rec),
        Anchor::Students => main_page::students(block, rec),
        Anchor::CampusLife => main_page::campus_life(block, rec),
        Anchor::After => main_page::after(block, rec),
        Anchor::Rankings => rankings::badges(block, rec, catalogs),
        Anchor::AdmissionsDeadlines => admissions::deadlines(block, rec),
        Anchor::AcademicStatistics => academics::statistics(block, rec),
        Anchor::AboutTheClasses => academics::classes(block, rec),
        Anchor::AboutTheProfessors => academics::professors(block, rec),
    };
    outcome.map_err(|e| e.within(anchor.as_str()))
}
