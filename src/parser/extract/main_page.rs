use crate::error::Result;
use crate::parser::tree::RawBlock;
use crate::record::InstitutionRecord;

use super::values::{self, scraped};

pub fn editorial(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    rec.description = scraped(&block.item_value("1", 0)?);
    Ok(())
}

/// The school's own blurb replaces the editorial one when present.
pub fn from_the_school(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    if block.contents("2")?.is_truthy() {
        rec.description = scraped(&block.item("2", 0)?.key("data")?);
    }
    Ok(())
}

pub fn about(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    for item in block.contents("1")?.elements()? {
        if item.label()? == Some("Website") {
            rec.website = scraped(&item.key("value")?);
        }
    }
    Ok(())
}

pub fn admissions(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    for item in block.all_items()? {
        let Some(label) = item.label()? else { continue };
        match label {
            "Acceptance Rate" => rec.acceptance_rate = scraped(&item.key("value")?),
            "SAT Range" => {
                let value = item.key("value")?;
                if value.is_truthy() {
                    rec.sat_range = Some(values::sat_range(&value)?);
                }
            }
            "ACT Range" => {
                let value = item.key("value")?;
                if value.is_truthy() {
                    rec.act_range = Some(values::act_range(&value)?);
                }
            }
            "SAT/ACT" => rec.test_requirement = values::test_requirement(item.key("value")?.value()),
            "Application Website" => rec.application_website = scraped(&item.key("value")?),
            _ => {}
        }
    }
    Ok(())
}

pub fn cost(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    rec.net_price = scraped(&block.item_value("1", 0)?);
    Ok(())
}

pub fn academics(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    rec.student_faculty_ratio = scraped(&block.item_value("1", 1)?);
    Ok(())
}

pub fn students(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    rec.full_time_undergrads = scraped(&block.item_value("1", 0)?);
    rec.part_time_undergrads = scraped(&block.item_value("1", 1)?);
    rec.undergrads_over_25 = scraped(&block.item_value("1", 2)?);
    Ok(())
}

pub fn campus_life(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    rec.freshman_housing = scraped(&block.item_value("1", 0)?);
    Ok(())
}

pub fn after(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    rec.earnings_after_graduation = scraped(&block.item_value("1", 0)?);
    rec.graduation_rate = scraped(&block.item_value("2", 0)?);
    rec.employed_after_graduation = scraped(&block.item_value("2", 1)?);
    Ok(())
}
