use crate::error::Result;
use crate::parser::tree::RawBlock;
use crate::record::InstitutionRecord;

use super::values::{self, scraped};

pub fn statistics(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    rec.research_funding_per_student = scraped(&block.item_value("3", 3)?);
    Ok(())
}

/// Left unset when the breakdown itself is empty or null.
pub fn classes(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    let breakdown = block.item_value("1", 0)?;
    if breakdown.is_truthy() {
        rec.avg_class_size = Some(values::avg_class_size(&breakdown)?);
    }
    Ok(())
}

pub fn professors(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    rec.professor_salary = scraped(&block.item_value("1", 4)?);
    Ok(())
}
