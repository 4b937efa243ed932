use crate::error::Result;
use crate::parser::tree::RawBlock;
use crate::record::InstitutionRecord;

use super::values::scraped;

pub fn deadlines(block: &RawBlock, rec: &mut InstitutionRecord) -> Result<()> {
    for item in block.all_items()? {
        match item.label()? {
            Some("Offers Early Decision") => rec.early_decision = scraped(&item.key("value")?),
            Some("Offers Early Action") => rec.early_action = scraped(&item.key("value")?),
            _ => {}
        }
    }
    Ok(())
}
