use super::PublishedRecord;
use crate::Result;
use core::fmt::Write;

pub fn generate<W: Write>(record: &PublishedRecord, writer: &mut W) -> Result<()> {
    write!(writer, "{}", serde_json::to_string_pretty(record)?)?;
    Ok(())
}
