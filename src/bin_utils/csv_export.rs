use std::io::Write;

use csv::Writer;

use crate::transaction::Transaction;

/// Renders the transaction log as CSV, one row per transaction, with a
/// header row derived from the wire field names.
pub fn export_transactions<'a, W>(
    output: &mut W,
    transactions: impl Iterator<Item = &'a Transaction>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for tx in transactions {
        if let Err(err) = writer.serialize(tx) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
