use std::io::Read;

use csv::{DeserializeRecordsIntoIter, Trim};

use crate::validator::TransactionRequest;

/// Parses raw transaction requests in CSV format.
///
/// Rows are yielded together with their line number so the caller can report
/// defects per line. A malformed row is an `Err` item, not a stop: the rest
/// of the input is still processed.
pub struct CsvRequestParser<R> {
    iter: DeserializeRecordsIntoIter<R, TransactionRequest>,
}

impl<R> CsvRequestParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvRequestParser<R>
where
    R: Read,
{
    type Item = (u64, Result<TransactionRequest, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
