use anyhow::Result;
use csv::WriterBuilder;
use passbook_core::{ParseResult, Transaction};
use serde::Serialize;
use std::io::Write;

const CSV_HEADER: [&str; 6] = ["date", "description", "amount", "balance", "type", "category"];

#[derive(Serialize)]
struct CsvOutRow<'a> {
    date: String,
    description: &'a str,
    amount: String,
    balance: Option<String>,
    kind: &'static str,
    category: &'static str,
}

pub fn write_json<W: Write>(mut w: W, result: &ParseResult, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut w, result)?;
    } else {
        serde_json::to_writer(&mut w, result)?;
    }
    writeln!(w)?;
    Ok(())
}

/// One row per transaction; the header is written even when there are none
pub fn write_csv<W: Write>(w: W, txns: &[Transaction]) -> Result<()> {
    let mut wrt = WriterBuilder::new().has_headers(false).from_writer(w);
    wrt.write_record(CSV_HEADER)?;

    for t in txns {
        wrt.serialize(CsvOutRow {
            date: t.date.format("%Y-%m-%d").to_string(),
            description: &t.description,
            amount: t.amount.to_string(),
            balance: t.balance.map(|b| b.to_string()),
            kind: t.kind.as_str(),
            category: t.category.label(),
        })?;
    }
    wrt.flush()?;
    Ok(())
}
