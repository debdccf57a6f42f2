//! Validity gate, classification, rounding and chronological ordering.
//!
//! Everything a grammar produces passes through [`finalize`]; nothing else
//! builds a [`Transaction`].

use passbook_core::{classify, Transaction};
use tracing::trace;

use crate::normalize::round_cents;
use crate::types::{Attempt, Candidate, Extraction, SkipReason, Skipped};

/// Accept one candidate or say why not
pub fn accept(candidate: Candidate) -> Result<Transaction, Skipped> {
    let line = candidate.line;
    let skip = |reason| Skipped::new(line, reason);

    let date = candidate.date.ok_or_else(|| skip(SkipReason::UnparseableDate))?;
    if candidate.description.is_empty() {
        return Err(skip(SkipReason::EmptyDescription));
    }
    let amount = candidate
        .amount
        .map(round_cents)
        .ok_or_else(|| skip(SkipReason::UnparseableAmount))?;

    let classification = classify(amount, &candidate.description);

    Ok(Transaction {
        date,
        description: candidate.description,
        amount,
        balance: candidate.balance.map(round_cents),
        kind: classification.kind,
        category: classification.category,
    })
}

/// Gate every attempt, then order accepted transactions by date.
///
/// The sort is stable: transactions sharing a date stay in extraction order.
pub fn finalize(attempts: Vec<Attempt>) -> Extraction {
    let mut out = Extraction::default();

    for attempt in attempts {
        match attempt.and_then(accept) {
            Ok(txn) => out.transactions.push(txn),
            Err(skipped) => {
                trace!(line = skipped.line, reason = %skipped.reason, "skipped statement line");
                out.skipped.push(skipped);
            }
        }
    }

    // slice::sort_by_key is stable
    out.transactions.sort_by_key(|t| t.date);
    out
}
