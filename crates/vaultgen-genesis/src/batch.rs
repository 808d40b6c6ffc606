//! Row-by-row driver: CSV in, validated and derived CSV out.

use std::io::{Read, Write};

use serde::Serialize;
use tracing::{info, warn};
use vaultgen_core::error::VaultgenError;
use vaultgen_core::types::Amount;

use crate::deriver::AccountDeriver;
use crate::params::BatchParams;
use crate::record::{validate, GrantRecord, RowOutcome};

/// Output header, in column order.
pub const OUTPUT_HEADER: [&str; 8] = [
    "Name",
    "AmountInitial",
    "AmountTotal",
    "TemplateAddress",
    "VestingAddress",
    "VaultAddress",
    "VestStart",
    "VestEnd",
];

/// One output row. `name` is a positional token, never the grant's name.
#[derive(Debug, Serialize)]
pub struct OutputRow {
    pub name: String,
    pub amount_initial: Amount,
    pub amount_total: Amount,
    pub template_address: String,
    pub vesting_address: String,
    pub vault_address: String,
    pub vest_start: u32,
    pub vest_end: u32,
}

/// What a finished run saw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows_read: u64,
    pub rows_accepted: u64,
    pub rows_rejected: u64,
    /// Sum of accepted amounts, in SMH.
    pub audit_total: u128,
    /// Expected sum of vault totals, in smidge.
    pub expected_total: u128,
    pub unit_multiplier: u64,
}

impl BatchSummary {
    /// Audit total converted to smidge.
    pub fn audit_total_base(&self) -> u128 {
        self.audit_total * u128::from(self.unit_multiplier)
    }

    pub fn audit_matches(&self) -> bool {
        self.audit_total_base() == self.expected_total
    }
}

/// Anonymised label for the row on input line `line`.
pub fn record_label(line: u64) -> String {
    format!("record{line}")
}

/// A configured batch run.
pub struct Batch {
    params: BatchParams,
    deriver: AccountDeriver,
}

impl Batch {
    pub fn new(params: BatchParams) -> Result<Self, VaultgenError> {
        params.validate()?;
        let deriver = AccountDeriver::new(params.address_codec()?, params.schedule()?);
        Ok(Self { params, deriver })
    }

    pub fn params(&self) -> &BatchParams {
        &self.params
    }

    pub fn deriver(&self) -> &AccountDeriver {
        &self.deriver
    }

    /// Process every row of `input` in order, writing one CSV row per
    /// accepted grant to `output` and flushing after each.
    ///
    /// Rejected rows are logged and skipped. CSV structure errors, I/O
    /// errors and unit-conversion overflow abort the run; rows already
    /// written stay written.
    pub fn run<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<BatchSummary, VaultgenError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(input);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(output);

        let header_width = reader.byte_headers().map_err(csv_err)?.len();
        let width = self.params.columns.width();
        if header_width == 0 {
            return Err(VaultgenError::Csv("input has no header line".into()));
        }
        if header_width < width {
            return Err(VaultgenError::Csv(format!(
                "header has {header_width} columns, expected at least {width}"
            )));
        }

        writer.write_record(OUTPUT_HEADER).map_err(csv_err)?;
        writer.flush()?;

        let mut summary = BatchSummary {
            expected_total: self.params.expected_total,
            unit_multiplier: self.params.unit_multiplier,
            ..BatchSummary::default()
        };
        // Line 1 is the header.
        let mut line: u64 = 1;

        for result in reader.byte_records() {
            let raw = result.map_err(csv_err)?;
            line += 1;
            summary.rows_read += 1;

            let fields: Vec<&[u8]> = raw.iter().collect();
            let decoded = GrantRecord::from_fields(&fields, &self.params.columns).ok_or_else(
                || VaultgenError::Csv(format!("line {line}: expected at least {width} columns")),
            )?;
            let outcome = match decoded {
                Ok(record) => validate(&record, self.params.unit_multiplier, line)?,
                Err(reason) => RowOutcome::Rejected(reason),
            };

            let grant = match outcome {
                RowOutcome::Accepted(grant) => grant,
                RowOutcome::Rejected(reason) => {
                    warn!(line, reason = %reason, "skipping record");
                    summary.rows_rejected += 1;
                    continue;
                }
            };

            let accounts = self.deriver.derive_grant(&grant);
            let rendered = self.deriver.render(&accounts)?;
            self.deriver.trace(line, &grant.keys, &rendered);

            summary.audit_total += u128::from(grant.amount);
            summary.rows_accepted += 1;

            writer
                .serialize(OutputRow {
                    name: record_label(line),
                    amount_initial: accounts.amount_initial,
                    amount_total: accounts.amount_total,
                    template_address: rendered.template,
                    vesting_address: rendered.vesting,
                    vault_address: rendered.vault,
                    vest_start: accounts.vest_start.get(),
                    vest_end: accounts.vest_end.get(),
                })
                .map_err(csv_err)?;
            writer.flush()?;
        }

        info!(
            total_smh = %summary.audit_total,
            accepted = summary.rows_accepted,
            rejected = summary.rows_rejected,
            "total vaulted issuance"
        );
        if !summary.audit_matches() {
            warn!(
                got = %summary.audit_total_base(),
                expected = %summary.expected_total,
                "vaulted issuance does not match expected total"
            );
        }

        Ok(summary)
    }
}

fn csv_err(e: csv::Error) -> VaultgenError {
    VaultgenError::Csv(e.to_string())
}
