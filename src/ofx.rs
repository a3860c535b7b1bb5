use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::error::{ConvertError, Result};
use crate::models::{Transaction, TransactionKind};

const DEFAULT_BROKER_ID: &str = "fidelity.com";
const DEFAULT_ACCOUNT_ID: &str = "401k";

const ENVELOPE_TAIL: &str = "</INVTRANLIST>
</INVSTMTRS>
</INVSTMTTRNRS>
</INVSTMTMSGSRSV1>
</OFX>
";

/// Renders transactions as an OFX investment statement.
/// Owns the fixed account identity stamped into the envelope.
pub struct OfxRenderer {
    broker_id: String,
    account_id: String,
}

impl OfxRenderer {
    pub fn new() -> Self {
        Self::with_account(DEFAULT_BROKER_ID, DEFAULT_ACCOUNT_ID)
    }

    pub fn with_account(broker_id: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            broker_id: broker_id.into(),
            account_id: account_id.into(),
        }
    }

    /// Render a statement stamped with the current wall-clock time
    pub fn render<W: Write>(&self, transactions: &[Transaction], writer: W) -> Result<()> {
        self.render_at(transactions, Utc::now().naive_utc(), writer)
    }

    /// Render a statement with an explicit generated-at timestamp.
    ///
    /// The document is assembled fully in memory before anything is
    /// written, so a bad transaction produces no partial output.
    pub fn render_at<W: Write>(
        &self,
        transactions: &[Transaction],
        generated_at: NaiveDateTime,
        mut writer: W,
    ) -> Result<()> {
        if transactions.is_empty() {
            return Err(ConvertError::EmptyStatement);
        }

        let start = transactions
            .iter()
            .map(|tx| tx.date)
            .min()
            .expect("transactions checked non-empty");
        let end = transactions
            .iter()
            .map(|tx| tx.date)
            .max()
            .expect("transactions checked non-empty");

        let mut document = self.envelope_head(generated_at, start, end);
        for tx in transactions {
            document.push_str(&render_record(tx)?);
        }
        document.push_str(ENVELOPE_TAIL);

        writer.write_all(document.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn envelope_head(&self, generated_at: NaiveDateTime, start: NaiveDate, end: NaiveDate) -> String {
        let now = format_timestamp(generated_at);
        format!(
            "DATA:OFXSGML
ENCODING:UTF-8
<OFX>
<SIGNONMSGSRSV1>
<SONRS>
<STATUS><CODE>0</CODE><SEVERITY>INFO</SEVERITY></STATUS>
<DTSERVER>{now}</DTSERVER>
<LANGUAGE>ENG</LANGUAGE>
</SONRS>
</SIGNONMSGSRSV1>
<INVSTMTMSGSRSV1>
<INVSTMTTRNRS>
<TRNUID>0</TRNUID>
<STATUS><CODE>0</CODE><SEVERITY>INFO</SEVERITY></STATUS>
<INVSTMTRS>
<DTASOF>{now}</DTASOF>
<CURDEF>USD</CURDEF>
<INVACCTFROM>
<BROKERID>{broker}</BROKERID>
<ACCTID>{account}</ACCTID>
</INVACCTFROM>
<INVTRANLIST>
<DTSTART>{start}</DTSTART>
<DTEND>{end}</DTEND>
",
            broker = self.broker_id,
            account = self.account_id,
            start = format_trade_date(start),
            end = format_trade_date(end),
        )
    }
}

impl Default for OfxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render one transaction record, selected by kind.
/// BUY negates the stored amount (cash leaving to acquire shares);
/// SELL and DIVIDEND record it as-is.
fn render_record(tx: &Transaction) -> Result<String> {
    let invtran = format!(
        "<INVTRAN>
<FITID>{fitid}</FITID>
<DTTRADE>{trade}</DTTRADE>
<MEMO>{memo}</MEMO>
</INVTRAN>",
        fitid = tx.unique_id,
        trade = format_trade_date(tx.date),
        memo = tx.description,
    );
    let secid = format!(
        "<SECID>
<UNIQUEID>{security}</UNIQUEID>
<UNIQUEIDTYPE>CUSIP</UNIQUEIDTYPE>
</SECID>",
        security = tx.security,
    );

    match tx.kind {
        TransactionKind::Buy => Ok(format!(
            "<BUYSTOCK>
<INVBUY>
{invtran}
{secid}
<UNITS>{units}</UNITS>
<TOTAL>{total}</TOTAL>
<SUBACCTSEC>CASH</SUBACCTSEC>
<SUBACCTFUND>CASH</SUBACCTFUND>
</INVBUY>
<BUYTYPE>BUY</BUYTYPE>
</BUYSTOCK>
",
            units = tx.quantity,
            total = -tx.amount,
        )),
        TransactionKind::Sell => Ok(format!(
            "<SELLSTOCK>
<INVSELL>
{invtran}
{secid}
<UNITS>{units}</UNITS>
<TOTAL>{total}</TOTAL>
<SUBACCTSEC>CASH</SUBACCTSEC>
<SUBACCTFUND>CASH</SUBACCTFUND>
</INVSELL>
<SELLTYPE>SELL</SELLTYPE>
</SELLSTOCK>
",
            units = tx.quantity,
            total = tx.amount,
        )),
        TransactionKind::Dividend => Ok(format!(
            "<REINVEST>
{invtran}
{secid}
<INCOMETYPE>DIV</INCOMETYPE>
<TOTAL>{total}</TOTAL>
<SUBACCTSEC>CASH</SUBACCTSEC>
<UNITS>{units}</UNITS>
</REINVEST>
",
            units = tx.quantity,
            total = tx.amount,
        )),
        TransactionKind::Unknown => Err(ConvertError::UnsupportedTransactionKind),
    }
}

/// Format a date-only value as the compact `YYYYMMDDhhmmss` timestamp,
/// time portion zero-filled
pub fn format_trade_date(date: NaiveDate) -> String {
    date.format("%Y%m%d000000").to_string()
}

fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y%m%d%H%M%S").to_string()
}
