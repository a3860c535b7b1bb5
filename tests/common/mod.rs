use chrono::NaiveDate;
use csv2ofx::models::{Transaction, TransactionKind};
use rust_decimal::Decimal;

/// Helper to create a calendar date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Helper to create a transaction with all fields
pub fn make_transaction(
    kind: TransactionKind,
    date: NaiveDate,
    description: &str,
    amount: Decimal,
    security: &str,
    quantity: &str,
) -> Transaction {
    Transaction::new(
        kind,
        date,
        description.to_string(),
        amount,
        security.to_string(),
        quantity.to_string(),
    )
}

/// Convert a statement CSV string and return the OFX output
pub fn convert_string(csv_input: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut output = Vec::new();
    csv2ofx::convert_statement(csv_input.as_bytes(), &mut output)?;
    Ok(String::from_utf8(output)?)
}

/// Create a test statement export from a list of row tuples
/// (category, date, description, amount, fund, shares)
pub fn build_statement_csv(rows: &[(&str, &str, &str, &str, &str, &str)]) -> String {
    let mut csv = String::from("Personal Investment Transactions,,,,,\n");
    csv.push_str("Export generated by brokerage website,,,,,\n");
    csv.push_str("Category,Date,Description,Amount,Fund,Shares\n");

    for (category, date, description, amount, fund, shares) in rows {
        csv.push_str(&format!(
            "{},{},{},\"{}\",{},{}\n",
            category, date, description, amount, fund, shares
        ));
    }

    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_make_transaction() {
        let tx = make_transaction(
            TransactionKind::Buy,
            date(2023, 1, 2),
            "Fund purchase",
            dec!(100.00),
            "ABC123",
            "5",
        );
        assert_eq!(tx.security, "ABC123");
        assert_eq!(tx.quantity, "5");
        assert_eq!(tx.amount, dec!(100.00));
        assert!(matches!(tx.kind, TransactionKind::Buy));
        assert!(!tx.unique_id.is_empty());
    }

    #[test]
    fn test_build_statement_csv() {
        let csv = build_statement_csv(&[(
            "Buy",
            "01/02/2023",
            "Fund purchase",
            "$100.00",
            "ABC123",
            "5",
        )]);

        assert!(csv.starts_with("Personal Investment Transactions"));
        assert!(csv.contains("Category,Date,Description,Amount,Fund,Shares\n"));
        assert!(csv.contains("Buy,01/02/2023,Fund purchase,\"$100.00\",ABC123,5"));
    }

    #[test]
    fn test_convert_string() {
        let csv = build_statement_csv(&[(
            "Buy",
            "01/02/2023",
            "Fund purchase",
            "$100.00",
            "ABC123",
            "5",
        )]);
        let output = convert_string(&csv).unwrap();

        assert!(output.starts_with("DATA:OFXSGML\nENCODING:UTF-8\n"));
        assert!(output.contains("<BUYSTOCK>"));
    }
}
