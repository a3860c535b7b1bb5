use std::env;
use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use csv2ofx::convert_statement;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    anyhow::ensure!(
        args.len() <= 2,
        "Usage: {} [statement.csv]",
        args.first().unwrap_or(&"csv2ofx".to_string())
    );

    match args.get(1).map(String::as_str) {
        Some(filename) if filename != "-" => {
            let file = File::open(filename)
                .with_context(|| format!("Failed to open input file '{}'", filename))?;
            convert_statement(file, io::stdout())
                .context("Failed to convert statement and write output")?;
        }
        _ => {
            convert_statement(io::stdin().lock(), io::stdout())
                .context("Failed to convert statement and write output")?;
        }
    }

    Ok(())
}
