pub mod error;
pub mod models;
pub mod ofx;
pub mod parser;

use std::io::{Read, Write};

use error::Result;
use ofx::OfxRenderer;

/// Convert a statement export read from `reader` into an OFX document
/// written to `writer`.
///
/// Input is parsed to completion before rendering begins; an error in
/// any row aborts the run with nothing written.
pub fn convert_statement<R: Read, W: Write>(reader: R, writer: W) -> Result<()> {
    let transactions = parser::parse_rows(reader)?;
    OfxRenderer::new().render(&transactions, writer)
}
