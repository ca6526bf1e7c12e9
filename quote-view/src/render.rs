use std::io::{self, Write};

use quote_core::NormalizedQuote;

use crate::cli::Format;

pub(crate) fn write_quotes<W: Write>(
    out: &mut W,
    quotes: &[NormalizedQuote],
    format: Format,
) -> io::Result<()> {
    match format {
        Format::Table => write_table(out, quotes),
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, quotes)?;
            writeln!(out)
        }
    }
}

/// Метка сессии для колонки SESSION
fn session_label(q: &NormalizedQuote) -> &'static str {
    if q.is_regular_trading_session {
        "open"
    } else if q.is_active {
        "extended"
    } else {
        "closed"
    }
}

fn write_table<W: Write>(out: &mut W, quotes: &[NormalizedQuote]) -> io::Result<()> {
    writeln!(
        out,
        "{:<12} {:>12} {:>10} {:>9} {:<9} {:<5}",
        "SYMBOL", "PRICE", "CHANGE", "CHANGE%", "SESSION", "CCY"
    )?;

    for q in quotes {
        writeln!(
            out,
            "{:<12} {:>12.2} {:>+10.2} {:>+8.2}% {:<9} {:<5}",
            q.quote.symbol,
            q.price,
            q.change,
            q.change_percent,
            session_label(q),
            q.currency_converted
        )?;
    }

    Ok(())
}
