use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Asks a yes/no question; only `y` (any case) counts as yes. EOF counts as no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<bool> {
    write!(output, "{question} (y/n): ")?;
    output.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("lendo resposta do terminal")?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
