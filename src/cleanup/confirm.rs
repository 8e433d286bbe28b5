use std::io::{BufRead, Write};

use crate::error::Result;

/// Whether a prompt answer means "go ahead". Only `y` and `yes`, in any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Ask a yes/no question and block until a line is entered.
///
/// End of input counts as "no".
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<bool> {
    write!(output, "{question} (y/N): ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(is_affirmative(&answer))
}
