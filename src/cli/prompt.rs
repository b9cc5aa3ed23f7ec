//! Line prompts on an async input stream

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::errors::{AppError, Result};

/// Writes `question`, then reads one line from `input`
///
/// The trailing newline is stripped; other whitespace is left for the caller.
///
/// # Errors
///
/// Returns `AppError::Io` if writing or reading fails and `AppError::Generic`
/// if input ends before a line was entered.
pub async fn ask<R, W>(input: &mut R, out: &mut W, question: &str) -> Result<String>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", question)?;
    out.flush()?;

    let mut answer = String::new();
    let read = input.read_line(&mut answer).await?;
    if read == 0 {
        return Err(AppError::generic("Input ended before an answer was given"));
    }

    let trimmed_len = answer.trim_end_matches(['\r', '\n']).len();
    answer.truncate(trimmed_len);
    Ok(answer)
}
