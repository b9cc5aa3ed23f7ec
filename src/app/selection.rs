//! Feature selection parsing and target directory resolution
//!
//! Both functions take the raw text the user typed. Validation is
//! all-or-nothing: one bad token rejects the whole selection.

use std::path::PathBuf;

use tracing::debug;

use crate::constants::ui;
use crate::errors::{LocalWriteError, LocalWriteResult, SelectionError, SelectionResult};

/// Resolves a selection like `"1, 3"` or `"all"` against the catalog
///
/// Numbers are 1-based and returned in the order given; repeated numbers
/// repeat the feature. `"all"` (any case, surrounding whitespace ignored)
/// selects every feature in catalog order.
///
/// # Errors
///
/// - `SelectionError::NotANumber` if any token is not an integer
/// - `SelectionError::OutOfRange` if any number is outside `1..=features.len()`
/// - `SelectionError::NothingSelected` if the selection resolves to no features
pub fn parse_selection(raw_input: &str, features: &[String]) -> SelectionResult<Vec<String>> {
    let selected = if raw_input.trim().eq_ignore_ascii_case(ui::SELECT_ALL) {
        features.to_vec()
    } else {
        raw_input
            .split(',')
            .map(|token| resolve_token(token.trim(), features))
            .collect::<SelectionResult<Vec<String>>>()?
    };

    if selected.is_empty() {
        return Err(SelectionError::NothingSelected);
    }

    debug!("Selected features: {:?}", selected);
    Ok(selected)
}

fn resolve_token(token: &str, features: &[String]) -> SelectionResult<String> {
    let index: i64 = token.parse().map_err(|_| SelectionError::NotANumber {
        token: token.to_string(),
    })?;

    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| features.get(i))
        .cloned()
        .ok_or(SelectionError::OutOfRange {
            index,
            max: features.len(),
        })
}

/// Turns the target directory answer into an existing directory
///
/// Blank input means the current directory. Directories that already exist
/// are accepted as they are.
///
/// # Errors
///
/// Returns `LocalWriteError::CreateDirectory` if the directory cannot be created
pub async fn resolve_target_directory(raw_input: &str) -> LocalWriteResult<PathBuf> {
    let trimmed = raw_input.trim();
    let target = PathBuf::from(if trimmed.is_empty() {
        ui::DEFAULT_TARGET_DIR
    } else {
        trimmed
    });

    tokio::fs::create_dir_all(&target)
        .await
        .map_err(|source| LocalWriteError::CreateDirectory {
            path: target.clone(),
            source,
        })?;

    debug!("Target directory ready: {}", target.display());
    Ok(target)
}
