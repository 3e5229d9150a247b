//! Typo-tolerant handling of SAFEDEPLOY_* values
//!
//! A bad `SAFEDEPLOY_BACKUP_POLICY` never aborts a run: a warning with the
//! nearest valid spelling goes to `warnings` and the configured policy stays.

use std::io::Write;

use crate::domain::value_objects::BackupPolicy;

const POLICY_VAR: &str = "SAFEDEPLOY_BACKUP_POLICY";

/// Parse a policy override, keeping `current` when the value is unknown
pub fn parse_policy_override<W: Write>(
    value: &str,
    current: BackupPolicy,
    warnings: &mut W,
) -> BackupPolicy {
    if let Some(policy) = BackupPolicy::parse(value) {
        return policy;
    }

    let hint = closest(&value.trim().to_lowercase(), BackupPolicy::VALUES)
        .map(|s| format!(". Did you mean '{}'?", s))
        .unwrap_or_default();
    let _ = writeln!(warnings, "Warning: Invalid {} value '{}'{}", POLICY_VAR, value, hint);
    let _ = writeln!(warnings, "Valid values: {}", BackupPolicy::VALUES.join(", "));
    current
}

/// Nearest candidate within two edits of `input`
pub fn closest<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|&c| (c, levenshtein(input, c)))
        .filter(|&(_, dist)| dist <= 2)
        .min_by_key(|&(_, dist)| dist)
        .map(|(c, _)| c)
}

/// Edit distance over chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let substitute = diagonal + usize::from(ca != *cb);
            row[j + 1] = substitute.min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }

    row[b.len()]
}
