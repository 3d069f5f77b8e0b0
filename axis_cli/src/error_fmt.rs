//! Human-readable error descriptions and structured JSON error output.

use crate::cli::JSON_MODE;

/// Map an eyre::Report to a human-readable explanation with likely causes
/// and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use axis_core::{AxisError, BuildError};

    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingSink => {
                "What happened: No output sink was provided to the mapping builder.\nLikely causes: The mapping was assembled without with_sink(...).\nHow to fix: Wire an AxisSink into the builder before build().".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See README for a sample."
            ),
        };
    }

    if let Some(ae) = err.downcast_ref::<AxisError>() {
        if let AxisError::Sink(msg) = ae {
            return format!(
                "What happened: Writing to the output sink failed ({msg}).\nLikely causes: The virtual output device is gone or stdout was closed.\nHow to fix: Check the output device and rerun."
            );
        }
        return format!(
            "What happened: {ae}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
        );
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("sample csv must have headers") {
        return "Invalid headers in sample CSV. Expected 'axis,sample'.".to_string();
    }

    if lower.contains("must declare at least one")
        || lower.contains("must be in [")
        || lower.contains("must be finite")
    {
        return format!(
            "What happened: Configuration is invalid.\nLikely causes: {msg}.\nHow to fix: Edit the TOML config and try again."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Emit the error to stderr, as a JSON object when --json was passed.
pub fn report(err: &eyre::Report) {
    if JSON_MODE.get().copied().unwrap_or(false) {
        let obj = serde_json::json!({
            "error": err.to_string(),
            "detail": humanize(err),
        });
        eprintln!("{obj}");
    } else {
        eprintln!("{}", humanize(err));
    }
}
