//! CLI command implementations

pub mod check;
pub mod export;
pub mod list;
pub mod show;
pub mod verify;

/// Prints `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
