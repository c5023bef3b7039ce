use dsn_core::error::DsnError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), DsnError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
