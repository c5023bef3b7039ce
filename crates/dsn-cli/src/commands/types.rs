use dsn_core::classify::remuneration::REMUNERATION_TYPES;
use dsn_core::error::DsnError;

pub fn run() -> Result<(), DsnError> {
    println!("Remuneration types (S21.G00.51.011):\n");
    for (code, label) in REMUNERATION_TYPES {
        println!("  {}  {}", code, label);
    }
    println!("\nOther codes are accepted and reported as \"Type <code>\".");
    Ok(())
}
