use dsn_core::classify::remuneration::remuneration_label;
use dsn_core::error::DsnError;
use dsn_core::options::builtin;
use dsn_core::options::schema::AnalysisOptions;
use std::path::Path;

fn describe_types(options: &AnalysisOptions) -> String {
    match options.type_filter() {
        None => "all remuneration types".into(),
        Some(types) => types
            .iter()
            .map(|code| format!("{} ({})", code, remuneration_label(code)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub fn list() -> Result<(), DsnError> {
    println!("Available predefined option sets:\n");
    for name in builtin::PRESETS {
        let options = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!("  {:<8} {}{}", name, describe_types(&options), default_marker);
        if let Some(ref desc) = options.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(name: &str) -> Result<(), DsnError> {
    let options = builtin::load_preset(name)?;
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), DsnError> {
    let options = dsn_core::options::load_options(file)?;

    match options.name {
        Some(ref name) => println!("Options '{}' are valid.", name),
        None => println!("Options in {} are valid.", file.display()),
    }
    println!("  Remuneration: {}", describe_types(&options));
    match options.reference_date {
        Some(ref date) => println!("  Reference date: {}", date),
        None => println!("  Reference date: taken from the declarations"),
    }

    if let Some(ref types) = options.remuneration_types {
        if types.is_empty() {
            println!("\nWarnings:");
            println!("  - empty remuneration_types counts every type; omit the field instead");
        }
    }

    Ok(())
}
