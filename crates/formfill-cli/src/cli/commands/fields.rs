//! `formfill fields` – list the field catalog.

use anyhow::Result;
use formfill_core::catalog::FieldGroup;

pub fn run_fields() -> Result<()> {
    println!("{:<11} {:<16} {}", "GROUP", "FIELD", "TOKENS");
    for group in FieldGroup::ALL {
        for field in group.fields() {
            println!(
                "{:<11} {:<16} {}",
                group.as_str(),
                field.key(),
                field.synonyms().join(", ")
            );
        }
    }
    Ok(())
}
