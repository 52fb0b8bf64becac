//! `formfill resolve <page.json> <field>` – show where a field would land.

use anyhow::Result;
use formfill_core::catalog::SemanticField;
use formfill_core::resolver;
use formfill_core::snapshot::PageSnapshot;
use formfill_core::view::FormView;
use std::path::Path;

use super::describe_control;

pub fn run_resolve(page_path: &Path, field: SemanticField) -> Result<()> {
    let page = PageSnapshot::load(page_path)?;
    if page.forms.is_empty() {
        println!("No forms in {}.", page_path.display());
        return Ok(());
    }
    let synonyms = field.synonyms();
    for (i, form) in page.forms.iter().enumerate() {
        let hit = resolver::resolve(form, synonyms)
            .and_then(|m| form.control(m.control).map(|c| (m, c)));
        match hit {
            Some((m, control)) => println!(
                "form {i}: {field} -> control {} {} via {} ({:?})",
                m.control.0,
                describe_control(control),
                m.tier.as_str(),
                synonyms[m.synonym_index]
            ),
            None => println!("form {i}: {field} -> no match"),
        }
    }
    Ok(())
}
