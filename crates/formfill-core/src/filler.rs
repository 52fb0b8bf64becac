//! Fill orchestration: resolve each stored field and write it into empty controls.
//!
//! Never overwrites: a matched control that already holds a value is skipped
//! and not counted, which also makes a second run a no-op.

use crate::catalog::{FieldGroup, SemanticField};
use crate::profile::ProfileData;
use crate::resolver::{self, MatchTier};
use crate::view::{ControlRef, ControlView, DomError, FieldEvent, FormMut, FormView};

/// One field to fill: its stored value and the tokens used to find it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec<'a> {
    pub field: SemanticField,
    pub value: &'a str,
    pub synonyms: &'static [&'static str],
}

/// What happened to one field during a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    Filled { control: ControlRef, tier: MatchTier },
    /// Matched control already had a value.
    Occupied { control: ControlRef },
    NoMatch,
}

/// Per-field record of a fill pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillLog {
    pub entries: Vec<(SemanticField, FieldOutcome)>,
}

impl FillLog {
    pub fn filled(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, o)| matches!(o, FieldOutcome::Filled { .. }))
            .count()
    }
}

/// Fill one group into `form`. Returns the number of controls written.
pub fn fill_group<F: FormMut>(form: &mut F, specs: &[FieldSpec<'_>]) -> Result<usize, DomError> {
    let mut log = FillLog::default();
    fill_group_logged(form, specs, &mut log)?;
    Ok(log.filled())
}

/// Like `fill_group`, recording an outcome for every non-empty spec.
pub fn fill_group_logged<F: FormMut>(
    form: &mut F,
    specs: &[FieldSpec<'_>],
    log: &mut FillLog,
) -> Result<usize, DomError> {
    let mut filled = 0;
    for spec in specs {
        if spec.value.is_empty() {
            continue;
        }
        let Some(m) = resolver::resolve(&*form, spec.synonyms) else {
            log.entries.push((spec.field, FieldOutcome::NoMatch));
            continue;
        };
        let current = form
            .control(m.control)
            .map(|c| c.value())
            .ok_or(DomError::Detached(m.control))?;
        if !current.is_empty() {
            tracing::debug!(field = %spec.field, control = m.control.0, "control already has a value; skipping");
            log.entries.push((spec.field, FieldOutcome::Occupied { control: m.control }));
            continue;
        }
        form.set_value(m.control, spec.value)?;
        form.dispatch(m.control, FieldEvent::Input)?;
        form.dispatch(m.control, FieldEvent::Change)?;
        tracing::debug!(field = %spec.field, control = m.control.0, tier = m.tier.as_str(), "filled");
        log.entries.push((
            spec.field,
            FieldOutcome::Filled {
                control: m.control,
                tier: m.tier,
            },
        ));
        filled += 1;
    }
    Ok(filled)
}

/// Fill all four groups (profile, education[0], experience[0], skills) into one form.
pub fn fill_form<F: FormMut>(form: &mut F, data: &ProfileData, log: &mut FillLog) -> Result<usize, DomError> {
    let mut filled = 0;
    for group in FieldGroup::ALL {
        let specs = data.group_specs(group);
        if specs.is_empty() {
            continue;
        }
        filled += fill_group_logged(form, &specs, log)?;
    }
    Ok(filled)
}
