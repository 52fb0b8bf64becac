//! Tier scans: attribute substring tiers, then label text.

use crate::view::{ControlRef, ControlView, FormView, LabelView};

use super::fold::{contains_folded, fold};
use super::{Match, MatchTier};

/// Folded attribute of every fillable control, in document order.
/// Non-fillable controls and missing attributes are `None`.
fn folded_attribute<F, A>(form: &F, attr: A) -> Vec<Option<String>>
where
    F: FormView,
    A: Fn(&F::Control) -> Option<&str>,
{
    (0..form.control_count())
        .map(|i| {
            form.control(ControlRef(i))
                .filter(|c| c.is_fillable())
                .and_then(|c| attr(c))
                .map(fold)
        })
        .collect()
}

/// Tokens first, then controls in document order (querySelector per token).
pub(super) fn attribute_tier<F: FormView>(
    form: &F,
    tier: MatchTier,
    tokens: &[String],
) -> Option<Match> {
    let haystacks = match tier {
        MatchTier::Name => folded_attribute(form, |c| c.name()),
        MatchTier::Id => folded_attribute(form, |c| c.dom_id()),
        MatchTier::Placeholder => folded_attribute(form, |c| c.placeholder()),
        MatchTier::Label => return None,
    };
    for (synonym_index, token) in tokens.iter().enumerate() {
        let hit = haystacks.iter().position(|h| {
            h.as_deref()
                .map(|h| contains_folded(h, token))
                .unwrap_or(false)
        });
        if let Some(i) = hit {
            return Some(Match {
                control: ControlRef(i),
                tier,
                synonym_index,
            });
        }
    }
    None
}

/// Labels in document order, tokens per label. A matching label resolves to its
/// nested control, else to the control its `for` attribute names.
pub(super) fn label_tier<F: FormView>(form: &F, tokens: &[String]) -> Option<Match> {
    for index in 0..form.label_count() {
        let Some(label) = form.label(index) else {
            continue;
        };
        let text = fold(label.text());
        let Some(synonym_index) = tokens.iter().position(|t| contains_folded(&text, t)) else {
            continue;
        };
        match label_target(form, label) {
            Some(control) => {
                return Some(Match {
                    control,
                    tier: MatchTier::Label,
                    synonym_index,
                })
            }
            None => {
                tracing::trace!(label = label.text(), "label matched but has no fillable control");
            }
        }
    }
    None
}

fn label_target<F: FormView>(form: &F, label: &F::Label) -> Option<ControlRef> {
    let fillable = |at: ControlRef| form.control(at).is_some_and(|c| c.is_fillable());
    label
        .nested_control()
        .filter(|at| fillable(*at))
        .or_else(|| {
            label
                .for_id()
                .filter(|id| !id.is_empty())
                .and_then(|id| form.control_by_dom_id(id))
                .filter(|at| fillable(*at))
        })
}
