//! Form field resolver: map a semantic field's synonym list to at most one control.
//!
//! Tiers are tried in fixed priority order and the first acceptable control
//! wins; there is no scoring:
//! 1. `name` attribute contains a token
//! 2. `id` attribute contains a token
//! 3. `placeholder` attribute contains a token
//! 4. a label's text contains a token (nested control, else `for` target)
//!
//! Inside tiers 1-3 tokens are tried in list order and, per token, controls in
//! document order. Tier 4 walks labels in document order. Matching folds case
//! and treats `_`/`-` as spaces. The resolver holds no state between calls.

mod fold;
mod scan;

pub use fold::fold;

use crate::view::{ControlRef, FormView};

/// Strategy that produced a match, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    Name,
    Id,
    Placeholder,
    Label,
}

impl MatchTier {
    pub const ALL: [MatchTier; 4] = [
        MatchTier::Name,
        MatchTier::Id,
        MatchTier::Placeholder,
        MatchTier::Label,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MatchTier::Name => "name",
            MatchTier::Id => "id",
            MatchTier::Placeholder => "placeholder",
            MatchTier::Label => "label",
        }
    }
}

/// A resolved control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub control: ControlRef,
    pub tier: MatchTier,
    /// Index into the synonym list of the token that hit.
    pub synonym_index: usize,
}

/// Find the control for a field given its ordered synonym tokens.
///
/// Returns `None` when no tier matches; that is a normal outcome.
pub fn resolve<F: FormView>(form: &F, synonyms: &[&str]) -> Option<Match> {
    let tokens: Vec<String> = synonyms.iter().map(|s| fold(s)).collect();
    let hit = MatchTier::ALL.into_iter().find_map(|tier| match tier {
        MatchTier::Label => scan::label_tier(form, &tokens),
        _ => scan::attribute_tier(form, tier, &tokens),
    });
    match hit {
        Some(m) => tracing::debug!(
            tier = m.tier.as_str(),
            synonym = synonyms[m.synonym_index],
            control = m.control.0,
            "resolved field"
        ),
        None => tracing::debug!(?synonyms, "no field found"),
    }
    hit
}
