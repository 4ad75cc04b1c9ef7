//! Dirty tracking for forms edited against a server-confirmed baseline.
//!
//! DESIGN
//! ======
//! A draft holds raw input text; the baseline holds typed server values.
//! `is_dirty` is a pure function of the two, so it can be recomputed in a
//! `Memo` on every keystroke. A draft never talks to the network: submit
//! turns it into a request body and reconciliation installs the server's
//! answer as the new baseline.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

/// A form's editable state, comparable against its baseline.
pub trait Draft: Clone + Default {
    type Baseline: Clone;

    /// Draft text that shows `baseline` unchanged.
    fn from_baseline(baseline: &Self::Baseline) -> Self;

    /// `true` when any tracked field differs after coercion.
    fn differs_from(&self, baseline: &Self::Baseline) -> bool;
}

#[derive(Clone, Default)]
pub struct FormDraft<D: Draft> {
    baseline: Option<D::Baseline>,
    pub draft: D,
}

impl<D: Draft> FormDraft<D> {
    pub fn baseline(&self) -> Option<&D::Baseline> {
        self.baseline.as_ref()
    }

    /// No baseline means nothing to compare against, hence not dirty.
    pub fn is_dirty(&self) -> bool {
        self.baseline.as_ref().is_some_and(|b| self.draft.differs_from(b))
    }

    /// Install the server's canonical value as both baseline and draft.
    pub fn reconcile(&mut self, baseline: D::Baseline) {
        self.draft = D::from_baseline(&baseline);
        self.baseline = Some(baseline);
    }

    /// `reconcile` only when `baseline` differs from the current one, so a
    /// re-delivered snapshot leaves in-progress edits alone. Returns whether
    /// the draft was replaced.
    pub fn rebase(&mut self, baseline: D::Baseline) -> bool
    where
        D::Baseline: PartialEq,
    {
        if self.baseline.as_ref() == Some(&baseline) {
            return false;
        }
        self.reconcile(baseline);
        true
    }

    /// Drop local edits.
    pub fn reset(&mut self) {
        self.draft = self.baseline.as_ref().map(D::from_baseline).unwrap_or_default();
    }
}

/// Coerce raw numeric input: blank is zero, anything unparseable is NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() { 0.0 } else { trimmed.parse().unwrap_or(f64::NAN) }
}

/// NaN never equals, so unparseable input always counts as a change.
#[allow(clippy::float_cmp)]
pub fn number_differs(raw: &str, baseline: f64) -> bool {
    coerce_number(raw) != baseline
}
