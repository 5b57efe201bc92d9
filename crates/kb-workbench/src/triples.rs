//! Subject/predicate/object assembly.

use kb_core::entities::{Triple, TripleDraft};
use kb_core::ids::{PREFIX_TRIPLE, reissue_if_taken};

/// Which part of the draft a value goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripleSlot {
    Subject,
    Predicate,
    Object,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleBuilder {
    draft: TripleDraft,
    triples: Vec<Triple>,
}

impl TripleBuilder {
    #[must_use]
    pub const fn new(draft: TripleDraft, triples: Vec<Triple>) -> Self {
        Self { draft, triples }
    }

    #[must_use]
    pub const fn draft(&self) -> &TripleDraft {
        &self.draft
    }

    /// Instantiated triples, oldest first.
    #[must_use]
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn set(&mut self, slot: TripleSlot, value: &str) {
        let field = match slot {
            TripleSlot::Subject => &mut self.draft.subject,
            TripleSlot::Predicate => &mut self.draft.predicate,
            TripleSlot::Object => &mut self.draft.object,
        };
        value.clone_into(field);
    }

    #[must_use]
    pub fn can_instantiate(&self) -> bool {
        self.draft.is_complete()
    }

    /// Append the draft as a new triple with a fresh ID. The draft is kept.
    pub fn instantiate(&mut self) -> Option<&Triple> {
        if !self.can_instantiate() {
            return None;
        }
        let d = &self.draft;
        let mut triple = Triple::new(&d.subject, &d.predicate, &d.object);
        reissue_if_taken(&mut triple.id, PREFIX_TRIPLE, |id| {
            self.triples.iter().any(|t| t.id == id)
        });
        self.triples.push(triple);
        self.triples.last()
    }

    /// Exchange subject and object. Refused while the predicate is empty.
    pub fn swap(&mut self) -> bool {
        if self.draft.predicate.is_empty() {
            return false;
        }
        std::mem::swap(&mut self.draft.subject, &mut self.draft.object);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn builder(s: &str, p: &str, o: &str) -> TripleBuilder {
        let mut b = TripleBuilder::default();
        b.set(TripleSlot::Subject, s);
        b.set(TripleSlot::Predicate, p);
        b.set(TripleSlot::Object, o);
        b
    }

    #[test]
    fn instantiate_twice_yields_distinct_ids() {
        let mut b = builder("Pump1", "hasSensor", "Sensor7");
        let first = b.instantiate().unwrap().id.clone();
        let second = b.instantiate().unwrap().id.clone();
        assert_ne!(first, second);
        assert_eq!(b.triples().len(), 2);
        assert!(b.triples().iter().all(|t| {
            (t.subject.as_str(), t.predicate.as_str(), t.object.as_str())
                == ("Pump1", "hasSensor", "Sensor7")
        }));
        assert!(b.draft().is_complete(), "draft is kept");
    }

    #[test]
    fn instantiated_ids_never_repeat_restored_ones() {
        let restored: Vec<Triple> = (0..64)
            .map(|_| Triple::new("Pump1", "hasSensor", "Sensor7"))
            .collect();
        let mut b = TripleBuilder::new(
            TripleDraft {
                subject: "Pump2".into(),
                predicate: "hasSensor".into(),
                object: "Sensor8".into(),
            },
            restored.clone(),
        );
        for _ in 0..64 {
            b.instantiate().unwrap();
        }
        let ids: std::collections::HashSet<&str> =
            b.triples().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 128);
        assert_eq!(&b.triples()[..64], &restored[..]);
    }

    #[test]
    fn incomplete_draft_cannot_instantiate() {
        let mut b = builder("A", "", "B");
        assert!(!b.can_instantiate());
        assert!(b.instantiate().is_none());
        assert!(b.triples().is_empty());
    }

    #[test]
    fn swap_exchanges_subject_and_object() {
        let mut b = builder("A", "hasSensor", "B");
        assert!(b.swap());
        assert_eq!(
            b.draft(),
            &TripleDraft {
                subject: "B".into(),
                predicate: "hasSensor".into(),
                object: "A".into(),
            }
        );
    }

    #[test]
    fn swap_without_predicate_is_a_noop() {
        let mut b = builder("A", "", "B");
        assert!(!b.swap());
        assert_eq!(b.draft().subject, "A");
        assert_eq!(b.draft().object, "B");
    }
}
