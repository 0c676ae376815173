use std::collections::BTreeSet;

use crate::annotation::grammar::PtmToken;

/// UI collaborator notified once per token that gains or loses its
/// annotation card.
pub trait AnnotationSink {
    fn on_token_added(&mut self, token: &PtmToken);
    fn on_token_removed(&mut self, token: &PtmToken);
}

/// Two-sided set difference between the registry and a freshly extracted
/// token set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationDelta {
    pub added: BTreeSet<PtmToken>,
    pub removed: BTreeSet<PtmToken>,
}

impl AnnotationDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// The set of tokens that currently have an annotation card. The registry is
/// the only writer of that set; reconciliation keeps it equal to the cards
/// that exist on screen.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: BTreeSet<PtmToken>,
}

impl TokenRegistry {
    pub fn new() -> TokenRegistry {
        TokenRegistry {
            tokens: BTreeSet::new(),
        }
    }

    pub fn tokens(&self) -> &BTreeSet<PtmToken> {
        &self.tokens
    }

    pub fn contains(&self, token: &PtmToken) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Pure diff against a new token set: what would have to be added and
    /// removed to make the registry equal to `new_tokens`. No side effects.
    pub fn diff(&self, new_tokens: &BTreeSet<PtmToken>) -> AnnotationDelta {
        AnnotationDelta {
            added: new_tokens.difference(&self.tokens).cloned().collect(),
            removed: self.tokens.difference(new_tokens).cloned().collect(),
        }
    }

    /// Apply a new token set: removed tokens leave the registry and get one
    /// `on_token_removed` call, added tokens enter it and get one
    /// `on_token_added` call. Tokens present on both sides are untouched, so
    /// re-parsing unchanged input never thrashes existing cards. Safe to call
    /// on every edit cycle.
    pub fn reconcile(
        &mut self,
        new_tokens: &BTreeSet<PtmToken>,
        sink: &mut dyn AnnotationSink,
    ) -> AnnotationDelta {
        let delta = self.diff(new_tokens);
        for token in &delta.removed {
            self.tokens.remove(token);
            sink.on_token_removed(token);
        }
        for token in &delta.added {
            self.tokens.insert(token.clone());
            sink.on_token_added(token);
        }
        delta
    }
}
