//! The dispatcher: holds every registered parser in label-bound, global and
//! catch-all indices, and runs the four-step lookup against each incoming
//! message. No module-init side effects — parsers are registered explicitly
//! by whoever builds the `Registry` (the binary assembly point), so tests can
//! construct an empty one and add exactly the parsers they care about.
//!

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use acars_formats::{ParsedMessage, RawMessage};
use acars_parsers::{Parser, ParserClass};
use dashmap::DashMap;

pub struct Registry {
    by_label: HashMap<String, Vec<Arc<dyn Parser>>>,
    global: Vec<Arc<dyn Parser>>,
    catch_all: Vec<Arc<dyn Parser>>,
    failure_counts: DashMap<&'static str, u64>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            by_label: HashMap::new(),
            global: Vec::new(),
            catch_all: Vec::new(),
            failure_counts: DashMap::new(),
        }
    }

    /// Build a registry pre-loaded with every parser `acars_parsers` ships.
    pub fn with_default_parsers() -> Self {
        let mut registry = Registry::new();
        for parser in acars_parsers::all_parsers() {
            registry.add(Arc::from(parser));
        }
        registry
    }

    /// Register a parser. A label-bound parser is inserted once per label it
    /// declares, each label's list kept priority-sorted as entries arrive.
    pub fn add(&mut self, parser: Arc<dyn Parser>) {
        match parser.class() {
            ParserClass::LabelBound => {
                for label in parser.labels() {
                    let entry = self.by_label.entry(label.to_string()).or_default();
                    entry.push(parser.clone());
                    entry.sort_by_key(|p| p.priority());
                }
            }
            ParserClass::Global => {
                self.global.push(parser);
                self.global.sort_by_key(|p| p.priority());
            }
            ParserClass::CatchAll => {
                self.catch_all.push(parser);
                self.catch_all.sort_by_key(|p| p.priority());
            }
        }
    }

    /// Run the four-step dispatch algorithm against `msg`, returning every
    /// non-empty result in deterministic order. A parser that panics is
    /// treated as having produced nothing and its failure is counted.
    ///
    pub fn dispatch(&self, msg: &RawMessage) -> Vec<ParsedMessage> {
        let mut results = Vec::new();

        if let Some(bound) = self.by_label.get(msg.label.as_str()) {
            for parser in bound {
                self.run_one(parser.as_ref(), msg, &mut results);
            }
        }

        for parser in &self.global {
            self.run_one(parser.as_ref(), msg, &mut results);
        }

        if results.is_empty() {
            for parser in &self.catch_all {
                self.run_one(parser.as_ref(), msg, &mut results);
            }
        }

        results
    }

    fn run_one(&self, parser: &dyn Parser, msg: &RawMessage, results: &mut Vec<ParsedMessage>) {
        if !parser.prefilter(msg) {
            return;
        }
        let outcome = catch_unwind(AssertUnwindSafe(|| parser.parse(msg)));
        match outcome {
            Ok(Some(result)) => results.push(result),
            Ok(None) => {}
            Err(_) => {
                tracing::error!(
                    parser = parser.name(),
                    message_id = msg.id,
                    "parser panicked during dispatch"
                );
                *self.failure_counts.entry(parser.name()).or_insert(0) += 1;
            }
        }
    }

    pub fn failure_counts(&self) -> HashMap<&'static str, u64> {
        self.failure_counts.iter().map(|e| (*e.key(), *e.value())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acars_formats::RawMessage;

    #[derive(Debug)]
    struct AlwaysPanics;

    impl Parser for AlwaysPanics {
        fn name(&self) -> &'static str {
            "always_panics"
        }
        fn class(&self) -> ParserClass {
            ParserClass::CatchAll
        }
        fn priority(&self) -> i32 {
            0
        }
        fn prefilter(&self, _msg: &RawMessage) -> bool {
            true
        }
        fn parse(&self, _msg: &RawMessage) -> Option<ParsedMessage> {
            panic!("boom")
        }
    }

    #[test]
    fn panicking_parser_is_counted_not_propagated() {
        let mut registry = Registry::new();
        registry.add(Arc::new(AlwaysPanics));
        let msg = RawMessage::for_test("ZZ", "anything");
        let results = registry.dispatch(&msg);
        assert!(results.is_empty());
        assert_eq!(registry.failure_counts().get("always_panics"), Some(&1));
    }

    #[test]
    fn default_parsers_dispatch_pdc() {
        let registry = Registry::with_default_parsers();
        let msg = RawMessage::for_test("H1", "QF008 CLRD FM YSSY TO KLAX RWY 34L");
        let results = registry.dispatch(&msg);
        assert!(results.iter().any(|r| matches!(r, ParsedMessage::Pdc(_))));
    }

    #[test]
    fn catch_all_only_runs_when_nothing_else_matched() {
        let registry = Registry::with_default_parsers();
        let msg = RawMessage::for_test("ZZ", "totally unrecognised body");
        let results = registry.dispatch(&msg);
        assert!(results.iter().any(|r| matches!(r, ParsedMessage::MediaAdvisory(_))));
    }
}
