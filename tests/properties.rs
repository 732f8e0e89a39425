//! Property tests against a copy-on-begin reference model.
//!
//! The model keeps a full flat map per scope: `begin` clones the top map,
//! `commit` replaces the parent with the top, `rollback` drops the top. The
//! layered store must be observationally identical to it.

use proptest::prelude::*;
use std::collections::HashMap;
use txkv::Store;

const KEYS: &[&str] = &["a", "b", "c", "d"];
const VALUES: &[&str] = &["1", "2", "3"];

#[derive(Clone, Debug)]
enum Step {
    Begin,
    Commit,
    Rollback,
    Set(usize, usize),
    Delete(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => Just(Step::Begin),
        1 => Just(Step::Commit),
        1 => Just(Step::Rollback),
        4 => (0..KEYS.len(), 0..VALUES.len()).prop_map(|(k, v)| Step::Set(k, v)),
        2 => (0..KEYS.len()).prop_map(Step::Delete),
    ]
}

struct Model {
    scopes: Vec<HashMap<&'static str, &'static str>>,
}

impl Model {
    fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    fn top(&mut self) -> &mut HashMap<&'static str, &'static str> {
        self.scopes.last_mut().unwrap()
    }

    fn begin(&mut self) {
        let top = self.scopes.last().unwrap().clone();
        self.scopes.push(top);
    }

    fn commit(&mut self) -> bool {
        if self.scopes.len() == 1 {
            return false;
        }
        let top = self.scopes.pop().unwrap();
        *self.top() = top;
        true
    }

    fn rollback(&mut self) -> bool {
        if self.scopes.len() == 1 {
            return false;
        }
        self.scopes.pop();
        true
    }

    fn get(&self, key: &str) -> Option<&'static str> {
        self.scopes.last().unwrap().get(key).copied()
    }

    fn count(&self, value: &str) -> usize {
        self.scopes
            .last()
            .unwrap()
            .values()
            .filter(|v| **v == value)
            .count()
    }
}

proptest! {
    #[test]
    fn prop_store_matches_model(steps in proptest::collection::vec(step(), 0..64)) {
        let mut store = Store::default();
        let mut model = Model::new();

        for step in steps {
            match step {
                Step::Begin => {
                    store.begin();
                    model.begin();
                }
                Step::Commit => prop_assert_eq!(store.commit(), model.commit()),
                Step::Rollback => prop_assert_eq!(store.rollback(), model.rollback()),
                Step::Set(k, v) => {
                    store.set(KEYS[k], VALUES[v]);
                    model.top().insert(KEYS[k], VALUES[v]);
                }
                Step::Delete(k) => {
                    store.delete(KEYS[k]);
                    model.top().remove(KEYS[k]);
                }
            }

            for key in KEYS {
                prop_assert_eq!(store.get(key), model.get(key), "key {}", key);
            }
            for value in VALUES {
                prop_assert_eq!(store.count(value), model.count(value), "value {}", value);
            }

            let stats = store.stats();
            prop_assert_eq!(stats.depth, model.scopes.len());
            prop_assert_eq!(stats.open_transactions + 1, stats.depth);
            prop_assert_eq!(stats.visible_keys, model.scopes.last().unwrap().len());
        }
    }

    #[test]
    fn prop_rollback_restores_visibility(
        before in proptest::collection::vec((0..KEYS.len(), 0..VALUES.len()), 0..8),
        inside in proptest::collection::vec(step(), 0..32),
    ) {
        let mut store = Store::default();
        for (k, v) in before {
            store.set(KEYS[k], VALUES[v]);
        }
        let snapshot: Vec<_> = KEYS.iter().map(|k| store.get(k).map(str::to_string)).collect();

        store.begin();
        let outer = store.depth();
        for step in inside {
            match step {
                Step::Begin => store.begin(),
                // Only close scopes opened inside the outer transaction.
                Step::Commit if store.depth() > outer => {
                    store.commit();
                }
                Step::Rollback if store.depth() > outer => {
                    store.rollback();
                }
                Step::Commit | Step::Rollback => {}
                Step::Set(k, v) => store.set(KEYS[k], VALUES[v]),
                Step::Delete(k) => store.delete(KEYS[k]),
            }
        }
        while store.depth() > outer {
            store.commit();
        }
        prop_assert!(store.rollback());

        let after: Vec<_> = KEYS.iter().map(|k| store.get(k).map(str::to_string)).collect();
        prop_assert_eq!(snapshot, after);
    }
}
