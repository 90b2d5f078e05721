//! The test registry: ordered owner of every registered test.
//!
//! A `Registry` is built by user registration code, narrowed in place by the
//! filter operations, optionally reordered by [`Registry::shuffle`], and then
//! handed read-only to a [`crate::Runner`]. The documented pipeline order is
//! `filter` → `filter_by_tag` → `exclude_by_tag` → optional `shuffle`, which
//! makes exclusion take precedence over inclusion.

use std::collections::BTreeSet;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::entry::TestEntry;
use crate::metadata::TestMetadata;
use crate::suite::Suite;

/// Ordered, mutable collection of [`TestEntry`]. The only type with mutation
/// authority over the entries.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<TestEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one test and returns the new entry for fluent configuration
    /// (`.xfail()`, `.skip()`, `.timeout(..)`).
    ///
    /// Tags are deduplicated; each redundant occurrence emits a warning to
    /// stderr and is dropped. The returned borrow must end before the next
    /// mutating call on this registry — the borrow checker enforces this, so
    /// stale-reference hazards cannot arise.
    pub fn add<S: Suite + 'static>(
        &mut self,
        suite_name: &'static str,
        test_name: &'static str,
        method: fn(&mut S),
        tags: &[&str],
    ) -> &mut TestEntry {
        let mut unique_tags = BTreeSet::new();
        for tag in tags {
            if !unique_tags.insert((*tag).to_string()) {
                eprintln!(
                    "[attest] warning: duplicate tag \"{tag}\" on test {suite_name}::{test_name} -- ignoring"
                );
            }
        }

        // One fresh fixture per run; tear_down always executes, and a body
        // panic re-propagates only after it has. A tear_down panic replaces
        // the in-flight payload (accepted limitation).
        let runnable = Box::new(move || {
            let mut fixture = S::default();
            fixture.set_up();
            let body = catch_unwind(AssertUnwindSafe(|| method(&mut fixture)));
            fixture.tear_down();
            if let Err(payload) = body {
                resume_unwind(payload);
            }
        });

        let index = self.entries.len();
        self.entries.push(TestEntry::new(
            TestMetadata::new(suite_name, test_name, unique_tags),
            runnable,
        ));
        &mut self.entries[index]
    }

    /// Bulk registration: every `(name, method)` pair shares one tag set.
    pub fn add_all<S: Suite + 'static>(
        &mut self,
        suite_name: &'static str,
        tests: &[(&'static str, fn(&mut S))],
        tags: &[&str],
    ) {
        for (test_name, method) in tests {
            self.add(suite_name, test_name, *method, tags);
        }
    }

    /// Read-only view over the current entries, in current order.
    pub fn tests(&self) -> &[TestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keeps only entries whose full name contains `pattern`. The empty
    /// pattern matches everything. Order-preserving.
    pub fn filter(&mut self, pattern: &str) {
        self.entries
            .retain(|e| e.metadata.full_name().contains(pattern));
    }

    /// Keeps only entries carrying at least one of `include_tags` (OR
    /// semantics). No-op when `include_tags` is empty.
    pub fn filter_by_tag<T: AsRef<str>>(&mut self, include_tags: &[T]) {
        if include_tags.is_empty() {
            return;
        }
        self.entries
            .retain(|e| include_tags.iter().any(|t| e.metadata.has_tag(t.as_ref())));
    }

    /// Removes every entry carrying any of `exclude_tags`. No-op when
    /// `exclude_tags` is empty. Applied after `filter_by_tag`, this makes
    /// exclusion win for entries matching both.
    pub fn exclude_by_tag<T: AsRef<str>>(&mut self, exclude_tags: &[T]) {
        if exclude_tags.is_empty() {
            return;
        }
        self.entries
            .retain(|e| !exclude_tags.iter().any(|t| e.metadata.has_tag(t.as_ref())));
    }

    /// Deterministic two-level reorder: permute the order of suites, then the
    /// order of tests within each suite, both drawn from one
    /// `Xoshiro256StarStar` seeded exactly once with `seed`.
    ///
    /// Two levels distinguish "suites interleave differently" from "tests run
    /// in the wrong relative order within their suite"; a flat shuffle would
    /// conflate the two. The same seed yields the same order on every
    /// platform, and suites stay contiguous in the result.
    pub fn shuffle(&mut self, seed: u32) {
        let mut rng = Xoshiro256StarStar::seed_from_u64(u64::from(seed));

        // Group by suite in first-appearance order, preserving in-group order.
        let mut groups: Vec<(&'static str, Vec<TestEntry>)> = Vec::new();
        for entry in std::mem::take(&mut self.entries) {
            let suite = entry.metadata.suite_name;
            match groups.iter_mut().find(|(name, _)| *name == suite) {
                Some((_, group)) => group.push(entry),
                None => groups.push((suite, vec![entry])),
            }
        }

        groups.shuffle(&mut rng);
        for (_, group) in &mut groups {
            group.shuffle(&mut rng);
        }

        self.entries = groups.into_iter().flat_map(|(_, group)| group).collect();
    }

    /// One bare `"{suite}::{test}"` line per entry. Never anything else: no
    /// brackets or markers under any configuration (machine discovery relies
    /// on this).
    pub fn list_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.metadata.full_name())
            .collect()
    }

    /// Like [`Registry::list_lines`], but entries with markers get exactly one
    /// trailing bracket group: sorted tags first, then `xfail`, `skip`, and
    /// `timeout: <ms>ms`, joined by `", "`. Marker-free entries are identical
    /// to their bare line.
    pub fn list_verbose_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| {
                let m = &e.metadata;
                let mut markers: Vec<String> = m.tags.iter().cloned().collect();
                if m.xfail {
                    markers.push("xfail".to_string());
                }
                if m.skip {
                    markers.push("skip".to_string());
                }
                if let Some(limit) = m.timeout {
                    markers.push(format!("timeout: {}ms", limit.as_millis()));
                }
                if markers.is_empty() {
                    m.full_name()
                } else {
                    format!("{} [{}]", m.full_name(), markers.join(", "))
                }
            })
            .collect()
    }

    pub fn list(&self) {
        for line in self.list_lines() {
            println!("{line}");
        }
    }

    pub fn list_verbose(&self) {
        for line in self.list_verbose_lines() {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[derive(Default)]
    struct Fixture;
    impl Suite for Fixture {}

    fn noop(_: &mut Fixture) {}

    #[test]
    fn add_deduplicates_tags() {
        let mut registry = Registry::new();
        let entry = registry.add("Suite", "Test", noop, &["a", "a", "b"]);
        assert_eq!(entry.metadata.tags.len(), 2);
        assert!(entry.metadata.has_tag("a"));
        assert!(entry.metadata.has_tag("b"));
    }

    #[test]
    fn fluent_configuration_on_returned_entry() {
        let mut registry = Registry::new();
        registry
            .add("Suite", "Test", noop, &[])
            .xfail()
            .timeout(Duration::from_millis(500));
        let meta = &registry.tests()[0].metadata;
        assert!(meta.xfail);
        assert!(!meta.skip);
        assert_eq!(meta.timeout, Some(Duration::from_millis(500)));
    }

    #[test]
    fn empty_filter_pattern_keeps_everything() {
        let mut registry = Registry::new();
        registry.add("A", "One", noop, &[]);
        registry.add("B", "Two", noop, &[]);
        registry.filter("");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn verbose_line_orders_markers() {
        let mut registry = Registry::new();
        registry
            .add("S", "T", noop, &["b", "a"])
            .xfail()
            .skip()
            .timeout(Duration::from_millis(250));
        assert_eq!(
            registry.list_verbose_lines(),
            vec!["S::T [a, b, xfail, skip, timeout: 250ms]".to_string()]
        );
    }
}
