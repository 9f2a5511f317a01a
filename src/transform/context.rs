/*!
 * Document-wide transformation state.
 */

use serde::Serialize;
use std::collections::BTreeSet;

/// State carried across every unit of one document run
///
/// The context is mutated sequentially in document order. `introduced_terms`
/// only ever grows: once an acronym has been expanded it stays introduced
/// for the rest of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformationContext {
    /// Short forms whose long form has already been shown
    pub introduced_terms: BTreeSet<String>,
    /// Current course unit
    pub unit_number: usize,
    /// Current lesson inside the unit
    pub lesson_number: usize,
    /// Characters of source text seen so far
    pub total_source_length: usize,
    /// Characters of transformed text produced so far
    pub total_target_length: usize,
}

impl Default for TransformationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformationContext {
    pub fn new() -> Self {
        Self {
            introduced_terms: BTreeSet::new(),
            unit_number: 1,
            lesson_number: 1,
            total_source_length: 0,
            total_target_length: 0,
        }
    }

    /// Start a new course unit; the lesson counter restarts at 1
    pub fn reset_for_new_unit(&mut self, unit_number: usize) {
        self.unit_number = unit_number;
        self.lesson_number = 1;
    }

    pub fn increment_lesson(&mut self) {
        self.lesson_number += 1;
    }

    /// Add the character counts of one source/target pair
    pub fn track_length(&mut self, source: &str, target: &str) {
        self.total_source_length += source.chars().count();
        self.total_target_length += target.chars().count();
    }

    /// Target length as a percentage of source length (0 when nothing was tracked)
    pub fn length_ratio(&self) -> f64 {
        if self.total_source_length == 0 {
            return 0.0;
        }
        self.total_target_length as f64 / self.total_source_length as f64 * 100.0
    }

    pub fn is_introduced(&self, term: &str) -> bool {
        self.introduced_terms.contains(term)
    }

    /// Mark a term introduced; returns false when it already was
    pub fn introduce(&mut self, term: &str) -> bool {
        self.introduced_terms.insert(term.to_string())
    }
}
