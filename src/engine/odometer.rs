//! Odometer over the choice positions of a pattern

use crate::pattern::{Pattern, Token};

/// One position of the expanded pattern
#[derive(Debug, Clone, Copy)]
enum Slot<'p> {
    Fixed(&'p str),
    Choice(&'p [String]),
}

/// Generator for every combination of a pattern, in odometer order.
///
/// Keeps one digit per choice position; the rightmost digit moves fastest.
/// Memory use is proportional to the number of positions, never to the
/// number of combinations.
#[derive(Debug, Clone)]
pub struct WordGenerator<'p> {
    slots: Vec<Slot<'p>>,
    digits: Vec<usize>,
    radices: Vec<usize>,
    current_index: u64,
    total: Option<u64>,
    exhausted: bool,
}

impl<'p> WordGenerator<'p> {
    /// Create a generator positioned on the first combination
    pub fn new(pattern: &'p Pattern<'p>) -> Self {
        let mut slots = Vec::new();
        let mut radices = Vec::new();

        for token in pattern.tokens() {
            match token {
                Token::Literal(text) => slots.push(Slot::Fixed(text.as_str())),
                Token::Placeholder { enumerator, repeat } => {
                    for _ in 0..*repeat {
                        slots.push(Slot::Choice(enumerator.values()));
                        radices.push(enumerator.len());
                    }
                }
            }
        }

        Self {
            exhausted: radices.contains(&0),
            digits: vec![0; radices.len()],
            total: pattern.total_combinations(),
            slots,
            radices,
            current_index: 0,
        }
    }

    /// Get total number of combinations; `None` if it overflows `u64`
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Number of choice positions (placeholder repeats included)
    pub fn positions(&self) -> usize {
        self.radices.len()
    }

    /// Index of the next combination to be produced
    pub fn current_index(&self) -> u64 {
        self.current_index
    }

    /// Jump to the `index`-th combination.
    ///
    /// Lets independent generators split the index space between them.
    pub fn set_index(&mut self, index: u64) {
        match self.total {
            Some(total) if index >= total => {
                self.current_index = total;
                self.exhausted = true;
            }
            _ => {
                self.digits = self.decompose(index);
                self.current_index = index;
                self.exhausted = self.radices.contains(&0);
            }
        }
    }

    /// Combination at a specific index, without moving the generator
    pub fn word_at(&self, index: u64) -> Option<String> {
        if self.radices.contains(&0) || self.total.is_some_and(|total| index >= total) {
            return None;
        }
        Some(self.render(&self.decompose(index)))
    }

    /// Generate next batch of words
    pub fn next_batch(&mut self, count: usize) -> Vec<String> {
        self.by_ref().take(count).collect()
    }

    /// Check if generator is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Remaining count, when the total is known
    pub fn remaining(&self) -> Option<u64> {
        self.total.map(|total| total.saturating_sub(self.current_index))
    }

    /// Get progress percentage
    pub fn progress_percent(&self) -> f64 {
        match self.total {
            Some(0) => 100.0,
            Some(total) => (self.current_index as f64 / total as f64) * 100.0,
            None => 0.0,
        }
    }

    fn decompose(&self, index: u64) -> Vec<usize> {
        let mut digits = vec![0; self.radices.len()];
        let mut n = index;
        for (digit, &radix) in digits.iter_mut().zip(&self.radices).rev() {
            if radix == 0 {
                break;
            }
            let radix = radix as u64;
            *digit = (n % radix) as usize;
            n /= radix;
        }
        digits
    }

    fn render(&self, digits: &[usize]) -> String {
        let mut word = String::new();
        let mut choice = 0;
        for slot in &self.slots {
            match slot {
                Slot::Fixed(text) => word.push_str(text),
                Slot::Choice(values) => {
                    word.push_str(&values[digits[choice]]);
                    choice += 1;
                }
            }
        }
        word
    }

    /// Increment the rightmost digit, carrying to the left
    fn advance(&mut self) {
        for (digit, &radix) in self.digits.iter_mut().zip(&self.radices).rev() {
            *digit += 1;
            if *digit < radix {
                return;
            }
            *digit = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for WordGenerator<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let word = self.render(&self.digits);
        self.current_index += 1;
        self.advance();
        Some(word)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        match self.remaining().and_then(|r| usize::try_from(r).ok()) {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerator::{Bindings, EnumeratorSource};
    use crate::output::Encoding;
    use crate::pattern::parse;

    fn bindings() -> Bindings {
        let mut bindings = Bindings::new();
        for (name, spec) in [("a", "abc"), ("digit", "123"), ("ab", "ab")] {
            bindings
                .declare_source(name, &EnumeratorSource::Literal(spec.to_string()), Encoding::Utf8)
                .unwrap();
        }
        bindings
    }

    #[test]
    fn test_generator_total() {
        let b = bindings();
        let pattern = parse("%(ascii_lowercase){4}", &b).unwrap();
        let gen = WordGenerator::new(&pattern);
        assert_eq!(gen.total(), Some(26_u64.pow(4))); // 456,976
        assert_eq!(gen.positions(), 4);
    }

    #[test]
    fn test_odometer_order() {
        let b = bindings();
        let pattern = parse("x%(a)%(digit)", &b).unwrap();
        let words: Vec<String> = WordGenerator::new(&pattern).collect();
        assert_eq!(words, vec!["xa1", "xa2", "xa3", "xb1", "xb2", "xb3", "xc1", "xc2", "xc3"]);
    }

    #[test]
    fn test_literal_only_yields_once() {
        let b = bindings();
        let pattern = parse("static", &b).unwrap();
        let mut gen = WordGenerator::new(&pattern);
        assert_eq!(gen.next(), Some("static".to_string()));
        assert_eq!(gen.next(), None);
        assert!(gen.is_exhausted());
    }

    #[test]
    fn test_empty_pattern_yields_empty_word() {
        let b = bindings();
        let pattern = parse("", &b).unwrap();
        let words: Vec<String> = WordGenerator::new(&pattern).collect();
        assert_eq!(words, vec![String::new()]);
    }

    #[test]
    fn test_word_at() {
        let b = bindings();
        let pattern = parse("%(ascii_lowercase){4}", &b).unwrap();
        let gen = WordGenerator::new(&pattern);
        assert_eq!(gen.word_at(0), Some("aaaa".to_string()));
        assert_eq!(gen.word_at(1), Some("aaab".to_string()));
        assert_eq!(gen.word_at(25), Some("aaaz".to_string()));
        assert_eq!(gen.word_at(26), Some("aaba".to_string()));
        assert_eq!(gen.word_at(26_u64.pow(4)), None);
    }

    #[test]
    fn test_next_batch() {
        let b = bindings();
        let pattern = parse("%(ascii_lowercase){4}", &b).unwrap();
        let mut gen = WordGenerator::new(&pattern);
        let batch = gen.next_batch(3);
        assert_eq!(batch, vec!["aaaa", "aaab", "aaac"]);
        assert_eq!(gen.current_index(), 3);
    }

    #[test]
    fn test_resume() {
        let b = bindings();
        let pattern = parse("%(a)%(digit)", &b).unwrap();
        let mut gen = WordGenerator::new(&pattern);
        gen.set_index(4);
        assert_eq!(gen.current_index(), 4);
        assert_eq!(gen.next(), Some("b2".to_string()));
        assert_eq!(gen.remaining(), Some(4));

        gen.set_index(100);
        assert!(gen.is_exhausted());
        assert_eq!(gen.next(), None);
    }

    #[test]
    fn test_partitioned_ranges_cover_everything() {
        let b = bindings();
        let pattern = parse("%(ab)%(a)%(digit)", &b).unwrap();
        let full: Vec<String> = WordGenerator::new(&pattern).collect();

        let mut parts = Vec::new();
        for start in [0u64, 7, 13] {
            let end = match start {
                0 => 7,
                7 => 13,
                _ => 18,
            };
            let mut gen = WordGenerator::new(&pattern);
            gen.set_index(start);
            parts.extend(gen.take((end - start) as usize));
        }
        assert_eq!(parts, full);
    }

    #[test]
    fn test_rightmost_changes_every_step() {
        let b = bindings();
        let pattern = parse("%(a)%(ab)", &b).unwrap();
        let words: Vec<String> = WordGenerator::new(&pattern).collect();
        for pair in words.windows(2) {
            assert_ne!(pair[0].chars().last(), pair[1].chars().last());
        }
    }

    #[test]
    fn test_overflowing_total() {
        let b = bindings();
        let pattern = parse("%(ascii_visible){12}", &b).unwrap();
        let mut gen = WordGenerator::new(&pattern);
        assert_eq!(gen.total(), None);
        assert_eq!(gen.next(), Some("000000000000".to_string()));
        assert_eq!(gen.next(), Some("000000000001".to_string()));
    }
}
