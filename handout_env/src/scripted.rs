//! Scripted index source for forced-recipient runs.

use crate::IndexSource;

/// Replays a fixed list of indices, cycling when it runs out.
///
/// Each scripted value is reduced modulo `n`, so the source always
/// honours the `[0, n)` contract even when the population is smaller
/// than the script expects.
#[derive(Debug, Clone)]
pub struct ScriptedIndexSource {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedIndexSource {
    /// Creates a source that replays `script` cyclically.
    ///
    /// An empty script behaves like `constant(0)`.
    pub fn new(script: Vec<usize>) -> Self {
        let script = if script.is_empty() { vec![0] } else { script };
        Self { script, cursor: 0 }
    }

    /// Creates a source that always names `index`.
    pub fn constant(index: usize) -> Self {
        Self::new(vec![index])
    }

    /// Returns how many draws have been served.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl IndexSource for ScriptedIndexSource {
    fn next_index(&mut self, n: usize) -> usize {
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value % n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_source() {
        let mut source = ScriptedIndexSource::constant(0);

        assert_eq!(source.next_index(2), 0);
        assert_eq!(source.next_index(5), 0);
        assert_eq!(source.draws(), 2);
    }

    #[test]
    fn test_script_cycles_and_wraps() {
        let mut source = ScriptedIndexSource::new(vec![1, 4]);

        assert_eq!(source.next_index(3), 1);
        assert_eq!(source.next_index(3), 1); // 4 % 3
        assert_eq!(source.next_index(3), 1);
        assert_eq!(source.next_index(10), 4);
    }

    #[test]
    fn test_empty_script_defaults_to_zero() {
        let mut source = ScriptedIndexSource::new(Vec::new());
        assert_eq!(source.next_index(4), 0);
    }
}
