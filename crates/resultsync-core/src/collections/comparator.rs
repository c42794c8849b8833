use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

type Comparator<E> = Arc<dyn Fn(&E, &E) -> Ordering + Send + Sync>;

/// Ordered list of comparators forming a tie-break chain
///
/// The first comparator dominates; each following comparator only decides
/// between elements that every earlier comparator ranks equal. An empty chain
/// ranks everything equal.
pub struct ComparatorChain<E> {
    comparators: Vec<Comparator<E>>,
}

impl<E> ComparatorChain<E> {
    pub fn new() -> Self {
        Self {
            comparators: Vec::new(),
        }
    }

    /// Append a comparator that breaks ties left by the ones before it
    pub fn then_by<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    {
        self.comparators.push(Arc::new(comparator));
        self
    }

    /// Append a key-extracting comparator (ascending)
    pub fn then_by_key<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&E) -> K + Send + Sync + 'static,
    {
        self.then_by(move |a, b| key(a).cmp(&key(b)))
    }

    /// Append a key-extracting comparator (descending)
    pub fn then_by_key_desc<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&E) -> K + Send + Sync + 'static,
    {
        self.then_by(move |a, b| key(b).cmp(&key(a)))
    }

    pub fn compare(&self, a: &E, b: &E) -> Ordering {
        for comparator in &self.comparators {
            match comparator(a, b) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        Ordering::Equal
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    pub fn len(&self) -> usize {
        self.comparators.len()
    }
}

impl<E: Ord> ComparatorChain<E> {
    /// Chain ranking elements by their natural order
    pub fn natural() -> Self {
        Self::new().then_by(|a: &E, b: &E| a.cmp(b))
    }
}

impl<E> Default for ComparatorChain<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ComparatorChain<E> {
    fn clone(&self) -> Self {
        Self {
            comparators: self.comparators.clone(),
        }
    }
}

impl<E> fmt::Debug for ComparatorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparatorChain")
            .field("comparators", &self.comparators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_comparator_dominates() {
        let chain = ComparatorChain::new()
            .then_by_key(|p: &(u32, u32)| p.0)
            .then_by_key_desc(|p: &(u32, u32)| p.1);
        assert_eq!(chain.compare(&(1, 0), &(2, 9)), Ordering::Less);
        assert_eq!(chain.compare(&(1, 9), &(1, 0)), Ordering::Less);
        assert_eq!(chain.compare(&(1, 4), &(1, 4)), Ordering::Equal);
    }

    #[test]
    fn test_empty_chain_ranks_equal() {
        let chain: ComparatorChain<i32> = ComparatorChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.compare(&1, &2), Ordering::Equal);
    }
}
