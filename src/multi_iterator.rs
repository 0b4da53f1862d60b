//! `MultiIterator`: several iterators chained into one traversal.

/// Chains an ordered sequence of source iterators into one logical
/// iterator: items come from the first source until it is exhausted, then
/// from the next non-exhausted one, transparently. Zero sources, or all
/// sources empty, is simply an exhausted iterator.
///
/// # Example
///
/// ```
/// use eventful_collections::MultiIterator;
///
/// let mut chained = MultiIterator::new();
/// chained.add(vec![1, 2].into_iter());
/// chained.add(vec![].into_iter());
/// chained.add(vec![3].into_iter());
/// assert_eq!(chained.collect::<Vec<i32>>(), vec![1, 2, 3]);
/// ```
pub struct MultiIterator<I> {
    sources: Vec<I>,
    active: usize,
}

impl<I: Iterator> MultiIterator<I> {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            active: 0,
        }
    }

    /// Appends a source; it is drained after every source added before it.
    pub fn add(&mut self, source: I) {
        self.sources.push(source);
    }
}

impl<I: Iterator> Default for MultiIterator<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Iterator> Iterator for MultiIterator<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        // Skip forward through exhausted sources until one yields.
        while let Some(source) = self.sources.get_mut(self.active) {
            match source.next() {
                Some(item) => return Some(item),
                None => self.active += 1,
            }
        }
        None
    }
}

impl<I: Iterator> FromIterator<I> for MultiIterator<I> {
    fn from_iter<T: IntoIterator<Item = I>>(sources: T) -> Self {
        Self {
            sources: sources.into_iter().collect(),
            active: 0,
        }
    }
}

impl<I: Iterator> Extend<I> for MultiIterator<I> {
    fn extend<T: IntoIterator<Item = I>>(&mut self, sources: T) {
        self.sources.extend(sources);
    }
}
