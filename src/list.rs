/// Append-only, index-addressed storage.
///
/// Indices stay stable until the list is cleared.
#[derive(Clone, Debug)]
pub struct List<T> {
    data: Vec<T>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn push(&mut self, element: T) -> usize {
        let index = self.data.len();
        self.data.push(element);
        index
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Appends the elements in consecutive slots and returns the first index.
    pub fn push_run<I>(&mut self, elements: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let first = self.data.len();
        self.data.extend(elements);
        first
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut list = List::new();
        assert_eq!(list.push('a'), 0);
        assert_eq!(list.push('b'), 1);
        assert_eq!(list.size(), 2);
        assert_eq!(list.get(1), Some(&'b'));
        assert_eq!(list.get(2), None);
    }

    #[test]
    fn test_push_run_is_contiguous() {
        let mut list = List::new();
        list.push(0);
        list.push(1);
        let first = list.push_run([10, 11, 12, 13]);
        assert_eq!(first, 2);
        for i in 0..4 {
            assert_eq!(list.get(first + i), Some(&(10 + i as i32)));
        }
    }

    #[test]
    fn test_iter_in_index_order() {
        let mut list = List::new();
        list.push_run(["a", "b", "c"]);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_clear() {
        let mut list = List::with_capacity(4);
        list.push("x");
        list.clear();
        assert_eq!(list.size(), 0);
        assert_eq!(list.push("y"), 0);
        if let Some(v) = list.get_mut(0) {
            *v = "z";
        }
        assert_eq!(list.get(0), Some(&"z"));
    }
}
