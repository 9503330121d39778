use std::cmp::Ordering;

/// A binary min-heap ordered by an injected comparator.
///
/// Positions are 1-based: the root is at position 1 and the children of `i` are `2i` and `2i + 1`.
/// Element at position `i` is stored at `elements[i - 1]`.
///
/// There is no decrease-key or arbitrary removal. Callers that need to cancel an element flag it and skip it when popped.
pub struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    elements: Vec<T>,
    compare: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[allow(dead_code)]
    pub fn new(compare: F) -> Self {
        Self {
            elements: Vec::new(),
            compare,
        }
    }

    pub fn with_capacity(capacity: usize, compare: F) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            compare,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns the smallest element without removing it.
    #[allow(dead_code)]
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn push(&mut self, value: T) {
        self.elements.push(value);
        self.sift_up(self.elements.len());
    }

    /// Removes and returns the smallest element, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }

        let top = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.sift_down(1);
        }

        Some(top)
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.elements[a - 1], &self.elements[b - 1]) == Ordering::Less
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.elements.swap(a - 1, b - 1);
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 1 {
            let parent = index / 2;
            if self.less(index, parent) {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.elements.len();
        loop {
            let left = 2 * index;
            if left > len {
                break;
            }

            // the right child only wins when strictly smaller, so ties go to the left
            let right = left + 1;
            let child = if right <= len && self.less(right, left) {
                right
            } else {
                left
            };

            if self.less(child, index) {
                self.swap(child, index);
                index = child;
            } else {
                break;
            }
        }
    }
}
