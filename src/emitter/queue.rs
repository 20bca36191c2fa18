use std::collections::VecDeque;

/// Keys ordered from least to most recently used, holding at most `capacity`.
pub struct RecencyQueue<T> {
    deque: VecDeque<T>,
    capacity: usize,
}

impl<T: PartialEq> RecencyQueue<T> {
    pub fn new(capacity: usize) -> Self {
        RecencyQueue {
            deque: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    // Move the item to the back, and if the capacity is exceeded, pop the oldest item
    pub fn touch(&mut self, item: T) -> Option<T> {
        if let Some(pos) = self.deque.iter().position(|x| *x == item) {
            self.deque.remove(pos);
        }
        self.deque.push_back(item);

        if self.deque.len() > self.capacity {
            self.deque.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.deque.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }
}
