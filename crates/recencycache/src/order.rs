//! Order sequence: recency-ordered doubly linked list
//!
//! Entries live in a slot arena and point at their neighbours by slot index.
//! Freed slots are reused before the arena grows, so a slot handed out by
//! [`OrderSequence::push_front`] stays valid until that entry is removed.

/// Entry in the order sequence
struct Node<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly linked list over a slot arena, front = most recently used
pub(crate) struct OrderSequence<V> {
    nodes: Vec<Option<Node<V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<V> OrderSequence<V> {
    /// Create an empty sequence with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Slot of the most recently used entry
    pub fn front(&self) -> Option<usize> {
        self.head
    }

    /// Slot of the least recently used entry
    pub fn back(&self) -> Option<usize> {
        self.tail
    }

    /// Key stored in `idx`
    pub fn key(&self, idx: usize) -> Option<&str> {
        self.node(idx).map(|node| node.key.as_str())
    }

    /// Payload stored in `idx`
    pub fn value(&self, idx: usize) -> Option<&V> {
        self.node(idx).map(|node| &node.value)
    }

    pub fn value_mut(&mut self, idx: usize) -> Option<&mut V> {
        self.nodes
            .get_mut(idx)
            .and_then(Option::as_mut)
            .map(|node| &mut node.value)
    }

    /// Link a new entry in front of the current head and return its slot
    pub fn push_front(&mut self, key: String, value: V) -> usize {
        let idx = self.alloc_node(Node {
            key,
            value,
            prev: None,
            next: None,
        });
        self.link_front(idx);
        self.len += 1;
        idx
    }

    /// Relocate a live entry to the front. Only its old and new neighbours change.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) || self.node(idx).is_none() {
            return;
        }

        self.unlink(idx);
        self.link_front(idx);
    }

    /// Unlink the entry in `idx` and hand back its key and payload
    pub fn remove(&mut self, idx: usize) -> Option<(String, V)> {
        self.node(idx)?;
        self.unlink(idx);

        let node = self.nodes[idx].take()?;
        self.free_node(idx);
        self.len -= 1;
        Some((node.key, node.value))
    }

    /// Remove the least recently used entry
    pub fn pop_back(&mut self) -> Option<(String, V)> {
        let idx = self.tail?;
        self.remove(idx)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate entries front (most recent) to back (least recent)
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            seq: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    fn node(&self, idx: usize) -> Option<&Node<V>> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = &mut self.nodes[head_idx] {
                    head.prev = Some(idx);
                }
            }
            None => {
                self.tail = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &self.nodes[idx] {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self, node: Node<V>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }

    /// Walk the links both ways and check they agree with `len`
    #[cfg(test)]
    pub(crate) fn assert_linked(&self) {
        let forward: Vec<usize> = {
            let mut out = Vec::new();
            let mut cursor = self.head;
            while let Some(idx) = cursor {
                assert!(out.len() <= self.len, "cycle in forward links");
                out.push(idx);
                cursor = self.node(idx).and_then(|node| node.next);
            }
            out
        };
        let mut backward: Vec<usize> = {
            let mut out = Vec::new();
            let mut cursor = self.tail;
            while let Some(idx) = cursor {
                assert!(out.len() <= self.len, "cycle in backward links");
                out.push(idx);
                cursor = self.node(idx).and_then(|node| node.prev);
            }
            out
        };
        backward.reverse();

        assert_eq!(forward.len(), self.len);
        assert_eq!(forward, backward);

        let live = self.nodes.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live, self.len);
        assert_eq!(live + self.free_list.len(), self.nodes.len());
    }
}

/// Iterator over `(key, value)` pairs from most to least recently used
pub struct Iter<'a, V> {
    seq: &'a OrderSequence<V>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let seq = self.seq;
        let node = seq.node(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some((node.key.as_str(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let seq = self.seq;
        let node = seq.node(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some((node.key.as_str(), &node.value))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
