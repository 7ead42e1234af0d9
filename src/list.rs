#[cfg(test)]
extern crate scoped_threadpool;

use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

/// A node in the doubly linked list.
///
/// Contains a value and pointers to the previous and next entries.
/// This structure is not meant to be used directly by users of the `List`.
pub(crate) struct Entry<T> {
    /// The value stored in this entry. Uses MaybeUninit to allow for sigil nodes.
    val: mem::MaybeUninit<T>,
    /// Pointer to the previous entry in the list.
    prev: *mut Entry<T>,
    /// Pointer to the next entry in the list.
    next: *mut Entry<T>,
}

impl<T> Entry<T> {
    fn new(val: T) -> Self {
        Entry {
            val: mem::MaybeUninit::new(val),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Creates a sentinel entry without initializing the value.
    fn new_sigil() -> Self {
        Entry {
            val: mem::MaybeUninit::uninit(),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Returns a reference to the value in this entry.
    ///
    /// # Safety
    ///
    /// Must only be called on non-sigil nodes.
    pub(crate) unsafe fn get_value(&self) -> &T {
        self.val.assume_init_ref()
    }

    /// Consumes a detached entry and returns its value.
    ///
    /// # Safety
    ///
    /// Must only be called on non-sigil nodes.
    unsafe fn into_value(self: Box<Self>) -> T {
        self.val.assume_init()
    }
}

/// An unbounded doubly linked list with sentinel head and tail nodes.
///
/// Nodes are heap allocated and addressed by raw pointer so owners can keep
/// a `key -> node` index and relink nodes in O(1). The front of the list is
/// the most recently linked node; the back is the oldest.
///
/// Capacity is enforced by the eviction policy that owns the list, not here.
pub(crate) struct List<T> {
    len: usize,
    head: *mut Entry<T>,
    tail: *mut Entry<T>,
    _marker: PhantomData<Box<Entry<T>>>,
}

// SAFETY: List owns every node reachable from `head`; moving it to another
// thread moves ownership of those nodes along with it.
unsafe impl<T: Send> Send for List<T> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause data races.
unsafe impl<T: Sync> Sync for List<T> {}

impl<T> List<T> {
    /// Creates an empty list and links its sentinel nodes together.
    pub(crate) fn new() -> List<T> {
        let head = Box::into_raw(Box::new(Entry::new_sigil()));
        let tail = Box::into_raw(Box::new(Entry::new_sigil()));

        unsafe {
            // SAFETY: head and tail are newly allocated and valid pointers
            (*head).next = tail;
            (*tail).prev = head;
        }

        List {
            len: 0,
            head,
            tail,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a value to the front of the list and returns its node.
    pub(crate) fn push_front(&mut self, v: T) -> *mut Entry<T> {
        // SAFETY: Box::into_raw never returns null
        let node = unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(Entry::new(v)))) };
        // SAFETY: node is a newly allocated entry that is not part of any list yet
        unsafe { self.link_front(node.as_ptr()) };
        node.as_ptr()
    }

    /// Removes the last (oldest) node and returns its value.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so tail.prev is a real node
        unsafe {
            let last = (*self.tail).prev;
            self.unlink(last);
            Some(Box::from_raw(last).into_value())
        }
    }

    /// Moves `node` to the front of the list.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this list.
    pub(crate) unsafe fn move_to_front(&mut self, node: *mut Entry<T>) {
        if node.is_null() || node == self.head || node == self.tail {
            return;
        }
        // SAFETY: head is valid for the lifetime of the list
        if unsafe { (*self.head).next } == node {
            return;
        }
        // SAFETY: caller guarantees node is a live node of this list
        unsafe {
            self.detach(node);
            self.attach(node);
        }
    }

    /// Detaches `node` without freeing it, so it can be linked into another list.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this list. After the call the caller owns
    /// the node and must either link it into a list or free it.
    pub(crate) unsafe fn unlink(&mut self, node: *mut Entry<T>) {
        // SAFETY: forwarded from the caller
        unsafe { self.detach(node) };
        self.len -= 1;
    }

    /// Links a detached node at the front of this list.
    ///
    /// # Safety
    ///
    /// `node` must be a valid, initialized entry not currently in any list.
    pub(crate) unsafe fn link_front(&mut self, node: *mut Entry<T>) {
        // SAFETY: forwarded from the caller
        unsafe { self.attach(node) };
        self.len += 1;
    }

    /// Iterates from the front (newest) to the back (oldest).
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            // SAFETY: head is valid for the lifetime of the list
            next: unsafe { (*self.head).next },
            tail: self.tail,
            _marker: PhantomData,
        }
    }

    /// Drops every node, leaving the sentinels linked.
    pub(crate) fn clear(&mut self) {
        while self.pop_back().is_some() {}
    }

    unsafe fn detach(&mut self, node: *mut Entry<T>) {
        // SAFETY: node is in the list, so its neighbours are valid entries
        unsafe {
            (*(*node).prev).next = (*node).next;
            (*(*node).next).prev = (*node).prev;
        }
    }

    unsafe fn attach(&mut self, node: *mut Entry<T>) {
        // SAFETY: head is valid and node is not in any list
        unsafe {
            (*node).next = (*self.head).next;
            (*node).prev = self.head;
            (*self.head).next = node;
            (*(*node).next).prev = node;
        }
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the sentinels were allocated in `new` and are freed only here
        unsafe {
            drop(Box::from_raw(self.head));
            drop(Box::from_raw(self.tail));
        }
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List").field("length", &self.len).finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    next: *mut Entry<T>,
    tail: *mut Entry<T>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.next == self.tail {
            return None;
        }
        // SAFETY: every node between the sentinels is initialized and outlives 'a
        unsafe {
            let node = self.next;
            self.next = (*node).next;
            Some((*node).get_value())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::vec::Vec;

    fn collect<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_push_and_order() {
        let mut list = List::new();
        list.push_front(10);
        list.push_front(20);
        list.push_front(30);
        assert_eq!(list.len(), 3);
        assert_eq!(collect(&list), [30, 20, 10]);
    }

    #[test]
    fn test_pop_back() {
        let mut list = List::new();
        assert_eq!(list.pop_back(), None);
        list.push_front(10);
        list.push_front(20);
        assert_eq!(list.pop_back(), Some(10));
        assert_eq!(list.pop_back(), Some(20));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::new();
        let node1 = list.push_front(10);
        list.push_front(20);
        list.push_front(30);
        unsafe { list.move_to_front(node1) };
        assert_eq!(collect(&list), [10, 30, 20]);
        // already at the front
        unsafe { list.move_to_front(node1) };
        assert_eq!(collect(&list), [10, 30, 20]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_cross_list_node_transfer() {
        let mut first = List::new();
        let mut second = List::new();
        let node = first.push_front(1);
        first.push_front(2);
        second.push_front(3);

        unsafe {
            first.unlink(node);
            second.link_front(node);
        }

        assert_eq!(collect(&first), [2]);
        assert_eq!(collect(&second), [1, 3]);
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(unsafe { (*node).get_value() }, &1);
    }

    #[test]
    fn test_values_dropped() {
        let tracker = Rc::new(());
        {
            let mut list = List::new();
            list.push_front(Rc::clone(&tracker));
            list.push_front(Rc::clone(&tracker));
            list.push_front(Rc::clone(&tracker));
            assert_eq!(Rc::strong_count(&tracker), 4);
            list.pop_back();
            assert_eq!(Rc::strong_count(&tracker), 3);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut list = List::new();
        list.push_front(String::from("a"));
        list.push_front(String::from("b"));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter().next(), None);
        list.push_front(String::from("c"));
        assert_eq!(collect(&list), [String::from("c")]);
    }

    #[test]
    fn test_list_send_across_threads() {
        let mut pool = scoped_threadpool::Pool::new(2);
        let mut lists: Vec<List<u32>> = (0..4).map(|_| List::new()).collect();
        pool.scoped(|scope| {
            for (i, list) in lists.iter_mut().enumerate() {
                scope.execute(move || {
                    for v in 0..100 {
                        list.push_front(v * i as u32);
                    }
                    while list.len() > 10 {
                        list.pop_back();
                    }
                });
            }
        });
        for list in &lists {
            assert_eq!(list.len(), 10);
        }
    }
}
