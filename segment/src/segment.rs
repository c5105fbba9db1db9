use std::{
    fmt,
    hash::{Hash, Hasher},
    iter,
    ops::Index,
    rc::Rc,
};

use log::trace;

use crate::{Error, Result};

/// An immutable sequence with copy-on-write updates.
///
/// Cloning a segment is `O(1)`: the clone shares its elements with the
/// original. Operations that look like mutations (for example [`Segment::set`]
/// or [`Segment::push`]) take `&self` and return a new segment, so a segment
/// never changes once it has been built and can be shared freely between
/// versions of a persistent structure.
pub struct Segment<T> {
    // `None` is the empty segment, which doesn't allocate. A non-empty segment
    // never holds an empty buffer.
    data: Option<Rc<[T]>>,
}

impl<T> Segment<T> {
    /// Creates the empty segment. This doesn't allocate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nickel_lang_segment::Segment;
    /// let seg = Segment::<u32>::new();
    /// assert!(seg.is_empty());
    /// assert_eq!(seg.get(0), None);
    /// ```
    pub const fn new() -> Self {
        Segment { data: None }
    }

    /// Creates a segment holding exactly one element.
    pub fn singleton(elt: T) -> Self {
        let data: Rc<[T]> = Rc::new([elt]);
        Segment { data: Some(data) }
    }

    /// Creates a segment of length `size` whose `i`th element is
    /// `f(offset + i)`.
    ///
    /// `f` is called exactly once per slot, in increasing index order.
    /// Positions wrap around on overflow of `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nickel_lang_segment::Segment;
    /// let seg = Segment::initialize(3, 10, |i| i * 2);
    /// assert_eq!(seg.as_slice(), &[20, 22, 24]);
    /// ```
    pub fn initialize<F>(size: usize, offset: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        (0..size).map(|i| f(offset.wrapping_add(i))).collect()
    }

    /// Takes at most `max_count` elements from `iter` and returns them as a
    /// segment, together with the rest of the iterator.
    ///
    /// Exactly as many elements as end up in the segment are consumed from
    /// `iter`, so the returned iterator can be used to build the next segment.
    /// Running out of elements early isn't an error: the segment is just
    /// shorter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nickel_lang_segment::Segment;
    /// let (seg, rest) = Segment::initialize_from_iter(2, [1, 2, 3, 4, 5].into_iter());
    /// assert_eq!(seg.as_slice(), &[1, 2]);
    /// assert_eq!(rest.collect::<Vec<_>>(), vec![3, 4, 5]);
    ///
    /// let (seg, mut rest) = Segment::initialize_from_iter(4, [1, 2, 3].into_iter());
    /// assert_eq!(seg.as_slice(), &[1, 2, 3]);
    /// assert_eq!(rest.next(), None);
    /// ```
    pub fn initialize_from_iter<I>(max_count: usize, mut iter: I) -> (Self, I)
    where
        I: Iterator<Item = T>,
    {
        let seg = iter.by_ref().take(max_count).collect();
        (seg, iter)
    }

    /// The number of elements in this segment.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if the length is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    pub fn as_slice(&self) -> &[T] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Gets the element at a given index, or `None` if `idx` is out-of-bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nickel_lang_segment::Segment;
    /// let seg = Segment::from(vec![0, 1, 2]);
    /// assert_eq!(seg.get(2), Some(&2));
    /// assert_eq!(seg.get(3), None);
    /// ```
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.as_slice().get(idx)
    }

    /// Gets the element at a given index without checking bounds.
    ///
    /// This is meant for callers that have already established that the index
    /// is valid, typically from the index arithmetic of the tree that owns
    /// this segment.
    ///
    /// # Safety
    ///
    /// `idx` must be strictly less than `self.len()`.
    pub unsafe fn get_unchecked(&self, idx: usize) -> &T {
        debug_assert!(idx < self.len(), "index {idx} out of bounds");
        // SAFETY: the caller guarantees that `idx` is in bounds.
        unsafe { self.as_slice().get_unchecked(idx) }
    }

    /// The first element, or `None` if this segment is empty.
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// The last element, or `None` if this segment is empty.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Folds over the elements from first to last.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nickel_lang_segment::Segment;
    /// let seg = Segment::from(vec![1, 2, 3]);
    /// let digits = seg.fold_left(0, |acc, x| acc * 10 + x);
    /// assert_eq!(digits, 123);
    /// ```
    pub fn fold_left<A, F>(&self, init: A, f: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter().fold(init, f)
    }

    /// Folds over the elements from last to first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nickel_lang_segment::Segment;
    /// let seg = Segment::from(vec![1, 2, 3]);
    /// let digits = seg.fold_right(0, |acc, x| acc * 10 + x);
    /// assert_eq!(digits, 321);
    /// ```
    pub fn fold_right<A, F>(&self, init: A, f: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter().rfold(init, f)
    }

    /// Applies `f` to every element, in index order, and collects the results
    /// in a new segment.
    pub fn map<U, F>(&self, f: F) -> Segment<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(f).collect()
    }

    /// Like [`Segment::map`], but `f` also receives the position of each
    /// element, shifted by `offset`.
    ///
    /// When this segment is a leaf of a larger structure, passing the index of
    /// its first element as `offset` gives `f` absolute positions. Positions
    /// wrap around on overflow of `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nickel_lang_segment::Segment;
    /// let seg = Segment::from(vec!['a', 'b']);
    /// let tagged = seg.indexed_map(32, |i, c| format!("{i}:{c}"));
    /// assert_eq!(tagged.as_slice(), &["32:a", "33:b"]);
    /// ```
    pub fn indexed_map<U, F>(&self, offset: usize, mut f: F) -> Segment<U>
    where
        F: FnMut(usize, &T) -> U,
    {
        self.iter()
            .enumerate()
            .map(|(i, elt)| f(offset.wrapping_add(i), elt))
            .collect()
    }

    /// Returns `true` if both segments share the same buffer.
    ///
    /// Two empty segments are always considered to share their buffer.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        match (&this.data, &other.data) {
            (None, None) => true,
            (Some(this), Some(other)) => Rc::ptr_eq(this, other),
            _ => false,
        }
    }

    pub fn check_invariants(&self) {
        if let Some(data) = &self.data {
            assert!(!data.is_empty(), "non-empty segment with an empty buffer");
        }
    }
}

impl<T: Clone> Segment<T> {
    // Builds a copy of this segment with the element at `idx` replaced.
    // Panics if `idx` is out of bounds.
    fn replaced(&self, idx: usize, elt: T) -> Self {
        let data = self.as_slice();
        data[..idx]
            .iter()
            .cloned()
            .chain(iter::once(elt))
            .chain(data[idx + 1..].iter().cloned())
            .collect()
    }

    /// Returns a copy of this segment with the element at `idx` replaced by
    /// `elt`.
    ///
    /// If `idx` is out-of-bounds, the write is ignored and the returned segment
    /// shares its buffer with `self`. Use [`Segment::try_set`] to detect that
    /// case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nickel_lang_segment::Segment;
    /// let seg = Segment::from(vec![0, 1, 2]);
    /// let updated = seg.set(1, 10);
    /// assert_eq!(updated.as_slice(), &[0, 10, 2]);
    /// assert_eq!(seg.as_slice(), &[0, 1, 2]);
    ///
    /// let ignored = seg.set(3, 10);
    /// assert!(Segment::ptr_eq(&seg, &ignored));
    /// ```
    pub fn set(&self, idx: usize, elt: T) -> Self {
        if idx < self.len() {
            self.replaced(idx, elt)
        } else {
            self.clone()
        }
    }

    /// Like [`Segment::set`], but fails instead of ignoring an out-of-bounds
    /// write.
    pub fn try_set(&self, idx: usize, elt: T) -> Result<Self> {
        let len = self.len();
        if idx < len {
            Ok(self.replaced(idx, elt))
        } else {
            trace!("rejected write at index {idx} of a segment of length {len}");
            Err(Error::OutOfBounds { index: idx, len })
        }
    }

    /// Like [`Segment::set`], for callers that have already checked `idx`.
    ///
    /// # Safety
    ///
    /// `idx` must be strictly less than `self.len()`. The current
    /// implementation panics otherwise, but callers must not rely on it.
    pub unsafe fn set_unchecked(&self, idx: usize, elt: T) -> Self {
        debug_assert!(idx < self.len(), "index {idx} out of bounds");
        self.replaced(idx, elt)
    }

    /// Returns a copy of this segment with `elt` added at the end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nickel_lang_segment::Segment;
    /// let seg = Segment::singleton(0);
    /// let longer = seg.push(1);
    /// assert_eq!(longer.as_slice(), &[0, 1]);
    /// assert_eq!(seg.len(), 1);
    /// ```
    pub fn push(&self, elt: T) -> Self {
        self.iter().cloned().chain(iter::once(elt)).collect()
    }

    /// Returns the elements from index `from` (inclusive) to index `to`
    /// (exclusive).
    ///
    /// Both bounds are clamped to `0..=self.len()` independently; negative
    /// bounds clamp to zero. If `from >= to` after clamping, the result is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nickel_lang_segment::Segment;
    /// let seg = Segment::from(vec![0, 1, 2, 3, 4]);
    /// assert_eq!(seg.slice(1, 3).as_slice(), &[1, 2]);
    /// assert_eq!(seg.slice(-2, 2).as_slice(), &[0, 1]);
    /// assert_eq!(seg.slice(3, 100).as_slice(), &[3, 4]);
    /// assert!(seg.slice(4, 1).is_empty());
    /// ```
    pub fn slice(&self, from: isize, to: isize) -> Self {
        let len = self.len();
        let clamp = |bound: isize| usize::try_from(bound).map_or(0, |b| b.min(len));
        let (from, to) = (clamp(from), clamp(to));

        if from >= to {
            Segment::new()
        } else if from == 0 && to == len {
            self.clone()
        } else {
            self.as_slice()[from..to].iter().cloned().collect()
        }
    }

    /// Appends as many elements of `source` to this segment as fit without
    /// the result growing past `max_total` elements.
    ///
    /// The result is `self` followed by the first
    /// `clamp(max_total - self.len(), 0, source.len())` elements of `source`.
    /// In particular, if `self` is already `max_total` long or longer, the
    /// result is just `self`.
    ///
    /// A tree uses this to top up an under-full leaf from the following one
    /// without going over its leaf width.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use nickel_lang_segment::Segment;
    /// let dest = Segment::from(vec![0, 1, 2]);
    /// let source = Segment::from(vec![3, 4, 5, 6, 7]);
    /// assert_eq!(dest.append_bounded(6, &source).as_slice(), &[0, 1, 2, 3, 4, 5]);
    /// assert_eq!(dest.append_bounded(2, &source).as_slice(), &[0, 1, 2]);
    /// ```
    pub fn append_bounded(&self, max_total: usize, source: &Self) -> Self {
        let taken = max_total.saturating_sub(self.len()).min(source.len());
        if taken < source.len() {
            trace!(
                "append_bounded: dropping {} of {} source elements (max_total {max_total})",
                source.len() - taken,
                source.len()
            );
        }

        if taken == 0 {
            self.clone()
        } else if self.is_empty() && taken == source.len() {
            source.clone()
        } else {
            self.iter()
                .chain(&source.as_slice()[..taken])
                .cloned()
                .collect()
        }
    }
}

impl<T> Clone for Segment<T> {
    fn clone(&self) -> Self {
        Segment {
            data: self.data.clone(),
        }
    }
}

impl<T> Default for Segment<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Segment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Segment<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Segment<T> {}

impl<T: Hash> Hash for Segment<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T> AsRef<[T]> for Segment<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Index<usize> for Segment<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("index out of range")
    }
}

impl<T> FromIterator<T> for Segment<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let data: Rc<[T]> = iter.into_iter().collect();
        Segment {
            data: (!data.is_empty()).then_some(data),
        }
    }
}

impl<T> From<Vec<T>> for Segment<T> {
    fn from(vec: Vec<T>) -> Self {
        if vec.is_empty() {
            Segment::new()
        } else {
            Segment {
                data: Some(Rc::from(vec)),
            }
        }
    }
}

impl<T: Clone> From<&[T]> for Segment<T> {
    fn from(slice: &[T]) -> Self {
        slice.iter().cloned().collect()
    }
}

impl<T: Clone> From<Segment<T>> for Vec<T> {
    fn from(seg: Segment<T>) -> Self {
        seg.as_slice().to_vec()
    }
}

impl<'a, T> IntoIterator for &'a Segment<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> IntoIterator for Segment<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Vec::from(self).into_iter()
    }
}

impl<T: serde::Serialize> serde::Serialize for Segment<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for elt in self.iter() {
            seq.serialize_element(elt)?;
        }
        seq.end()
    }
}

impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Segment<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vec: Vec<T> = Vec::deserialize(deserializer)?;
        Ok(Segment::from(vec))
    }
}
