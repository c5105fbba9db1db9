use std::iter::FusedIterator;

use crate::Segment;

/// Chops `iter` into segments of `width` elements.
///
/// Every segment but the last one is exactly `width` long; the last one holds
/// whatever remains. No empty segment is ever produced, and a `width` of zero
/// produces nothing at all.
///
/// # Examples
///
/// ```rust
/// # use nickel_lang_segment::{leaves, Segment};
/// let chunks: Vec<Segment<u32>> = leaves(2, 0..5).collect();
/// assert_eq!(chunks.len(), 3);
/// assert_eq!(chunks[0].as_slice(), &[0, 1]);
/// assert_eq!(chunks[2].as_slice(), &[4]);
/// ```
pub fn leaves<I: IntoIterator>(width: usize, iter: I) -> Leaves<I::IntoIter> {
    Leaves {
        iter: iter.into_iter(),
        width,
        done: width == 0,
    }
}

/// The iterator returned by [`leaves`].
#[derive(Debug, Clone)]
pub struct Leaves<I> {
    iter: I,
    width: usize,
    // Set once `iter` came up short, so that we never poll it past its end.
    done: bool,
}

impl<I: Iterator> Iterator for Leaves<I> {
    type Item = Segment<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (leaf, _) = Segment::initialize_from_iter(self.width, &mut self.iter);
        if leaf.len() < self.width {
            self.done = true;
        }
        (!leaf.is_empty()).then_some(leaf)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (lower, upper) = self.iter.size_hint();
        (
            lower.div_ceil(self.width),
            upper.map(|upper| upper.div_ceil(self.width)),
        )
    }
}

impl<I: Iterator> FusedIterator for Leaves<I> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths<I: Iterator<Item = u32>>(width: usize, iter: I) -> Vec<usize> {
        leaves(width, iter).map(|leaf| leaf.len()).collect()
    }

    #[test]
    fn chop() {
        assert_eq!(lengths(4, 0..10), vec![4, 4, 2]);
        assert_eq!(lengths(4, 0..8), vec![4, 4]);
        assert_eq!(lengths(4, 0..3), vec![3]);
        assert_eq!(lengths(4, 0..0), Vec::<usize>::new());
        assert_eq!(lengths(0, 0..10), Vec::<usize>::new());

        let flat: Vec<u32> = leaves(3, 0..10).flat_map(|leaf| leaf.into_iter()).collect();
        assert_eq!(flat, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn infinite_input() {
        let mut chunks = leaves(2, 0u32..);
        assert_eq!(chunks.next().unwrap().as_slice(), &[0, 1]);
        assert_eq!(chunks.next().unwrap().as_slice(), &[2, 3]);
    }

    #[test]
    fn size_hint() {
        assert_eq!(leaves(4, 0..10).size_hint(), (3, Some(3)));
        assert_eq!(leaves(4, 0..8).size_hint(), (2, Some(2)));
        assert_eq!(leaves(0, 0..8).size_hint(), (0, Some(0)));
    }
}
