pub mod mean;

use std::ops::Div;

use num_traits::{cast, NumCast, Zero};

impl<T: ?Sized> IteratorAdapter for T where T: Iterator {}
pub trait IteratorAdapter: Iterator {
    /// Finds the mean of the iterator's values.
    /// An empty iterator of floats gives NaN.
    fn mean(self) -> Self::Item
    where
        Self: Sized,
        Self::Item: Zero + NumCast + Div<Self::Item, Output = Self::Item>,
    {
        let (count, sum) = self.fold(
            (0u64, Zero::zero()),
            |acc: (u64, Self::Item), x: Self::Item| (acc.0 + 1, acc.1 + x),
        );
        sum / cast::<u64, Self::Item>(count)
            .expect("Can't cast iterator count as u64 to Self::Item type.")
    }

    /// Finds the smallest and largest of the iterator's values in a single pass.
    /// Returns `None` for an empty iterator.
    /// A value that can't be compared to itself (NaN) is returned as both extremes.
    fn extrema(mut self) -> Option<(Self::Item, Self::Item)>
    where
        Self: Sized,
        Self::Item: PartialOrd + Copy,
    {
        let first = self.next()?;
        if first.partial_cmp(&first).is_none() {
            return Some((first, first));
        }
        let mut min_max = (first, first);
        for x in self {
            if x.partial_cmp(&x).is_none() {
                return Some((x, x));
            }
            if x < min_max.0 {
                min_max.0 = x;
            }
            if x > min_max.1 {
                min_max.1 = x;
            }
        }
        Some(min_max)
    }
}
