use quickcheck::{Arbitrary, Gen};

mod linked;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Add the T to the data structure
    Add(T),
    /// Remove one T from the data structure
    Remove(T),
    /// Rebuild the data structure into a balanced shape
    Rebalance,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Rebuilds are
    /// rarer so the tree has time to degenerate between them.
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 8 {
            0..=3 => Op::Add(T::arbitrary(g)),
            4..=6 => Op::Remove(T::arbitrary(g)),
            _ => Op::Rebalance,
        }
    }
}
