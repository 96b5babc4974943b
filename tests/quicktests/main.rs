use quickcheck::{Arbitrary, Gen};

mod tree;

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op {
    /// Insert the value into the tree
    Insert(i8),
    /// Delete one copy of the value from the tree
    Delete(i8),
}

impl Arbitrary for Op {
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1]).unwrap() {
            0 => Op::Insert(i8::arbitrary(g)),
            1 => Op::Delete(i8::arbitrary(g)),
            _ => unreachable!(),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match *self {
            Op::Insert(x) => Box::new(x.shrink().map(Op::Insert)),
            Op::Delete(x) => Box::new(x.shrink().map(Op::Delete)),
        }
    }
}
