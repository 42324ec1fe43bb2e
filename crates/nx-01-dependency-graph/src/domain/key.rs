//! Node keys.
//!
//! A key must be cheap to copy and totally ordered so that the within-level
//! linearization `(insertion_sequence, id)` is defined.

use std::fmt::Debug;
use std::hash::Hash;

pub trait NodeKey: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Short human-readable rendering used in errors and logs.
    fn label(&self) -> String;
}

macro_rules! impl_integer_key {
    ($($ty:ty),*) => {
        $(
            impl NodeKey for $ty {
                fn label(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_integer_key!(u32, u64, usize);

impl NodeKey for [u8; 32] {
    fn label(&self) -> String {
        shared_types::short_hex(self)
    }
}

impl NodeKey for [u8; 20] {
    fn label(&self) -> String {
        shared_types::short_hex(self)
    }
}
