//! Iterator, `Vec` and `HashMap` helpers.

mod iter;
mod map;
mod sync_map;

pub use iter::{
    has_items, safe_add, AfterFirst, Batches, BeforeFirst, DistinctBy, IteratorExt, VecExt,
};
pub use map::{MapExt, OptionMapExt, StringMapExt};
pub use sync_map::SyncMap;
