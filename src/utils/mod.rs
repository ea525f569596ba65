pub(crate) mod bytes;

pub use self::bytes::{REGION_SIZE, Region};
