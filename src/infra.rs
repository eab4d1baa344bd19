#![doc(hidden)]

pub mod testing;

#[cfg(feature = "arbitrary")]
pub mod arbitrary;
