#![doc = include_str!("../README.md")]

mod builder;
mod error;
mod hash;
mod node;
mod ring;
mod shared;

pub use {
    builder::RingBuilder,
    error::{RingError, RingResult},
    hash::{Crc32Hasher, FnHasher, Position, RapidHasher, RingHasher},
    node::Node,
    ring::Ring,
    shared::SharedRing,
};
