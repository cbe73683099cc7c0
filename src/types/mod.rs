//! The type model.
//!
//! Types are a closed enum. Struct types are stored once in a
//! [`types::TypeTable`] arena and referred to by [`types::StructId`], so a
//! struct can mention itself through an optional field without the `Type`
//! value becoming cyclic.

pub mod types;

#[cfg(test)]
mod tests;
