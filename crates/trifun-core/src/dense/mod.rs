//! Dense tensor implementation and operations

pub mod types;

mod shape_ops;

pub mod densend_traits;

pub use types::DenseND;
