//! Variable handles
//!
//! A [`VariableRef`] is a fixed-length byte region shared between the
//! application and a recipe. The application keeps one clone and hands
//! another to [`Recipe::add_variable`](crate::Recipe::add_variable);
//! both see the same bytes. The length never changes after creation.
//!
//! ```text
//!   application ──┐
//!                 ├──► Arc<Mutex<[u8; len]>>
//!   registry ─────┘
//! ```

use std::fmt;
use std::sync::Arc;

use bytemuck::Pod;
use parking_lot::Mutex;

use crate::error::{RecipeError, Result};

/// Shared handle to a fixed-size byte region
#[derive(Clone)]
pub struct VariableRef {
    bytes: Arc<Mutex<Box<[u8]>>>,
    len: usize,
}

impl VariableRef {
    /// A region of `len` zero bytes
    pub fn zeroed(len: usize) -> Self {
        Self::from_bytes(vec![0u8; len])
    }

    /// A region initialized with `bytes`
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into().into_boxed_slice();
        let len = bytes.len();
        Self {
            bytes: Arc::new(Mutex::new(bytes)),
            len,
        }
    }

    /// A region holding the raw bytes of `value`
    pub fn from_value<T: Pod>(value: &T) -> Self {
        Self::from_bytes(bytemuck::bytes_of(value))
    }

    /// Region length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy of the current bytes
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.lock().to_vec()
    }

    /// Run `f` with shared access to the bytes
    pub fn read<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        let guard = self.bytes.lock();
        f(&guard)
    }

    /// Run `f` with exclusive access to the bytes
    pub fn write<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut guard = self.bytes.lock();
        f(&mut guard)
    }

    /// Overwrite the region with `src`, which must be exactly `len()` bytes
    pub fn copy_from_slice(&self, src: &[u8]) -> Result<()> {
        if src.len() != self.len {
            return Err(RecipeError::SizeMismatch {
                expected: self.len,
                actual: src.len(),
            });
        }
        self.bytes.lock().copy_from_slice(src);
        Ok(())
    }

    /// Interpret the region as a `T`
    pub fn get<T: Pod>(&self) -> Result<T> {
        self.check_size::<T>()?;
        Ok(bytemuck::pod_read_unaligned(&self.bytes.lock()))
    }

    /// Store `value` into the region
    pub fn set<T: Pod>(&self, value: &T) -> Result<()> {
        self.copy_from_slice(bytemuck::bytes_of(value))
    }

    /// True if both handles point at the same region
    pub fn ptr_eq(&self, other: &VariableRef) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }

    fn check_size<T: Pod>(&self) -> Result<()> {
        let actual = std::mem::size_of::<T>();
        if actual != self.len {
            return Err(RecipeError::SizeMismatch {
                expected: self.len,
                actual,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for VariableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableRef").field("len", &self.len).finish()
    }
}
