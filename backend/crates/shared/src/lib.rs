//! Shared Kernel
//!
//! The small core of vocabulary shared by every backend crate:
//! - Unified error type and result alias
//! - Typed ID wrappers
//!
//! Only things whose meaning is stable across domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
