mod alloc;
mod error;
mod str_ptr;
mod string;
mod write;

pub use error::StringError;
pub use str_ptr::FfiStrPtr;
pub use string::FfiString;
