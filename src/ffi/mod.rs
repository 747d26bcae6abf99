//! FFI module - RAII wrappers around Win32 handles

mod handles;

pub use handles::ProcessHandle;
