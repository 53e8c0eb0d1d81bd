//! Integration tests for the emitter runtime

mod frame;
mod packing;
