//! Built-in Node-style resolution services
//!
//! Hosts that already have a module resolver (a bundler's own resolve hook)
//! plug that in instead. These implementations exist so the engine is usable
//! on its own: from the CLI, in tests, or in tools without a bundler.

mod fallback;
mod module_resolver;

pub use fallback::NodeModulesFallback;
pub use module_resolver::{ModuleResolveOptions, NodeModuleResolver};
