pub mod bootstrap;

pub use bootstrap::{Bootstrap, BootstrapError, Context};
