pub mod play_builders;
pub mod setup;

// Re-export commonly used items for convenience
#[allow(unused_imports)]
pub use play_builders::*;
#[allow(unused_imports)]
pub use setup::*;
