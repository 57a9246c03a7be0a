//! Cross-module scenarios
//!
//! Unit tests live next to the code they cover; these exercise whole paths
//! through the level builder, the systems and the engine loop.

mod ray_cast;
