//! Scene collaborator boundary
//!
//! The resolver never owns scene objects. It reads positions, flags, and
//! bounding extents through the [`SceneProvider`] trait and leaves storage,
//! transforms, and rendering to the host application. A baseline in-memory
//! implementation ([`SimpleScene`]) is provided for tests and small tools;
//! hosts with their own scene graphs implement the trait over their storage.

mod provider;
mod simple_scene;

pub use provider::{category_from_name, ObjectId, SceneProvider};
pub use simple_scene::SimpleScene;
