pub mod posting;
pub mod registry;
