pub mod lu;
pub mod solved_systems;
pub mod system_builder;
