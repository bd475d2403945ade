pub mod history;
pub mod render;
pub mod result;
pub mod scan;
pub mod sensors;
pub mod settings;
pub mod setup;
pub mod version;
