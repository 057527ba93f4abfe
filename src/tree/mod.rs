pub(crate) mod draw;
pub(crate) mod generator;
pub(crate) mod node;
