pub(crate) mod cpu;
pub(crate) mod painter;
pub(crate) mod surface;
pub(crate) mod workers;
