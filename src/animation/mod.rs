pub(crate) mod clock;
pub(crate) mod pacer;
pub(crate) mod sweep;
