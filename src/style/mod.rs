pub(crate) mod attribute;
pub(crate) mod branch_style;
pub(crate) mod defaults;
pub(crate) mod layer_map;
pub(crate) mod snapshot;
pub(crate) mod store;
pub(crate) mod value;
