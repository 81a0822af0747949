pub(crate) mod corner;
pub(crate) mod dash;
pub(crate) mod discrete;
pub(crate) mod path_effect;
pub(crate) mod trim;
