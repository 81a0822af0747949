pub(crate) mod contour;
pub(crate) mod measure;
