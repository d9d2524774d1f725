pub mod catalogue;
pub mod colormap;
pub mod descriptor;
pub mod rules;
