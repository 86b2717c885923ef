pub mod contour_tracer;
pub mod shape_classifier;
