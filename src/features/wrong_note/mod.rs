pub mod review;

pub use review::compute_review;
