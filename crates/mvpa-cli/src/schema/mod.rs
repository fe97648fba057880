pub mod match_report;
pub mod null_dist_report;
