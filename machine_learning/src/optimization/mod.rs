mod dual_coordinate_descent;

pub use dual_coordinate_descent::DualCoordinateDescent;
