mod path_data;

pub use path_data::PathData;
