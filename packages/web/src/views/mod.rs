mod travel_map;
pub use travel_map::TravelMap;
