pub mod app_state;
pub mod lat_lng;
pub mod point_of_interest;
pub mod search_result;
