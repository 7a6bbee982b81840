pub mod car_player;
pub mod collision;
pub mod traffic_structs;
pub mod traffic_subsystem;
