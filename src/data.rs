use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Settings {
    /// The only externally required value: everything generated derives from it.
    pub world_seed: u32,

    /// Chunk load radius around the player, in chunks.
    pub view_distance: i32,
    /// Chunk eviction radius, in chunks. Clamped to at least `view_distance`.
    pub cache_distance: i32,

    pub traffic_pool_size: usize,
    pub traffic_throttling: bool,

    /// Seconds per full day/night cycle.
    pub day_length: f32,
    /// Starting day phase in [0,1); 0.25 is noon.
    pub start_time_of_day: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_seed: 12345,
            view_distance: 3,
            cache_distance: 5,
            traffic_pool_size: 100,
            traffic_throttling: true,
            day_length: 120.0,
            start_time_of_day: 0.25,
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let settings = match fs::read_to_string(path) {
            Ok(content) => toml::from_str::<Self>(&content).unwrap_or_else(|err| {
                log::warn!("error parsing {:?}: {err}, using defaults", path);
                Self::default()
            }),
            Err(_) => {
                log::warn!("no settings file at {:?}, creating default", path);
                let default = Self::default();
                if let Ok(toml_str) = toml::to_string_pretty(&default) {
                    let _ = fs::write(path, toml_str);
                }
                default
            }
        };

        settings.sanitized()
    }

    /// Cache radius below view radius would evict chunks the streamer is
    /// trying to keep loaded, so it is clamped up.
    pub fn sanitized(mut self) -> Self {
        self.view_distance = self.view_distance.max(0);
        self.cache_distance = self.cache_distance.max(self.view_distance);
        self.day_length = self.day_length.max(1.0);
        self
    }
}
