use bevy_ecs::prelude::Resource;

/// Level clock advanced once per tick.
///
/// `frame_count` counts ticks and lets timed transitions tell whether they were
/// queued on the current tick.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    /// Scaled length of the current tick in seconds.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Start the next tick, `dt` unscaled seconds after the previous one.
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }
}
