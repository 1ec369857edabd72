//! Animation system.
//!
//! [`animation`] advances every looping [`Animation`] by the tick delta.
//! Clips with a single frame or no frame rate never advance. The frame to
//! draw is read back with [`Animation::current_frame`].

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::resources::worldtime::WorldTime;

pub fn animation(mut query: Query<&mut Animation>, time: Res<WorldTime>) {
    for mut anim in query.iter_mut() {
        let frames = anim.clip.frames().len();
        let fps = anim.clip.fps();
        if frames <= 1 || fps <= 0.0 {
            continue;
        }
        let frame_duration = 1.0 / fps;
        anim.elapsed_time += time.delta;
        while anim.elapsed_time >= frame_duration {
            anim.elapsed_time -= frame_duration;
            anim.frame_index = (anim.frame_index + 1) % frames;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::{AnimClip, CHAR1, CHAR2};

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        schedule.run(world);
    }

    #[test]
    fn walk_loops_at_twelve_fps() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.09,
            ..WorldTime::default()
        });
        let e = world.spawn(Animation::new(AnimClip::Walk)).id();
        run(&mut world);
        assert_eq!(world.get::<Animation>(e).unwrap().current_frame(), CHAR2);
        run(&mut world);
        assert_eq!(world.get::<Animation>(e).unwrap().current_frame(), CHAR1);
    }

    #[test]
    fn single_frame_clips_hold() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 1.0,
            ..WorldTime::default()
        });
        let e = world.spawn(Animation::new(AnimClip::Jump)).id();
        run(&mut world);
        let anim = world.get::<Animation>(e).unwrap();
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.elapsed_time, 0.0);
    }
}
