//! Transient effect lifecycles: shockwaves, floating texts, wave banners.
//!
//! Effects have no gameplay influence. Expired entities are pushed to the
//! despawn buffer and removed by cleanup.

use hecs::{Entity, World};

use chronoguard_core::components::{FloatingText, Shockwave, WaveAnnouncement};
use chronoguard_core::constants::{
    FLOATING_TEXT_RISE_SPEED, SHOCKWAVE_GROWTH_RATE, SHOCKWAVE_LINE_WIDTH,
};
use chronoguard_core::types::Position;

pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) {
    for (entity, wave) in world.query_mut::<&mut Shockwave>() {
        wave.radius += SHOCKWAVE_GROWTH_RATE * dt;
        let progress = (wave.radius / wave.max_radius).clamp(0.0, 1.0);
        wave.line_width = SHOCKWAVE_LINE_WIDTH * (1.0 - progress);
        if wave.radius >= wave.max_radius {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (pos, text)) in world.query_mut::<(&mut Position, &mut FloatingText)>() {
        text.life -= dt;
        pos.y -= FLOATING_TEXT_RISE_SPEED * dt;
        if text.life <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, banner) in world.query_mut::<&mut WaveAnnouncement>() {
        banner.life -= dt;
        if banner.life <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
}
