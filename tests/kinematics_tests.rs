use boxdude::constants::{FRICTION, MAX_SQUISH_VEL, MAX_VEL};
use boxdude::{wrap_x, Character, InputSnapshot, JumpState, Sim, Vec2, World};

const DT: f32 = 1.0 / 60.0;

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

#[test]
fn clamping_holds_for_erratic_input() {
    let mut sim = Sim::new(World::default(), 11);
    // deterministic pseudo-random control pattern
    let mut state: u32 = 0x1234_5678;
    for _ in 0..2000 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let input = InputSnapshot {
            left: state & 1 != 0,
            right: state & 2 != 0,
            jump: state & 4 != 0,
        };
        let dt = (state >> 8) as f32 / u32::MAX as f32 * 0.2;
        sim.step(input, dt);

        let c = sim.character();
        assert!(c.velocity.x.abs() <= MAX_VEL);
        assert!(c.bearing.abs() <= MAX_VEL);
        assert!(c.position.y <= sim.world().height());
        assert!(c.position.x >= 0.0 && c.position.x < sim.world().width());
        assert!(c.squish.velocity.abs() <= MAX_SQUISH_VEL);
    }
}

#[test]
fn wrap_round_trip_returns_to_start() {
    let world = World::default();
    let mut c = Character::spawn(&world);
    c.position.x = 390.0;

    c.velocity.x = 80.0;
    c.integrate(&world, false, 0.25);
    assert_eq!(c.position.x, 10.0);

    c.velocity.x = -80.0;
    c.integrate(&world, false, 0.25);
    assert_eq!(c.position.x, 390.0);
}

#[test]
fn wrap_handles_multiple_widths() {
    assert_eq!(wrap_x(1210.0, 400.0), 10.0);
    assert_eq!(wrap_x(-810.0, 400.0), 390.0);
}

#[test]
fn friction_decays_geometrically() {
    let world = World::default();
    let mut c = Character::spawn(&world);
    c.velocity.x = 200.0;
    let mut sim = Sim::with_character(world, c, 5);

    sim.step(idle(), DT);
    assert_eq!(sim.character().velocity.x, 200.0 * FRICTION);

    for _ in 1..30 {
        sim.step(idle(), DT);
    }
    let expected = 200.0 * FRICTION.powi(30);
    assert!((sim.character().velocity.x - expected).abs() < 1e-3);
}

#[test]
fn bearing_relaxes_without_input() {
    let world = World::default();
    let mut sim = Sim::new(world, 2);
    for _ in 0..10 {
        sim.step(
            InputSnapshot {
                right: true,
                ..idle()
            },
            DT,
        );
    }
    let leaning = sim.character().bearing;
    assert!(leaning > 0.0);
    for _ in 0..60 {
        sim.step(idle(), DT);
    }
    assert!(sim.character().bearing.abs() < leaning * 0.001);
}

#[test]
fn landing_clamps_to_ground() {
    let world = World::default();
    let mut c = Character::spawn(&world);
    c.jump_state = JumpState::Jumping;
    c.position = Vec2::new(200.0, 399.0);
    c.velocity = Vec2::new(0.0, 300.0);

    let landing = c.integrate(&world, false, 1.0 / 60.0).expect("touchdown");

    assert_eq!(landing.impact_speed, 300.0);
    assert_eq!(c.position.y, 400.0);
    assert_eq!(c.velocity.y, 0.0);
    assert_eq!(c.jump_state, JumpState::Landed);
    assert_eq!(c.squish.velocity, -60.0);
    assert!(c.is_grounded(&world));
}

#[test]
fn falling_until_contact_lands() {
    let world = World::default();
    let mut c = Character::spawn(&world);
    c.jump_state = JumpState::Jumping;
    c.position.y = 250.0;
    c.velocity.y = 10.0;
    let mut sim = Sim::with_character(world, c, 9);

    let mut frames = 0;
    while sim.character().jump_state == JumpState::Jumping {
        sim.step(idle(), DT);
        frames += 1;
        assert!(frames < 600, "never landed");
    }
    let c = sim.character();
    assert_eq!(c.jump_state, JumpState::Landed);
    assert_eq!(c.position.y, world.height());
    assert_eq!(c.velocity.y, 0.0);
}

#[test]
fn large_dt_is_capped() {
    let mut a = Sim::new(World::default(), 4);
    let mut b = Sim::new(World::default(), 4);
    let run = InputSnapshot {
        right: true,
        ..idle()
    };
    a.step(run, 5.0);
    b.step(run, boxdude::constants::MAX_FRAME_DT);
    assert_eq!(a.character(), b.character());
}
