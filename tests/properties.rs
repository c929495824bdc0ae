use glam::{Vec2, Vec3};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use pong_sim::on_table;
use pong_sim::sim::{
    Ball, FrameInput, GameEvent, MatchState, Paddle, Side, resolve_paddle_hit, tick,
};
use pong_sim::MatchConfig;

const DT: f32 = 1.0 / 60.0;

fn table_config() -> MatchConfig {
    MatchConfig::with_table(20.0, 10.0)
}

fn stick() -> impl Strategy<Value = Vec2> {
    (-1.0f32..=1.0, -1.0f32..=1.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn assert_valid_serve(state: &MatchState<impl rand::Rng>) {
    let speed = state.config().ball_speed;
    assert_eq!(state.ball.pos, Vec3::ZERO);
    assert_eq!(state.ball.vel.y, 0.0);
    assert!((state.ball.speed() - speed).abs() < 1e-4);
    assert!(state.ball.vel.z.abs() <= speed + 1e-4);
    assert!(state.ball.vel.x != 0.0);
}

proptest! {
    #[test]
    fn ball_stays_on_table_plane_and_paddles_stay_clamped(
        seed in any::<u64>(),
        sticks in prop::collection::vec((stick(), stick(), 0.0f32..0.5), 1..300),
    ) {
        let mut state = MatchState::new(table_config(), seed).unwrap();
        let (min, max) = state.left.depth_range(10.0);

        for (left, right, dt) in sticks {
            tick(&mut state, &FrameInput::new(left, right), dt);
            prop_assert_eq!(state.ball.pos.y, 0.0);
            prop_assert_eq!(state.ball.vel.y, 0.0);
            for side in [Side::Left, Side::Right] {
                let z = state.paddle(side).depth();
                prop_assert!(z >= min && z <= max, "{:?} paddle at {}", side, z);
                prop_assert!(state.paddle(side).movement >= 0.0);
            }
        }
    }

    #[test]
    fn extreme_input_and_dt_keep_paddles_in_range(
        up in any::<bool>(),
        dt in 1.0f32..1000.0,
    ) {
        let mut state = MatchState::new(table_config(), 1).unwrap();
        let y = if up { 1.0 } else { -1.0 };
        tick(&mut state, &FrameInput::new(Vec2::new(0.0, y), Vec2::new(0.0, y)), dt);
        prop_assert_eq!(state.left.depth(), 4.0 * y);
        prop_assert_eq!(state.right.depth(), 4.0 * y);
    }

    #[test]
    fn wall_bounce_flips_depth_only(
        x in -5.0f32..5.0,
        eps in 0.001f32..0.5,
        vx in -5.0f32..5.0,
        vz in 0.1f32..5.0,
        far in any::<bool>(),
    ) {
        let mut state = MatchState::new(table_config(), 3).unwrap();
        let sign = if far { 1.0 } else { -1.0 };
        state.ball.pos = on_table(x, sign * (5.0 + eps));
        state.ball.vel = on_table(vx, sign * vz);

        let events = tick(&mut state, &FrameInput::default(), DT);
        prop_assert_eq!(events, vec![GameEvent::WallBounce]);
        prop_assert_eq!(state.ball.vel, on_table(vx, -sign * vz));
    }

    #[test]
    fn paddle_return_speed_is_ball_speed_or_boosted(
        offset in -1.0f32..=1.0,
        incoming in (0.5f32..10.0, -5.0f32..5.0),
        movement in 0.0f32..0.2,
        right in any::<bool>(),
    ) {
        let config = table_config();
        let mut left = Paddle::new(Side::Left, -9.0, config.paddle_size);
        let mut right_paddle = Paddle::new(Side::Right, 9.0, config.paddle_size);
        let side = if right { Side::Right } else { Side::Left };
        let paddle_x = config.paddle_x(side);
        match side {
            Side::Left => left.movement = movement,
            Side::Right => right_paddle.movement = movement,
        }

        let mut ball = Ball {
            pos: on_table(paddle_x, offset),
            vel: on_table(side.sign() * incoming.0, incoming.1),
        };
        let event = resolve_paddle_hit(&mut ball, &left, &right_paddle, &config);
        let boosted = movement > config.boost_threshold;
        prop_assert_eq!(event, Some(GameEvent::PaddleHit { side, boosted }));

        let expected = if boosted { 10.0 } else { 5.0 };
        prop_assert!((ball.speed() - expected).abs() < 1e-3);
        // Sent back toward the other end
        prop_assert!(ball.vel.x * side.sign() < 0.0);
        // Outgoing depth direction follows the hit offset
        if offset.abs() > 1e-3 {
            prop_assert_eq!(ball.vel.z.signum(), offset.signum());
        }
    }

    #[test]
    fn any_seed_serves_validly(seed in any::<u64>()) {
        let mut state = MatchState::new(table_config(), seed).unwrap();
        assert_valid_serve(&state);
        state.ball.pos = on_table(3.0, -2.0);
        state.init_match();
        assert_valid_serve(&state);
    }

    #[test]
    fn leaving_the_table_scores_once_and_reserves(
        seed in any::<u64>(),
        beyond in 0.01f32..5.0,
        z in -4.0f32..4.0,
        right in any::<bool>(),
    ) {
        let mut state = MatchState::new(table_config(), seed).unwrap();
        let side = if right { Side::Right } else { Side::Left };
        state.ball.pos = on_table(side.sign() * (12.0 + beyond), z);
        state.ball.vel = Vec3::ZERO;

        let events = tick(&mut state, &FrameInput::default(), DT);
        let scores = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Score { .. }))
            .count();
        prop_assert_eq!(scores, 1);
        prop_assert_eq!(events[0], GameEvent::Score { side });
        assert_valid_serve(&state);
    }
}

#[test]
fn serve_direction_is_roughly_fair() {
    let mut state = MatchState::new(table_config(), 2024).unwrap();
    let trials = 4000;
    let mut rightward = 0;
    for _ in 0..trials {
        state.init_match();
        if state.ball.vel.x > 0.0 {
            rightward += 1;
        }
    }
    let fraction = rightward as f32 / trials as f32;
    assert!((0.45..0.55).contains(&fraction), "rightward fraction {fraction}");
}

#[test]
fn injected_rng_is_reproducible() {
    let a = MatchState::with_rng(table_config(), Pcg64::seed_from_u64(77)).unwrap();
    let b = MatchState::with_rng(table_config(), Pcg64::seed_from_u64(77)).unwrap();
    assert_eq!(a.ball, b.ball);
    assert_valid_serve(&a);
}

#[test]
fn back_to_back_serves_are_independent() {
    let mut state = MatchState::new(table_config(), 5).unwrap();
    let first = state.init_match();
    let second = state.init_match();
    assert_valid_serve(&state);
    match (first, second) {
        (GameEvent::Serve { velocity: v1 }, GameEvent::Serve { velocity: v2 }) => {
            assert!((v1.length() - 5.0).abs() < 1e-4);
            assert!((v2.length() - 5.0).abs() < 1e-4);
        }
        other => panic!("expected two serves, got {other:?}"),
    }
}

#[test]
fn autopilot_rally_keeps_invariants() {
    let mut state = MatchState::new(table_config(), 11).unwrap();
    let mut hits = 0;
    for _ in 0..20_000 {
        let input = FrameInput::new(
            pong_sim::autopilot::steer(&state.left, &state.ball, state.config(), state.frame),
            pong_sim::autopilot::steer(&state.right, &state.ball, state.config(), state.frame),
        );
        for event in tick(&mut state, &input, DT) {
            if let GameEvent::PaddleHit { .. } = event {
                hits += 1;
                let speed = state.ball.speed();
                assert!((speed - 5.0).abs() < 1e-3 || (speed - 10.0).abs() < 1e-3);
            }
        }
        assert_eq!(state.ball.pos.y, 0.0);
    }
    assert!(hits > 0);
}
