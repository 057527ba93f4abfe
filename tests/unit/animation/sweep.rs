use super::*;

fn b(min: i64, max: i64) -> SweepBounds {
    SweepBounds::new(min, max).unwrap()
}

#[test]
fn inverted_bounds_are_rejected() {
    assert!(SweepBounds::new(5, 1).is_err());
    assert!(SweepBounds::new(3, 3).is_ok());
}

#[test]
fn forward_inside_range() {
    assert_eq!(sweep(2, 1, Direction::Forward, b(0, 10)), (3, Direction::Forward));
    assert_eq!(sweep(2, 3, Direction::Forward, b(0, 10)), (5, Direction::Forward));
}

#[test]
fn touching_a_bound_flips() {
    assert_eq!(sweep(9, 1, Direction::Forward, b(0, 10)), (10, Direction::Reverse));
    assert_eq!(sweep(1, 1, Direction::Reverse, b(0, 10)), (0, Direction::Forward));
}

#[test]
fn overshoot_reflects_back_inside() {
    assert_eq!(sweep(8, 5, Direction::Forward, b(0, 10)), (7, Direction::Reverse));
    assert_eq!(sweep(2, 4, Direction::Reverse, b(0, 10)), (2, Direction::Forward));
}

#[test]
fn overshoot_longer_than_the_range_keeps_bouncing() {
    // 1 -> 4 takes 3 steps, then 47 = 5 full cycles of 8 + 7: down to 0, up to 3.
    assert_eq!(sweep(1, 50, Direction::Forward, b(0, 4)), (3, Direction::Forward));
    // 3 -> 0 takes 3 steps, then 47 = 5 full cycles of 8 + 7: up to 4, down to 1.
    assert_eq!(sweep(3, 50, Direction::Reverse, b(0, 4)), (1, Direction::Reverse));
    assert_eq!(sweep(0, 8, Direction::Forward, b(0, 4)), (0, Direction::Forward));
}

#[test]
fn catch_up_batch_matches_single_steps() {
    let bounds = b(0, 12);
    for (start, dir) in [
        (4, Direction::Forward),
        (9, Direction::Reverse),
        (12, Direction::Reverse),
    ] {
        for steps in [13, 24, 25, 115, 460] {
            let mut single = (start, dir);
            for _ in 0..steps {
                single = sweep(single.0, 1, single.1, bounds);
            }
            assert_eq!(sweep(start, steps, dir, bounds), single, "{start} {dir:?} {steps}");
        }
    }
    // roots 0..12, 460 steps from 0: 460 % 24 = 4.
    assert_eq!(sweep(0, 460, Direction::Forward, bounds), (4, Direction::Forward));
}

#[test]
fn degenerate_range_stays_put() {
    for dir in [Direction::Forward, Direction::Reverse] {
        let (v, d) = sweep(7, 2, dir, b(7, 7));
        assert_eq!(v, 7);
        assert_eq!(d, dir.flipped());
    }
}

#[test]
fn ping_pong_never_leaves_bounds() {
    let bounds = b(-3, 6);
    let mut value = 0;
    let mut dir = Direction::Forward;
    let mut flips = 0;
    for step in 0..500u32 {
        let (v, d) = sweep(value, 1 + step % 4, dir, bounds);
        assert!((-3..=6).contains(&v));
        if d != dir {
            flips += 1;
        }
        value = v;
        dir = d;
    }
    assert!(flips > 10);
}

#[test]
fn out_of_range_start_is_clamped_first() {
    assert_eq!(sweep(40, 1, Direction::Forward, b(0, 10)), (9, Direction::Reverse));
}
