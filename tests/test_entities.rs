use invaders::entities::*;

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn overlapping_rects_collide() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn touching_edges_do_not_collide() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
}

#[test]
fn contained_rect_collides() {
    let enemy = Rect::new(300.0, 180.0, 40.0, 30.0);
    let bullet = Rect::new(310.0, 190.0, 5.0, 10.0);
    assert!(bullet.overlaps(&enemy));
}

#[test]
fn rect_edges() {
    let r = Rect::new(50.0, 30.0, 40.0, 30.0);
    assert_eq!(r.right(), 90.0);
    assert_eq!(r.bottom(), 60.0);
}

// ── GameStatus ────────────────────────────────────────────────────────────────

#[test]
fn status_messages() {
    assert_eq!(GameStatus::Running.message(), None);
    assert_eq!(GameStatus::Won.message(), Some("You Win!"));
    assert_eq!(GameStatus::Lost.message(), Some("Game Over"));
}

#[test]
fn only_won_and_lost_are_terminal() {
    assert!(!GameStatus::Running.is_terminal());
    assert!(GameStatus::Won.is_terminal());
    assert!(GameStatus::Lost.is_terminal());
}
