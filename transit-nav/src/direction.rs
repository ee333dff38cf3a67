//! Slide direction for a navigation.
//!
//! Precedence, highest first:
//! 1. a committed gesture's own direction,
//! 2. history traversal always slides `Right`,
//! 3. between two main views, `Left` iff the new index is greater,
//! 4. anything else slides `Left`.

use transit_api::{Direction, NavOrigin};

use crate::main_views::MainViewSet;

pub fn classify(origin: NavOrigin, from: &str, to: &str, main_views: &MainViewSet) -> Direction {
    match origin {
        NavOrigin::Gesture(direction) => direction,
        NavOrigin::History => Direction::Right,
        NavOrigin::Push => match (main_views.index_of(from), main_views.index_of(to)) {
            (Some(old), Some(new)) if new > old => Direction::Left,
            (Some(_), Some(_)) => Direction::Right,
            _ => Direction::Left,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn views() -> MainViewSet {
        MainViewSet::from_paths(&["/search", "/", "/nearby"]).unwrap()
    }

    #[test]
    fn gesture_direction_overrides_index_order() {
        // Index order says Left, the finger says Right.
        let dir = classify(NavOrigin::Gesture(Direction::Right), "/", "/nearby", &views());
        assert_eq!(dir, Direction::Right);
    }

    #[test]
    fn history_pop_is_always_right() {
        let set = views();
        for (from, to) in [("/", "/nearby"), ("/nearby", "/"), ("/stops/1", "/map"), ("/", "/stops/1")] {
            assert_eq!(classify(NavOrigin::History, from, to, &set), Direction::Right);
        }
    }

    #[test]
    fn push_between_main_views_follows_index() {
        let set = views();
        assert_eq!(classify(NavOrigin::Push, "/search", "/nearby", &set), Direction::Left);
        assert_eq!(classify(NavOrigin::Push, "/", "/nearby", &set), Direction::Left);
        assert_eq!(classify(NavOrigin::Push, "/nearby", "/search", &set), Direction::Right);
        assert_eq!(classify(NavOrigin::Push, "/", "/search", &set), Direction::Right);
    }

    #[test]
    fn push_to_unrelated_view_defaults_left() {
        let set = views();
        assert_eq!(classify(NavOrigin::Push, "/", "/stops/42", &set), Direction::Left);
        assert_eq!(classify(NavOrigin::Push, "/stops/42", "/", &set), Direction::Left);
        assert_eq!(classify(NavOrigin::Push, "/map", "/settings", &set), Direction::Left);
    }
}
