//! Arrow-key cycling between examples.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Maps a `KeyboardEvent.key` value; anything but the two arrows is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Previous),
            "ArrowRight" => Some(Self::Next),
            _ => None,
        }
    }
}

/// Neighbour of `current` in `names`, wrapping at both ends.
///
/// `None` when `names` is empty or doesn't contain `current`.
pub fn neighbour<'a>(names: &[&'a str], current: &str, direction: Direction) -> Option<&'a str> {
    let len = names.len();
    let index = names.iter().position(|name| *name == current)?;
    let next = match direction {
        Direction::Next => (index + 1) % len,
        Direction::Previous => (index + len - 1) % len,
    };
    Some(names[next])
}
