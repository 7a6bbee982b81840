/// Snapshot of the player's control state, polled once per frame by
/// whatever owns the window. The core never reads the keyboard itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Reserved; the physics model ignores it.
    pub boost: bool,
}

impl InputState {
    pub fn none() -> Self {
        Self::default()
    }
}
