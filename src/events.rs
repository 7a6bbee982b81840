use crate::helpers::positions::ChunkCoord;

/// Notifications for the presentation layer. `ChunkLoaded` means the chunk
/// data is resident and meshes can be built from it; `ChunkUnloaded` means
/// any resources built for that coordinate must be disposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    ChunkLoaded(ChunkCoord),
    ChunkUnloaded(ChunkCoord),
}

#[derive(Default)]
pub struct Events {
    queue: Vec<Event>,
}

impl Events {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn send(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue() {
        let mut events = Events::new();
        events.send(Event::ChunkLoaded(ChunkCoord::new(0, 0)));
        events.send(Event::ChunkUnloaded(ChunkCoord::new(1, -2)));

        let drained: Vec<Event> = events.drain().collect();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], Event::ChunkLoaded(ChunkCoord::new(0, 0)));
        assert!(events.is_empty());
    }
}
