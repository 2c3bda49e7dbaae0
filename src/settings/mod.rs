#[derive(Clone, Debug)]
pub struct Settings {
    /// Volume reported until the first explicit change, as a percentage.
    pub initial_volume: u32,
    /// Capacity of the broadcast channel behind `subscribe`.
    pub event_buffer_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_volume: 100,
            event_buffer_size: 32,
        }
    }
}
