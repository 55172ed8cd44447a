use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Settings {
    pub question_count: usize,
    pub tick_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            question_count: 10,
            tick_interval: Duration::from_millis(50),
        }
    }
}
