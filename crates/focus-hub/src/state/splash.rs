//! Splash Screen State

#[derive(Debug, Clone)]
pub struct SplashState {
    pub bootstrapping: bool,
    /// Current frame of the snake animation
    pub animation_frame: usize,
}

impl Default for SplashState {
    fn default() -> Self {
        Self {
            bootstrapping: true,
            animation_frame: 0,
        }
    }
}
